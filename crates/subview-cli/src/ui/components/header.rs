use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

use super::Component;
use crate::viewer::ViewerState;

const KEY_HINTS: &str =
    "Tab/S-Tab session  \u{2190}/\u{2192} focus  \u{2191}/\u{2193} select/scroll  PgUp/PgDn page  a auto-scroll  v format  q quit";

pub(crate) struct HeaderComponent;

impl Component for HeaderComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &ViewerState) {
        let tabs = if state.sessions().is_empty() {
            let text = if state.sessions_loaded() {
                "No sessions found"
            } else {
                "Loading sessions..."
            };
            Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
        } else {
            let selected = state.selected_session_index();
            let mut spans = vec![Span::raw("Sessions: ")];
            for (i, session) in state.sessions().iter().enumerate() {
                if Some(i) == selected {
                    spans.push(Span::styled(
                        format!("[{}]", session.short_id()),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ));
                } else {
                    spans.push(Span::raw(format!(" {} ", session.short_id())));
                }
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        };

        let hints = Line::from(Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)));

        let header = Paragraph::new(Text::from(vec![tabs, hints])).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " subview ",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
        );

        f.render_widget(header, area);
    }
}
