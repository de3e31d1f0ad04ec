use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::viewer::ViewerState;

pub(crate) struct StatusBarComponent;

fn format_tokens(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}k", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

impl Component for StatusBarComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &ViewerState) {
        let separator = Span::styled(" | ", Style::default().fg(Color::DarkGray));
        let mut spans = Vec::new();

        match state.selected_agent() {
            Some(agent) => {
                spans.push(Span::styled(
                    format!(" {}", agent.short_id()),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
                spans.push(separator.clone());
                if agent.is_live {
                    spans.push(Span::styled("LIVE", Style::default().fg(Color::Green)));
                } else {
                    spans.push(Span::styled("completed", Style::default().fg(Color::DarkGray)));
                }

                let record_count = state.stream().map_or(0, |s| s.records.len());
                spans.push(separator.clone());
                spans.push(Span::raw(format!("{} msgs", record_count)));

                if let Some(model) = state.model() {
                    spans.push(separator.clone());
                    spans.push(Span::raw(model.to_string()));
                }

                let (input, output) = state.token_totals();
                if input + output > 0 {
                    spans.push(separator.clone());
                    spans.push(Span::raw(format!(
                        "in {} out {}",
                        format_tokens(input),
                        format_tokens(output)
                    )));
                }

                let viewport = state.viewport();
                let window = viewport.window();
                let first = if window.end > window.start { window.start + 1 } else { 0 };
                spans.push(separator.clone());
                spans.push(Span::raw(format!(
                    "{}% ({}-{}/{})",
                    viewport.scroll_percent(),
                    first,
                    window.end,
                    viewport.total_lines()
                )));

                spans.push(separator.clone());
                if viewport.auto_scroll() {
                    spans.push(Span::styled("auto-scroll ON", Style::default().fg(Color::Green)));
                } else {
                    spans.push(Span::styled("auto-scroll OFF", Style::default().fg(Color::Yellow)));
                }
            }
            None => spans.push(Span::raw(" No agent selected")),
        }

        spans.push(separator);
        spans.push(Span::raw(state.format().label()));

        f.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black)),
            area,
        );
    }
}
