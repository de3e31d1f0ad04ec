use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

use super::{Component, panel_border};
use crate::presentation::{DisplayLine, LineKind};
use crate::viewer::{Focus, ViewerState};

const NO_AGENTS: &str = "No agents available. Select a session with subagent activity.";
const NO_MESSAGES: &str = "No messages yet. Waiting for agent activity...";

pub(crate) struct ActivityComponent;

fn line_style(kind: LineKind) -> Style {
    match kind {
        LineKind::Header => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        LineKind::User => Style::default().fg(Color::Blue),
        LineKind::Thinking => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
        LineKind::Text | LineKind::Blank => Style::default(),
        LineKind::ToolUse => Style::default().fg(Color::Yellow),
        LineKind::ToolResult => Style::default().fg(Color::Green),
        LineKind::ToolError => Style::default().fg(Color::Red),
        LineKind::Detail => Style::default().fg(Color::DarkGray),
    }
}

fn styled(line: &DisplayLine) -> Line<'_> {
    Line::from(Span::styled(line.text.as_str(), line_style(line.kind)))
}

fn indicator(text: &'static str, shown: bool) -> Line<'static> {
    if shown {
        Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
    } else {
        Line::raw("")
    }
}

impl Component for ActivityComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &ViewerState) {
        let title = match state.selected_agent() {
            Some(agent) => format!(" Activity: {} ", agent.slug),
            None => " Activity ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(panel_border(state, Focus::Activity))
            .title(title);

        let empty_text = if state.agents().is_empty() {
            Some(NO_AGENTS)
        } else if state.lines().is_empty() {
            Some(NO_MESSAGES)
        } else {
            None
        };

        if let Some(text) = empty_text {
            let empty = Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
                .block(block);
            f.render_widget(empty, area);
            return;
        }

        let window = state.viewport().window();
        let mut lines = Vec::with_capacity(window.end - window.start + 2);
        lines.push(indicator("... (more above)", window.more_above));
        lines.extend(state.visible().iter().map(styled));
        lines.push(indicator("... (more below)", window.more_below));

        f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
    }
}
