use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

use super::{Component, panel_border};
use crate::viewer::{Focus, ViewerState};

pub(crate) struct SidebarComponent;

impl Component for SidebarComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &ViewerState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(panel_border(state, Focus::AgentList))
            .title(" Agents ");

        let agents = state.agents();
        if agents.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "No agents found",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block);
            f.render_widget(empty, area);
            return;
        }

        // Rows are grouped by liveness, but up/down walks the start-time order,
        // so the marker can jump between groups.
        let selected_id = state.selected_agent().map(|a| a.agent_id.as_str());
        let mut lines: Vec<Line> = Vec::new();
        let mut selected_row = 0;

        let groups = [
            (
                "Active agents",
                true,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            (
                "Completed agents",
                false,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            ),
        ];

        for (title, live, title_style) in groups {
            let members: Vec<_> = agents.iter().filter(|a| a.is_live == live).collect();
            if !lines.is_empty() {
                lines.push(Line::raw(""));
            }
            lines.push(Line::from(Span::styled(
                format!("{} ({})", title, members.len()),
                title_style,
            )));

            for agent in members {
                let is_selected = Some(agent.agent_id.as_str()) == selected_id;
                let label = format!(
                    "{} {} ({})",
                    if is_selected { ">" } else { " " },
                    agent.slug,
                    agent.short_id()
                );
                if is_selected {
                    selected_row = lines.len();
                    lines.push(Line::from(Span::styled(
                        label,
                        Style::default().fg(Color::Black).bg(Color::White),
                    )));
                } else {
                    lines.push(Line::raw(label));
                }
            }
        }

        // Keep the selected row inside the panel
        let inner_height = area.height.saturating_sub(2) as usize;
        let scroll = (selected_row + 1).saturating_sub(inner_height) as u16;

        let list = Paragraph::new(Text::from(lines))
            .block(block)
            .scroll((scroll, 0));
        f.render_widget(list, area);
    }
}
