use ratatui::{Frame, layout::Rect};

use crate::viewer::ViewerState;

pub(crate) trait Component {
    fn render(&self, f: &mut Frame, area: Rect, state: &ViewerState);
}

pub(crate) mod activity;
pub(crate) mod header;
pub(crate) mod sidebar;
pub(crate) mod status_bar;

pub(crate) use activity::ActivityComponent;
pub(crate) use header::HeaderComponent;
pub(crate) use sidebar::SidebarComponent;
pub(crate) use status_bar::StatusBarComponent;

use ratatui::style::{Color, Style};

use crate::viewer::Focus;

/// Border style for a panel, highlighted when it owns the arrow keys.
pub(crate) fn panel_border(state: &ViewerState, panel: Focus) -> Style {
    if state.focus() == panel {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
