//! ratatui rendering of a [`ViewerState`].

mod components;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::viewer::ViewerState;
use components::{ActivityComponent, Component, HeaderComponent, SidebarComponent, StatusBarComponent};

const HEADER_HEIGHT: u16 = 4;
const STATUS_HEIGHT: u16 = 1;
const SIDEBAR_WIDTH: u16 = 34;
/// Borders of the activity block plus the two indicator rows
const ACTIVITY_CHROME: u16 = 4;

pub(crate) struct AppLayout {
    pub header: Rect,
    pub sidebar: Rect,
    pub activity: Rect,
    pub status: Rect,
}

pub(crate) fn layout(area: Rect) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(rows[1]);

    AppLayout {
        header: rows[0],
        sidebar: body[0],
        activity: body[1],
        status: rows[2],
    }
}

/// Number of stream lines the activity panel can show for a terminal of `area`.
pub fn activity_height(area: Rect) -> usize {
    layout(area).activity.height.saturating_sub(ACTIVITY_CHROME) as usize
}

pub fn draw(f: &mut Frame, state: &ViewerState) {
    let areas = layout(f.area());

    HeaderComponent.render(f, areas.header, state);
    SidebarComponent.render(f, areas.sidebar, state);
    ActivityComponent.render(f, areas.activity, state);
    StatusBarComponent.render(f, areas.status, state);
}
