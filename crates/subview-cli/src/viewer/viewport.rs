/// Scroll distance of one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Line,
    Page,
    /// To the first or last line
    All,
}

/// Visible slice of the activity stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
    pub more_above: bool,
    pub more_below: bool,
}

/// Scroll state of the activity panel.
///
/// `scroll_offset` stays within `[0, max_offset()]` after every mutation.
/// While `auto_scroll` is on, growth of the stream keeps the newest line
/// pinned to the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    scroll_offset: usize,
    auto_scroll: bool,
    total_lines: usize,
    visible_lines: usize,
    page_size: usize,
    /// Agent whose stream is shown; liveness refreshes of the same agent
    /// must not move the viewport.
    agent_id: Option<String>,
}

impl Viewport {
    pub fn new(page_size: usize) -> Self {
        Self {
            scroll_offset: 0,
            auto_scroll: false,
            total_lines: 0,
            visible_lines: 0,
            page_size: page_size.max(1),
            agent_id: None,
        }
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn visible_lines(&self) -> usize {
        self.visible_lines
    }

    pub fn agent_id(&self) -> Option<&str> {
        self.agent_id.as_deref()
    }

    pub fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_lines)
    }

    fn clamp(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_offset());
    }

    fn follow_or_clamp(&mut self) {
        if self.auto_scroll {
            self.scroll_offset = self.max_offset();
        } else {
            self.clamp();
        }
    }

    /// Line count changed (append, reformat, truncation).
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.follow_or_clamp();
    }

    /// Panel height changed.
    pub fn set_visible_lines(&mut self, visible: usize) {
        self.visible_lines = visible;
        self.follow_or_clamp();
    }

    fn step_size(&self, step: Step) -> usize {
        match step {
            Step::Line => 1,
            Step::Page => self.page_size,
            Step::All => usize::MAX,
        }
    }

    pub fn scroll_up(&mut self, step: Step) {
        self.scroll_offset = self.scroll_offset.saturating_sub(self.step_size(step));
        self.clamp();
        if self.scroll_offset < self.max_offset() {
            self.auto_scroll = false;
        }
    }

    pub fn scroll_down(&mut self, step: Step) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add(self.step_size(step))
            .min(self.max_offset());
        if self.scroll_offset >= self.max_offset() {
            self.auto_scroll = true;
        }
    }

    pub fn toggle_auto_scroll(&mut self) {
        self.auto_scroll = !self.auto_scroll;
        if self.auto_scroll {
            self.scroll_offset = self.max_offset();
        }
    }

    /// A stream was loaded for `agent_id` with `total` lines.
    ///
    /// A different agent resets the viewport: live agents start pinned to
    /// the bottom, completed ones at the top. The same agent keeps its
    /// position and auto-scroll flag.
    pub fn select_stream(&mut self, agent_id: &str, is_live: bool, total: usize) {
        self.total_lines = total;

        if self.agent_id.as_deref() == Some(agent_id) {
            self.follow_or_clamp();
            return;
        }

        self.agent_id = Some(agent_id.to_string());
        if is_live {
            self.auto_scroll = true;
            self.scroll_offset = self.max_offset();
        } else {
            self.auto_scroll = false;
            self.scroll_offset = 0;
        }
    }

    /// No stream is shown any more.
    pub fn clear_stream(&mut self) {
        self.agent_id = None;
        self.total_lines = 0;
        self.scroll_offset = 0;
        self.auto_scroll = false;
    }

    pub fn window(&self) -> Window {
        let start = self.scroll_offset;
        let end = (start + self.visible_lines).min(self.total_lines);
        Window {
            start,
            end,
            more_above: start > 0,
            more_below: start + self.visible_lines < self.total_lines,
        }
    }

    /// Position of the viewport in the stream, 100 when everything fits.
    pub fn scroll_percent(&self) -> u16 {
        let max = self.max_offset();
        if max == 0 {
            return 100;
        }
        ((self.scroll_offset * 100) / max) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pinned(total: usize, visible: usize) -> Viewport {
        let mut vp = Viewport::new(10);
        vp.set_visible_lines(visible);
        vp.select_stream("live", true, total);
        vp
    }

    #[test]
    fn test_auto_scroll_keeps_bottom_pinned() {
        let mut vp = pinned(100, 20);
        assert_eq!(vp.scroll_offset(), 80);
        assert!(vp.auto_scroll());

        vp.set_total_lines(110);
        assert_eq!(vp.scroll_offset(), 90);
        assert_eq!(vp.scroll_offset() + vp.visible_lines(), vp.total_lines());
    }

    #[test]
    fn test_growth_without_auto_scroll_leaves_offset() {
        let mut vp = pinned(100, 20);
        vp.scroll_up(Step::Page);
        assert_eq!(vp.scroll_offset(), 70);
        assert!(!vp.auto_scroll());

        vp.set_total_lines(150);
        assert_eq!(vp.scroll_offset(), 70);
    }

    #[test]
    fn test_scroll_up_disengages_and_down_reengages() {
        let mut vp = pinned(120, 20);
        assert_eq!(vp.scroll_offset(), 100);

        vp.scroll_up(Step::Line);
        assert_eq!(vp.scroll_offset(), 99);
        assert!(!vp.auto_scroll());

        vp.scroll_down(Step::Line);
        assert_eq!(vp.scroll_offset(), 100);
        assert!(vp.auto_scroll());
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut vp = pinned(30, 20);
        vp.scroll_up(Step::Page);
        vp.scroll_up(Step::Page);
        assert_eq!(vp.scroll_offset(), 0);

        vp.scroll_down(Step::All);
        assert_eq!(vp.scroll_offset(), 10);
        vp.scroll_down(Step::Page);
        assert_eq!(vp.scroll_offset(), 10);
    }

    #[test]
    fn test_scroll_up_at_top_of_short_stream_keeps_auto_scroll() {
        // Everything fits: offset 0 is also the bottom
        let mut vp = pinned(5, 20);
        vp.scroll_up(Step::Line);
        assert_eq!(vp.scroll_offset(), 0);
        assert!(vp.auto_scroll());
    }

    #[test]
    fn test_toggle_on_jumps_to_bottom_and_off_stays() {
        let mut vp = Viewport::new(10);
        vp.set_visible_lines(20);
        vp.select_stream("done", false, 100);
        assert_eq!(vp.scroll_offset(), 0);

        vp.scroll_down(Step::Page);
        vp.toggle_auto_scroll();
        assert!(vp.auto_scroll());
        assert_eq!(vp.scroll_offset(), 80);

        vp.scroll_up(Step::Line);
        vp.toggle_auto_scroll();
        assert!(vp.auto_scroll());
        vp.toggle_auto_scroll();
        assert!(!vp.auto_scroll());
        assert_eq!(vp.scroll_offset(), 80);
    }

    #[test]
    fn test_same_agent_refresh_preserves_position() {
        let mut vp = Viewport::new(10);
        vp.set_visible_lines(20);
        vp.select_stream("x", true, 100);
        vp.scroll_up(Step::All);
        vp.scroll_down(Step::Line);
        vp.scroll_down(Step::Line);
        vp.scroll_down(Step::Line);
        vp.scroll_down(Step::Line);
        vp.scroll_down(Step::Line);
        assert_eq!(vp.scroll_offset(), 5);

        vp.select_stream("x", false, 100);
        assert_eq!(vp.scroll_offset(), 5);
        assert!(!vp.auto_scroll());

        vp.select_stream("y", false, 40);
        assert_eq!(vp.scroll_offset(), 0);
        assert!(!vp.auto_scroll());
    }

    #[test]
    fn test_switch_to_live_agent_starts_at_bottom() {
        let mut vp = Viewport::new(10);
        vp.set_visible_lines(10);
        vp.select_stream("done", false, 50);
        vp.select_stream("live", true, 35);
        assert_eq!(vp.scroll_offset(), 25);
        assert!(vp.auto_scroll());
    }

    #[test]
    fn test_resize_reclamps() {
        let mut vp = Viewport::new(10);
        vp.set_visible_lines(10);
        vp.select_stream("done", false, 50);
        vp.scroll_down(Step::All);
        assert_eq!(vp.scroll_offset(), 40);
        vp.scroll_up(Step::Line);
        assert!(!vp.auto_scroll());

        vp.set_visible_lines(30);
        assert_eq!(vp.scroll_offset(), 20);

        vp.set_visible_lines(60);
        assert_eq!(vp.scroll_offset(), 0);
    }

    #[test]
    fn test_window_indicators() {
        let mut vp = Viewport::new(10);
        vp.set_visible_lines(10);
        vp.select_stream("done", false, 25);

        let top = vp.window();
        assert_eq!((top.start, top.end), (0, 10));
        assert!(!top.more_above && top.more_below);

        vp.scroll_down(Step::Line);
        let middle = vp.window();
        assert!(middle.more_above && middle.more_below);

        vp.scroll_down(Step::All);
        let bottom = vp.window();
        assert_eq!((bottom.start, bottom.end), (15, 25));
        assert!(bottom.more_above && !bottom.more_below);
    }

    #[test]
    fn test_scroll_percent() {
        let mut vp = Viewport::new(10);
        vp.set_visible_lines(10);
        vp.select_stream("done", false, 30);
        assert_eq!(vp.scroll_percent(), 0);
        vp.scroll_down(Step::Page);
        assert_eq!(vp.scroll_percent(), 50);
        vp.set_total_lines(5);
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_clear_stream_forgets_agent() {
        let mut vp = pinned(50, 10);
        vp.clear_stream();
        assert_eq!(vp.agent_id(), None);
        assert_eq!(vp.scroll_offset(), 0);

        // Reselecting the same id after a clear counts as a new agent
        vp.select_stream("live", false, 50);
        assert_eq!(vp.scroll_offset(), 0);
    }
}
