/// Visibility and scroll position of the cheat sheet popup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpPopupState {
    pub visible: bool,
    pub scroll: u16,
    max_scroll: u16,
}

impl HelpPopupState {
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        self.scroll = 0;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.scroll = 0;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Recompute the scroll limit after the content or viewport changed
    pub fn update_bounds(&mut self, content_height: usize, viewport_height: u16) {
        let max = content_height.saturating_sub(viewport_height as usize);
        self.max_scroll = max.min(u16::MAX as usize) as u16;
        self.scroll = self.scroll.min(self.max_scroll);
    }

    pub fn max_scroll(&self) -> u16 {
        self.max_scroll
    }
}
