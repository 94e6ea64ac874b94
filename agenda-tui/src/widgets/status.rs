//! Fetch status indicator.

use agenda_core::FetchStatus;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::Paragraph,
    Frame,
};

pub struct StatusIndicator {
    pub status: FetchStatus,
    pub style: Style,
}

impl StatusIndicator {
    pub fn text(&self) -> &'static str {
        match self.status {
            FetchStatus::Waiting => "Loading...",
            FetchStatus::Error => "Request failed",
            FetchStatus::Idle | FetchStatus::Success => "",
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let paragraph = Paragraph::new(self.text()).style(self.style);
        f.render_widget(paragraph, area);
    }
}
