//! Filter bar: result meta on the left, the two date fields on the right.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone)]
pub struct DateFieldView {
    pub label: &'static str,
    pub value: String,
    pub editing: bool,
}

pub struct DateFilterBar<'a> {
    pub meta: String,
    pub meta_style: Style,
    pub fields: &'a [DateFieldView],
    pub active_style: Style,
    pub inactive_style: Style,
}

impl<'a> DateFilterBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let meta = Paragraph::new(self.meta.clone())
            .style(self.meta_style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(meta, chunks[0]);

        let spans: Vec<Span> = self
            .fields
            .iter()
            .map(|field| {
                let style = if field.editing {
                    self.active_style
                } else {
                    self.inactive_style
                };
                let cursor = if field.editing { "_" } else { "" };
                Span::styled(format!(" {}: {}{} ", field.label, field.value, cursor), style)
            })
            .collect();

        let picker = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title("Dates [s]tart [e]nd [r]eset")
                .borders(Borders::ALL),
        );
        f.render_widget(picker, chunks[1]);
    }
}
