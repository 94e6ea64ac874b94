//! Detail panel for the selected event.

use super::time_slot::time_slot;
use agenda_core::Event;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct EventDetail<'a> {
    pub event: &'a Event,
    pub label_style: Style,
    pub avatar_style: Style,
}

impl<'a> EventDetail<'a> {
    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("When", time_slot(self.event))];
        if let Some(location) = &self.event.location {
            fields.push(("Where", location.clone()));
        }
        if let Some(organizer) = &self.event.organizer {
            fields.push(("Host", organizer.name.clone()));
        }
        fields.push(("ID", self.event.id.to_string()));
        fields
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut lines = Vec::new();

        let mut heading = Vec::new();
        if let Some(organizer) = &self.event.organizer {
            heading.push(Span::styled(
                format!("[{}] ", organizer.initials()),
                self.avatar_style,
            ));
        }
        heading.push(Span::styled(
            self.event.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::from(heading));
        lines.push(Line::default());

        for (label, value) in self.fields() {
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", label), self.label_style),
                Span::raw(value),
            ]));
        }

        if let Some(description) = &self.event.description {
            lines.push(Line::default());
            lines.extend(description.lines().map(|l| Line::from(l.to_string())));
        }

        let widget = Paragraph::new(Text::from(lines))
            .block(Block::default().title("Details").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(widget, area);
    }
}
