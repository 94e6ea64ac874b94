//! Date picker input model.
//!
//! One bound is edited at a time through a short text buffer. Committing
//! the buffer produces a selection for that bound; an empty buffer clears it.

use agenda_core::DateField;
use chrono::NaiveDate;

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
const MAX_INPUT_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutput {
    Select(DateField, Option<NaiveDate>),
    Invalid { field: DateField, input: String },
}

#[derive(Debug, Clone, Default)]
pub struct DatePicker {
    editing: Option<DateField>,
    buffer: String,
}

impl DatePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `field`, prefilled with its current value.
    pub fn open(&mut self, field: DateField, current: Option<NaiveDate>) {
        self.editing = Some(field);
        self.buffer = current
            .map(|date| date.format(DATE_INPUT_FORMAT).to_string())
            .unwrap_or_default();
    }

    pub fn editing(&self) -> Option<DateField> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn push_char(&mut self, c: char) {
        if self.editing.is_some()
            && (c.is_ascii_digit() || c == '-')
            && self.buffer.len() < MAX_INPUT_LEN
        {
            self.buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn cancel(&mut self) {
        self.editing = None;
        self.buffer.clear();
    }

    /// Finish editing. `None` when nothing was being edited.
    pub fn commit(&mut self) -> Option<PickerOutput> {
        let field = self.editing.take()?;
        let input = std::mem::take(&mut self.buffer);
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Some(PickerOutput::Select(field, None));
        }
        match NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT) {
            Ok(date) => Some(PickerOutput::Select(field, Some(date))),
            Err(_) => Some(PickerOutput::Invalid { field, input }),
        }
    }
}
