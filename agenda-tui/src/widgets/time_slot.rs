//! Compact start/end rendering for an event.

use agenda_core::Event;

/// `Fri 05 Jan 2024 18:00-20:00` for same-day events, both full dates
/// otherwise, and just the start when the event has no end.
pub fn time_slot(event: &Event) -> String {
    let start = event.starts_at.format("%a %d %b %Y %H:%M").to_string();
    match event.ends_at {
        Some(end) if end.date_naive() == event.starts_at.date_naive() => {
            format!("{}-{}", start, end.format("%H:%M"))
        }
        Some(end) => format!("{} - {}", start, end.format("%a %d %b %Y %H:%M")),
        None => start,
    }
}
