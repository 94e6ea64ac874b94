//! Reusable widget components.

pub mod date_filter;
pub mod event_detail;
pub mod status;
pub mod time_slot;

pub use date_filter::{DateFieldView, DateFilterBar};
pub use event_detail::EventDetail;
pub use status::StatusIndicator;
pub use time_slot::time_slot;
