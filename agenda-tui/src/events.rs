//! Event types for the TUI event loop.

use crate::api_client::ApiClientError;
use crate::request::FetchTicket;
use agenda_core::EventsResponse;
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum TuiEvent {
    Input(KeyEvent),
    Resize { width: u16, height: u16 },
    EventsLoaded {
        ticket: FetchTicket,
        result: Result<EventsResponse, ApiClientError>,
    },
}
