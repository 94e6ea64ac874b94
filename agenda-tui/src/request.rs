//! Stateful request primitive for the events listing.
//!
//! [`EventsRequest`] holds the last displayed response together with the
//! status and error of the most recent fetch. A fetch is split into
//! [`EventsRequest::begin`] and [`EventsRequest::complete`] so the network
//! call can run on a spawned task while the state stays owned by the event
//! loop. Every `begin` bumps a generation counter; a completion carrying an
//! older generation is discarded, so the most recently issued request wins.

use crate::api_client::{ApiClientError, EventsQuery, EventsSource};
use agenda_core::{EventsResponse, FetchStatus};

/// Handle for one issued fetch, returned by `begin` and consumed by `complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    append: bool,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the page is meant to be appended rather than replace the list.
    pub fn append(&self) -> bool {
        self.append
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestAction {
    /// Force-set the displayed response.
    Update { response: EventsResponse },
}

#[derive(Debug, Clone, Default)]
pub struct EventsRequest {
    response: Option<EventsResponse>,
    status: FetchStatus,
    error: Option<String>,
    generation: u64,
}

impl EventsRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn response(&self) -> Option<&EventsResponse> {
        self.response.as_ref()
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_waiting(&self) -> bool {
        self.status == FetchStatus::Waiting
    }

    /// Mark a new fetch as in flight and supersede any earlier one.
    pub fn begin(&mut self, append: bool) -> FetchTicket {
        self.generation += 1;
        self.status = FetchStatus::Waiting;
        FetchTicket {
            generation: self.generation,
            append,
        }
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    ///
    /// Returns `Ok(None)` for a superseded ticket; nothing is touched in that
    /// case. A successful non-append page replaces the displayed response.
    /// Append pages are handed back untouched for the caller to merge via
    /// [`EventsRequest::dispatch`]. Failures leave the response as it was.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<EventsResponse, ApiClientError>,
    ) -> Result<Option<EventsResponse>, ApiClientError> {
        if ticket.generation != self.generation {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.generation,
                "Discarding superseded events response"
            );
            return Ok(None);
        }

        match result {
            Ok(page) => {
                self.status = FetchStatus::Success;
                self.error = None;
                if !ticket.append {
                    self.response = Some(page.clone());
                }
                Ok(Some(page))
            }
            Err(err) => {
                self.status = FetchStatus::Error;
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn dispatch(&mut self, action: RequestAction) {
        match action {
            RequestAction::Update { response } => {
                self.response = Some(response);
            }
        }
    }

    /// Issue `query` against `source` and apply the result in one step.
    pub async fn request<S>(
        &mut self,
        source: &S,
        query: &EventsQuery,
        append: bool,
    ) -> Result<Option<EventsResponse>, ApiClientError>
    where
        S: EventsSource + ?Sized,
    {
        let ticket = self.begin(append);
        let result = source.list_events(query).await;
        self.complete(ticket, result)
    }
}
