//! Events page controller.
//!
//! Owns the date filter and the displayed events and decides when to fetch.
//! Three triggers feed it: the initial load, a change of the date range and
//! "load more". Date picker input only mutates the range; the filter rule is
//! evaluated by [`PageController::settle`], which the event loop calls once
//! after handling input so both bounds can change before a fetch goes out.

use crate::api_client::{ApiClientError, EventsQuery, EventsSource};
use crate::config::{DateFormat, TuiConfig};
use crate::request::{EventsRequest, FetchTicket, RequestAction};
use agenda_core::{DateField, DateRange, Event, EventsResponse, FetchStatus, Pagination};
use chrono::NaiveDate;

/// Outcome of the filter rule for one date range value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// Both bounds cleared: fetch without a date filter.
    Unfiltered,
    /// Both bounds set: fetch scoped to the range.
    Filtered { start: NaiveDate, end: NaiveDate },
    /// Only one bound set: wait for the other one.
    Await,
}

pub fn filter_rule(range: &DateRange) -> FilterDecision {
    match (range.start_date, range.end_date) {
        (None, None) => FilterDecision::Unfiltered,
        (Some(start), Some(end)) => FilterDecision::Filtered { start, end },
        _ => FilterDecision::Await,
    }
}

/// What a single fetch should ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchParams {
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub offset: Option<u32>,
    pub append: bool,
}

impl FetchParams {
    pub fn unfiltered() -> Self {
        Self {
            range: None,
            offset: None,
            append: false,
        }
    }

    pub fn filtered(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            range: Some((start, end)),
            offset: None,
            append: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageController {
    request: EventsRequest,
    dates: DateRange,
    /// Range value the filter rule last ran on. `None` until mounted.
    settled: Option<DateRange>,
    /// Range of the most recently issued replacing fetch.
    issued_filter: Option<(NaiveDate, NaiveDate)>,
    /// Range the displayed list was fetched with. Only moves when a
    /// replacing fetch succeeds.
    displayed_filter: Option<(NaiveDate, NaiveDate)>,
    limit: u32,
    date_format: DateFormat,
}

impl PageController {
    pub fn new(limit: u32, date_format: DateFormat) -> Self {
        Self {
            request: EventsRequest::new(),
            dates: DateRange::default(),
            settled: None,
            issued_filter: None,
            displayed_filter: None,
            limit,
            date_format,
        }
    }

    pub fn from_config(config: &TuiConfig) -> Self {
        Self::new(config.page_limit, config.date_format)
    }

    pub fn dates(&self) -> DateRange {
        self.dates
    }

    pub fn displayed_filter(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.displayed_filter
    }

    pub fn response(&self) -> Option<&EventsResponse> {
        self.request.response()
    }

    pub fn items(&self) -> &[Event] {
        self.request
            .response()
            .map(|r| r.items.as_slice())
            .unwrap_or_default()
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.request.response().map(|r| r.pagination)
    }

    pub fn status(&self) -> FetchStatus {
        self.request.status()
    }

    pub fn error(&self) -> Option<&str> {
        self.request.error()
    }

    pub fn loading(&self) -> bool {
        self.request.is_waiting()
    }

    /// Picker selection for one bound. The other bound is kept.
    pub fn on_date_select(&mut self, field: DateField, selection: Option<NaiveDate>) {
        self.dates = self.dates.with(field, selection);
    }

    pub fn on_date_reset(&mut self) {
        self.dates = DateRange::default();
    }

    /// Run the filter rule if the date range changed since it last ran.
    ///
    /// The first call after construction always runs and yields the initial
    /// unfiltered load.
    pub fn settle(&mut self) -> Option<FetchParams> {
        if self.settled == Some(self.dates) {
            return None;
        }
        self.settled = Some(self.dates);
        match filter_rule(&self.dates) {
            FilterDecision::Unfiltered => Some(FetchParams::unfiltered()),
            FilterDecision::Filtered { start, end } => Some(FetchParams::filtered(start, end)),
            FilterDecision::Await => None,
        }
    }

    /// Parameters for the next page of the displayed list, or `None` when
    /// there is no first page yet or the cursor is exhausted.
    ///
    /// Also `None` while any fetch is in flight: a page request issued then
    /// would supersede a pending filter fetch and drop its result, and a
    /// second trigger would request the same offset twice.
    pub fn on_load_more(&self) -> Option<FetchParams> {
        if self.request.is_waiting() {
            return None;
        }
        let next = self.pagination()?.next_offset()?;
        Some(FetchParams {
            range: self.displayed_filter,
            offset: Some(next),
            append: true,
        })
    }

    /// Re-issue the last requested filter from the first page, including one
    /// whose fetch failed.
    pub fn refresh(&self) -> FetchParams {
        FetchParams {
            range: self.issued_filter,
            offset: None,
            append: false,
        }
    }

    pub fn query_for(&self, params: &FetchParams) -> EventsQuery {
        let (starts_at, ends_at) = match params.range {
            Some((start, end)) => (
                Some(self.date_format.format(start)),
                Some(self.date_format.format(end)),
            ),
            None => (None, None),
        };
        EventsQuery {
            offset: params.offset,
            starts_at,
            ends_at,
            ..EventsQuery::first_page(self.limit)
        }
    }

    /// Register a fetch as issued and build its query.
    pub fn begin_fetch(&mut self, params: FetchParams) -> (FetchTicket, EventsQuery) {
        if !params.append {
            self.issued_filter = params.range;
        }
        let query = self.query_for(&params);
        let ticket = self.request.begin(params.append);
        tracing::debug!(
            generation = ticket.generation(),
            append = params.append,
            offset = ?params.offset,
            starts_at = ?query.starts_at,
            ends_at = ?query.ends_at,
            "Fetching events"
        );
        (ticket, query)
    }

    /// Apply a finished fetch. Append pages are merged onto the displayed
    /// items; failures are logged and leave the displayed list untouched.
    ///
    /// Returns whether the displayed list changed (`false` for a superseded
    /// fetch).
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<EventsResponse, ApiClientError>,
    ) -> Result<bool, ApiClientError> {
        match self.request.complete(ticket, result) {
            Ok(Some(page)) if ticket.append() => {
                let merged = match self.request.response() {
                    Some(current) => current.merge_page(page),
                    None => page,
                };
                self.request.dispatch(RequestAction::Update { response: merged });
                Ok(true)
            }
            Ok(Some(_)) => {
                // Superseded tickets never get here, so the issued range is
                // the one this page was fetched with.
                self.displayed_filter = self.issued_filter;
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    generation = ticket.generation(),
                    append = ticket.append(),
                    "Events fetch failed"
                );
                Err(err)
            }
        }
    }

    /// Issue and await one fetch.
    pub async fn fetch_events<S>(
        &mut self,
        source: &S,
        params: FetchParams,
    ) -> Result<(), ApiClientError>
    where
        S: EventsSource + ?Sized,
    {
        let (ticket, query) = self.begin_fetch(params);
        let result = source.list_events(&query).await;
        self.complete_fetch(ticket, result).map(|_| ())
    }
}
