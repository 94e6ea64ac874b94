//! Agenda Core - Entity Types
//!
//! Pure data structures shared by the client crates: events as served by the
//! listing API, the offset/limit/count pagination cursor, the date range
//! filter and the fetch status enum.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Identifier of a listed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new UUIDv7 id (timestamp-sortable).
    pub fn now_v7() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// EVENTS
// ============================================================================

/// Person or group hosting an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organizer {
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Organizer {
    /// Up to two uppercase initials taken from the organizer name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// A single listed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub starts_at: Timestamp,
    #[serde(default)]
    pub ends_at: Option<Timestamp>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub organizer: Option<Organizer>,
}

// ============================================================================
// PAGINATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("pagination limit must be > 0")]
    ZeroLimit,
}

/// Offset/limit/count cursor describing a page within the full result set.
///
/// `count` is the total number of matching items on the server, not the
/// number of items in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: u32,
    pub limit: u32,
    pub count: u32,
}

impl Pagination {
    pub fn new(offset: u32, limit: u32, count: u32) -> Self {
        Self {
            offset,
            limit,
            count,
        }
    }

    pub fn validate(&self) -> Result<(), PaginationError> {
        if self.limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        Ok(())
    }

    /// Offset of the following page, or `None` once the cursor is exhausted
    /// (`offset + limit >= count`).
    pub fn next_offset(&self) -> Option<u32> {
        let next = self.offset.saturating_add(self.limit);
        (next < self.count).then_some(next)
    }

    pub fn has_more(&self) -> bool {
        self.next_offset().is_some()
    }
}

/// One page of events as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsResponse {
    pub items: Vec<Event>,
    pub pagination: Pagination,
}

impl EventsResponse {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a subsequently fetched page.
    ///
    /// Items keep request order; the cursor becomes the one of `page`.
    pub fn merge_page(&self, page: EventsResponse) -> EventsResponse {
        let mut items = Vec::with_capacity(self.items.len() + page.items.len());
        items.extend(self.items.iter().cloned());
        items.extend(page.items);
        EventsResponse {
            items,
            pagination: page.pagination,
        }
    }
}

// ============================================================================
// DATE FILTER
// ============================================================================

/// Which bound of a [`DateRange`] a picker selection refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateField {
    StartDate,
    EndDate,
}

impl DateField {
    pub fn label(&self) -> &'static str {
        match self {
            DateField::StartDate => "Start",
            DateField::EndDate => "End",
        }
    }
}

/// Date filter selected by the user. Either bound may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn get(&self, field: DateField) -> Option<NaiveDate> {
        match field {
            DateField::StartDate => self.start_date,
            DateField::EndDate => self.end_date,
        }
    }

    /// Copy of this range with only `field` replaced.
    pub fn with(self, field: DateField, value: Option<NaiveDate>) -> Self {
        match field {
            DateField::StartDate => Self {
                start_date: value,
                ..self
            },
            DateField::EndDate => Self {
                end_date: value,
                ..self
            },
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    /// Both bounds, when both are set.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start_date.zip(self.end_date)
    }
}

// ============================================================================
// FETCH STATUS
// ============================================================================

/// Lifecycle of the most recent listing request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FetchStatus {
    #[default]
    Idle,
    Waiting,
    Success,
    Error,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FetchStatus::Idle => "IDLE",
            FetchStatus::Waiting => "WAITING",
            FetchStatus::Success => "SUCCESS",
            FetchStatus::Error => "ERROR",
        };
        f.write_str(label)
    }
}
