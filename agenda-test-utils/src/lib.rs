//! Agenda Test Utilities
//!
//! Shared test infrastructure for the agenda workspace:
//! - Proptest generators for events, pages and date ranges
//! - Fixtures for the common pagination scenarios

pub use agenda_core::{
    DateField, DateRange, Event, EventId, EventsResponse, FetchStatus, Organizer, Pagination,
    Timestamp,
};

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating agenda types.

    use super::*;
    use proptest::prelude::*;

    /// Generate a random EventId.
    pub fn arb_event_id() -> impl Strategy<Value = EventId> {
        any::<[u8; 16]>().prop_map(|bytes| EventId::new(Uuid::from_bytes(bytes)))
    }

    /// Generate a Timestamp within 2020-2030.
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1577836800i64..1893456000i64).prop_map(|secs| {
            chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
        })
    }

    /// Generate a calendar date within 2020-2030.
    pub fn arb_date() -> impl Strategy<Value = NaiveDate> {
        arb_timestamp().prop_map(|ts| ts.date_naive())
    }

    pub fn arb_event() -> impl Strategy<Value = Event> {
        (
            arb_event_id(),
            "[A-Za-z ]{1,24}",
            arb_timestamp(),
            proptest::option::of(0i64..86_400),
        )
            .prop_map(|(id, title, starts_at, duration)| Event {
                id,
                title,
                description: None,
                starts_at,
                ends_at: duration.map(|secs| starts_at + chrono::Duration::seconds(secs)),
                location: None,
                organizer: None,
            })
    }

    /// Generate a page of 0..=limit events.
    pub fn arb_page(offset: u32, limit: u32, count: u32) -> impl Strategy<Value = EventsResponse> {
        prop::collection::vec(arb_event(), 0..=limit as usize).prop_map(move |items| {
            EventsResponse {
                items,
                pagination: Pagination::new(offset, limit, count),
            }
        })
    }

    /// Generate any combination of set/unset bounds.
    pub fn arb_date_range() -> impl Strategy<Value = DateRange> {
        (proptest::option::of(arb_date()), proptest::option::of(arb_date()))
            .prop_map(|(start, end)| DateRange::new(start, end))
    }

    pub fn arb_date_field() -> impl Strategy<Value = DateField> {
        prop_oneof![Just(DateField::StartDate), Just(DateField::EndDate)]
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built fixtures for common scenarios.

    use super::*;

    /// A deterministic event whose id is derived from `seq`.
    pub fn event(seq: u32) -> Event {
        let starts_at = Utc
            .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
            + chrono::Duration::days(i64::from(seq % 28));
        Event {
            id: EventId::new(Uuid::from_u128(u128::from(seq) + 1)),
            title: format!("Event {}", seq),
            description: Some(format!("Description for event {}", seq)),
            starts_at,
            ends_at: Some(starts_at + chrono::Duration::hours(2)),
            location: Some("Community Hall".to_string()),
            organizer: Some(Organizer {
                name: "Local Organizers".to_string(),
                avatar_url: None,
            }),
        }
    }

    /// Page starting at `offset` holding `len` sequential events.
    pub fn page(offset: u32, limit: u32, count: u32, len: u32) -> EventsResponse {
        EventsResponse {
            items: (offset..offset + len).map(event).collect(),
            pagination: Pagination::new(offset, limit, count),
        }
    }

    /// Calendar date shorthand for tests.
    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
    }

    /// 2024-01-01 .. 2024-01-31
    pub fn january_2024() -> DateRange {
        DateRange::new(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)))
    }
}
