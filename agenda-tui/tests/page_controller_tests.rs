//! Fetch / filter / paginate behaviour of the events page controller.

mod common;

use agenda_core::{DateField, FetchStatus, Pagination};
use agenda_test_utils::fixtures::{date, january_2024, page};
use agenda_test_utils::generators::{arb_date, arb_date_field, arb_date_range, arb_page};
use agenda_tui::api_client::ApiClientError;
use agenda_tui::config::DateFormat;
use agenda_tui::controller::{FetchParams, PageController};
use common::ScriptedSource;
use proptest::prelude::*;

fn controller() -> PageController {
    PageController::new(10, DateFormat::Datetime)
}

/// Mount and load the initial page from `source`.
async fn mounted(source: &ScriptedSource) -> PageController {
    let mut controller = controller();
    let params = controller.settle().expect("mount issues initial load");
    controller.fetch_events(source, params).await.unwrap();
    controller
}

#[tokio::test]
async fn scenario_initial_load() {
    let source = ScriptedSource::new();
    source.push_page(page(0, 10, 25, 10));

    let controller = mounted(&source).await;

    let queries = source.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].limit, 10);
    assert_eq!(queries[0].offset, None);
    assert_eq!(queries[0].starts_at, None);
    assert_eq!(queries[0].ends_at, None);
    assert_eq!(controller.items().len(), 10);
    assert_eq!(controller.status(), FetchStatus::Success);
}

#[tokio::test]
async fn scenario_partial_then_complete_range() {
    let source = ScriptedSource::new();
    source.push_page(page(0, 10, 25, 10));
    source.push_page(page(0, 10, 3, 3));
    let mut controller = mounted(&source).await;

    controller.on_date_select(DateField::StartDate, Some(date(2024, 1, 1)));
    assert_eq!(controller.settle(), None, "one bound never fetches");
    assert_eq!(source.queries().len(), 1);
    assert_eq!(controller.items().len(), 10);

    controller.on_date_select(DateField::EndDate, Some(date(2024, 1, 31)));
    let params = controller.settle().expect("both bounds fetch");
    assert!(!params.append);
    controller.fetch_events(&source, params).await.unwrap();

    let queries = source.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(
        queries[1].starts_at.as_deref(),
        Some("2024-01-01T00:00:00.000Z")
    );
    assert_eq!(queries[1].ends_at.as_deref(), Some("2024-01-31T00:00:00.000Z"));
    assert_eq!(controller.items().len(), 3, "filtered page replaces the list");
    assert_eq!(controller.pagination(), Some(Pagination::new(0, 10, 3)));
}

#[tokio::test]
async fn scenario_reset_fetches_unfiltered() {
    let source = ScriptedSource::new();
    source.push_page(page(0, 10, 25, 10));
    source.push_page(page(0, 10, 3, 3));
    source.push_page(page(0, 10, 25, 10));
    let mut controller = mounted(&source).await;

    controller.on_date_select(DateField::StartDate, Some(date(2024, 1, 1)));
    controller.on_date_select(DateField::EndDate, Some(date(2024, 1, 31)));
    let params = controller.settle().unwrap();
    controller.fetch_events(&source, params).await.unwrap();

    controller.on_date_reset();
    let params = controller.settle().expect("reset refetches");
    assert_eq!(params, FetchParams::unfiltered());
    controller.fetch_events(&source, params).await.unwrap();

    let last = source.queries().pop().unwrap();
    assert_eq!(last.starts_at, None);
    assert_eq!(last.ends_at, None);
    assert_eq!(last.offset, None);
    assert_eq!(controller.items().len(), 10);
    assert_eq!(controller.displayed_filter(), None);
}

#[tokio::test]
async fn scenario_load_more_appends_second_page() {
    let source = ScriptedSource::new();
    source.push_page(page(0, 10, 25, 10));
    source.push_page(page(10, 10, 25, 10));
    let mut controller = mounted(&source).await;

    let params = controller.on_load_more().expect("second page exists");
    assert_eq!(params.offset, Some(10));
    assert!(params.append);
    controller.fetch_events(&source, params).await.unwrap();

    assert_eq!(source.queries()[1].offset, Some(10));
    assert_eq!(controller.items().len(), 20);
    assert_eq!(controller.pagination(), Some(Pagination::new(10, 10, 25)));
}

#[tokio::test]
async fn scenario_exhausted_cursor_does_not_fetch() {
    let source = ScriptedSource::new();
    source.push_page(page(20, 10, 25, 5));
    let controller = mounted(&source).await;

    assert_eq!(controller.pagination(), Some(Pagination::new(20, 10, 25)));
    assert_eq!(controller.on_load_more(), None);
    assert_eq!(source.queries().len(), 1);
    assert_eq!(controller.items().len(), 5);
}

#[tokio::test]
async fn failed_fetch_keeps_displayed_list() {
    let source = ScriptedSource::new();
    source.push_page(page(0, 10, 25, 10));
    source.push_error(503);
    let mut controller = mounted(&source).await;

    let params = controller.on_load_more().unwrap();
    let result = controller.fetch_events(&source, params).await;

    assert!(matches!(
        result,
        Err(ApiClientError::Status { status: 503, .. })
    ));
    assert_eq!(controller.items().len(), 10);
    assert_eq!(controller.pagination(), Some(Pagination::new(0, 10, 25)));
    assert_eq!(controller.status(), FetchStatus::Error);

    // No retry on its own; the next load-more starts from the same cursor.
    assert_eq!(controller.on_load_more().and_then(|p| p.offset), Some(10));
}

#[tokio::test]
async fn failed_filter_fetch_keeps_paging_the_displayed_list() {
    let source = ScriptedSource::new();
    source.push_page(page(0, 10, 25, 10));
    source.push_error(500);
    source.push_page(page(10, 10, 25, 10));
    let mut controller = mounted(&source).await;

    controller.on_date_select(DateField::StartDate, Some(date(2024, 1, 1)));
    controller.on_date_select(DateField::EndDate, Some(date(2024, 1, 31)));
    let params = controller.settle().expect("filter fetch");
    assert!(controller.fetch_events(&source, params).await.is_err());
    assert_eq!(controller.items().len(), 10);
    assert_eq!(controller.displayed_filter(), None);

    // The next page continues the unfiltered list on screen.
    let more = controller.on_load_more().expect("second page exists");
    assert_eq!(more.range, None);
    assert_eq!(more.offset, Some(10));
    controller.fetch_events(&source, more).await.unwrap();

    let query = source.queries().pop().unwrap();
    assert_eq!(query.starts_at, None);
    assert_eq!(query.ends_at, None);
    assert_eq!(controller.items().len(), 20);
}

#[tokio::test]
async fn refresh_retries_failed_filter_fetch() {
    let source = ScriptedSource::new();
    source.push_page(page(0, 10, 25, 10));
    source.push_error(500);
    source.push_page(page(0, 10, 3, 3));
    let mut controller = mounted(&source).await;

    let january = january_2024().bounds().expect("both bounds set");
    controller.on_date_select(DateField::StartDate, Some(january.0));
    controller.on_date_select(DateField::EndDate, Some(january.1));
    let params = controller.settle().expect("filter fetch");
    assert!(controller.fetch_events(&source, params).await.is_err());

    let retry = controller.refresh();
    assert_eq!(retry, FetchParams::filtered(january.0, january.1));
    controller.fetch_events(&source, retry).await.unwrap();

    let query = source.queries().pop().unwrap();
    assert_eq!(query.starts_at.as_deref(), Some("2024-01-01T00:00:00.000Z"));
    assert_eq!(query.offset, None);
    assert_eq!(controller.items().len(), 3);
    assert_eq!(controller.displayed_filter(), Some(january));
    assert_eq!(controller.on_load_more(), None);
}

#[tokio::test]
async fn non_append_fetch_discards_accumulated_pages() {
    let source = ScriptedSource::new();
    source.push_page(page(0, 10, 25, 10));
    source.push_page(page(10, 10, 25, 10));
    source.push_page(page(0, 10, 4, 4));
    let mut controller = mounted(&source).await;

    let more = controller.on_load_more().unwrap();
    controller.fetch_events(&source, more).await.unwrap();
    assert_eq!(controller.items().len(), 20);

    controller.on_date_select(DateField::StartDate, Some(date(2024, 3, 1)));
    controller.on_date_select(DateField::EndDate, Some(date(2024, 3, 2)));
    let params = controller.settle().unwrap();
    controller.fetch_events(&source, params).await.unwrap();

    assert_eq!(controller.items().len(), 4);
    assert_eq!(controller.pagination(), Some(Pagination::new(0, 10, 4)));
}

#[test]
fn filter_response_arriving_after_newer_filter_is_dropped() {
    let mut controller = controller();
    controller.settle();

    controller.on_date_select(DateField::StartDate, Some(date(2024, 1, 1)));
    controller.on_date_select(DateField::EndDate, Some(date(2024, 1, 31)));
    let params = controller.settle().unwrap();
    let (january, _) = controller.begin_fetch(params);

    controller.on_date_select(DateField::EndDate, Some(date(2024, 2, 29)));
    let params = controller.settle().unwrap();
    let (february, _) = controller.begin_fetch(params);

    assert!(controller.complete_fetch(february, Ok(page(0, 10, 7, 7))).unwrap());
    assert!(!controller.complete_fetch(january, Ok(page(0, 10, 2, 2))).unwrap());
    assert_eq!(controller.items().len(), 7);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A filter fetch goes out exactly when the range changed and both
    /// bounds are set or both are cleared.
    #[test]
    fn prop_filter_fetch_only_for_complete_or_cleared_range(
        steps in prop::collection::vec(
            prop_oneof![
                (arb_date_field(), proptest::option::of(arb_date()))
                    .prop_map(Some),
                Just(None),
            ],
            1..20,
        ),
    ) {
        let mut controller = controller();
        controller.settle();
        let mut previous = controller.dates();

        for step in steps {
            match step {
                Some((field, value)) => controller.on_date_select(field, value),
                None => controller.on_date_reset(),
            }
            let range = controller.dates();
            let fetch = controller.settle();
            let complete_or_cleared = range.bounds().is_some() || range.is_cleared();
            prop_assert_eq!(fetch.is_some(), range != previous && complete_or_cleared);
            if let Some(params) = fetch {
                prop_assert!(!params.append);
                prop_assert_eq!(params.range, range.bounds());
            }
            previous = range;
        }
    }

    /// Picking one bound never disturbs the other.
    #[test]
    fn prop_date_select_preserves_other_bound(
        initial in arb_date_range(),
        field in arb_date_field(),
        value in proptest::option::of(arb_date()),
    ) {
        let mut controller = controller();
        controller.on_date_select(DateField::StartDate, initial.start_date);
        controller.on_date_select(DateField::EndDate, initial.end_date);
        controller.on_date_select(field, value);

        let other = match field {
            DateField::StartDate => DateField::EndDate,
            DateField::EndDate => DateField::StartDate,
        };
        prop_assert_eq!(controller.dates().get(field), value);
        prop_assert_eq!(controller.dates().get(other), initial.get(other));
    }

    /// After N append fetches the list is the first page followed by every
    /// appended page in request order.
    #[test]
    fn prop_merge_law(
        first in arb_page(0, 5, 1_000),
        rest in prop::collection::vec(arb_page(0, 5, 1_000), 0..6),
    ) {
        let mut controller = PageController::new(5, DateFormat::Date);
        let params = controller.settle().unwrap();
        let (ticket, _) = controller.begin_fetch(params);
        controller.complete_fetch(ticket, Ok(first.clone())).unwrap();

        let mut expected = first.items.clone();
        for (index, mut next_page) in rest.into_iter().enumerate() {
            let params = controller.on_load_more().unwrap();
            let offset = params.offset.unwrap();
            prop_assert_eq!(offset, 5 * (index as u32 + 1));
            next_page.pagination = Pagination::new(offset, 5, 1_000);
            expected.extend(next_page.items.iter().cloned());

            let (ticket, _) = controller.begin_fetch(params);
            controller.complete_fetch(ticket, Ok(next_page)).unwrap();
        }
        prop_assert_eq!(controller.items(), expected.as_slice());
    }

    /// Exhausted cursors make load-more a no-op that leaves state alone.
    #[test]
    fn prop_load_more_idempotent_when_exhausted(
        offset in 0u32..100,
        limit in 1u32..20,
        slack in 0u32..20,
        len in 0u32..5,
    ) {
        let count = (offset + limit).saturating_sub(slack);
        let mut controller = controller();
        let params = controller.settle().unwrap();
        let (ticket, _) = controller.begin_fetch(params);
        controller.complete_fetch(ticket, Ok(page(offset, limit, count, len))).unwrap();

        let before = controller.response().cloned();
        prop_assert_eq!(controller.on_load_more(), None);
        prop_assert_eq!(controller.on_load_more(), None);
        prop_assert_eq!(controller.response().cloned(), before);
    }
}
