//! Shared helpers for agenda-tui integration tests.

#![allow(dead_code)]

use agenda_core::EventsResponse;
use agenda_tui::api_client::{ApiClientError, EventsQuery, EventsSource};
use agenda_tui::config::{DateFormat, ThemeConfig, TuiConfig};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Serves scripted results in order and records every query it receives.
#[derive(Default)]
pub struct ScriptedSource {
    results: Mutex<VecDeque<Result<EventsResponse, ApiClientError>>>,
    queries: Mutex<Vec<EventsQuery>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, page: EventsResponse) -> &Self {
        self.results.lock().unwrap().push_back(Ok(page));
        self
    }

    pub fn push_error(&self, status: u16) -> &Self {
        self.results
            .lock()
            .unwrap()
            .push_back(Err(ApiClientError::Status {
                status,
                message: "scripted failure".to_string(),
            }));
        self
    }

    pub fn queries(&self) -> Vec<EventsQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventsSource for ScriptedSource {
    async fn list_events(&self, query: &EventsQuery) -> Result<EventsResponse, ApiClientError> {
        self.queries.lock().unwrap().push(query.clone());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiClientError::InvalidResponse("no scripted page".into())))
    }
}

pub fn base_config() -> TuiConfig {
    TuiConfig {
        api_base_url: "http://localhost:4000".to_string(),
        events_path: "/events".to_string(),
        request_timeout_ms: 5_000,
        tick_rate_ms: 250,
        page_limit: 10,
        load_more_threshold: 2,
        date_format: DateFormat::Datetime,
        log_path: "tmp/agenda.log".into(),
        theme: ThemeConfig {
            name: "synthbrute".to_string(),
        },
    }
}
