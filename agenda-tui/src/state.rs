//! Application state.

use crate::api_client::{ApiClientError, EventsSource};
use crate::config::TuiConfig;
use crate::controller::{FetchParams, PageController};
use crate::events::TuiEvent;
use crate::notifications::{Notification, NotificationAction, NotificationLevel};
use crate::picker::{DatePicker, PickerOutput};
use crate::request::FetchTicket;
use crate::theme::SynthBruteTheme;
use agenda_core::{DateField, Event, EventsResponse};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Message shown for any failed fetch.
pub const FETCH_FAILED_MESSAGE: &str = "Something went wrong";

/// How long a notification stays in the footer.
const NOTIFICATION_TTL_SECS: i64 = 8;

#[derive(Debug, Clone)]
pub struct Modal {
    pub title: String,
    pub message: String,
}

pub struct App {
    pub config: TuiConfig,
    pub theme: SynthBruteTheme,
    pub api: Arc<dyn EventsSource>,
    pub page: PageController,
    pub picker: DatePicker,
    /// Index into the displayed events.
    pub selected: Option<usize>,
    pub notifications: Vec<Notification>,
    pub modal: Option<Modal>,
}

impl App {
    pub fn new(config: TuiConfig, api: Arc<dyn EventsSource>) -> Self {
        let page = PageController::from_config(&config);
        Self {
            config,
            theme: SynthBruteTheme::synthbrute(),
            api,
            page,
            picker: DatePicker::new(),
            selected: None,
            notifications: Vec::new(),
            modal: None,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    /// Drop notifications that have been shown long enough.
    pub fn on_tick(&mut self) {
        let cutoff = Utc::now() - chrono::Duration::seconds(NOTIFICATION_TTL_SECS);
        self.notifications.retain(|note| note.created_at > cutoff);
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.selected.and_then(|index| self.page.items().get(index))
    }

    /// Evaluate the date filter after input and fetch if it calls for it.
    pub fn settle(&mut self, sender: &mpsc::Sender<TuiEvent>) {
        if let Some(params) = self.page.settle() {
            self.spawn_fetch(params, sender);
        }
    }

    pub fn load_more(&mut self, sender: &mpsc::Sender<TuiEvent>) {
        if let Some(params) = self.page.on_load_more() {
            self.spawn_fetch(params, sender);
        }
    }

    pub fn refresh(&mut self, sender: &mpsc::Sender<TuiEvent>) {
        let params = self.page.refresh();
        self.spawn_fetch(params, sender);
    }

    /// Issue a fetch on a background task. The result comes back through
    /// `sender` as [`TuiEvent::EventsLoaded`].
    pub fn spawn_fetch(&mut self, params: FetchParams, sender: &mpsc::Sender<TuiEvent>) {
        let (ticket, query) = self.page.begin_fetch(params);
        let api = Arc::clone(&self.api);
        let sender = sender.clone();
        tokio::spawn(async move {
            let result = api.list_events(&query).await;
            if sender
                .send(TuiEvent::EventsLoaded { ticket, result })
                .await
                .is_err()
            {
                tracing::debug!(
                    generation = ticket.generation(),
                    "Event loop closed before events response arrived"
                );
            }
        });
    }

    pub fn apply_loaded(
        &mut self,
        ticket: FetchTicket,
        result: Result<EventsResponse, ApiClientError>,
    ) {
        match self.page.complete_fetch(ticket, result) {
            Ok(true) => {
                let len = self.page.items().len();
                self.selected = if len == 0 {
                    None
                } else if ticket.append() {
                    self.selected.map(|index| index.min(len - 1)).or(Some(0))
                } else {
                    Some(0)
                };
            }
            Ok(false) => {}
            Err(_) => {
                self.notifications.push(
                    Notification::new(NotificationLevel::Error, FETCH_FAILED_MESSAGE)
                        .with_action(NotificationAction::Retry),
                );
            }
        }
    }

    /// Move the selection down. Returns `true` when the selection is within
    /// `load_more_threshold` rows of the end of the list.
    pub fn select_next(&mut self) -> bool {
        let len = self.page.items().len();
        if len == 0 {
            self.selected = None;
            return false;
        }
        let next = match self.selected {
            Some(index) => (index + 1).min(len - 1),
            None => 0,
        };
        self.selected = Some(next);
        len - 1 - next <= self.config.load_more_threshold
    }

    pub fn select_previous(&mut self) {
        if self.page.items().is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(self.selected.map_or(0, |index| index.saturating_sub(1)));
    }

    pub fn open_date_editor(&mut self, field: DateField) {
        let current = self.page.dates().get(field);
        self.picker.open(field, current);
    }

    /// Commit the date being edited into the page's date range.
    pub fn commit_date(&mut self) {
        match self.picker.commit() {
            Some(PickerOutput::Select(field, selection)) => {
                self.page.on_date_select(field, selection);
            }
            Some(PickerOutput::Invalid { field, input }) => {
                self.notifications.push(
                    Notification::new(
                        NotificationLevel::Warning,
                        format!("{} date '{}' is not YYYY-MM-DD", field.label(), input),
                    )
                    .with_action(NotificationAction::Dismiss),
                );
            }
            None => {}
        }
    }

    pub fn reset_dates(&mut self) {
        self.picker.cancel();
        self.page.on_date_reset();
    }

    /// Text for the filter bar: failure, result count, or loading notice.
    pub fn meta_line(&self) -> String {
        if self.page.error().is_some() {
            FETCH_FAILED_MESSAGE.to_string()
        } else if let Some(response) = self.page.response() {
            format!(
                "Showing {} of {}",
                response.items.len(),
                response.pagination.count
            )
        } else {
            "Getting Events...".to_string()
        }
    }
}
