//! REST client for the event listing endpoint.

use crate::config::TuiConfig;
use agenda_core::EventsResponse;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Config error: {0}")]
    Config(String),
}

/// Query string accepted by the listing endpoint.
///
/// Unset fields are left out of the query entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<String>,
}

impl EventsQuery {
    pub fn first_page(limit: u32) -> Self {
        Self {
            limit,
            offset: None,
            starts_at: None,
            ends_at: None,
        }
    }
}

/// Error body returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

/// Anything that can serve a page of events for a query.
#[async_trait]
pub trait EventsSource: Send + Sync {
    async fn list_events(&self, query: &EventsQuery) -> Result<EventsResponse, ApiClientError>;
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    events_path: String,
}

impl RestClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        if !config.api_base_url.starts_with("http") {
            return Err(ApiClientError::Config(format!(
                "api_base_url must be an http(s) URL, got {}",
                config.api_base_url
            )));
        }
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            events_path: config.events_path.clone(),
        })
    }

    pub fn events_url(&self) -> String {
        format!("{}{}", self.base_url, self.events_path)
    }

    async fn get_json<T, Q>(&self, url: String, query: &Q) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.client.get(url).query(query).send().await?;
        parse_response(response).await
    }
}

#[async_trait]
impl EventsSource for RestClient {
    async fn list_events(&self, query: &EventsQuery) -> Result<EventsResponse, ApiClientError> {
        let page: EventsResponse = self.get_json(self.events_url(), query).await?;
        page.pagination
            .validate()
            .map_err(|e| ApiClientError::InvalidResponse(e.to_string()))?;
        Ok(page)
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice::<T>(&bytes)?)
    } else {
        let text = response.text().await?;
        Err(status_error(status.as_u16(), &text))
    }
}

fn status_error(status: u16, body: &str) -> ApiClientError {
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            code: Some(code),
            message,
        }) => format!("{}: {}", code, message),
        Ok(ApiErrorBody {
            code: None,
            message,
        }) => message,
        Err(_) => body.to_string(),
    };
    ApiClientError::Status { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(query: &EventsQuery) -> String {
        let request = reqwest::Client::new()
            .get("http://localhost/events")
            .query(query)
            .build()
            .expect("request builds");
        request.url().query().unwrap_or_default().to_string()
    }

    #[test]
    fn first_page_query_only_carries_limit() {
        assert_eq!(encode(&EventsQuery::first_page(10)), "limit=10");
    }

    #[test]
    fn filtered_page_query_uses_camel_case_keys() {
        let query = EventsQuery {
            limit: 10,
            offset: Some(20),
            starts_at: Some("2024-01-01".to_string()),
            ends_at: Some("2024-01-31".to_string()),
        };
        assert_eq!(
            encode(&query),
            "limit=10&offset=20&startsAt=2024-01-01&endsAt=2024-01-31"
        );
    }

    #[test]
    fn status_error_prefers_api_body() {
        let err = status_error(503, r#"{"code":"UNAVAILABLE","message":"try later"}"#);
        assert!(matches!(
            err,
            ApiClientError::Status { status: 503, ref message } if message == "UNAVAILABLE: try later"
        ));

        let err = status_error(500, "boom");
        assert!(matches!(
            err,
            ApiClientError::Status { status: 500, ref message } if message == "boom"
        ));
    }
}
