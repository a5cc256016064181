use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{ApiError, ScheduleApi};
use crate::models::date_range::DateRange;
use crate::models::event::Event;
use crate::models::routine::Routine;
use crate::models::settings::ApiSettings;
use crate::utils::date::format_api_date;

pub const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

#[derive(Debug, Deserialize)]
struct RoutinesResponse {
    routines: Vec<Routine>,
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    events: Vec<Event>,
}

#[derive(Debug, Serialize)]
struct CreateEventBody<'a> {
    routine_id: &'a str,
    date: String,
}

#[derive(Debug, Serialize)]
struct DeleteEventBody {
    id: i64,
}

/// REST client for the routines/events endpoints.
pub struct HttpScheduleApi {
    client: Client,
    base_url: String,
}

impl HttpScheduleApi {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(secret) = settings.admin_secret.as_deref() {
            let mut value =
                HeaderValue::from_str(secret).context("Admin secret is not a valid header value")?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(ADMIN_SECRET_HEADER), value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .default_headers(headers)
            .build()
            .context("Failed to build events API HTTP client")?;

        log::debug!(
            "Events API client targeting {}",
            Self::redact_url(&settings.base_url)
        );

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Parse(err.to_string()))
    }

    /// Strip credentials and query string so a URL is safe to log.
    fn redact_url(url: &str) -> String {
        let without_query = url.split(['?', '#']).next().unwrap_or_default();
        match without_query.split_once("://") {
            Some((scheme, rest)) => match rest.split_once('@') {
                Some((_, host)) => format!("{}://***@{}", scheme, host),
                None => without_query.to_string(),
            },
            None => "***redacted-url***".to_string(),
        }
    }
}

#[async_trait]
impl ScheduleApi for HttpScheduleApi {
    async fn fetch_routines(&self) -> Result<Vec<Routine>, ApiError> {
        let response = Self::send(self.client.get(self.endpoint("routines"))).await?;
        let body: RoutinesResponse = Self::decode(response).await?;
        Ok(body.routines)
    }

    async fn fetch_events(&self, range: &DateRange) -> Result<Vec<Event>, ApiError> {
        let request = self.client.get(self.endpoint("events")).query(&[
            ("startDate", format_api_date(range.start())),
            ("endDate", format_api_date(range.end())),
        ]);
        let response = Self::send(request).await?;
        let body: EventsResponse = Self::decode(response).await?;
        Ok(body.events)
    }

    async fn create_event(&self, routine_id: &str, date: NaiveDate) -> Result<(), ApiError> {
        let body = CreateEventBody {
            routine_id,
            date: format_api_date(date),
        };
        Self::send(self.client.post(self.endpoint("events")).json(&body)).await?;
        Ok(())
    }

    async fn delete_event(&self, event_id: i64) -> Result<(), ApiError> {
        let body = DeleteEventBody { id: event_id };
        Self::send(self.client.delete(self.endpoint("events")).json(&body)).await?;
        Ok(())
    }
}
