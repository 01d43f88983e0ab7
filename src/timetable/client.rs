use std::env;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, error};

use crate::error::AppError;
use crate::timetable::dto::{CategoryResult, EventsFilterRequest, RawEvent, ViewOptionsResponse};
use crate::timetable::week;

const DEFAULT_BASE_URL: &str = "https://opentimetable.dcu.ie";
const DEFAULT_CATEGORY_TYPE: &str = "241e4d36-60e0-49f8-b27e-99416745d98d";

/// Connection settings for the timetabling service. The service wants a
/// fixed authorization value plus referer/origin headers matching its own
/// web client; all of it is overridable from the environment so nothing is
/// baked into the binary.
#[derive(Clone, Debug)]
pub struct TimetableConfig {
    pub base_url: String,
    pub authorization: String,
    pub referer: String,
    pub origin: String,
    pub category_type: String,
}

impl TimetableConfig {
    pub fn new_from_env() -> Self {
        let base_url = env::var("TIMETABLE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let authorization = env::var("TIMETABLE_AUTHORIZATION")
            .unwrap_or_else(|_| "basic T64Mdy7m[".to_string());
        let referer = env::var("TIMETABLE_REFERER")
            .unwrap_or_else(|_| format!("{}/", base_url));
        let origin = env::var("TIMETABLE_ORIGIN")
            .unwrap_or_else(|_| format!("{}/", base_url));
        let category_type = env::var("TIMETABLE_CATEGORY_TYPE")
            .unwrap_or_else(|_| DEFAULT_CATEGORY_TYPE.to_string());

        Self {
            base_url,
            authorization,
            referer,
            origin,
            category_type,
        }
    }
}

/// The two calls the timetable pipeline makes against the service.
#[async_trait]
pub trait TimetableApi: Send + Sync {
    /// First day of every week the service can answer for.
    async fn list_weeks(&self) -> Result<Vec<NaiveDate>, AppError>;

    /// Events matching a filled filter request.
    async fn fetch_events(&self, request: &EventsFilterRequest) -> Result<Vec<RawEvent>, AppError>;
}

pub struct HttpTimetableApi {
    client: Client,
    config: TimetableConfig,
}

impl HttpTimetableApi {
    pub fn new(config: TimetableConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::BadRequest(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", self.config.authorization.as_str())
            .header("Referer", self.config.referer.as_str())
            .header("Origin", self.config.origin.as_str())
    }
}

#[async_trait]
impl TimetableApi for HttpTimetableApi {
    async fn list_weeks(&self) -> Result<Vec<NaiveDate>, AppError> {
        let url = format!("{}/broker/api/viewOptions", self.config.base_url);

        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("viewOptions request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            error!("viewOptions returned {}", status);
            return Err(AppError::Upstream(format!("viewOptions returned {}", status)));
        }

        let parsed: ViewOptionsResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse viewOptions: {}", e)))?;

        let weeks = parsed
            .weeks
            .iter()
            .filter_map(|w| week::parse_date(&w.first_day_in_week))
            .collect();
        Ok(weeks)
    }

    async fn fetch_events(&self, request: &EventsFilterRequest) -> Result<Vec<RawEvent>, AppError> {
        let url = format!(
            "{}/broker/api/categoryTypes/{}/categories/events/filter",
            self.config.base_url, self.config.category_type
        );

        let response = self
            .request(self.client.post(&url))
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("events filter request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            error!(
                "Unable to get timetable for identity {:?}: {}",
                request.category_identities.first(),
                status
            );
            return Err(AppError::Upstream(format!("events filter returned {}", status)));
        }

        debug!(
            "Fetched events for identity {:?}",
            request.category_identities.first()
        );

        let mut results: Vec<CategoryResult> = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse events response: {}", e)))?;

        if results.is_empty() {
            return Ok(Vec::new());
        }
        Ok(results.remove(0).category_events)
    }
}

/// Stand-in for tests and offline development: no weeks, no events.
pub struct NoopTimetableApi;

#[async_trait]
impl TimetableApi for NoopTimetableApi {
    async fn list_weeks(&self) -> Result<Vec<NaiveDate>, AppError> {
        Ok(Vec::new())
    }

    async fn fetch_events(&self, _request: &EventsFilterRequest) -> Result<Vec<RawEvent>, AppError> {
        Ok(Vec::new())
    }
}
