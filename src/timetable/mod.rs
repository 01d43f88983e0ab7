pub mod client;
pub mod dto;
pub mod format;
pub mod week;

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tracing::warn;

use crate::courses::CourseDirectory;
use crate::timetable::client::TimetableApi;
use crate::timetable::dto::EventsFilterRequest;
use crate::timetable::format::{TimetableEvent, format_events};
use crate::timetable::week::WeekOffset;

pub use client::{HttpTimetableApi, NoopTimetableApi, TimetableConfig};

pub const UNABLE_TO_ACCESS: &str = "Unable to access timetable.";
pub const UNKNOWN_COURSE: &str = "This is not a valid course / the course was not found. :(";

/// The scrape-parse-format pipeline: resolve the week to ask about, fill the
/// filter request, fetch, and render. Failures against the service become
/// fixed user-facing replies, never HTTP errors; they are scoped to the one
/// chat message that triggered them.
pub struct Timetable {
    api: Arc<dyn TimetableApi>,
    directory: Arc<CourseDirectory>,
    // Week list barely changes within a day, so one fetch per calendar day
    // is enough.
    week_cache: Mutex<Option<(NaiveDate, Vec<NaiveDate>)>>,
}

impl Timetable {
    pub fn new(api: Arc<dyn TimetableApi>, directory: Arc<CourseDirectory>) -> Self {
        Self {
            api,
            directory,
            week_cache: Mutex::new(None),
        }
    }

    /// Formatted schedule for one weekday of a course. Returns the rendered
    /// block (empty when there are no classes), or a fixed reply when the
    /// course is unknown or the service cannot be reached.
    pub async fn day_schedule(
        &self,
        course_code: &str,
        weekday: u32,
        offset: WeekOffset,
        today: NaiveDate,
    ) -> String {
        let Some(identity) = self.directory.identity(course_code) else {
            return UNKNOWN_COURSE.to_string();
        };
        let identity = identity.to_string();

        let weeks = match self.weeks(today).await {
            Ok(weeks) => weeks,
            Err(e) => {
                warn!("week list unavailable: {}", e);
                return UNABLE_TO_ACCESS.to_string();
            }
        };

        let week_start = week::resolve_week_start(&weeks, offset, today);
        let request = EventsFilterRequest::build(&identity, week_start, weekday);

        let raw = match self.api.fetch_events(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("events unavailable for {}: {}", course_code, e);
                return UNABLE_TO_ACCESS.to_string();
            }
        };

        let events: Vec<TimetableEvent> = raw.iter().map(TimetableEvent::from_raw).collect();
        format_events(events)
    }

    async fn weeks(&self, today: NaiveDate) -> Result<Vec<NaiveDate>, crate::error::AppError> {
        {
            let cache = self.week_cache.lock().unwrap_or_else(|e| e.into_inner());
            if let Some((day, weeks)) = cache.as_ref() {
                if *day == today {
                    return Ok(weeks.clone());
                }
            }
        }

        let weeks = self.api.list_weeks().await?;

        let mut cache = self.week_cache.lock().unwrap_or_else(|e| e.into_inner());
        *cache = Some((today, weeks.clone()));
        Ok(weeks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::error::AppError;
    use crate::timetable::dto::{ExtraProperty, RawEvent};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn directory() -> Arc<CourseDirectory> {
        Arc::new(CourseDirectory::from_json(r#"{"CA116": "abc-123"}"#).unwrap())
    }

    struct FixedApi {
        week_calls: AtomicUsize,
    }

    #[async_trait]
    impl TimetableApi for FixedApi {
        async fn list_weeks(&self) -> Result<Vec<NaiveDate>, AppError> {
            self.week_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![date(2024, 9, 23), date(2024, 9, 30)])
        }

        async fn fetch_events(
            &self,
            _request: &EventsFilterRequest,
        ) -> Result<Vec<RawEvent>, AppError> {
            Ok(vec![RawEvent {
                extra_properties: vec![ExtraProperty {
                    value: "Computing Programming I".to_string(),
                }],
                event_type: "Lecture".to_string(),
                location: Some("HG23".to_string()),
                start_date_time: "2024-09-23T09:00:00+01:00".to_string(),
                end_date_time: "2024-09-23T10:00:00+01:00".to_string(),
            }])
        }
    }

    struct FailingApi;

    #[async_trait]
    impl TimetableApi for FailingApi {
        async fn list_weeks(&self) -> Result<Vec<NaiveDate>, AppError> {
            Err(AppError::Upstream("503".to_string()))
        }

        async fn fetch_events(
            &self,
            _request: &EventsFilterRequest,
        ) -> Result<Vec<RawEvent>, AppError> {
            Err(AppError::Upstream("503".to_string()))
        }
    }

    #[tokio::test]
    async fn renders_a_day_schedule() {
        let api = Arc::new(FixedApi {
            week_calls: AtomicUsize::new(0),
        });
        let timetable = Timetable::new(api, directory());

        let out = timetable
            .day_schedule("ca116", 1, WeekOffset::Current, date(2024, 9, 25))
            .await;
        assert!(out.contains("Computing Programming I"));
        assert!(out.contains("Start:09:00"));
    }

    #[tokio::test]
    async fn unknown_course_gets_fixed_reply() {
        let api = Arc::new(FixedApi {
            week_calls: AtomicUsize::new(0),
        });
        let timetable = Timetable::new(api, directory());

        let out = timetable
            .day_schedule("CA999", 1, WeekOffset::Current, date(2024, 9, 25))
            .await;
        assert_eq!(out, UNKNOWN_COURSE);
    }

    #[tokio::test]
    async fn service_failure_gets_fixed_reply() {
        let timetable = Timetable::new(Arc::new(FailingApi), directory());

        let out = timetable
            .day_schedule("CA116", 1, WeekOffset::Current, date(2024, 9, 25))
            .await;
        assert_eq!(out, UNABLE_TO_ACCESS);
    }

    #[tokio::test]
    async fn week_list_is_cached_per_day() {
        let api = Arc::new(FixedApi {
            week_calls: AtomicUsize::new(0),
        });
        let timetable = Timetable::new(api.clone(), directory());

        let today = date(2024, 9, 25);
        timetable
            .day_schedule("CA116", 1, WeekOffset::Current, today)
            .await;
        timetable
            .day_schedule("CA116", 2, WeekOffset::Current, today)
            .await;
        assert_eq!(api.week_calls.load(Ordering::SeqCst), 1);

        timetable
            .day_schedule("CA116", 1, WeekOffset::Current, date(2024, 9, 26))
            .await;
        assert_eq!(api.week_calls.load(Ordering::SeqCst), 2);
    }
}
