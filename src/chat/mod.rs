pub mod commands;
pub mod engine;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use sqlx::SqlitePool;
use tracing::debug;

use crate::courses::CourseDirectory;
use crate::error::AppError;
use crate::models::User;
use crate::timetable::{Timetable, week};

pub use commands::{Command, ParseOutcome, TOO_MANY_ARGUMENTS};
pub use engine::{ChatEngine, ScriptedEngine};

pub const NO_CLASSES: &str = "There are no classes on this day";

/// Optional latency injected before every reply, so a client can show a
/// "typing" indicator. Off by default; not a correctness knob.
#[derive(Debug, Clone, Default)]
pub struct ChatConfig {
    pub response_delay: Option<Duration>,
}

impl ChatConfig {
    pub fn new_from_env() -> Self {
        let response_delay = std::env::var("CHAT_RESPONSE_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);
        Self { response_delay }
    }
}

/// One chat turn: commands first, then the engine, then — when the engine's
/// reply is a timetable prompt — the timetable pipeline scoped to the user's
/// stored course.
pub struct ChatService {
    db: SqlitePool,
    engine: Arc<dyn ChatEngine>,
    timetable: Timetable,
    directory: Arc<CourseDirectory>,
    config: ChatConfig,
}

impl ChatService {
    pub fn new(
        db: SqlitePool,
        engine: Arc<dyn ChatEngine>,
        timetable: Timetable,
        directory: Arc<CourseDirectory>,
        config: ChatConfig,
    ) -> Self {
        Self {
            db,
            engine,
            timetable,
            directory,
            config,
        }
    }

    pub async fn respond(&self, user: &User, message: &str) -> Result<String, AppError> {
        if let Some(delay) = self.config.response_delay {
            tokio::time::sleep(delay).await;
        }
        self.respond_at(user, message, Local::now().date_naive()).await
    }

    /// Same as `respond`, with "today" supplied by the caller.
    pub async fn respond_at(
        &self,
        user: &User,
        message: &str,
        today: NaiveDate,
    ) -> Result<String, AppError> {
        let message = message.trim();

        match Command::parse(message) {
            ParseOutcome::Command(command) => {
                debug!("dispatching command for user {}", user.id);
                return self.dispatch(user, command).await;
            }
            ParseOutcome::BadArity => return Ok(TOO_MANY_ARGUMENTS.to_string()),
            ParseOutcome::NotACommand => {}
        }

        let reply = self.engine.reply(message).await;

        if let Some(weekday) = prompt_weekday(&reply, today) {
            return Ok(self.fetch_timetable(user, &reply, weekday, today).await);
        }
        Ok(reply)
    }

    async fn dispatch(&self, user: &User, command: Command) -> Result<String, AppError> {
        match command {
            Command::AddAssignment { name, due_date } => {
                handlers::add_assignment(&self.db, &user.id, &name, &due_date).await
            }
            Command::DeleteAssignment { name } => {
                handlers::delete_assignment(&self.db, &user.id, &name).await
            }
            Command::ViewAssignments => handlers::view_assignments(&self.db, &user.id).await,
            Command::UpdateCourse { code } => {
                handlers::update_course(&self.db, &self.directory, &user.id, &code).await
            }
        }
    }

    async fn fetch_timetable(
        &self,
        user: &User,
        prompt: &str,
        weekday: u32,
        today: NaiveDate,
    ) -> String {
        // A weekday earlier than today's means next week; check before the
        // Sunday wrap so 8 never looks "passed".
        let offset = week::offset_for(weekday, today);
        let weekday = week::normalize_weekday(weekday);

        let schedule = self
            .timetable
            .day_schedule(&user.coursecode, weekday, offset, today)
            .await;

        if schedule.is_empty() {
            return NO_CLASSES.to_string();
        }
        format!("{}<br><br>{}", prompt, schedule)
    }
}

/// Exact match of an engine reply against the timetable prompts. Today and
/// tomorrow resolve against the mod-6 weekday rule, named days are fixed.
fn prompt_weekday(reply: &str, today: NaiveDate) -> Option<u32> {
    match reply {
        "Here is your timetable for today :)" => Some(week::weekday_today(today)),
        "Here is your timetable for tomorrow :)" => Some(week::weekday_today(today) + 1),
        "Here is your timetable for monday :)" => Some(1),
        "Here is your timetable for tuesday :)" => Some(2),
        "Here is your timetable for wednesday :)" => Some(3),
        "Here is your timetable for thursday :)" => Some(4),
        "Here is your timetable for friday :)" => Some(5),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn prompts_map_to_weekday_numbers() {
        let wednesday = date(2024, 9, 25);
        assert_eq!(
            prompt_weekday("Here is your timetable for today :)", wednesday),
            Some(3)
        );
        assert_eq!(
            prompt_weekday("Here is your timetable for tomorrow :)", wednesday),
            Some(4)
        );
        assert_eq!(
            prompt_weekday("Here is your timetable for friday :)", wednesday),
            Some(5)
        );
        assert_eq!(prompt_weekday("I am sorry, but I do not understand.", wednesday), None);
    }

    #[test]
    fn tomorrow_from_sunday_wraps_past_the_week() {
        let sunday = date(2024, 9, 29);
        // Sunday counts as 1 under the mod-6 rule, so tomorrow is 2.
        assert_eq!(
            prompt_weekday("Here is your timetable for tomorrow :)", sunday),
            Some(2)
        );
    }
}
