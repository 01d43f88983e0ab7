use chrono::{Datelike, Days, NaiveDate};

/// Week offset requested by the user: the week containing "today", or the
/// one after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekOffset {
    Current,
    Next,
}

/// Finds the start date of the requested week within the service's list of
/// available week starts.
///
/// The service only reports Monday-aligned week starts, so we take today
/// (plus seven days for next week) and walk backward a day at a time until
/// we land on a listed date. Gives up after 14 steps and returns the last
/// tried date; callers get a best-effort answer rather than an error.
pub fn resolve_week_start(weeks: &[NaiveDate], offset: WeekOffset, today: NaiveDate) -> NaiveDate {
    let mut current = match offset {
        WeekOffset::Current => today,
        WeekOffset::Next => today + Days::new(7),
    };

    let mut steps = 0;
    while !weeks.contains(&current) && steps < 14 {
        current = current - Days::new(1);
        steps += 1;
    }
    current
}

/// Today's weekday number as the prompt table counts it: ISO weekday mod 6,
/// so Mon..Fri are 1..5, Saturday is 0 and Sunday wraps to 1.
pub fn weekday_today(today: NaiveDate) -> u32 {
    today.weekday().number_from_monday() % 6
}

/// Weekday 8 means "tomorrow" asked late in the week; the service only
/// understands 1..7, so it wraps to Monday.
pub fn normalize_weekday(weekday: u32) -> u32 {
    if weekday == 8 { 1 } else { weekday }
}

/// A request for a weekday earlier than today's can only mean next week.
pub fn offset_for(weekday: u32, today: NaiveDate) -> WeekOffset {
    if weekday < weekday_today(today) {
        WeekOffset::Next
    } else {
        WeekOffset::Current
    }
}

/// Parses the date prefix of the service's ISO timestamps ("YYYY-MM-DD...").
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()
}
