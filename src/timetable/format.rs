use crate::timetable::dto::RawEvent;

/// One class in a day's schedule, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableEvent {
    pub name: String,
    pub event_type: String,
    pub location: Option<String>,
    pub start: String,
    pub end: String,
}

impl TimetableEvent {
    pub fn from_raw(raw: &RawEvent) -> Self {
        Self {
            name: raw
                .extra_properties
                .first()
                .map(|p| p.value.clone())
                .unwrap_or_default(),
            event_type: raw.event_type.clone(),
            location: raw.location.clone(),
            start: time_of(&raw.start_date_time),
            end: time_of(&raw.end_date_time),
        }
    }
}

/// The "HH:MM" slice of an ISO datetime like "2024-09-23T09:00:00+01:00".
fn time_of(datetime: &str) -> String {
    datetime
        .split('T')
        .nth(1)
        .map(|t| t.chars().take(5).collect())
        .unwrap_or_default()
}

/// Renders a day's events as an HTML-line-break block, earliest class first.
/// Lexical comparison on "HH:MM" is chronological since the times are
/// fixed-width and zero-padded. An empty list renders to the empty string;
/// the caller decides what to tell the user.
pub fn format_events(mut events: Vec<TimetableEvent>) -> String {
    events.sort_by(|a, b| a.start.cmp(&b.start));

    let mut out = String::new();
    for event in &events {
        out.push_str(&event.name);
        out.push_str("<br>");
        out.push_str(&event.event_type);
        out.push_str("<br>");
        if let Some(location) = &event.location {
            out.push_str(location);
            out.push_str("<br>");
        }
        out.push_str("Start:");
        out.push_str(&event.start);
        out.push_str("<br>");
        out.push_str("Ends:");
        out.push_str(&event.end);
        out.push_str("<br><br>");
    }
    out.trim_end_matches("<br>").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, start: &str, location: Option<&str>) -> TimetableEvent {
        TimetableEvent {
            name: name.to_string(),
            event_type: "Lecture".to_string(),
            location: location.map(|s| s.to_string()),
            start: start.to_string(),
            end: "18:00".to_string(),
        }
    }

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(format_events(Vec::new()), "");
    }

    #[test]
    fn events_render_in_chronological_order() {
        let rendered = format_events(vec![
            event("A", "09:00", None),
            event("B", "13:00", None),
            event("C", "11:00", None),
        ]);
        let a = rendered.find("A<br>").unwrap();
        let b = rendered.find("B<br>").unwrap();
        let c = rendered.find("C<br>").unwrap();
        assert!(a < c && c < b);
    }

    #[test]
    fn location_line_is_omitted_when_absent() {
        let with = format_events(vec![event("A", "09:00", Some("HG23"))]);
        assert!(with.contains("HG23<br>"));

        let without = format_events(vec![event("A", "09:00", None)]);
        assert!(!without.contains("HG23"));
        assert!(without.contains("Lecture<br>Start:09:00"));
    }

    #[test]
    fn raw_event_times_are_clock_slices() {
        let raw = RawEvent {
            extra_properties: vec![crate::timetable::dto::ExtraProperty {
                value: "Computing Programming I".to_string(),
            }],
            event_type: "Lab".to_string(),
            location: None,
            start_date_time: "2024-09-23T09:00:00+01:00".to_string(),
            end_date_time: "2024-09-23T11:00:00+01:00".to_string(),
        };
        let event = TimetableEvent::from_raw(&raw);
        assert_eq!(event.start, "09:00");
        assert_eq!(event.end, "11:00");
        assert_eq!(event.name, "Computing Programming I");
    }
}
