use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ViewOptionsResponse {
    #[serde(rename = "Weeks")]
    pub weeks: Vec<WeekOption>,
}

#[derive(Debug, Deserialize)]
pub struct WeekOption {
    #[serde(rename = "FirstDayInWeek")]
    pub first_day_in_week: String,
}

/// Body of the events-filter POST. Field names mirror the service's JSON
/// contract exactly.
#[derive(Debug, Clone, Serialize)]
pub struct EventsFilterRequest {
    #[serde(rename = "ViewOptions")]
    pub view_options: ViewOptions,
    #[serde(rename = "CategoryIdentities")]
    pub category_identities: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewOptions {
    #[serde(rename = "Days")]
    pub days: Vec<DayOption>,
    #[serde(rename = "Weeks")]
    pub weeks: Vec<WeekFilter>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayOption {
    #[serde(rename = "DayOfWeek")]
    pub day_of_week: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekFilter {
    #[serde(rename = "FirstDayInWeek")]
    pub first_day_in_week: String,
}

impl EventsFilterRequest {
    /// The service expects the week start as ISO-8601 at midnight UTC.
    pub fn build(identity: &str, week_start: NaiveDate, weekday: u32) -> Self {
        Self {
            view_options: ViewOptions {
                days: vec![DayOption { day_of_week: weekday }],
                weeks: vec![WeekFilter {
                    first_day_in_week: format!("{}T00:00:00.000Z", week_start.format("%Y-%m-%d")),
                }],
            },
            category_identities: vec![identity.to_string()],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryResult {
    #[serde(rename = "CategoryEvents", default)]
    pub category_events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "ExtraProperties", default)]
    pub extra_properties: Vec<ExtraProperty>,
    #[serde(rename = "EventType")]
    pub event_type: String,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "StartDateTime")]
    pub start_date_time: String,
    #[serde(rename = "EndDateTime")]
    pub end_date_time: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtraProperty {
    #[serde(rename = "Value")]
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_request_serializes_to_service_shape() {
        let week_start = NaiveDate::from_ymd_opt(2024, 9, 23).unwrap();
        let req = EventsFilterRequest::build("abc-123", week_start, 3);
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["CategoryIdentities"][0], "abc-123");
        assert_eq!(json["ViewOptions"]["Days"][0]["DayOfWeek"], 3);
        assert_eq!(
            json["ViewOptions"]["Weeks"][0]["FirstDayInWeek"],
            "2024-09-23T00:00:00.000Z"
        );
    }

    #[test]
    fn events_response_parses() {
        let body = r#"[{"CategoryEvents":[{"ExtraProperties":[{"Value":"Computing Programming I"}],"EventType":"Lecture","Location":"HG23","StartDateTime":"2024-09-23T09:00:00+01:00","EndDateTime":"2024-09-23T10:00:00+01:00"}]}]"#;
        let parsed: Vec<CategoryResult> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed[0].category_events.len(), 1);
        assert_eq!(parsed[0].category_events[0].event_type, "Lecture");
        assert_eq!(
            parsed[0].category_events[0].extra_properties[0].value,
            "Computing Programming I"
        );
    }
}
