//! Homework assignments.

use super::de;
use serde::Deserialize;
use std::fmt;

/// Category label the API uses for real homework, as opposed to classwork
/// and other assignment types returned by the same endpoint.
pub const HOMEWORK_TYPE: &str = "Homework";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Homework {
    #[serde(deserialize_with = "de::opt_u64")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "de::opt_string")]
    pub lesson: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub subject: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub teacher: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub homework_type: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub meta_title: Option<String>,
    /// Rich text (HTML)
    #[serde(deserialize_with = "de::opt_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub issue_date: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub due_date: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub completion_time_unit: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub completion_time_value: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub publish_time: Option<String>,
    #[serde(deserialize_with = "de::opt_record")]
    pub status: Option<HomeworkStatus>,
    #[serde(deserialize_with = "de::list")]
    pub validated_links: Vec<HomeworkLink>,
    #[serde(deserialize_with = "de::list")]
    pub validated_attachments: Vec<HomeworkAttachment>,
}

/// Per-pupil progress on an assignment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HomeworkStatus {
    #[serde(deserialize_with = "de::opt_u64")]
    pub id: Option<u64>,
    /// e.g. "completed", "late", "not_completed"; absent while untouched
    #[serde(deserialize_with = "de::opt_string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub mark: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub mark_relative: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub ticked: Option<String>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub allow_attachments: Option<bool>,
    #[serde(deserialize_with = "de::opt_string")]
    pub first_seen_date: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub last_seen_date: Option<String>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub has_feedback: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HomeworkLink {
    #[serde(deserialize_with = "de::opt_string")]
    pub link: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub validated_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HomeworkAttachment {
    #[serde(deserialize_with = "de::opt_u64")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "de::opt_string")]
    pub file_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub file: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub validated_file: Option<String>,
}

impl Homework {
    /// Returns true for entries categorised as homework proper.
    pub fn is_homework(&self) -> bool {
        self.homework_type.as_deref() == Some(HOMEWORK_TYPE)
    }

    /// The status state, if the pupil has one recorded.
    pub fn state(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.state.as_deref())
    }

    /// Estimated completion time, e.g. "30 minutes", or "n/a" without a value.
    pub fn estimated_time(&self) -> String {
        match self.completion_time_value.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => match &self.completion_time_unit {
                Some(unit) => format!("{value} {unit}"),
                None => value.to_string(),
            },
            _ => "n/a".to_string(),
        }
    }
}

impl fmt::Display for Homework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {}",
            self.title.as_deref().unwrap_or("Untitled"),
            self.subject.as_deref().unwrap_or("no subject"),
            self.due_date.as_deref().unwrap_or("no due date")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_status() {
        let hw: Homework = serde_json::from_value(json!({
            "id": 7,
            "homework_type": "Homework",
            "title": "Essay",
            "completion_time_value": "45",
            "completion_time_unit": "minutes",
            "status": {"id": 9, "state": "completed", "ticked": "yes"},
            "validated_attachments": []
        }))
        .unwrap();

        assert!(hw.is_homework());
        assert_eq!(hw.state(), Some("completed"));
        assert_eq!(hw.estimated_time(), "45 minutes");
    }

    #[test]
    fn test_estimated_time_absent() {
        let hw: Homework =
            serde_json::from_value(json!({"completion_time_value": null, "completion_time_unit": "minutes"}))
                .unwrap();
        assert_eq!(hw.estimated_time(), "n/a");
        assert_eq!(hw.state(), None);
        assert!(!hw.is_homework());
    }
}
