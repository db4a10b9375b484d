//! A pupil linked to the parent account.

use super::de;
use serde::Deserialize;
use std::fmt;

/// One pupil profile as returned by `/pupils`.
///
/// Feature flags say which report types the school has enabled for the
/// pupil; the counts are the tallies shown on the parent dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Student {
    #[serde(deserialize_with = "de::opt_u64")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "de::opt_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub avatar_url: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub school_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub school_logo: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub timezone: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub display_attendance_type: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub pusher_channel_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub detention_alias_plural_uc: Option<String>,

    // Feature flags
    #[serde(deserialize_with = "de::opt_bool")]
    pub has_birthday: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub is_disabled: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_homework: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_rewards: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_behaviour: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_parent_behaviour: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_detentions: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_report_cards: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_classes: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_attendance: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_attendance_percentage: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_announcements: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_academic_reports: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_activity: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_activity_detentions: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_timetable: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_mental_health: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_two_way_communications: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_absences: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_mental_health_no_tracker: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub can_upload_attachments: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_event_badges: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_avatars: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_concern_submission: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_custom_fields: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub display_covid_tests: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub can_record_covid_tests: Option<bool>,
    // Dashboard tallies
    #[serde(deserialize_with = "de::opt_u64")]
    pub detention_yes_count: Option<u64>,
    #[serde(deserialize_with = "de::opt_u64")]
    pub detention_no_count: Option<u64>,
    #[serde(deserialize_with = "de::opt_u64")]
    pub detention_pending_count: Option<u64>,
    #[serde(deserialize_with = "de::opt_u64")]
    pub detention_upscaled_count: Option<u64>,
    #[serde(deserialize_with = "de::opt_u64")]
    pub homework_todo_count: Option<u64>,
    #[serde(deserialize_with = "de::opt_u64")]
    pub homework_late_count: Option<u64>,
    #[serde(deserialize_with = "de::opt_u64")]
    pub homework_not_completed_count: Option<u64>,
    #[serde(deserialize_with = "de::opt_u64")]
    pub homework_excused_count: Option<u64>,
    #[serde(deserialize_with = "de::opt_u64")]
    pub homework_completed_count: Option<u64>,
    #[serde(deserialize_with = "de::opt_u64")]
    pub homework_submitted_count: Option<u64>,
    #[serde(deserialize_with = "de::opt_u64")]
    pub announcements_count: Option<u64>,
    #[serde(deserialize_with = "de::opt_u64")]
    pub messages_count: Option<u64>,
}
impl Student {
    /// Whether the school shows homework for this pupil.
    pub fn shows_homework(&self) -> bool {
        self.display_homework.unwrap_or(false)
    }

    /// Whether the school shows detentions for this pupil.
    pub fn shows_detentions(&self) -> bool {
        self.display_detentions.unwrap_or(false)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.first_name, &self.last_name, &self.name) {
            (Some(first), Some(last), _) => write!(f, "{first} {last}"),
            (Some(only), None, _) | (None, Some(only), _) => write!(f, "{only}"),
            (None, None, Some(name)) => write!(f, "{name}"),
            (None, None, None) => write!(f, "Unnamed pupil"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_student_from_partial_json() {
        let student: Student = serde_json::from_value(json!({
            "id": 1234,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "display_homework": true,
            "homework_todo_count": "3",
            "some_future_field": {"ignored": true}
        }))
        .unwrap();

        assert_eq!(student.id, Some(1234));
        assert_eq!(student.to_string(), "Ada Lovelace");
        assert!(student.shows_homework());
        assert!(!student.shows_detentions());
        assert_eq!(student.display_detentions, None);
        assert_eq!(student.homework_todo_count, Some(3));
        assert_eq!(student.school_name, None);
    }
}
