//! Timetable lessons and period timings.

use super::de;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// A school period identifier such as "1", "5" or "Reg".
///
/// Lessons and the per-day period table refer to periods by this key; the
/// API sends it as either a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodNumber(String);

impl PeriodNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeriodNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PeriodNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        de::opt_string(deserializer)?
            .map(PeriodNumber)
            .ok_or_else(|| serde::de::Error::custom("empty period number"))
    }
}

fn opt_period<'de, D>(deserializer: D) -> Result<Option<PeriodNumber>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de::opt_string(deserializer)?.map(PeriodNumber))
}

/// One lesson on one day.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimetablePeriod {
    #[serde(deserialize_with = "de::opt_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "opt_period")]
    pub period_number: Option<PeriodNumber>,
    #[serde(deserialize_with = "de::opt_string")]
    pub period_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub subject_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub lesson_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub room_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub teacher_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub start_time: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub end_time: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub note: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub pupil_note: Option<String>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub is_alternative_lesson: Option<bool>,
}

/// Start and end of a period, from the `meta.periods` block of a day.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodTimes {
    pub number: PeriodNumber,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub end_time: Option<String>,
}

/// The `meta` block of a timetable response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimetableMeta {
    #[serde(deserialize_with = "de::list")]
    pub dates: Vec<String>,
    /// Dates of the week containing the requested day that have lessons
    #[serde(deserialize_with = "de::list")]
    pub timetable_dates: Vec<String>,
    #[serde(deserialize_with = "de::list")]
    pub periods: Vec<PeriodTimes>,
    #[serde(deserialize_with = "de::opt_string")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub end_date: Option<String>,
}

impl fmt::Display for TimetablePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} P{}: {} in {}",
            self.date.as_deref().unwrap_or("?"),
            self.period_number
                .as_ref()
                .map(PeriodNumber::as_str)
                .unwrap_or("?"),
            self.lesson_name.as_deref().unwrap_or("?"),
            self.room_name.as_deref().unwrap_or("?")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_period_number_from_number_or_string() {
        let a: TimetablePeriod = serde_json::from_value(json!({"period_number": 5})).unwrap();
        let b: TimetablePeriod = serde_json::from_value(json!({"period_number": "5"})).unwrap();
        assert_eq!(a.period_number, b.period_number);
        assert_eq!(a.period_number, Some(PeriodNumber::new("5")));
        assert_eq!(a.start_time, None);
    }

    #[test]
    fn test_meta_periods() {
        let meta: TimetableMeta = serde_json::from_value(json!({
            "timetable_dates": ["2024-05-01", "2024-05-02"],
            "periods": [{"number": "1", "start_time": "09:00", "end_time": "10:00"}]
        }))
        .unwrap();
        assert_eq!(meta.timetable_dates.len(), 2);
        assert_eq!(meta.periods[0].number.as_str(), "1");
        assert_eq!(meta.periods[0].start_time.as_deref(), Some("09:00"));
        assert!(meta.dates.is_empty());
    }
}
