//! Attendance marks and range summary.

use super::de;
use crate::error::{ClassChartsError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Closed vocabulary of attendance marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttendanceStatus {
    Yes,
    Present,
    Ignore,
    No,
    Absent,
    Excused,
    Late,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 7] = [
        AttendanceStatus::Yes,
        AttendanceStatus::Present,
        AttendanceStatus::Ignore,
        AttendanceStatus::No,
        AttendanceStatus::Absent,
        AttendanceStatus::Excused,
        AttendanceStatus::Late,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Yes => "yes",
            AttendanceStatus::Present => "present",
            AttendanceStatus::Ignore => "ignore",
            AttendanceStatus::No => "no",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Excused => "excused",
            AttendanceStatus::Late => "late",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = ClassChartsError;

    fn from_str(s: &str) -> Result<Self> {
        AttendanceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ClassChartsError::data_shape(format!("unknown attendance status `{s}`"))
            })
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registration slot (e.g. "AM", "PM") as sent by the API.
///
/// `status` and `late_minutes` are kept raw here and validated when the
/// day is flattened.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttendanceSlot {
    #[serde(deserialize_with = "de::opt_string")]
    pub code: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub status: Option<String>,
    /// Sent as a number or a numeric string
    #[serde(deserialize_with = "de::opt_string")]
    pub late_minutes: Option<String>,
}

/// All slots recorded for one date, keyed by slot name.
#[derive(Debug, Clone, Default)]
pub struct DaySlots(pub BTreeMap<String, AttendanceSlot>);

impl<'de> Deserialize<'de> for DaySlots {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // An empty day comes through as `[]` rather than `{}`
        let slots = match Value::deserialize(deserializer)? {
            Value::Object(map) => parse_slots(map.into_iter()),
            Value::Array(items) => parse_slots(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v)),
            ),
            Value::Null => Ok(BTreeMap::new()),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected attendance slots, got {other}"
                )))
            }
        };
        slots.map(DaySlots).map_err(serde::de::Error::custom)
    }
}

fn parse_slots<I>(entries: I) -> serde_json::Result<BTreeMap<String, AttendanceSlot>>
where
    I: Iterator<Item = (String, Value)>,
{
    entries
        .map(|(slot, v)| serde_json::from_value::<AttendanceSlot>(v).map(|mark| (slot, mark)))
        .collect()
}

/// Per-date attendance, as carried in the response `data`.
pub type AttendanceDays = BTreeMap<NaiveDate, DaySlots>;

/// The `meta` block of an attendance response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttendanceMeta {
    #[serde(deserialize_with = "de::list")]
    pub dates: Vec<NaiveDate>,
    #[serde(deserialize_with = "de::list")]
    pub sessions: Vec<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub percentage: Option<String>,
    /// The API spells this key `percentage_singe_august`
    #[serde(alias = "percentage_singe_august", deserialize_with = "de::opt_string")]
    pub percentage_since_august: Option<String>,
}

/// A validated mark for one (date, slot) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub slot: String,
    pub code: Option<String>,
    pub status: AttendanceStatus,
    pub late_minutes: u64,
}

impl fmt::Display for AttendanceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.date, self.slot, self.status)?;
        if self.status == AttendanceStatus::Late {
            write!(f, " ({} min)", self.late_minutes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_vocabulary() {
        assert_eq!("late".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Late);
        assert_eq!("yes".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Yes);

        let err = "tardy".parse::<AttendanceStatus>().unwrap_err();
        assert!(matches!(err, ClassChartsError::DataShape { .. }));
    }

    #[test]
    fn test_days_accept_empty_arrays() {
        let days: AttendanceDays = serde_json::from_value(json!({
            "2024-05-01": {"AM": {"code": "/", "status": "present", "late_minutes": 0}},
            "2024-05-04": []
        }))
        .unwrap();

        let may_first = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let may_fourth = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
        assert_eq!(days[&may_first].0["AM"].status.as_deref(), Some("present"));
        assert!(days[&may_fourth].0.is_empty());
    }

    #[test]
    fn test_meta_misspelt_key() {
        let meta: AttendanceMeta = serde_json::from_value(json!({
            "dates": ["2024-05-01"],
            "percentage": "96.5",
            "percentage_singe_august": 97
        }))
        .unwrap();
        assert_eq!(meta.percentage.as_deref(), Some("96.5"));
        assert_eq!(meta.percentage_since_august.as_deref(), Some("97"));
        assert_eq!(meta.dates.len(), 1);
    }
}
