//! Behaviour activity entries.

use super::de;
use serde::Deserialize;
use std::fmt;

/// A single behaviour point awarded to (or taken from) a pupil.
///
/// Entries arrive ordered by ascending `id`, which is what the activity
/// endpoint paginates on.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Activity {
    #[serde(deserialize_with = "de::opt_u64")]
    pub id: Option<u64>,
    #[serde(rename = "type", deserialize_with = "de::opt_string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub polarity: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub reason: Option<String>,
    #[serde(deserialize_with = "de::opt_i64")]
    pub score: Option<i64>,
    #[serde(deserialize_with = "de::opt_string")]
    pub timestamp: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub timestamp_custom_time: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub pupil_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub lesson_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub teacher_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub room_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub note: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub detention_date: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub detention_time: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub detention_location: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub detention_type: Option<String>,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {}",
            self.reason.as_deref().unwrap_or("Unspecified"),
            self.polarity.as_deref().unwrap_or("?"),
            self.score.map(|s| s.to_string()).unwrap_or_default()
        )
    }
}
