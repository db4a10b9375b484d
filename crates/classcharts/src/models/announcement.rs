//! School announcements.

use super::de;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Announcement {
    #[serde(deserialize_with = "de::opt_u64")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "de::opt_string")]
    pub title: Option<String>,
    /// Rich text (HTML)
    #[serde(deserialize_with = "de::opt_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub school_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub teacher_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub timestamp: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub sticky: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub priority_pinned: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub requires_consent: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub can_change_consent: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub allow_comments: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub allow_reactions: Option<bool>,
    #[serde(deserialize_with = "de::opt_bool")]
    pub allow_consent: Option<bool>,
    #[serde(deserialize_with = "de::list")]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Attachment {
    #[serde(deserialize_with = "de::opt_string")]
    pub filename: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub url: Option<String>,
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.title.as_deref().unwrap_or("Untitled"),
            self.teacher_name.as_deref().unwrap_or("unknown sender")
        )
    }
}
