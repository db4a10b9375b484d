//! Detentions and their nested lesson/teacher/type records.

use super::de;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Detention {
    #[serde(deserialize_with = "de::opt_u64")]
    pub id: Option<u64>,
    /// "yes", "no", "pending" or "upscaled"
    #[serde(deserialize_with = "de::opt_string")]
    pub attended: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub time: Option<String>,
    /// Minutes
    #[serde(deserialize_with = "de::opt_string")]
    pub length: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub notes: Option<String>,
    #[serde(deserialize_with = "de::opt_record")]
    pub lesson: Option<DetentionLesson>,
    #[serde(deserialize_with = "de::opt_record")]
    pub teacher: Option<DetentionTeacher>,
    #[serde(deserialize_with = "de::opt_record")]
    pub detention_type: Option<DetentionType>,
    #[serde(deserialize_with = "de::opt_record")]
    pub lesson_pupil_behaviour: Option<LessonPupilBehaviour>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetentionLesson {
    #[serde(deserialize_with = "de::opt_u64")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "de::opt_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "de::opt_record")]
    pub subject: Option<DetentionSubject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetentionSubject {
    #[serde(deserialize_with = "de::opt_u64")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "de::opt_string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetentionTeacher {
    #[serde(deserialize_with = "de::opt_u64")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "de::opt_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetentionType {
    #[serde(deserialize_with = "de::opt_string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LessonPupilBehaviour {
    #[serde(deserialize_with = "de::opt_string")]
    pub reason: Option<String>,
}

impl fmt::Display for DetentionTeacher {
    /// "Mr Ada Lovelace", skipping whichever parts are missing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [&self.title, &self.first_name, &self.last_name]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .collect();
        f.write_str(&parts.join(" "))
    }
}

impl fmt::Display for DetentionLesson {
    /// "Lesson name (Subject)", or whichever half is present.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = self.subject.as_ref().and_then(|s| s.name.as_deref());
        match (self.name.as_deref(), subject) {
            (Some(name), Some(subject)) => write!(f, "{name} ({subject})"),
            (Some(only), None) | (None, Some(only)) => f.write_str(only),
            (None, None) => Ok(()),
        }
    }
}

impl fmt::Display for Detention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.date.as_deref().unwrap_or("?"),
            self.time.as_deref().unwrap_or(""),
            self.attended.as_deref().unwrap_or("pending")
        )
    }
}
