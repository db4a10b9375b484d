//! One assembler per report type.
//!
//! Each module separates the fetch (talking to the [`Session`]) from a pure
//! transformation of records into table rows and summary values, and from
//! the final write to an output stream.
//!
//! [`Session`]: crate::client::Session

pub mod activity;
pub mod announcements;
pub mod attendance;
pub mod detentions;
pub mod homework;
pub mod passthrough;
pub mod pupils;
pub mod timetable;

use crate::error::{ClassChartsError, Result};
use chrono::{Duration, NaiveDate};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Default look-back window for dated reports.
pub const DEFAULT_DAYS: u32 = 30;

/// An inclusive `from`..`to` date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// The `days` days leading up to and including `today`.
    ///
    /// Fails when the window would start before the earliest date chrono
    /// can represent.
    pub fn last_days(days: u32, today: NaiveDate) -> Result<Self> {
        let from = today
            .checked_sub_signed(Duration::days(i64::from(days)))
            .ok_or_else(|| {
                ClassChartsError::precondition(format!(
                    "--days {days} reaches before the earliest representable date"
                ))
            })?;
        Ok(Self { from, to: today })
    }

    /// `from`/`to` query parameters in `YYYY-MM-DD` form.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![("from", self.from.to_string()), ("to", self.to.to_string())]
    }
}

/// Deserializes a list payload; `null` (and the PHP-style `{}`) means no records.
pub(crate) fn records<T: DeserializeOwned>(data: Value) -> Result<Vec<T>> {
    match data {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) if map.is_empty() => Ok(Vec::new()),
        other => Ok(serde_json::from_value(other)?),
    }
}
