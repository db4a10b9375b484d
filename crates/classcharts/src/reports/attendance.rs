//! Attendance tallies over a date window.

use super::DateRange;
use crate::client::{Session, Transport};
use crate::error::{ClassChartsError, Result};
use crate::models::{AttendanceDays, AttendanceMeta, AttendanceRecord, AttendanceStatus};
use crate::render::cell;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::{debug, info};

/// Raw attendance response: per-date slots plus the range metadata.
#[derive(Debug, Clone, Default)]
pub struct AttendanceResponse {
    pub days: AttendanceDays,
    pub meta: AttendanceMeta,
}

/// Slot counts per status, plus minutes late across `late` slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceTally {
    counts: BTreeMap<AttendanceStatus, u32>,
    pub minutes_late: u64,
}

impl AttendanceTally {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let mut tally = Self::default();
        for record in records {
            *tally.counts.entry(record.status).or_insert(0) += 1;
            if record.status == AttendanceStatus::Late {
                tally.minutes_late += record.late_minutes;
            }
        }
        tally
    }

    pub fn count(&self, status: AttendanceStatus) -> u32 {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    /// Every counted slot, whatever its status.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

pub fn fetch<T: Transport>(
    session: &mut Session<T>,
    student_id: u64,
    range: DateRange,
) -> Result<AttendanceResponse> {
    let response = session.get("attendance", Some(student_id), &range.query())?;

    let meta: AttendanceMeta = serde_json::from_value(response.meta)?;
    let days: AttendanceDays = match response.data {
        Value::Null => AttendanceDays::new(),
        Value::Array(items) if items.is_empty() => AttendanceDays::new(),
        data => serde_json::from_value(data)?,
    };
    info!(student_id, dates = meta.dates.len(), "Fetched attendance");

    Ok(AttendanceResponse { days, meta })
}

/// One validated record per (date, slot), dates in `meta.dates` order.
///
/// A date listed in the metadata but missing from the data, or a status
/// outside the known vocabulary, is an error.
pub fn flatten(response: &AttendanceResponse) -> Result<Vec<AttendanceRecord>> {
    let mut records = Vec::new();

    for date in &response.meta.dates {
        let slots = response.days.get(date).ok_or_else(|| {
            ClassChartsError::data_shape(format!("no attendance data for listed date {date}"))
        })?;

        for (slot, mark) in &slots.0 {
            let raw = mark.status.as_deref().ok_or_else(|| {
                ClassChartsError::data_shape(format!("attendance for {date} {slot} has no status"))
            })?;
            let status = raw.parse::<AttendanceStatus>().map_err(|_| {
                ClassChartsError::data_shape(format!(
                    "attendance for {date} {slot} has unknown status `{raw}`"
                ))
            })?;

            let late_minutes = match mark.late_minutes.as_deref().map(str::trim) {
                None => 0,
                Some(raw) => match raw.parse::<u64>() {
                    Ok(minutes) => minutes,
                    Err(_) if status == AttendanceStatus::Late => {
                        return Err(ClassChartsError::data_shape(format!(
                            "attendance for {date} {slot} has unreadable late_minutes `{raw}`"
                        )))
                    }
                    // only late slots count towards minutes late
                    Err(_) => 0,
                },
            };

            records.push(AttendanceRecord {
                date: *date,
                slot: slot.clone(),
                code: mark.code.clone(),
                status,
                late_minutes,
            });
        }
    }

    debug!(records = records.len(), "Flattened attendance");
    Ok(records)
}

/// Prints the range, the per-status totals and the percentages.
pub fn write<W: Write>(response: &AttendanceResponse, out: &mut W) -> Result<()> {
    let records = flatten(response)?;
    let tally = AttendanceTally::from_records(&records);
    let meta = &response.meta;

    writeln!(
        out,
        "Attendance data for range: {}-{}",
        date_part(&meta.start_date),
        date_part(&meta.end_date)
    )?;
    writeln!(out)?;
    writeln!(out, "Total days present: {}", tally.count(AttendanceStatus::Present))?;
    writeln!(out, "Total days absent: {}", tally.count(AttendanceStatus::Absent))?;
    writeln!(out, "Total days excused: {}", tally.count(AttendanceStatus::Excused))?;
    writeln!(out, "Total days ignored: {}", tally.count(AttendanceStatus::Ignore))?;
    writeln!(out, "Total days late: {}", tally.count(AttendanceStatus::Late))?;
    if tally.minutes_late > 0 {
        writeln!(out, "Total minutes late: {}", tally.minutes_late)?;
    }
    writeln!(out, "Total days: {}", tally.total())?;
    writeln!(out)?;
    writeln!(
        out,
        "Percentage attendance of date range: {}%",
        cell(&meta.percentage)
    )?;
    writeln!(
        out,
        "Percentage attendance since August: {}%",
        cell(&meta.percentage_since_august)
    )?;
    writeln!(out)?;
    Ok(())
}

/// "2024-05-01T00:00:00+00:00" -> "2024-05-01"
fn date_part(timestamp: &Option<String>) -> &str {
    timestamp
        .as_deref()
        .and_then(|t| t.split('T').next())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(data: Value, dates: &[&str]) -> AttendanceResponse {
        AttendanceResponse {
            days: serde_json::from_value(data).unwrap(),
            meta: serde_json::from_value(json!({
                "dates": dates,
                "start_date": "2024-05-01T00:00:00+01:00",
                "end_date": "2024-05-02T00:00:00+01:00",
                "percentage": "75",
                "percentage_singe_august": "96.1"
            }))
            .unwrap(),
        }
    }

    #[test]
    fn test_tally_statuses_and_minutes() {
        let response = response(
            json!({
                "2024-05-01": {
                    "AM": {"code": "L", "status": "late", "late_minutes": 10},
                    "PM": {"code": "L", "status": "late", "late_minutes": "5"}
                },
                "2024-05-02": {
                    "AM": {"code": "/", "status": "present", "late_minutes": 0},
                    "PM": {"code": "N", "status": "absent"}
                }
            }),
            &["2024-05-01", "2024-05-02"],
        );

        let records = flatten(&response).unwrap();
        let tally = AttendanceTally::from_records(&records);

        assert_eq!(records.len(), 4);
        assert_eq!(tally.count(AttendanceStatus::Late), 2);
        assert_eq!(tally.count(AttendanceStatus::Present), 1);
        assert_eq!(tally.count(AttendanceStatus::Absent), 1);
        assert_eq!(tally.count(AttendanceStatus::Excused), 0);
        assert_eq!(tally.minutes_late, 15);
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn test_minutes_only_count_when_late() {
        let response = response(
            json!({"2024-05-01": {"AM": {"status": "present", "late_minutes": 12}}}),
            &["2024-05-01"],
        );
        let tally = AttendanceTally::from_records(&flatten(&response).unwrap());
        assert_eq!(tally.minutes_late, 0);
    }

    #[test]
    fn test_unknown_status_is_error() {
        let response = response(
            json!({"2024-05-01": {"AM": {"status": "holiday"}}}),
            &["2024-05-01"],
        );
        let err = flatten(&response).unwrap_err();
        assert!(matches!(err, ClassChartsError::DataShape { .. }));
    }

    #[test]
    fn test_unreadable_late_minutes_is_error() {
        let response = response(
            json!({"2024-05-01": {"AM": {"status": "late", "late_minutes": "ten"}}}),
            &["2024-05-01"],
        );
        let err = flatten(&response).unwrap_err();
        assert!(matches!(err, ClassChartsError::DataShape { .. }));
        assert!(err.to_string().contains("`ten`"));
    }

    #[test]
    fn test_unreadable_minutes_ignored_when_not_late() {
        let response = response(
            json!({"2024-05-01": {"AM": {"status": "present", "late_minutes": "n/a"}}}),
            &["2024-05-01"],
        );
        let records = flatten(&response).unwrap();
        assert_eq!(records[0].late_minutes, 0);
    }

    #[test]
    fn test_listed_date_missing_is_error() {
        let response = response(json!({}), &["2024-05-01"]);
        assert!(flatten(&response).is_err());
    }

    #[test]
    fn test_summary_omits_zero_minutes_line() {
        let response = response(
            json!({"2024-05-01": {"AM": {"status": "present"}, "PM": {"status": "present"}}}),
            &["2024-05-01"],
        );

        let mut out = Vec::new();
        write(&response, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Attendance data for range: 2024-05-01-2024-05-02\n"));
        assert!(text.contains("Total days present: 2\n"));
        assert!(text.contains("Total days: 2\n"));
        assert!(!text.contains("minutes late"));
        assert!(text.contains("Percentage attendance since August: 96.1%"));
    }
}
