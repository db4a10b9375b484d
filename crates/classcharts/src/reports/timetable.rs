//! Timetable for the week around a date.

use crate::client::{Session, Transport};
use crate::error::Result;
use crate::models::{PeriodNumber, PeriodTimes, TimetableMeta, TimetablePeriod};
use crate::render::{cell, Table};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::{debug, info};

/// Lessons after this period are set apart from the morning ones.
const SPLIT_AFTER_PERIOD: &str = "5";

/// One day's lessons with that day's period timings.
#[derive(Debug, Clone, Default)]
pub struct TimetableDay {
    pub date: String,
    pub lessons: Vec<TimetablePeriod>,
    pub periods: Vec<PeriodTimes>,
}

/// Reads the dates listed around `anchor`, then each date in turn.
pub fn fetch<T: Transport>(
    session: &mut Session<T>,
    student_id: u64,
    anchor: NaiveDate,
) -> Result<Vec<TimetableDay>> {
    let response = session.get(
        "timetable",
        Some(student_id),
        &[("date", anchor.to_string())],
    )?;
    let meta: TimetableMeta = serde_json::from_value(response.meta)?;
    debug!(anchor = %anchor, dates = ?meta.timetable_dates, "Timetable dates");

    let mut days = Vec::with_capacity(meta.timetable_dates.len());
    for date in meta.timetable_dates {
        let response = session.get("timetable", Some(student_id), &[("date", date.clone())])?;
        let day_meta: TimetableMeta = serde_json::from_value(response.meta)?;
        let lessons: Vec<TimetablePeriod> = super::records(response.data)?;
        days.push(TimetableDay {
            date,
            lessons,
            periods: day_meta.periods,
        });
    }

    info!(student_id, days = days.len(), "Fetched timetable");
    Ok(days)
}

/// Period timings keyed by period number.
pub fn period_times(periods: &[PeriodTimes]) -> BTreeMap<PeriodNumber, &PeriodTimes> {
    periods.iter().map(|p| (p.number.clone(), p)).collect()
}

/// Fills a lesson's start/end from the day's period table.
///
/// A lesson whose period is in the table takes the table's times, which
/// are the short `HH:MM` form; otherwise its own times are kept.
pub fn backfill(lesson: &mut TimetablePeriod, times: &BTreeMap<PeriodNumber, &PeriodTimes>) {
    let Some(period) = lesson.period_number.as_ref().and_then(|n| times.get(n)) else {
        return;
    };
    if period.start_time.is_some() {
        lesson.start_time = period.start_time.clone();
    }
    if period.end_time.is_some() {
        lesson.end_time = period.end_time.clone();
    }
}

pub fn table(days: Vec<TimetableDay>) -> Table {
    let mut table = Table::new([
        "Date",
        "Teacher",
        "Lesson Name",
        "Subject",
        "Period Number",
        "Room Name",
        "Start Time",
        "End Time",
    ]);
    table.push_separator();

    for day in days {
        let times = period_times(&day.periods);
        for mut lesson in day.lessons {
            backfill(&mut lesson, &times);
            table.push_row([
                lesson.date.clone().unwrap_or_else(|| day.date.clone()),
                cell(&lesson.teacher_name),
                cell(&lesson.lesson_name),
                cell(&lesson.subject_name),
                cell(&lesson.period_number),
                cell(&lesson.room_name),
                cell(&lesson.start_time),
                cell(&lesson.end_time),
            ]);
            if lesson.period_number.as_ref().map(PeriodNumber::as_str) == Some(SPLIT_AFTER_PERIOD) {
                table.push_separator();
            }
        }
    }
    table
}

pub fn write<W: Write>(days: Vec<TimetableDay>, out: &mut W) -> Result<()> {
    table(days).write_to(out)?;
    writeln!(out)?;
    Ok(())
}
