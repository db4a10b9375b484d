//! Behaviour activity over a date window, paginated by id.

use super::DateRange;
use crate::client::{Session, Transport};
use crate::error::Result;
use crate::models::Activity;
use crate::pagination;
use crate::render::{cell, Table};
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const CSV_FILE: &str = "activity.csv";

const HEADER: [&str; 9] = [
    "ID",
    "Timestamp",
    "Type",
    "Polarity",
    "Reason",
    "Score",
    "Lesson Name",
    "Teacher",
    "Notes",
];

/// Where the activity report goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output<'a> {
    Table,
    Csv(&'a Path),
}

/// Reads every activity entry in `range`, following the `last_id` cursor.
pub fn fetch<T: Transport>(
    session: &mut Session<T>,
    student_id: u64,
    range: DateRange,
) -> Result<Vec<Activity>> {
    let activities = pagination::fetch_paginated(session, "activity", student_id, &range.query())?;
    info!(student_id, count = activities.len(), "Fetched activity");
    Ok(activities)
}

pub fn table(activities: &[Activity]) -> Table {
    let mut table = Table::new(HEADER);
    for activity in activities {
        table.push_row([
            cell(&activity.id),
            cell(&activity.timestamp),
            cell(&activity.kind),
            cell(&activity.polarity),
            cell(&activity.reason),
            cell(&activity.score),
            cell(&activity.lesson_name),
            cell(&activity.teacher_name),
            cell(&activity.note),
        ]);
    }
    table
}

/// Writes either the CSV file or the text table, never both.
pub fn write<W: Write>(activities: &[Activity], output: Output<'_>, out: &mut W) -> Result<()> {
    let table = table(activities);
    match output {
        Output::Csv(path) => {
            table.save_csv(path)?;
            writeln!(out, "Activity saved to {}", path.display())?;
        }
        Output::Table => {
            table.write_to(out)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
