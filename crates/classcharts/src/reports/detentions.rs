//! Detentions, as a text table or a CSV file.

use crate::client::{Session, Transport};
use crate::error::Result;
use crate::models::Detention;
use crate::render::{cell, Table};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const CSV_FILE: &str = "detentions.csv";

/// Shown for a missing lesson, teacher or detention type.
pub const PLACEHOLDER: &str = "N/A";

const HEADER: [&str; 8] = [
    "Date", "Time", "Length", "Location", "Lesson", "Type", "Teacher", "Notes",
];

/// One output row. Field order and names match [`HEADER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetentionRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Length")]
    pub length: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Lesson")]
    pub lesson: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Teacher")]
    pub teacher: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl From<&Detention> for DetentionRow {
    fn from(detention: &Detention) -> Self {
        Self {
            date: cell(&detention.date),
            time: cell(&detention.time),
            length: cell(&detention.length),
            location: cell(&detention.location),
            lesson: or_placeholder(detention.lesson.as_ref().map(ToString::to_string)),
            kind: or_placeholder(detention.detention_type.as_ref().and_then(|t| t.name.clone())),
            teacher: or_placeholder(detention.teacher.as_ref().map(ToString::to_string)),
            notes: cell(&detention.notes),
        }
    }
}

fn or_placeholder(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn fetch<T: Transport>(session: &mut Session<T>, student_id: u64) -> Result<Vec<Detention>> {
    let response = session.get("detentions", Some(student_id), &[])?;
    let detentions: Vec<Detention> = super::records(response.data)?;
    info!(student_id, count = detentions.len(), "Fetched detentions");
    Ok(detentions)
}

pub fn table(detentions: &[Detention]) -> Table {
    let mut table = Table::new(HEADER);
    for row in detentions.iter().map(DetentionRow::from) {
        table.push_row([
            row.date,
            row.time,
            row.length,
            row.location,
            row.lesson,
            row.kind,
            row.teacher,
            row.notes,
        ]);
    }
    table
}

/// Serializes the rows as CSV, header first.
pub fn write_csv<W: Write>(detentions: &[Detention], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    if detentions.is_empty() {
        writer.write_record(HEADER)?;
    }
    for detention in detentions {
        writer.serialize(DetentionRow::from(detention))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `detentions.csv`-style output to `path`.
pub fn save_csv(detentions: &[Detention], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(detentions, file)
}

/// Writes either the CSV file or the text table, never both.
pub fn write<W: Write>(detentions: &[Detention], csv_path: Option<&Path>, out: &mut W) -> Result<()> {
    match csv_path {
        Some(path) => {
            save_csv(detentions, path)?;
            writeln!(out, "Detentions saved to {}", path.display())?;
        }
        None => {
            table(detentions).write_to(out)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
