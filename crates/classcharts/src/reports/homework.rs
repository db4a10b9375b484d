//! Homework list and single-assignment detail.

use super::DateRange;
use crate::client::{Session, Transport};
use crate::error::{ClassChartsError, Result};
use crate::models::Homework;
use crate::render::{cell, Table};
use crate::text::html_to_text;
use serde_json::Value;
use std::fmt;
use std::io::Write;
use tracing::info;

/// Which date the API filters the window on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DisplayDate {
    #[default]
    #[value(name = "issue_date")]
    IssueDate,
    #[value(name = "due_date")]
    DueDate,
}

impl DisplayDate {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayDate::IssueDate => "issue_date",
            DisplayDate::DueDate => "due_date",
        }
    }
}

/// This week's tallies from the response `meta`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekSummary {
    pub due: Option<u64>,
    pub completed: Option<u64>,
    pub outstanding: Option<u64>,
}

impl WeekSummary {
    pub fn from_meta(meta: &Value) -> Self {
        let count = |key: &str| meta.get(key).and_then(|v| match v {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        });
        Self {
            due: count("this_week_due_count"),
            completed: count("this_week_completed_count"),
            outstanding: count("this_week_outstanding_count"),
        }
    }
}

/// Fetched homework plus the weekly tallies.
#[derive(Debug, Clone, Default)]
pub struct HomeworkList {
    pub assignments: Vec<Homework>,
    pub summary: WeekSummary,
}

pub fn fetch<T: Transport>(
    session: &mut Session<T>,
    student_id: u64,
    range: DateRange,
    display_date: DisplayDate,
) -> Result<HomeworkList> {
    let mut query = vec![("display_date", display_date.as_str().to_string())];
    query.extend(range.query());

    let response = session.get("homeworks", Some(student_id), &query)?;
    let summary = WeekSummary::from_meta(&response.meta);
    let assignments: Vec<Homework> = super::records(response.data)?;
    info!(student_id, count = assignments.len(), "Fetched homework");

    Ok(HomeworkList {
        assignments,
        summary,
    })
}

/// Keeps entries typed "Homework" and orders them by due date.
///
/// The sort is stable, so assignments due the same day keep the API's
/// order; entries without a due date go last.
pub fn arrange(assignments: Vec<Homework>) -> Vec<Homework> {
    let mut homework: Vec<Homework> = assignments.into_iter().filter(Homework::is_homework).collect();
    homework.sort_by(|a, b| match (&a.due_date, &b.due_date) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    homework
}

/// Numbered table of already-arranged assignments.
pub fn table(homework: &[Homework]) -> Table {
    let mut table = Table::new([
        "Number",
        "Title",
        "Subject",
        "Lesson",
        "Teacher",
        "Due Date",
        "Estimated Completion Time",
        "Status",
    ]);
    for (number, hw) in homework.iter().enumerate() {
        table.push_row([
            (number + 1).to_string(),
            cell(&hw.title),
            cell(&hw.subject),
            cell(&hw.lesson),
            cell(&hw.teacher),
            cell(&hw.due_date),
            hw.estimated_time(),
            hw.state().unwrap_or_default().to_string(),
        ]);
    }
    table
}

/// Full view of one assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkDetail {
    pub number: usize,
    pub title: String,
    pub subject: String,
    pub lesson: String,
    pub teacher: String,
    pub due_date: String,
    pub estimated_time: String,
    pub status: String,
    pub description: String,
}

/// Picks assignment `number` (1-based) from the arranged list.
pub fn detail(homework: &[Homework], number: usize) -> Result<HomeworkDetail> {
    let hw = number
        .checked_sub(1)
        .and_then(|index| homework.get(index))
        .ok_or_else(|| {
            ClassChartsError::precondition(format!(
                "there is no homework assignment {number} (found {})",
                homework.len()
            ))
        })?;

    Ok(HomeworkDetail {
        number,
        title: cell(&hw.title),
        subject: cell(&hw.subject),
        lesson: cell(&hw.lesson),
        teacher: cell(&hw.teacher),
        due_date: cell(&hw.due_date),
        estimated_time: hw.estimated_time(),
        status: hw.state().unwrap_or_default().to_string(),
        description: hw
            .description
            .as_deref()
            .map(html_to_text)
            .unwrap_or_default(),
    })
}

impl fmt::Display for HomeworkDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Selected homework assignment: {}", self.number)?;
        writeln!(f)?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Subject: {}", self.subject)?;
        writeln!(f, "Lesson: {}", self.lesson)?;
        writeln!(f, "Teacher: {}", self.teacher)?;
        writeln!(f, "Due Date: {}", self.due_date)?;
        writeln!(f, "Estimated Completion Time: {}", self.estimated_time)?;
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "Description: {}", self.description)
    }
}

/// Prints the detail view when `number` is set, else the table and tallies.
pub fn write<W: Write>(list: HomeworkList, number: Option<usize>, out: &mut W) -> Result<()> {
    let homework = arrange(list.assignments);

    if let Some(number) = number {
        let detail = detail(&homework, number)?;
        write!(out, "{detail}")?;
        return Ok(());
    }

    table(&homework).write_to(out)?;
    writeln!(out)?;
    writeln!(out, "Assignments due this week: {}", cell(&list.summary.due))?;
    writeln!(
        out,
        "Assignments completed this week: {}",
        cell(&list.summary.completed)
    )?;
    writeln!(
        out,
        "Assignments outstanding this week: {}",
        cell(&list.summary.outstanding)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<Homework> {
        serde_json::from_value(json!([
            {"id": 1, "homework_type": "Homework", "title": "C", "due_date": "2024-05-03"},
            {"id": 2, "homework_type": "Homework", "title": "A", "due_date": "2024-05-01",
             "completion_time_value": "20", "completion_time_unit": "minutes"},
            {"id": 3, "homework_type": "Classwork", "title": "X", "due_date": "2024-04-01"},
            {"id": 4, "homework_type": "Homework", "title": "B", "due_date": "2024-05-02",
             "description": "<p>Read <b>pages 4-6</b></p>", "status": {"state": "completed"}}
        ]))
        .unwrap()
    }

    #[test]
    fn test_filters_and_sorts_by_due_date() {
        let homework = arrange(sample());
        let due: Vec<_> = homework.iter().map(|h| h.due_date.as_deref().unwrap()).collect();
        assert_eq!(due, vec!["2024-05-01", "2024-05-02", "2024-05-03"]);
    }

    #[test]
    fn test_detail_indexes_sorted_list() {
        let homework = arrange(sample());
        let detail = detail(&homework, 2).unwrap();
        assert_eq!(detail.title, "B");
        assert_eq!(detail.due_date, "2024-05-02");
        assert_eq!(detail.status, "completed");
        assert_eq!(detail.description, "Read pages 4-6");
        assert_eq!(detail.estimated_time, "n/a");
    }

    #[test]
    fn test_detail_out_of_range() {
        let homework = arrange(sample());
        for number in [0, 4] {
            let err = detail(&homework, number).unwrap_err();
            assert!(matches!(err, ClassChartsError::Precondition { .. }));
        }
    }

    #[test]
    fn test_table_rows() {
        let homework = arrange(sample());
        let table = table(&homework);
        assert_eq!(table.body().len(), 3);
        assert_eq!(table.body()[0][0], "1");
        assert_eq!(table.body()[0][6], "20 minutes");
        assert_eq!(table.body()[1][6], "n/a");
    }

    #[test]
    fn test_week_summary_from_meta() {
        let summary = WeekSummary::from_meta(&json!({
            "this_week_due_count": 4,
            "this_week_completed_count": "1",
        }));
        assert_eq!(summary.due, Some(4));
        assert_eq!(summary.completed, Some(1));
        assert_eq!(summary.outstanding, None);
    }
}
