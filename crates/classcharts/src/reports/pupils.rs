//! Listing and choosing the pupil a run is scoped to.

use crate::client::{Session, Transport};
use crate::error::{ClassChartsError, Result};
use crate::models::Student;
use crate::render::cell;
use std::io::Write;
use tracing::info;

/// The pupil every report in this run is fetched for.
#[derive(Debug, Clone)]
pub struct SelectedPupil {
    pub id: u64,
    pub student: Student,
}

pub fn fetch<T: Transport>(session: &mut Session<T>) -> Result<Vec<Student>> {
    let response = session.get("pupils", None, &[])?;
    let pupils: Vec<Student> = super::records(response.data)?;
    info!(count = pupils.len(), "Fetched pupils");
    Ok(pupils)
}

/// Picks the pupil to report on.
///
/// A lone pupil is chosen without asking. With several, `choice` (1-based)
/// is used when given, otherwise `prompt` is asked for a 1-based number.
pub fn select<F>(pupils: Vec<Student>, choice: Option<usize>, prompt: F) -> Result<SelectedPupil>
where
    F: FnOnce(&[Student]) -> Result<usize>,
{
    let number = match (pupils.len(), choice) {
        (0, _) => {
            return Err(ClassChartsError::precondition(
                "no pupils are linked to this account",
            ))
        }
        (1, None) => 1,
        (_, Some(number)) => number,
        (_, None) => prompt(&pupils)?,
    };

    let count = pupils.len();
    let student = number
        .checked_sub(1)
        .and_then(|index| pupils.into_iter().nth(index))
        .ok_or_else(|| {
            ClassChartsError::precondition(format!(
                "there is no pupil {number} (found {count})"
            ))
        })?;
    let id = student.id.ok_or_else(|| {
        ClassChartsError::data_shape(format!("pupil {student} has no id"))
    })?;

    Ok(SelectedPupil { id, student })
}

/// "Ada Lovelace (Hill School)", as shown in the selection prompt.
pub fn label(student: &Student) -> String {
    format!("{} ({})", student, cell(&student.school_name))
}

/// Lists every pupil with the tallies the school shows for them.
pub fn write_list<W: Write>(pupils: &[Student], out: &mut W) -> Result<()> {
    const HEADING: &str = "Listing all pupils for this account...";
    writeln!(out, "{HEADING}")?;

    for student in pupils {
        writeln!(out, "{}", "-".repeat(HEADING.len()))?;
        writeln!(out)?;
        writeln!(
            out,
            "Name: {} ({} - {})",
            student,
            cell(&student.school_name),
            cell(&student.id)
        )?;
        if student.shows_homework() {
            writeln!(
                out,
                "Homework: submitted: {}, to do: {}, excused: {}, late: {}, completed: {}, not completed: {}",
                cell(&student.homework_submitted_count),
                cell(&student.homework_todo_count),
                cell(&student.homework_excused_count),
                cell(&student.homework_late_count),
                cell(&student.homework_completed_count),
                cell(&student.homework_not_completed_count)
            )?;
        }
        if student.shows_detentions() {
            writeln!(
                out,
                "Detentions pending: {} (total this term: {})",
                cell(&student.detention_pending_count),
                cell(&student.detention_yes_count)
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}
