//! Reports printed as the API returns them.

use super::DateRange;
use crate::client::{ApiResponse, Session, Transport};
use crate::error::Result;
use std::io::Write;
use tracing::info;

/// Endpoints without a dedicated record model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassThrough {
    AcademicReport,
    Badges,
    Behaviour(DateRange),
    Classes,
    CustomFields,
}

impl PassThrough {
    pub fn endpoint(&self) -> &'static str {
        match self {
            PassThrough::AcademicReport => "getacademicreport",
            PassThrough::Badges => "eventbadges",
            PassThrough::Behaviour(_) => "behaviour",
            PassThrough::Classes => "classes",
            PassThrough::CustomFields => "customfields",
        }
    }

    /// Human name used in headings and "not found" messages.
    pub fn label(&self) -> &'static str {
        match self {
            PassThrough::AcademicReport => "Academic report",
            PassThrough::Badges => "Badges",
            PassThrough::Behaviour(_) => "Behaviour",
            PassThrough::Classes => "Classes",
            PassThrough::CustomFields => "Custom fields",
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            PassThrough::Behaviour(range) => range.query(),
            _ => Vec::new(),
        }
    }
}

pub fn fetch<T: Transport>(
    session: &mut Session<T>,
    student_id: u64,
    report: PassThrough,
) -> Result<ApiResponse> {
    let response = session.get(report.endpoint(), Some(student_id), &report.query())?;
    info!(student_id, endpoint = report.endpoint(), "Fetched report");
    Ok(response)
}

/// Pretty-prints `data`, or says nothing was found.
pub fn write<W: Write>(report: PassThrough, response: &ApiResponse, out: &mut W) -> Result<()> {
    if response.data_is_empty() {
        writeln!(out, "No {} found.", report.label().to_lowercase())?;
        return Ok(());
    }
    writeln!(out, "{}:", report.label())?;
    writeln!(out, "{}", serde_json::to_string_pretty(&response.data)?)?;
    Ok(())
}
