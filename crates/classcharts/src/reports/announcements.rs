//! School announcements.

use crate::client::{Session, Transport};
use crate::error::Result;
use crate::models::Announcement;
use crate::render::cell;
use crate::text::html_to_text;
use std::io::Write;
use tracing::info;

pub fn fetch<T: Transport>(
    session: &mut Session<T>,
    student_id: u64,
) -> Result<Vec<Announcement>> {
    let response = session.get("announcements", Some(student_id), &[])?;
    let announcements: Vec<Announcement> = super::records(response.data)?;
    info!(student_id, count = announcements.len(), "Fetched announcements");
    Ok(announcements)
}

pub fn write<W: Write>(announcements: &[Announcement], out: &mut W) -> Result<()> {
    if announcements.is_empty() {
        writeln!(out, "No announcements found.")?;
        return Ok(());
    }

    for announcement in announcements {
        let date_line = format!("Date: {}", cell(&announcement.timestamp));
        let rule = "-".repeat(date_line.chars().count());

        writeln!(
            out,
            "Title: {} ({})",
            cell(&announcement.title),
            cell(&announcement.teacher_name)
        )?;
        writeln!(out, "{date_line}")?;
        writeln!(
            out,
            "Requires consent: {}",
            announcement.requires_consent.unwrap_or(false)
        )?;
        writeln!(out, "{rule}")?;
        writeln!(
            out,
            "Description: {}",
            announcement
                .description
                .as_deref()
                .map(html_to_text)
                .unwrap_or_default()
        )?;
        writeln!(out, "{rule}")?;

        if announcement.attachments.is_empty() {
            writeln!(out, "Attachments: None")?;
        }
        for attachment in &announcement.attachments {
            writeln!(
                out,
                "Attachments - Filename: {}, URL: {}",
                cell(&attachment.filename),
                cell(&attachment.url)
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}
