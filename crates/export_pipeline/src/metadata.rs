//! PDF document metadata derived from the field record

use crate::ExportConfig;
use chrono::{DateTime, Utc};
use cover_model::{CoverPageInfo, FieldName};
use store::pdf::PdfExportOptions;

pub fn document_title(info: &CoverPageInfo) -> String {
    format!(
        "Assignment Cover - {}",
        info.get_or(FieldName::CourseName, "Course")
    )
}

pub fn document_subject(info: &CoverPageInfo) -> String {
    format!(
        "Assignment {} Cover Page",
        info.get(FieldName::AssignmentNumber)
    )
}

pub fn document_author(info: &CoverPageInfo) -> String {
    info.get_or(FieldName::StudentName, "Student").to_string()
}

/// Export options carrying the record's metadata, stamped at `now`
pub fn pdf_options(
    info: &CoverPageInfo,
    config: &ExportConfig,
    now: DateTime<Utc>,
) -> PdfExportOptions {
    PdfExportOptions::new()
        .with_title(document_title(info))
        .with_subject(document_subject(info))
        .with_author(document_author(info))
        .with_creator(config.creator.clone())
        .with_creation_date(now)
        .with_compression(config.compress)
}
