//! Export filename derivation

use chrono::NaiveDate;
use cover_model::{CoverPageInfo, FieldName};

/// Replace every character outside `[A-Za-z0-9]` with `_`
pub fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Derive the PDF filename for a record exported on `date`:
/// `{student}_{course}_Assignment_{number}_Cover_{YYYY-MM-DD}.pdf`.
///
/// Student and course are sanitized; empty values fall back to
/// "Student", "Course" and "Assignment". The assignment number is used
/// as entered.
pub fn derive_filename(info: &CoverPageInfo, date: NaiveDate) -> String {
    let student = sanitize_or(info.get(FieldName::StudentName), "Student");
    let course = sanitize_or(info.get(FieldName::CourseName), "Course");
    let number = info.get_or(FieldName::AssignmentNumber, "Assignment");

    format!(
        "{}_{}_Assignment_{}_Cover_{}.pdf",
        student,
        course,
        number,
        date.format("%Y-%m-%d")
    )
}

fn sanitize_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        sanitize(value)
    }
}
