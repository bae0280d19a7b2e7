//! Field names for the cover page form

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of input control a field is edited with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    /// Plain free text
    Text,
    /// Calendar date (`YYYY-MM-DD`)
    Date,
    /// Free text with a suggestion list attached
    TextWithSuggestions,
}

/// A named field of [`CoverPageInfo`](crate::CoverPageInfo)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    AssignmentNumber,
    CourseName,
    StudentName,
    StudentId,
    Section,
    DepartmentOfStudent,
    TeacherName,
    DepartmentOfTeacher,
    SubmissionDate,
}

impl FieldName {
    /// All fields in form order
    pub const ALL: [FieldName; 9] = [
        FieldName::AssignmentNumber,
        FieldName::CourseName,
        FieldName::StudentName,
        FieldName::StudentId,
        FieldName::Section,
        FieldName::DepartmentOfStudent,
        FieldName::TeacherName,
        FieldName::DepartmentOfTeacher,
        FieldName::SubmissionDate,
    ];

    /// Fields that must be non-empty before export, in declared order
    pub const REQUIRED: [FieldName; 6] = [
        FieldName::StudentName,
        FieldName::StudentId,
        FieldName::CourseName,
        FieldName::AssignmentNumber,
        FieldName::TeacherName,
        FieldName::SubmissionDate,
    ];

    /// The input name used as the serialized key
    pub fn key(&self) -> &'static str {
        match self {
            FieldName::AssignmentNumber => "assignmentNumber",
            FieldName::CourseName => "courseName",
            FieldName::StudentName => "studentName",
            FieldName::StudentId => "studentId",
            FieldName::Section => "section",
            FieldName::DepartmentOfStudent => "departmentOfStudent",
            FieldName::TeacherName => "teacherName",
            FieldName::DepartmentOfTeacher => "departmentOfTeacher",
            FieldName::SubmissionDate => "submissionDate",
        }
    }

    /// Human-readable name, as listed in validation messages
    pub fn label(&self) -> &'static str {
        match self {
            FieldName::AssignmentNumber => "Assignment Number",
            FieldName::CourseName => "Course Name",
            FieldName::StudentName => "Student Name",
            FieldName::StudentId => "Student ID",
            FieldName::Section => "Section",
            FieldName::DepartmentOfStudent => "Department of Student",
            FieldName::TeacherName => "Teacher Name",
            FieldName::DepartmentOfTeacher => "Department of Teacher",
            FieldName::SubmissionDate => "Submission Date",
        }
    }

    /// Caption shown next to the input on the form
    pub fn form_label(&self) -> &'static str {
        match self {
            FieldName::CourseName => "Course",
            FieldName::TeacherName => "Submitted To",
            other => other.label(),
        }
    }

    pub fn input_kind(&self) -> InputKind {
        match self {
            FieldName::DepartmentOfStudent | FieldName::DepartmentOfTeacher => {
                InputKind::TextWithSuggestions
            }
            FieldName::SubmissionDate => InputKind::Date,
            _ => InputKind::Text,
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FieldName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FieldName::ALL
            .iter()
            .copied()
            .find(|field| field.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ModelError::UnknownField(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_subset() {
        let required: Vec<_> = FieldName::ALL.iter().filter(|f| f.is_required()).collect();
        assert_eq!(required.len(), 6);
        assert!(!FieldName::Section.is_required());
        assert!(!FieldName::DepartmentOfStudent.is_required());
        assert!(!FieldName::DepartmentOfTeacher.is_required());
    }

    #[test]
    fn test_parse_key() {
        assert_eq!("studentName".parse::<FieldName>().unwrap(), FieldName::StudentName);
        assert_eq!("SUBMISSIONDATE".parse::<FieldName>().unwrap(), FieldName::SubmissionDate);
        assert!("nickname".parse::<FieldName>().is_err());
    }

    #[test]
    fn test_keys_round_trip() {
        for field in FieldName::ALL {
            assert_eq!(field.key().parse::<FieldName>().unwrap(), field);
        }
    }

    #[test]
    fn test_form_labels() {
        assert_eq!(FieldName::CourseName.form_label(), "Course");
        assert_eq!(FieldName::TeacherName.form_label(), "Submitted To");
        assert_eq!(FieldName::StudentId.form_label(), "Student ID");
    }

    #[test]
    fn test_input_kinds() {
        assert_eq!(FieldName::SubmissionDate.input_kind(), InputKind::Date);
        assert_eq!(
            FieldName::DepartmentOfTeacher.input_kind(),
            InputKind::TextWithSuggestions
        );
        assert_eq!(FieldName::StudentName.input_kind(), InputKind::Text);
    }
}
