//! The cover page field record

use crate::{FieldName, Result};
use serde::{Deserialize, Serialize};

/// Flat record of the form's text fields.
///
/// Every field is a string and may be empty until validated. The form
/// mutates it one field at a time; the export pipeline only reads a
/// snapshot of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverPageInfo {
    pub assignment_number: String,
    pub course_name: String,
    pub student_name: String,
    pub student_id: String,
    pub section: String,
    pub department_of_student: String,
    pub teacher_name: String,
    pub department_of_teacher: String,
    pub submission_date: String,
}

impl CoverPageInfo {
    /// Create a record with every field empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a field by name
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::AssignmentNumber => &self.assignment_number,
            FieldName::CourseName => &self.course_name,
            FieldName::StudentName => &self.student_name,
            FieldName::StudentId => &self.student_id,
            FieldName::Section => &self.section,
            FieldName::DepartmentOfStudent => &self.department_of_student,
            FieldName::TeacherName => &self.teacher_name,
            FieldName::DepartmentOfTeacher => &self.department_of_teacher,
            FieldName::SubmissionDate => &self.submission_date,
        }
    }

    /// Replace a field's value
    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let slot = match field {
            FieldName::AssignmentNumber => &mut self.assignment_number,
            FieldName::CourseName => &mut self.course_name,
            FieldName::StudentName => &mut self.student_name,
            FieldName::StudentId => &mut self.student_id,
            FieldName::Section => &mut self.section,
            FieldName::DepartmentOfStudent => &mut self.department_of_student,
            FieldName::TeacherName => &mut self.teacher_name,
            FieldName::DepartmentOfTeacher => &mut self.department_of_teacher,
            FieldName::SubmissionDate => &mut self.submission_date,
        };
        *slot = value.into();
    }

    /// Builder-style setter
    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// The field's value, or `fallback` when it is empty
    pub fn get_or<'a>(&'a self, field: FieldName, fallback: &'a str) -> &'a str {
        match self.get(field) {
            "" => fallback,
            value => value,
        }
    }

    /// Reset every field to empty
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Iterate `(field, value)` pairs in form order
    pub fn fields(&self) -> impl Iterator<Item = (FieldName, &str)> {
        FieldName::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
