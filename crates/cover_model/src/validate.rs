//! Required-field validation

use crate::{CoverPageInfo, FieldName, ValidationError};

/// Check that every required field is non-empty after trimming.
///
/// On failure the error lists the missing fields in declared order.
pub fn validate(info: &CoverPageInfo) -> Result<(), ValidationError> {
    let missing: Vec<FieldName> = FieldName::REQUIRED
        .into_iter()
        .filter(|field| info.get(*field).trim().is_empty())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn complete() -> CoverPageInfo {
        CoverPageInfo::new()
            .with(FieldName::AssignmentNumber, "3")
            .with(FieldName::CourseName, "CS101")
            .with(FieldName::StudentName, "Jane Doe")
            .with(FieldName::StudentId, "011221001")
            .with(FieldName::TeacherName, "Dr. Smith")
            .with(FieldName::SubmissionDate, "2024-01-15")
    }

    #[test]
    fn test_complete_record_passes() {
        assert!(validate(&complete()).is_ok());
    }

    #[test]
    fn test_optional_fields_are_not_checked() {
        let info = complete()
            .with(FieldName::Section, "")
            .with(FieldName::DepartmentOfStudent, "")
            .with(FieldName::DepartmentOfTeacher, "");
        assert!(validate(&info).is_ok());
    }

    #[test]
    fn test_empty_record_lists_all_in_order() {
        let err = validate(&CoverPageInfo::new()).unwrap_err();
        assert_eq!(err.missing, FieldName::REQUIRED.to_vec());
        assert_eq!(
            err.missing_labels(),
            vec![
                "Student Name",
                "Student ID",
                "Course Name",
                "Assignment Number",
                "Teacher Name",
                "Submission Date",
            ]
        );
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let info = complete().with(FieldName::StudentId, " \t ");
        let err = validate(&info).unwrap_err();
        assert_eq!(err.missing, vec![FieldName::StudentId]);
    }

    #[test]
    fn test_message_is_itemized() {
        let info = complete()
            .with(FieldName::CourseName, "")
            .with(FieldName::TeacherName, "");
        let err = validate(&info).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please fill in the following required fields:\n• Course Name\n• Teacher Name"
        );
    }

    #[test]
    fn test_student_fields_are_listed_first() {
        let info = complete()
            .with(FieldName::AssignmentNumber, "")
            .with(FieldName::StudentName, "");
        let err = validate(&info).unwrap_err();
        assert_eq!(
            err.missing,
            vec![FieldName::StudentName, FieldName::AssignmentNumber]
        );
        assert_eq!(
            err.to_string(),
            "Please fill in the following required fields:\n• Student Name\n• Assignment Number"
        );
    }

    proptest! {
        #[test]
        fn prop_reports_exactly_the_blanked_fields(mask in proptest::collection::vec(any::<bool>(), 6)) {
            let mut info = complete();
            let mut expected = Vec::new();
            for (field, blank) in FieldName::REQUIRED.into_iter().zip(mask) {
                if blank {
                    info.set(field, "  ");
                    expected.push(field);
                }
            }

            match validate(&info) {
                Ok(()) => prop_assert!(expected.is_empty()),
                Err(err) => prop_assert_eq!(err.missing, expected),
            }
        }
    }
}
