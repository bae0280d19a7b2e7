//! Department suggestions for the department inputs
//!
//! The list is closed and fixed; suggestions never restrict what the user
//! may type.

/// An institutional department offered as a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Department {
    /// Value inserted into the field when the suggestion is picked
    pub code: &'static str,
    /// Descriptive name shown next to the code
    pub name: &'static str,
}

impl Department {
    const fn new(code: &'static str, name: &'static str) -> Self {
        Self { code, name }
    }

    fn matches(&self, needle: &str) -> bool {
        self.code.to_lowercase().contains(needle) || self.name.to_lowercase().contains(needle)
    }
}

/// All department suggestions, in display order
pub const DEPARTMENTS: &[Department] = &[
    Department::new("CSE", "Computer Science and Engineering"),
    Department::new("EEE", "Electrical and Electronic Engineering"),
    Department::new("BBA", "Bachelor of Business Administration"),
    Department::new("CE", "Civil Engineering"),
    Department::new("ME", "Mechanical Engineering"),
    Department::new("ECE", "Electronics and Communication Engineering"),
    Department::new("IT", "Information Technology"),
    Department::new("MBA", "Master of Business Administration"),
    Department::new("Physics", "Physics"),
    Department::new("Mathematics", "Mathematics"),
    Department::new("Chemistry", "Chemistry"),
    Department::new("Economics", "Economics"),
    Department::new("English", "English"),
    Department::new("Law", "Law"),
];

/// Suggestions whose code or name contains `query`, case-insensitively.
///
/// An empty query yields the whole list.
pub fn suggest(query: &str) -> Vec<&'static Department> {
    let needle = query.trim().to_lowercase();
    DEPARTMENTS
        .iter()
        .filter(|dept| needle.is_empty() || dept.matches(&needle))
        .collect()
}
