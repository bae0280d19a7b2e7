//! Cover Model - Field record and validation for the cover page form
//!
//! This crate holds the flat record of form fields that the cover page is
//! rendered from, the closed list of department suggestions offered by the
//! department inputs, and the validator that gates the export pipeline.

mod departments;
mod error;
mod field;
mod info;
mod validate;

pub use departments::*;
pub use error::*;
pub use field::*;
pub use info::*;
pub use validate::*;
