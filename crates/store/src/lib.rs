//! Store - PDF assembly, file saving, and settings
//!
//! This crate turns the encoded cover page into a PDF document, derives
//! its filename, saves it through a file sink, and persists the
//! application settings.

mod clock;
mod error;
mod file_io;
mod filename;
mod settings;
pub mod pdf;

pub use clock::*;
pub use error::*;
pub use file_io::*;
pub use filename::*;
pub use settings::*;
