//! PDF Export Options

use super::document::DocumentInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name written as Creator and Producer unless overridden
pub const DEFAULT_CREATOR: &str = "UIU Cover Page Generator";

/// Options for exporting an image as a PDF page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExportOptions {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    /// Creator and producer application name
    #[serde(default = "default_creator")]
    pub creator: String,
    #[serde(default)]
    pub creation_date: Option<DateTime<Utc>>,
    /// Flate-compress the image samples
    #[serde(default = "default_compress")]
    pub compress: bool,
}

fn default_creator() -> String {
    DEFAULT_CREATOR.to_string()
}

fn default_compress() -> bool {
    true
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            creator: default_creator(),
            creation_date: None,
            compress: true,
        }
    }
}

impl PdfExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }

    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// The Info dictionary contents for these options
    pub fn document_info(&self) -> DocumentInfo {
        DocumentInfo {
            title: self.title.clone(),
            author: self.author.clone(),
            subject: self.subject.clone(),
            creator: Some(self.creator.clone()),
            producer: Some(self.creator.clone()),
            creation_date: self.creation_date,
        }
    }
}
