//! PDF Document Structure
//!
//! Catalog, page tree, media box and the Info dictionary.

use super::objects::{PdfDictionary, PdfObject};
use super::placement::PageSize;
use chrono::{DateTime, Utc};

/// PDF version written in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PdfVersion {
    #[default]
    V1_4,
}

impl PdfVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PdfVersion::V1_4 => "1.4",
        }
    }
}

/// PDF document information (the trailer's /Info dictionary)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
}

impl DocumentInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        let text_entries = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
        ];
        for (key, value) in text_entries {
            if let Some(value) = value {
                dict.insert(key, PdfObject::text(value));
            }
        }
        if let Some(date) = &self.creation_date {
            let date = pdf_date(date);
            dict.insert("CreationDate", PdfObject::text(&date));
            dict.insert("ModDate", PdfObject::text(&date));
        }
        dict
    }
}

/// Format a timestamp as a PDF date string (`D:YYYYMMDDHHmmSS+00'00'`)
pub fn pdf_date(date: &DateTime<Utc>) -> String {
    format!("D:{}+00'00'", date.format("%Y%m%d%H%M%S"))
}

/// Page media box in points (origin at lower-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaBox {
    pub width: f64,
    pub height: f64,
}

impl MediaBox {
    pub fn from_dimensions(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Media box of a page size given in millimetres
    pub fn from_page(page: PageSize) -> Self {
        let (width, height) = page.to_points();
        Self::from_dimensions(width, height)
    }

    /// A4 (210 x 297 mm) without rounding to whole points
    pub fn a4() -> Self {
        Self::from_page(PageSize::A4)
    }

    pub fn to_array(&self) -> PdfObject {
        PdfObject::Array(vec![
            PdfObject::Integer(0),
            PdfObject::Integer(0),
            PdfObject::Real(self.width),
            PdfObject::Real(self.height),
        ])
    }
}

impl Default for MediaBox {
    fn default() -> Self {
        Self::a4()
    }
}

/// Create the document catalog (root object)
pub fn create_catalog(pages_ref: u32) -> PdfDictionary {
    let mut catalog = PdfDictionary::new().with_type("Catalog");
    catalog.insert("Pages", PdfObject::reference(pages_ref));
    catalog
}

/// Create the page tree root
pub fn create_pages(page_refs: &[u32]) -> PdfDictionary {
    let mut pages = PdfDictionary::new().with_type("Pages");
    pages.insert(
        "Kids",
        PdfObject::Array(page_refs.iter().map(|r| PdfObject::reference(*r)).collect()),
    );
    pages.insert("Count", PdfObject::Integer(page_refs.len() as i64));
    pages
}
