//! PDF Export Module
//!
//! Builds the single-page A4 PDF that carries the rasterized cover page.
//!
//! # Architecture
//!
//! - `objects`: PDF object model (Dictionary, Array, Stream, Reference)
//! - `document`: Catalog, page tree, media box, Info dictionary
//! - `content`: Content stream operators for painting the image
//! - `images`: PNG decoding and image XObject generation
//! - `placement`: Aspect-fit of the image on the page
//! - `options`: PDF export configuration
//! - `writer`: File structure and the image page writer
//! - `api`: Public API for PDF export

mod api;
mod content;
mod document;
mod images;
mod objects;
mod options;
mod placement;
mod writer;

pub use api::*;
pub use document::{pdf_date, DocumentInfo, MediaBox};
pub use images::{ImageData, ImageError};
pub use options::*;
pub use placement::{fit_to_page, PageSize, Placement, PT_PER_MM};
pub use writer::{ImagePageWriter, PdfError};
