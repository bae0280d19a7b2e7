//! PDF Export Public API

use super::images::ImageData;
use super::options::PdfExportOptions;
use super::writer::{ImagePageWriter, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Embed a PNG as the only page of an A4 PDF, returning the file bytes
///
/// # Example
///
/// ```ignore
/// use store::pdf::{export_image_pdf_bytes, PdfExportOptions};
///
/// let options = PdfExportOptions::new()
///     .with_title("Assignment Cover - CS101")
///     .with_author("Jane Doe");
///
/// let pdf_bytes = export_image_pdf_bytes(&png, options)?;
/// ```
pub fn export_image_pdf_bytes(png: &[u8], options: PdfExportOptions) -> Result<Vec<u8>> {
    let image = ImageData::from_png(png)?;
    ImagePageWriter::new(options).write_to_bytes(image)
}

/// Embed a PNG as the only page of an A4 PDF written to `path`
pub fn export_image_pdf(
    png: &[u8],
    path: impl AsRef<Path>,
    options: PdfExportOptions,
) -> Result<()> {
    let image = ImageData::from_png(png)?;
    let writer = BufWriter::new(File::create(path)?);
    ImagePageWriter::new(options).write(image, writer)
}
