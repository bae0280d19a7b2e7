//! PDF Writer
//!
//! Handles object numbering, the cross-reference table, and the file
//! structure (header, body, xref, trailer). [`ImagePageWriter`] builds the
//! one document shape this crate produces: a single page showing a single
//! image.

use super::content::ContentStream;
use super::document::{create_catalog, create_pages, MediaBox, PdfVersion};
use super::images::{ImageData, ImageError};
use super::objects::{PdfDictionary, PdfObject, PdfSerializer, PdfStream};
use super::options::PdfExportOptions;
use super::placement::{fit_to_page, PageSize};
use std::io::{self, Write};
use thiserror::Error;

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Byte offset of a written object, for the xref table
#[derive(Debug)]
struct ObjectEntry {
    obj_num: u32,
    offset: u64,
}

/// Low-level PDF file writer
pub struct PdfWriter<W: Write> {
    writer: W,
    position: u64,
    objects: Vec<ObjectEntry>,
    next_obj_num: u32,
    version: PdfVersion,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W, version: PdfVersion) -> Self {
        Self {
            writer,
            position: 0,
            objects: Vec::new(),
            next_obj_num: 1,
            version,
            compress: true,
        }
    }

    /// Set whether uncompressed streams get Flate-compressed
    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Allocate a new object number
    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.write_str(&format!("%PDF-{}\n", self.version.as_str()))?;
        // Binary marker so transfer tools treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    /// Write an indirect object
    pub fn write_object(&mut self, obj_num: u32, object: &PdfObject) -> Result<()> {
        self.objects.push(ObjectEntry {
            obj_num,
            offset: self.position,
        });

        self.write_str(&format!("{} 0 obj\n", obj_num))?;
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(object)?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str("\nendobj\n")?;
        Ok(())
    }

    /// Write a stream object, compressing it first when enabled
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress && !stream.compressed {
            stream = compress_stream(stream)?;
        }
        stream
            .dict
            .insert("Length", PdfObject::Integer(stream.data.len() as i64));
        self.write_object(obj_num, &PdfObject::Stream(stream))
    }

    /// Write the cross-reference table and trailer
    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: Option<u32>) -> Result<()> {
        let xref_offset = self.position;

        self.objects.sort_by_key(|e| e.obj_num);
        let mut offsets = vec![None; self.next_obj_num as usize];
        for entry in &self.objects {
            offsets[entry.obj_num as usize] = Some(entry.offset);
        }
        if offsets.iter().skip(1).any(Option::is_none) {
            return Err(PdfError::InvalidDocument(
                "allocated object was never written".to_string(),
            ));
        }

        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", self.next_obj_num);
        for offset in offsets.into_iter().skip(1).flatten() {
            xref.push_str(&format!("{:010} 00000 n \n", offset));
        }
        self.write_str(&xref)?;

        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", PdfObject::Integer(self.next_obj_num as i64));
        trailer.insert("Root", PdfObject::reference(catalog_ref));
        if let Some(info) = info_ref {
            trailer.insert("Info", PdfObject::reference(info));
        }

        self.write_str("trailer\n")?;
        let mut serializer = PdfSerializer::new(Vec::new());
        serializer.write_object(&PdfObject::Dictionary(trailer))?;
        self.write_bytes(&serializer.into_inner())?;
        self.write_str(&format!("\nstartxref\n{}\n%%EOF\n", xref_offset))?;
        Ok(())
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn compress_stream(mut stream: PdfStream) -> Result<PdfStream> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&stream.data)?;
    stream.data = encoder.finish()?;
    stream.compressed = true;
    stream.dict.insert("Filter", PdfObject::name("FlateDecode"));
    Ok(stream)
}

/// Resource name of the page image
const IMAGE_NAME: &str = "Im1";

/// Writes a one-page document that shows one image, aspect-fit and
/// centered on the page
pub struct ImagePageWriter {
    options: PdfExportOptions,
    page: PageSize,
}

impl ImagePageWriter {
    pub fn new(options: PdfExportOptions) -> Self {
        Self {
            options,
            page: PageSize::A4,
        }
    }

    pub fn write<W: Write>(&self, mut image: ImageData, writer: W) -> Result<()> {
        if image.width == 0 || image.height == 0 {
            return Err(PdfError::InvalidDocument("image has no pixels".to_string()));
        }
        let expected = image.width as usize
            * image.height as usize
            * image.color_space.components() as usize;
        if image.filter.is_none() && image.data.len() != expected {
            return Err(PdfError::InvalidDocument(format!(
                "expected {} image bytes, got {}",
                expected,
                image.data.len()
            )));
        }
        if self.options.compress {
            image.compress()?;
        }

        let mut pdf = PdfWriter::new(writer, PdfVersion::V1_4);
        pdf.set_compression(self.options.compress);
        pdf.write_header()?;

        let catalog_ref = pdf.allocate_object();
        let pages_ref = pdf.allocate_object();
        let info_ref = pdf.allocate_object();
        let page_ref = pdf.allocate_object();
        let content_ref = pdf.allocate_object();
        let image_ref = pdf.allocate_object();

        pdf.write_object(catalog_ref, &create_catalog(pages_ref).into())?;
        pdf.write_object(pages_ref, &create_pages(&[page_ref]).into())?;
        pdf.write_object(
            info_ref,
            &self.options.document_info().to_dictionary().into(),
        )?;

        let mut xobjects = PdfDictionary::new();
        xobjects.insert(IMAGE_NAME, PdfObject::reference(image_ref));
        let mut resources = PdfDictionary::new();
        resources.insert("XObject", xobjects.into());
        resources.insert(
            "ProcSet",
            PdfObject::Array(vec![PdfObject::name("PDF"), PdfObject::name("ImageC")]),
        );

        let mut page = PdfDictionary::new().with_type("Page");
        page.insert("Parent", PdfObject::reference(pages_ref));
        page.insert("MediaBox", MediaBox::from_page(self.page).to_array());
        page.insert("Contents", PdfObject::reference(content_ref));
        page.insert("Resources", resources.into());
        pdf.write_object(page_ref, &page.into())?;

        let placement = fit_to_page(image.width, image.height, self.page);
        let (x, y, width, height) = placement.to_points(self.page);
        let mut content = ContentStream::new();
        content.draw_image(IMAGE_NAME, x, y, width, height);
        pdf.write_stream_object(content_ref, PdfStream::new(content.into_bytes()))?;

        pdf.write_stream_object(image_ref, image.to_xobject())?;

        pdf.write_xref_and_trailer(catalog_ref, Some(info_ref))?;
        pdf.finish()?;

        tracing::debug!(
            width = image.width,
            height = image.height,
            x_mm = placement.x,
            y_mm = placement.y,
            "Wrote image page"
        );
        Ok(())
    }

    pub fn write_to_bytes(&self, image: ImageData) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(image, &mut buffer)?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_writer_header() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer, PdfVersion::V1_4);
        writer.write_header().unwrap();
        assert!(buffer.starts_with(b"%PDF-1.4\n"));
    }

    #[test]
    fn test_pdf_writer_object() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer, PdfVersion::V1_4);
        let obj_num = writer.allocate_object();
        writer.write_object(obj_num, &PdfObject::Integer(42)).unwrap();

        let output = String::from_utf8_lossy(&buffer);
        assert_eq!(output, "1 0 obj\n42\nendobj\n");
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer, PdfVersion::V1_4);
        let a = writer.allocate_object();
        let b = writer.allocate_object();
        writer.write_object(b, &PdfObject::Integer(2)).unwrap();
        writer.write_object(a, &PdfObject::Integer(1)).unwrap();
        writer.write_xref_and_trailer(a, None).unwrap();
        writer.finish().unwrap();

        let text = String::from_utf8_lossy(&buffer).into_owned();
        let xref_start = text.find("xref\n").unwrap();
        let entries: Vec<usize> = text[xref_start..]
            .lines()
            .skip(3)
            .take(2)
            .map(|line| line[..10].parse().unwrap())
            .collect();
        assert!(text[entries[0]..].starts_with("1 0 obj"));
        assert!(text[entries[1]..].starts_with("2 0 obj"));
    }

    #[test]
    fn test_unwritten_object_is_an_error() {
        let mut writer = PdfWriter::new(Vec::new(), PdfVersion::V1_4);
        let catalog = writer.allocate_object();
        let err = writer.write_xref_and_trailer(catalog, None).unwrap_err();
        assert!(matches!(err, PdfError::InvalidDocument(_)));
    }

    #[test]
    fn test_stream_length_matches_compressed_data() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new(&mut buffer, PdfVersion::V1_4);
        let obj = writer.allocate_object();
        writer
            .write_stream_object(obj, PdfStream::new(vec![b'a'; 1000]))
            .unwrap();

        let text = String::from_utf8_lossy(&buffer);
        assert!(text.contains("/Filter /FlateDecode"));
        assert!(!text.contains("/Length 1000"));
    }

    #[test]
    fn test_image_size_mismatch() {
        let image = ImageData::from_raw_rgb(vec![0; 5], 2, 2);
        let err = ImagePageWriter::new(PdfExportOptions::default())
            .write_to_bytes(image)
            .unwrap_err();
        assert!(matches!(err, PdfError::InvalidDocument(_)));
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let image = ImageData::from_raw_rgb(Vec::new(), 0, 10);
        assert!(ImagePageWriter::new(PdfExportOptions::default())
            .write_to_bytes(image)
            .is_err());
    }
}
