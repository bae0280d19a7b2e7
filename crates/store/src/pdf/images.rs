//! PDF Image Handling
//!
//! Decodes a PNG into 8-bit RGB samples and turns them into an image
//! XObject. Transparent pixels are flattened onto white, the color of the
//! page underneath.

use super::objects::{PdfDictionary, PdfObject, PdfStream};
use std::io::Write;
use thiserror::Error;

/// Error type for image embedding
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Image has no pixels")]
    Empty,

    #[error("Compression failed: {0}")]
    Compression(#[from] std::io::Error),
}

/// Color space for images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRGB,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceRGB => "DeviceRGB",
        }
    }

    pub fn components(&self) -> u8 {
        match self {
            ColorSpace::DeviceRGB => 3,
        }
    }
}

/// Image compression filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFilter {
    FlateDecode,
}

impl ImageFilter {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ImageFilter::FlateDecode => "FlateDecode",
        }
    }
}

/// Image samples ready for embedding
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub bits_per_component: u8,
    pub color_space: ColorSpace,
    pub data: Vec<u8>,
    pub filter: Option<ImageFilter>,
}

impl ImageData {
    /// Decode PNG bytes into uncompressed RGB samples
    pub fn from_png(data: &[u8]) -> Result<Self, ImageError> {
        let img = image::load_from_memory_with_format(data, image::ImageFormat::Png)
            .map_err(|e| ImageError::Decode(e.to_string()))?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageError::Empty);
        }

        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            rgb.extend_from_slice(&[over_white(r, a), over_white(g, a), over_white(b, a)]);
        }

        Ok(Self::from_raw_rgb(rgb, width, height))
    }

    /// Wrap uncompressed RGB samples
    pub fn from_raw_rgb(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits_per_component: 8,
            color_space: ColorSpace::DeviceRGB,
            data,
            filter: None,
        }
    }

    /// Flate-compress the samples (lossless)
    pub fn compress(&mut self) -> Result<(), ImageError> {
        use flate2::write::ZlibEncoder;
        use flate2::Compression;

        if self.filter.is_some() {
            return Ok(());
        }

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&self.data)?;
        self.data = encoder.finish()?;
        self.filter = Some(ImageFilter::FlateDecode);
        Ok(())
    }

    /// Convert to a PDF image XObject stream
    pub fn to_xobject(&self) -> PdfStream {
        let mut dict = PdfDictionary::new().with_type("XObject");
        dict.insert("Subtype", PdfObject::name("Image"));
        dict.insert("Width", PdfObject::Integer(self.width as i64));
        dict.insert("Height", PdfObject::Integer(self.height as i64));
        dict.insert(
            "BitsPerComponent",
            PdfObject::Integer(self.bits_per_component as i64),
        );
        dict.insert("ColorSpace", PdfObject::name(self.color_space.pdf_name()));

        if let Some(filter) = self.filter {
            dict.insert("Filter", PdfObject::name(filter.pdf_name()));
        }

        PdfStream {
            dict,
            data: self.data.clone(),
            compressed: self.filter.is_some(),
        }
    }
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let c = channel as u32 * alpha as u32 + 255 * (255 - alpha as u32);
    ((c + 127) / 255) as u8
}

#[cfg(test)]
pub(crate) fn png_fixture(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    #[test]
    fn test_from_png_gives_rgb_samples() {
        let png = png_fixture(4, 2, [10, 20, 30, 255]);
        let image = ImageData::from_png(&png).unwrap();
        assert_eq!((image.width, image.height), (4, 2));
        assert_eq!(image.data.len(), 4 * 2 * 3);
        assert_eq!(&image.data[..3], &[10, 20, 30]);
        assert!(image.filter.is_none());
    }

    #[test]
    fn test_transparency_is_flattened_onto_white() {
        let png = png_fixture(1, 1, [0, 0, 0, 0]);
        let image = ImageData::from_png(&png).unwrap();
        assert_eq!(image.data, vec![255, 255, 255]);

        assert_eq!(over_white(0, 128), 127);
        assert_eq!(over_white(200, 255), 200);
    }

    #[test]
    fn test_invalid_png() {
        let err = ImageData::from_png(b"definitely not a png").unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)));
    }

    #[test]
    fn test_compression_is_lossless() {
        let png = png_fixture(16, 16, [243, 112, 33, 255]);
        let mut image = ImageData::from_png(&png).unwrap();
        let raw = image.data.clone();

        image.compress().unwrap();
        assert_eq!(image.filter, Some(ImageFilter::FlateDecode));
        assert!(image.data.len() < raw.len());

        let mut inflated = Vec::new();
        ZlibDecoder::new(image.data.as_slice())
            .read_to_end(&mut inflated)
            .unwrap();
        assert_eq!(inflated, raw);
    }

    #[test]
    fn test_xobject_dictionary() {
        let mut image = ImageData::from_raw_rgb(vec![0; 12], 2, 2);
        image.compress().unwrap();
        let xobject = image.to_xobject();

        assert!(xobject.compressed);
        assert!(matches!(xobject.dict.get("Subtype"), Some(PdfObject::Name(n)) if n == "Image"));
        assert!(matches!(xobject.dict.get("ColorSpace"), Some(PdfObject::Name(n)) if n == "DeviceRGB"));
        assert!(matches!(xobject.dict.get("Width"), Some(PdfObject::Integer(2))));
    }
}
