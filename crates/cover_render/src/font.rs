//! Font discovery, shaping, and glyph outlines
//!
//! Faces are located through font-kit, shaped with rustybuzz, and turned
//! into tiny-skia paths so text is filled like any other shape.

use crate::{FontWeight, RenderError, Result};
use font_kit::family_name::FamilyName;
use font_kit::handle::Handle;
use font_kit::properties::{Properties, Weight};
use font_kit::source::SystemSource;
use rustybuzz::ttf_parser::{GlyphId, OutlineBuilder};
use std::path::Path;
use std::sync::Arc;
use tiny_skia::PathBuilder;

/// Raw font data plus the face index inside it
#[derive(Clone)]
pub struct FontFace {
    data: Arc<Vec<u8>>,
    index: u32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}

impl FontFace {
    /// Wrap font bytes, checking that they parse
    pub fn from_bytes(data: Vec<u8>, index: u32) -> Result<Self> {
        if rustybuzz::Face::from_slice(&data, index).is_none() {
            return Err(RenderError::FontLoad(format!(
                "data is not a usable font (face {})",
                index
            )));
        }
        Ok(Self {
            data: Arc::new(data),
            index,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| RenderError::FontLoad(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(data, 0)
    }

    /// Find the best system match for a family and weight
    pub fn discover(family: &str, weight: FontWeight) -> Result<Self> {
        let properties = Properties {
            weight: match weight {
                FontWeight::Bold => Weight::BOLD,
                FontWeight::Normal => Weight::NORMAL,
            },
            ..Default::default()
        };

        let family_name = match family.to_lowercase().as_str() {
            "sans-serif" => FamilyName::SansSerif,
            "serif" => FamilyName::Serif,
            "monospace" => FamilyName::Monospace,
            _ => FamilyName::Title(family.to_string()),
        };

        let handle = SystemSource::new()
            .select_best_match(&[family_name, FamilyName::SansSerif], &properties)
            .map_err(|_| RenderError::FontUnavailable(family.to_string()))?;

        match handle {
            Handle::Path { path, font_index } => {
                let data = std::fs::read(&path)
                    .map_err(|e| RenderError::FontLoad(format!("{}: {}", path.display(), e)))?;
                Self::from_bytes(data, font_index)
            }
            Handle::Memory { bytes, font_index } => Self::from_bytes(bytes.to_vec(), font_index),
        }
    }

    fn face(&self) -> Result<rustybuzz::Face<'_>> {
        rustybuzz::Face::from_slice(&self.data, self.index)
            .ok_or_else(|| RenderError::FontLoad("face could not be parsed".to_string()))
    }

    /// Advance width of `text` at `size` pixels
    pub fn measure(&self, text: &str, size: f32) -> Result<f32> {
        let face = self.face()?;
        let scale = size / face.units_per_em() as f32;
        let advance: i32 = shape(&face, text)
            .glyph_positions()
            .iter()
            .map(|pos| pos.x_advance)
            .sum();
        Ok(advance as f32 * scale)
    }

    /// Outline of `text` with its pen starting at `(x, baseline)`.
    ///
    /// Returns `None` when the run has no visible glyphs.
    pub fn text_path(
        &self,
        text: &str,
        size: f32,
        x: f32,
        baseline: f32,
    ) -> Result<Option<tiny_skia::Path>> {
        let face = self.face()?;
        let scale = size / face.units_per_em() as f32;
        let output = shape(&face, text);

        let mut builder = PathBuilder::new();
        let mut pen = 0i32;
        for (info, pos) in output.glyph_infos().iter().zip(output.glyph_positions()) {
            let mut outline = GlyphOutline {
                builder: &mut builder,
                origin_x: x + (pen + pos.x_offset) as f32 * scale,
                origin_y: baseline - pos.y_offset as f32 * scale,
                scale,
            };
            face.outline_glyph(GlyphId(info.glyph_id as u16), &mut outline);
            pen += pos.x_advance;
        }
        Ok(builder.finish())
    }
}

fn shape(face: &rustybuzz::Face<'_>, text: &str) -> rustybuzz::GlyphBuffer {
    let mut buffer = rustybuzz::UnicodeBuffer::new();
    buffer.push_str(text);
    rustybuzz::shape(face, &[], buffer)
}

/// Maps font-unit outline commands into page space (y down)
struct GlyphOutline<'a> {
    builder: &'a mut PathBuilder,
    origin_x: f32,
    origin_y: f32,
    scale: f32,
}

impl GlyphOutline<'_> {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.origin_y - y * self.scale)
    }
}

impl OutlineBuilder for GlyphOutline<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Regular and bold faces used to draw the cover page
#[derive(Debug, Clone)]
pub struct FontSet {
    pub regular: FontFace,
    pub bold: FontFace,
}

impl FontSet {
    pub fn new(regular: FontFace, bold: FontFace) -> Self {
        Self { regular, bold }
    }

    /// Discover both weights of a system family
    pub fn discover(family: &str) -> Result<Self> {
        let regular = FontFace::discover(family, FontWeight::Normal)?;
        let bold = FontFace::discover(family, FontWeight::Bold).unwrap_or_else(|e| {
            tracing::warn!("No bold face for {}: {}, using regular", family, e);
            regular.clone()
        });
        Ok(Self { regular, bold })
    }

    pub fn get(&self, weight: FontWeight) -> &FontFace {
        match weight {
            FontWeight::Normal => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let err = FontFace::from_bytes(vec![0u8; 64], 0).unwrap_err();
        assert!(matches!(err, RenderError::FontLoad(_)));
    }

    #[test]
    fn test_missing_font_file() {
        let err = FontFace::from_path("/nonexistent/font.ttf").unwrap_err();
        assert!(matches!(err, RenderError::FontLoad(_)));
    }

    #[test]
    fn test_system_font_measures_and_outlines() {
        // Hosts without any system fonts skip this check
        let Ok(face) = FontFace::discover("sans-serif", FontWeight::Normal) else {
            return;
        };
        let short = face.measure("ID", 20.0).unwrap();
        let long = face.measure("ID : 011221001", 20.0).unwrap();
        assert!(short > 0.0);
        assert!(long > short);
        assert!((face.measure("ID", 40.0).unwrap() - short * 2.0).abs() < 0.01);

        let path = face.text_path("UIU", 20.0, 10.0, 30.0).unwrap().unwrap();
        let bounds = path.bounds();
        assert!(bounds.left() >= 9.0);
        assert!(bounds.bottom() <= 31.0);
        assert!(face.text_path("   ", 20.0, 0.0, 0.0).unwrap().is_none());
    }
}
