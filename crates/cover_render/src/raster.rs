//! Rasterization of a [`CoverLayout`] with tiny-skia

use crate::{
    CoverLayout, EncodeError, FontFace, FontSet, LayoutItem, RenderError, Result, Rgb, TextAlign,
    TextItem, MONOGRAM,
};
use std::path::Path;
use tiny_skia::{
    Color, FillRule, FilterQuality, LineCap, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

/// Smallest size text is shrunk to when it does not fit its slot
pub const MIN_TEXT_SIZE: f32 = 8.0;

/// A rasterized cover page on a white background
#[derive(Clone)]
pub struct Raster {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Raster {
    /// A blank white raster, or `None` for a zero or oversized canvas
    pub fn new(width: u32, height: u32) -> Option<Self> {
        let mut pixmap = Pixmap::new(width, height)?;
        pixmap.fill(Color::WHITE);
        Some(Self { pixmap })
    }

    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Lossless PNG encoding of the raster
    pub fn encode_png(&self) -> std::result::Result<Vec<u8>, EncodeError> {
        self.pixmap
            .encode_png()
            .map_err(|e| EncodeError::Png(e.to_string()))
    }
}

/// Turns a laid-out cover page into pixels
pub trait RegionRasterizer: Send + Sync {
    /// Render `layout` with `scale` device pixels per logical pixel
    fn rasterize(&self, layout: &CoverLayout, scale: f32) -> Result<Raster>;
}

/// tiny-skia rasterizer with rustybuzz text
#[derive(Debug, Clone, Default)]
pub struct SkiaRasterizer {
    fonts: Option<FontSet>,
    logo: Option<Pixmap>,
}

impl SkiaRasterizer {
    /// A rasterizer with no fonts and the monogram logo
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fonts(mut self, fonts: FontSet) -> Self {
        self.fonts = Some(fonts);
        self
    }

    /// A rasterizer using a system font family
    pub fn from_system(family: &str) -> Result<Self> {
        Ok(Self::new().with_fonts(FontSet::discover(family)?))
    }

    /// Use a PNG image as the logo
    pub fn with_logo_png(mut self, data: &[u8]) -> Result<Self> {
        let logo = Pixmap::decode_png(data).map_err(|e| RenderError::Logo(e.to_string()))?;
        self.logo = Some(logo);
        Ok(self)
    }

    pub fn load_logo(self, path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        self.with_logo_png(&data)
    }

    pub fn has_fonts(&self) -> bool {
        self.fonts.is_some()
    }

    fn font(&self, text: &TextItem) -> Result<&FontFace> {
        self.fonts
            .as_ref()
            .map(|fonts| fonts.get(text.weight))
            .ok_or_else(|| RenderError::FontUnavailable("no font loaded".to_string()))
    }

    fn draw_text(&self, pixmap: &mut Pixmap, text: &TextItem, transform: Transform) -> Result<()> {
        if text.text.trim().is_empty() {
            return Ok(());
        }
        let face = self.font(text)?;

        let mut size = text.size;
        let mut width = face.measure(&text.text, size)?;
        if width > text.max_width && width > 0.0 {
            size = (size * text.max_width / width).max(MIN_TEXT_SIZE);
            width = face.measure(&text.text, size)?;
        }

        let x = match text.align {
            TextAlign::Left => text.x,
            TextAlign::Center => text.x - width / 2.0,
        };
        if let Some(path) = face.text_path(&text.text, size, x, text.baseline)? {
            pixmap.fill_path(&path, &paint(text.color, 1.0), FillRule::Winding, transform, None);
        }
        Ok(())
    }

    fn draw_logo(
        &self,
        pixmap: &mut Pixmap,
        (x, y, size, opacity): (f32, f32, f32, f32),
        transform: Transform,
    ) -> Result<()> {
        if let Some(logo) = &self.logo {
            let fit = transform
                .pre_translate(x, y)
                .pre_scale(size / logo.width() as f32, size / logo.height() as f32);
            let paint = PixmapPaint {
                opacity,
                quality: FilterQuality::Bicubic,
                ..Default::default()
            };
            pixmap.draw_pixmap(0, 0, logo.as_ref(), &paint, fit, None);
            return Ok(());
        }

        let radius = size / 2.0;
        if let Some(circle) = PathBuilder::from_circle(x + radius, y + radius, radius) {
            pixmap.fill_path(&circle, &paint(Rgb::ACCENT, opacity), FillRule::Winding, transform, None);
        }

        // The badge text is skipped when no font is loaded
        if let Some(fonts) = &self.fonts {
            let size = size * 0.3;
            let face = &fonts.bold;
            let width = face.measure(MONOGRAM, size)?;
            let left = x + radius - width / 2.0;
            let baseline = y + radius + size * 0.35;
            if let Some(path) = face.text_path(MONOGRAM, size, left, baseline)? {
                pixmap.fill_path(&path, &paint(Rgb::WHITE, opacity), FillRule::Winding, transform, None);
            }
        }
        Ok(())
    }
}

impl RegionRasterizer for SkiaRasterizer {
    fn rasterize(&self, layout: &CoverLayout, scale: f32) -> Result<Raster> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RenderError::InvalidRegion(format!("scale {}", scale)));
        }
        let width = (layout.width * scale).round();
        let height = (layout.height * scale).round();
        if !width.is_finite() || !height.is_finite() || width < 1.0 || height < 1.0 {
            return Err(RenderError::InvalidRegion(format!(
                "canvas {}x{}",
                layout.width, layout.height
            )));
        }

        let mut raster = Raster::new(width as u32, height as u32).ok_or_else(|| {
            RenderError::InvalidRegion(format!("canvas {}x{} is too large", width, height))
        })?;
        let transform = Transform::from_scale(scale, scale);
        let pixmap = &mut raster.pixmap;

        for item in &layout.items {
            match item {
                LayoutItem::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    width,
                    color,
                } => {
                    let mut pb = PathBuilder::new();
                    pb.move_to(*x1, *y1);
                    pb.line_to(*x2, *y2);
                    if let Some(path) = pb.finish() {
                        let stroke = Stroke {
                            width: *width,
                            line_cap: LineCap::Round,
                            ..Default::default()
                        };
                        pixmap.stroke_path(&path, &paint(*color, 1.0), &stroke, transform, None);
                    }
                }
                LayoutItem::Arrow { x, y, size, color } => {
                    let half = size / 2.0;
                    let mut pb = PathBuilder::new();
                    pb.move_to(*x, y - half);
                    pb.line_to(x + size, *y);
                    pb.line_to(*x, y + half);
                    pb.close();
                    if let Some(path) = pb.finish() {
                        pixmap.fill_path(&path, &paint(*color, 1.0), FillRule::Winding, transform, None);
                    }
                }
                LayoutItem::Logo {
                    x,
                    y,
                    size,
                    opacity,
                } => self.draw_logo(pixmap, (*x, *y, *size, *opacity), transform)?,
                LayoutItem::Text(text) => self.draw_text(pixmap, text, transform)?,
            }
        }

        tracing::debug!(
            width = raster.width(),
            height = raster.height(),
            items = layout.items.len(),
            "Rasterized cover page"
        );
        Ok(raster)
    }
}

fn paint(color: Rgb, opacity: f32) -> Paint<'static> {
    let mut paint = Paint::default();
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    paint.set_color_rgba8(color.r, color.g, color.b, alpha);
    paint.anti_alias = true;
    paint
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoverRegion;
    use cover_model::{CoverPageInfo, FieldName};

    fn shapes_only() -> CoverLayout {
        let mut layout = CoverLayout::new(794.0, 1123.0);
        layout.push(LayoutItem::Line {
            x1: 10.0,
            y1: 10.0,
            x2: 200.0,
            y2: 10.0,
            width: 4.0,
            color: Rgb::BLACK,
        });
        layout.push(LayoutItem::Arrow {
            x: 100.0,
            y: 100.0,
            size: 20.0,
            color: Rgb::ACCENT,
        });
        layout
    }

    #[test]
    fn test_canvas_is_scaled() {
        let raster = SkiaRasterizer::new().rasterize(&shapes_only(), 2.0).unwrap();
        assert_eq!((raster.width(), raster.height()), (1588, 2246));
    }

    #[test]
    fn test_background_is_white_and_shapes_are_drawn() {
        let raster = SkiaRasterizer::new().rasterize(&shapes_only(), 1.0).unwrap();
        assert_eq!(raster.pixel(700, 1000), Some([255, 255, 255, 255]));
        assert_eq!(raster.pixel(100, 10), Some([0, 0, 0, 255]));

        let arrow = raster.pixel(105, 100).unwrap();
        assert_eq!(arrow, [0xf3, 0x70, 0x21, 255]);
    }

    #[test]
    fn test_invalid_scale_is_rejected() {
        let rasterizer = SkiaRasterizer::new();
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = rasterizer.rasterize(&shapes_only(), scale).unwrap_err();
            assert!(matches!(err, RenderError::InvalidRegion(_)));
        }
    }

    #[test]
    fn test_empty_canvas_is_rejected() {
        let err = SkiaRasterizer::new()
            .rasterize(&CoverLayout::new(0.0, 100.0), 2.0)
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidRegion(_)));
    }

    #[test]
    fn test_text_without_font_fails() {
        let layout = CoverLayout::build(&CoverPageInfo::new(), &CoverRegion::a4());
        let err = SkiaRasterizer::new().rasterize(&layout, 1.0).unwrap_err();
        assert!(matches!(err, RenderError::FontUnavailable(_)));
    }

    #[test]
    fn test_encode_png_signature() {
        let raster = Raster::new(4, 3).unwrap();
        let png = raster.encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_bad_logo_is_rejected() {
        let err = SkiaRasterizer::new().with_logo_png(b"not a png").unwrap_err();
        assert!(matches!(err, RenderError::Logo(_)));
    }

    #[test]
    fn test_logo_png_is_drawn() {
        let mut logo = Pixmap::new(8, 8).unwrap();
        logo.fill(Color::from_rgba8(0, 0, 255, 255));
        let png = logo.encode_png().unwrap();

        let mut layout = CoverLayout::new(100.0, 100.0);
        layout.push(LayoutItem::Logo {
            x: 20.0,
            y: 20.0,
            size: 40.0,
            opacity: 1.0,
        });
        let raster = SkiaRasterizer::new()
            .with_logo_png(&png)
            .unwrap()
            .rasterize(&layout, 1.0)
            .unwrap();
        let [r, _, b, _] = raster.pixel(40, 40).unwrap();
        assert!(r < 16 && b > 240);
        assert_eq!(raster.pixel(5, 5), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_full_cover_page_with_system_font() {
        // Hosts without any system fonts skip this check
        let Ok(rasterizer) = SkiaRasterizer::from_system("sans-serif") else {
            return;
        };
        let info = CoverPageInfo::new()
            .with(FieldName::StudentName, "Jane Doe")
            .with(FieldName::CourseName, "C".repeat(300));
        let region = CoverRegion::preview(0.5).for_capture();
        let layout = CoverLayout::build(&info, &region);

        let raster = rasterizer.rasterize(&layout, 2.0).unwrap();
        assert_eq!((raster.width(), raster.height()), (1588, 2246));
        assert!(rasterizer.has_fonts());
    }
}
