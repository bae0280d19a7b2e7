//! The cover page region and the capture override pass
//!
//! On screen the cover page sits in a preview panel, shrunk by a transform
//! and offset by a margin. Before capture those ambient styles are
//! neutralized so the captured region exactly fills an A4-proportioned
//! canvas.

use serde::{Deserialize, Serialize};

/// A4 width in logical pixels (210 mm at 96 dpi)
pub const A4_WIDTH_PX: f32 = 794.0;
/// A4 height in logical pixels (297 mm at 96 dpi)
pub const A4_HEIGHT_PX: f32 = 1123.0;
/// Inner padding applied while capturing
pub const CAPTURE_PADDING_PX: f32 = 75.0;
/// Pixel density used when rasterizing for export
pub const CAPTURE_SCALE: f32 = 2.0;

/// A 2D scale-and-translate transform applied to the region on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionTransform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl RegionTransform {
    pub const IDENTITY: RegionTransform = RegionTransform {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn scale(scale: f32) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for RegionTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The surface the cover page is laid out on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverRegion {
    /// Layout width in logical pixels (before transform)
    pub width: f32,
    /// Layout height in logical pixels (before transform)
    pub height: f32,
    /// Inner padding on every side
    pub padding: f32,
    /// Outer margin on every side
    pub margin: f32,
    /// On-screen transform
    pub transform: RegionTransform,
}

impl CoverRegion {
    /// An untransformed A4 region, already in capture shape
    pub fn a4() -> Self {
        Self {
            width: A4_WIDTH_PX,
            height: A4_HEIGHT_PX,
            padding: CAPTURE_PADDING_PX,
            margin: 0.0,
            transform: RegionTransform::IDENTITY,
        }
    }

    /// The region as the preview panel shows it: shrunk, padded tighter, and
    /// offset from the panel edge
    pub fn preview(scale: f32) -> Self {
        Self {
            width: A4_WIDTH_PX,
            height: A4_HEIGHT_PX,
            padding: 60.0,
            margin: 24.0,
            transform: RegionTransform::scale(scale),
        }
    }

    pub fn with_transform(mut self, transform: RegionTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Apply the capture overrides to a copy of this region
    pub fn for_capture(&self) -> CoverRegion {
        CaptureOverrides::default().apply(self)
    }

    /// Whether the region already matches the capture overrides
    pub fn is_capture_ready(&self) -> bool {
        *self == self.for_capture()
    }

    /// Size of the region as displayed, including margin and transform
    pub fn displayed_size(&self) -> (f32, f32) {
        let s = self.transform.scale;
        (
            (self.width + 2.0 * self.margin) * s,
            (self.height + 2.0 * self.margin) * s,
        )
    }

    /// The padded content box as `(x, y, width, height)`
    pub fn content_box(&self) -> (f32, f32, f32, f32) {
        (
            self.padding,
            self.padding,
            (self.width - 2.0 * self.padding).max(0.0),
            (self.height - 2.0 * self.padding).max(0.0),
        )
    }
}

impl Default for CoverRegion {
    fn default() -> Self {
        Self::a4()
    }
}

/// Style overrides applied to the region before it is captured
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOverrides {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
}

impl Default for CaptureOverrides {
    fn default() -> Self {
        Self {
            width: A4_WIDTH_PX,
            height: A4_HEIGHT_PX,
            padding: CAPTURE_PADDING_PX,
        }
    }
}

impl CaptureOverrides {
    /// Reset transform and margin and pin the size and padding
    pub fn apply(&self, region: &CoverRegion) -> CoverRegion {
        let mut captured = *region;
        captured.width = self.width;
        captured.height = self.height;
        captured.padding = self.padding;
        captured.margin = 0.0;
        captured.transform = RegionTransform::IDENTITY;
        captured
    }
}
