//! Cover page layout
//!
//! Converts a [`CoverPageInfo`] and a [`CoverRegion`] into a flat list of
//! positioned drawing items in logical pixels (origin top-left, y down).
//! The rasterizer measures text; the layout only fixes anchors and the
//! width each text run may occupy.

use crate::CoverRegion;
use cover_model::{CoverPageInfo, FieldName};
use serde::{Deserialize, Serialize};

/// Title printed under the logo
pub const UNIVERSITY_NAME: &str = "United International University";
/// Text drawn in the logo badge when no logo image is configured
pub const MONOGRAM: &str = "UIU";

/// Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const INK: Rgb = Rgb::new(0x1f, 0x29, 0x37);
    pub const ACCENT: Rgb = Rgb::new(0xf3, 0x70, 0x21);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Horizontal anchoring of a text run relative to its `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
}

/// A single-line text run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub text: String,
    /// Anchor x (left edge or center depending on `align`)
    pub x: f32,
    /// Baseline y
    pub baseline: f32,
    /// Font size in logical pixels
    pub size: f32,
    pub weight: FontWeight,
    pub color: Rgb,
    pub align: TextAlign,
    /// Widest the run may be; longer text is shrunk to fit
    pub max_width: f32,
}

/// A positioned drawing item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutItem {
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Rgb,
    },
    /// Right-pointing arrowhead whose back edge sits at `x` and whose axis is `y`
    Arrow { x: f32, y: f32, size: f32, color: Rgb },
    /// Square box holding the logo image (or the monogram badge)
    Logo {
        x: f32,
        y: f32,
        size: f32,
        opacity: f32,
    },
    Text(TextItem),
}

/// The laid-out cover page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverLayout {
    pub width: f32,
    pub height: f32,
    pub items: Vec<LayoutItem>,
}

const LABEL_SIZE: f32 = 20.0;
const DETAIL_SIZE: f32 = 18.0;
const TITLE_SIZE: f32 = 30.0;
const ROW_GAP: f32 = 70.0;
const DETAIL_GAP: f32 = 34.0;
const ARROW_SIZE: f32 = 16.0;

impl CoverLayout {
    /// An empty layout of the given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: LayoutItem) {
        self.items.push(item);
    }

    /// Lay the cover page out for `info` on `region`
    pub fn build(info: &CoverPageInfo, region: &CoverRegion) -> Self {
        let mut layout = Self::new(region.width, region.height);
        let (left, top, content_width, _) = region.content_box();
        let center = region.width / 2.0;

        layout.corner_lines();

        let logo_size = 130.0;
        layout.push(LayoutItem::Logo {
            x: center - logo_size / 2.0,
            y: top + 10.0,
            size: logo_size,
            opacity: 1.0,
        });

        layout.push(LayoutItem::Text(TextItem {
            text: UNIVERSITY_NAME.to_string(),
            x: center,
            baseline: top + 10.0 + logo_size + 50.0,
            size: TITLE_SIZE,
            weight: FontWeight::Bold,
            color: Rgb::INK,
            align: TextAlign::Center,
            max_width: content_width,
        }));

        let watermark_size = 420.0;
        layout.push(LayoutItem::Logo {
            x: center - watermark_size / 2.0,
            y: region.height / 2.0 + 60.0 - watermark_size / 2.0,
            size: watermark_size,
            opacity: 0.07,
        });

        let mut rows = InfoRows {
            layout: &mut layout,
            label_x: left + 20.0,
            value_x: left + 245.0,
            right: region.width - region.padding,
            baseline: 380.0,
        };

        rows.value_row("Assignment No :", info.get(FieldName::AssignmentNumber));
        rows.detail_row("Course Title :", &[info.get(FieldName::CourseName).to_string()]);
        rows.detail_row(
            "Submitted by :",
            &[
                info.get(FieldName::StudentName).to_string(),
                format!("ID : {}", info.get(FieldName::StudentId)),
                format!("Section : {}", info.get(FieldName::Section)),
                format!("Department of {}", info.get(FieldName::DepartmentOfStudent)),
            ],
        );
        rows.detail_row(
            "Submitted to :",
            &[
                info.get(FieldName::TeacherName).to_string(),
                format!(
                    "Lecturer, Department of {}",
                    info.get(FieldName::DepartmentOfTeacher)
                ),
            ],
        );
        rows.value_row("Date of Submission", info.get(FieldName::SubmissionDate));

        let bottom = region.height - region.padding - 5.0;
        layout.push(LayoutItem::Line {
            x1: left,
            y1: bottom,
            x2: left + content_width,
            y2: bottom,
            width: 4.0,
            color: Rgb::ACCENT,
        });

        layout
    }

    /// Text runs in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &TextItem> {
        self.items.iter().filter_map(|item| match item {
            LayoutItem::Text(text) => Some(text),
            _ => None,
        })
    }

    fn corner_lines(&mut self) {
        let origin = 40.0;
        self.push(LayoutItem::Line {
            x1: origin,
            y1: origin,
            x2: origin,
            y2: 260.0,
            width: 3.0,
            color: Rgb::ACCENT,
        });
        for (i, length) in [260.0, 200.0, 140.0].into_iter().enumerate() {
            let y = origin + i as f32 * 12.0;
            self.push(LayoutItem::Line {
                x1: origin,
                y1: y,
                x2: origin + length,
                y2: y,
                width: 3.0,
                color: Rgb::ACCENT,
            });
        }
    }
}

/// Cursor over the information section
struct InfoRows<'a> {
    layout: &'a mut CoverLayout,
    label_x: f32,
    value_x: f32,
    right: f32,
    baseline: f32,
}

impl InfoRows<'_> {
    fn label(&mut self) -> TextItem {
        TextItem {
            text: String::new(),
            x: self.label_x,
            baseline: self.baseline,
            size: LABEL_SIZE,
            weight: FontWeight::Bold,
            color: Rgb::INK,
            align: TextAlign::Left,
            max_width: self.value_x - self.label_x - 10.0,
        }
    }

    fn value_row(&mut self, label: &str, value: &str) {
        let label_item = TextItem {
            text: label.to_string(),
            ..self.label()
        };
        self.layout.push(LayoutItem::Text(label_item));
        self.layout.push(LayoutItem::Text(TextItem {
            text: value.to_string(),
            x: self.value_x,
            baseline: self.baseline,
            size: LABEL_SIZE,
            weight: FontWeight::Normal,
            color: Rgb::BLACK,
            align: TextAlign::Left,
            max_width: self.right - self.value_x,
        }));
        self.baseline += ROW_GAP;
    }

    fn detail_row(&mut self, label: &str, details: &[String]) {
        let label_item = TextItem {
            text: label.to_string(),
            ..self.label()
        };
        self.layout.push(LayoutItem::Text(label_item));

        let text_x = self.value_x + ARROW_SIZE + 10.0;
        for (i, detail) in details.iter().enumerate() {
            let baseline = self.baseline + i as f32 * DETAIL_GAP;
            self.layout.push(LayoutItem::Arrow {
                x: self.value_x,
                y: baseline - DETAIL_SIZE * 0.35,
                size: ARROW_SIZE,
                color: Rgb::ACCENT,
            });
            self.layout.push(LayoutItem::Text(TextItem {
                text: detail.clone(),
                x: text_x,
                baseline,
                size: DETAIL_SIZE,
                weight: FontWeight::Normal,
                color: Rgb::BLACK,
                align: TextAlign::Left,
                max_width: self.right - text_x,
            }));
        }
        let used = details.len().saturating_sub(1) as f32 * DETAIL_GAP;
        self.baseline += used + ROW_GAP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CoverPageInfo {
        CoverPageInfo::new()
            .with(FieldName::AssignmentNumber, "3")
            .with(FieldName::CourseName, "CS101")
            .with(FieldName::StudentName, "Jane Doe")
            .with(FieldName::StudentId, "011221001")
            .with(FieldName::Section, "B")
            .with(FieldName::DepartmentOfStudent, "CSE")
            .with(FieldName::TeacherName, "Dr. Smith")
            .with(FieldName::DepartmentOfTeacher, "EEE")
            .with(FieldName::SubmissionDate, "2024-01-15")
    }

    #[test]
    fn test_layout_matches_region() {
        let layout = CoverLayout::build(&sample(), &CoverRegion::a4());
        assert_eq!(layout.width, 794.0);
        assert_eq!(layout.height, 1123.0);
    }

    #[test]
    fn test_every_field_is_printed() {
        let layout = CoverLayout::build(&sample(), &CoverRegion::a4());
        let texts: Vec<_> = layout.texts().map(|t| t.text.as_str()).collect();

        assert!(texts.contains(&UNIVERSITY_NAME));
        assert!(texts.contains(&"3"));
        assert!(texts.contains(&"CS101"));
        assert!(texts.contains(&"Jane Doe"));
        assert!(texts.contains(&"ID : 011221001"));
        assert!(texts.contains(&"Section : B"));
        assert!(texts.contains(&"Department of CSE"));
        assert!(texts.contains(&"Dr. Smith"));
        assert!(texts.contains(&"Lecturer, Department of EEE"));
        assert!(texts.contains(&"2024-01-15"));
    }

    #[test]
    fn test_one_arrow_per_detail_item() {
        let layout = CoverLayout::build(&sample(), &CoverRegion::a4());
        let arrows = layout
            .items
            .iter()
            .filter(|item| matches!(item, LayoutItem::Arrow { .. }))
            .count();
        assert_eq!(arrows, 7);
    }

    #[test]
    fn test_text_stays_inside_page() {
        let long = "W".repeat(500);
        let info = sample().with(FieldName::CourseName, long.as_str());
        let layout = CoverLayout::build(&info, &CoverRegion::a4());

        for text in layout.texts() {
            assert!(text.baseline > 0.0 && text.baseline < layout.height);
            assert!(text.max_width > 0.0);
            match text.align {
                TextAlign::Left => assert!(text.x + text.max_width <= layout.width),
                TextAlign::Center => assert!(text.max_width <= layout.width),
            }
        }
    }

    #[test]
    fn test_empty_record_still_lays_out() {
        let layout = CoverLayout::build(&CoverPageInfo::new(), &CoverRegion::a4());
        assert!(layout.texts().any(|t| t.text == "ID : "));
    }
}
