//! Placement of a raster image on a PDF page
//!
//! The image is aspect-fit into the page and centered along the axis it
//! does not fill. Placement is computed in millimetres from the top-left
//! corner and converted to points (bottom-left origin) when written.

/// Points per millimetre
pub const PT_PER_MM: f64 = 72.0 / 25.4;

/// A page size in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSize {
    /// ISO A4 portrait
    pub const A4: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    pub fn aspect(&self) -> f64 {
        self.width_mm / self.height_mm
    }

    /// Width and height in points
    pub fn to_points(&self) -> (f64, f64) {
        (self.width_mm * PT_PER_MM, self.height_mm * PT_PER_MM)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Where the image lands on the page, in millimetres from the top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    /// The placement as a PDF rectangle `(x, y, width, height)` in points,
    /// with `y` measured up from the bottom edge
    pub fn to_points(&self, page: PageSize) -> (f64, f64, f64, f64) {
        let bottom = page.height_mm - self.y - self.height;
        (
            self.x * PT_PER_MM,
            bottom * PT_PER_MM,
            self.width * PT_PER_MM,
            self.height * PT_PER_MM,
        )
    }
}

/// Aspect-fit an image of `image_width` x `image_height` pixels into `page`.
///
/// A wider-than-page image spans the full width and is centered
/// vertically; otherwise it spans the full height and is centered
/// horizontally.
pub fn fit_to_page(image_width: u32, image_height: u32, page: PageSize) -> Placement {
    let image_aspect = image_width as f64 / image_height.max(1) as f64;

    if image_aspect > page.aspect() {
        let height = page.width_mm / image_aspect;
        Placement {
            x: 0.0,
            y: (page.height_mm - height) / 2.0,
            width: page.width_mm,
            height,
        }
    } else {
        let width = page.height_mm * image_aspect;
        Placement {
            x: (page.width_mm - width) / 2.0,
            y: 0.0,
            width,
            height: page.height_mm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_cover_raster_fills_height() {
        // 1588x2246 is a hair narrower than A4
        let p = fit_to_page(1588, 2246, PageSize::A4);
        assert_eq!(p.y, 0.0);
        assert_eq!(p.height, 297.0);
        assert!((p.width - 297.0 * 1588.0 / 2246.0).abs() < EPS);
        assert!(p.x > 0.0 && p.x < 0.1);
    }

    #[test]
    fn test_wide_image_fills_width() {
        let p = fit_to_page(2000, 1000, PageSize::A4);
        assert_eq!((p.x, p.width), (0.0, 210.0));
        assert!((p.height - 105.0).abs() < EPS);
        assert!((p.y - 96.0).abs() < EPS);
    }

    #[test]
    fn test_tall_image_fills_height() {
        let p = fit_to_page(1000, 3000, PageSize::A4);
        assert_eq!((p.y, p.height), (0.0, 297.0));
        assert!((p.width - 99.0).abs() < EPS);
        assert!((p.x - 55.5).abs() < EPS);
    }

    #[test]
    fn test_to_points_flips_y() {
        let p = fit_to_page(2000, 1000, PageSize::A4);
        let (x, y, w, h) = p.to_points(PageSize::A4);
        assert_eq!(x, 0.0);
        assert!((y - 96.0 * PT_PER_MM).abs() < 1e-6);
        assert!((w - 210.0 * PT_PER_MM).abs() < 1e-6);
        assert!((h - 105.0 * PT_PER_MM).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_fit_stays_on_page_and_keeps_aspect(w in 1u32..10_000, h in 1u32..10_000) {
            let page = PageSize::A4;
            let p = fit_to_page(w, h, page);

            prop_assert!(p.x >= -EPS && p.y >= -EPS);
            prop_assert!(p.x + p.width <= page.width_mm + 1e-6);
            prop_assert!(p.y + p.height <= page.height_mm + 1e-6);

            // One axis always spans the page
            let spans_width = (p.width - page.width_mm).abs() < 1e-6;
            let spans_height = (p.height - page.height_mm).abs() < 1e-6;
            prop_assert!(spans_width || spans_height);

            // Centered on the other axis
            prop_assert!((p.x * 2.0 + p.width - page.width_mm).abs() < 1e-6);
            prop_assert!((p.y * 2.0 + p.height - page.height_mm).abs() < 1e-6);

            let aspect = w as f64 / h as f64;
            prop_assert!((p.width / p.height - aspect).abs() / aspect < 1e-9);
        }
    }
}
