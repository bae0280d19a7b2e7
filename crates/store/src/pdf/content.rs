//! PDF Content Stream Generation
//!
//! Builder for the page content stream. Only the graphics state and
//! XObject operators are needed to paint one image:
//!
//! - q/Q: Save/restore graphics state
//! - cm: Concatenate transformation matrix
//! - Do: Paint an XObject

use super::objects::format_real;
use std::io::Write;

/// Content stream builder
#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Save the current graphics state (q)
    pub fn save_state(&mut self) -> &mut Self {
        self.data.extend_from_slice(b"q\n");
        self
    }

    /// Restore the graphics state (Q)
    pub fn restore_state(&mut self) -> &mut Self {
        self.data.extend_from_slice(b"Q\n");
        self
    }

    /// Concatenate a transformation matrix (cm)
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        let _ = writeln!(
            self.data,
            "{} {} {} {} {} {} cm",
            format_real(a),
            format_real(b),
            format_real(c),
            format_real(d),
            format_real(e),
            format_real(f)
        );
        self
    }

    /// Paint an XObject (Do)
    pub fn draw_xobject(&mut self, name: &str) -> &mut Self {
        let _ = writeln!(self.data, "/{} Do", name);
        self
    }

    /// Paint an image XObject into the rectangle `(x, y, width, height)`,
    /// given in points from the bottom-left corner
    pub fn draw_image(&mut self, name: &str, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.save_state()
            .transform(width, 0.0, 0.0, height, x, y)
            .draw_xobject(name)
            .restore_state()
    }
}
