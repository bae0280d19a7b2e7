//! Cover Render - Cover page layout and rasterization
//!
//! This crate lays the cover page out on a [`CoverRegion`] and rasterizes
//! that layout into a bitmap, which the export pipeline then encodes and
//! embeds in a PDF.
//!
//! # Architecture
//!
//! - `region`: the preview surface and the capture override pass
//! - `layout`: positions of every line, shape, logo and text run
//! - `font`: system font discovery, shaping, and glyph outlines
//! - `raster`: the tiny-skia rasterizer and the raster/PNG types

mod error;
mod font;
mod layout;
mod raster;
mod region;

pub use error::*;
pub use font::*;
pub use layout::*;
pub use raster::*;
pub use region::*;
