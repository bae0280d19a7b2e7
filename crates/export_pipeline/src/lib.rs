//! Export Pipeline - From field record to saved PDF
//!
//! One export runs these steps in order, each awaited before the next:
//! guard, validate, locate region, rasterize, encode PNG, assemble PDF,
//! derive filename, save. CPU-bound steps run on the blocking pool so the
//! form stays responsive.

mod control;
mod error;
mod metadata;
mod notify;
mod pipeline;

pub use control::*;
pub use error::*;
pub use metadata::*;
pub use notify::*;
pub use pipeline::*;
