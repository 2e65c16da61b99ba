//! Software renderer for signature surfaces.
//!
//! Strokes land in an RGBA pixel buffer instead of an HTML canvas, so the
//! signature pad can run natively and be inspected pixel by pixel in tests.

pub mod encode;
pub mod raster;

pub use encode::{EncodeError, encode_png};
pub use raster::{RasterContext, RasterSurface};
