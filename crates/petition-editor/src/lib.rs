pub mod input;
pub mod pad;

pub use input::{MouseInput, PadEvent, PointerInput, TouchInput, to_local};
pub use pad::{SignaturePad, StrokeState};
