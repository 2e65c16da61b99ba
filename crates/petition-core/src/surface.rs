//! Drawing-surface collaborator traits.
//!
//! A signature pad never touches pixels itself. It asks an [`InkSurface`]
//! where it sits on the page and, if a drawing context is available, issues
//! path commands to it. Backends: the software rasterizer in
//! `petition-render` and the HTML canvas bridge in `petition-wasm`.

use crate::model::InkStyle;
use crate::signature::SignatureImage;
use kurbo::{Point, Rect};

/// Path-based 2D drawing context, modeled on Canvas2D.
pub trait RenderContext {
    /// Set stroke color, width, cap and join for subsequent segments.
    fn apply_style(&mut self, style: &InkStyle);

    /// Start a new path at `at` (surface-local). Draws nothing by itself.
    fn begin_path(&mut self, at: Point);

    /// Extend the current path to `to` and stroke the new segment now.
    fn line_to(&mut self, to: Point);

    /// Close the current path.
    fn close_path(&mut self);

    /// Erase the whole pixel buffer.
    fn clear(&mut self);

    /// Encode the current pixel buffer as PNG. `None` if encoding failed.
    fn export_png(&self) -> Option<SignatureImage>;
}

/// A fixed-size region on the page that hosts a [`RenderContext`].
pub trait InkSurface {
    /// Bounding rectangle in page coordinates, read fresh on each call.
    /// `None` while the surface is not laid out.
    fn page_rect(&self) -> Option<Rect>;

    /// Drawing context, or `None` when unavailable (e.g. not attached yet).
    fn context(&self) -> Option<&dyn RenderContext>;

    fn context_mut(&mut self) -> Option<&mut dyn RenderContext>;
}
