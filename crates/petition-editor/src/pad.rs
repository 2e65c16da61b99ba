//! Freehand signature pad.
//!
//! Two states: `Idle` and `Drawing`. A begin event opens a path at the
//! pointer, each move while drawing strokes one segment immediately, and an
//! end or leave closes the path. `clear` erases everything from either state.
//!
//! The pad never fails. If the surface has no drawing context (or no layout
//! yet), input is dropped: no stroke, no ink, no error.

use crate::input::{PadEvent, PointerInput, to_local};
use kurbo::Point;
use petition_core::model::{InkStyle, SurfaceConfig};
use petition_core::{InkSurface, SignatureControl, SignatureImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeState {
    /// No stroke in progress.
    Idle,
    /// A stroke is open and moves extend it.
    Drawing,
}

pub struct SignaturePad<S: InkSurface> {
    surface: S,
    config: SurfaceConfig,
    style: InkStyle,
    state: StrokeState,
    /// Set on the first begin since creation or the last clear.
    has_ink: bool,
    strokes: usize,
}

impl<S: InkSurface> SignaturePad<S> {
    /// Create a pad with the standard pen (black, 2px, round caps/joins).
    pub fn new(surface: S, config: SurfaceConfig) -> Self {
        Self::with_style(surface, config, InkStyle::default())
    }

    pub fn with_style(mut surface: S, config: SurfaceConfig, style: InkStyle) -> Self {
        if let Some(ctx) = surface.context_mut() {
            ctx.apply_style(&style);
        }
        Self {
            surface,
            config,
            style,
            state: StrokeState::Idle,
            has_ink: false,
            strokes: 0,
        }
    }

    /// Dispatch a normalized pointer event.
    pub fn handle(&mut self, event: PadEvent<'_>) {
        match event {
            PadEvent::Begin(input) => self.pointer_down(input),
            PadEvent::Move(input) => self.pointer_move(input),
            PadEvent::End => self.pointer_up(),
            PadEvent::Leave => self.pointer_leave(),
        }
    }

    /// Mouse down / touch start, in page coordinates.
    pub fn pointer_down(&mut self, input: &dyn PointerInput) {
        if let Some(local) = self.local_point(input) {
            self.begin_at(local);
        }
    }

    /// Mouse move / touch move, in page coordinates. Ignored while idle.
    pub fn pointer_move(&mut self, input: &dyn PointerInput) {
        if self.state != StrokeState::Drawing {
            return;
        }
        if let Some(local) = self.local_point(input) {
            self.extend_to(local);
        }
    }

    /// Mouse up / touch end.
    pub fn pointer_up(&mut self) {
        self.end_stroke();
    }

    /// Pointer left the surface; handled exactly like an end.
    pub fn pointer_leave(&mut self) {
        self.end_stroke();
    }

    /// Start a stroke at a surface-local point.
    pub fn begin_at(&mut self, local: Point) {
        let style = self.style;
        let Some(ctx) = self.surface.context_mut() else {
            log::debug!("begin ignored: no drawing context");
            return;
        };
        // Re-applied so a context attached after construction gets the pen too.
        ctx.apply_style(&style);
        ctx.begin_path(local);

        self.state = StrokeState::Drawing;
        self.has_ink = true;
        self.strokes += 1;
        log::debug!("stroke {} begins at ({:.1}, {:.1})", self.strokes, local.x, local.y);
    }

    /// Extend the open stroke to a surface-local point and draw the segment.
    pub fn extend_to(&mut self, local: Point) {
        if self.state != StrokeState::Drawing {
            return;
        }
        match self.surface.context_mut() {
            Some(ctx) => {
                ctx.line_to(local);
                log::trace!("stroke to ({:.1}, {:.1})", local.x, local.y);
            }
            None => log::debug!("move ignored: no drawing context"),
        }
    }

    /// Close the open stroke, if any.
    pub fn end_stroke(&mut self) {
        if self.state != StrokeState::Drawing {
            return;
        }
        if let Some(ctx) = self.surface.context_mut() {
            ctx.close_path();
        }
        self.state = StrokeState::Idle;
        log::debug!("stroke {} ends", self.strokes);
    }

    pub fn stroke_state(&self) -> StrokeState {
        self.state
    }

    /// Whether the host should overlay the "sign here" hint.
    pub fn placeholder_visible(&self) -> bool {
        !self.has_ink
    }

    /// Strokes begun since creation or the last clear.
    pub fn stroke_count(&self) -> usize {
        self.strokes
    }

    pub fn config(&self) -> SurfaceConfig {
        self.config
    }

    pub fn style(&self) -> &InkStyle {
        &self.style
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for layout changes (attach, move, detach).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Translate against the surface's current page rectangle.
    /// Read fresh every time; layout may have shifted since the last event.
    fn local_point(&self, input: &dyn PointerInput) -> Option<Point> {
        let rect = self.surface.page_rect()?;
        to_local(input, rect)
    }
}

impl<S: InkSurface> SignatureControl for SignaturePad<S> {
    fn clear(&mut self) {
        if let Some(ctx) = self.surface.context_mut() {
            ctx.clear();
        }
        self.state = StrokeState::Idle;
        self.has_ink = false;
        self.strokes = 0;
        log::debug!("signature cleared");
    }

    fn is_empty(&self) -> bool {
        !self.has_ink
    }

    fn export_image(&self) -> Option<SignatureImage> {
        if !self.has_ink {
            return None;
        }
        self.surface.context()?.export_png()
    }
}
