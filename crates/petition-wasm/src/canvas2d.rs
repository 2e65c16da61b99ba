//! Canvas2D backend.
//!
//! Issues the pad's path commands straight to a `CanvasRenderingContext2d`
//! and lets the browser do the rasterizing and PNG encoding.

use kurbo::{Point, Rect};
use petition_core::model::InkStyle;
use petition_core::{InkSurface, RenderContext, SignatureImage};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasContext {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl RenderContext for CanvasContext {
    fn apply_style(&mut self, style: &InkStyle) {
        self.ctx.set_stroke_style_str(&style.color.to_hex());
        self.ctx.set_line_width(style.width);
        self.ctx.set_line_cap(style.cap.as_css());
        self.ctx.set_line_join(style.join.as_css());
    }

    fn begin_path(&mut self, at: Point) {
        self.ctx.begin_path();
        self.ctx.move_to(at.x, at.y);
    }

    fn line_to(&mut self, to: Point) {
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn clear(&mut self) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn export_png(&self) -> Option<SignatureImage> {
        let url = match self.canvas.to_data_url_with_type("image/png") {
            Ok(url) => url,
            Err(e) => {
                log::warn!("toDataURL failed: {e:?}");
                return None;
            }
        };
        match SignatureImage::from_data_url(url) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("unexpected data URL from canvas: {e}");
                None
            }
        }
    }
}

/// An HTML `<canvas>` element and, when the browser provides one, its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: Option<CanvasContext>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let context = context_2d(&canvas).map(|ctx| CanvasContext {
            canvas: canvas.clone(),
            ctx,
        });
        if context.is_none() {
            log::warn!("canvas has no 2d context; signature input disabled");
        }
        Self { canvas, context }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
}

impl InkSurface for CanvasSurface {
    fn page_rect(&self) -> Option<Rect> {
        // Client-space rectangle, matching the event's client coordinates.
        let r = self.canvas.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.right(), r.bottom()))
    }

    fn context(&self) -> Option<&dyn RenderContext> {
        self.context.as_ref().map(|c| c as &dyn RenderContext)
    }

    fn context_mut(&mut self) -> Option<&mut dyn RenderContext> {
        self.context.as_mut().map(|c| c as &mut dyn RenderContext)
    }
}
