//! WASM bridge for the petition page. Exposes the signature pad and the
//! petition helpers to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards its
//! canvas mouse/touch listeners to `SignatureCanvas` and calls `clear`,
//! `is_empty` and `export_image` from the form.

mod canvas2d;

use canvas2d::CanvasSurface;
use kurbo::Point;
use petition_core::model::SurfaceConfig;
use petition_core::petition::PetitionForm;
use petition_core::share::ShareLinks;
use petition_core::signature::{CLEAR_LABEL, SIGN_HERE_HINT};
use petition_core::stats::{self, Report};
use petition_core::{Petitioner, SignatureControl};
use petition_editor::input::{MouseInput, PointerInput, TouchInput};
use petition_editor::pad::{SignaturePad, StrokeState};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, TouchEvent};

/// Signature pad bound to one `<canvas>` element.
#[wasm_bindgen]
pub struct SignatureCanvas {
    pad: SignaturePad<CanvasSurface>,
}

#[wasm_bindgen]
impl SignatureCanvas {
    /// Size the canvas (default 500×200) and take its 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, width: Option<u32>, height: Option<u32>) -> Self {
        console_error_panic_hook_setup();

        let defaults = SurfaceConfig::default();
        let config = SurfaceConfig {
            width: width.unwrap_or(defaults.width),
            height: height.unwrap_or(defaults.height),
        };
        canvas.set_width(config.width);
        canvas.set_height(config.height);

        Self {
            pad: SignaturePad::new(CanvasSurface::new(canvas), config),
        }
    }

    /// `mousedown` / `touchstart`.
    pub fn pointer_down(&mut self, event: &Event) {
        if let Some(input) = HostInput::from_event(event) {
            self.pad.pointer_down(input.as_pointer());
        }
    }

    /// `mousemove` / `touchmove`.
    pub fn pointer_move(&mut self, event: &Event) {
        if self.pad.stroke_state() != StrokeState::Drawing {
            return;
        }
        if let Some(input) = HostInput::from_event(event) {
            self.pad.pointer_move(input.as_pointer());
        }
    }

    /// `mouseup` / `touchend`.
    pub fn pointer_up(&mut self) {
        self.pad.pointer_up();
    }

    /// `mouseleave`.
    pub fn pointer_leave(&mut self) {
        self.pad.pointer_leave();
    }

    pub fn clear(&mut self) {
        self.pad.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pad.is_empty()
    }

    /// PNG data URL, or `undefined` when nothing was drawn.
    pub fn export_image(&self) -> Option<String> {
        self.pad.export_image().map(|img| img.into_data_url())
    }

    /// Whether the page should show the "sign here" overlay.
    pub fn placeholder_visible(&self) -> bool {
        self.pad.placeholder_visible()
    }

    pub fn hint_text() -> String {
        SIGN_HERE_HINT.to_string()
    }

    pub fn clear_label() -> String {
        CLEAR_LABEL.to_string()
    }

    /// Validate the form against this signature.
    /// Returns JSON: `{"ok":true,"payload":{...}}` or `{"ok":false,"error":"..."}`.
    pub fn submission(
        &self,
        name: &str,
        position: &str,
        other_position: &str,
        address: &str,
    ) -> String {
        let form = PetitionForm {
            name: name.to_string(),
            position: position.to_string(),
            other_position: other_position.to_string(),
            address: address.to_string(),
        };
        match form.submission(&self.pad) {
            Ok(payload) => match serde_json::to_string(&payload) {
                Ok(json) => format!(r#"{{"ok":true,"payload":{json}}}"#),
                Err(e) => error_json(&format!("Serialization error: {e}")),
            },
            Err(e) => error_json(&e.to_string()),
        }
    }
}

/// A mouse or touch event reduced to what the pad needs.
enum HostInput {
    Mouse(MouseInput),
    Touch(TouchInput),
}

impl HostInput {
    fn from_event(event: &Event) -> Option<Self> {
        if let Some(touch) = event.dyn_ref::<TouchEvent>() {
            let list = touch.touches();
            let contacts = (0..list.length())
                .filter_map(|i| list.get(i))
                .map(|t| Point::new(t.client_x() as f64, t.client_y() as f64));
            return Some(Self::Touch(TouchInput::from_contacts(contacts)));
        }
        // PointerEvent is a MouseEvent too.
        let mouse = event.dyn_ref::<MouseEvent>()?;
        Some(Self::Mouse(MouseInput::new(
            mouse.client_x() as f64,
            mouse.client_y() as f64,
        )))
    }

    fn as_pointer(&self) -> &dyn PointerInput {
        match self {
            Self::Mouse(m) => m as &dyn PointerInput,
            Self::Touch(t) => t as &dyn PointerInput,
        }
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("petition WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "ok": false, "error": message }).to_string()
}

// ─── Standalone helpers (no canvas needed) ───────────────────────────────

/// Share URLs for `url`. Returns JSON `{"url":..,"whatsapp":..,"facebook":..,"twitter":..}`.
#[wasm_bindgen]
pub fn share_links(url: &str) -> String {
    serde_json::to_string(&ShareLinks::for_url(url)).unwrap_or_else(|e| error_json(&e.to_string()))
}

#[wasm_bindgen]
pub fn parse_regency(address: &str) -> String {
    petition_core::parse_regency(address)
}

#[wasm_bindgen]
pub fn parse_village(address: &str) -> String {
    petition_core::parse_village(address)
}

/// Statistics for a JSON array of petitioner rows.
/// Returns JSON `{"ok":true,"report":{...}|null,"villages":[...],"show_villages":bool}`
/// or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn statistics(rows_json: &str) -> String {
    let rows: Vec<Petitioner> = match serde_json::from_str(rows_json) {
        Ok(rows) => rows,
        Err(e) => return error_json(&format!("Invalid rows: {e}")),
    };
    let villages = stats::village_stats(&rows);
    serde_json::json!({
        "ok": true,
        "report": Report::build(&rows),
        "show_villages": stats::village_stats_meaningful(&villages),
        "villages": villages,
    })
    .to_string()
}
