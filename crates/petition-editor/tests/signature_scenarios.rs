//! Integration tests: signature pad (petition-editor) on the raster backend
//! (petition-render).
//!
//! Drives full pointer sequences through a real pixel buffer and checks the
//! host-facing contract: emptiness, export, clear, and what ends up inked.

use image::ImageFormat;
use kurbo::{Point, Rect};
use petition_core::model::SurfaceConfig;
use petition_core::SignatureControl;
use petition_editor::input::{MouseInput, PadEvent, TouchInput};
use petition_editor::pad::{SignaturePad, StrokeState};
use petition_render::RasterSurface;
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn new_pad() -> SignaturePad<RasterSurface> {
    init_logging();
    let config = SurfaceConfig {
        width: 500,
        height: 200,
    };
    SignaturePad::new(RasterSurface::new(config), config)
}

fn inked_near(pad: &SignaturePad<RasterSurface>, x: f64, y: f64) -> bool {
    pad.surface()
        .raster()
        .map(|r| r.has_ink_in(Rect::new(x - 2.0, y - 2.0, x + 2.0, y + 2.0)))
        .unwrap_or(false)
}

fn stroke(pad: &mut SignaturePad<RasterSurface>, from: (f64, f64), to: (f64, f64)) {
    pad.handle(PadEvent::Begin(&MouseInput::new(from.0, from.1)));
    pad.handle(PadEvent::Move(&MouseInput::new(to.0, to.1)));
}

// ─── End-to-end scenarios ───────────────────────────────────────────────

#[test]
fn scenario_a_single_stroke_exports_png() {
    let mut pad = new_pad();
    assert!(pad.is_empty());

    stroke(&mut pad, (10.0, 10.0), (50.0, 50.0));
    pad.handle(PadEvent::End);

    assert!(!pad.is_empty());
    let image = pad.export_image().expect("signature should export");
    let png = image.to_png_bytes().unwrap();
    let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(decoded.dimensions(), (500, 200));
    assert!(decoded.get_pixel(30, 30).0[3] > 0, "midpoint should be inked");
    assert_eq!(decoded.get_pixel(400, 150).0, [0, 0, 0, 0]);
}

#[test]
fn scenario_b_clear_after_stroke() {
    let mut pad = new_pad();
    stroke(&mut pad, (10.0, 10.0), (50.0, 50.0));
    pad.handle(PadEvent::End);

    pad.clear();
    assert!(pad.is_empty());
    assert!(pad.export_image().is_none());
    assert!(pad.placeholder_visible());
    assert_eq!(pad.surface().raster().map(|r| r.inked_pixel_count()), Some(0));
}

#[test]
fn scenario_c_leave_closes_stroke_and_next_begin_is_independent() {
    let mut pad = new_pad();
    stroke(&mut pad, (10.0, 10.0), (50.0, 50.0));
    pad.handle(PadEvent::Leave);
    assert_eq!(pad.stroke_state(), StrokeState::Idle);

    stroke(&mut pad, (60.0, 60.0), (100.0, 60.0));
    pad.handle(PadEvent::End);

    assert_eq!(pad.stroke_count(), 2);
    assert!(inked_near(&pad, 30.0, 30.0), "first stroke");
    assert!(inked_near(&pad, 80.0, 60.0), "second stroke");
    // No connecting segment from (50,50) to (60,60).
    assert!(!inked_near(&pad, 55.0, 55.0));
    assert!(pad.export_image().is_some());
}

// ─── Properties ─────────────────────────────────────────────────────────

/// Small deterministic generator so the sequences are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn coord(&mut self, max: u32) -> f64 {
        (self.next_u64() % max as u64) as f64
    }
}

#[test]
fn any_in_bounds_sequence_leaves_ink_and_exports() {
    let mut rng = Lcg(7);
    for _ in 0..25 {
        let mut pad = new_pad();
        let strokes = 1 + rng.next_u64() % 3;
        for _ in 0..strokes {
            let start = MouseInput::new(rng.coord(500), rng.coord(200));
            pad.handle(PadEvent::Begin(&start));
            for _ in 0..(rng.next_u64() % 6) {
                let to = MouseInput::new(rng.coord(500), rng.coord(200));
                pad.handle(PadEvent::Move(&to));
            }
            pad.handle(PadEvent::End);
        }
        assert!(!pad.is_empty());
        assert!(pad.export_image().is_some());
    }
}

#[test]
fn clear_always_empties() {
    let mut pad = new_pad();
    pad.clear();
    assert!(pad.is_empty());

    pad.handle(PadEvent::Begin(&MouseInput::new(5.0, 5.0)));
    pad.clear();
    assert!(pad.is_empty());
    assert_eq!(pad.stroke_state(), StrokeState::Idle);

    pad.clear();
    assert!(pad.is_empty());
}

#[test]
fn move_without_begin_leaves_surface_blank() {
    let mut pad = new_pad();
    pad.handle(PadEvent::Move(&MouseInput::new(50.0, 50.0)));
    pad.handle(PadEvent::Move(&MouseInput::new(80.0, 90.0)));
    assert!(pad.is_empty());
    assert_eq!(pad.surface().raster().map(|r| r.inked_pixel_count()), Some(0));
}

// ─── Coordinates ────────────────────────────────────────────────────────

#[test]
fn scrolled_surface_translates_per_event() {
    let mut pad = new_pad();
    pad.surface_mut().set_page_origin(200.0, 300.0);
    pad.handle(PadEvent::Begin(&MouseInput::new(210.0, 310.0)));

    // Page scrolls by 100px mid-stroke: same page point is now lower on the surface.
    pad.surface_mut().set_page_origin(200.0, 200.0);
    pad.handle(PadEvent::Move(&MouseInput::new(250.0, 250.0)));
    pad.handle(PadEvent::End);

    assert!(inked_near(&pad, 10.0, 10.0));
    assert!(inked_near(&pad, 50.0, 50.0));
}

#[test]
fn second_finger_is_ignored() {
    let mut pad = new_pad();
    let down = TouchInput::from_contacts([Point::new(20.0, 100.0), Point::new(400.0, 20.0)]);
    let drag = TouchInput::from_contacts([Point::new(120.0, 100.0), Point::new(480.0, 180.0)]);
    pad.handle(PadEvent::Begin(&down));
    pad.handle(PadEvent::Move(&drag));
    pad.handle(PadEvent::End);

    assert!(inked_near(&pad, 70.0, 100.0));
    assert!(!inked_near(&pad, 440.0, 100.0));
}

#[test]
fn detached_surface_degrades_silently_until_attached() {
    init_logging();
    let config = SurfaceConfig::default();
    let mut pad = SignaturePad::new(RasterSurface::detached(config), config);

    stroke(&mut pad, (10.0, 10.0), (50.0, 50.0));
    pad.handle(PadEvent::End);
    assert!(pad.is_empty());
    assert!(pad.export_image().is_none());

    pad.surface_mut().attach();
    stroke(&mut pad, (10.0, 10.0), (50.0, 50.0));
    pad.handle(PadEvent::End);
    assert!(!pad.is_empty());
    assert!(inked_near(&pad, 30.0, 30.0));
}
