//! RGBA raster context and a surface that hosts it.
//!
//! Each `line_to` strokes exactly one segment, as a capsule (round cap) or a
//! box (butt / square cap) around the segment, anti-aliased over one pixel.
//! With round caps, consecutive segments meet as round joins.

use crate::encode::encode_png;
use image::{Rgba, RgbaImage};
use kurbo::{Line, Point, Rect, Shape};
use petition_core::model::{InkStyle, StrokeCap, SurfaceConfig};
use petition_core::{InkSurface, RenderContext, SignatureImage};

/// Pixel buffer plus the current path cursor.
pub struct RasterContext {
    buffer: RgbaImage,
    style: InkStyle,
    /// Last point of the open path, `None` when no path is open.
    cursor: Option<Point>,
}

impl RasterContext {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            buffer: RgbaImage::new(config.width, config.height),
            style: InkStyle::default(),
            cursor: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn buffer(&self) -> &RgbaImage {
        &self.buffer
    }

    pub fn style(&self) -> &InkStyle {
        &self.style
    }

    /// Pixel at `(x, y)`, `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.buffer.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Number of pixels carrying any ink.
    pub fn inked_pixel_count(&self) -> usize {
        self.buffer.pixels().filter(|p| p.0[3] > 0).count()
    }

    /// Whether any pixel inside `rect` (surface-local) carries ink.
    pub fn has_ink_in(&self, rect: Rect) -> bool {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return false;
        };
        (y0..y1).any(|y| (x0..x1).any(|x| self.buffer.get_pixel(x, y).0[3] > 0))
    }

    /// Integer pixel range covered by `rect`, clipped to the buffer.
    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let w = self.buffer.width() as f64;
        let h = self.buffer.height() as f64;
        let x0 = rect.x0.floor().clamp(0.0, w) as u32;
        let y0 = rect.y0.floor().clamp(0.0, h) as u32;
        let x1 = rect.x1.ceil().clamp(0.0, w) as u32;
        let y1 = rect.y1.ceil().clamp(0.0, h) as u32;
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    /// Rasterize one segment with the current style.
    fn stroke_segment(&mut self, from: Point, to: Point) {
        let half = (self.style.width / 2.0).max(0.5);
        let area = Line::new(from, to).bounding_box().inflate(half + 1.0, half + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(area) else {
            return;
        };

        let len = (to - from).hypot();
        let color = self.style.color;
        let [r, g, b, _] = color.to_rgba8();

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let dist = match segment_distance(self.style.cap, from, to, len, half, center) {
                    Some(d) => d,
                    None => continue,
                };
                let coverage = (half + 0.5 - dist).clamp(0.0, 1.0) as f32;
                if coverage > 0.0 {
                    let alpha = color.a * coverage;
                    blend(self.buffer.get_pixel_mut(x, y), [r, g, b], alpha);
                }
            }
        }
        log::trace!(
            "STROKE ({:.1},{:.1}) -> ({:.1},{:.1}) len={len:.1}",
            from.x,
            from.y,
            to.x,
            to.y
        );
    }
}

/// Distance from `p` to the stroke's centerline under `cap` rules.
/// `None` when `p` lies beyond a butt/square end.
fn segment_distance(
    cap: StrokeCap,
    from: Point,
    to: Point,
    len: f64,
    half: f64,
    p: Point,
) -> Option<f64> {
    if len == 0.0 {
        // A dot: only round caps leave a mark, square caps a square.
        return match cap {
            StrokeCap::Round => Some(p.distance(from)),
            StrokeCap::Square => {
                let d = p - from;
                Some(d.x.abs().max(d.y.abs()))
            }
            StrokeCap::Butt => None,
        };
    }
    let dir = (to - from) / len;
    let along = (p - from).dot(dir);
    let across = (p - from).cross(dir).abs();
    match cap {
        StrokeCap::Round => {
            let t = along.clamp(0.0, len);
            Some(p.distance(from + dir * t))
        }
        StrokeCap::Butt => (0.0..=len).contains(&along).then_some(across),
        StrokeCap::Square => (-half..=len + half).contains(&along).then_some(across),
    }
}

/// Source-over composite of `rgb` at `alpha` onto `dst`.
fn blend(dst: &mut Rgba<u8>, rgb: [u8; 3], alpha: f32) {
    let [dr, dg, db, da] = dst.0;
    let da = da as f32 / 255.0;
    let out_a = alpha + da * (1.0 - alpha);
    if out_a <= 0.0 {
        return;
    }
    let mix = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * alpha + d as f32 * da * (1.0 - alpha)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    dst.0 = [
        mix(rgb[0], dr),
        mix(rgb[1], dg),
        mix(rgb[2], db),
        (out_a * 255.0).round() as u8,
    ];
}

impl RenderContext for RasterContext {
    fn apply_style(&mut self, style: &InkStyle) {
        self.style = *style;
    }

    fn begin_path(&mut self, at: Point) {
        self.cursor = Some(at);
    }

    fn line_to(&mut self, to: Point) {
        // Like Canvas2D, a line_to with no open path only sets the start.
        if let Some(from) = self.cursor {
            self.stroke_segment(from, to);
        }
        self.cursor = Some(to);
    }

    fn close_path(&mut self) {
        self.cursor = None;
    }

    fn clear(&mut self) {
        for p in self.buffer.pixels_mut() {
            *p = Rgba([0, 0, 0, 0]);
        }
        self.cursor = None;
    }

    fn export_png(&self) -> Option<SignatureImage> {
        match encode_png(&self.buffer) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("signature export failed: {e}");
                None
            }
        }
    }
}

/// A raster surface placed somewhere on a virtual page.
///
/// Starts attached at the page origin. `detach` drops the drawing context,
/// `set_page_origin` moves the surface as a scroll or relayout would.
pub struct RasterSurface {
    config: SurfaceConfig,
    context: Option<RasterContext>,
    origin: Option<Point>,
}

impl RasterSurface {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            config,
            context: Some(RasterContext::new(config)),
            origin: Some(Point::ORIGIN),
        }
    }

    /// A surface whose drawing context is not available yet.
    pub fn detached(config: SurfaceConfig) -> Self {
        Self {
            config,
            context: None,
            origin: None,
        }
    }

    /// Create a fresh, blank context and lay the surface out at the origin
    /// if it had no position yet.
    pub fn attach(&mut self) {
        if self.context.is_none() {
            self.context = Some(RasterContext::new(self.config));
        }
        self.origin.get_or_insert(Point::ORIGIN);
    }

    /// Drop the context and pixel buffer.
    pub fn detach(&mut self) {
        self.context = None;
        self.origin = None;
    }

    pub fn set_page_origin(&mut self, x: f64, y: f64) {
        self.origin = Some(Point::new(x, y));
    }

    pub fn raster(&self) -> Option<&RasterContext> {
        self.context.as_ref()
    }

    pub fn config(&self) -> SurfaceConfig {
        self.config
    }
}

impl InkSurface for RasterSurface {
    fn page_rect(&self) -> Option<Rect> {
        let origin = self.origin?;
        Some(Rect::from_origin_size(
            origin,
            (self.config.width as f64, self.config.height as f64),
        ))
    }

    fn context(&self) -> Option<&dyn RenderContext> {
        self.context.as_ref().map(|c| c as &dyn RenderContext)
    }

    fn context_mut(&mut self) -> Option<&mut dyn RenderContext> {
        self.context.as_mut().map(|c| c as &mut dyn RenderContext)
    }
}
