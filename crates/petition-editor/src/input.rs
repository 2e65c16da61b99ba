//! Input abstraction layer.
//!
//! Mouse and touch events arrive in page coordinates. Both implement
//! [`PointerInput`], so the pad asks for "the pointer position" without
//! caring which device produced it, then maps it into surface-local space.

use kurbo::{Point, Rect};
use smallvec::SmallVec;

/// Anything that can report where the pointer is on the page.
pub trait PointerInput {
    /// Page-space position, or `None` if the event carries no usable point.
    fn page_position(&self) -> Option<Point>;
}

/// A mouse (or pen/pointer) sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInput {
    pub page: Point,
}

impl MouseInput {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            page: Point::new(x, y),
        }
    }
}

impl PointerInput for MouseInput {
    fn page_position(&self) -> Option<Point> {
        Some(self.page)
    }
}

/// A touch sample: every active contact, in the order the platform lists them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchInput {
    pub contacts: SmallVec<[Point; 2]>,
}

impl TouchInput {
    pub fn single(x: f64, y: f64) -> Self {
        Self {
            contacts: smallvec::smallvec![Point::new(x, y)],
        }
    }

    pub fn from_contacts(contacts: impl IntoIterator<Item = Point>) -> Self {
        Self {
            contacts: contacts.into_iter().collect(),
        }
    }
}

impl PointerInput for TouchInput {
    /// Only the first contact draws; further fingers are ignored.
    fn page_position(&self) -> Option<Point> {
        self.contacts.first().copied()
    }
}

/// Map a page-space input into the coordinates of a surface whose bounding
/// rectangle is `rect`.
pub fn to_local(input: &dyn PointerInput, rect: Rect) -> Option<Point> {
    let page = input.page_position()?;
    Some(Point::new(page.x - rect.x0, page.y - rect.y0))
}

/// One pointer event as seen by the signature pad.
#[derive(Clone, Copy)]
pub enum PadEvent<'a> {
    /// Mouse down / touch start.
    Begin(&'a dyn PointerInput),
    /// Mouse move / touch move.
    Move(&'a dyn PointerInput),
    /// Mouse up / touch end.
    End,
    /// Pointer left the surface.
    Leave,
}

impl std::fmt::Debug for PadEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Begin(input) => write!(f, "Begin({:?})", input.page_position()),
            Self::Move(input) => write!(f, "Move({:?})", input.page_position()),
            Self::End => f.write_str("End"),
            Self::Leave => f.write_str("Leave"),
        }
    }
}
