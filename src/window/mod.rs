//! Window management core.
//!
//! Everything in this module works in *virtual pixels*: one terminal cell is
//! `CELL_WIDTH_PX` × `CELL_HEIGHT_PX` units (see `crate::constants`). Nothing
//! here touches a terminal; the desktop shell consumes the [`WmEvent`]s and
//! the query methods to draw.

pub mod decorator;
pub mod drag;
pub mod geometry;
pub mod registry;
pub mod transitions;

mod window_manager;

use std::ops::{Add, Sub};

pub use decorator::{ChromeEmphasis, DefaultDecorator, HeaderAction, WindowDecorator};
pub use drag::{DragController, DragState, clamp_to_viewport};
pub use geometry::{
    CellRect, ConsoleGeometry, FixedGeometry, GeometryProvider, cell_to_point, cells_to_size,
    px_rect_to_cells,
};
pub use registry::{Lifecycle, WindowPatch, WindowRecord, WindowRegistry, ZOrderCounter};
pub use transitions::{Transition, TransitionKind, TransitionScheduler};
pub use window_manager::{TaskbarIconState, WindowDraw, WindowManager, WindowVisual, WmEvent};

/// A location in virtual pixels. Signed so offsets and partially offscreen
/// placements can be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Signed rectangle in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PxRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PxRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x
            && p.y >= self.y
            && p.x < self.x.saturating_add(self.width)
            && p.y < self.y.saturating_add(self.height)
    }
}
