//! Viewport geometry and the mapping between terminal cells and the virtual
//! pixels used by the window core.

use ratatui::layout::Rect;

use super::{Point, PxRect, Size};
use crate::constants::{CELL_HEIGHT_PX, CELL_WIDTH_PX, TASKBAR_HEIGHT};

/// Environment geometry, read at call time and never cached by callers.
pub trait GeometryProvider {
    /// Full viewport in virtual pixels, taskbar included.
    fn viewport(&self) -> Size;

    /// Area windows are centered in when first opened.
    fn container(&self) -> Size {
        self.viewport()
    }

    fn taskbar_height(&self) -> i32 {
        TASKBAR_HEIGHT
    }
}

impl<T: GeometryProvider + ?Sized> GeometryProvider for Box<T> {
    fn viewport(&self) -> Size {
        (**self).viewport()
    }

    fn container(&self) -> Size {
        (**self).container()
    }

    fn taskbar_height(&self) -> i32 {
        (**self).taskbar_height()
    }
}

/// Geometry with a fixed viewport, used by tests and headless rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedGeometry {
    viewport: Size,
    container: Size,
}

impl FixedGeometry {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            container: viewport,
        }
    }

    /// Fixed geometry matching a terminal of `cols` × `rows` cells.
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self::new(cells_to_size(cols, rows))
    }

    pub fn with_container(mut self, container: Size) -> Self {
        self.container = container;
        self
    }
}

impl GeometryProvider for FixedGeometry {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn container(&self) -> Size {
        self.container
    }
}

/// Reads the live terminal size from crossterm on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleGeometry;

impl GeometryProvider for ConsoleGeometry {
    fn viewport(&self) -> Size {
        match crossterm::terminal::size() {
            Ok((cols, rows)) => cells_to_size(cols, rows),
            Err(err) => {
                tracing::warn!(%err, "terminal size unavailable; assuming 80x24");
                cells_to_size(80, 24)
            }
        }
    }
}

pub fn cells_to_size(cols: u16, rows: u16) -> Size {
    Size::new(
        i32::from(cols) * CELL_WIDTH_PX,
        i32::from(rows) * CELL_HEIGHT_PX,
    )
}

/// Virtual-pixel location of the top-left corner of cell (`column`, `row`).
pub fn cell_to_point(column: u16, row: u16) -> Point {
    Point::new(
        i32::from(column) * CELL_WIDTH_PX,
        i32::from(row) * CELL_HEIGHT_PX,
    )
}

/// Signed cell rectangle covering `rect`. Origins round down so a window
/// never appears to the right of where the core placed it.
pub fn px_rect_to_cells(rect: PxRect) -> CellRect {
    let x = rect.x.div_euclid(CELL_WIDTH_PX);
    let y = rect.y.div_euclid(CELL_HEIGHT_PX);
    let width = (rect.width.max(0) + CELL_WIDTH_PX - 1) / CELL_WIDTH_PX;
    let height = (rect.height.max(0) + CELL_HEIGHT_PX - 1) / CELL_HEIGHT_PX;
    CellRect {
        x,
        y,
        width,
        height,
    }
}

/// Cell rectangle that may start off screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CellRect {
    /// The part of this rectangle that lies inside `bounds`.
    pub fn clip(&self, bounds: Rect) -> Rect {
        let x0 = self.x.max(i32::from(bounds.x));
        let y0 = self.y.max(i32::from(bounds.y));
        let x1 = (self.x + self.width).min(i32::from(bounds.x) + i32::from(bounds.width));
        let y1 = (self.y + self.height).min(i32::from(bounds.y) + i32::from(bounds.height));
        if x1 <= x0 || y1 <= y0 {
            return Rect::default();
        }
        Rect {
            x: x0 as u16,
            y: y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        }
    }
}
