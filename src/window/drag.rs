//! Title-bar drag gesture.
//!
//! A press on a window always brings it to front first; only then, if the
//! press landed on the title bar of a non-fullscreen window, does a drag
//! begin. Moves reposition the window 1:1 with the pointer, clamped so it
//! stays inside the viewport and above the taskbar. Release always ends the
//! drag.

use std::fmt::Debug;

use super::{Point, Size, WindowManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState<R> {
    Idle,
    Dragging {
        id: R,
        /// Pointer position relative to the window's top-left corner.
        offset: Point,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct DragController<R> {
    state: DragState<R>,
}

impl<R> Default for DragController<R> {
    fn default() -> Self {
        Self {
            state: DragState::Idle,
        }
    }
}

impl<R: Copy + Eq + Ord + Debug> DragController<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState<R> {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Pointer pressed at `pointer`. Returns the window under the pointer, if
    /// any, after it has been brought to front.
    pub fn press(&mut self, wm: &mut WindowManager<R>, pointer: Point) -> Option<R> {
        let id = wm.hit_test(pointer)?;
        wm.bring_to_front(id);
        if wm.title_bar_contains(id, pointer) {
            self.begin(wm, id, pointer);
        }
        Some(id)
    }

    /// Start dragging `id` from `pointer`. Fullscreen windows never enter the
    /// dragging state.
    pub fn begin(&mut self, wm: &mut WindowManager<R>, id: R, pointer: Point) -> bool {
        if !wm.is_open(id) || wm.is_fullscreen(id) {
            return false;
        }
        wm.mark_positioned(id);
        let origin = wm.position(id).unwrap_or_default();
        self.state = DragState::Dragging {
            id,
            offset: pointer - origin,
        };
        tracing::trace!(window_id = ?id, "drag started");
        true
    }

    /// Pointer moved. Returns the applied position while dragging.
    pub fn drag_to(&mut self, wm: &mut WindowManager<R>, pointer: Point) -> Option<Point> {
        let DragState::Dragging { id, offset } = self.state else {
            return None;
        };
        let Some(record) = wm.record(id) else {
            self.state = DragState::Idle;
            return None;
        };
        if !record.is_open() || record.is_fullscreen() {
            self.state = DragState::Idle;
            return None;
        }
        let size = record.size();
        let geometry = wm.geometry();
        let clamped = clamp_to_viewport(
            pointer - offset,
            size,
            geometry.viewport(),
            geometry.taskbar_height(),
        );
        wm.set_position(id, clamped);
        Some(clamped)
    }

    /// Pointer released anywhere. Returns whether a drag was active.
    pub fn release(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }
}

/// Clamp a candidate top-left corner so the window stays within
/// `[0, viewport - window]` horizontally and above the taskbar vertically.
/// A window larger than the viewport is pinned to the origin.
pub fn clamp_to_viewport(candidate: Point, window: Size, viewport: Size, taskbar: i32) -> Point {
    let max_x = (viewport.width - window.width).max(0);
    let max_y = (viewport.height - window.height - taskbar).max(0);
    Point::new(candidate.x.clamp(0, max_x), candidate.y.clamp(0, max_y))
}
