//! Shared component rendering context
//!
//! `ComponentContext` carries UI metadata components need while rendering
//! and handling events, so the `Component` trait stays stable and components
//! do not rely on ad-hoc parameters.

use std::time::Instant;

/// Context passed to `Component` trait methods describing UI state.
///
/// - `focused`: whether the component's window has keyboard focus.
/// - `now`: the instant the current event or frame is processed at; used
///   for double-click detection so tests can drive time explicitly.
#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    focused: bool,
    now: Instant,
}

impl ComponentContext {
    pub fn new(focused: bool) -> Self {
        Self {
            focused,
            now: Instant::now(),
        }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn now(&self) -> Instant {
        self.now
    }

    pub const fn with_now(mut self, now: Instant) -> Self {
        self.now = now;
        self
    }
}

impl Default for ComponentContext {
    fn default() -> Self {
        Self::new(false)
    }
}
