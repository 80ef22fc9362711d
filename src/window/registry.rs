use std::collections::BTreeMap;

use super::{Point, Size};

/// Lifecycle of a simulated application window. Fullscreen is tracked
/// separately because it is orthogonal to these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Closed,
    Open,
    Minimized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord<R> {
    id: R,
    lifecycle: Lifecycle,
    fullscreen: bool,
    // `Some` once the window was auto-centered or dragged.
    position: Option<Point>,
    z_order: u64,
    size: Size,
}

impl<R: Copy> WindowRecord<R> {
    fn new(id: R, size: Size) -> Self {
        Self {
            id,
            lifecycle: Lifecycle::Closed,
            fullscreen: false,
            position: None,
            z_order: 0,
            size,
        }
    }

    pub fn id(&self) -> R {
        self.id
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_open(&self) -> bool {
        self.lifecycle == Lifecycle::Open
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn has_been_positioned(&self) -> bool {
        self.position.is_some()
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn z_order(&self) -> u64 {
        self.z_order
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

/// Partial update applied by [`WindowRegistry::set`]. `position: Some(None)`
/// forgets the placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowPatch {
    pub lifecycle: Option<Lifecycle>,
    pub fullscreen: Option<bool>,
    pub position: Option<Option<Point>>,
    pub z_order: Option<u64>,
    pub size: Option<Size>,
}

impl WindowPatch {
    pub fn lifecycle(lifecycle: Lifecycle) -> Self {
        Self {
            lifecycle: Some(lifecycle),
            ..Self::default()
        }
    }

    pub fn position(position: Option<Point>) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn z_order(z_order: u64) -> Self {
        Self {
            z_order: Some(z_order),
            ..Self::default()
        }
    }

    pub fn fullscreen(fullscreen: bool) -> Self {
        Self {
            fullscreen: Some(fullscreen),
            ..Self::default()
        }
    }
}

/// Source of stacking priority. Never decremented and never reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZOrderCounter {
    value: u64,
}

impl ZOrderCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.value
    }

    pub fn bump(&mut self) -> u64 {
        self.value = self.value.saturating_add(1);
        self.value
    }
}

/// Every known window keyed by application id, plus the focused id.
///
/// Entries are only ever added through [`WindowRegistry::register`]; closing a
/// window transitions it back to [`Lifecycle::Closed`] but never removes it.
#[derive(Debug, Clone)]
pub struct WindowRegistry<R: Copy + Ord> {
    records: BTreeMap<R, WindowRecord<R>>,
    focused: Option<R>,
}

impl<R: Copy + Ord> Default for WindowRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Copy + Ord> WindowRegistry<R> {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            focused: None,
        }
    }

    /// Register `id` as Closed and unpositioned. Registering a known id again
    /// only updates its size.
    pub fn register(&mut self, id: R, size: Size) {
        self.records
            .entry(id)
            .and_modify(|record| record.size = size)
            .or_insert_with(|| WindowRecord::new(id, size));
    }

    pub fn contains(&self, id: R) -> bool {
        self.records.contains_key(&id)
    }

    pub fn get(&self, id: R) -> Option<&WindowRecord<R>> {
        self.records.get(&id)
    }

    /// Apply `patch` to the record for `id`. Returns false for unknown ids.
    pub fn set(&mut self, id: R, patch: WindowPatch) -> bool {
        let Some(record) = self.records.get_mut(&id) else {
            return false;
        };
        if let Some(lifecycle) = patch.lifecycle {
            record.lifecycle = lifecycle;
        }
        if let Some(fullscreen) = patch.fullscreen {
            record.fullscreen = fullscreen;
        }
        if let Some(position) = patch.position {
            record.position = position;
        }
        if let Some(z_order) = patch.z_order {
            record.z_order = z_order;
        }
        if let Some(size) = patch.size {
            record.size = size;
        }
        true
    }

    pub fn records(&self) -> impl Iterator<Item = &WindowRecord<R>> {
        self.records.values()
    }

    pub fn focused(&self) -> Option<R> {
        self.focused
    }

    pub fn set_focused(&mut self, focused: Option<R>) {
        self.focused = focused;
    }

    /// Open windows ordered back to front.
    pub fn stacking_order(&self) -> Vec<R> {
        let mut open: Vec<&WindowRecord<R>> =
            self.records.values().filter(|r| r.is_open()).collect();
        open.sort_by_key(|r| r.z_order);
        open.into_iter().map(|r| r.id).collect()
    }

    /// The Open window with the greatest z-order, optionally skipping one id.
    pub fn topmost_open(&self, except: Option<R>) -> Option<R> {
        self.records
            .values()
            .filter(|r| r.is_open() && Some(r.id) != except)
            .max_by_key(|r| r.z_order)
            .map(|r| r.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> WindowRegistry<&'static str> {
        let mut reg = WindowRegistry::new();
        reg.register("notepad", Size::new(100, 50));
        reg.register("explorer", Size::new(120, 60));
        reg
    }

    #[test]
    fn registered_windows_start_closed_and_unpositioned() {
        let reg = registry();
        let rec = reg.get("notepad").expect("registered");
        assert_eq!(rec.lifecycle(), Lifecycle::Closed);
        assert!(!rec.has_been_positioned());
        assert!(!rec.is_fullscreen());
        assert_eq!(rec.z_order(), 0);
        assert_eq!(reg.focused(), None);
    }

    #[test]
    fn set_on_unknown_id_is_rejected() {
        let mut reg = registry();
        assert!(!reg.set("calculator", WindowPatch::lifecycle(Lifecycle::Open)));
        assert!(reg.get("calculator").is_none());
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut reg = registry();
        reg.set("notepad", WindowPatch::position(Some(Point::new(4, 8))));
        reg.set("notepad", WindowPatch::z_order(7));
        let rec = reg.get("notepad").unwrap();
        assert_eq!(rec.position(), Some(Point::new(4, 8)));
        assert_eq!(rec.z_order(), 7);
        assert_eq!(rec.lifecycle(), Lifecycle::Closed);
    }

    #[test]
    fn re_register_keeps_state() {
        let mut reg = registry();
        reg.set("notepad", WindowPatch::lifecycle(Lifecycle::Open));
        reg.register("notepad", Size::new(10, 10));
        let rec = reg.get("notepad").unwrap();
        assert!(rec.is_open());
        assert_eq!(rec.size(), Size::new(10, 10));
    }

    #[test]
    fn stacking_order_lists_open_windows_back_to_front() {
        let mut reg = registry();
        reg.register("chrome", Size::new(1, 1));
        for (id, z) in [("notepad", 5), ("explorer", 2), ("chrome", 9)] {
            reg.set(id, WindowPatch::lifecycle(Lifecycle::Open));
            reg.set(id, WindowPatch::z_order(z));
        }
        reg.set("chrome", WindowPatch::lifecycle(Lifecycle::Minimized));
        assert_eq!(reg.stacking_order(), vec!["explorer", "notepad"]);
        assert_eq!(reg.topmost_open(None), Some("notepad"));
        assert_eq!(reg.topmost_open(Some("notepad")), Some("explorer"));
    }

    #[test]
    fn counter_is_monotonic() {
        let mut c = ZOrderCounter::new();
        assert_eq!(c.current(), 0);
        assert_eq!(c.bump(), 1);
        assert_eq!(c.bump(), 2);
        assert_eq!(c.current(), 2);
    }
}
