use std::collections::BTreeMap;
use std::fmt::Debug;
use std::time::Instant;

use super::geometry::GeometryProvider;
use super::registry::{Lifecycle, WindowPatch, WindowRecord, WindowRegistry, ZOrderCounter};
use super::transitions::{TransitionKind, TransitionScheduler};
use super::{Point, PxRect, Size};
use crate::constants::TITLE_BAR_HEIGHT;

/// Active / minimized flag pair shown by the taskbar icon of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskbarIconState {
    pub active: bool,
    pub minimized: bool,
}

impl TaskbarIconState {
    pub const CLEARED: Self = Self {
        active: false,
        minimized: false,
    };
    pub const ACTIVE: Self = Self {
        active: true,
        minimized: false,
    };
    pub const MINIMIZED: Self = Self {
        active: false,
        minimized: true,
    };
}

/// Cosmetic phase of a window, independent from its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowVisual {
    #[default]
    Hidden,
    Opening,
    Shown,
    /// Still drawn at the placement it had when it was closed, until the
    /// closing transition fires.
    Closing { frame: PxRect },
}

/// Intents emitted by the state machine. The desktop shell drains them with
/// [`WindowManager::take_events`] and applies them to the presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WmEvent<R> {
    FocusChanged(Option<R>),
    LayerChanged { id: R, z_order: u64 },
    PositionChanged { id: R, position: Point },
    TaskbarIcon { id: R, state: TaskbarIconState },
    FullscreenChanged { id: R, fullscreen: bool },
    Visibility { id: R, visual: WindowVisual },
    /// Application-specific initialization owned by the panel for `id`.
    InitApp { id: R, arg: Option<String> },
    DismissStartMenu,
}

/// One window to paint, in back-to-front order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDraw<R> {
    pub id: R,
    pub frame: PxRect,
    pub focused: bool,
    pub visual: WindowVisual,
}

/// Owns the registry, the z-order counter and the transition timers for a
/// fixed set of application windows.
///
/// Every public operation is a silent no-op when given an id that was never
/// registered.
pub struct WindowManager<R: Copy + Eq + Ord + Debug> {
    registry: WindowRegistry<R>,
    counter: ZOrderCounter,
    icons: BTreeMap<R, TaskbarIconState>,
    visuals: BTreeMap<R, WindowVisual>,
    transitions: TransitionScheduler<R>,
    geometry: Box<dyn GeometryProvider>,
    // queue of intents; the shell drains it via `take_events`
    events: Vec<WmEvent<R>>,
}

impl<R: Copy + Eq + Ord + Debug> WindowManager<R> {
    pub fn new(geometry: impl GeometryProvider + 'static) -> Self {
        Self {
            registry: WindowRegistry::new(),
            counter: ZOrderCounter::new(),
            icons: BTreeMap::new(),
            visuals: BTreeMap::new(),
            transitions: TransitionScheduler::default(),
            geometry: Box::new(geometry),
            events: Vec::new(),
        }
    }

    pub fn with_windows(
        geometry: impl GeometryProvider + 'static,
        windows: impl IntoIterator<Item = (R, Size)>,
    ) -> Self {
        let mut wm = Self::new(geometry);
        for (id, size) in windows {
            wm.register(id, size);
        }
        wm
    }

    pub fn register(&mut self, id: R, size: Size) {
        self.registry.register(id, size);
        self.icons.entry(id).or_default();
        self.visuals.entry(id).or_default();
    }

    pub fn geometry(&self) -> &dyn GeometryProvider {
        self.geometry.as_ref()
    }

    pub fn registry(&self) -> &WindowRegistry<R> {
        &self.registry
    }

    pub fn record(&self, id: R) -> Option<&WindowRecord<R>> {
        self.registry.get(id)
    }

    pub fn lifecycle(&self, id: R) -> Option<Lifecycle> {
        self.registry.get(id).map(|r| r.lifecycle())
    }

    pub fn is_open(&self, id: R) -> bool {
        self.registry.get(id).is_some_and(|r| r.is_open())
    }

    pub fn is_fullscreen(&self, id: R) -> bool {
        self.registry.get(id).is_some_and(|r| r.is_fullscreen())
    }

    pub fn position(&self, id: R) -> Option<Point> {
        self.registry.get(id).and_then(|r| r.position())
    }

    pub fn z_order(&self, id: R) -> Option<u64> {
        self.registry.get(id).map(|r| r.z_order())
    }

    pub fn z_counter(&self) -> u64 {
        self.counter.current()
    }

    pub fn focused(&self) -> Option<R> {
        self.registry.focused()
    }

    pub fn icon_state(&self, id: R) -> TaskbarIconState {
        self.icons.get(&id).copied().unwrap_or_default()
    }

    pub fn visual(&self, id: R) -> WindowVisual {
        self.visuals.get(&id).copied().unwrap_or_default()
    }

    pub fn pending_transition(&self, id: R) -> Option<TransitionKind> {
        self.transitions.pending(id)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.transitions.next_deadline()
    }

    pub fn take_events(&mut self) -> Vec<WmEvent<R>> {
        std::mem::take(&mut self.events)
    }

    fn known(&self, id: R, op: &'static str) -> bool {
        if self.registry.contains(id) {
            true
        } else {
            tracing::trace!(window_id = ?id, op, "ignoring unknown window");
            false
        }
    }

    /// Open `id`, restoring it when minimized and refocusing it when already
    /// open. `arg` is handed to the application through `WmEvent::InitApp`.
    pub fn open(&mut self, id: R, arg: Option<&str>) {
        self.open_at(id, arg, Instant::now());
    }

    pub fn open_at(&mut self, id: R, arg: Option<&str>, now: Instant) {
        let Some(lifecycle) = self.lifecycle(id) else {
            self.known(id, "open");
            return;
        };
        match lifecycle {
            Lifecycle::Minimized => {
                self.restore(id);
                return;
            }
            Lifecycle::Open => {
                self.bring_to_front(id);
                return;
            }
            Lifecycle::Closed => {}
        }

        tracing::debug!(window_id = ?id, ?arg, "opening window");
        self.registry.set(id, WindowPatch::lifecycle(Lifecycle::Open));
        self.transitions.schedule(id, TransitionKind::Opening, now);
        self.set_visual(id, WindowVisual::Opening);
        self.bring_to_front(id);
        self.set_icon(id, TaskbarIconState::ACTIVE);

        if self.position(id).is_none() {
            let centered = self.centered_position(id);
            self.set_position(id, centered);
        }

        self.events.push(WmEvent::InitApp {
            id,
            arg: arg.map(str::to_owned),
        });
        self.events.push(WmEvent::DismissStartMenu);
    }

    pub fn close(&mut self, id: R) {
        self.close_at(id, Instant::now());
    }

    /// Close `id`. The state machine forgets placement and fullscreen right
    /// away; only the cosmetic closing phase is deferred.
    pub fn close_at(&mut self, id: R, now: Instant) {
        let Some(lifecycle) = self.lifecycle(id) else {
            self.known(id, "close");
            return;
        };
        if lifecycle == Lifecycle::Closed {
            return;
        }
        tracing::debug!(window_id = ?id, "closing window");

        if lifecycle == Lifecycle::Open {
            let frame = self.frame_of(id).unwrap_or_default();
            self.transitions.schedule(id, TransitionKind::Closing, now);
            self.set_visual(id, WindowVisual::Closing { frame });
        } else {
            self.transitions.cancel(id);
            self.set_visual(id, WindowVisual::Hidden);
        }

        self.registry.set(
            id,
            WindowPatch {
                lifecycle: Some(Lifecycle::Closed),
                fullscreen: Some(false),
                position: Some(None),
                ..WindowPatch::default()
            },
        );
        self.set_icon(id, TaskbarIconState::CLEARED);
        self.refocus_after_hide(id);
    }

    pub fn minimize(&mut self, id: R) {
        if !self.known(id, "minimize") || self.lifecycle(id) != Some(Lifecycle::Open) {
            return;
        }
        tracing::debug!(window_id = ?id, "minimizing window");
        self.registry.set(id, WindowPatch::lifecycle(Lifecycle::Minimized));
        self.transitions.cancel(id);
        self.set_visual(id, WindowVisual::Hidden);
        self.set_icon(id, TaskbarIconState::MINIMIZED);
        self.refocus_after_hide(id);
    }

    pub fn restore(&mut self, id: R) {
        if !self.known(id, "restore") || self.lifecycle(id) != Some(Lifecycle::Minimized) {
            return;
        }
        tracing::debug!(window_id = ?id, "restoring window");
        self.registry.set(id, WindowPatch::lifecycle(Lifecycle::Open));
        self.set_visual(id, WindowVisual::Shown);
        self.bring_to_front(id);
        self.set_icon(id, TaskbarIconState::ACTIVE);
    }

    /// Taskbar behavior: show a hidden window, minimize a visible one.
    pub fn toggle(&mut self, id: R) {
        self.toggle_at(id, Instant::now());
    }

    pub fn toggle_at(&mut self, id: R, now: Instant) {
        match self.lifecycle(id) {
            None => {
                self.known(id, "toggle");
            }
            Some(Lifecycle::Open) => self.minimize(id),
            Some(Lifecycle::Minimized | Lifecycle::Closed) => self.open_at(id, None, now),
        }
    }

    /// Flip fullscreen. Lifecycle, position and z-order are untouched.
    pub fn maximize(&mut self, id: R) {
        let Some(record) = self.registry.get(id) else {
            self.known(id, "maximize");
            return;
        };
        let fullscreen = !record.is_fullscreen();
        self.registry.set(id, WindowPatch::fullscreen(fullscreen));
        tracing::debug!(window_id = ?id, fullscreen, "toggled fullscreen");
        self.events.push(WmEvent::FullscreenChanged { id, fullscreen });
    }

    /// Give `id` the next z-order value and focus. Each call consumes a tick,
    /// even when `id` is already frontmost.
    pub fn bring_to_front(&mut self, id: R) {
        if !self.known(id, "bring_to_front") {
            return;
        }
        let z_order = self.counter.bump();
        self.registry.set(id, WindowPatch::z_order(z_order));
        self.events.push(WmEvent::LayerChanged { id, z_order });
        self.set_focus(Some(id));
    }

    pub fn set_position(&mut self, id: R, position: Point) {
        if self.registry.set(id, WindowPatch::position(Some(position))) {
            self.events.push(WmEvent::PositionChanged { id, position });
        } else {
            self.known(id, "set_position");
        }
    }

    /// Pin the window where it currently is so later opens do not re-center
    /// it.
    pub fn mark_positioned(&mut self, id: R) {
        if self.registry.get(id).is_some_and(|r| !r.has_been_positioned()) {
            self.set_position(id, Point::default());
        }
    }

    /// Fire every transition due at `now`. Transitions only ever move the
    /// cosmetic phase; lifecycle, placement and z-order are never touched.
    pub fn tick(&mut self, now: Instant) {
        for transition in self.transitions.take_due(now) {
            let id = transition.id;
            match (transition.kind, self.visual(id)) {
                (TransitionKind::Opening, WindowVisual::Opening) => {
                    self.set_visual(id, WindowVisual::Shown);
                }
                (TransitionKind::Closing, WindowVisual::Closing { .. }) => {
                    self.set_visual(id, WindowVisual::Hidden);
                }
                _ => {}
            }
        }
    }

    /// Where `id` sits on screen. Fullscreen windows cover everything above
    /// the taskbar.
    pub fn frame_of(&self, id: R) -> Option<PxRect> {
        let record = self.registry.get(id)?;
        if record.is_fullscreen() {
            let viewport = self.geometry.viewport();
            let height = (viewport.height - self.geometry.taskbar_height()).max(0);
            return Some(PxRect::new(0, 0, viewport.width, height));
        }
        Some(PxRect::from_parts(
            record.position().unwrap_or_default(),
            record.size(),
        ))
    }

    /// Topmost Open window under `point`.
    pub fn hit_test(&self, point: Point) -> Option<R> {
        self.registry
            .stacking_order()
            .into_iter()
            .rev()
            .find(|id| self.frame_of(*id).is_some_and(|f| f.contains(point)))
    }

    pub fn title_bar_contains(&self, id: R, point: Point) -> bool {
        self.frame_of(id).is_some_and(|frame| {
            let bar = PxRect::new(frame.x, frame.y, frame.width, TITLE_BAR_HEIGHT);
            bar.contains(point)
        })
    }

    /// Windows to paint back to front: Open windows plus those still playing
    /// their closing transition.
    pub fn draw_list(&self) -> Vec<WindowDraw<R>> {
        let focused = self.focused();
        let mut draws: Vec<(u64, WindowDraw<R>)> = Vec::new();
        for record in self.registry.records() {
            let id = record.id();
            let visual = self.visual(id);
            let frame = match visual {
                WindowVisual::Hidden => continue,
                WindowVisual::Closing { frame } => frame,
                WindowVisual::Opening | WindowVisual::Shown => match self.frame_of(id) {
                    Some(frame) => frame,
                    None => continue,
                },
            };
            draws.push((
                record.z_order(),
                WindowDraw {
                    id,
                    frame,
                    focused: record.is_open() && focused == Some(id),
                    visual,
                },
            ));
        }
        draws.sort_by_key(|(z, _)| *z);
        draws.into_iter().map(|(_, draw)| draw).collect()
    }

    fn centered_position(&self, id: R) -> Point {
        let container = self.geometry.container();
        let size = self
            .registry
            .get(id)
            .map(|r| r.size())
            .unwrap_or_default();
        Point::new(
            (container.width - size.width) / 2,
            (container.height - size.height) / 2,
        )
    }

    fn set_focus(&mut self, focus: Option<R>) {
        if self.registry.focused() != focus {
            self.registry.set_focused(focus);
            self.events.push(WmEvent::FocusChanged(focus));
        }
    }

    fn refocus_after_hide(&mut self, id: R) {
        if self.registry.focused() == Some(id) {
            let fallback = self.registry.topmost_open(Some(id));
            self.set_focus(fallback);
        }
    }

    fn set_icon(&mut self, id: R, state: TaskbarIconState) {
        self.icons.insert(id, state);
        self.events.push(WmEvent::TaskbarIcon { id, state });
    }

    fn set_visual(&mut self, id: R, visual: WindowVisual) {
        if self.visual(id) != visual {
            self.visuals.insert(id, visual);
            self.events.push(WmEvent::Visibility { id, visual });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::FixedGeometry;
    use std::time::Duration;

    fn wm() -> WindowManager<&'static str> {
        WindowManager::with_windows(
            FixedGeometry::new(Size::new(800, 600)),
            [
                ("notepad", Size::new(400, 300)),
                ("explorer", Size::new(500, 320)),
                ("chrome", Size::new(600, 400)),
            ],
        )
    }

    #[test]
    fn open_emits_init_and_dismiss_start_menu() {
        let mut wm = wm();
        wm.open("explorer", Some("This PC"));
        let events = wm.take_events();
        assert!(events.contains(&WmEvent::InitApp {
            id: "explorer",
            arg: Some("This PC".to_string()),
        }));
        assert_eq!(events.last(), Some(&WmEvent::DismissStartMenu));
        assert!(events.contains(&WmEvent::FocusChanged(Some("explorer"))));
        assert!(wm.take_events().is_empty());
    }

    #[test]
    fn reopen_of_open_window_only_refocuses() {
        let mut wm = wm();
        wm.open("notepad", None);
        wm.take_events();
        wm.open("notepad", Some("ignored"));
        let events = wm.take_events();
        assert_eq!(
            events,
            vec![WmEvent::LayerChanged {
                id: "notepad",
                z_order: 2
            }]
        );
    }

    #[test]
    fn opening_visual_clears_after_transition() {
        let mut wm = wm();
        let t0 = Instant::now();
        wm.open_at("notepad", None, t0);
        assert_eq!(wm.visual("notepad"), WindowVisual::Opening);
        wm.tick(t0 + Duration::from_millis(100));
        assert_eq!(wm.visual("notepad"), WindowVisual::Opening);
        wm.tick(t0 + Duration::from_millis(200));
        assert_eq!(wm.visual("notepad"), WindowVisual::Shown);
    }

    #[test]
    fn close_keeps_snapshot_until_transition_fires() {
        let mut wm = wm();
        let t0 = Instant::now();
        wm.open_at("notepad", None, t0);
        let frame = wm.frame_of("notepad").unwrap();
        wm.close_at("notepad", t0 + Duration::from_millis(10));
        assert_eq!(wm.visual("notepad"), WindowVisual::Closing { frame });
        assert_eq!(wm.draw_list().len(), 1);
        assert!(!wm.draw_list()[0].focused);
        wm.tick(t0 + Duration::from_secs(1));
        assert_eq!(wm.visual("notepad"), WindowVisual::Hidden);
        assert!(wm.draw_list().is_empty());
    }

    #[test]
    fn reopening_during_close_cancels_pending_hide() {
        let mut wm = wm();
        let t0 = Instant::now();
        wm.open_at("notepad", None, t0);
        wm.tick(t0 + Duration::from_millis(300));
        wm.close_at("notepad", t0 + Duration::from_millis(400));
        wm.open_at("notepad", None, t0 + Duration::from_millis(450));
        assert_eq!(wm.pending_transition("notepad"), Some(TransitionKind::Opening));
        // Past the old closing deadline: still visible.
        wm.tick(t0 + Duration::from_millis(610));
        assert_eq!(wm.visual("notepad"), WindowVisual::Opening);
        wm.tick(t0 + Duration::from_millis(650));
        assert_eq!(wm.visual("notepad"), WindowVisual::Shown);
        assert!(wm.is_open("notepad"));
    }

    #[test]
    fn focus_falls_back_when_focused_window_hides() {
        let mut wm = wm();
        wm.open("notepad", None);
        wm.open("explorer", None);
        wm.open("chrome", None);
        let counter = wm.z_counter();
        wm.minimize("chrome");
        assert_eq!(wm.focused(), Some("explorer"));
        wm.close("explorer");
        assert_eq!(wm.focused(), Some("notepad"));
        wm.close("notepad");
        assert_eq!(wm.focused(), None);
        assert_eq!(wm.z_counter(), counter);
    }

    #[test]
    fn minimize_of_unfocused_window_keeps_focus() {
        let mut wm = wm();
        wm.open("notepad", None);
        wm.open("explorer", None);
        wm.minimize("notepad");
        assert_eq!(wm.focused(), Some("explorer"));
    }

    #[test]
    fn closing_minimized_window_hides_immediately() {
        let mut wm = wm();
        wm.open("notepad", None);
        wm.minimize("notepad");
        wm.close("notepad");
        assert_eq!(wm.lifecycle("notepad"), Some(Lifecycle::Closed));
        assert_eq!(wm.visual("notepad"), WindowVisual::Hidden);
        assert_eq!(wm.pending_transition("notepad"), None);
    }

    #[test]
    fn maximize_flips_fullscreen_only() {
        let mut wm = wm();
        wm.open("notepad", None);
        let before = wm.record("notepad").cloned().unwrap();
        wm.maximize("notepad");
        let after = wm.record("notepad").unwrap();
        assert!(after.is_fullscreen());
        assert_eq!(after.z_order(), before.z_order());
        assert_eq!(after.position(), before.position());
        assert_eq!(after.lifecycle(), before.lifecycle());
        assert_eq!(wm.frame_of("notepad"), Some(PxRect::new(0, 0, 800, 552)));
        wm.maximize("notepad");
        assert!(!wm.is_fullscreen("notepad"));
    }

    #[test]
    fn hit_test_prefers_topmost_window() {
        let mut wm = wm();
        wm.open("notepad", None);
        wm.open("explorer", None);
        let center = Point::new(400, 300);
        assert_eq!(wm.hit_test(center), Some("explorer"));
        wm.bring_to_front("notepad");
        assert_eq!(wm.hit_test(center), Some("notepad"));
        assert_eq!(wm.hit_test(Point::new(0, 0)), None);
    }

    #[test]
    fn title_bar_is_top_strip_of_frame() {
        let mut wm = wm();
        wm.open("notepad", None);
        let frame = wm.frame_of("notepad").unwrap();
        assert!(wm.title_bar_contains("notepad", frame.origin()));
        assert!(!wm.title_bar_contains(
            "notepad",
            Point::new(frame.x, frame.y + TITLE_BAR_HEIGHT)
        ));
    }

    #[test]
    fn draw_list_is_back_to_front_with_single_focus() {
        let mut wm = wm();
        wm.open("chrome", None);
        wm.open("notepad", None);
        wm.open("explorer", None);
        wm.bring_to_front("chrome");
        let order: Vec<&str> = wm.draw_list().iter().map(|d| d.id).collect();
        assert_eq!(order, vec!["notepad", "explorer", "chrome"]);
        let focused: Vec<&str> = wm
            .draw_list()
            .iter()
            .filter(|d| d.focused)
            .map(|d| d.id)
            .collect();
        assert_eq!(focused, vec!["chrome"]);
    }

    #[test]
    fn unknown_ids_are_silent_no_ops() {
        let mut wm = wm();
        wm.open("calculator", Some("x"));
        wm.close("calculator");
        wm.minimize("calculator");
        wm.restore("calculator");
        wm.toggle("calculator");
        wm.maximize("calculator");
        wm.bring_to_front("calculator");
        wm.set_position("calculator", Point::new(1, 1));
        assert_eq!(wm.z_counter(), 0);
        assert!(wm.take_events().is_empty());
        assert_eq!(wm.focused(), None);
    }
}
