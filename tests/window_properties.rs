//! Invariant sweeps over deterministic pseudo-random operation sequences.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use term_desk::apps::AppId;
use term_desk::window::{
    DragController, FixedGeometry, Lifecycle, Point, Size, WindowManager, clamp_to_viewport,
};

const VIEWPORT: Size = Size::new(1024, 768);

/// Small xorshift generator so every run walks the same sequences.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }

    fn coord(&mut self, lo: i32, hi: i32) -> i32 {
        lo + self.below((hi - lo) as u64) as i32
    }
}

fn wm() -> WindowManager<AppId> {
    WindowManager::with_windows(
        FixedGeometry::new(VIEWPORT),
        AppId::ALL.map(|app| (app, app.default_size())),
    )
}

fn expected_after(op: u64, before: Lifecycle) -> Lifecycle {
    match (op, before) {
        (0, _) => Lifecycle::Open,
        (1, _) => Lifecycle::Closed,
        (2, Lifecycle::Open) => Lifecycle::Minimized,
        (2, other) => other,
        (3, Lifecycle::Minimized) => Lifecycle::Open,
        (3, other) => other,
        (_, Lifecycle::Open) => Lifecycle::Minimized,
        (_, _) => Lifecycle::Open,
    }
}

#[test]
fn lifecycle_follows_state_machine() {
    let mut rng = XorShift(0x9e37_79b9_7f4a_7c15);
    let t0 = Instant::now();
    for run in 0..50 {
        let mut wm = wm();
        let id = AppId::ALL[run % AppId::ALL.len()];
        for step in 0..40u64 {
            let now = t0 + Duration::from_millis(step * 10);
            let before = wm.lifecycle(id).unwrap();
            let op = rng.below(5);
            match op {
                0 => wm.open_at(id, None, now),
                1 => wm.close_at(id, now),
                2 => wm.minimize(id),
                3 => wm.restore(id),
                _ => wm.toggle_at(id, now),
            }
            assert_eq!(wm.lifecycle(id), Some(expected_after(op, before)));
        }
    }
}

#[test]
fn bring_to_front_n_times_advances_counter_by_n() {
    let mut wm = wm();
    wm.open(AppId::Explorer, None);
    let start = wm.z_counter();
    for _ in 0..17 {
        wm.bring_to_front(AppId::Explorer);
    }
    assert_eq!(wm.z_counter(), start + 17);
    assert_eq!(wm.z_order(AppId::Explorer), Some(wm.z_counter()));
}

#[test]
fn open_windows_never_share_a_z_order() {
    let mut rng = XorShift(42);
    let mut wm = wm();
    for _ in 0..500 {
        let id = AppId::ALL[rng.below(3) as usize];
        match rng.below(5) {
            0 => wm.open(id, None),
            1 => wm.close(id),
            2 => wm.minimize(id),
            3 if wm.is_open(id) => wm.bring_to_front(id),
            3 => {}
            _ => wm.toggle(id),
        }
        let open: Vec<u64> = AppId::ALL
            .iter()
            .filter(|id| wm.is_open(**id))
            .filter_map(|id| wm.z_order(*id))
            .collect();
        let unique: HashSet<u64> = open.iter().copied().collect();
        assert_eq!(unique.len(), open.len());
        if let Some(focused) = wm.focused() {
            assert!(wm.is_open(focused));
            assert_eq!(wm.z_order(focused), open.iter().copied().max());
        }
    }
}

#[test]
fn close_always_resets_position_and_fullscreen() {
    let mut rng = XorShift(7);
    for _ in 0..30 {
        let mut wm = wm();
        let id = AppId::ALL[rng.below(3) as usize];
        wm.open(id, None);
        if rng.below(2) == 0 {
            wm.maximize(id);
        }
        if rng.below(2) == 0 {
            wm.set_position(id, Point::new(rng.coord(0, 400), rng.coord(0, 300)));
        }
        if rng.below(2) == 0 {
            wm.minimize(id);
        }
        wm.close(id);
        assert!(!wm.is_fullscreen(id));
        assert_eq!(wm.position(id), None);
        assert!(!wm.record(id).unwrap().has_been_positioned());
    }
}

#[test]
fn toggle_is_an_involution_with_open_and_minimize() {
    let mut wm = wm();
    wm.toggle(AppId::Chrome);
    assert_eq!(wm.lifecycle(AppId::Chrome), Some(Lifecycle::Open));
    wm.toggle(AppId::Chrome);
    assert_eq!(wm.lifecycle(AppId::Chrome), Some(Lifecycle::Minimized));
    wm.toggle(AppId::Chrome);
    assert_eq!(wm.lifecycle(AppId::Chrome), Some(Lifecycle::Open));
}

#[test]
fn drag_paths_stay_inside_viewport() {
    let mut rng = XorShift(0xdead_beef);
    for id in AppId::ALL {
        let mut wm = wm();
        let mut drag = DragController::new();
        wm.open(id, None);
        let origin = wm.position(id).unwrap();
        assert!(drag.begin(&mut wm, id, origin + Point::new(5, 5)));
        let size = id.default_size();
        for _ in 0..200 {
            let pointer = Point::new(rng.coord(-2000, 3000), rng.coord(-2000, 3000));
            let applied = drag.drag_to(&mut wm, pointer).unwrap();
            assert_eq!(wm.position(id), Some(applied));
            assert!(applied.x >= 0 && applied.x <= VIEWPORT.width - size.width);
            assert!(applied.y >= 0 && applied.y <= VIEWPORT.height - size.height - 48);
        }
        assert!(drag.release());
        assert!(!drag.release());
    }
}

#[test]
fn clamp_pins_oversized_windows_to_origin() {
    let clamped = clamp_to_viewport(
        Point::new(50, 50),
        Size::new(2000, 2000),
        VIEWPORT,
        48,
    );
    assert_eq!(clamped, Point::new(0, 0));
}

#[test]
fn unknown_ids_are_ignored() {
    let mut wm: WindowManager<AppId> = WindowManager::new(FixedGeometry::new(VIEWPORT));
    wm.register(AppId::Notepad, AppId::Notepad.default_size());
    wm.open(AppId::Chrome, None);
    wm.minimize(AppId::Chrome);
    wm.bring_to_front(AppId::Chrome);
    wm.maximize(AppId::Chrome);
    assert_eq!(wm.lifecycle(AppId::Chrome), None);
    assert_eq!(wm.z_counter(), 0);
    assert!(wm.take_events().is_empty());
}
