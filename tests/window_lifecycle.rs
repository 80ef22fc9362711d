use std::time::{Duration, Instant};

use term_desk::apps::AppId;
use term_desk::constants::TRANSITION_DURATION;
use term_desk::window::{
    DragController, FixedGeometry, Lifecycle, Point, Size, TaskbarIconState, WindowManager,
    WindowVisual, WmEvent,
};

fn desktop_wm() -> WindowManager<AppId> {
    WindowManager::with_windows(
        FixedGeometry::new(Size::new(1024, 768)),
        AppId::ALL.map(|app| (app, app.default_size())),
    )
}

#[test]
fn open_minimize_restore_scenario() {
    let mut wm = desktop_wm();
    let t0 = Instant::now();

    wm.open_at(AppId::Notepad, None, t0);
    assert_eq!(wm.lifecycle(AppId::Notepad), Some(Lifecycle::Open));
    assert_eq!(wm.z_order(AppId::Notepad), Some(1));
    let size = AppId::Notepad.default_size();
    assert_eq!(
        wm.position(AppId::Notepad),
        Some(Point::new((1024 - size.width) / 2, (768 - size.height) / 2))
    );
    assert_eq!(wm.icon_state(AppId::Notepad), TaskbarIconState::ACTIVE);

    wm.open_at(AppId::Explorer, Some("This PC"), t0);
    assert_eq!(wm.z_order(AppId::Explorer), Some(2));
    assert_eq!(wm.z_order(AppId::Notepad), Some(1));
    assert_eq!(wm.focused(), Some(AppId::Explorer));

    wm.minimize(AppId::Notepad);
    assert_eq!(wm.lifecycle(AppId::Notepad), Some(Lifecycle::Minimized));
    assert_eq!(wm.icon_state(AppId::Notepad), TaskbarIconState::MINIMIZED);
    assert_eq!(wm.z_order(AppId::Notepad), Some(1));

    wm.restore(AppId::Notepad);
    assert_eq!(wm.lifecycle(AppId::Notepad), Some(Lifecycle::Open));
    assert_eq!(wm.z_order(AppId::Notepad), Some(3));
    assert_eq!(wm.focused(), Some(AppId::Notepad));
}

#[test]
fn open_emits_init_with_argument() {
    let mut wm = desktop_wm();
    wm.open(AppId::Explorer, Some("Projects"));
    let events = wm.take_events();
    assert!(events.contains(&WmEvent::InitApp {
        id: AppId::Explorer,
        arg: Some("Projects".to_string()),
    }));
    assert!(events.contains(&WmEvent::DismissStartMenu));
    assert!(wm.take_events().is_empty());
}

#[test]
fn reopen_after_close_recenters() {
    let mut wm = desktop_wm();
    let t0 = Instant::now();
    wm.open_at(AppId::Chrome, None, t0);
    let centered = wm.position(AppId::Chrome);
    wm.set_position(AppId::Chrome, Point::new(3, 5));
    wm.maximize(AppId::Chrome);
    wm.close_at(AppId::Chrome, t0);
    assert_eq!(wm.position(AppId::Chrome), None);
    assert!(!wm.is_fullscreen(AppId::Chrome));

    wm.open_at(AppId::Chrome, None, t0 + Duration::from_millis(50));
    assert_eq!(wm.position(AppId::Chrome), centered);
}

#[test]
fn transitions_settle_after_their_duration() {
    let mut wm = desktop_wm();
    let t0 = Instant::now();
    wm.open_at(AppId::Notepad, None, t0);
    assert_eq!(wm.visual(AppId::Notepad), WindowVisual::Opening);
    wm.tick(t0 + TRANSITION_DURATION / 2);
    assert_eq!(wm.visual(AppId::Notepad), WindowVisual::Opening);
    wm.tick(t0 + TRANSITION_DURATION);
    assert_eq!(wm.visual(AppId::Notepad), WindowVisual::Shown);

    let t1 = t0 + Duration::from_secs(1);
    wm.close_at(AppId::Notepad, t1);
    assert!(matches!(wm.visual(AppId::Notepad), WindowVisual::Closing { .. }));
    // reopening inside the closing window cancels the pending hide
    wm.open_at(AppId::Notepad, None, t1 + Duration::from_millis(50));
    wm.tick(t1 + TRANSITION_DURATION);
    assert_ne!(wm.visual(AppId::Notepad), WindowVisual::Hidden);
    assert!(wm.is_open(AppId::Notepad));
}

#[test]
fn fullscreen_title_bar_press_does_not_drag() {
    let mut wm = desktop_wm();
    let mut drag = DragController::new();
    wm.open(AppId::Notepad, None);
    wm.maximize(AppId::Notepad);
    // top-left corner is inside the fullscreen title bar
    assert_eq!(drag.press(&mut wm, Point::new(10, 4)), Some(AppId::Notepad));
    assert!(!drag.is_dragging());
    assert_eq!(drag.drag_to(&mut wm, Point::new(300, 300)), None);
}

#[test]
fn closing_focused_window_refocuses_topmost_open() {
    let mut wm = desktop_wm();
    wm.open(AppId::Notepad, None);
    wm.open(AppId::Explorer, None);
    wm.open(AppId::Chrome, None);
    wm.minimize(AppId::Explorer);
    wm.close(AppId::Chrome);
    assert_eq!(wm.focused(), Some(AppId::Notepad));
    wm.close(AppId::Notepad);
    assert_eq!(wm.focused(), None);
}

#[test]
fn close_clears_taskbar_icon_from_any_lifecycle() {
    let mut wm = desktop_wm();
    let t0 = Instant::now();
    wm.open_at(AppId::Notepad, None, t0);
    wm.open_at(AppId::Explorer, None, t0);

    // still animating out, but the icon is already cleared
    wm.close_at(AppId::Explorer, t0);
    assert_eq!(wm.icon_state(AppId::Explorer), TaskbarIconState::CLEARED);
    assert!(wm.take_events().contains(&WmEvent::TaskbarIcon {
        id: AppId::Explorer,
        state: TaskbarIconState::CLEARED,
    }));

    wm.minimize(AppId::Notepad);
    assert_eq!(wm.icon_state(AppId::Notepad), TaskbarIconState::MINIMIZED);
    wm.close_at(AppId::Notepad, t0);
    assert_eq!(wm.lifecycle(AppId::Notepad), Some(Lifecycle::Closed));
    assert_eq!(wm.icon_state(AppId::Notepad), TaskbarIconState::CLEARED);
    assert_eq!(wm.visual(AppId::Notepad), WindowVisual::Hidden);
    assert_eq!(wm.position(AppId::Notepad), None);
}

#[test]
fn open_on_minimized_window_restores_in_place() {
    let mut wm = desktop_wm();
    let t0 = Instant::now();
    wm.open_at(AppId::Notepad, None, t0);
    wm.set_position(AppId::Notepad, Point::new(40, 60));
    wm.open_at(AppId::Explorer, None, t0);
    wm.minimize(AppId::Notepad);
    wm.take_events();

    wm.open_at(AppId::Notepad, Some("ignored"), t0 + Duration::from_secs(1));
    assert_eq!(wm.lifecycle(AppId::Notepad), Some(Lifecycle::Open));
    assert_eq!(wm.z_order(AppId::Notepad), Some(3));
    assert_eq!(wm.position(AppId::Notepad), Some(Point::new(40, 60)));
    assert_eq!(wm.focused(), Some(AppId::Notepad));
    assert_eq!(wm.icon_state(AppId::Notepad), TaskbarIconState::ACTIVE);
    assert_eq!(wm.visual(AppId::Notepad), WindowVisual::Shown);

    let events = wm.take_events();
    assert!(events.contains(&WmEvent::LayerChanged {
        id: AppId::Notepad,
        z_order: 3,
    }));
    assert!(!events.iter().any(|e| matches!(
        e,
        WmEvent::InitApp { .. } | WmEvent::DismissStartMenu | WmEvent::PositionChanged { .. }
    )));
}
