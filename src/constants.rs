//! Shared crate-wide constants.

use std::time::Duration;

/// Width of one terminal cell in virtual pixels.
pub const CELL_WIDTH_PX: i32 = 8;

/// Height of one terminal cell in virtual pixels.
pub const CELL_HEIGHT_PX: i32 = 16;

/// Height reserved at the bottom of the viewport for the taskbar.
///
/// Units: virtual pixels. Dragged windows are clamped so their bottom edge
/// never slides underneath the taskbar.
pub const TASKBAR_HEIGHT: i32 = 48;

/// Height of a window's title bar, the region a drag gesture starts from.
pub const TITLE_BAR_HEIGHT: i32 = CELL_HEIGHT_PX;

/// Length of the opening and closing window transitions.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(200);

/// How long the boot splash stays up before it starts fading.
pub const BOOT_DURATION: Duration = Duration::from_millis(3500);

/// Fade-out of the boot splash.
pub const BOOT_FADE_DURATION: Duration = Duration::from_millis(500);

/// Slide-up of the lock screen after sign-in.
pub const LOCK_SLIDE_DURATION: Duration = Duration::from_millis(500);

/// Two clicks on the same target within this window count as a double-click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// Default input poll interval for the event loop.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(16);
