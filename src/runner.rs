use std::time::{Duration, Instant};

use crossterm::event::Event;

use crate::desktop::Desktop;
use crate::drivers::{InputDriver, OutputDriver};
use crate::error::DeskError;
use crate::event_loop::{ControlFlow, EventLoop};

/// Drive `desktop` until it asks to quit: advance timers and redraw on every
/// idle pass, route every input event in between.
pub fn run_desktop<O, D>(
    output: &mut O,
    driver: D,
    desktop: &mut Desktop,
    poll_interval: Duration,
) -> Result<(), DeskError>
where
    O: OutputDriver,
    D: InputDriver,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;

    event_loop.run(|_driver, event| {
        let now = Instant::now();
        match event {
            Some(Event::Resize(cols, rows)) => {
                tracing::debug!(cols, rows, "terminal resized");
            }
            Some(event) => {
                desktop.handle_event(&event, now);
            }
            None => {
                desktop.tick(now);
                if !desktop.should_quit() {
                    output.draw(|mut frame| desktop.render(&mut frame, now))?;
                }
            }
        }
        if desktop.should_quit() {
            tracing::info!("quit requested");
            Ok(ControlFlow::Quit)
        } else {
            Ok(ControlFlow::Continue)
        }
    })?;
    Ok(())
}
