//! Terminal input and output seams. The desktop only talks to these traits,
//! so tests can swap the console for a scripted input and a test backend.

pub mod console;
pub mod headless;
pub mod output_driver;
pub mod utils;

use ::crossterm::event::Event;
use std::io;
use std::time::Duration;

pub use console::{ConsoleInputDriver, ConsoleOutputDriver};
pub use headless::{HeadlessOutputDriver, ScriptedInput};
pub use output_driver::OutputDriver;

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn read_one<D: InputDriver>(mut driver: D) -> Event {
        assert!(driver.poll(Duration::from_millis(0)).unwrap());
        driver.read().unwrap()
    }

    #[test]
    fn blanket_impl_for_mut_ref_works() {
        let mut scripted = ScriptedInput::new([Event::Key(KeyEvent::new(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
        ))]);
        match read_one(&mut scripted) {
            Event::Key(k) => assert_eq!(k.code, KeyCode::Char('x')),
            other => panic!("expected key, got {other:?}"),
        }
        assert!(!scripted.poll(Duration::from_millis(0)).unwrap());
    }
}
