// Filters raw crossterm events before they reach the desktop: key releases
// and repeats are dropped where the platform reports them, and bare pointer
// motion is discarded since nothing on the desktop reacts to hover.
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseEventKind};

#[derive(Debug, Default)]
pub struct InputNormalizer {
    esc_down: bool,
}

impl InputNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(key) => {
                if cfg!(windows) {
                    match key.kind {
                        KeyEventKind::Release => {
                            if key.code == KeyCode::Esc {
                                self.esc_down = false;
                            }
                            return None;
                        }
                        KeyEventKind::Repeat => return None,
                        KeyEventKind::Press => {}
                    }
                    if key.code == KeyCode::Esc {
                        if self.esc_down {
                            return None;
                        }
                        self.esc_down = true;
                    } else {
                        self.esc_down = false;
                    }
                } else if key.kind == KeyEventKind::Release {
                    return None;
                }
                Some(Event::Key(key))
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Moved => None,
            other => Some(other),
        }
    }
}
