use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CEvent, KeyEvent, KeyEventKind};
pub use crossterm::event::KeyCode;

use button_control::bsp::pin::Pin;

/// Without release reports a held key only shows up as a stream of repeats.
/// The first repeat comes after the auto-repeat delay, which is usually 500 ms.
const HOLD_GRACE: Duration = Duration::from_millis(600);

/// Keys currently held down, fed from terminal key events
pub struct Keyboard {
    pressed: RefCell<HashMap<KeyCode, Instant>>,
}

impl Keyboard {
    pub fn create() -> Keyboard {
        return Keyboard {
            pressed: RefCell::new(HashMap::new()),
        };
    }

    /// Drains pending terminal events without blocking
    pub fn update(&self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            if let CEvent::Key(KeyEvent { code, kind, .. }) = event::read()? {
                let code = match code {
                    KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
                    other => other,
                };
                match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        self.pressed.borrow_mut().insert(code, Instant::now());
                    }
                    KeyEventKind::Release => {
                        self.pressed.borrow_mut().remove(&code);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn is_down(&self, code: KeyCode) -> bool {
        self.pressed
            .borrow()
            .get(&code)
            .map_or(false, |last_seen| last_seen.elapsed() < HOLD_GRACE)
    }
}

pub struct KeyboardPin<'a> {
    keyboard: &'a Keyboard,
    key_code: KeyCode,
}

impl<'a> KeyboardPin<'a> {
    /// Factory function to create a [KeyboardPin]
    pub fn create(keyboard: &'a Keyboard, key_code: KeyCode) -> KeyboardPin<'a> {
        return KeyboardPin { keyboard, key_code };
    }
}

impl Pin for KeyboardPin<'_> {
    /// returns true while the key is held
    fn is_down(&self) -> bool {
        return self.keyboard.is_down(self.key_code);
    }
}
