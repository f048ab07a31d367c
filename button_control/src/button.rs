use crate::bsp::pin::PRESSED;

/// What happened to a button between two samples
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum ButtonEvent {
    /// Not pressed before, pressed now
    Pressed,
    /// Still pressed since an earlier [ButtonEvent::Pressed]
    Held,
    Released,
    Idle,
}

/// Remembers whether a press was already seen, so a held button is counted only once
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct ButtonState {
    pressed: bool,
}

impl ButtonState {
    pub const fn new() -> Self {
        ButtonState { pressed: false }
    }

    /// Classifies the sampled level against the stored pressed flag and updates the flag
    pub fn sample(&mut self, level: bool) -> ButtonEvent {
        if level == PRESSED {
            if self.pressed {
                ButtonEvent::Held
            } else {
                self.pressed = true;
                ButtonEvent::Pressed
            }
        } else {
            // release always clears the flag
            let was_pressed = self.pressed;
            self.pressed = false;
            if was_pressed {
                ButtonEvent::Released
            } else {
                ButtonEvent::Idle
            }
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::new()
    }
}
