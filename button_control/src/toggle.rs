use crate::button::{ButtonEvent, ButtonState};

#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum ToggleState {
    Off,
    On,
}

impl ToggleState {
    fn flipped(self) -> Self {
        match self {
            ToggleState::Off => ToggleState::On,
            ToggleState::On => ToggleState::Off,
        }
    }
}

/// Push-on, push-off button
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct ToggleButton {
    button: ButtonState,
    state: ToggleState,
}

impl ToggleButton {
    pub const fn new() -> Self {
        ToggleButton {
            button: ButtonState::new(),
            state: ToggleState::Off,
        }
    }

    /// Flips the state on a press edge. Returns the edge so callers can settle after a flip.
    pub fn update(&mut self, level: bool) -> ButtonEvent {
        let event = self.button.sample(level);
        if event == ButtonEvent::Pressed {
            self.state = self.state.flipped();
        }
        event
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == ToggleState::On
    }
}

impl Default for ToggleButton {
    fn default() -> Self {
        Self::new()
    }
}
