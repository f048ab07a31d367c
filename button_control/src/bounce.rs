use crate::button::{ButtonEvent, ButtonState};
use crate::counter::{SaturatingCounter, COUNT_LIMIT};

/// Number of LEDs showing the count
pub const DISPLAY_WIDTH: usize = 4;

/// Count as binary LED levels, least significant bit first
pub fn binary_display(value: u8) -> [bool; DISPLAY_WIDTH] {
    let mut leds = [false; DISPLAY_WIDTH];
    for (bit, led) in leds.iter_mut().enumerate() {
        *led = value & (1 << bit) != 0;
    }
    leds
}

/// Counts every press edge it is fed, to make switch contact bounce visible
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct BounceCounter {
    button: ButtonState,
    count: SaturatingCounter,
}

impl BounceCounter {
    pub const fn new() -> Self {
        BounceCounter {
            button: ButtonState::new(),
            count: SaturatingCounter::new(COUNT_LIMIT),
        }
    }

    pub fn update(&mut self, level: bool) -> ButtonEvent {
        let event = self.button.sample(level);
        if event == ButtonEvent::Pressed {
            self.count.increment();
        }
        event
    }

    pub fn reset(&mut self) {
        self.count.reset();
    }

    pub fn count(&self) -> u8 {
        self.count.value()
    }

    pub fn display(&self) -> [bool; DISPLAY_WIDTH] {
        binary_display(self.count.value())
    }
}

impl Default for BounceCounter {
    fn default() -> Self {
        Self::new()
    }
}
