use crate::button::{ButtonEvent, ButtonState};

/// Presses needed before the threshold output turns on
pub const MAX_COUNT: u8 = 100;
/// Largest value an 8-bit counter can hold
pub const COUNT_LIMIT: u8 = u8::MAX;

/// 8-bit counter which stops at its limit instead of wrapping around
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct SaturatingCounter {
    value: u8,
    limit: u8,
}

impl SaturatingCounter {
    pub const fn new(limit: u8) -> Self {
        SaturatingCounter { value: 0, limit }
    }

    /// Adds one unless the limit is reached. Returns false when saturated.
    pub fn increment(&mut self) -> bool {
        if self.value < self.limit {
            self.value += 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    pub fn value(&self) -> u8 {
        self.value
    }

}

/// Result of one [EdgeCounter::update]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct Tick {
    pub event: ButtonEvent,
    pub count: u8,
    /// count >= threshold, evaluated on every update
    pub reached: bool,
}

/// Counts press edges of a single button and reports when the threshold is reached
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct EdgeCounter {
    button: ButtonState,
    count: SaturatingCounter,
    threshold: u8,
}

impl EdgeCounter {
    /// A threshold above the limit could never be reached, it is lowered to the limit
    pub const fn new(threshold: u8, limit: u8) -> Self {
        EdgeCounter {
            button: ButtonState::new(),
            count: SaturatingCounter::new(limit),
            threshold: if threshold > limit { limit } else { threshold },
        }
    }

    pub fn update(&mut self, level: bool) -> Tick {
        let event = self.button.sample(level);
        if event == ButtonEvent::Pressed {
            self.count.increment();
        }
        Tick {
            event,
            count: self.count.value(),
            reached: self.reached(),
        }
    }

    /// Follows the button without counting its presses
    pub fn track(&mut self, level: bool) -> ButtonEvent {
        self.button.sample(level)
    }

    pub fn reset(&mut self) {
        self.count.reset();
    }

    pub fn count(&self) -> u8 {
        self.count.value()
    }

    pub fn reached(&self) -> bool {
        self.count.value() >= self.threshold
    }

    pub fn is_pressed(&self) -> bool {
        self.button.is_pressed()
    }
}

impl Default for EdgeCounter {
    fn default() -> Self {
        Self::new(MAX_COUNT, COUNT_LIMIT)
    }
}
