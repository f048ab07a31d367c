use crate::bsp::pin::PRESSED;

/// A press held longer than this (ms) becomes a long press
pub const LONG_PRESS_THRESHOLD: u32 = 1000;

#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum Hold {
    Released,
    Short,
    Long,
}

/// Button which remembers since when it has been held down
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct HoldButton {
    pressed_since: Option<u32>,
    threshold: u32,
}

impl HoldButton {
    pub const fn new(threshold: u32) -> Self {
        HoldButton {
            pressed_since: None,
            threshold,
        }
    }

    /// Measures the hold against the monotonic clock `now`, not against the number of samples
    pub fn update(&mut self, level: bool, now: u32) -> Hold {
        if level != PRESSED {
            self.pressed_since = None;
            return Hold::Released;
        }
        let since = *self.pressed_since.get_or_insert(now);
        if now.wrapping_sub(since) > self.threshold {
            Hold::Long
        } else {
            Hold::Short
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_since.is_some()
    }

    /// How long the button has been held, 0 when released
    pub fn held_for(&self, now: u32) -> u32 {
        self.pressed_since
            .map(|since| now.wrapping_sub(since))
            .unwrap_or(0)
    }
}

impl Default for HoldButton {
    fn default() -> Self {
        Self::new(LONG_PRESS_THRESHOLD)
    }
}

#[cfg(test)]
mod test {
    use crate::bsp::pin::{NOT_PRESSED, PRESSED};
    use crate::hold::{Hold, HoldButton};

    /// Holds the button for `duration` ms sampling every `period` ms, returns the last result
    fn hold(button: &mut HoldButton, start: u32, duration: u32, period: u32) -> Hold {
        let mut now = start;
        let mut last = Hold::Released;
        while now <= start + duration {
            last = button.update(PRESSED, now);
            now += period;
        }
        last
    }

    #[test]
    fn short_press_stays_short() {
        let mut button = HoldButton::new(1000);
        assert_eq!(hold(&mut button, 0, 900, 10), Hold::Short);
    }

    #[test]
    fn long_press_does_not_depend_on_loop_period() {
        for period in [1, 10, 50, 250].iter() {
            let mut button = HoldButton::new(1000);
            assert_eq!(hold(&mut button, 0, 1000, *period), Hold::Short);
            assert_eq!(button.update(PRESSED, 1001), Hold::Long, "period {}", period);
        }
    }

    #[test]
    fn release_resets_hold_duration() {
        let mut button = HoldButton::new(1000);
        hold(&mut button, 0, 2000, 10);
        assert_eq!(button.held_for(2000), 2000);
        assert_eq!(button.update(NOT_PRESSED, 2010), Hold::Released);
        assert_eq!(button.held_for(2010), 0);
        assert_eq!(button.update(PRESSED, 2020), Hold::Short);
    }
}
