use std::cell::Cell;

use button_control::bsp::led::Led;
use button_control::bsp::reset::Reset;

/// Led which resides in memory, for simulation or testing
pub struct DummyLed {
    on: Cell<bool>,
}

impl DummyLed {
    /// Factory function to create a dummy LED
    pub fn create() -> Self {
        return DummyLed {
            on: Cell::new(false),
        };
    }
}

impl Led for DummyLed {
    fn set(&self, on: bool) {
        self.on.set(on);
    }

    fn get(&self) -> bool {
        return self.on.get();
    }
}

/// There is no bootloader to jump into, the simulation ends instead
pub struct DummyReset {
    requested: Cell<bool>,
}

impl DummyReset {
    pub fn create() -> Self {
        return DummyReset {
            requested: Cell::new(false),
        };
    }

    pub fn is_requested(&self) -> bool {
        return self.requested.get();
    }
}

impl Reset for DummyReset {
    fn request_reset(&self) {
        self.requested.set(true);
    }
}
