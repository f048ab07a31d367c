
pub mod pin {
    /// Logic level of a pushbutton which is pressed. Buttons are wired active-low.
    pub const PRESSED: bool = false;
    pub const NOT_PRESSED: bool = true;

    /// A pin (of a button) which may be down (tied to the ground) or up (pulled up)
    pub trait Pin {
        fn is_down(&self) -> bool;

        /// Raw logic level, [PRESSED] when the pin is down
        fn level(&self) -> bool {
            if self.is_down() {
                PRESSED
            } else {
                NOT_PRESSED
            }
        }
    }
}

pub mod led {
    /// Indicator LED which is either on or off
    pub trait Led {
        fn set(&self, on: bool);
        fn get(&self) -> bool;
    }
}

pub mod reset {
    /// Restarts the device, usually by jumping into the bootloader
    pub trait Reset {
        fn request_reset(&self);
    }
}
