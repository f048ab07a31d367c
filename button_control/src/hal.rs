//! Adapters from embedded-hal pins to the board traits

use no_std_compat::cell::{Cell, RefCell};

use embedded_hal::digital::{InputPin, OutputPin};

use crate::bsp::led::Led;
use crate::bsp::pin::Pin;

/// Pushbutton between the pin and the ground, with the pin pulled up
pub struct PullUpButton<INPUT: InputPin> {
    pin: RefCell<INPUT>,
}

impl<INPUT: InputPin> PullUpButton<INPUT> {
    pub fn new(pin: INPUT) -> Self {
        PullUpButton {
            pin: RefCell::new(pin),
        }
    }
}

impl<INPUT: InputPin> Pin for PullUpButton<INPUT> {
    fn is_down(&self) -> bool {
        self.pin.borrow_mut().is_low().unwrap_or(false)
    }
}

/// Pin level which lights an LED
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum Active {
    High,
    Low,
}

/// LED on a push-pull output, lit at the `active` level
pub struct GpioLed<OUTPUT: OutputPin> {
    pin: RefCell<OUTPUT>,
    active: Active,
    state: Cell<bool>,
}

impl<OUTPUT: OutputPin> GpioLed<OUTPUT> {
    pub fn new(pin: OUTPUT, active: Active) -> Self {
        GpioLed {
            pin: RefCell::new(pin),
            active,
            state: Cell::new(false),
        }
    }
}

impl<OUTPUT: OutputPin> Led for GpioLed<OUTPUT> {
    fn set(&self, on: bool) {
        let mut pin = self.pin.borrow_mut();
        let high = match self.active {
            Active::High => on,
            Active::Low => !on,
        };
        let result = if high { pin.set_high() } else { pin.set_low() };
        match result {
            Ok(()) => self.state.set(on),
            Err(_) => log::warn!("failed to drive LED {}", if on { "on" } else { "off" }),
        }
    }

    fn get(&self) -> bool {
        self.state.get()
    }
}

#[cfg(test)]
mod test {
    use core::convert::Infallible;
    use std::cell::Cell;
    use std::rc::Rc;

    use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

    use crate::bsp::led::Led;
    use crate::bsp::pin::{Pin, NOT_PRESSED, PRESSED};
    use crate::hal::{Active, GpioLed, PullUpButton};

    struct FakeInput {
        low: Rc<Cell<bool>>,
    }

    impl ErrorType for FakeInput {
        type Error = Infallible;
    }

    impl InputPin for FakeInput {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.low.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.low.get())
        }
    }

    struct BrokenInput;

    impl ErrorType for BrokenInput {
        type Error = ErrorKind;
    }

    impl InputPin for BrokenInput {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(ErrorKind::Other)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    struct FakeOutput {
        high: Rc<Cell<bool>>,
        broken: bool,
    }

    impl ErrorType for FakeOutput {
        type Error = ErrorKind;
    }

    impl OutputPin for FakeOutput {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            self.high.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            self.high.set(true);
            Ok(())
        }
    }

    #[test]
    fn low_input_is_pressed() {
        let low = Rc::new(Cell::new(false));
        let button = PullUpButton::new(FakeInput { low: low.clone() });
        assert!(!button.is_down());
        assert_eq!(button.level(), NOT_PRESSED);
        low.set(true);
        assert!(button.is_down());
        assert_eq!(button.level(), PRESSED);
    }

    #[test]
    fn read_errors_count_as_not_pressed() {
        let button = PullUpButton::new(BrokenInput);
        assert!(!button.is_down());
    }

    #[test]
    fn led_drives_the_pin() {
        let high = Rc::new(Cell::new(false));
        let led = GpioLed::new(
            FakeOutput {
                high: high.clone(),
                broken: false,
            },
            Active::High,
        );
        led.set(true);
        assert!(high.get());
        assert!(led.get());
        led.set(false);
        assert!(!high.get());
        assert!(!led.get());
    }

    #[test]
    fn failed_write_keeps_previous_state() {
        let led = GpioLed::new(
            FakeOutput {
                high: Rc::new(Cell::new(false)),
                broken: true,
            },
            Active::High,
        );
        led.set(true);
        assert!(!led.get());
    }

    #[test]
    fn active_low_led_is_lit_by_a_low_pin() {
        let high = Rc::new(Cell::new(true));
        let led = GpioLed::new(
            FakeOutput {
                high: high.clone(),
                broken: false,
            },
            Active::Low,
        );
        led.set(true);
        assert!(!high.get());
        assert!(led.get());
        led.set(false);
        assert!(high.get());
        assert!(!led.get());
    }
}
