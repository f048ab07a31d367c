use crate::bsp::pin::NOT_PRESSED;

/// Busy wait after a press edge in [Debounce::Blocking] mode
pub const SETTLE_DELAY: u32 = 200;
/// Contact bounce settles well within this window
pub const BOUNCE_WINDOW: u32 = 50;

/// How contact bounce is masked
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum Debounce {
    /// Every level change is taken as is
    Off,
    /// Nothing is sampled for `settle_ms` after a press edge, on any input
    Blocking { settle_ms: u32 },
    /// Changes of one input within `window_ms` of its last accepted change are ignored
    Cooldown { window_ms: u32 },
}

impl Debounce {
    /// Extra delay before the next sample once a press edge was accepted
    pub fn settle_delay(&self) -> u32 {
        match *self {
            Debounce::Blocking { settle_ms } => settle_ms,
            Debounce::Off | Debounce::Cooldown { .. } => 0,
        }
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Debounce::Blocking {
            settle_ms: SETTLE_DELAY,
        }
    }
}

/// Holds on to the last accepted level of an input until the cooldown window has passed
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct CooldownFilter {
    window: u32,
    accepted: bool,
    last_change: Option<u32>,
}

impl CooldownFilter {
    pub const fn new(window: u32) -> Self {
        CooldownFilter {
            window,
            accepted: NOT_PRESSED,
            last_change: None,
        }
    }

    pub fn filter(&mut self, level: bool, now: u32) -> bool {
        if level != self.accepted {
            let settled = match self.last_change {
                Some(at) => now.wrapping_sub(at) >= self.window,
                None => true,
            };
            if settled {
                self.accepted = level;
                self.last_change = Some(now);
            }
        }
        self.accepted
    }
}

/// Per input debounce state
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct Debouncer {
    mode: Debounce,
    filter: CooldownFilter,
}

impl Debouncer {
    pub const fn new(mode: Debounce) -> Self {
        let window = match mode {
            Debounce::Cooldown { window_ms } => window_ms,
            _ => 0,
        };
        Debouncer {
            mode,
            filter: CooldownFilter::new(window),
        }
    }

    /// Level the state machines should see for the raw `level` sampled at `now`
    pub fn level(&mut self, level: bool, now: u32) -> bool {
        match self.mode {
            Debounce::Cooldown { .. } => self.filter.filter(level, now),
            Debounce::Off | Debounce::Blocking { .. } => level,
        }
    }

    pub fn settle_delay(&self) -> u32 {
        self.mode.settle_delay()
    }
}

#[cfg(test)]
mod test {
    use crate::bsp::pin::{NOT_PRESSED, PRESSED};
    use crate::debounce::{CooldownFilter, Debounce, Debouncer, BOUNCE_WINDOW};

    #[test]
    fn bounce_within_window_is_ignored() {
        let mut filter = CooldownFilter::new(BOUNCE_WINDOW);
        assert_eq!(filter.filter(PRESSED, 1000), PRESSED);
        // contacts open and close again a few ms later
        assert_eq!(filter.filter(NOT_PRESSED, 1002), PRESSED);
        assert_eq!(filter.filter(PRESSED, 1004), PRESSED);
        assert_eq!(filter.filter(NOT_PRESSED, 1010), PRESSED);
        // real release after the window
        assert_eq!(filter.filter(NOT_PRESSED, 1050), NOT_PRESSED);
    }

    #[test]
    fn first_change_is_accepted_immediately() {
        let mut filter = CooldownFilter::new(BOUNCE_WINDOW);
        assert_eq!(filter.filter(PRESSED, 0), PRESSED);
    }

    #[test]
    fn window_survives_clock_wrap_around() {
        let mut filter = CooldownFilter::new(BOUNCE_WINDOW);
        filter.filter(PRESSED, u32::MAX - 10);
        assert_eq!(filter.filter(NOT_PRESSED, 5), PRESSED);
        assert_eq!(filter.filter(NOT_PRESSED, 40), NOT_PRESSED);
    }

    #[test]
    fn only_cooldown_mode_filters_levels() {
        let mut off = Debouncer::new(Debounce::Off);
        let mut blocking = Debouncer::new(Debounce::Blocking { settle_ms: 200 });
        let mut cooldown = Debouncer::new(Debounce::Cooldown { window_ms: 50 });
        off.level(PRESSED, 0);
        blocking.level(PRESSED, 0);
        cooldown.level(PRESSED, 0);
        assert_eq!(off.level(NOT_PRESSED, 1), NOT_PRESSED);
        assert_eq!(blocking.level(NOT_PRESSED, 1), NOT_PRESSED);
        assert_eq!(cooldown.level(NOT_PRESSED, 1), PRESSED);
    }

    #[test]
    fn only_blocking_mode_delays() {
        assert_eq!(Debouncer::new(Debounce::Off).settle_delay(), 0);
        assert_eq!(
            Debouncer::new(Debounce::Blocking { settle_ms: 200 }).settle_delay(),
            200
        );
        assert_eq!(
            Debouncer::new(Debounce::Cooldown { window_ms: 50 }).settle_delay(),
            0
        );
    }
}
