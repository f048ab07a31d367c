use no_std_compat::cell::Cell;

use crate::bounce::BounceCounter;
use crate::bsp::led::Led;
use crate::bsp::pin::{Pin, NOT_PRESSED, PRESSED};
use crate::bsp::reset::Reset;
use crate::button::ButtonEvent;
use crate::counter::{EdgeCounter, COUNT_LIMIT, MAX_COUNT};
use crate::debounce::{Debounce, Debouncer};
use crate::edt::EDT;
use crate::game::{ClickerGame, Player};
use crate::hold::{Hold, HoldButton, LONG_PRESS_THRESHOLD};
use crate::toggle::ToggleButton;

#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum Action {
    Poll,
}

/// Main loop pacing, ms between two polls
pub const LOOP_PERIOD: u32 = 10;

/// Program variants of the course board
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum Exercise {
    /// SW2 presses are counted, D3 lit while SW2 is down, D4 once the count reaches the maximum.
    /// SW3 resets the count.
    Counter,
    /// SW2 against SW5, D4 or D5 lights for the first to reach the maximum.
    /// SW3 or SW4 starts a new round.
    ClickerGame,
    /// SW3 switches D4 on and off
    Toggle,
    /// SW3 lights D3 while pressed and D4 once held for longer than the long press threshold
    MultiFunction,
    /// Raw SW4 presses shown in binary on D3-D6, SW5 resets
    BounceCounter,
}

#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct Config {
    pub exercise: Exercise,
    pub debounce: Debounce,
    /// Count which turns the threshold LED on, at most `count_limit`
    pub max_count: u8,
    /// Counters saturate here
    pub count_limit: u8,
    pub loop_period: u32,
    pub long_press: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            exercise: Exercise::Counter,
            debounce: Debounce::default(),
            max_count: MAX_COUNT,
            count_limit: COUNT_LIMIT,
            loop_period: LOOP_PERIOD,
            long_press: LONG_PRESS_THRESHOLD,
        }
    }
}

/// Buttons and LEDs of the board. SW1 is the system button which restarts the board.
pub struct Board<'a> {
    pub sw1: &'a dyn Pin,
    pub sw2: &'a dyn Pin,
    pub sw3: &'a dyn Pin,
    pub sw4: &'a dyn Pin,
    pub sw5: &'a dyn Pin,
    pub d3: &'a dyn Led,
    pub d4: &'a dyn Led,
    pub d5: &'a dyn Led,
    pub d6: &'a dyn Led,
    pub reset: &'a dyn Reset,
}

/// Progress of the running exercise
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum Status {
    Counter { count: u8 },
    ClickerGame { one: u8, two: u8, winner: Option<Player> },
    Toggle { on: bool },
    MultiFunction { held_ms: u32 },
    BounceCounter { count: u8 },
}

#[derive(Clone, Copy)]
enum Program {
    Counter(EdgeCounter),
    ClickerGame(ClickerGame),
    Toggle(ToggleButton),
    MultiFunction(HoldButton),
    BounceCounter(BounceCounter),
}

/// Debounced levels of SW2..SW5
#[derive(Clone, Copy)]
struct Levels {
    sw2: bool,
    sw3: bool,
    sw4: bool,
    sw5: bool,
}

#[derive(Clone, Copy)]
struct State {
    program: Program,
    /// SW2..SW5
    inputs: [Debouncer; 4],
}

/// Control loop: samples the buttons once per poll and drives the LEDs of the selected exercise
pub struct ButtonControl<'a> {
    board: Board<'a>,
    edt: &'a EDT<Action>,
    config: Config,
    state: Cell<State>,
}

impl<'a> ButtonControl<'a> {
    pub fn new(board: Board<'a>, edt: &'a EDT<Action>, config: Config) -> Self {
        return ButtonControl {
            board,
            edt,
            config,
            state: Cell::new(State {
                program: Self::program(&config),
                inputs: [Debouncer::new(config.debounce); 4],
            }),
        };
    }

    fn program(config: &Config) -> Program {
        match config.exercise {
            Exercise::Counter => {
                Program::Counter(EdgeCounter::new(config.max_count, config.count_limit))
            }
            Exercise::ClickerGame => {
                Program::ClickerGame(ClickerGame::new(config.max_count, config.count_limit))
            }
            Exercise::Toggle => Program::Toggle(ToggleButton::new()),
            Exercise::MultiFunction => Program::MultiFunction(HoldButton::new(config.long_press)),
            Exercise::BounceCounter => Program::BounceCounter(BounceCounter::new()),
        }
    }

    /// Switches all LEDs off and runs the first poll
    pub fn start(&self) {
        log::info!(
            "starting {:?}, debounce {:?}",
            self.config.exercise,
            self.config.debounce
        );
        for led in self.leds().iter() {
            led.set(false);
        }
        self.poll();
    }

    pub fn process_message(&self, action: Action) {
        match action {
            Action::Poll => self.poll(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn status(&self) -> Status {
        let now = self.edt.now();
        match self.state.get().program {
            Program::Counter(counter) => Status::Counter {
                count: counter.count(),
            },
            Program::ClickerGame(game) => Status::ClickerGame {
                one: game.score(Player::One),
                two: game.score(Player::Two),
                winner: game.winner(),
            },
            Program::Toggle(toggle) => Status::Toggle { on: toggle.is_on() },
            Program::MultiFunction(button) => Status::MultiFunction {
                held_ms: button.held_for(now),
            },
            Program::BounceCounter(counter) => Status::BounceCounter {
                count: counter.count(),
            },
        }
    }

    /// One iteration of the main loop
    fn poll(&self) {
        let now = self.edt.now();
        let mut state = self.state.get();
        let levels = self.read_levels(&mut state.inputs, now);

        let pressed = match &mut state.program {
            Program::Counter(counter) => self.run_counter(counter, levels),
            Program::ClickerGame(game) => self.run_clicker_game(game, levels),
            Program::Toggle(toggle) => self.run_toggle(toggle, levels),
            Program::MultiFunction(button) => self.run_multi_function(button, levels, now),
            Program::BounceCounter(counter) => self.run_bounce_counter(counter, levels),
        };
        self.state.set(state);

        if self.board.sw1.level() == PRESSED {
            log::info!("SW1 is down, requesting reset");
            self.board.reset.request_reset();
        }

        let settle = if pressed {
            self.config.debounce.settle_delay()
        } else {
            0
        };
        // the next poll is never due at the same time as this one
        let delay = self.config.loop_period.saturating_add(settle).max(1);
        self.edt.schedule(delay, Action::Poll);
    }

    fn read_levels(&self, inputs: &mut [Debouncer; 4], now: u32) -> Levels {
        let pins = [self.board.sw2, self.board.sw3, self.board.sw4, self.board.sw5];
        let mut levels = [NOT_PRESSED; 4];
        for ((level, pin), input) in levels.iter_mut().zip(pins.iter()).zip(inputs.iter_mut()) {
            *level = input.level(pin.level(), now);
        }
        Levels {
            sw2: levels[0],
            sw3: levels[1],
            sw4: levels[2],
            sw5: levels[3],
        }
    }

    fn run_counter(&self, counter: &mut EdgeCounter, levels: Levels) -> bool {
        let was_reached = counter.reached();
        let tick = counter.update(levels.sw2);
        if tick.event == ButtonEvent::Pressed {
            log::debug!("SW2 press #{}", tick.count);
        }
        if tick.reached && !was_reached {
            log::info!("count reached {}", tick.count);
        }

        if levels.sw3 == PRESSED && counter.count() > 0 {
            log::debug!("count {} reset", counter.count());
            counter.reset();
        }

        self.board.d3.set(counter.is_pressed());
        self.board.d4.set(counter.reached());
        tick.event == ButtonEvent::Pressed
    }

    fn run_clicker_game(&self, game: &mut ClickerGame, levels: Levels) -> bool {
        let pressed_before = [game.is_pressed(Player::One), game.is_pressed(Player::Two)];
        let winner_before = game.winner();

        let winner = game.update(levels.sw2, levels.sw5);
        if winner_before.is_none() {
            if let Some(player) = winner {
                log::info!(
                    "player {:?} wins {} to {}",
                    player,
                    game.score(Player::One),
                    game.score(Player::Two)
                );
            }
        }

        if levels.sw3 == PRESSED || levels.sw4 == PRESSED {
            if game.score(Player::One) > 0 || game.score(Player::Two) > 0 {
                log::debug!("new round");
            }
            game.reset();
        }

        self.board.d3.set(game.is_pressed(Player::One));
        self.board.d6.set(game.is_pressed(Player::Two));
        self.board.d4.set(game.winner() == Some(Player::One));
        self.board.d5.set(game.winner() == Some(Player::Two));

        (!pressed_before[0] && game.is_pressed(Player::One))
            || (!pressed_before[1] && game.is_pressed(Player::Two))
    }

    fn run_toggle(&self, toggle: &mut ToggleButton, levels: Levels) -> bool {
        let event = toggle.update(levels.sw3);
        if event == ButtonEvent::Pressed {
            log::debug!("toggled {:?}", toggle.state());
        }
        self.board.d4.set(toggle.is_on());
        event == ButtonEvent::Pressed
    }

    fn run_multi_function(&self, button: &mut HoldButton, levels: Levels, now: u32) -> bool {
        let was_pressed = button.is_pressed();
        let was_long = button.held_for(now) > self.config.long_press;
        let hold = button.update(levels.sw3, now);
        if hold == Hold::Long && !was_long {
            log::debug!("long press");
        }
        self.board.d3.set(hold != Hold::Released);
        self.board.d4.set(hold == Hold::Long);
        !was_pressed && button.is_pressed()
    }

    fn run_bounce_counter(&self, counter: &mut BounceCounter, levels: Levels) -> bool {
        let event = counter.update(levels.sw4);
        if event == ButtonEvent::Pressed {
            log::debug!("SW4 press #{}", counter.count());
        }
        if levels.sw5 == PRESSED {
            counter.reset();
        }
        for (led, on) in self.leds().iter().zip(counter.display().iter()) {
            led.set(*on);
        }
        event == ButtonEvent::Pressed
    }

    fn leds(&self) -> [&'a dyn Led; 4] {
        [self.board.d3, self.board.d4, self.board.d5, self.board.d6]
    }
}
