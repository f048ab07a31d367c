use std::io;
use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use tui::backend::CrosstermBackend;
use tui::layout::{Alignment, Constraint, Direction, Layout};
use tui::style::{Color, Style};
use tui::text::{Span, Spans};
use tui::widgets::{Block, BorderType, Borders, Paragraph};
use tui::Terminal;

use button_control::bsp::led::Led;
use button_control::bsp::pin::Pin;
use button_control::control::{Action, Board, ButtonControl, Config, Exercise, Status};
use button_control::debounce::{Debounce, BOUNCE_WINDOW, SETTLE_DELAY};
use button_control::edt::{Event, EDT};

use crate::dummy_led::{DummyLed, DummyReset};
use crate::keyboard_pin::{KeyCode, Keyboard, KeyboardPin};

mod dummy_led;
mod keyboard_pin;

const USAGE: &str = "usage: console_sim [counter|game|toggle|hold|bounce] [off|blocking|cooldown]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // the terminal belongs to the TUI, redirect stderr to read the log
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp_millis()
        .init();

    let config = parse_args(std::env::args().skip(1))?;

    let keyboard = Keyboard::create();
    let (sw1, sw2, sw3, sw4, sw5) = keys(&keyboard);
    let quit = KeyboardPin::create(&keyboard, KeyCode::Char('q'));
    let (d3, d4, d5, d6) = (
        DummyLed::create(),
        DummyLed::create(),
        DummyLed::create(),
        DummyLed::create(),
    );
    let reset = DummyReset::create();

    let edt = EDT::create();

    let control = ButtonControl::new(
        Board {
            sw1: &sw1,
            sw2: &sw2,
            sw3: &sw3,
            sw4: &sw4,
            sw5: &sw5,
            d3: &d3,
            d4: &d4,
            d5: &d5,
            d6: &d6,
            reset: &reset,
        },
        &edt,
        config,
    );

    enable_raw_mode()?;
    let result = match enter_tui() {
        Ok(mut terminal) => {
            control.start();
            let leds: [&dyn Led; 4] = [&d3, &d4, &d5, &d6];
            run(&mut terminal, &keyboard, &quit, &edt, &control, &reset, leds).await
        }
        Err(e) => Err(e.into()),
    };
    // also when entering failed halfway, raw mode must not outlive the process
    leave_tui(&mut stdout())?;

    if reset.is_requested() {
        println!("SW1 pressed, entering bootloader");
    }

    result
}

fn enter_tui() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // release events are reported only by terminals which support the kitty protocol
    if let Err(e) = execute!(
        stdout,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    ) {
        log::warn!("key release events are not available: {}", e);
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// Undoes [enter_tui] and raw mode, safe to call when they were never entered
fn leave_tui<W: Write>(out: &mut W) -> io::Result<()> {
    let _ = execute!(out, PopKeyboardEnhancementFlags);
    let left = execute!(out, LeaveAlternateScreen, Show);
    disable_raw_mode()?;
    left
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    keyboard: &Keyboard,
    quit: &dyn Pin,
    edt: &EDT<Action>,
    control: &ButtonControl<'_>,
    reset: &DummyReset,
    leds: [&dyn Led; 4],
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        keyboard.update()?;
        if quit.is_down() {
            edt.exit();
        }

        match edt.poll() {
            Event::Execute { msg } => control.process_message(msg),
            Event::Wait { ms } => tokio::time::sleep(Duration::from_millis(ms as u64)).await,
            Event::Halt => break,
        }

        if reset.is_requested() {
            break;
        }

        draw_tui(terminal, control, leds)?;
    }
    Ok(())
}

fn parse_args<I: Iterator<Item = String>>(args: I) -> Result<Config, String> {
    let mut config = Config::default();
    for arg in args {
        match arg.as_str() {
            "counter" => config.exercise = Exercise::Counter,
            "game" => config.exercise = Exercise::ClickerGame,
            "toggle" => config.exercise = Exercise::Toggle,
            "hold" => config.exercise = Exercise::MultiFunction,
            "bounce" => config.exercise = Exercise::BounceCounter,
            "off" => config.debounce = Debounce::Off,
            "blocking" => {
                config.debounce = Debounce::Blocking {
                    settle_ms: SETTLE_DELAY,
                }
            }
            "cooldown" => {
                config.debounce = Debounce::Cooldown {
                    window_ms: BOUNCE_WINDOW,
                }
            }
            other => return Err(format!("unknown argument {}\n{}", other, USAGE)),
        }
    }
    Ok(config)
}

fn draw_tui(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    control: &ButtonControl,
    leds: [&dyn Led; 4],
) -> io::Result<()> {
    let config = *control.config();
    let status = control.status();
    terminal.draw(|rect| {
        let size = rect.size();
        let vertical_layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints(
                [
                    Constraint::Length(3),
                    Constraint::Min(2),
                    Constraint::Length(3),
                ]
                .as_ref(),
            )
            .split(size);

        let led_spans: Vec<Span> = leds
            .iter()
            .zip(["D3", "D4", "D5", "D6"].iter())
            .flat_map(|(led, name)| {
                let style = if led.get() {
                    Style::default().fg(Color::Black).bg(Color::Rgb(230, 0, 0))
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                vec![Span::styled(format!("  {}  ", name), style), Span::raw("  ")]
            })
            .collect();

        let leds_paragraph = Paragraph::new(Spans::from(led_spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("LEDs"),
            );

        let status_paragraph = Paragraph::new(vec![
            Spans::from(Span::raw(format!("exercise: {:?}", config.exercise))),
            Spans::from(Span::raw(format!("debounce: {:?}", config.debounce))),
            Spans::from(Span::raw(describe(status))),
        ])
        .alignment(Alignment::Left);

        let help_paragraph = Paragraph::new(Spans::from(Span::raw(
            "2-5: SW2-SW5   Esc: SW1 (reset)   q: quit",
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Plain),
        );

        rect.render_widget(leds_paragraph, vertical_layout[0]);
        rect.render_widget(status_paragraph, vertical_layout[1]);
        rect.render_widget(help_paragraph, vertical_layout[2]);
    })?;
    Ok(())
}

fn describe(status: Status) -> String {
    match status {
        Status::Counter { count } => format!("count: {}", count),
        Status::ClickerGame { one, two, winner } => match winner {
            Some(player) => format!("{} : {}, player {:?} wins", one, two, player),
            None => format!("{} : {}", one, two),
        },
        Status::Toggle { on } => format!("D4 is {}", if on { "on" } else { "off" }),
        Status::MultiFunction { held_ms } => format!("held for {} ms", held_ms),
        Status::BounceCounter { count } => format!("presses: {} ({:08b})", count, count),
    }
}

/// SW1..SW5
fn keys(
    keyboard: &Keyboard,
) -> (
    KeyboardPin,
    KeyboardPin,
    KeyboardPin,
    KeyboardPin,
    KeyboardPin,
) {
    return (
        KeyboardPin::create(keyboard, KeyCode::Esc),
        KeyboardPin::create(keyboard, KeyCode::Char('2')),
        KeyboardPin::create(keyboard, KeyCode::Char('3')),
        KeyboardPin::create(keyboard, KeyCode::Char('4')),
        KeyboardPin::create(keyboard, KeyCode::Char('5')),
    );
}
