use std::time::Duration;

use blockfall_engine::{Command, GameStatus, Simulation};
use blockfall_runtime::App;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    widgets::{Block, Padding},
};

use crate::{
    high_score::HighScoreStore,
    ui::widgets::{KeyBinding, KeyBindingDisplay, SimulationDisplay},
};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Game(Command),
    TogglePause,
    Quit,
}

fn key_action(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Left => Action::Game(Command::MoveLeft),
        KeyCode::Right => Action::Game(Command::MoveRight),
        KeyCode::Down => Action::Game(Command::SoftDrop),
        KeyCode::Up | KeyCode::Char('x' | 'X') => Action::Game(Command::Rotate),
        KeyCode::Char(' ') => Action::Game(Command::HardDrop),
        KeyCode::Enter => Action::Game(Command::Start),
        KeyCode::Char('r' | 'R') => Action::Game(Command::Reset),
        KeyCode::Char('p' | 'P') => Action::TogglePause,
        KeyCode::Char('q' | 'Q') => Action::Quit,
        _ => return None,
    };
    Some(action)
}

const READY_KEYS: &[KeyBinding] = &[(&["Enter"], "Start"), (&["Q"], "Quit")];
const RUNNING_KEYS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑", "X"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["P"], "Pause"),
    (&["R"], "Reset"),
    (&["Q"], "Quit"),
];
const PAUSED_KEYS: &[KeyBinding] = &[(&["P"], "Resume"), (&["R"], "Reset"), (&["Q"], "Quit")];
const GAME_OVER_KEYS: &[KeyBinding] = &[(&["R"], "Reset"), (&["Q"], "Quit")];

/// Terminal front-end: feeds key presses and gravity ticks to the
/// simulation and draws it.
///
/// Pausing only stops the ticks; the simulation itself has no notion of it.
#[derive(Debug)]
pub struct PlayApp {
    simulation: Simulation,
    store: HighScoreStore,
    paused: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(simulation: Simulation, store: HighScoreStore) -> Self {
        Self {
            simulation,
            store,
            paused: false,
            is_exiting: false,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    fn is_running(&self) -> bool {
        self.simulation.status().is_running()
    }

    fn is_ticking(&self) -> bool {
        self.is_running() && !self.paused
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.is_exiting = true,
            Action::TogglePause if self.is_running() => {
                self.paused = !self.paused;
                log::debug!("paused: {}", self.paused);
            }
            Action::TogglePause => {}
            Action::Game(command) if self.paused && command.needs_active_piece() => {}
            Action::Game(command) => {
                let before = self.simulation.status();
                _ = self.simulation.handle_command(command);
                if command == Command::Reset {
                    self.paused = false;
                }
                self.on_status(before);
            }
        }
    }

    fn on_status(&mut self, before: GameStatus) {
        let after = self.simulation.status();
        if before != after && after.is_game_over() {
            self.save_high_score();
        }
    }

    fn save_high_score(&self) {
        let high_score = self.simulation.high_score();
        if let Err(err) = self.store.save_if_higher(high_score) {
            log::warn!("failed to save high score: {err:#}");
        }
    }

    fn key_bindings(&self) -> &'static [KeyBinding<'static>] {
        match self.simulation.status() {
            GameStatus::Ready => READY_KEYS,
            GameStatus::Running if self.paused => PAUSED_KEYS,
            GameStatus::Running => RUNNING_KEYS,
            GameStatus::GameOver => GAME_OVER_KEYS,
        }
    }
}

impl App for PlayApp {
    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    /// Gravity ticks while a game is running and not paused. The interval
    /// shortens as the level rises.
    fn tick_interval(&self) -> Option<Duration> {
        self.is_ticking().then(|| self.simulation.gravity_interval())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = key_action(key.code) {
            self.apply(action);
        }
    }

    fn tick(&mut self) {
        if self.is_ticking() {
            let before = self.simulation.status();
            _ = self.simulation.advance();
            self.on_status(before);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let display = SimulationDisplay::new(&self.simulation).paused(self.paused);
        let help = KeyBindingDisplay::new(self.key_bindings())
            .block(Block::new().padding(Padding::horizontal(1)));

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(display, main_area);
        frame.render_widget(help, help_area);
    }
}
