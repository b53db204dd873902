use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::Frame;

/// A key-driven application with a periodic tick, run by
/// [`Runtime::run`](crate::Runtime::run).
///
/// The app decides how often it wants to tick. The runtime asks for
/// [`tick_interval`](App::tick_interval) before the loop starts and again
/// after every key press and tick, and reschedules when the answer changes.
pub trait App {
    /// Returns whether the loop should stop.
    fn should_exit(&self) -> bool;

    /// Time between ticks. `None` stops ticking.
    fn tick_interval(&self) -> Option<Duration>;

    fn handle_key(&mut self, key: KeyEvent);

    fn tick(&mut self);

    fn draw(&self, frame: &mut Frame);
}
