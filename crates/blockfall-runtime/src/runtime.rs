use std::{io, time::Instant};

use crate::{
    App,
    event_loop::{EventLoop, RenderMode, TuiEvent},
};

/// Terminal application runtime.
///
/// Owns the terminal and the event loop, and keeps the tick schedule in step
/// with what the [`App`] asks for.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.events.set_render_mode(mode);
        self
    }

    /// Runs `app` until [`App::should_exit`] returns true.
    ///
    /// The terminal is restored before returning, also on error.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        self.events.set_tick_interval(app.tick_interval(), Instant::now());

        ratatui::run(|terminal| {
            while !app.should_exit() {
                let event = self.events.next()?;
                if self.dispatch(app, event, Instant::now()) {
                    terminal.draw(|frame| app.draw(frame))?;
                }
            }
            Ok(())
        })
    }

    /// Feeds one event to `app`. Returns whether a frame should be drawn.
    fn dispatch<A>(&mut self, app: &mut A, event: TuiEvent, now: Instant) -> bool
    where
        A: App,
    {
        match event {
            TuiEvent::Render => return true,
            TuiEvent::Tick => app.tick(),
            TuiEvent::Key(key) => app.handle_key(key),
        }
        self.events.set_tick_interval(app.tick_interval(), now);
        false
    }
}
