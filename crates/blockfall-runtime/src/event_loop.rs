use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, KeyEvent};

/// When the screen is redrawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Render after every tick or terminal event.
    #[default]
    OnDirty,
    /// Render after state changes, at most once per interval.
    ///
    /// Changes arriving faster than the interval are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from a frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// A frame is due according to the [`RenderMode`].
    Render,
    /// A key was pressed. Releases and repeats never get here.
    Key(KeyEvent),
}

/// Decides which event comes next.
///
/// Ticks take priority over renders, and renders over terminal events. With
/// no tick interval, no ticks are generated.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl EventLoop {
    /// Creates a loop with ticks disabled and `OnDirty` rendering.
    pub(super) fn new(now: Instant) -> Self {
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: now,
            // Render immediately on startup.
            last_render: now.checked_sub(Duration::from_secs(86400)).unwrap_or(now),
            dirty: true,
        }
    }

    pub(super) fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval
    }

    /// Sets the tick interval; `None` stops ticks.
    ///
    /// A changed interval is measured from `now`, so resuming or speeding up
    /// never fires a tick immediately. Setting the current interval again
    /// keeps the running phase.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>, now: Instant) {
        if self.tick_interval != interval {
            self.tick_interval = interval;
            self.last_tick = now;
        }
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Returns a tick or render event if one is due at `now`.
    pub(super) fn due(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(tick_interval) = self.tick_interval
            && now.duration_since(self.last_tick) >= tick_interval
        {
            self.last_tick = now;
            self.dirty = true;
            return Some(TuiEvent::Tick);
        }

        let do_render = match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        };
        if do_render {
            self.last_render = now;
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    /// Blocks until the next event.
    ///
    /// Terminal events are waited for with a timeout that ends at the next
    /// tick or render deadline. Every terminal event marks the frame dirty,
    /// but only key presses are handed out.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            if let Some(key) = event::read()?.as_key_press_event() {
                return Ok(TuiEvent::Key(key));
            }
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}
