//! Single-threaded terminal driver for key-driven apps with a periodic tick.
//!
//! [`Runtime::run`] owns the terminal and calls into an [`App`] serially:
//! `tick` on every tick, `handle_key` for every key press and `draw` whenever
//! a render is due. No two calls ever overlap. The tick interval is the app's
//! to choose and may change after any call.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event_loop;
mod runtime;
