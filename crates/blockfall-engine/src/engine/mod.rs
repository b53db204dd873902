//! Game rules and state management.
//!
//! This module drives the core data structures through one game:
//!
//! - [`Simulation`] - Board, active piece, sequence and statistics of one game
//! - [`Command`] - Player input understood by the simulation
//! - [`SimulationConfig`] - Board size, sequencing, rotation and scoring settings
//! - [`GameStats`] - Score, level and line clear statistics
//! - [`PieceSequence`] - Bag or uniform piece generation
//! - [`PieceSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Create a [`Simulation`] from a [`SimulationConfig`]; it starts `Ready`
//! 2. [`Command::Start`] spawns the first piece and the game is `Running`
//! 3. The driver calls [`Simulation::advance`] every
//!    [`Simulation::gravity_interval`] and forwards player commands
//! 4. Landed pieces lock, full rows clear and the next piece spawns
//! 5. A blocked spawn or a lock above the board ends the game
//! 6. [`Command::Reset`] returns to `Ready`, keeping the high score
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Command, Outcome, Simulation, SimulationConfig};
//!
//! let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
//! sim.handle_command(Command::Start).unwrap();
//!
//! // Let gravity pull the first piece down until it lands.
//! loop {
//!     if let Outcome::Locked(summary) = sim.advance().unwrap() {
//!         assert_eq!(summary.cleared_lines, 0);
//!         break;
//!     }
//! }
//! assert_eq!(sim.stats().completed_pieces(), 1);
//! ```

pub use self::{command::*, config::*, game_stats::*, piece_sequence::*, simulation::*};

mod command;
mod config;
mod game_stats;
mod piece_sequence;
mod simulation;
