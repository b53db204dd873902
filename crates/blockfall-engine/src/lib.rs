pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reason a command was not applied to the simulation.
///
/// Rejections are no-ops: the simulation state is left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CommandRejected {
    #[display("simulation is not running")]
    NotRunning,
    #[display("simulation is not ready to start")]
    NotReady,
    #[display("piece colliding with the board or its walls")]
    Collision,
    #[display("piece has not landed yet")]
    NotLanded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece locked above the visible board")]
pub struct PieceOverflowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("spawn position blocked by locked cells")]
pub struct SpawnBlockedError;
