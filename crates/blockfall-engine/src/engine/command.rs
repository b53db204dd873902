/// Discrete input understood by [`Simulation::handle_command`](super::Simulation::handle_command).
///
/// Input collaborators (keyboard maps, test scripts) translate their events
/// into commands; the periodic tick is separate and goes through
/// [`Simulation::advance`](super::Simulation::advance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Start,
    Reset,
}

impl Command {
    /// Commands that only make sense while a piece is falling.
    #[must_use]
    pub fn needs_active_piece(self) -> bool {
        matches!(
            self,
            Command::MoveLeft
                | Command::MoveRight
                | Command::SoftDrop
                | Command::Rotate
                | Command::HardDrop
        )
    }
}
