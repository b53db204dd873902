use std::time::Duration;

use crate::{
    CommandRejected, SpawnBlockedError,
    core::{
        board::Board,
        piece::{Piece, PieceKind, Position},
    },
};

use super::{
    command::Command,
    config::{ConfigError, SimulationConfig},
    game_stats::GameStats,
    piece_sequence::PieceSequence,
};

/// Lifecycle of a game.
///
/// `Ready → Running → GameOver`; only [`Simulation::reset`] leaves `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameStatus {
    Ready,
    Running,
    GameOver,
}

/// What happened when a piece was locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockSummary {
    pub cleared_lines: usize,
    /// Points gained from the line clear (drop points are not included).
    pub points: usize,
    /// The lock overflowed the board or the next piece could not spawn.
    pub game_over: bool,
}

/// Result of an accepted command or tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Outcome {
    /// The active piece moved or rotated, or the status changed.
    Applied,
    /// The active piece landed and was locked.
    Locked(LockSummary),
}

/// The board simulation: one game of falling pieces.
///
/// `Simulation` owns everything a game needs (board, active piece, piece
/// sequence, statistics, status and the best score seen so far) and is
/// driven from a single thread by two kinds of calls:
///
/// - [`Simulation::advance`] at the interval returned by
///   [`Simulation::gravity_interval`]
/// - [`Simulation::handle_command`] for each player command
///
/// Every call either applies its effect completely or is rejected with a
/// [`CommandRejected`] and leaves the state untouched.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Command, GameStatus, Simulation, SimulationConfig};
///
/// let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
/// assert_eq!(sim.status(), GameStatus::Ready);
///
/// sim.handle_command(Command::Start).unwrap();
/// sim.handle_command(Command::MoveLeft).unwrap();
/// sim.advance().unwrap();
///
/// let summary = sim.hard_drop().unwrap();
/// assert_eq!(summary.cleared_lines, 0);
/// assert!(sim.status().is_running());
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    board: Board,
    active_piece: Option<Piece>,
    sequence: PieceSequence,
    stats: GameStats,
    status: GameStatus,
    high_score: usize,
}

fn gravity_interval(level: usize) -> Duration {
    let level = u64::try_from(level).unwrap_or(u64::MAX);
    let millis = 100 + u64::saturating_sub(900, level.saturating_mul(100));
    Duration::from_millis(millis)
}

impl Simulation {
    /// Creates a simulation in the `Ready` state.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.width, config.height);
        let sequence = Self::new_sequence(&config);
        let stats = GameStats::new(config.scoring.clone());
        Ok(Self {
            config,
            board,
            active_piece: None,
            sequence,
            stats,
            status: GameStatus::Ready,
            high_score: 0,
        })
    }

    fn new_sequence(config: &SimulationConfig) -> PieceSequence {
        match config.seed {
            Some(seed) => PieceSequence::with_seed(config.sequence, seed),
            None => PieceSequence::new(config.sequence),
        }
    }

    /// Seeds the best score known from previous sessions.
    #[must_use]
    pub fn with_high_score(self, high_score: usize) -> Self {
        Self { high_score, ..self }
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the falling piece; `None` outside `Running`.
    #[must_use]
    pub fn active_piece(&self) -> Option<Piece> {
        self.active_piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    /// Best of the seeded high score and every score reached since.
    #[must_use]
    pub fn high_score(&self) -> usize {
        self.high_score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.sequence.next_pieces()
    }

    /// Where the active piece would come to rest if hard dropped.
    #[must_use]
    pub fn drop_position(&self) -> Option<Piece> {
        self.active_piece.map(|piece| self.landing_of(piece).0)
    }

    /// Interval between gravity ticks at the current level.
    ///
    /// One second at level 0, 100 ms shorter per level, never below 100 ms.
    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        gravity_interval(self.stats.level())
    }

    /// Dispatches a player command.
    pub fn handle_command(&mut self, command: Command) -> Result<Outcome, CommandRejected> {
        let result = match command {
            Command::MoveLeft => self.attempt_move(-1, 0),
            Command::MoveRight => self.attempt_move(1, 0),
            Command::SoftDrop => {
                let outcome = self.attempt_move(0, 1)?;
                if outcome.is_applied() {
                    self.stats.soft_drop(1);
                    self.update_high_score();
                }
                Ok(outcome)
            }
            Command::Rotate => self.attempt_rotate().map(|()| Outcome::Applied),
            Command::HardDrop => self.hard_drop().map(Outcome::Locked),
            Command::Start => self.start().map(|()| Outcome::Applied),
            Command::Reset => {
                self.reset();
                Ok(Outcome::Applied)
            }
        };
        if let Err(err) = &result {
            log::trace!("{command:?} rejected: {err}");
        }
        result
    }

    /// Begins play: `Ready → Running` and the first piece spawns.
    pub fn start(&mut self) -> Result<(), CommandRejected> {
        if !self.status.is_ready() {
            return Err(CommandRejected::NotReady);
        }
        log::info!(
            "game started on a {}x{} board ({:?} sequence, {:?} rotation)",
            self.board.width(),
            self.board.height(),
            self.config.sequence,
            self.config.rotation,
        );
        self.status = GameStatus::Running;
        // A blocked spawn has already moved the game to `GameOver`.
        _ = self.spawn_piece();
        Ok(())
    }

    /// Returns to `Ready` with an empty board and zeroed statistics.
    ///
    /// The high score survives. A configured seed replays the same sequence.
    pub fn reset(&mut self) {
        log::info!("game reset (score {})", self.stats.score());
        self.board = Board::new(self.config.width, self.config.height);
        self.sequence = Self::new_sequence(&self.config);
        self.stats = GameStats::new(self.config.scoring.clone());
        self.active_piece = None;
        self.status = GameStatus::Ready;
    }

    /// Draws the next piece and places it centered above the board.
    ///
    /// If the piece's footprint at the top row of the board is already
    /// occupied, the game is over: no piece becomes active and the board is
    /// left untouched.
    pub fn spawn_piece(&mut self) -> Result<(), SpawnBlockedError> {
        let kind = self.sequence.pop_next();
        let piece = Piece::spawn(kind, self.board.width());
        let footprint = Position::new(0, piece.position().col());
        if !self.board.is_valid_position(piece.shape(), footprint) {
            self.active_piece = None;
            self.end_game("spawn blocked");
            return Err(SpawnBlockedError);
        }
        log::debug!("spawned {kind:?} at {:?}", piece.position());
        self.active_piece = Some(piece);
        Ok(())
    }

    fn running_piece(&self) -> Result<Piece, CommandRejected> {
        match (self.status, self.active_piece) {
            (GameStatus::Running, Some(piece)) => Ok(piece),
            _ => Err(CommandRejected::NotRunning),
        }
    }

    /// Moves the active piece by `dx` columns and `dy` rows.
    ///
    /// A blocked downward move means the piece has landed: it is locked and
    /// [`Outcome::Locked`] is returned. Any other blocked move is rejected.
    pub fn attempt_move(&mut self, dx: i16, dy: i16) -> Result<Outcome, CommandRejected> {
        let piece = self.running_piece()?;
        let moved = piece.moved(dx, dy);
        if !self.board.is_colliding(&moved) {
            self.active_piece = Some(moved);
            return Ok(Outcome::Applied);
        }
        if dy > 0 {
            return Ok(Outcome::Locked(self.lock(piece)));
        }
        Err(CommandRejected::Collision)
    }

    /// Rotates the active piece 90° clockwise.
    ///
    /// The rotation is committed only if the rotated piece fits; with
    /// [`RotationSystem::Kick`](crate::RotationSystem::Kick) the nudged
    /// placements are tried in order as well.
    pub fn attempt_rotate(&mut self) -> Result<(), CommandRejected> {
        let piece = self.running_piece()?;
        let rotated = piece
            .rotation_candidates(self.config.rotation)
            .into_iter()
            .find(|candidate| !self.board.is_colliding(candidate))
            .ok_or(CommandRejected::Collision)?;
        self.active_piece = Some(rotated);
        Ok(())
    }

    /// Drops the active piece as far as it goes and locks it.
    pub fn hard_drop(&mut self) -> Result<LockSummary, CommandRejected> {
        let piece = self.running_piece()?;
        let (landed, rows) = self.landing_of(piece);
        self.stats.hard_drop(rows);
        self.update_high_score();
        Ok(self.lock(landed))
    }

    /// Locks the active piece once it has landed.
    ///
    /// Gravity and drops lock on their own; this is for drivers that want to
    /// lock a resting piece without waiting for the next tick. A piece that
    /// can still move down is rejected with [`CommandRejected::NotLanded`].
    pub fn lock_piece(&mut self) -> Result<LockSummary, CommandRejected> {
        let piece = self.running_piece()?;
        if !self.board.is_colliding(&piece.down()) {
            return Err(CommandRejected::NotLanded);
        }
        Ok(self.lock(piece))
    }

    /// The gravity tick: moves the active piece down one row, locking it if
    /// it cannot move.
    pub fn advance(&mut self) -> Result<Outcome, CommandRejected> {
        self.attempt_move(0, 1)
    }

    fn landing_of(&self, piece: Piece) -> (Piece, usize) {
        let mut landed = piece;
        let mut rows = 0;
        while !self.board.is_colliding(&landed.down()) {
            landed = landed.down();
            rows += 1;
        }
        (landed, rows)
    }

    fn lock(&mut self, piece: Piece) -> LockSummary {
        self.active_piece = None;
        if self.board.fill_piece(&piece).is_err() {
            let points = self.stats.complete_piece_drop(0);
            self.update_high_score();
            self.end_game("piece locked above the visible board");
            return LockSummary {
                cleared_lines: 0,
                points,
                game_over: true,
            };
        }

        let cleared_lines = self.board.clear_lines();
        let points = self.stats.complete_piece_drop(cleared_lines);
        self.update_high_score();
        log::debug!(
            "locked {:?} at {:?}, cleared {cleared_lines} line(s) for {points} point(s)",
            piece.kind(),
            piece.position(),
        );

        let game_over = self.spawn_piece().is_err();
        LockSummary {
            cleared_lines,
            points,
            game_over,
        }
    }

    fn update_high_score(&mut self) {
        self.high_score = self.high_score.max(self.stats.score());
    }

    fn end_game(&mut self, reason: &str) {
        self.status = GameStatus::GameOver;
        log::info!(
            "game over ({reason}): score {}, {} line(s), {} piece(s)",
            self.stats.score(),
            self.stats.total_cleared_lines(),
            self.stats.completed_pieces(),
        );
    }
}
