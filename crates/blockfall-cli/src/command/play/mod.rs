use std::path::PathBuf;

use anyhow::Context;
use blockfall_engine::{PieceSeed, RotationSystem, SequencePolicy, Simulation, SimulationConfig};
use blockfall_runtime::{RenderMode, Runtime};

use crate::{
    command::play::app::PlayApp,
    high_score::{self, HighScoreStore},
    logging, util,
};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Board width in cells [default: 10]
    #[clap(long)]
    width: Option<usize>,
    /// Board height in cells [default: 20]
    #[clap(long)]
    height: Option<usize>,
    /// How the next piece is chosen [default: bag]
    #[clap(long, value_enum)]
    sequence: Option<SequenceArg>,
    /// How a blocked rotation is resolved [default: basic]
    #[clap(long, value_enum)]
    rotation: Option<RotationArg>,
    /// Piece sequence seed as 32 hex characters (random when omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// JSON file with simulation settings; flags override its values
    #[clap(long)]
    config: Option<PathBuf>,
    /// File holding the high score
    #[clap(long, default_value = high_score::DEFAULT_PATH)]
    high_score_file: PathBuf,
    /// Append log records to this file (filtered by RUST_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            sequence: None,
            rotation: None,
            seed: None,
            config: None,
            high_score_file: PathBuf::from(high_score::DEFAULT_PATH),
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum SequenceArg {
    /// Shuffled bag of all seven pieces
    Bag,
    /// Independent random choice for every piece
    Uniform,
}

impl From<SequenceArg> for SequencePolicy {
    fn from(arg: SequenceArg) -> Self {
        match arg {
            SequenceArg::Bag => SequencePolicy::Bag,
            SequenceArg::Uniform => SequencePolicy::Uniform,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum RotationArg {
    /// Rotate in place only
    Basic,
    /// Retry blocked rotations with one-cell nudges
    Kick,
}

impl From<RotationArg> for RotationSystem {
    fn from(arg: RotationArg) -> Self {
        match arg {
            RotationArg::Basic => RotationSystem::Basic,
            RotationArg::Kick => RotationSystem::Kick,
        }
    }
}

fn build_config(arg: &PlayArg) -> anyhow::Result<SimulationConfig> {
    let mut config = match &arg.config {
        Some(path) => util::read_json_file("simulation config", path)?,
        None => SimulationConfig::default(),
    };
    if let Some(width) = arg.width {
        config.width = width;
    }
    if let Some(height) = arg.height {
        config.height = height;
    }
    if let Some(sequence) = arg.sequence {
        config.sequence = sequence.into();
    }
    if let Some(rotation) = arg.rotation {
        config.rotation = rotation.into();
    }
    if let Some(seed) = arg.seed {
        config.seed = Some(seed);
    }
    config.validate().context("Invalid simulation config")?;
    Ok(config)
}

const FPS: f64 = 60.0;

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    logging::init(arg.log_file.as_deref())?;

    let config = build_config(arg)?;
    let store = HighScoreStore::new(&arg.high_score_file);
    let high_score = store.load()?;
    log::info!("loaded high score {high_score} from {}", store.path().display());

    let simulation = Simulation::new(config)?.with_high_score(high_score);
    let mut app = PlayApp::new(simulation, store.clone());

    Runtime::new()
        .with_render_mode(RenderMode::throttled_from_rate(FPS))
        .run(&mut app)?;

    let final_high_score = app.simulation().high_score();
    store
        .save_if_higher(final_high_score)
        .context("Failed to save high score")?;
    Ok(())
}
