use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{Board, RotationSystem};

use super::{
    game_stats::ScoringRule,
    piece_sequence::{PieceSeed, SequencePolicy},
};

/// Settings fixed for the lifetime of a [`Simulation`](super::Simulation).
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use blockfall_engine::{SequencePolicy, SimulationConfig};
///
/// let config: SimulationConfig =
///     serde_json::from_str(r#"{ "width": 12, "sequence": "uniform" }"#).unwrap();
/// assert_eq!(config.width, 12);
/// assert_eq!(config.height, 20);
/// assert_eq!(config.sequence, SequencePolicy::Uniform);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,
    pub sequence: SequencePolicy,
    pub rotation: RotationSystem,
    pub scoring: ScoringRule,
    /// Seed for the piece sequence; a random seed is drawn when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<PieceSeed>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board width {_0} is outside 4..=64")]
    Width(#[error(not(source))] usize),
    #[display("board height {_0} is outside 4..=128")]
    Height(#[error(not(source))] usize),
}

const WIDTH_RANGE: RangeInclusive<usize> = 4..=64;
const HEIGHT_RANGE: RangeInclusive<usize> = 4..=128;

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: Board::DEFAULT_WIDTH,
            height: Board::DEFAULT_HEIGHT,
            sequence: SequencePolicy::default(),
            rotation: RotationSystem::default(),
            scoring: ScoringRule::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Checks that the board dimensions can hold every piece.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !WIDTH_RANGE.contains(&self.width) {
            return Err(ConfigError::Width(self.width));
        }
        if !HEIGHT_RANGE.contains(&self.height) {
            return Err(ConfigError::Height(self.height));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!((config.width, config.height), (10, 20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let narrow = SimulationConfig {
            width: 3,
            ..SimulationConfig::default()
        };
        assert_eq!(narrow.validate(), Err(ConfigError::Width(3)));
        assert_eq!(
            narrow.validate().unwrap_err().to_string(),
            "board width 3 is outside 4..=64"
        );

        let tall = SimulationConfig {
            height: 129,
            ..SimulationConfig::default()
        };
        assert_eq!(tall.validate(), Err(ConfigError::Height(129)));
    }

    #[test]
    fn test_json_roundtrip_with_seed() {
        let config = SimulationConfig {
            rotation: RotationSystem::Kick,
            seed: Some(PieceSeed::from_bytes([7; 16])),
            ..SimulationConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"rotation\":\"kick\""));
        assert!(json.contains("\"seed\":\"07070707070707070707070707070707\""));
        let restored: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_seed_omitted_when_absent() {
        let json = serde_json::to_string(&SimulationConfig::default()).unwrap();
        assert!(!json.contains("seed"));
    }
}
