use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// How the next piece kind is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencePolicy {
    /// Shuffled bag of all seven kinds; each kind appears once per seven draws.
    #[default]
    Bag,
    /// Independent, unweighted random choice for every draw.
    Uniform,
}

/// Produces the sequence of pieces for one game.
///
/// # 7-Bag Policy
///
/// With [`SequencePolicy::Bag`] the generator:
///
/// 1. Creates a "bag" containing all 7 piece types (I, O, S, Z, J, L, T)
/// 2. Shuffles the bag
/// 3. Hands pieces out in order
/// 4. Appends a freshly shuffled bag when 7 or fewer pieces remain queued
///
/// Bags are appended whole, so draws `7k..7k + 7` always form one bag.
///
/// With [`SequencePolicy::Uniform`] every queued piece is an independent draw.
///
/// Both policies keep at least 7 pieces queued so that callers can preview
/// upcoming pieces with [`PieceSequence::next_pieces`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceSequence, SequencePolicy};
///
/// let mut sequence = PieceSequence::new(SequencePolicy::Bag);
///
/// let first = sequence.pop_next();
/// let upcoming: Vec<_> = sequence.next_pieces().take(5).collect();
/// assert_eq!(upcoming.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct PieceSequence {
    policy: SequencePolicy,
    rng: Pcg32,
    queue: VecDeque<PieceKind>,
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed for the generator's random number
/// generator. The same seed and policy always produce the same sequence,
/// which makes games reproducible for debugging and testing.
///
/// Seeds serialize as, and parse from, 32 hexadecimal characters.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceSeed, PieceSequence, SequencePolicy};
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
///
/// let mut a = PieceSequence::with_seed(SequencePolicy::Bag, seed);
/// let mut b = PieceSequence::with_seed(SequencePolicy::Bag, seed);
/// assert_eq!(a.pop_next(), b.pop_next());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: expected 32 hexadecimal characters")]
pub struct ParseSeedError {
    #[error(not(source))]
    input: String,
}

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceSequence {
    /// Creates a generator with a random seed.
    ///
    /// For deterministic sequences, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new(policy: SequencePolicy) -> Self {
        Self::with_seed(policy, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed.
    #[must_use]
    pub fn with_seed(policy: SequencePolicy, seed: PieceSeed) -> Self {
        let mut this = Self {
            policy,
            rng: Pcg32::from_seed(seed.0),
            queue: VecDeque::with_capacity(PieceKind::LEN * 2),
        };
        this.refill();
        this
    }

    #[must_use]
    pub fn policy(&self) -> SequencePolicy {
        self.policy
    }

    /// Tops the queue up so that more than 7 pieces are waiting.
    fn refill(&mut self) {
        while self.queue.len() <= PieceKind::LEN {
            match self.policy {
                SequencePolicy::Bag => {
                    let mut bag = PieceKind::ALL;
                    bag.shuffle(&mut self.rng);
                    self.queue.extend(bag);
                }
                SequencePolicy::Uniform => {
                    let kind = self.rng.random();
                    self.queue.push_back(kind);
                }
            }
        }
    }

    /// Draws the next piece.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty, which the refill strategy rules out.
    pub fn pop_next(&mut self) -> PieceKind {
        let kind = self
            .queue
            .pop_front()
            .expect("piece queue should never be empty");
        self.refill();
        kind
    }

    /// Returns an iterator over the queued upcoming pieces.
    ///
    /// The iterator always yields at least 8 pieces.
    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied()
    }
}
