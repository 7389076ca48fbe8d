use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Source of pseudo-random choices for piece and color selection.
///
/// The session asks for one index per decision, so tests can script the
/// exact sequence of pieces and colors. Any `FnMut(usize) -> usize` closure
/// is a source:
///
/// ```
/// use cascadris_engine::RandomSource;
///
/// let mut always_first = |_bound: usize| -> usize { 0 };
/// assert_eq!(always_first.next_below(6), 0);
/// ```
pub trait RandomSource {
    /// Returns an integer in `0..bound`. `bound` is never zero.
    fn next_below(&mut self, bound: usize) -> usize;
}

impl<F> RandomSource for F
where
    F: FnMut(usize) -> usize,
{
    fn next_below(&mut self, bound: usize) -> usize {
        self(bound) % bound
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed, written as 32 hex digits. The same seed always produces
/// the same sequence of pieces and colors.
///
/// # Example
///
/// ```
/// use cascadris_engine::{PieceRng, PieceSeed, RandomSource as _};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let mut a = PieceRng::with_seed(seed);
/// let mut b = PieceRng::with_seed(seed);
/// assert_eq!(a.next_below(6), b.next_below(6));
///
/// let parsed: PieceSeed = seed.to_string().parse().unwrap();
/// assert_eq!(parsed, seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    #[must_use]
    pub const fn as_u128(self) -> u128 {
        u128::from_be_bytes(self.0)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.as_u128())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed {input:?}: expected 32 hex digits")]
pub struct ParsePieceSeedError {
    input: String,
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParsePieceSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self::from_u128(num))
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
        PieceSeed(rng.random())
    }
}

/// Default [`RandomSource`]: a PCG generator seeded from a [`PieceSeed`].
#[derive(Debug, Clone)]
pub struct PieceRng {
    seed: PieceSeed,
    rng: Pcg32,
}

impl PieceRng {
    /// Creates a generator from a fresh random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }
}

impl Default for PieceRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for PieceRng {
    fn next_below(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let seed = PieceSeed::from_u128(0x1234_5678_9abc_def0_0fed_cba9_8765_4321);
        let mut a = PieceRng::with_seed(seed);
        let mut b = PieceRng::with_seed(seed);
        let seq_a: Vec<_> = (0..32).map(|_| a.next_below(6)).collect();
        let seq_b: Vec<_> = (0..32).map(|_| b.next_below(6)).collect();
        assert_eq!(seq_a, seq_b);
        assert!(seq_a.iter().all(|&n| n < 6));
    }

    #[test]
    fn test_seed_display_and_parse() {
        let seed = PieceSeed::from_u128(0xabc);
        let text = seed.to_string();
        assert_eq!(text, "00000000000000000000000000000abc");
        assert_eq!(text.parse::<PieceSeed>(), Ok(seed));
    }

    #[test]
    fn test_seed_parse_errors() {
        assert!("abc".parse::<PieceSeed>().is_err());
        assert!("zz000000000000000000000000000000".parse::<PieceSeed>().is_err());
    }

    #[test]
    fn test_seed_serialization() {
        let seed = PieceSeed::from_u128(u128::MAX);
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, format!("\"{}\"", "f".repeat(32)));
        let parsed: PieceSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, seed);
        assert!(serde_json::from_str::<PieceSeed>("\"1234\"").is_err());
    }

    #[test]
    fn test_closure_source_stays_in_range() {
        let mut counter = 0;
        let mut source = |_bound: usize| -> usize {
            counter += 1;
            counter
        };
        assert_eq!(source.next_below(6), 1);
        assert_eq!(source.next_below(2), 0);
        assert_eq!(source.next_below(6), 3);
    }
}
