//! Seeded randomness for payoff rules.
//!
//! Every random draw a rule makes comes from a [`GameRng`] keyed by the session
//! seed, the game, the group and the round:
//! ```text
//! key = sha256(seed || len(game) || game || group || round || "round")
//! ```
//! Each (group, round) pair therefore gets its own ChaCha20 stream. Draws are
//! never shared between groups or reused across rounds, and the outcome of a
//! group does not depend on the order in which groups are resolved.

use commonware_cryptography::sha256::Sha256;
use commonware_cryptography::Hasher;
use econlab_types::{GroupId, DIE_FACES};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Length of a session seed in bytes.
pub const SEED_LENGTH: usize = 32;

/// Session-wide randomness seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seed(pub [u8; SEED_LENGTH]);

impl Seed {
    /// Expands a small integer into a full seed (handy for configs and tests).
    pub fn from_u64(value: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(&value.to_be_bytes());
        hasher.update(b"seed"); // Domain separator
        Self(hasher.finalize().0)
    }
}

/// Deterministic random source handed to payoff rules.
pub struct GameRng {
    inner: ChaCha20Rng,
}

impl GameRng {
    /// Stream for one group's round.
    pub fn new(seed: &Seed, game: &str, group: GroupId, round: u32) -> Self {
        let mut index = [0u8; 8];
        index[..4].copy_from_slice(&group.0.to_be_bytes());
        index[4..].copy_from_slice(&round.to_be_bytes());
        Self::derive(seed, game, &index, b"round")
    }

    /// Stream for draws made once at session creation.
    pub fn for_session(seed: &Seed, game: &str) -> Self {
        Self::derive(seed, game, &[], b"session")
    }

    fn derive(seed: &Seed, game: &str, index: &[u8], domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(&seed.0);
        hasher.update(&(game.len() as u32).to_be_bytes());
        hasher.update(game.as_bytes());
        hasher.update(index);
        hasher.update(domain); // Domain separator
        Self {
            inner: ChaCha20Rng::from_seed(hasher.finalize().0),
        }
    }

    /// Uniform roll in `1..=6`.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=DIE_FACES)
    }

    /// Uniform index in `0..len`.
    pub fn pick_uniform(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty set");
        self.inner.gen_range(0..len)
    }

    /// Index drawn with probability proportional to its weight. When every
    /// weight is zero the draw falls back to [`GameRng::pick_uniform`].
    pub fn pick_weighted(&mut self, weights: &[u32]) -> usize {
        match WeightedIndex::new(weights) {
            Ok(distribution) => distribution.sample(&mut self.inner),
            Err(_) => self.pick_uniform(weights.len()),
        }
    }

    /// Uniform integer in `min..=max`.
    pub fn draw_between(&mut self, min: u32, max: u32) -> u32 {
        self.inner.gen_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rolls(rng: &mut GameRng, count: usize) -> Vec<u8> {
        (0..count).map(|_| rng.roll_die()).collect()
    }

    #[test]
    fn test_same_inputs_same_stream() {
        let seed = Seed::from_u64(7);
        let mut a = GameRng::new(&seed, "rd", GroupId(0), 1);
        let mut b = GameRng::new(&seed, "rd", GroupId(0), 1);
        assert_eq!(rolls(&mut a, 32), rolls(&mut b, 32));
    }

    #[test]
    fn test_streams_differ_by_group_round_and_game() {
        let seed = Seed::from_u64(7);
        let base = rolls(&mut GameRng::new(&seed, "rd", GroupId(0), 1), 32);
        assert_ne!(base, rolls(&mut GameRng::new(&seed, "rd", GroupId(1), 1), 32));
        assert_ne!(base, rolls(&mut GameRng::new(&seed, "rd", GroupId(0), 2), 32));
        assert_ne!(base, rolls(&mut GameRng::new(&seed, "contest", GroupId(0), 1), 32));
        assert_ne!(
            base,
            rolls(&mut GameRng::new(&Seed::from_u64(8), "rd", GroupId(0), 1), 32)
        );
    }

    #[test]
    fn test_die_covers_all_faces() {
        let mut rng = GameRng::new(&Seed::from_u64(1), "dice", GroupId(0), 1);
        let mut seen = [false; 6];
        for _ in 0..600 {
            let roll = rng.roll_die();
            assert!((1..=6).contains(&roll));
            seen[(roll - 1) as usize] = true;
        }
        assert!(seen.iter().all(|face| *face));
    }

    #[test]
    fn test_weighted_never_picks_zero_weight() {
        let mut rng = GameRng::new(&Seed::from_u64(2), "rd", GroupId(0), 1);
        for _ in 0..200 {
            assert_eq!(rng.pick_weighted(&[0, 5, 0, 0]), 1);
            let pick = rng.pick_weighted(&[3, 0, 2, 0]);
            assert!(pick == 0 || pick == 2);
        }
    }

    #[test]
    fn test_weighted_is_proportional() {
        let mut rng = GameRng::new(&Seed::from_u64(5), "rd", GroupId(0), 1);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[rng.pick_weighted(&[1, 0, 0, 3])] += 1;
        }
        assert_eq!(counts[1] + counts[2], 0);
        // Expect 1000 / 3000; bounds are several standard deviations wide.
        assert!((850..=1150).contains(&counts[0]), "counts: {counts:?}");
        assert!((2850..=3150).contains(&counts[3]), "counts: {counts:?}");
    }

    #[test]
    fn test_weighted_all_zero_falls_back_to_uniform() {
        let mut rng = GameRng::new(&Seed::from_u64(3), "rd", GroupId(0), 1);
        let mut seen = [false; 4];
        for _ in 0..400 {
            seen[rng.pick_weighted(&[0, 0, 0, 0])] = true;
        }
        assert!(seen.iter().all(|slot| *slot));
    }

    #[test]
    fn test_draw_between_is_inclusive() {
        let mut rng = GameRng::for_session(&Seed::from_u64(4), "contest");
        for _ in 0..500 {
            let cost = rng.draw_between(1, 100);
            assert!((1..=100).contains(&cost));
        }
        assert_eq!(rng.draw_between(9, 9), 9);
    }
}
