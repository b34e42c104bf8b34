//! The contract every payoff rule implements.
//!
//! A [`Game`] is a set of associated types plus three hooks:
//! - [`Game::create_shared`] runs once at session creation,
//! - [`Game::validate`] checks one submission against the round in progress,
//! - [`Game::resolve`] turns a complete round into finalized records.
//!
//! Rules never own state. Everything they read arrives through [`RoundInput`]
//! and everything they produce is returned in a [`Resolution`]; the
//! [`Group`](crate::Group) driver is the only writer of histories.

use crate::rng::GameRng;
use econlab_types::{ConfigError, GameError, GroupId, History, ParticipantId};
use std::fmt::Debug;

pub trait Game: Sized {
    /// Stable name, also used to separate random streams between games.
    const NAME: &'static str;

    type Config: Clone + Debug + Send + Sync;
    /// Session-scoped data fixed at creation and read by every round.
    type Shared: Clone + Debug + Send + Sync;
    type Submission: Clone + Debug + Send + Sync;
    type PlayerRound: Clone + Debug + Send + Sync;
    type GroupRound: Clone + Debug + Send + Sync;
    /// Group state carried from one round to the next.
    type State: Clone + Debug + Default + Send + Sync;

    fn validate_config(config: &Self::Config) -> Result<(), ConfigError>;

    fn players_per_group(config: &Self::Config) -> usize;

    fn num_rounds(config: &Self::Config) -> u32;

    fn create_shared(config: &Self::Config, participants: usize, rng: &mut GameRng)
        -> Self::Shared;

    /// Whether `slot` owes a decision this round. Rounds in which nobody is
    /// awaited resolve as soon as they are asked to.
    fn awaits(_config: &Self::Config, _state: &Self::State, _round: u32, _slot: usize) -> bool {
        true
    }

    fn validate(
        input: &RoundInput<'_, Self>,
        slot: usize,
        submission: &Self::Submission,
    ) -> Result<(), GameError>;

    fn resolve(
        input: &RoundInput<'_, Self>,
        rng: &mut GameRng,
    ) -> Result<Resolution<Self>, GameError>;
}

/// Read-only view of a group's round handed to a rule.
pub struct RoundInput<'a, G: Game> {
    pub config: &'a G::Config,
    pub shared: &'a G::Shared,
    pub group: GroupId,
    pub round: u32,
    pub members: &'a [ParticipantId],
    /// Submissions collected so far, indexed by slot.
    pub submissions: &'a [Option<G::Submission>],
    /// Finalized records of earlier rounds, one history per slot.
    pub players: &'a [History<G::PlayerRound>],
    pub rounds: &'a History<G::GroupRound>,
    pub state: &'a G::State,
}

impl<'a, G: Game> RoundInput<'a, G> {
    pub fn submission(&self, slot: usize) -> Result<&'a G::Submission, GameError> {
        self.submissions
            .get(slot)
            .and_then(Option::as_ref)
            .ok_or(GameError::MissingSubmission {
                slot,
                round: self.round,
            })
    }

    /// Every slot's submission in slot order.
    pub fn all_submissions(&self) -> Result<Vec<&'a G::Submission>, GameError> {
        (0..self.members.len())
            .map(|slot| self.submission(slot))
            .collect()
    }

    /// Latest finalized record of `slot`, if it has played a round already.
    pub fn last_record(&self, slot: usize) -> Option<&'a G::PlayerRound> {
        self.players.get(slot).and_then(History::last)
    }
}

/// Output of [`Game::resolve`]: one record per slot, the group record and the
/// state carried into the next round.
#[derive(Clone, Debug)]
pub struct Resolution<G: Game> {
    pub players: Vec<G::PlayerRound>,
    pub group: G::GroupRound,
    pub state: G::State,
}

/// Checks a numeric decision against its inclusive bounds.
pub(crate) fn ensure_range(field: &'static str, got: i64, min: i64, max: i64) -> Result<(), GameError> {
    if got < min || got > max {
        return Err(GameError::OutOfRange {
            field,
            got,
            min,
            max,
        });
    }
    Ok(())
}
