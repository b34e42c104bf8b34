//! Round driver for one group.
//!
//! A [`Group`] collects one submission per awaited slot, and once the barrier
//! is met resolves the round through its [`Game`] exactly once. Finalized
//! records are appended to per-slot and per-group [`History`]s and never
//! touched again; asking for a round that already resolved is a no-op.

use crate::game::{ensure_range, Game, RoundInput};
use crate::rng::{GameRng, Seed};
use econlab_types::{GameError, GroupId, History, ParticipantId};
use tracing::{debug, info, warn};

/// Whether a round can be resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Barrier {
    Waiting { missing: usize },
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveStatus {
    /// The payoff rule ran and new records were appended.
    Resolved,
    /// The round had been finalized before; nothing changed.
    AlreadyResolved,
}

#[derive(Clone, Debug)]
pub struct Group<G: Game> {
    id: GroupId,
    members: Vec<ParticipantId>,
    /// Round currently collecting submissions.
    round: u32,
    pending: Vec<Option<G::Submission>>,
    players: Vec<History<G::PlayerRound>>,
    rounds: History<G::GroupRound>,
    state: G::State,
}

impl<G: Game> Group<G> {
    pub fn new(
        config: &G::Config,
        id: GroupId,
        members: Vec<ParticipantId>,
    ) -> Result<Self, GameError> {
        let expected = G::players_per_group(config);
        if members.len() != expected {
            return Err(GameError::RosterSize {
                expected,
                got: members.len(),
            });
        }
        Ok(Self {
            id,
            round: 1,
            pending: vec![None; expected],
            players: (0..expected).map(|_| History::new()).collect(),
            rounds: History::new(),
            state: G::State::default(),
            members,
        })
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn members(&self) -> &[ParticipantId] {
        &self.members
    }

    pub fn slot_of(&self, participant: ParticipantId) -> Option<usize> {
        self.members.iter().position(|member| *member == participant)
    }

    /// Round currently collecting submissions (one past the last round once
    /// the session is over).
    pub fn current_round(&self) -> u32 {
        self.round
    }

    pub fn completed_rounds(&self) -> u32 {
        self.rounds.rounds()
    }

    pub fn is_complete(&self, config: &G::Config) -> bool {
        self.completed_rounds() >= G::num_rounds(config)
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    pub fn player_history(&self, slot: usize) -> Option<&History<G::PlayerRound>> {
        self.players.get(slot)
    }

    pub fn round_history(&self) -> &History<G::GroupRound> {
        &self.rounds
    }

    /// Submission `slot` made for the current round, if any.
    pub fn pending(&self, slot: usize) -> Option<&G::Submission> {
        self.pending.get(slot).and_then(Option::as_ref)
    }

    pub fn awaits(&self, config: &G::Config, slot: usize) -> bool {
        slot < self.members.len()
            && !self.is_complete(config)
            && G::awaits(config, &self.state, self.round, slot)
    }

    pub fn missing(&self, config: &G::Config) -> usize {
        (0..self.members.len())
            .filter(|slot| self.awaits(config, *slot) && self.pending[*slot].is_none())
            .count()
    }

    pub fn barrier(&self, config: &G::Config) -> Barrier {
        match self.missing(config) {
            0 => Barrier::Ready,
            missing => Barrier::Waiting { missing },
        }
    }

    fn input<'a>(&'a self, config: &'a G::Config, shared: &'a G::Shared) -> RoundInput<'a, G> {
        RoundInput {
            config,
            shared,
            group: self.id,
            round: self.round,
            members: &self.members,
            submissions: &self.pending,
            players: &self.players,
            rounds: &self.rounds,
            state: &self.state,
        }
    }

    /// Records `slot`'s decision for the current round.
    pub fn submit(
        &mut self,
        config: &G::Config,
        shared: &G::Shared,
        slot: usize,
        submission: G::Submission,
    ) -> Result<Barrier, GameError> {
        if self.is_complete(config) {
            return Err(GameError::SessionComplete {
                last: G::num_rounds(config),
            });
        }
        if slot >= self.members.len() {
            return Err(GameError::UnknownSlot {
                slot,
                size: self.members.len(),
            });
        }
        if !G::awaits(config, &self.state, self.round, slot) {
            return Err(GameError::UnexpectedSubmission {
                slot,
                round: self.round,
            });
        }
        if self.pending[slot].is_some() {
            return Err(GameError::AlreadySubmitted {
                slot,
                round: self.round,
            });
        }
        if let Err(err) = G::validate(&self.input(config, shared), slot, &submission) {
            warn!(game = G::NAME, group = %self.id, round = self.round, slot, ?err, "rejected submission");
            return Err(err);
        }
        debug!(game = G::NAME, group = %self.id, round = self.round, slot, ?submission, "accepted submission");
        self.pending[slot] = Some(submission);
        Ok(self.barrier(config))
    }

    /// Runs the payoff rule for `round`.
    ///
    /// Only the current round can be resolved, and only once every awaited
    /// slot has submitted. Rounds that already resolved return
    /// [`ResolveStatus::AlreadyResolved`] without touching any record.
    pub fn resolve_round(
        &mut self,
        config: &G::Config,
        shared: &G::Shared,
        seed: &Seed,
        round: u32,
    ) -> Result<ResolveStatus, GameError> {
        let last = G::num_rounds(config);
        ensure_range("round", i64::from(round), 1, i64::from(last))?;
        if round <= self.completed_rounds() {
            debug!(game = G::NAME, group = %self.id, round, "round already resolved");
            return Ok(ResolveStatus::AlreadyResolved);
        }
        if round != self.round {
            return Err(GameError::FutureRound {
                requested: round,
                current: self.round,
            });
        }
        let missing = self.missing(config);
        if missing > 0 {
            return Err(GameError::NotReady { round, missing });
        }

        let mut rng = GameRng::new(seed, G::NAME, self.id, round);
        let resolution = G::resolve(&self.input(config, shared), &mut rng)?;
        if resolution.players.len() != self.members.len() {
            return Err(GameError::RosterSize {
                expected: self.members.len(),
                got: resolution.players.len(),
            });
        }

        for (history, record) in self.players.iter_mut().zip(resolution.players) {
            history.push(round, record)?;
        }
        self.rounds.push(round, resolution.group)?;
        self.state = resolution.state;
        self.pending.iter_mut().for_each(|pending| *pending = None);
        self.round += 1;
        info!(game = G::NAME, group = %self.id, round, state = ?self.state, "resolved round");
        Ok(ResolveStatus::Resolved)
    }

    /// Resolves the round currently collecting submissions.
    pub fn resolve_current(
        &mut self,
        config: &G::Config,
        shared: &G::Shared,
        seed: &Seed,
    ) -> Result<ResolveStatus, GameError> {
        if self.is_complete(config) {
            return Err(GameError::SessionComplete {
                last: G::num_rounds(config),
            });
        }
        self.resolve_round(config, shared, seed, self.round)
    }
}
