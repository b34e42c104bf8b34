use crate::{GroupId, ParticipantId, Points};
use thiserror::Error;

/// Rejected session configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("{field} must not be negative (got={got})")]
    Negative { field: &'static str, got: Points },
    #[error("{field} too large (got={got}, max={max})")]
    TooLarge {
        field: &'static str,
        got: i64,
        max: i64,
    },
    #[error("num_rounds out of range (got={got}, max={max})")]
    Rounds { got: u32, max: u32 },
    #[error("discount_factor must be within (0, 1] (got={0})")]
    DiscountFactor(f64),
    #[error("cost range is empty (min={min}, max={max})")]
    CostRange { min: u32, max: u32 },
    #[error("contest stage {stage} pool must be even (got={pool})")]
    OddPool { stage: u32, pool: Points },
    #[error("contest stage {stage} has no tiers")]
    NoTiers { stage: u32 },
    #[error("contest stage {stage} tier {tier} must split the pool (pool={pool}, winner={winner}, loser={loser})")]
    TierSplit {
        stage: u32,
        tier: usize,
        pool: Points,
        winner: Points,
        loser: Points,
    },
    #[error("contest stage {stage} thresholds must be strictly increasing")]
    TierOrder { stage: u32 },
    #[error("contest stage {stage} must end with a tier without threshold")]
    MissingCatchAll { stage: u32 },
    #[error("participant count {participants} is not a positive multiple of group size {group_size}")]
    UnevenGroups {
        participants: usize,
        group_size: usize,
    },
}

/// Errors raised while collecting submissions or resolving a round.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("roster size mismatch (expected={expected}, got={got})")]
    RosterSize { expected: usize, got: usize },
    #[error("{field} out of range (got={got}, min={min}, max={max})")]
    OutOfRange {
        field: &'static str,
        got: i64,
        min: i64,
        max: i64,
    },
    #[error("unknown participant {0}")]
    UnknownParticipant(ParticipantId),
    #[error("unknown group {0}")]
    UnknownGroup(GroupId),
    #[error("slot {slot} is not part of a group of {size}")]
    UnknownSlot { slot: usize, size: usize },
    #[error("slot {slot} already submitted for round {round}")]
    AlreadySubmitted { slot: usize, round: u32 },
    #[error("slot {slot} has no decision to make in round {round}")]
    UnexpectedSubmission { slot: usize, round: u32 },
    #[error("wrong kind of decision for slot {slot} in round {round}")]
    WrongDecision { slot: usize, round: u32 },
    #[error("response submitted before the proposal in round {round}")]
    ProposalPending { round: u32 },
    #[error("slot {slot} has not submitted for round {round}")]
    MissingSubmission { slot: usize, round: u32 },
    #[error("round {round} waiting on {missing} submission(s)")]
    NotReady { round: u32, missing: usize },
    #[error("round {requested} has not started (current={current})")]
    FutureRound { requested: u32, current: u32 },
    #[error("session already played its last round ({last})")]
    SessionComplete { last: u32 },
    #[error("history append out of sequence (expected round={expected}, got={got})")]
    OutOfSequence { expected: u32, got: u32 },
}
