use super::validate_rounds;
use crate::{
    round_points, ConfigError, Points, ULTIMATUM_DISCOUNT_FACTOR, ULTIMATUM_INITIAL_BUDGET,
    ULTIMATUM_ROUNDS,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UltimatumConfig {
    pub initial_budget: Points,
    pub discount_factor: f64,
    pub num_rounds: u32,
}

impl Default for UltimatumConfig {
    fn default() -> Self {
        Self {
            initial_budget: ULTIMATUM_INITIAL_BUDGET,
            discount_factor: ULTIMATUM_DISCOUNT_FACTOR,
            num_rounds: ULTIMATUM_ROUNDS,
        }
    }
}

impl UltimatumConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_budget <= 0 {
            return Err(ConfigError::Zero {
                field: "initial_budget",
            });
        }
        if !(self.discount_factor > 0.0 && self.discount_factor <= 1.0) {
            return Err(ConfigError::DiscountFactor(self.discount_factor));
        }
        validate_rounds(self.num_rounds)
    }

    /// Pool on offer in `round` (1-based): the initial budget discounted once
    /// per elapsed round.
    pub fn pool(&self, round: u32) -> Points {
        let elapsed = round.saturating_sub(1) as i32;
        round_points(self.initial_budget as f64 * self.discount_factor.powi(elapsed))
    }

    /// Pool the players would face if `round` ends without agreement.
    pub fn next_pool(&self, round: u32) -> Points {
        self.pool(round + 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Proposer,
    Responder,
}

impl Role {
    /// Slot 0 proposes on odd rounds, slot 1 on even rounds.
    pub fn for_slot(slot: usize, round: u32) -> Self {
        if slot == proposer_slot(round) {
            Self::Proposer
        } else {
            Self::Responder
        }
    }
}

pub fn proposer_slot(round: u32) -> usize {
    if round % 2 == 1 {
        0
    } else {
        1
    }
}

pub fn responder_slot(round: u32) -> usize {
    1 - proposer_slot(round)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UltimatumDecision {
    /// Points the proposer keeps; the responder gets the rest of the pool.
    Propose(Points),
    Respond { accept: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Agreement {
    pub round: u32,
    pub proposer_slot: usize,
    pub proposer_payoff: Points,
    pub responder_payoff: Points,
}

impl Agreement {
    pub fn payoff_for(&self, slot: usize) -> Points {
        if slot == self.proposer_slot {
            self.proposer_payoff
        } else {
            self.responder_payoff
        }
    }
}

/// Negotiation status carried from round to round within a group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Negotiation {
    #[default]
    Negotiating,
    /// Responder accepted; final payoffs are fixed and the group is finished.
    Agreed(Agreement),
    /// Last round passed without agreement.
    Expired { round: u32 },
}

impl Negotiation {
    pub fn is_agreed(&self) -> bool {
        matches!(self, Self::Agreed(_))
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Negotiating)
    }

    pub fn agreement(&self) -> Option<&Agreement> {
        match self {
            Self::Agreed(agreement) => Some(agreement),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UltimatumPlayerRound {
    pub role: Role,
    /// Set only in the round that finished the negotiation.
    pub final_payoff: Option<Points>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UltimatumGroupRound {
    pub pool: Points,
    pub proposal: Option<Points>,
    pub accepted: Option<bool>,
    pub agreed: bool,
    pub finished: bool,
    /// The group had already finished, so nothing was negotiated this round.
    pub skipped: bool,
}
