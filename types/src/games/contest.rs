use crate::{
    ConfigError, ParticipantId, Points, CONTEST_COST_MAX, CONTEST_COST_MIN,
    CONTEST_STAGE_ONE_POOL, CONTEST_STAGE_TWO_POOL, MAX_ROUNDS,
};
use serde::{Deserialize, Serialize};

/// Reward split applied when the winner's `effort * cost` is below `below`
/// (or unconditionally when `below` is `None`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTier {
    #[serde(default)]
    pub below: Option<Points>,
    pub winner: Points,
    pub loser: Points,
}

/// Reward table of one contest round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestStage {
    pub pool: Points,
    pub tiers: Vec<RewardTier>,
}

impl ContestStage {
    /// `(winner_reward, loser_reward)` for a winner whose `effort * cost` is
    /// `effort_value`. Tiers are checked in order.
    pub fn split(&self, effort_value: Points) -> (Points, Points) {
        self.tiers
            .iter()
            .find(|tier| tier.below.map_or(true, |below| effort_value < below))
            .map(|tier| (tier.winner, tier.loser))
            .unwrap_or((self.pool, 0))
    }

    /// Reward of each player on a tie.
    pub fn tie_reward(&self) -> Points {
        self.pool / 2
    }

    /// Largest effort worth bidding: spending more than the pool can never pay.
    pub fn effort_max(&self, cost: u32) -> u32 {
        if cost == 0 {
            return u32::MAX;
        }
        u32::try_from(self.pool.max(0) / Points::from(cost)).unwrap_or(u32::MAX)
    }

    fn validate(&self, stage: u32) -> Result<(), ConfigError> {
        if self.pool <= 0 {
            return Err(ConfigError::Zero { field: "pool" });
        }
        if self.pool % 2 != 0 {
            return Err(ConfigError::OddPool {
                stage,
                pool: self.pool,
            });
        }
        if self.tiers.is_empty() {
            return Err(ConfigError::NoTiers { stage });
        }
        let mut previous: Option<Points> = None;
        for (index, tier) in self.tiers.iter().enumerate() {
            if tier.winner < 0 || tier.loser < 0 || tier.winner + tier.loser != self.pool {
                return Err(ConfigError::TierSplit {
                    stage,
                    tier: index,
                    pool: self.pool,
                    winner: tier.winner,
                    loser: tier.loser,
                });
            }
            let is_last = index + 1 == self.tiers.len();
            match (tier.below, is_last) {
                (None, true) => {}
                (None, false) => return Err(ConfigError::TierOrder { stage }),
                (Some(_), true) => return Err(ConfigError::MissingCatchAll { stage }),
                (Some(below), false) => {
                    if previous.is_some_and(|previous| below <= previous) {
                        return Err(ConfigError::TierOrder { stage });
                    }
                    previous = Some(below);
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContestConfig {
    /// One stage per round.
    pub stages: Vec<ContestStage>,
    pub cost_min: u32,
    pub cost_max: u32,
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            stages: vec![
                ContestStage {
                    pool: CONTEST_STAGE_ONE_POOL,
                    tiers: vec![
                        RewardTier {
                            below: Some(300),
                            winner: 350,
                            loser: 150,
                        },
                        RewardTier {
                            below: Some(400),
                            winner: 450,
                            loser: 50,
                        },
                        RewardTier {
                            below: None,
                            winner: 500,
                            loser: 0,
                        },
                    ],
                },
                ContestStage {
                    pool: CONTEST_STAGE_TWO_POOL,
                    tiers: vec![
                        RewardTier {
                            below: Some(1_300),
                            winner: 1_100,
                            loser: 400,
                        },
                        RewardTier {
                            below: Some(1_400),
                            winner: 1_400,
                            loser: 100,
                        },
                        RewardTier {
                            below: None,
                            winner: 1_500,
                            loser: 0,
                        },
                    ],
                },
            ],
            cost_min: CONTEST_COST_MIN,
            cost_max: CONTEST_COST_MAX,
        }
    }
}

impl ContestConfig {
    pub fn num_rounds(&self) -> u32 {
        self.stages.len() as u32
    }

    pub fn stage(&self, round: u32) -> Option<&ContestStage> {
        self.stages.get(round.checked_sub(1)? as usize)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stages.is_empty() {
            return Err(ConfigError::Zero {
                field: "num_rounds",
            });
        }
        if self.num_rounds() > MAX_ROUNDS {
            return Err(ConfigError::Rounds {
                got: self.num_rounds(),
                max: MAX_ROUNDS,
            });
        }
        if self.cost_min == 0 {
            return Err(ConfigError::Zero { field: "cost_min" });
        }
        if self.cost_min > self.cost_max {
            return Err(ConfigError::CostRange {
                min: self.cost_min,
                max: self.cost_max,
            });
        }
        for (index, stage) in self.stages.iter().enumerate() {
            stage.validate(index as u32 + 1)?;
        }
        Ok(())
    }
}

/// Per-participant effort cost, drawn once when the session is created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CostTable {
    costs: Vec<u32>,
}

impl CostTable {
    pub fn new(costs: Vec<u32>) -> Self {
        Self { costs }
    }

    pub fn get(&self, participant: ParticipantId) -> Option<u32> {
        self.costs.get(participant.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

/// Effort units a player bids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effort(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContestOutcome {
    Loss,
    Tie,
    Win,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContestPlayerRound {
    pub effort: u32,
    pub cost: u32,
    pub reward: Points,
    pub outcome: ContestOutcome,
    /// `reward - cost * effort`.
    pub payoff: Points,
    /// Sum of payoffs over every round played so far.
    pub total_payoff: Points,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContestGroupRound {
    pub pool: Points,
    /// Slot with the higher effort; `None` on a tie.
    pub winner: Option<usize>,
}
