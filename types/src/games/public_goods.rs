use super::validate_rounds;
use crate::{
    ConfigError, Points, MAX_GROUP_SIZE, MAX_POINTS, PUBLIC_GOODS_ENDOWMENT,
    PUBLIC_GOODS_MAX_MULTIPLIER, PUBLIC_GOODS_MULTIPLIER, PUBLIC_GOODS_PLAYERS,
    PUBLIC_GOODS_ROUNDS,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublicGoodsConfig {
    pub endowment: Points,
    pub multiplier: i64,
    pub players_per_group: usize,
    pub num_rounds: u32,
}

impl Default for PublicGoodsConfig {
    fn default() -> Self {
        Self {
            endowment: PUBLIC_GOODS_ENDOWMENT,
            multiplier: PUBLIC_GOODS_MULTIPLIER,
            players_per_group: PUBLIC_GOODS_PLAYERS,
            num_rounds: PUBLIC_GOODS_ROUNDS,
        }
    }
}

impl PublicGoodsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endowment <= 0 {
            return Err(ConfigError::Zero { field: "endowment" });
        }
        if self.multiplier <= 0 {
            return Err(ConfigError::Zero {
                field: "multiplier",
            });
        }
        if self.players_per_group == 0 {
            return Err(ConfigError::Zero {
                field: "players_per_group",
            });
        }
        for (field, got, max) in [
            ("endowment", self.endowment, MAX_POINTS),
            ("multiplier", self.multiplier, PUBLIC_GOODS_MAX_MULTIPLIER),
            (
                "players_per_group",
                self.players_per_group as i64,
                MAX_GROUP_SIZE as i64,
            ),
        ] {
            if got > max {
                return Err(ConfigError::TooLarge { field, got, max });
            }
        }
        validate_rounds(self.num_rounds)
    }
}

/// Points a player puts into the public pot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution(pub Points);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PublicGoodsPlayerRound {
    pub contribution: Points,
    pub payoff: Points,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PublicGoodsGroupRound {
    pub total_contribution: Points,
    /// What every member receives back from the multiplied pot.
    pub individual_share: Points,
}
