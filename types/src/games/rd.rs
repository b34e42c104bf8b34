use super::validate_rounds;
use crate::{
    ConfigError, Points, DIE_FACES, RD_CARDS_PER_PLAYER, RD_CARD_VALUE, RD_PLAYERS,
    RD_SPILLOVER_REWARD, RD_SPILLOVER_ROUNDS, RD_SUCCESS_REWARD, RD_WINNER_TAKES_ALL_ROUNDS,
};
use serde::{Deserialize, Serialize};

/// How a successful round's reward is shared between the winner and the rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum RdVariant {
    /// Costs are charged on everything invested so far; with `spill_over`
    /// the non-winners also collect the spillover reward.
    Spillover { spill_over: bool },
    /// Costs are charged on this round's stake only; without
    /// `winner_takes_all` the non-winners collect the spillover reward.
    WinnerTakesAll { winner_takes_all: bool },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RdConfig {
    #[serde(flatten)]
    pub variant: RdVariant,
    #[serde(default = "default_players")]
    pub players_per_group: usize,
    pub num_rounds: u32,
    #[serde(default = "default_cards_per_player")]
    pub cards_per_player: u8,
    #[serde(default = "default_card_value")]
    pub card_value: Points,
    #[serde(default = "default_success_reward")]
    pub success_reward: Points,
    #[serde(default = "default_spillover_reward")]
    pub spillover_reward: Points,
}

fn default_players() -> usize {
    RD_PLAYERS
}

fn default_cards_per_player() -> u8 {
    RD_CARDS_PER_PLAYER
}

fn default_card_value() -> Points {
    RD_CARD_VALUE
}

fn default_success_reward() -> Points {
    RD_SUCCESS_REWARD
}

fn default_spillover_reward() -> Points {
    RD_SPILLOVER_REWARD
}

impl RdConfig {
    pub fn spillover(spill_over: bool) -> Self {
        Self::with_variant(RdVariant::Spillover { spill_over }, RD_SPILLOVER_ROUNDS)
    }

    pub fn winner_takes_all(winner_takes_all: bool) -> Self {
        Self::with_variant(
            RdVariant::WinnerTakesAll { winner_takes_all },
            RD_WINNER_TAKES_ALL_ROUNDS,
        )
    }

    fn with_variant(variant: RdVariant, num_rounds: u32) -> Self {
        Self {
            variant,
            players_per_group: RD_PLAYERS,
            num_rounds,
            cards_per_player: RD_CARDS_PER_PLAYER,
            card_value: RD_CARD_VALUE,
            success_reward: RD_SUCCESS_REWARD,
            spillover_reward: RD_SPILLOVER_REWARD,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players_per_group == 0 {
            return Err(ConfigError::Zero {
                field: "players_per_group",
            });
        }
        if self.cards_per_player == 0 {
            return Err(ConfigError::Zero {
                field: "cards_per_player",
            });
        }
        for (field, value) in [
            ("card_value", self.card_value),
            ("success_reward", self.success_reward),
            ("spillover_reward", self.spillover_reward),
        ] {
            if value < 0 {
                return Err(ConfigError::Negative { field, got: value });
            }
        }
        validate_rounds(self.num_rounds)
    }

    /// Cost of staking `cards` in one round.
    pub fn cost(&self, cards: u8) -> Points {
        Points::from(cards) * self.card_value
    }
}

/// Success probability bands keyed by the group's total cards invested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessBand {
    Zero,
    OneThird,
    Half,
    TwoThirds,
}

impl SuccessBand {
    /// Bands are inclusive at both ends; totals outside every band map to
    /// [`SuccessBand::Zero`].
    pub fn from_total_cards(total: u32) -> Self {
        match total {
            0..=4 => Self::Zero,
            5..=11 => Self::OneThird,
            12..=16 => Self::Half,
            17..=20 => Self::TwoThirds,
            _ => Self::Zero,
        }
    }

    /// Die faces that count as success.
    pub fn winning_faces(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::OneThird => 2,
            Self::Half => 3,
            Self::TwoThirds => 4,
        }
    }

    pub fn probability(self) -> f64 {
        f64::from(self.winning_faces()) / f64::from(DIE_FACES)
    }

    /// Probability as a truncated percentage, e.g. 33 for one third.
    pub fn percent(self) -> u8 {
        (u32::from(self.winning_faces()) * 100 / u32::from(DIE_FACES)) as u8
    }

    /// A roll succeeds when it is at most `probability * 6`; a zero band
    /// never succeeds.
    pub fn succeeds(self, dice_roll: u8) -> bool {
        let faces = self.winning_faces();
        faces > 0 && dice_roll <= faces
    }
}

/// Cards a player stakes this round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment(pub u8);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RdPlayerRound {
    pub cards_invested: u8,
    /// Cost of every card staked up to and including this round.
    pub total_investment: Points,
    pub payoff: Points,
    pub cumulative_payoff: Points,
    pub is_winner: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RdGroupRound {
    pub total_cards: u32,
    pub band: SuccessBand,
    pub dice_roll: u8,
    pub successful: bool,
    /// Slot of the sole beneficiary, drawn only on success.
    pub winner: Option<usize>,
}
