//! R&D investment under uncertainty.
//!
//! Each round every player stakes up to five cards. The group's total picks a
//! success band; one die roll decides whether the research succeeds. On
//! success a single winner is drawn with probability proportional to the cards
//! it staked this round (uniformly if nobody staked anything).
//!
//! | variant | winner | others (flag on) | others (flag off) | failure |
//! |---------|--------|------------------|-------------------|---------|
//! | spillover | `R - I` | `S - I` | `-I` | `0` |
//! | winner-takes-all | `R - c` | `-c` | `S - cards` | `-c` |
//!
//! `R` is the success reward, `S` the spillover reward, `I` the cost of every
//! card staked so far and `c` the cost of this round's cards. Success does not
//! end the session; players keep investing until the last round.

use crate::game::{ensure_range, Game, Resolution, RoundInput};
use crate::rng::GameRng;
use econlab_types::games::rd::{
    Investment, RdConfig, RdGroupRound, RdPlayerRound, RdVariant, SuccessBand,
};
use econlab_types::{ConfigError, GameError, Points};
use tracing::debug;

#[derive(Clone, Copy, Debug)]
pub struct RdInvestment;

/// A player's position after the die roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Standing {
    Failed,
    Winner,
    Loser,
}

/// Running totals a player carries into the round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Carry {
    pub total_investment: Points,
    pub cumulative_payoff: Points,
}

impl From<&RdPlayerRound> for Carry {
    fn from(record: &RdPlayerRound) -> Self {
        Self {
            total_investment: record.total_investment,
            cumulative_payoff: record.cumulative_payoff,
        }
    }
}

/// Payoff for one round. `total_investment` already includes this round.
pub fn round_payoff(
    config: &RdConfig,
    standing: Standing,
    cards: u8,
    total_investment: Points,
) -> Points {
    let round_cost = config.cost(cards);
    match (config.variant, standing) {
        (RdVariant::Spillover { .. }, Standing::Failed) => 0,
        (RdVariant::Spillover { .. }, Standing::Winner) => {
            config.success_reward - total_investment
        }
        (RdVariant::Spillover { spill_over: true }, Standing::Loser) => {
            config.spillover_reward - total_investment
        }
        (RdVariant::Spillover { spill_over: false }, Standing::Loser) => -total_investment,
        (RdVariant::WinnerTakesAll { .. }, Standing::Failed) => -round_cost,
        (RdVariant::WinnerTakesAll { .. }, Standing::Winner) => {
            config.success_reward - round_cost
        }
        (RdVariant::WinnerTakesAll { winner_takes_all: true }, Standing::Loser) => -round_cost,
        // Charged per card, not per card value.
        (RdVariant::WinnerTakesAll { winner_takes_all: false }, Standing::Loser) => {
            config.spillover_reward - Points::from(cards)
        }
    }
}

/// Group outcome of a round before any winner is drawn.
pub fn assess(cards: &[u8], dice_roll: u8) -> RdGroupRound {
    let total_cards: u32 = cards.iter().map(|&c| u32::from(c)).sum();
    let band = SuccessBand::from_total_cards(total_cards);
    RdGroupRound {
        total_cards,
        band,
        dice_roll,
        successful: band.succeeds(dice_roll),
        winner: None,
    }
}

/// Draws the sole beneficiary, weighted by this round's cards.
pub fn draw_winner(cards: &[u8], rng: &mut GameRng) -> usize {
    let weights: Vec<u32> = cards.iter().map(|&c| u32::from(c)).collect();
    rng.pick_weighted(&weights)
}

/// Player records for a round whose group outcome (including the winner on
/// success) is already known.
pub fn settle(
    config: &RdConfig,
    cards: &[u8],
    carries: &[Carry],
    group: &RdGroupRound,
) -> Vec<RdPlayerRound> {
    cards
        .iter()
        .zip(carries)
        .enumerate()
        .map(|(slot, (&cards_invested, carry))| {
            let standing = match (group.successful, group.winner) {
                (false, _) | (true, None) => Standing::Failed,
                (true, Some(winner)) if winner == slot => Standing::Winner,
                (true, Some(_)) => Standing::Loser,
            };
            let total_investment = carry.total_investment + config.cost(cards_invested);
            let payoff = round_payoff(config, standing, cards_invested, total_investment);
            RdPlayerRound {
                cards_invested,
                total_investment,
                payoff,
                cumulative_payoff: carry.cumulative_payoff + payoff,
                is_winner: standing == Standing::Winner,
            }
        })
        .collect()
}

impl Game for RdInvestment {
    const NAME: &'static str = "rd_investment";

    type Config = RdConfig;
    type Shared = ();
    type Submission = Investment;
    type PlayerRound = RdPlayerRound;
    type GroupRound = RdGroupRound;
    type State = ();

    fn validate_config(config: &Self::Config) -> Result<(), ConfigError> {
        config.validate()
    }

    fn players_per_group(config: &Self::Config) -> usize {
        config.players_per_group
    }

    fn num_rounds(config: &Self::Config) -> u32 {
        config.num_rounds
    }

    fn create_shared(_config: &Self::Config, _participants: usize, _rng: &mut GameRng) {}

    fn validate(
        input: &RoundInput<'_, Self>,
        _slot: usize,
        submission: &Investment,
    ) -> Result<(), GameError> {
        ensure_range(
            "cards_invested",
            i64::from(submission.0),
            0,
            i64::from(input.config.cards_per_player),
        )
    }

    fn resolve(
        input: &RoundInput<'_, Self>,
        rng: &mut GameRng,
    ) -> Result<Resolution<Self>, GameError> {
        let cards: Vec<u8> = input
            .all_submissions()?
            .into_iter()
            .map(|investment| investment.0)
            .collect();
        let carries: Vec<Carry> = (0..cards.len())
            .map(|slot| input.last_record(slot).map(Carry::from).unwrap_or_default())
            .collect();

        let mut group = assess(&cards, rng.roll_die());
        if group.successful {
            group.winner = Some(draw_winner(&cards, rng));
        }
        debug!(
            group = %input.group,
            round = input.round,
            total_cards = group.total_cards,
            dice_roll = group.dice_roll,
            winner = ?group.winner,
            "rolled for research success"
        );

        Ok(Resolution {
            players: settle(input.config, &cards, &carries, &group),
            group,
            state: (),
        })
    }
}
