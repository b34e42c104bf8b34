//! Random players, one strategy per game.

use econlab_execution::games::{Contest, PublicGoods, RdInvestment, Ultimatum};
use econlab_execution::{Game, Group};
use econlab_types::games::contest::Effort;
use econlab_types::games::public_goods::Contribution;
use econlab_types::games::rd::Investment;
use econlab_types::games::ultimatum::{proposer_slot, responder_slot, UltimatumDecision};
use econlab_types::{History, Points};
use rand::Rng;

/// A game a bot knows how to play.
pub trait Autoplay: Game {
    /// Order in which slots submit. Most games do not care.
    fn turn_order(_config: &Self::Config, _round: u32, size: usize) -> Vec<usize> {
        (0..size).collect()
    }

    /// Picks a valid decision for `slot` in the group's current round.
    fn decide<R: Rng>(
        config: &Self::Config,
        shared: &Self::Shared,
        group: &Group<Self>,
        slot: usize,
        rng: &mut R,
    ) -> Self::Submission;

    /// Points a player takes home from the session.
    fn earnings(history: &History<Self::PlayerRound>) -> Points;
}

impl Autoplay for PublicGoods {
    fn decide<R: Rng>(
        config: &Self::Config,
        _shared: &(),
        _group: &Group<Self>,
        _slot: usize,
        rng: &mut R,
    ) -> Contribution {
        Contribution(rng.gen_range(0..=config.endowment))
    }

    fn earnings(history: &History<Self::PlayerRound>) -> Points {
        history.iter().map(|record| record.payoff).sum()
    }
}

impl Autoplay for Ultimatum {
    fn turn_order(_config: &Self::Config, round: u32, _size: usize) -> Vec<usize> {
        vec![proposer_slot(round), responder_slot(round)]
    }

    fn decide<R: Rng>(
        config: &Self::Config,
        _shared: &(),
        group: &Group<Self>,
        slot: usize,
        rng: &mut R,
    ) -> UltimatumDecision {
        let round = group.current_round();
        let pool = config.pool(round);
        if slot == proposer_slot(round) {
            return UltimatumDecision::Propose(rng.gen_range(0..=pool));
        }
        // Accept anything that leaves at least a random share of half the pool.
        let accept = match group.pending(proposer_slot(round)) {
            Some(UltimatumDecision::Propose(proposal)) => {
                pool - proposal >= rng.gen_range(0..=pool / 2)
            }
            _ => false,
        };
        UltimatumDecision::Respond { accept }
    }

    fn earnings(history: &History<Self::PlayerRound>) -> Points {
        history
            .iter()
            .find_map(|record| record.final_payoff)
            .unwrap_or(0)
    }
}

impl Autoplay for RdInvestment {
    fn decide<R: Rng>(
        config: &Self::Config,
        _shared: &(),
        _group: &Group<Self>,
        _slot: usize,
        rng: &mut R,
    ) -> Investment {
        Investment(rng.gen_range(0..=config.cards_per_player))
    }

    fn earnings(history: &History<Self::PlayerRound>) -> Points {
        history.last().map_or(0, |record| record.cumulative_payoff)
    }
}

impl Autoplay for Contest {
    fn decide<R: Rng>(
        config: &Self::Config,
        shared: &Self::Shared,
        group: &Group<Self>,
        slot: usize,
        rng: &mut R,
    ) -> Effort {
        let cost = group
            .members()
            .get(slot)
            .and_then(|participant| shared.get(*participant));
        let max = match (config.stage(group.current_round()), cost) {
            (Some(stage), Some(cost)) => stage.effort_max(cost),
            _ => 0,
        };
        Effort(rng.gen_range(0..=max))
    }

    fn earnings(history: &History<Self::PlayerRound>) -> Points {
        history.last().map_or(0, |record| record.total_payoff)
    }
}
