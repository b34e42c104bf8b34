//! Two-stage contest with private effort costs.
//!
//! Every participant gets a cost per effort unit, drawn once per session.
//! Both players of a pair bid an effort; the higher bid wins the round's
//! stage. How the pool is split depends on the winner's `effort * cost`, a
//! tie halves it. Each player pays `cost * effort` whatever the outcome.

use crate::game::{ensure_range, Game, Resolution, RoundInput};
use crate::rng::GameRng;
use econlab_types::games::contest::{
    ContestConfig, ContestGroupRound, ContestOutcome, ContestPlayerRound, ContestStage, CostTable,
    Effort,
};
use econlab_types::{
    ConfigError, GameError, History, ParticipantId, Points, CONTEST_PLAYERS,
};
use tracing::debug;

#[derive(Clone, Copy, Debug)]
pub struct Contest;

/// One player's bid together with the cost it pays per unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bid {
    pub effort: u32,
    pub cost: u32,
}

impl Bid {
    pub fn spent(&self) -> Points {
        Points::from(self.effort) * Points::from(self.cost)
    }
}

/// Settles one stage between two bids. `totals` are the players' running
/// payoffs before this round.
pub fn settle(
    stage: &ContestStage,
    bids: [Bid; CONTEST_PLAYERS],
    totals: [Points; CONTEST_PLAYERS],
) -> (ContestGroupRound, Vec<ContestPlayerRound>) {
    let [first, second] = bids;
    let winner = match first.effort.cmp(&second.effort) {
        std::cmp::Ordering::Greater => Some(0),
        std::cmp::Ordering::Less => Some(1),
        std::cmp::Ordering::Equal => None,
    };
    let rewards = match winner {
        None => [stage.tie_reward(); CONTEST_PLAYERS],
        Some(slot) => {
            let (won, lost) = stage.split(bids[slot].spent());
            let mut rewards = [lost; CONTEST_PLAYERS];
            rewards[slot] = won;
            rewards
        }
    };

    let players = (0..CONTEST_PLAYERS)
        .map(|slot| {
            let outcome = match winner {
                None => ContestOutcome::Tie,
                Some(w) if w == slot => ContestOutcome::Win,
                Some(_) => ContestOutcome::Loss,
            };
            let payoff = rewards[slot] - bids[slot].spent();
            ContestPlayerRound {
                effort: bids[slot].effort,
                cost: bids[slot].cost,
                reward: rewards[slot],
                outcome,
                payoff,
                total_payoff: totals[slot] + payoff,
            }
        })
        .collect();

    (
        ContestGroupRound {
            pool: stage.pool,
            winner,
        },
        players,
    )
}

/// Outcome a player saw in the round before `round`, for the stage-two
/// screen.
pub fn previous_outcome(
    history: &History<ContestPlayerRound>,
    round: u32,
) -> Option<&ContestPlayerRound> {
    history.previous(round)
}

fn cost_of(costs: &CostTable, participant: ParticipantId) -> Result<u32, GameError> {
    costs
        .get(participant)
        .ok_or(GameError::UnknownParticipant(participant))
}

fn stage_of<'a>(config: &'a ContestConfig, round: u32) -> Result<&'a ContestStage, GameError> {
    config.stage(round).ok_or(GameError::OutOfRange {
        field: "round",
        got: i64::from(round),
        min: 1,
        max: i64::from(config.num_rounds()),
    })
}

impl Game for Contest {
    const NAME: &'static str = "contest";

    type Config = ContestConfig;
    type Shared = CostTable;
    type Submission = Effort;
    type PlayerRound = ContestPlayerRound;
    type GroupRound = ContestGroupRound;
    type State = ();

    fn validate_config(config: &Self::Config) -> Result<(), ConfigError> {
        config.validate()
    }

    fn players_per_group(_config: &Self::Config) -> usize {
        CONTEST_PLAYERS
    }

    fn num_rounds(config: &Self::Config) -> u32 {
        config.num_rounds()
    }

    fn create_shared(config: &Self::Config, participants: usize, rng: &mut GameRng) -> CostTable {
        CostTable::new(
            (0..participants)
                .map(|_| rng.draw_between(config.cost_min, config.cost_max))
                .collect(),
        )
    }

    fn validate(
        input: &RoundInput<'_, Self>,
        slot: usize,
        submission: &Effort,
    ) -> Result<(), GameError> {
        let participant = input.members[slot];
        let cost = cost_of(input.shared, participant)?;
        let stage = stage_of(input.config, input.round)?;
        ensure_range(
            "effort",
            i64::from(submission.0),
            0,
            i64::from(stage.effort_max(cost)),
        )
    }

    fn resolve(
        input: &RoundInput<'_, Self>,
        _rng: &mut GameRng,
    ) -> Result<Resolution<Self>, GameError> {
        let stage = stage_of(input.config, input.round)?;
        let mut bids = [Bid { effort: 0, cost: 0 }; CONTEST_PLAYERS];
        let mut totals = [0; CONTEST_PLAYERS];
        for slot in 0..CONTEST_PLAYERS {
            bids[slot] = Bid {
                effort: input.submission(slot)?.0,
                cost: cost_of(input.shared, input.members[slot])?,
            };
            totals[slot] = input
                .last_record(slot)
                .map_or(0, |record| record.total_payoff);
        }

        let (group, players) = settle(stage, bids, totals);
        debug!(
            group = %input.group,
            round = input.round,
            winner = ?group.winner,
            "settled contest stage"
        );
        Ok(Resolution {
            players,
            group,
            state: (),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(round: u32) -> ContestStage {
        ContestConfig::default().stage(round).cloned().unwrap()
    }

    #[test]
    fn test_winner_in_middle_tier() {
        let bids = [Bid { effort: 60, cost: 5 }, Bid { effort: 50, cost: 3 }];
        let (group, players) = settle(&stage(1), bids, [0, 0]);
        assert_eq!(group.winner, Some(0));
        assert_eq!(players[0].reward, 450);
        assert_eq!(players[1].reward, 50);
        assert_eq!(players[0].payoff, 150);
        assert_eq!(players[1].payoff, -100);
        assert_eq!(players[0].outcome, ContestOutcome::Win);
        assert_eq!(players[1].outcome, ContestOutcome::Loss);
    }

    #[test]
    fn test_tie_splits_pool() {
        let bids = [Bid { effort: 10, cost: 5 }, Bid { effort: 10, cost: 3 }];
        let (group, players) = settle(&stage(1), bids, [0, 0]);
        assert_eq!(group.winner, None);
        assert!(players.iter().all(|p| p.outcome == ContestOutcome::Tie));
        assert_eq!(players[0].payoff, 250 - 50);
        assert_eq!(players[1].payoff, 250 - 30);

        let (_, players) = settle(&stage(2), bids, [0, 0]);
        assert_eq!(players[0].reward, 750);
    }

    #[test]
    fn test_second_slot_wins_low_tier() {
        let bids = [Bid { effort: 0, cost: 7 }, Bid { effort: 20, cost: 10 }];
        let (group, players) = settle(&stage(2), bids, [100, -40]);
        assert_eq!(group.winner, Some(1));
        assert_eq!(group.pool, 1_500);
        assert_eq!(players[1].reward, 1_100);
        assert_eq!(players[0].reward, 400);
        assert_eq!(players[1].total_payoff, -40 + 1_100 - 200);
        assert_eq!(players[0].total_payoff, 100 + 400);
    }

    #[test]
    fn test_previous_outcome() {
        let mut history = History::new();
        let (_, players) = settle(
            &stage(1),
            [Bid { effort: 1, cost: 1 }, Bid { effort: 0, cost: 1 }],
            [0, 0],
        );
        history.push(1, players[0].clone()).unwrap();
        assert!(previous_outcome(&history, 1).is_none());
        assert_eq!(
            previous_outcome(&history, 2).map(|record| record.outcome),
            Some(ContestOutcome::Win)
        );
    }

    #[test]
    fn test_costs_drawn_within_range() {
        let config = ContestConfig::default();
        let seed = crate::rng::Seed::from_u64(3);
        let mut rng = GameRng::for_session(&seed, Contest::NAME);
        let costs = Contest::create_shared(&config, 64, &mut rng);
        assert_eq!(costs.len(), 64);
        for participant in 0..64 {
            let cost = costs.get(ParticipantId(participant)).unwrap();
            assert!((1..=100).contains(&cost));
        }
    }
}
