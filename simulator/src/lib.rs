//! Pilot runs of econlab sessions.
//!
//! Fills every group of a session with random bots, plays it to the last
//! round and collects the finalized records into a JSON-friendly [`Report`].

mod bots;
mod config;

pub use bots::Autoplay;
pub use config::{GameSettings, SimulationConfig};

use anyhow::{ensure, Context, Result};
use econlab_execution::games::{Contest, PublicGoods, RdInvestment, Ultimatum};
use econlab_execution::{Seed, Session};
use econlab_types::games::GameKind;
use econlab_types::{GroupId, ParticipantId, Points};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub game: GameKind,
    pub seed: u64,
    pub participants: usize,
    pub groups: Vec<GroupReport>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GroupReport {
    pub group: GroupId,
    pub members: Vec<ParticipantId>,
    /// Points each member takes home, in slot order.
    pub earnings: Vec<Points>,
    /// Carried state after the last round.
    pub state: Value,
    pub rounds: Value,
    pub players: Vec<Value>,
}

/// Runs the configured game to completion.
pub fn run(config: &SimulationConfig) -> Result<Report> {
    config.validate()?;
    let kind = config.game.kind();
    info!(game = kind.name(), groups = config.groups, seed = config.seed, "starting simulation");
    let groups = match &config.game {
        GameSettings::PublicGoods(game) => {
            simulate::<PublicGoods>(game.clone(), config.groups, config.seed)?
        }
        GameSettings::Ultimatum(game) => {
            simulate::<Ultimatum>(game.clone(), config.groups, config.seed)?
        }
        GameSettings::Rd(game) => simulate::<RdInvestment>(game.clone(), config.groups, config.seed)?,
        GameSettings::Contest(game) => simulate::<Contest>(game.clone(), config.groups, config.seed)?,
    };
    let participants = groups.iter().map(|group| group.members.len()).sum();
    info!(game = kind.name(), participants, "simulation complete");
    Ok(Report {
        game: kind,
        seed: config.seed,
        participants,
        groups,
    })
}

/// Plays `groups` groups of `G` with bots and reports every group.
pub fn simulate<G>(game: G::Config, groups: usize, seed: u64) -> Result<Vec<GroupReport>>
where
    G: Autoplay,
    G::PlayerRound: Serialize,
    G::GroupRound: Serialize,
    G::State: Serialize,
{
    let participants = groups * G::players_per_group(&game);
    let mut session = Session::<G>::new(game, participants, Seed::from_u64(seed))
        .context("failed to create session")?;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    while !session.is_complete() {
        for index in 0..session.groups().len() {
            let (round, size) = {
                let group = &session.groups()[index];
                (group.current_round(), group.members().len())
            };
            for slot in G::turn_order(session.config(), round, size) {
                let (participant, submission) = {
                    let group = &session.groups()[index];
                    if !group.awaits(session.config(), slot) {
                        continue;
                    }
                    let submission =
                        G::decide(session.config(), session.shared(), group, slot, &mut rng);
                    (group.members()[slot], submission)
                };
                debug!(%participant, round, ?submission, "bot decided");
                session
                    .submit(participant, submission)
                    .with_context(|| format!("bot {participant} submission rejected"))?;
            }
        }
        let resolved = session.resolve_ready().context("failed to resolve round")?;
        ensure!(!resolved.is_empty(), "no group could be resolved");
    }

    session
        .groups()
        .iter()
        .map(|group| -> Result<GroupReport> {
            let histories: Vec<_> = (0..group.members().len())
                .filter_map(|slot| group.player_history(slot))
                .collect();
            Ok(GroupReport {
                group: group.id(),
                members: group.members().to_vec(),
                earnings: histories.iter().map(|history| G::earnings(history)).collect(),
                state: serde_json::to_value(group.state())?,
                rounds: serde_json::to_value(group.round_history())?,
                players: histories
                    .iter()
                    .map(serde_json::to_value)
                    .collect::<Result<_, _>>()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use econlab_types::games::contest::ContestConfig;
    use econlab_types::games::public_goods::PublicGoodsConfig;
    use econlab_types::games::rd::RdConfig;
    use econlab_types::games::ultimatum::UltimatumConfig;

    fn config(game: GameSettings, groups: usize, seed: u64) -> SimulationConfig {
        SimulationConfig {
            log_level: "info".to_string(),
            seed,
            groups,
            game,
        }
    }

    #[test]
    fn same_seed_same_report() {
        let settings = config(GameSettings::Rd(RdConfig::spillover(true)), 3, 11);
        let first = serde_json::to_value(run(&settings).unwrap()).unwrap();
        let second = serde_json::to_value(run(&settings).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn public_goods_earnings_bounded() {
        let report = run(&config(
            GameSettings::PublicGoods(PublicGoodsConfig::default()),
            5,
            1,
        ))
        .unwrap();
        assert_eq!(report.game, GameKind::PublicGoods);
        assert_eq!(report.participants, 20);
        for group in &report.groups {
            assert_eq!(group.earnings.len(), 4);
            // Between keeping nothing and free riding on three full contributions.
            assert!(group.earnings.iter().all(|e| (0..=2_500).contains(e)));
        }
    }

    #[test]
    fn ultimatum_runs_every_round() {
        let report = run(&config(
            GameSettings::Ultimatum(UltimatumConfig::default()),
            4,
            2,
        ))
        .unwrap();
        for group in &report.groups {
            assert_eq!(group.rounds.as_array().unwrap().len(), 10);
            assert_eq!(group.players.len(), 2);
            let status = group.state["status"].as_str().unwrap();
            assert!(status == "agreed" || status == "expired", "status {status}");
            let total: Points = group.earnings.iter().sum();
            assert!(total <= 1_000);
        }
    }

    #[test]
    fn contest_reports_two_stages() {
        let report = run(&config(GameSettings::Contest(ContestConfig::default()), 3, 5)).unwrap();
        assert_eq!(report.participants, 6);
        for group in &report.groups {
            assert_eq!(group.rounds.as_array().unwrap().len(), 2);
            let history = group.players[0].as_array().unwrap();
            let sum: i64 = history.iter().map(|r| r["payoff"].as_i64().unwrap()).sum();
            assert_eq!(group.earnings[0], sum);
        }
    }

    #[test]
    fn rejects_zero_groups() {
        let settings = config(GameSettings::Contest(ContestConfig::default()), 0, 0);
        assert!(run(&settings).is_err());
    }
}
