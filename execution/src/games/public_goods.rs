//! Linear public-goods game.
//!
//! Every player starts from the endowment and chooses how much of it to put
//! into a common pot. The pot is multiplied and split evenly:
//! ```text
//! share  = total * multiplier / players   (half-up)
//! payoff = endowment - contribution + share
//! ```

use crate::game::{ensure_range, Game, Resolution, RoundInput};
use crate::rng::GameRng;
use econlab_types::games::public_goods::{
    Contribution, PublicGoodsConfig, PublicGoodsGroupRound, PublicGoodsPlayerRound,
};
use econlab_types::{div_round_half_up, ConfigError, GameError, Points};

#[derive(Clone, Copy, Debug)]
pub struct PublicGoods;

pub fn settle(
    config: &PublicGoodsConfig,
    contributions: &[Points],
) -> (PublicGoodsGroupRound, Vec<PublicGoodsPlayerRound>) {
    let total_contribution: Points = contributions.iter().sum();
    let individual_share = div_round_half_up(
        total_contribution * config.multiplier,
        config.players_per_group as i64,
    );
    let players = contributions
        .iter()
        .map(|&contribution| PublicGoodsPlayerRound {
            contribution,
            payoff: config.endowment - contribution + individual_share,
        })
        .collect();
    (
        PublicGoodsGroupRound {
            total_contribution,
            individual_share,
        },
        players,
    )
}

impl Game for PublicGoods {
    const NAME: &'static str = "public_goods";

    type Config = PublicGoodsConfig;
    type Shared = ();
    type Submission = Contribution;
    type PlayerRound = PublicGoodsPlayerRound;
    type GroupRound = PublicGoodsGroupRound;
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
        submission: &Contribution,
    ) -> Result<(), GameError> {
        ensure_range("contribution", submission.0, 0, input.config.endowment)
    }

    fn resolve(
        input: &RoundInput<'_, Self>,
        _rng: &mut GameRng,
    ) -> Result<Resolution<Self>, GameError> {
        let contributions: Vec<Points> = input
            .all_submissions()?
            .into_iter()
            .map(|contribution| contribution.0)
            .collect();
        let (group, players) = settle(input.config, &contributions);
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
    use econlab_types::{PUBLIC_GOODS_ENDOWMENT, PUBLIC_GOODS_MULTIPLIER};
    use proptest::prelude::*;

    #[test]
    fn test_three_full_contributors() {
        let config = PublicGoodsConfig::default();
        let (group, players) = settle(&config, &[0, 1000, 1000, 1000]);
        assert_eq!(group.total_contribution, 3000);
        assert_eq!(group.individual_share, 1500);
        let payoffs: Vec<_> = players.iter().map(|p| p.payoff).collect();
        assert_eq!(payoffs, vec![2500, 1500, 1500, 1500]);
    }

    #[test]
    fn test_nobody_contributes() {
        let config = PublicGoodsConfig::default();
        let (group, players) = settle(&config, &[0, 0, 0, 0]);
        assert_eq!(group.individual_share, 0);
        assert!(players.iter().all(|p| p.payoff == PUBLIC_GOODS_ENDOWMENT));
    }

    #[test]
    fn test_fractional_share_rounds_half_up() {
        let config = PublicGoodsConfig::default();
        // 1001 * 2 / 4 = 500.5
        let (group, players) = settle(&config, &[1, 1000, 0, 0]);
        assert_eq!(group.individual_share, 501);
        assert_eq!(players[0].payoff, 1000 - 1 + 501);
    }

    proptest! {
        #[test]
        fn prop_payoffs_sum_to_kept_plus_shares(
            contributions in prop::collection::vec(0..=PUBLIC_GOODS_ENDOWMENT, 4)
        ) {
            let config = PublicGoodsConfig::default();
            let (group, players) = settle(&config, &contributions);
            let total: Points = contributions.iter().sum();
            let sum: Points = players.iter().map(|p| p.payoff).sum();
            prop_assert_eq!(group.total_contribution, total);
            prop_assert_eq!(sum, PUBLIC_GOODS_ENDOWMENT * 4 - total + 4 * group.individual_share);
            // Whenever the share is whole the pot is conserved exactly.
            if (total * PUBLIC_GOODS_MULTIPLIER) % 4 == 0 {
                prop_assert_eq!(sum, PUBLIC_GOODS_ENDOWMENT * 4 - total + PUBLIC_GOODS_MULTIPLIER * total);
            }
        }
    }
}
