//! Repeated ultimatum bargaining over a shrinking pool.
//!
//! Players alternate as proposer (slot 0 on odd rounds). The proposer names
//! the points it keeps; the responder accepts or rejects. Acceptance fixes
//! both payoffs and finishes the group; otherwise the pool is discounted and
//! roles swap. When the last round passes without agreement the group expires
//! with both final payoffs set to zero.
//!
//! Once finished a group awaits nobody, and each remaining round resolves as
//! a recorded no-op.

use crate::game::{ensure_range, Game, Resolution, RoundInput};
use crate::rng::GameRng;
use econlab_types::games::ultimatum::{
    proposer_slot, responder_slot, Agreement, Negotiation, Role, UltimatumConfig,
    UltimatumDecision, UltimatumGroupRound, UltimatumPlayerRound,
};
use econlab_types::{ConfigError, GameError, Points, ULTIMATUM_PLAYERS};
use tracing::info;

#[derive(Clone, Copy, Debug)]
pub struct Ultimatum;

/// Negotiation state after `round`'s proposal and response.
pub fn negotiate(
    config: &UltimatumConfig,
    state: &Negotiation,
    round: u32,
    proposal: Points,
    accepted: bool,
) -> Negotiation {
    if state.is_finished() {
        return *state;
    }
    if accepted {
        return Negotiation::Agreed(Agreement {
            round,
            proposer_slot: proposer_slot(round),
            proposer_payoff: proposal,
            responder_payoff: config.pool(round) - proposal,
        });
    }
    if round >= config.num_rounds {
        return Negotiation::Expired { round };
    }
    Negotiation::Negotiating
}

/// Final payoff of `slot` fixed in `round`, if the negotiation ended there.
fn final_payoff(state: &Negotiation, round: u32, slot: usize) -> Option<Points> {
    match state {
        Negotiation::Agreed(agreement) if agreement.round == round => {
            Some(agreement.payoff_for(slot))
        }
        Negotiation::Expired { round: expired } if *expired == round => Some(0),
        _ => None,
    }
}

fn proposal_of(input: &RoundInput<'_, Ultimatum>) -> Result<Points, GameError> {
    let slot = proposer_slot(input.round);
    match input.submission(slot)? {
        UltimatumDecision::Propose(proposal) => Ok(*proposal),
        UltimatumDecision::Respond { .. } => Err(GameError::WrongDecision {
            slot,
            round: input.round,
        }),
    }
}

fn response_of(input: &RoundInput<'_, Ultimatum>) -> Result<bool, GameError> {
    let slot = responder_slot(input.round);
    match input.submission(slot)? {
        UltimatumDecision::Respond { accept } => Ok(*accept),
        UltimatumDecision::Propose(_) => Err(GameError::WrongDecision {
            slot,
            round: input.round,
        }),
    }
}

impl Game for Ultimatum {
    const NAME: &'static str = "ultimatum";

    type Config = UltimatumConfig;
    type Shared = ();
    type Submission = UltimatumDecision;
    type PlayerRound = UltimatumPlayerRound;
    type GroupRound = UltimatumGroupRound;
    type State = Negotiation;

    fn validate_config(config: &Self::Config) -> Result<(), ConfigError> {
        config.validate()
    }

    fn players_per_group(_config: &Self::Config) -> usize {
        ULTIMATUM_PLAYERS
    }

    fn num_rounds(config: &Self::Config) -> u32 {
        config.num_rounds
    }

    fn create_shared(_config: &Self::Config, _participants: usize, _rng: &mut GameRng) {}

    fn awaits(_config: &Self::Config, state: &Negotiation, _round: u32, _slot: usize) -> bool {
        !state.is_finished()
    }

    fn validate(
        input: &RoundInput<'_, Self>,
        slot: usize,
        submission: &UltimatumDecision,
    ) -> Result<(), GameError> {
        match (Role::for_slot(slot, input.round), submission) {
            (Role::Proposer, UltimatumDecision::Propose(proposal)) => ensure_range(
                "proposal",
                *proposal,
                0,
                input.config.pool(input.round),
            ),
            (Role::Responder, UltimatumDecision::Respond { .. }) => {
                match input.submissions.get(proposer_slot(input.round)) {
                    Some(Some(_)) => Ok(()),
                    _ => Err(GameError::ProposalPending { round: input.round }),
                }
            }
            _ => Err(GameError::WrongDecision {
                slot,
                round: input.round,
            }),
        }
    }

    fn resolve(
        input: &RoundInput<'_, Self>,
        _rng: &mut GameRng,
    ) -> Result<Resolution<Self>, GameError> {
        let round = input.round;
        let pool = input.config.pool(round);
        let roles = (0..ULTIMATUM_PLAYERS).map(|slot| Role::for_slot(slot, round));

        if input.state.is_finished() {
            return Ok(Resolution {
                players: roles
                    .map(|role| UltimatumPlayerRound {
                        role,
                        final_payoff: None,
                    })
                    .collect(),
                group: UltimatumGroupRound {
                    pool,
                    proposal: None,
                    accepted: None,
                    agreed: input.state.is_agreed(),
                    finished: true,
                    skipped: true,
                },
                state: *input.state,
            });
        }

        let proposal = proposal_of(input)?;
        let accepted = response_of(input)?;
        let state = negotiate(input.config, input.state, round, proposal, accepted);
        match &state {
            Negotiation::Agreed(agreement) => info!(
                group = %input.group,
                round,
                pool,
                proposer_payoff = agreement.proposer_payoff,
                responder_payoff = agreement.responder_payoff,
                "agreement reached"
            ),
            Negotiation::Expired { .. } => {
                info!(group = %input.group, round, "negotiation expired without agreement")
            }
            Negotiation::Negotiating => {}
        }

        Ok(Resolution {
            players: roles
                .enumerate()
                .map(|(slot, role)| UltimatumPlayerRound {
                    role,
                    final_payoff: final_payoff(&state, round, slot),
                })
                .collect(),
            group: UltimatumGroupRound {
                pool,
                proposal: Some(proposal),
                accepted: Some(accepted),
                agreed: state.is_agreed(),
                finished: state.is_finished(),
                skipped: false,
            },
            state,
        })
    }
}
