use crate::games::{Contest, PublicGoods, RdInvestment, Ultimatum};
use crate::{Barrier, Game, Session, Seed};
use econlab_types::games::contest::ContestConfig;
use econlab_types::games::public_goods::PublicGoodsConfig;
use econlab_types::games::rd::RdConfig;
use econlab_types::games::ultimatum::UltimatumConfig;
use econlab_types::ParticipantId;

/// Creates a test seed
pub fn create_seed(value: u64) -> Seed {
    Seed::from_u64(value)
}

/// Creates a session with `groups` full groups of `G`
pub fn create_session<G: Game>(config: G::Config, groups: usize, seed: u64) -> Session<G> {
    let participants = groups * G::players_per_group(&config);
    Session::new(config, participants, create_seed(seed)).expect("failed to create session")
}

pub fn public_goods_session(groups: usize) -> Session<PublicGoods> {
    create_session(PublicGoodsConfig::default(), groups, 0)
}

pub fn ultimatum_session(pairs: usize) -> Session<Ultimatum> {
    create_session(UltimatumConfig::default(), pairs, 0)
}

pub fn rd_session(config: RdConfig, groups: usize, seed: u64) -> Session<RdInvestment> {
    create_session(config, groups, seed)
}

pub fn contest_session(pairs: usize, seed: u64) -> Session<Contest> {
    create_session(ContestConfig::default(), pairs, seed)
}

/// Submits `decide(participant)` for every participant of the session and
/// returns the barrier each submission reported.
pub fn submit_all<G: Game>(
    session: &mut Session<G>,
    mut decide: impl FnMut(ParticipantId) -> G::Submission,
) -> Vec<Barrier> {
    let participants: Vec<ParticipantId> = session
        .groups()
        .iter()
        .flat_map(|group| group.members().to_vec())
        .collect();
    participants
        .into_iter()
        .map(|participant| {
            session
                .submit(participant, decide(participant))
                .expect("submission rejected")
        })
        .collect()
}
