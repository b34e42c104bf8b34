//! A running session: config, session-shared data and its groups.

use crate::game::Game;
use crate::group::{Barrier, Group, ResolveStatus};
use crate::rng::{GameRng, Seed};
use econlab_types::{ConfigError, GameError, GroupId, ParticipantId};
use tracing::info;

#[derive(Clone, Debug)]
pub struct Session<G: Game> {
    config: G::Config,
    shared: G::Shared,
    seed: Seed,
    groups: Vec<Group<G>>,
}

impl<G: Game> Session<G> {
    /// Creates a session for `participants` players, grouped in order: group
    /// `k` holds participants `k * N .. (k + 1) * N`.
    pub fn new(config: G::Config, participants: usize, seed: Seed) -> Result<Self, GameError> {
        G::validate_config(&config)?;
        let group_size = G::players_per_group(&config);
        if participants == 0 || participants % group_size != 0 {
            return Err(ConfigError::UnevenGroups {
                participants,
                group_size,
            }
            .into());
        }

        let mut rng = GameRng::for_session(&seed, G::NAME);
        let shared = G::create_shared(&config, participants, &mut rng);
        let groups = (0..participants / group_size)
            .map(|index| {
                let members = (index * group_size..(index + 1) * group_size)
                    .map(|participant| ParticipantId(participant as u32))
                    .collect();
                Group::new(&config, GroupId(index as u32), members)
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            game = G::NAME,
            participants,
            groups = groups.len(),
            rounds = G::num_rounds(&config),
            "created session"
        );
        Ok(Self {
            config,
            shared,
            seed,
            groups,
        })
    }

    pub fn config(&self) -> &G::Config {
        &self.config
    }

    pub fn shared(&self) -> &G::Shared {
        &self.shared
    }

    pub fn groups(&self) -> &[Group<G>] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Result<&Group<G>, GameError> {
        self.groups.get(id.index()).ok_or(GameError::UnknownGroup(id))
    }

    /// Group and slot of a participant.
    pub fn locate(&self, participant: ParticipantId) -> Result<(GroupId, usize), GameError> {
        let group_size = G::players_per_group(&self.config);
        let group = GroupId((participant.index() / group_size) as u32);
        let slot = self
            .groups
            .get(group.index())
            .and_then(|g| g.slot_of(participant))
            .ok_or(GameError::UnknownParticipant(participant))?;
        Ok((group, slot))
    }

    pub fn submit(
        &mut self,
        participant: ParticipantId,
        submission: G::Submission,
    ) -> Result<Barrier, GameError> {
        let (group, slot) = self.locate(participant)?;
        self.groups[group.index()].submit(&self.config, &self.shared, slot, submission)
    }

    pub fn resolve(&mut self, group: GroupId, round: u32) -> Result<ResolveStatus, GameError> {
        let target = self
            .groups
            .get_mut(group.index())
            .ok_or(GameError::UnknownGroup(group))?;
        target.resolve_round(&self.config, &self.shared, &self.seed, round)
    }

    /// Resolves the current round of every group whose barrier is met.
    ///
    /// Groups are independent, so with the `parallel` feature they are
    /// resolved concurrently; the outcome is the same either way.
    pub fn resolve_ready(&mut self) -> Result<Vec<GroupId>, GameError> {
        let config = &self.config;
        let shared = &self.shared;
        let seed = &self.seed;
        let resolve = |group: &mut Group<G>| -> Result<Option<GroupId>, GameError> {
            if group.is_complete(config) || group.barrier(config) != Barrier::Ready {
                return Ok(None);
            }
            group.resolve_current(config, shared, seed)?;
            Ok(Some(group.id()))
        };

        #[cfg(feature = "parallel")]
        let resolved: Result<Vec<_>, _> = {
            use rayon::prelude::*;
            self.groups.par_iter_mut().map(resolve).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let resolved: Result<Vec<_>, _> = self.groups.iter_mut().map(resolve).collect();

        Ok(resolved?.into_iter().flatten().collect())
    }

    pub fn is_complete(&self) -> bool {
        self.groups.iter().all(|group| group.is_complete(&self.config))
    }
}
