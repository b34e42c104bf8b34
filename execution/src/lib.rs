//! econlab execution layer.
//!
//! This crate contains the payoff rules of the experiment games and the round
//! driver that applies them: a [`Session`] splits participants into
//! [`Group`]s, each group collects one decision per awaited player and, once
//! its barrier is met, resolves the round through its [`Game`] exactly once.
//!
//! ## Determinism requirements
//! - Do not use wall-clock time inside a rule.
//! - Do not use non-deterministic randomness; only draw from the [`GameRng`]
//!   handed to the rule, which is derived from the session [`Seed`].
//! - Groups never read each other, so resolving them in any order (or in
//!   parallel with the `parallel` feature) yields the same records.
//!
//! ## Minimal session (example)
//! ```rust
//! use econlab_execution::games::PublicGoods;
//! use econlab_execution::{Seed, Session};
//! use econlab_types::games::public_goods::{Contribution, PublicGoodsConfig};
//! use econlab_types::{GroupId, ParticipantId};
//!
//! let mut session =
//!     Session::<PublicGoods>::new(PublicGoodsConfig::default(), 4, Seed::from_u64(1)).unwrap();
//! for (participant, amount) in [0, 1000, 1000, 1000].into_iter().enumerate() {
//!     session.submit(ParticipantId(participant as u32), Contribution(amount)).unwrap();
//! }
//! session.resolve(GroupId(0), 1).unwrap();
//! let group = session.group(GroupId(0)).unwrap();
//! assert_eq!(group.player_history(0).unwrap().last().unwrap().payoff, 2500);
//! ```

mod game;
mod group;
mod rng;
mod session;

mod idempotency_tests;

pub mod games;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use game::{Game, Resolution, RoundInput};
pub use group::{Barrier, Group, ResolveStatus};
pub use rng::{GameRng, Seed, SEED_LENGTH};
pub use session::Session;
