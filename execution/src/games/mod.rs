//! Payoff rules of the four experiment games.
//!
//! Each module exposes a pure `settle` function over already-drawn inputs and
//! a [`Game`](crate::Game) implementation that gathers those inputs from a
//! [`RoundInput`](crate::RoundInput) and makes the random draws.

pub mod contest;
pub mod public_goods;
pub mod rd;
pub mod ultimatum;

pub use contest::Contest;
pub use public_goods::PublicGoods;
pub use rd::RdInvestment;
pub use ultimatum::Ultimatum;
