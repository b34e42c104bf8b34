use crate::Points;

/// Longest session any game supports.
pub const MAX_ROUNDS: u32 = 10;

/// Largest endowment or budget a config may set.
pub const MAX_POINTS: Points = 1_000_000_000;

/// Largest group any game supports.
pub const MAX_GROUP_SIZE: usize = 64;

/// Faces on the die rolled for R&D success.
pub const DIE_FACES: u8 = 6;

// Public goods

/// Points every player holds before contributing.
pub const PUBLIC_GOODS_ENDOWMENT: Points = 1_000;
/// Factor applied to the pooled contributions before they are shared out.
pub const PUBLIC_GOODS_MULTIPLIER: i64 = 2;
pub const PUBLIC_GOODS_MAX_MULTIPLIER: i64 = 100;
pub const PUBLIC_GOODS_PLAYERS: usize = 4;
pub const PUBLIC_GOODS_ROUNDS: u32 = 1;

// Ultimatum

pub const ULTIMATUM_PLAYERS: usize = 2;
pub const ULTIMATUM_ROUNDS: u32 = 10;
/// Pool on offer in the first round.
pub const ULTIMATUM_INITIAL_BUDGET: Points = 1_000;
/// Pool shrinkage applied once per elapsed round.
pub const ULTIMATUM_DISCOUNT_FACTOR: f64 = 0.8;

// R&D investment

pub const RD_PLAYERS: usize = 4;
/// Cards each player may stake per round.
pub const RD_CARDS_PER_PLAYER: u8 = 5;
/// Points one card is worth when computing investment cost.
pub const RD_CARD_VALUE: Points = 50;
pub const RD_SUCCESS_REWARD: Points = 1_500;
pub const RD_SPILLOVER_REWARD: Points = 1_300;
pub const RD_SPILLOVER_ROUNDS: u32 = 5;
pub const RD_WINNER_TAKES_ALL_ROUNDS: u32 = 10;

// Two-stage contest

pub const CONTEST_PLAYERS: usize = 2;
/// Inclusive bounds of the per-participant effort cost drawn at session creation.
pub const CONTEST_COST_MIN: u32 = 1;
pub const CONTEST_COST_MAX: u32 = 100;
pub const CONTEST_STAGE_ONE_POOL: Points = 500;
pub const CONTEST_STAGE_TWO_POOL: Points = 1_500;
