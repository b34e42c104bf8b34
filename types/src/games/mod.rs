//! Per-game configuration, decisions and round records.

pub mod contest;
pub mod public_goods;
pub mod rd;
pub mod ultimatum;

use crate::{ConfigError, MAX_ROUNDS};
use serde::{Deserialize, Serialize};

/// The games a session can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    PublicGoods,
    Ultimatum,
    RdSpillover,
    RdWinnerTakesAll,
    Contest,
}

impl GameKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::PublicGoods => "public_goods",
            Self::Ultimatum => "ultimatum",
            Self::RdSpillover => "rd_spillover",
            Self::RdWinnerTakesAll => "rd_winner_takes_all",
            Self::Contest => "contest",
        }
    }
}

pub(crate) fn validate_rounds(num_rounds: u32) -> Result<(), ConfigError> {
    if num_rounds == 0 {
        return Err(ConfigError::Zero {
            field: "num_rounds",
        });
    }
    if num_rounds > MAX_ROUNDS {
        return Err(ConfigError::Rounds {
            got: num_rounds,
            max: MAX_ROUNDS,
        });
    }
    Ok(())
}
