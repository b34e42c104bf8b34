//! Common types used throughout econlab.
//!
//! Holds the data side of the experiment games: identifiers, per-game
//! configuration, the decisions players submit, the records a resolved round
//! produces and the append-only [`History`] that later rounds read from. The
//! payoff rules themselves live in `econlab-execution`.

mod constants;
mod error;
mod history;
mod ids;

pub mod games;

pub use constants::*;
pub use error::{ConfigError, GameError};
pub use history::History;
pub use ids::{GroupId, ParticipantId};

/// Whole experiment points. Payoffs may be negative.
pub type Points = i64;

/// Divides `numerator` by `denominator`, rounding halves away from zero.
///
/// Amounts are whole points, so fractional shares and discounted pools are
/// rounded the same way a 0-decimal currency would round them.
pub fn div_round_half_up(numerator: i64, denominator: i64) -> i64 {
    assert!(denominator > 0, "denominator must be positive");
    // Widened so doubling cannot overflow; the quotient never exceeds |numerator|.
    let doubled = i128::from(numerator) * 2;
    let denominator = i128::from(denominator);
    let rounded = if doubled >= 0 {
        (doubled + denominator) / (denominator * 2)
    } else {
        -((-doubled + denominator) / (denominator * 2))
    };
    rounded as i64
}

/// Rounds a non-integral amount of points half away from zero.
pub fn round_points(value: f64) -> Points {
    value.round() as Points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_round_half_up() {
        assert_eq!(div_round_half_up(6000, 4), 1500);
        assert_eq!(div_round_half_up(2002, 4), 501); // 500.5
        assert_eq!(div_round_half_up(2001, 4), 500); // 500.25
        assert_eq!(div_round_half_up(2003, 4), 501); // 500.75
        assert_eq!(div_round_half_up(0, 4), 0);
        assert_eq!(div_round_half_up(-2002, 4), -501);
    }

    #[test]
    fn test_div_round_half_up_extremes() {
        assert_eq!(div_round_half_up(i64::MAX, 1), i64::MAX);
        assert_eq!(div_round_half_up(i64::MAX, 2), i64::MAX / 2 + 1);
        assert_eq!(div_round_half_up(i64::MIN, 1), i64::MIN);
    }

    #[test]
    fn test_round_points() {
        assert_eq!(round_points(640.000_000_000_1), 640);
        assert_eq!(round_points(409.6), 410);
        assert_eq!(round_points(327.68), 328);
        assert_eq!(round_points(0.5), 1);
    }

    proptest::proptest! {
        #[test]
        fn prop_div_round_half_up_is_nearest(numerator in -1_000_000i64..1_000_000, denominator in 1i64..64) {
            let rounded = div_round_half_up(numerator, denominator);
            // |rounded - numerator / denominator| <= 1/2
            let error = (rounded * denominator - numerator).abs() * 2;
            proptest::prop_assert!(error <= denominator);
        }
    }
}
