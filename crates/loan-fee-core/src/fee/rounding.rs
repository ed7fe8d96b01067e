use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Money;

/// Midpoint rule for the nearest-multiple step. Half away from zero.
const MIDPOINT: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Round `value` up to a whole number, then onto a multiple of `multiple_of`.
///
/// The ceiling is returned unchanged when it is already a multiple. Otherwise
/// the result is `round((ceil + multiple_of / 2) / multiple_of) * multiple_of`
/// with midpoints rounded away from zero. A `multiple_of` of zero disables the
/// second step, as does a result beyond the range of `Decimal`.
pub fn round_up(value: Money, multiple_of: u32) -> Money {
    let whole = value.ceil();
    if multiple_of == 0 {
        return whole;
    }

    let step = Decimal::from(multiple_of);
    if (whole % step).is_zero() {
        return whole;
    }

    whole
        .checked_add(step / Decimal::TWO)
        .and_then(|lifted| nearest_multiple(lifted, step))
        .unwrap_or(whole)
}

/// `value` rounded to the nearest multiple of `step`; `None` on overflow.
fn nearest_multiple(value: Money, step: Decimal) -> Option<Money> {
    (value / step)
        .round_dp_with_strategy(0, MIDPOINT)
        .checked_mul(step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exact_multiple_is_unchanged() {
        assert_eq!(round_up(dec!(110.00), 5), dec!(110));
        assert_eq!(round_up(dec!(2010), 5), dec!(2010));
    }

    #[test]
    fn test_fraction_is_lifted_to_ceiling_first() {
        // ceil(2009.88) = 2010, already a multiple of 5
        assert_eq!(round_up(dec!(2009.88), 5), dec!(2010));
        // ceil(109.01) = 110
        assert_eq!(round_up(dec!(109.01), 5), dec!(110));
    }

    #[test]
    fn test_non_multiple_goes_to_next_multiple() {
        // ceil(100.2) = 101 -> (101 + 2.5) / 5 = 20.7 -> 21 * 5
        assert_eq!(round_up(dec!(100.2), 5), dec!(105));
        assert_eq!(round_up(dec!(104), 5), dec!(105));
        assert_eq!(round_up(dec!(2011), 5), dec!(2015));
        assert_eq!(round_up(dec!(461), 10), dec!(470));
        assert_eq!(round_up(dec!(7), 2), dec!(8));
    }

    #[test]
    fn test_multiple_of_one_is_plain_ceiling() {
        assert_eq!(round_up(dec!(384.01), 1), dec!(385));
    }

    #[test]
    fn test_zero_multiple_is_plain_ceiling() {
        assert_eq!(round_up(dec!(384.01), 0), dec!(385));
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        // 7.5 / 5 = 1.5 -> 2, and -7.5 / 5 = -1.5 -> -2
        assert_eq!(nearest_multiple(dec!(7.5), dec!(5)), Some(dec!(10)));
        assert_eq!(nearest_multiple(dec!(-7.5), dec!(5)), Some(dec!(-10)));
        // 12.5 / 5 = 2.5 -> 3, not banker's 2
        assert_eq!(nearest_multiple(dec!(12.5), dec!(5)), Some(dec!(15)));
    }

    #[test]
    fn test_below_midpoint_rounds_down() {
        assert_eq!(nearest_multiple(dec!(12.4), dec!(5)), Some(dec!(10)));
    }

    #[test]
    fn test_value_near_decimal_max_keeps_ceiling() {
        // MAX - 1 is not a multiple of 5 and MAX - 1 + 2.5 does not fit
        let near_max = Decimal::MAX - Decimal::ONE;
        assert_eq!(round_up(near_max, 5), near_max);
        assert_eq!(round_up(Decimal::MAX, 5), Decimal::MAX);
    }
}
