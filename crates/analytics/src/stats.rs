//! Decimal statistics helpers shared by the analyst's calculations.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

/// Rounds to two decimal places, half away from zero.
///
/// The reported averages and deviations are conventionally-rounded currency
/// and count figures, so half-up is the right mode here, not banker's
/// rounding.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Arithmetic mean, unrounded. An empty sample yields zero.
pub fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = values.iter().copied().sum();
    sum / Decimal::from(values.len())
}

/// Sample standard deviation (Bessel-corrected, `n - 1` denominator),
/// rounded to two decimal places.
///
/// The mean is passed in rather than recomputed because several reports
/// deliberately measure deviation around an already-rounded average.
///
/// Mathematically undefined for fewer than two samples; by convention this
/// returns zero there so aggregate pipelines stay composable instead of
/// propagating errors.
pub fn sample_std_dev(values: &[Decimal], mean: Decimal) -> Decimal {
    if values.len() < 2 {
        return Decimal::ZERO;
    }
    let sum_of_squares: Decimal = values
        .iter()
        .map(|value| (*value - mean) * (*value - mean))
        .sum();
    let variance = sum_of_squares / Decimal::from(values.len() - 1);
    round2(variance.sqrt().unwrap_or(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn mean_of_empty_sample_is_zero() {
        assert_eq!(mean(&[]), Decimal::ZERO);
    }

    #[test]
    fn mean_is_unrounded() {
        let values = [dec!(1), dec!(2)];
        assert_eq!(mean(&values), dec!(1.5));

        let thirds = [dec!(1), dec!(1), dec!(0)];
        // 2/3 carries full decimal precision; rounding is the caller's call.
        assert_eq!(round2(mean(&thirds)), dec!(0.67));
    }

    #[test]
    fn std_dev_of_degenerate_samples_is_zero() {
        assert_eq!(sample_std_dev(&[], Decimal::ZERO), Decimal::ZERO);
        assert_eq!(sample_std_dev(&[dec!(7)], dec!(7)), Decimal::ZERO);
    }

    #[test]
    fn std_dev_uses_the_bessel_denominator() {
        // Counts 3, 2, 1, 0 around their mean 1.5:
        // squares sum to 5.0, / 3 = 1.666..., sqrt = 1.29099...
        let values = [dec!(3), dec!(2), dec!(1), dec!(0)];
        assert_eq!(sample_std_dev(&values, dec!(1.5)), dec!(1.29));
    }

    #[test]
    fn round2_is_half_away_from_zero() {
        assert_eq!(round2(dec!(2.885)), dec!(2.89));
        assert_eq!(round2(dec!(2.875)), dec!(2.88));
        assert_eq!(round2(dec!(-2.885)), dec!(-2.89));
    }
}
