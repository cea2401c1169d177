//! Split of a gross amount between the user's spendable share and the
//! nature fund.

use serde::Serialize;

use crate::Money;

/// Share of a sale credited to the user when no per-wallet override is set.
pub const DEFAULT_USER_SHARE: f64 = 0.70;

/// Outcome of splitting a gross amount.
///
/// `user_credited + nature_fund` always equals the gross amount exactly: the
/// nature fund is computed as the residual of the rounded user share, never
/// rounded independently.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RevenueSplit {
    pub user_credited: Money,
    pub nature_fund: Money,
    /// Ratio actually applied, after normalization.
    pub user_share: f64,
    /// `1 - user_share`, rounded to two decimals. Kept for audit: when the
    /// gross amount is 0 this is still the ratio, not derived from amounts.
    pub nature_share: f64,
}

/// Normalizes a raw user-share ratio.
///
/// `None` or a non-finite value means "use the default"; finite values are
/// clamped to `[0, 1]`. This never fails: an unusable ratio degrades to the
/// default instead of erroring.
#[must_use]
pub fn normalize_share(ratio: Option<f64>) -> f64 {
    match ratio {
        Some(raw) if raw.is_finite() => raw.clamp(0.0, 1.0),
        _ => DEFAULT_USER_SHARE,
    }
}

/// Splits a gross amount between user share and nature fund.
///
/// Total over its numeric domain; callers are responsible for supplying a
/// non-negative gross amount.
#[must_use]
pub fn split(gross: Money, user_share: Option<f64>) -> RevenueSplit {
    let ratio = normalize_share(user_share);
    let user_credited = gross.apply_ratio(ratio);

    RevenueSplit {
        user_credited,
        nature_fund: gross - user_credited,
        user_share: ratio,
        nature_share: round2(1.0 - ratio),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ratio_is_seventy_thirty() {
        let result = split(Money::new(100_00), None);

        assert_eq!(result.user_credited, Money::new(70_00));
        assert_eq!(result.nature_fund, Money::new(30_00));
        assert_eq!(result.user_share, 0.70);
        assert_eq!(result.nature_share, 0.30);
    }

    #[test]
    fn out_of_range_ratio_clamps() {
        let high = split(Money::new(100_00), Some(1.5));
        assert_eq!(high.user_credited, Money::new(100_00));
        assert_eq!(high.nature_fund, Money::ZERO);
        assert_eq!(high.nature_share, 0.0);

        let low = split(Money::new(100_00), Some(-0.2));
        assert_eq!(low.user_credited, Money::ZERO);
        assert_eq!(low.nature_fund, Money::new(100_00));
    }

    #[test]
    fn non_finite_ratio_falls_back_to_default() {
        let result = split(Money::new(45_00), Some(f64::NAN));
        assert_eq!(result.user_credited, Money::new(31_50));
        assert_eq!(result.nature_fund, Money::new(13_50));
    }

    #[test]
    fn halves_always_sum_to_gross() {
        // Odd amounts and awkward ratios must not drift a cent.
        for minor in [0, 1, 3, 99, 101, 3335, 4_499, 1_000_001] {
            for ratio in [0.0, 0.1, 0.333, 0.5, 0.7, 0.99, 1.0] {
                let gross = Money::new(minor);
                let result = split(gross, Some(ratio));
                assert_eq!(
                    result.user_credited + result.nature_fund,
                    gross,
                    "drift at {minor} minor units, ratio {ratio}"
                );
            }
        }
    }

    #[test]
    fn zero_gross_keeps_ratio_for_audit() {
        let result = split(Money::ZERO, Some(0.25));
        assert_eq!(result.user_credited, Money::ZERO);
        assert_eq!(result.nature_fund, Money::ZERO);
        assert_eq!(result.user_share, 0.25);
        assert_eq!(result.nature_share, 0.75);
    }
}
