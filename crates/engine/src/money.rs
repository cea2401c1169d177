//! Monetary amounts as integer minor units.

use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Signed money amount represented as integer **minor units** (cents).
///
/// Every monetary value handled by the engine (balances, gross amounts,
/// nature-fund shares, sponsorship fees) uses this type. Keeping amounts in
/// integer cents makes "rounded to two decimals" hold by construction and
/// keeps sums exact.
///
/// The value is signed:
/// - positive = credit / increase
/// - negative = debit / decrease
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(31_50);
/// assert_eq!(amount.minor(), 3150);
/// assert_eq!(amount.to_string(), "31.50");
/// assert_eq!("45".parse::<Money>().unwrap(), Money::new(45_00));
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is strictly negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a ratio, rounding half away from zero to whole minor
    /// units.
    ///
    /// Callers pass ratios already normalized to `[0, 1]`; the residual
    /// (`self - self.apply_ratio(r)`) is how the other half of a split is
    /// obtained, so the two halves always sum back to `self` exactly.
    #[must_use]
    pub fn apply_ratio(self, ratio: f64) -> Money {
        Money((self.0 as f64 * ratio).round() as i64)
    }

    /// Value in major units as a float (`1050` -> `10.5`).
    ///
    /// Only for rate math and display; never feed the result back into
    /// stored amounts.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into minor units.
    ///
    /// Accepts `.` or `,` as decimal separator, an optional leading `+`/`-`
    /// and at most 2 fractional digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidAmount(format!("invalid amount: {s:?}"));

        let raw = s.trim();
        let (negative, digits) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };

        let (major_str, frac_str) = match digits.split_once(['.', ',']) {
            Some((major, frac)) => (major, frac),
            None => (digits, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if major_str.is_empty() || !all_digits(major_str) || !all_digits(frac_str) {
            return Err(invalid());
        }
        if frac_str.len() > 2 {
            return Err(EngineError::InvalidAmount(format!(
                "too many decimals: {raw}"
            )));
        }

        let major: i64 = major_str.parse().map_err(|_| invalid())?;
        let frac: i64 = match frac_str.len() {
            0 => 0,
            1 => frac_str.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac_str.parse::<i64>().map_err(|_| invalid())?,
        };

        let minor = major
            .checked_mul(100)
            .and_then(|v| v.checked_add(frac))
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;

        Ok(Money(if negative { -minor } else { minor }))
    }
}
