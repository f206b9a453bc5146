//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Floating-point percentage.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Percent(Decimal);

impl Percent {
    /// A [`Percent`] of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Percent`] by checking the provided values is
    /// greater than `0` and less than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val > Decimal::ONE_HUNDRED {
            None
        } else {
            #[expect(
                clippy::allow_attributes,
                reason = "TODO: Remove once clippy is fixed"
            )]
            #[allow(unsafe_code, reason = "invariants checked already")]
            Some(unsafe { Self::new_unchecked(val) })
        }
    }

    /// Creates a new [`Percent`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must be greater than `0` and less than `100`.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(val: Decimal) -> Self {
        Self(val)
    }

    /// Creates a new [`Percent`] expressing which share of the `whole` the
    /// `part` makes up, clamped into the `0..=100` range.
    ///
    /// A non-positive `whole` yields [`Percent::ZERO`].
    #[must_use]
    pub fn ratio(part: Decimal, whole: Decimal) -> Self {
        if whole <= Decimal::ZERO {
            return Self::ZERO;
        }
        let val = (part / whole * Decimal::ONE_HUNDRED)
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        #[expect(
            clippy::allow_attributes,
            reason = "TODO: Remove once clippy is fixed"
        )]
        #[allow(unsafe_code, reason = "invariants checked already")]
        unsafe {
            Self::new_unchecked(val)
        }
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn ratio_of_a_whole() {
        assert_eq!(
            Percent::ratio(Decimal::from(30), Decimal::from(40)),
            Percent::new(Decimal::from(75)).unwrap(),
        );
        assert_eq!(
            Percent::ratio(Decimal::from(0), Decimal::from(40)),
            Percent::ZERO,
        );
    }

    #[test]
    fn ratio_of_nothing_is_zero() {
        assert_eq!(
            Percent::ratio(Decimal::from(5), Decimal::ZERO),
            Percent::ZERO,
        );
    }

    #[test]
    fn ratio_is_clamped() {
        assert_eq!(
            Percent::ratio(Decimal::from(50), Decimal::from(40)),
            Percent::new(Decimal::ONE_HUNDRED).unwrap(),
        );
    }
}
