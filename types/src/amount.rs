//! Coin amount type for the breakfast coin.
//!
//! Amounts are fixed-point integers (u128) to avoid floating-point errors.
//! The smallest unit is 1 raw; one whole coin is `COIN_UNIT` raw units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Raw units per whole breakfast coin (18 decimal places).
///
/// The reward math depends on this scaling factor being exact: the daily
/// reward is `10 * COIN_UNIT` raw units and must never be rounded.
pub const COIN_UNIT: u128 = 1_000_000_000_000_000_000;

/// A breakfast coin amount, stored as raw units (u128).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CoinAmount(u128);

impl CoinAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// An amount of `n` whole coins.
    pub fn whole(n: u128) -> Self {
        Self(n * COIN_UNIT)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Scale by an integer count (whole reward periods).
    pub fn checked_mul(self, count: u64) -> Option<Self> {
        self.0.checked_mul(count as u128).map(Self)
    }
}

impl Add for CoinAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for CoinAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for CoinAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} raw", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_coins_scale_exactly() {
        assert_eq!(CoinAmount::whole(10).raw(), 10 * COIN_UNIT);
        assert_eq!(CoinAmount::whole(0), CoinAmount::ZERO);
    }

    #[test]
    fn checked_mul_by_period_count() {
        let unit = CoinAmount::whole(10);
        assert_eq!(unit.checked_mul(2), Some(CoinAmount::whole(20)));
        assert_eq!(CoinAmount::new(u128::MAX).checked_mul(2), None);
    }

    #[test]
    fn checked_sub_underflow_is_none() {
        assert_eq!(CoinAmount::ZERO.checked_sub(CoinAmount::new(1)), None);
    }
}
