//! Type-safe price representation using decimal arithmetic.
//!
//! The store trades in a single currency, so a price is just an amount in
//! currency units. Arithmetic is exact; rounding only happens when a price is
//! formatted for display.

use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency symbol used when formatting prices.
pub const CURRENCY_SYMBOL: &str = "$";

/// Decimal places shown for formatted amounts.
const DISPLAY_SCALE: u32 = 2;

/// A non-negative amount in currency units (dollars, not cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_whole(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// The exact underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiply by a decimal rate (e.g. a tax rate).
    #[must_use]
    pub fn scaled_by(self, rate: Decimal) -> Self {
        Self(self.0 * rate)
    }

    /// Amount rounded to cents, midpoint away from zero.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Amount as a two-decimal string without symbol (e.g. `"51.76"`).
    #[must_use]
    pub fn to_fixed(&self) -> String {
        format!("{:.2}", self.rounded())
    }

    /// Format for display with symbol and two decimals (e.g. `"$708.76"`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{CURRENCY_SYMBOL}{}", self.to_fixed())
    }

    /// Format for product cards: whole amounts drop the decimals (`"$299"`),
    /// fractional amounts keep two (`"$2.50"`).
    #[must_use]
    pub fn display_compact(&self) -> String {
        if self.0.fract().is_zero() {
            format!("{CURRENCY_SYMBOL}{}", self.0.trunc().normalize())
        } else {
            self.display()
        }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self::Output {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
