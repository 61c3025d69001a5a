//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are persisted as integer cents and exposed as [`rust_decimal::Decimal`]
//! at the API boundary, so `photo_count x price_per_photo` never drifts the
//! way float math would on a receipt.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    amount: Decimal,
    /// ISO 4217 currency code.
    currency: CurrencyCode,
}

impl Price {
    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Create a price from an amount in the smallest currency unit (cents).
    #[must_use]
    pub fn from_cents(cents: i64, currency: CurrencyCode) -> Self {
        Self {
            amount: Decimal::new(cents, 2),
            currency,
        }
    }

    /// The decimal amount in standard units.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency code.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// The amount in cents, rounded half-up to two decimal places.
    ///
    /// Returns `None` when the amount does not fit in an `i64` of cents.
    #[must_use]
    pub fn to_cents(&self) -> Option<i64> {
        let cents = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::from(100))?;
        cents.to_i64()
    }

    /// Total for `quantity` items at this unit price.
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency: self.currency,
        }
    }

    /// Format for display on receipts (e.g., "$19.99", "R$ 2.50").
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{:.2}",
            self.currency.symbol_with_spacing(),
            self.amount
        )
    }
}

/// Error parsing a currency code.
#[derive(Debug, thiserror::Error)]
#[error("unsupported currency code: {0}")]
pub struct CurrencyCodeError(String);

/// ISO 4217 currency codes supported by the kiosk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    BRL,
}

impl CurrencyCode {
    /// Currency symbol for receipt display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
            Self::BRL => "R$",
        }
    }

    /// The ISO 4217 code as a string.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::BRL => "BRL",
        }
    }

    /// Symbol plus the conventional spacing for the locale ("R$ " vs "$").
    #[must_use]
    pub const fn symbol_with_spacing(&self) -> &'static str {
        match self {
            Self::BRL => "R$ ",
            Self::USD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "BRL" => Ok(Self::BRL),
            _ => Err(CurrencyCodeError(s.to_owned())),
        }
    }
}
