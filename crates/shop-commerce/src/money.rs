//! Money type for representing monetary values.
//!
//! The backend sends prices and totals as JSON decimal numbers with no
//! currency attached. They are held here in minor units (cents, paise) so
//! sums over cart lines stay exact. The currency is a display attribute chosen
//! by configuration; freshly decoded values carry `Currency::default()` until
//! relabelled with [`Money::with_currency`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Mul};

/// Supported display currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    INR,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::INR => "\u{20b9}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use shop_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Relabel the amount with a display currency.
    ///
    /// The decimal value is kept: minor units are rescaled when the two
    /// currencies use a different number of decimal places, rounding half
    /// away from zero when places are dropped.
    ///
    /// ```
    /// use shop_commerce::money::{Money, Currency};
    /// let price = Money::new(10000, Currency::USD).with_currency(Currency::JPY);
    /// assert_eq!(price.display(), "\u{00a5}100");
    /// ```
    pub fn with_currency(self, currency: Currency) -> Self {
        let from = self.currency.decimal_places();
        let to = currency.decimal_places();
        let amount_cents = if to >= from {
            self.amount_cents.saturating_mul(10_i64.pow(to - from))
        } else {
            let divisor = 10_i64.pow(from - to);
            let quotient = self.amount_cents / divisor;
            let remainder = self.amount_cents % divisor;
            if remainder.abs() * 2 >= divisor {
                quotient + remainder.signum()
            } else {
                quotient
            }
        };
        Self::new(amount_cents, currency)
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", decimal)
    }
}

impl Add for Money {
    type Output = Money;

    /// Saturating addition; the left-hand currency wins.
    fn add(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents), self.currency)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

// On the wire money is a bare decimal number.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        if !amount.is_finite() {
            return Err(serde::de::Error::custom("money amount must be finite"));
        }
        Ok(Money::from_decimal(amount, Currency::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(100.0, Currency::JPY);
        assert_eq!(m.amount_cents, 100);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.display(), "$49.99");

        let m = Money::new(20000, Currency::INR);
        assert_eq!(m.display(), "\u{20b9}200.00");
    }

    #[test]
    fn test_money_wire_format() {
        let m: Money = serde_json::from_str("29.99").unwrap();
        assert_eq!(m.amount_cents, 2999);

        let m: Money = serde_json::from_str("100").unwrap();
        assert_eq!(m.amount_cents, 10000);

        let json = serde_json::to_string(&Money::new(2999, Currency::USD)).unwrap();
        assert_eq!(json, "29.99");
    }

    #[test]
    fn test_with_currency_keeps_amount() {
        let m = Money::new(2500, Currency::USD).with_currency(Currency::INR);
        assert_eq!(m.amount_cents, 2500);
        assert_eq!(m.currency, Currency::INR);
    }

    #[test]
    fn test_with_currency_rescales_zero_decimal_currency() {
        let m: Money = serde_json::from_str("100").unwrap();
        let yen = m.with_currency(Currency::JPY);
        assert_eq!(yen.amount_cents, 100);
        assert_eq!(yen.display(), "\u{00a5}100");
        assert_eq!(serde_json::to_string(&yen).unwrap(), "100.0");

        let m: Money = serde_json::from_str("1234.5").unwrap();
        assert_eq!(m.with_currency(Currency::JPY).amount_cents, 1235);
        assert_eq!(Money::new(-150, Currency::USD).with_currency(Currency::JPY).amount_cents, -2);

        let back = yen.with_currency(Currency::EUR);
        assert_eq!(back.amount_cents, 10000);
        assert_eq!(back.display(), "\u{20ac}100.00");
    }
}
