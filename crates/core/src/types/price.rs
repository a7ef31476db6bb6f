//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is not a decimal number.
    #[error("invalid price amount: {0}")]
    InvalidAmount(String),
    /// The currency code is not supported.
    #[error("unsupported currency code: {0}")]
    UnsupportedCurrency(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// A whole-unit price in US dollars.
    #[must_use]
    pub fn usd(dollars: i64) -> Self {
        Self::new(Decimal::from(dollars), CurrencyCode::USD)
    }

    /// Parse a price from the decimal string and currency code the
    /// Storefront API returns (e.g., `"65.0"`, `"USD"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not a decimal number or the
    /// currency is not a three-letter code.
    pub fn parse(amount: &str, currency_code: &str) -> Result<Self, PriceError> {
        Self::parse_amount(amount, currency_code.parse()?)
    }

    /// Parse only the amount, in an already known currency.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::InvalidAmount` if the amount is not a decimal number.
    pub fn parse_amount(amount: &str, currency_code: CurrencyCode) -> Result<Self, PriceError> {
        let parsed = Decimal::from_str(amount.trim())
            .map_err(|_| PriceError::InvalidAmount(amount.to_string()))?;
        Ok(Self::new(parsed, currency_code))
    }

    /// Multiply the unit price by a quantity, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(
            self.amount.saturating_mul(Decimal::from(quantity)),
            self.currency_code,
        )
    }

    /// Add another amount, keeping this price's currency. Saturates like
    /// [`Price::times`].
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        Self::new(self.amount.saturating_add(other.amount), self.currency_code)
    }

    /// Whether the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Format for display (e.g., "$19.99", or "6500.00 JPY" when the
    /// currency has no known symbol).
    #[must_use]
    pub fn display(&self) -> String {
        let amount = self.amount.round_dp(2);
        match self.currency_code.symbol() {
            Some(symbol) => format!("{symbol}{amount:.2}"),
            None => format!("{amount:.2} {}", self.currency_code.code()),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
///
/// Codes without a named variant are kept as [`CurrencyCode::Other`] so a
/// store priced in any currency keeps its amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    /// Any other three-letter code, stored uppercase.
    Other([u8; 3]),
}

impl CurrencyCode {
    /// Display symbol, if the currency has one.
    #[must_use]
    pub const fn symbol(self) -> Option<&'static str> {
        match self {
            Self::USD | Self::CAD | Self::AUD => Some("$"),
            Self::EUR => Some("€"),
            Self::GBP => Some("£"),
            Self::Other(_) => None,
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            // Only ever built from ASCII letters.
            Self::Other(letters) => core::str::from_utf8(letters).unwrap_or("XXX"),
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        match code.as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => match <[u8; 3]>::try_from(code.as_bytes()) {
                Ok(letters) if letters.iter().all(u8::is_ascii_uppercase) => {
                    Ok(Self::Other(letters))
                }
                _ => Err(PriceError::UnsupportedCurrency(s.to_string())),
            },
        }
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = PriceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.code().to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_storefront_amount() {
        let price = Price::parse("65.0", "USD").unwrap();
        assert_eq!(price.amount, Decimal::new(65, 0));
        assert_eq!(price.currency_code, CurrencyCode::USD);
    }

    #[test]
    fn test_parse_invalid_amount() {
        assert!(matches!(
            Price::parse("sixty", "USD"),
            Err(PriceError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_parse_other_currency() {
        let yen = Price::parse("6500.0", "jpy").unwrap();
        assert_eq!(yen.amount, Decimal::new(6500, 0));
        assert_eq!(yen.currency_code.code(), "JPY");
        assert_eq!(yen.to_string(), "6500.00 JPY");

        for bad in ["", "YEN!", "¥", "DOLLARS"] {
            assert!(matches!(
                Price::parse("10.00", bad),
                Err(PriceError::UnsupportedCurrency(_))
            ));
        }
    }

    #[test]
    fn test_currency_serializes_as_code() {
        let sek = Price::parse("299.00", "SEK").unwrap();
        let json = serde_json::to_value(sek).unwrap();
        assert_eq!(json["currency_code"], "SEK");
        assert_eq!(serde_json::from_value::<Price>(json).unwrap(), sek);
        assert!(serde_json::from_str::<CurrencyCode>("\"12\"").is_err());
    }

    #[test]
    fn test_times_and_plus() {
        let total = Price::usd(65).times(2).plus(&Price::usd(45));
        assert_eq!(total.amount, Decimal::new(175, 0));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Price::new(Decimal::MAX, CurrencyCode::USD);
        assert_eq!(huge.times(2).amount, Decimal::MAX);
        assert_eq!(huge.plus(&huge).amount, Decimal::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::usd(65).display(), "$65.00");
        let pounds = Price::new(Decimal::new(1999, 2), CurrencyCode::GBP);
        assert_eq!(pounds.to_string(), "£19.99");
    }
}
