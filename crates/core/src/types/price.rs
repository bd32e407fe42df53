//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is not a decimal number.
    #[error("price is not a number: {0}")]
    NotANumber(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount has more decimal places than prices are stored with.
    #[error("price cannot have more than {max} decimal places")]
    TooPrecise { max: u32 },
    /// The amount does not fit the stored precision.
    #[error("price cannot exceed {max}")]
    TooLarge { max: Decimal },
}

/// Decimal places kept for a price amount.
pub const PRICE_SCALE: u32 = 2;

/// Largest storable amount: 10 integer digits, [`PRICE_SCALE`] fraction digits.
// 999_999_999_999 = 0xE8_D4A5_0FFF; `Decimal::new` is not `const`.
pub const MAX_PRICE_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, PRICE_SCALE);

/// A non-negative price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PriceFields")]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    amount: Decimal,
    /// ISO 4217 currency code.
    currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero,
    /// `PriceError::TooPrecise` if it has more than [`PRICE_SCALE`] decimal
    /// places and `PriceError::TooLarge` above [`MAX_PRICE_AMOUNT`].
    pub fn new(amount: Decimal, currency_code: CurrencyCode) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        if amount.normalize().scale() > PRICE_SCALE {
            return Err(PriceError::TooPrecise { max: PRICE_SCALE });
        }
        if amount > MAX_PRICE_AMOUNT {
            return Err(PriceError::TooLarge {
                max: MAX_PRICE_AMOUNT,
            });
        }
        Ok(Self {
            amount,
            currency_code,
        })
    }

    /// Parse a price in the default currency from a decimal string such as `"10.99"`.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotANumber` for non-decimal input and
    /// `PriceError::Negative` for amounts below zero.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|_| PriceError::NotANumber(s.to_owned()))?;
        Self::new(amount, CurrencyCode::default())
    }

    /// The amount in the currency's standard unit.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The ISO 4217 currency code.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }
}

/// Wire shape of a [`Price`]; deserialization goes through [`Price::new`].
#[derive(Deserialize)]
struct PriceFields {
    amount: Decimal,
    currency_code: CurrencyCode,
}

impl TryFrom<PriceFields> for Price {
    type Error = PriceError;

    fn try_from(fields: PriceFields) -> Result<Self, Self::Error> {
        Self::new(fields.amount, fields.currency_code)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// ISO 4217 code, e.g. `"USD"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }

    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        let price = Price::parse("10.99").unwrap();
        assert_eq!(price.amount(), Decimal::new(1099, 2));
        assert_eq!(price.currency_code(), CurrencyCode::USD);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Price::parse("ten dollars"),
            Err(PriceError::NotANumber(_))
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        assert_eq!(
            Price::new(Decimal::new(-1, 0), CurrencyCode::EUR),
            Err(PriceError::Negative)
        );
    }

    #[test]
    fn test_extra_decimal_places_rejected() {
        assert_eq!(
            Price::parse("10.999"),
            Err(PriceError::TooPrecise { max: 2 })
        );
        // Trailing zeros do not count.
        assert_eq!(
            Price::parse("10.990").unwrap().amount(),
            Decimal::new(1099, 2)
        );
    }

    #[test]
    fn test_amount_upper_bound() {
        assert_eq!(MAX_PRICE_AMOUNT.to_string(), "9999999999.99");
        assert!(Price::parse("9999999999.99").is_ok());
        assert!(matches!(
            Price::parse("10000000000"),
            Err(PriceError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let price: Price =
            serde_json::from_str(r#"{"amount":"5.00","currency_code":"USD"}"#).unwrap();
        assert_eq!(price.amount(), Decimal::new(500, 2));

        let negative =
            serde_json::from_str::<Price>(r#"{"amount":"-5.00","currency_code":"USD"}"#);
        assert!(negative.unwrap_err().to_string().contains("negative"));

        let precise =
            serde_json::from_str::<Price>(r#"{"amount":"0.001","currency_code":"EUR"}"#);
        assert!(precise.is_err());
    }

    #[test]
    fn test_zero_is_allowed() {
        assert!(Price::parse("0").is_ok());
    }

    #[test]
    fn test_currency_code_roundtrip() {
        for code in [
            CurrencyCode::USD,
            CurrencyCode::EUR,
            CurrencyCode::GBP,
            CurrencyCode::CAD,
            CurrencyCode::AUD,
        ] {
            assert_eq!(code.code().parse::<CurrencyCode>(), Ok(code));
        }
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_display() {
        let price = Price::new(Decimal::new(1099, 2), CurrencyCode::GBP).unwrap();
        assert_eq!(price.to_string(), "£10.99");
    }
}
