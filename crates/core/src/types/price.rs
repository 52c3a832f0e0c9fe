//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are plain decimal amounts in the restaurant's single configured
//! currency; there is no multi-currency support in the catalog. Decimal (not
//! float) arithmetic avoids rounding drift when prices round-trip through
//! sync calls.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A dish price.
///
/// Accepts JSON numbers and numeric strings on input (clients are loose about
/// the type). A dish created without a price defaults to [`Price::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero price, used when a sync payload omits the field on creation.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<'_, sqlx::Postgres>>::decode(value)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<'_, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_number_and_string() {
        let from_num: Price = serde_json::from_str("9.5").unwrap();
        let from_str: Price = serde_json::from_str(r#""9.5""#).unwrap();
        assert_eq!(from_num, from_str);
        assert_eq!(from_num.amount(), Decimal::new(95, 1));
    }

    #[test]
    fn zero_is_default() {
        assert_eq!(Price::default(), Price::ZERO);
        assert_eq!(Price::ZERO.amount(), Decimal::ZERO);
    }

    #[test]
    fn displays_with_two_decimals() {
        let price = Price::new(Decimal::new(95, 1));
        assert_eq!(price.to_string(), "9.50");
    }
}
