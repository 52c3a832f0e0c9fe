//! Type-safe dish identifier.
//!
//! Dish ids are externally supplied natural keys: the ordering front-end
//! assigns them and every sync call carries one. They are stored and compared
//! as strings, but clients are loose about the JSON type and may send either
//! `"42"` or `42` for the same dish, so deserialization accepts both and
//! normalizes to the string form.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Error returned when a raw value cannot be used as a dish id.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DishIdError {
    /// The id was empty (or whitespace only).
    #[error("dish id must not be empty")]
    Empty,
}

/// Identifier of a dish, unique across the catalog.
///
/// Immutable once assigned; acts as the natural key for the sync upsert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DishId(String);

impl DishId {
    /// Parse a dish id from a raw string.
    ///
    /// Surrounding whitespace is trimmed; the result must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns `DishIdError::Empty` if the trimmed input is empty.
    pub fn parse(raw: &str) -> Result<Self, DishIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DishIdError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id, returning the owned string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DishId> for String {
    fn from(id: DishId) -> Self {
        id.0
    }
}

impl<'de> Deserialize<'de> for DishId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DishIdVisitor;

        impl Visitor<'_> for DishIdVisitor {
            type Value = DishId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-empty string or integer dish id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<DishId, E> {
                DishId::parse(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<DishId, E> {
                Ok(DishId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<DishId, E> {
                Ok(DishId(v.to_string()))
            }
        }

        deserializer.deserialize_any(DishIdVisitor)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for DishId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for DishId {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <String as sqlx::Decode<'_, sqlx::Postgres>>::decode(value)?;
        Ok(Self(raw))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for DishId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'_, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
