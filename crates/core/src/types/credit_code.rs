//! Public natural code for credits.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error parsing a [`CreditCode`] from text.
#[derive(thiserror::Error, Debug, Clone)]
#[error("invalid credit code: {0}")]
pub struct CreditCodeError(String);

/// Public-facing identifier of a credit.
///
/// A random version 4 UUID (122 random bits) generated when the credit is
/// built. Codes are never reused or regenerated, and collisions are treated
/// as impossible: nothing retries on a duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreditCode(Uuid);

impl CreditCode {
    /// Generate a fresh random code.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID (e.g. one loaded from storage).
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CreditCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl std::str::FromStr for CreditCode {
    type Err = CreditCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| CreditCodeError(s.to_owned()))
    }
}

impl From<Uuid> for CreditCode {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<CreditCode> for Uuid {
    fn from(code: CreditCode) -> Self {
        code.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for CreditCode {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Uuid as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Uuid as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for CreditCode {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        Ok(Self(<Uuid as sqlx::Decode<sqlx::Postgres>>::decode(value)?))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for CreditCode {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Uuid as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_random_v4() {
        let a = CreditCode::generate();
        let b = CreditCode::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_parse_and_display() {
        let text = "8f14e45f-ceea-467a-9a36-dedd4bea2543";
        let code: CreditCode = text.parse().unwrap();
        assert_eq!(code.to_string(), text);
        assert!("not-a-uuid".parse::<CreditCode>().is_err());
    }
}
