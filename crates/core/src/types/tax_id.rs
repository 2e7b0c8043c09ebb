//! National tax identifier (Brazilian CPF).
//!
//! A CPF has eleven digits: nine base digits followed by two check digits
//! computed with a weighted modulo-11 sum. Formatted input such as
//! `275.718.840-20` is accepted and normalised to bare digits.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`TaxId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxIdError {
    /// The input is empty.
    #[error("cpf cannot be empty")]
    Empty,
    /// The input contains something other than digits, dots and a dash.
    #[error("cpf may only contain digits, '.' and '-'")]
    InvalidCharacter,
    /// The input does not have exactly eleven digits.
    #[error("cpf must have 11 digits (got {0})")]
    WrongLength(usize),
    /// All digits are the same (e.g. 111.111.111-11), which passes the
    /// checksum but is never issued.
    #[error("cpf cannot repeat a single digit")]
    RepeatedDigits,
    /// A check digit does not match.
    #[error("invalid cpf check digits")]
    Checksum,
}

/// A validated CPF, stored as eleven ASCII digits.
///
/// ```
/// use credit_application_core::TaxId;
///
/// let cpf = TaxId::parse("275.718.840-20").unwrap();
/// assert_eq!(cpf.as_str(), "27571884020");
/// assert_eq!(cpf.formatted(), "275.718.840-20");
///
/// assert!(TaxId::parse("27571884021").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct TaxId(String);

impl TaxId {
    /// Number of digits in a CPF.
    pub const LENGTH: usize = 11;

    /// Parse and validate a CPF.
    ///
    /// # Errors
    ///
    /// Returns a [`TaxIdError`] if the input is not a well-formed CPF or its
    /// check digits do not match.
    pub fn parse(s: &str) -> Result<Self, TaxIdError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TaxIdError::Empty);
        }

        let mut digits = Vec::with_capacity(Self::LENGTH);
        for c in s.chars() {
            match c {
                '0'..='9' => digits.push(c as u8 - b'0'),
                '.' | '-' => {}
                _ => return Err(TaxIdError::InvalidCharacter),
            }
        }

        let [d0, d1, d2, d3, d4, d5, d6, d7, d8, c1, c2] = <[u8; 11]>::try_from(digits.as_slice())
            .map_err(|_| TaxIdError::WrongLength(digits.len()))?;
        let base = [d0, d1, d2, d3, d4, d5, d6, d7, d8];

        if digits.iter().all(|&d| d == d0) {
            return Err(TaxIdError::RepeatedDigits);
        }

        let first = check_digit(&base);
        let second = check_digit(&[d0, d1, d2, d3, d4, d5, d6, d7, d8, first]);
        if first != c1 || second != c2 {
            return Err(TaxIdError::Checksum);
        }

        Ok(Self(digits.iter().map(|d| char::from(b'0' + d)).collect()))
    }

    /// Returns the eleven digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the conventional `000.000.000-00` rendering.
    #[must_use]
    pub fn formatted(&self) -> String {
        let s = &self.0;
        match (s.get(0..3), s.get(3..6), s.get(6..9), s.get(9..11)) {
            (Some(a), Some(b), Some(c), Some(d)) => format!("{a}.{b}.{c}-{d}"),
            _ => s.clone(),
        }
    }
}

/// Weighted modulo-11 check digit over `digits`, weights counting down to 2.
fn check_digit(digits: &[u8]) -> u8 {
    let weight_start = digits.len() + 1;
    let sum: usize = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| usize::from(d) * (weight_start - i))
        .sum();
    match sum % 11 {
        0 | 1 => 0,
        // remainder is in 2..=10 here, so the result fits in a single digit
        #[allow(clippy::cast_possible_truncation)]
        rem => (11 - rem) as u8,
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for TaxId {
    type Err = TaxIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TaxId {
    type Error = TaxIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TaxId> for String {
    fn from(id: TaxId) -> Self {
        id.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for TaxId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for TaxId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::parse(&s)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for TaxId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
