use std::collections::HashSet;

use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal, RoundingStrategy,
};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ProductId);

/// Largest cent amount that survives a round trip through `f64` without loss.
const MAX_CENTS: u64 = 1 << 53;

/// Non-negative money amount held as whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Rounds half away from zero to the nearest cent.
    ///
    /// Rounding works on the shortest decimal form of `amount`, so `1.005`
    /// becomes 101 cents even though its binary value sits just below.
    pub fn from_decimal(amount: f64) -> Result<Self, CatalogError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CatalogError::InvalidPrice { amount });
        }

        let exact = amount
            .to_string()
            .parse::<Decimal>()
            .ok()
            .or_else(|| Decimal::from_f64(amount))
            .ok_or(CatalogError::InvalidPrice { amount })?;
        let cents = exact
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_u64())
            .filter(|cents| *cents <= MAX_CENTS)
            .ok_or(CatalogError::InvalidPrice { amount })?;

        Ok(Self(cents))
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    pub fn whole_units(self) -> u64 {
        self.0 / 100
    }

    pub fn fractional_cents(self) -> u64 {
        self.0 % 100
    }

    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl TryFrom<f64> for Price {
    type Error = CatalogError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.as_decimal()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

impl CatalogEntry {
    pub fn new(id: i64, name: impl Into<String>, price: f64) -> Result<Self, CatalogError> {
        let entry = Self {
            id: ProductId(id),
            name: name.into(),
            price: Price::from_decimal(price)?,
        };
        entry.validate()?;
        Ok(entry)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.id.0 <= 0 {
            return Err(CatalogError::InvalidId { id: self.id.0 });
        }
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName { id: self.id.0 });
        }
        Ok(())
    }
}

/// Checks every entry and that ids are unique across the sequence.
pub fn validate_catalog(entries: &[CatalogEntry]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        entry.validate()?;
        if !seen.insert(entry.id) {
            return Err(CatalogError::DuplicateId { id: entry.id.0 });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
