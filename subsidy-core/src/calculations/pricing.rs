//! Subsidised price calculation.
//!
//! A purchase price is multiplied by the discount rate of the selected energy
//! tier. Rates come from a [`PricingTable`]; the default table carries the two
//! nationally fixed tiers.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use subsidy_core::calculations::PricingCalculator;
//!
//! let calculator = PricingCalculator::default();
//! let quote = calculator.quote(dec!(1000), "2");
//!
//! assert_eq!(quote.discounted_price, dec!(850.00));
//! assert_eq!(quote.label, "二级能效（85%）");
//! ```

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up;

/// Errors that make a pricing table unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingTableError {
    /// A tier code is empty or whitespace.
    #[error("tier code must not be blank")]
    BlankCode,

    /// The same code appears more than once.
    #[error("duplicate tier code '{0}'")]
    DuplicateCode(String),

    /// A rate outside (0, 1].
    #[error("rate {rate} for '{code}' must be greater than 0 and at most 1")]
    RateOutOfRange { code: String, rate: Decimal },
}

/// One energy tier and the share of the price the buyer pays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub code: String,
    pub rate: Decimal,
    pub label: String,
}

impl Tier {
    pub fn new(
        code: impl Into<String>,
        rate: Decimal,
        label: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rate,
            label: label.into(),
        }
    }
}

/// Tier lookup table plus the rate applied to codes it does not list.
///
/// Missing fields deserialize to the default table's values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingTable {
    /// Rate for codes missing from `tiers`. Such quotes carry an empty label.
    pub fallback_rate: Decimal,
    pub tiers: Vec<Tier>,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            fallback_rate: Decimal::new(80, 2),
            tiers: vec![
                Tier::new("1", Decimal::new(80, 2), "一级能效（80%）"),
                Tier::new("2", Decimal::new(85, 2), "二级能效（85%）"),
            ],
        }
    }
}

impl PricingTable {
    /// Checks that every code is unique and every rate lies in (0, 1].
    pub fn validate(&self) -> Result<(), PricingTableError> {
        check_rate("<fallback>", self.fallback_rate)?;

        let mut seen = HashSet::new();
        for tier in &self.tiers {
            if tier.code.trim().is_empty() {
                return Err(PricingTableError::BlankCode);
            }
            if !seen.insert(tier.code.as_str()) {
                return Err(PricingTableError::DuplicateCode(tier.code.clone()));
            }
            check_rate(&tier.code, tier.rate)?;
        }
        Ok(())
    }

    pub fn tier(
        &self,
        code: &str,
    ) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.code == code)
    }
}

fn check_rate(
    code: &str,
    rate: Decimal,
) -> Result<(), PricingTableError> {
    if rate <= Decimal::ZERO || rate > Decimal::ONE {
        return Err(PricingTableError::RateOutOfRange {
            code: code.to_string(),
            rate,
        });
    }
    Ok(())
}

/// Result of pricing one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountQuote {
    pub original_price: Decimal,
    pub rate: Decimal,
    /// `original_price × rate`, rounded half-up to two decimals.
    pub discounted_price: Decimal,
    /// Tier label, empty when the code fell back to the default rate.
    pub label: String,
}

/// Applies a validated [`PricingTable`] to purchase prices.
#[derive(Debug, Clone, Default)]
pub struct PricingCalculator {
    table: PricingTable,
}

impl PricingCalculator {
    pub fn new(table: PricingTable) -> Result<Self, PricingTableError> {
        table.validate()?;
        Ok(Self { table })
    }

    pub fn table(&self) -> &PricingTable {
        &self.table
    }

    /// Prices `original_price` for the given energy code.
    ///
    /// Expects a price that already passed validation (> 0). Codes missing
    /// from the table use the fallback rate and an empty label.
    pub fn quote(
        &self,
        original_price: Decimal,
        energy_code: &str,
    ) -> DiscountQuote {
        let (rate, label) = match self.table.tier(energy_code) {
            Some(tier) => (tier.rate, tier.label.clone()),
            None => {
                tracing::debug!(
                    code = energy_code,
                    "unknown energy code, applying fallback rate"
                );
                (self.table.fallback_rate, String::new())
            }
        };

        DiscountQuote {
            original_price,
            rate,
            discounted_price: round_half_up(original_price * rate),
            label,
        }
    }
}
