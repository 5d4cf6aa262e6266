//! Price calculations for the subsidy form.
//!
//! `common` holds the money helpers shared by pricing and validation;
//! `pricing` maps an energy tier to its discount rate.

pub mod common;
pub mod pricing;

pub use pricing::{DiscountQuote, PricingCalculator, PricingTable, PricingTableError, Tier};
