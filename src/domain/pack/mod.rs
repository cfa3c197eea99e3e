//! Pack domain module.
//!
//! Prepaid lesson bundles and the installment plans that pay for them.
//!
//! - `Pack` - Credits, compatibility rules, consume/release
//! - `FeePlan` - Installment schedule and reconciliation

mod aggregate;
mod fee_plan;

pub use aggregate::{Pack, PackError};
pub use fee_plan::{FeePlan, FeePlanError, Installment};
