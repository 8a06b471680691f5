//! # trowel-core
//!
//! Foundational types shared across all Trowel crates.
//!
//! This crate provides:
//! - The ordered `Severity` scale and the four top-level `CostCategory` values
//! - `parse_numeric_or_zero`, the single place where loose numeric input is coerced
//! - Serde helpers that apply that coercion to record fields
//! - Output-boundary rounding for monetary and percentage values
//! - `ValidationError`, the structural error every engine crate surfaces

pub mod enums;
pub mod errors;
pub mod money;
pub mod numeric;

pub use enums::{CostCategory, Severity};
pub use errors::ValidationError;
pub use money::{percent_of, round_currency};
pub use numeric::parse_numeric_or_zero;
