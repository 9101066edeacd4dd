//! Imputation module for handling missing values.
//!
//! Only constant imputation is provided: numeric columns are filled with a
//! number, every other column with a text sentinel.

mod constant;

pub use constant::{ConstantImputer, FillKind};
