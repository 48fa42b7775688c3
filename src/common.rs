//! Defines some common functions used in this library.

/// Defines some useful numeric functions such as inner products.
pub(crate) mod utils;

/// Defines the configuration checkers.
pub mod checker;

pub use checker::{
    Bound,
    Validate,
    Violation,
    Violations,
    config_from_json,
};
