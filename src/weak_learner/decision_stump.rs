//! Provides the decision stump class.
pub mod dstump;
pub mod dstump_rule;
pub mod amplitude;

pub use dstump::{DecisionStump, DecisionStumpConfig};
pub use dstump_rule::{PositiveSide, StumpRule};
pub use amplitude::AmplitudeStump;
