//! The files in `weak_learner/` directory define
//! the weak learners used by the boosting algorithms.

/// Defines the decision stump.
pub mod decision_stump;

pub use self::decision_stump::{
    AmplitudeStump,
    DecisionStump,
    DecisionStumpConfig,
    PositiveSide,
    StumpRule,
};
