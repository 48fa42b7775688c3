//! Provides the decision rule learned by a decision stump.
use serde::{Serialize, Deserialize};

use crate::Example;


/// Defines the ray that is predicted as positive.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum PositiveSide {
    /// Values strictly above the threshold are positive.
    RHS,
    /// Values strictly below the threshold are positive.
    LHS,
}


/// The struct `StumpRule` defines the decision stump hypothesis.
/// Given a point `x`, the rule predicts positive if
/// `x[feature_index]` lies strictly on the `positive_side`
/// of `threshold`, and negative otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StumpRule {
    /// The cutoff on the feature value.
    pub threshold: f64,

    /// The index of the feature used in prediction.
    pub feature_index: usize,

    /// The ray predicted as positive.
    pub positive_side: PositiveSide,
}


impl StumpRule {
    /// Returns `true` if `example` falls on the positive side.
    #[inline]
    pub fn is_positive(&self, example: &Example) -> bool {
        let val = example.value_at(self.feature_index);
        match self.positive_side {
            PositiveSide::RHS => val > self.threshold,
            PositiveSide::LHS => val < self.threshold,
        }
    }
}
