//! Labeled feature vectors and their normalization.

pub mod example;
pub mod feature_stats;


pub use example::{Example, Label};
pub use feature_stats::{FeatureStats, z_score};


use crate::{ClassifierError, Result};


/// Returns `(n_examples, n_features)` of a training set,
/// checking that every example has the same number of features.
pub(crate) fn shape(examples: &[Example]) -> Result<(usize, usize)> {
    let n_feature = examples.first()
        .map(Example::len)
        .ok_or_else(|| ClassifierError::invalid_set("no examples"))?;
    for ex in examples {
        ex.check_len(n_feature)?;
    }
    Ok((examples.len(), n_feature))
}
