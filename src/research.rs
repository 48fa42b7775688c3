//! This directory provides some features for research:
//! cross validation, train/test splits, and scoring.

/// Provides the `k`-fold cross validation iterator.
pub mod cross_validation;

/// Scores a classifier on labeled examples.
pub mod evaluation;

pub use cross_validation::CrossValidation;
pub use evaluation::{
    accuracy,
    train_test_split,
    zero_one_loss,
};
