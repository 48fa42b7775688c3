//! Error type shared by every classifier in this crate.
use thiserror::Error;

use crate::common::checker::Violations;


/// Errors produced while training or querying a classifier.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// `predict` was called before a successful `train`.
    #[error("classifier is not trained")]
    NotTrained,

    /// The training set cannot be used by this classifier.
    #[error("invalid training set: {reason}")]
    InvalidTrainingSet {
        /// Why the set was rejected
        reason: String,
    },

    /// A label that has no slot in the binary class map.
    #[error("unknown class {0}")]
    UnknownClass(i32),

    /// One or more configuration values are out of bounds.
    #[error("invalid parameters: {0}")]
    InvalidParameters(Violations),

    /// A configuration document could not be parsed.
    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Weighted training got a weight slice of the wrong length.
    #[error("got {weights} weights for {examples} examples")]
    WeightLengthMismatch {
        /// Number of examples
        examples: usize,
        /// Number of weights
        weights: usize,
    },

    /// A feature vector does not have the length the model was built for.
    #[error("expected {expected} features, got {got}")]
    DimensionMismatch {
        /// Feature count the model expects
        expected: usize,
        /// Feature count received
        got: usize,
    },

    /// Nearest-neighbor search over an empty set.
    #[error("no stored examples to search for neighbors")]
    EmptyNeighborSet,

    /// A feature value is NaN or infinite.
    #[error("feature {index} is not finite ({value})")]
    NonFiniteFeature {
        /// Position of the offending value
        index: usize,
        /// The offending value
        value: f64,
    },
}


impl ClassifierError {
    pub(crate) fn invalid_set<S: Into<String>>(reason: S) -> Self {
        Self::InvalidTrainingSet { reason: reason.into() }
    }
}


/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClassifierError>;
