#![warn(missing_docs)]

//!
//! A crate that turns EEG feature vectors into class predictions.
//!
//! Every algorithm implements the same [`Classifier`] life-cycle:
//! train on labeled [`Example`]s, then predict a label with a confidence.
//!
//! - Two-class algorithms implement [`BinaryClassifier`]
//!   over a pair of sentinel labels.
//!   [`Binary`] maps any two integer labels onto those sentinels.
//!     - [`DecisionStump`] and [`AmplitudeStump`],
//!       single-threshold weak classifiers.
//!     - [`AdaBoost`], a weighted vote of weak classifiers
//!       trained on per-round feature subsets.
//!     - [`VotedPerceptron`], a kernelized voted perceptron.
//!     - [`LogisticRegression`], ridge-penalized and
//!       fitted by Newton-Raphson.
//!
//! - [`KNearestNeighbors`] works on any number of labels.
//!
//! - [`Online`] adds incremental training to any classifier.
//!
//! Configuration values are checked by [`Validate`] before training,
//! and every failure is a [`ClassifierError`].
//! The crate logs through [`tracing`] and never installs a subscriber.
//!
//! ```
//! use eeg_classify::prelude::*;
//!
//! let examples = (0..40)
//!     .map(|i| {
//!         let class = if i % 2 == 0 { 7 } else { 9 };
//!         let x = if class == 7 { -1.0 } else { 1.0 } * (1.0 + i as f64 / 40.0);
//!         Example::new(class, &[x, 0.5 * x]).unwrap()
//!     })
//!     .collect::<Vec<_>>();
//!
//! let (examples, stats) = z_score(&examples).unwrap();
//!
//! let mut clf = Binary::new(
//!     AdaBoost::new()
//!         .rounds(5)
//!         .mode(WeakLearnerTrainingMode::AllFeatures)
//! );
//! clf.train(&examples).unwrap();
//!
//! let query = stats.apply(&Example::new(0, &[2.0, 1.0]).unwrap()).unwrap();
//! assert_eq!(clf.predict(&query).unwrap().label, 9);
//! ```

pub mod error;
pub mod common;
pub mod constants;
pub mod sample;
pub mod classifier;
pub mod kernel;
pub mod weak_learner;
pub mod learner;
pub mod booster;
pub mod research;
pub mod prelude;


pub use error::{ClassifierError, Result};

pub use common::checker::{
    Validate,
    Violation,
    Violations,
    config_from_json,
};

pub use sample::{
    Example,
    FeatureStats,
    Label,
    z_score,
};

pub use classifier::{
    Binary,
    BinaryClassifier,
    ClassMap,
    Classifier,
    Online,
    OnlineBinaryClassifier,
    OnlineClassifier,
    Prediction,
    WeightedClassifier,
};

pub use kernel::Kernel;

pub use weak_learner::{
    AmplitudeStump,
    DecisionStump,
    DecisionStumpConfig,
};

pub use learner::{
    KNearestNeighbors,
    KnnConfig,
    LogisticRegression,
    LogisticRegressionConfig,
    VotedPerceptron,
    VotedPerceptronConfig,
};

pub use booster::{
    AdaBoost,
    AdaBoostConfig,
    Booster,
    WeakLearnerTrainingMode,
};

pub use research::CrossValidation;
