//! The classifier contract and its adapters.
//!
//! - [`Classifier`] is the training/prediction life-cycle.
//! - [`WeightedClassifier`] and [`OnlineClassifier`] are optional
//!   capabilities.
//! - [`Binary`] lifts a two-class algorithm to arbitrary labels.
//! - [`Online`] adds incremental training to any classifier
//!   by retraining on the accumulated history.

pub mod core;
pub mod binary;
pub mod online;

pub use self::core::{
    Classifier,
    OnlineClassifier,
    Prediction,
    WeightedClassifier,
};

pub use self::binary::{
    Binary,
    BinaryClassifier,
    ClassMap,
    OnlineBinaryClassifier,
};

pub use self::online::Online;
