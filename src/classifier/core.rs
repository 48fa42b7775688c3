//! The training/prediction life-cycle shared by every classifier.
use serde::{Serialize, Deserialize};

use crate::{Example, Label, Result};


/// The output of [`Classifier::predict`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The predicted class.
    pub label: Label,
    /// Self-reported strength of the prediction in `[0, 1]`.
    /// Only meaningful if [`Classifier::computes_confidence`] is `true`.
    pub confidence: f64,
}


impl Prediction {
    /// Construct a new prediction.
    #[inline]
    pub fn new(label: Label, confidence: f64) -> Self {
        Self { label, confidence }
    }
}


/// A trait that defines the behavior of a classifier.
///
/// Every classifier starts untrained.
/// A successful [`Classifier::train`] makes it trained;
/// [`Classifier::predict`] on an untrained classifier returns
/// [`ClassifierError::NotTrained`](crate::ClassifierError::NotTrained).
/// Training again replaces the previous model.
pub trait Classifier {
    /// Train `self` on `examples`.
    fn train(&mut self, examples: &[Example]) -> Result<()>;


    /// Predicts the label of `example`.
    fn predict(&self, example: &Example) -> Result<Prediction>;


    /// Returns `true` once `self` has been trained.
    fn is_trained(&self) -> bool;


    /// Returns `true` if the confidence of a [`Prediction`] is meaningful.
    fn computes_confidence(&self) -> bool;


    /// Predicts the labels of `examples`.
    fn predict_all(&self, examples: &[Example]) -> Result<Vec<Label>> {
        examples.iter()
            .map(|example| self.predict(example).map(|p| p.label))
            .collect()
    }
}


/// A classifier that accepts a weight on each training example.
pub trait WeightedClassifier: Classifier {
    /// Train `self` on `examples` weighted by `weights`.
    /// `weights.len()` must equal `examples.len()`.
    fn train_weighted(&mut self, examples: &[Example], weights: &[f64])
        -> Result<()>;
}


/// A classifier that can be updated with more examples
/// without forgetting the ones it has already seen.
pub trait OnlineClassifier: Classifier {
    /// Update `self` with `examples`.
    /// On an untrained classifier this is equivalent to `train`.
    fn train_more(&mut self, examples: &[Example]) -> Result<()>;
}
