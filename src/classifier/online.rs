//! Incremental training for classifiers that only support batch training.
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::{
    Classifier,
    Example,
    OnlineClassifier,
    Prediction,
    Result,
};


/// Wraps a batch [`Classifier`] and simulates
/// [`OnlineClassifier::train_more`] by retraining from scratch
/// on every example seen so far.
///
/// # Example
/// ```
/// use eeg_classify::prelude::*;
///
/// let mut clf = Online::new(Binary::new(LogisticRegression::default()));
/// clf.train(&[Example::new(0, &[-1.0]).unwrap()]).unwrap();
/// clf.train_more(&[Example::new(1, &[1.0]).unwrap()]).unwrap();
/// assert_eq!(clf.history().len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Online<C> {
    inner: C,
    history: Vec<Example>,
}


impl<C> Online<C> {
    /// Wrap `inner`.
    pub fn new(inner: C) -> Self {
        Self { inner, history: Vec::new() }
    }


    /// Returns the wrapped classifier.
    pub fn inner(&self) -> &C {
        &self.inner
    }


    /// Returns every example the classifier has been trained on.
    pub fn history(&self) -> &[Example] {
        &self.history
    }
}


impl<C: Classifier> Classifier for Online<C> {
    fn train(&mut self, examples: &[Example]) -> Result<()> {
        self.inner.train(examples)?;
        self.history = examples.to_vec();
        Ok(())
    }


    fn predict(&self, example: &Example) -> Result<Prediction> {
        self.inner.predict(example)
    }


    fn is_trained(&self) -> bool {
        self.inner.is_trained()
    }


    fn computes_confidence(&self) -> bool {
        self.inner.computes_confidence()
    }
}


impl<C: Classifier> OnlineClassifier for Online<C> {
    fn train_more(&mut self, examples: &[Example]) -> Result<()> {
        let mut all = Vec::with_capacity(self.history.len() + examples.len());
        all.extend_from_slice(&self.history);
        all.extend_from_slice(examples);

        debug!(n_examples = all.len(), "retraining on accumulated history");
        self.inner.train(&all)?;
        self.history = all;
        Ok(())
    }
}
