//! Adapts two-class learning algorithms to arbitrary integer labels.
//!
//! A [`BinaryClassifier`] only ever sees its own two sentinel labels,
//! `NEGATIVE` and `POSITIVE`.
//! [`Binary`] owns the [`ClassMap`] that relates the caller's labels
//! to those sentinels, converts every training example before
//! delegating, and converts every prediction back.
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::{
    Classifier,
    ClassifierError,
    Example,
    Label,
    OnlineClassifier,
    Prediction,
    Result,
    Validate,
    WeightedClassifier,
    common::checker,
    sample,
};


/// A learning algorithm over the two labels
/// [`BinaryClassifier::NEGATIVE`] and [`BinaryClassifier::POSITIVE`].
///
/// Wrap it in [`Binary`] to obtain a [`Classifier`].
pub trait BinaryClassifier: Validate {
    /// Sentinel label of the negative class.
    const NEGATIVE: Label;
    /// Sentinel label of the positive class.
    const POSITIVE: Label;


    /// Returns the name of the algorithm.
    fn name(&self) -> &str;


    /// Train on examples labeled with the two sentinels.
    /// The caller guarantees that `weights.len() == examples.len()`,
    /// that `examples` is non-empty,
    /// and that every example has the same number of features.
    fn train_binary(&mut self, examples: &[Example], weights: &[f64])
        -> Result<()>;


    /// Predict one of the two sentinels.
    fn predict_binary(&self, example: &Example) -> Result<Prediction>;


    /// Returns `true` if the confidence of a prediction is meaningful.
    fn computes_confidence(&self) -> bool;
}


/// A [`BinaryClassifier`] that can be updated incrementally.
pub trait OnlineBinaryClassifier: BinaryClassifier {
    /// Continue training with more sentinel-labeled examples.
    fn train_more_binary(&mut self, examples: &[Example], weights: &[f64])
        -> Result<()>;
}


/// The mapping from at most two caller labels to the two sentinels.
/// A `ClassMap` is never mutated;
/// [`ClassMap::extended`] builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMap {
    negative: Option<Label>,
    positive: Option<Label>,
}


impl ClassMap {
    /// Returns the caller label mapped to the negative sentinel.
    pub fn negative(&self) -> Option<Label> {
        self.negative
    }


    /// Returns the caller label mapped to the positive sentinel.
    pub fn positive(&self) -> Option<Label> {
        self.positive
    }


    /// Returns `Some(true)` for the positive label,
    /// `Some(false)` for the negative label, `None` otherwise.
    pub fn binary_class(&self, label: Label) -> Option<bool> {
        if self.positive == Some(label) {
            Some(true)
        } else if self.negative == Some(label) {
            Some(false)
        } else {
            None
        }
    }


    /// Returns a map that contains every label of `self`
    /// plus the labels in `labels`.
    /// Existing assignments never move.
    /// On an empty map, the smaller label becomes negative.
    /// A label that does not fit in either slot is
    /// [`ClassifierError::UnknownClass`].
    ///
    /// `labels` must be sorted and free of duplicates.
    pub fn extended(&self, labels: &[Label]) -> Result<Self> {
        let mut map = self.clone();
        for &label in labels {
            if map.binary_class(label).is_some() { continue; }

            if map.negative.is_none() {
                map.negative = Some(label);
            } else if map.positive.is_none() {
                map.positive = Some(label);
            } else {
                return Err(ClassifierError::UnknownClass(label));
            }
        }
        Ok(map)
    }
}


/// Returns the distinct labels of `examples` in ascending order.
pub(crate) fn distinct_labels(examples: &[Example]) -> Vec<Label> {
    let mut labels = examples.iter()
        .map(Example::class)
        .collect::<Vec<_>>();
    labels.sort_unstable();
    labels.dedup();
    labels
}


/// Turns a [`BinaryClassifier`] into a [`Classifier`] over
/// arbitrary integer labels.
///
/// # Example
/// ```
/// use eeg_classify::prelude::*;
///
/// let examples = vec![
///     Example::new(3, &[1.0]).unwrap(),
///     Example::new(3, &[2.0]).unwrap(),
///     Example::new(4, &[8.0]).unwrap(),
///     Example::new(4, &[9.0]).unwrap(),
/// ];
///
/// let mut stump = Binary::new(DecisionStump::default());
/// stump.train(&examples).unwrap();
///
/// let query = Example::new(0, &[1.5]).unwrap();
/// assert_eq!(stump.predict(&query).unwrap().label, 3);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Binary<B> {
    inner: B,
    classes: ClassMap,
    trained: bool,
}


impl<B> Binary<B> {
    /// Wrap `inner`.
    pub fn new(inner: B) -> Self {
        Self { inner, classes: ClassMap::default(), trained: false }
    }


    /// Returns the wrapped algorithm.
    pub fn inner(&self) -> &B {
        &self.inner
    }


    /// Returns the class map built so far.
    pub fn classes(&self) -> &ClassMap {
        &self.classes
    }


    /// Returns `Some(true)` if `label` is the positive class,
    /// `Some(false)` if it is the negative class,
    /// `None` if it has not been registered.
    pub fn binary_class(&self, label: Label) -> Option<bool> {
        self.classes.binary_class(label)
    }
}


impl<B: BinaryClassifier> Binary<B> {
    // Validate the configuration and the training set,
    // then relabel every example with its sentinel.
    fn prepare(&self, examples: &[Example], weights: &[f64])
        -> Result<(ClassMap, Vec<Example>)>
    {
        self.inner.validate()?;
        checker::weights_match(examples.len(), weights)?;
        sample::shape(examples)?;

        let labels = distinct_labels(examples);
        if labels.len() > 2 {
            return Err(ClassifierError::invalid_set(format!(
                "{} expects at most 2 classes, got {labels:?}",
                self.inner.name()
            )));
        }
        let classes = self.classes.extended(&labels)?;

        let relabeled = examples.iter()
            .map(|ex| {
                let class = match classes.binary_class(ex.class()) {
                    Some(true) => B::POSITIVE,
                    _ => B::NEGATIVE,
                };
                ex.with_class(class)
            })
            .collect::<Vec<_>>();

        Ok((classes, relabeled))
    }


    /// Map a sentinel back to the caller's label.
    /// A model trained on a single class always answers that class.
    fn original_label(&self, sentinel: Label) -> Result<Label> {
        let ClassMap { negative, positive } = self.classes;
        let label = if sentinel == B::POSITIVE {
            positive.or(negative)
        } else if sentinel == B::NEGATIVE {
            negative.or(positive)
        } else {
            None
        };
        label.ok_or(ClassifierError::UnknownClass(sentinel))
    }
}


impl<B: BinaryClassifier> Classifier for Binary<B> {
    fn train(&mut self, examples: &[Example]) -> Result<()> {
        let weights = vec![1.0; examples.len()];
        self.train_weighted(examples, &weights)
    }


    fn predict(&self, example: &Example) -> Result<Prediction> {
        if !self.trained {
            return Err(ClassifierError::NotTrained);
        }
        let prediction = self.inner.predict_binary(example)?;
        let label = self.original_label(prediction.label)?;
        Ok(Prediction::new(label, prediction.confidence))
    }


    fn is_trained(&self) -> bool {
        self.trained
    }


    fn computes_confidence(&self) -> bool {
        self.inner.computes_confidence()
    }
}


impl<B: BinaryClassifier> WeightedClassifier for Binary<B> {
    fn train_weighted(&mut self, examples: &[Example], weights: &[f64])
        -> Result<()>
    {
        let (classes, relabeled) = self.prepare(examples, weights)?;

        self.trained = false;
        self.inner.train_binary(&relabeled, weights)?;
        self.classes = classes;
        self.trained = true;

        info!(
            algorithm = self.inner.name(),
            n_examples = examples.len(),
            "training finished"
        );
        Ok(())
    }
}


impl<B: OnlineBinaryClassifier> OnlineClassifier for Binary<B> {
    fn train_more(&mut self, examples: &[Example]) -> Result<()> {
        if !self.trained {
            return self.train(examples);
        }

        let weights = vec![1.0; examples.len()];
        let (classes, relabeled) = self.prepare(examples, &weights)?;
        self.inner.train_more_binary(&relabeled, &weights)?;
        self.classes = classes;
        Ok(())
    }
}
