//! Scores a trained classifier and splits data for evaluation.
use rand::prelude::*;

use crate::{
    Classifier,
    ClassifierError,
    Example,
    Result,
    common::checker::{self, Violations},
};


/// Fraction of `examples` whose label `classifier` predicts correctly.
/// Fails on an empty slice.
pub fn accuracy<C>(classifier: &C, examples: &[Example]) -> Result<f64>
    where C: Classifier + ?Sized,
{
    if examples.is_empty() {
        return Err(ClassifierError::invalid_set("no examples to score"));
    }
    let predictions = classifier.predict_all(examples)?;
    let hits = predictions.into_iter()
        .zip(examples)
        .filter(|(label, ex)| *label == ex.class())
        .count();
    Ok(hits as f64 / examples.len() as f64)
}


/// Zero-one loss, i.e., `1 - accuracy`.
pub fn zero_one_loss<C>(classifier: &C, examples: &[Example]) -> Result<f64>
    where C: Classifier + ?Sized,
{
    accuracy(classifier, examples).map(|acc| 1.0 - acc)
}


/// Shuffle `examples` with `seed` and split off
/// `round(test_ratio * n)` of them as the test set.
/// Returns `(train, test)`.
pub fn train_test_split(examples: &[Example], test_ratio: f64, seed: u64)
    -> Result<(Vec<Example>, Vec<Example>)>
{
    let mut out = Vec::new();
    checker::at_least(&mut out, "test_ratio", test_ratio, 0.0);
    checker::at_most(&mut out, "test_ratio", test_ratio, 1.0);
    if !out.is_empty() {
        return Err(ClassifierError::InvalidParameters(Violations(out)));
    }

    let mut shuffled = examples.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let n_test = (test_ratio * examples.len() as f64).round() as usize;
    let test = shuffled.split_off(examples.len() - n_test);
    Ok((shuffled, test))
}
