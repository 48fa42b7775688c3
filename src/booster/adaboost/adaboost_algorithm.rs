//! Provides [`AdaBoost`](AdaBoost) by Freund & Schapire, 1995.
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use tracing::{debug, info, warn};

use crate::{
    Binary,
    BinaryClassifier,
    Booster,
    ClassifierError,
    Example,
    Label,
    Prediction,
    Result,
    Validate,
    WeightedClassifier,
    common::checker::{self, Violation},
    common::utils,
    constants::{DEFAULT_CHANNEL_COUNT, MIN_ROUND_ERROR, UNRATED_CONFIDENCE},
    weak_learner::DecisionStump,
};
use super::feature_selection::WeakLearnerTrainingMode;

use std::ops::ControlFlow;


/// Parameters of [`AdaBoost`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaBoostConfig {
    /// Number of boosting rounds.
    pub rounds: usize,
    /// Feature subset offered to each round's weak learner.
    pub mode: WeakLearnerTrainingMode,
    /// Width of a time bin in columns.
    pub channel_count: usize,
}


impl Default for AdaBoostConfig {
    fn default() -> Self {
        Self {
            rounds: 10,
            mode: WeakLearnerTrainingMode::RandomSubset,
            channel_count: DEFAULT_CHANNEL_COUNT,
        }
    }
}


impl Validate for AdaBoostConfig {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        checker::at_least(&mut out, "rounds", self.rounds as f64, 1.0);
        checker::at_least(
            &mut out, "channel_count", self.channel_count as f64, 1.0
        );
        out
    }
}


/// Seed of the random stream used by one training run.
/// It only depends on the shape of the problem,
/// so training twice on the same data gives the same ensemble.
#[inline]
pub fn round_seed(rounds: usize, n_examples: usize, n_features: usize) -> u64 {
    (rounds as u64)
        .wrapping_mul(n_examples as u64)
        .wrapping_mul(n_features as u64)
}


/// One boosting round:
/// the weak learner, the features it was trained on, and its vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostRound<W> {
    weak_learner: W,
    features: Vec<usize>,
    alpha: f64,
}


impl<W> BoostRound<W> {
    /// Returns the weak learner of this round.
    pub fn weak_learner(&self) -> &W {
        &self.weak_learner
    }


    /// Returns the sorted feature indices this round looks at.
    pub fn features(&self) -> &[usize] {
        &self.features
    }


    /// Returns the weight of this round's vote.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}


/// Defines `AdaBoost`.
/// This struct is based on the book:
/// [Boosting: Foundations and Algorithms](https://direct.mit.edu/books/oa-monograph/5342/BoostingFoundations-and-Algorithms)
/// by Robert E. Schapire and Yoav Freund.
///
/// Each round trains a fresh clone of the weak learner template
/// on a feature subset chosen by [`WeakLearnerTrainingMode`],
/// under the current distribution over the examples.
/// The template must be untrained.
///
/// Labels are `-1` and `+1`; wrap in [`Binary`] for any other pair.
///
/// # Example
/// ```
/// use eeg_classify::prelude::*;
///
/// let examples = (0..20)
///     .map(|i| {
///         let x = i as f64;
///         let class = if i < 10 { 0 } else { 1 };
///         Example::new(class, &[x, 20.0 - x]).unwrap()
///     })
///     .collect::<Vec<_>>();
///
/// let mut booster = Binary::new(
///     AdaBoost::new()
///         .rounds(5)
///         .mode(WeakLearnerTrainingMode::SequentialFeature)
/// );
/// booster.train(&examples).unwrap();
///
/// let query = Example::new(0, &[2.0, 18.0]).unwrap();
/// assert_eq!(booster.predict(&query).unwrap().label, 0);
/// assert_eq!(booster.inner().rounds_trained(), 5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaBoost<W = Binary<DecisionStump>> {
    config: AdaBoostConfig,

    // Untrained template cloned at every round.
    weak_learner: W,

    ensemble: Vec<BoostRound<W>>,

    n_feature: usize,
}


impl AdaBoost {
    /// Initialize `AdaBoost` with a [`DecisionStump`] on feature `0`
    /// as the weak learner.
    pub fn new() -> Self {
        Self::init(Binary::new(DecisionStump::default()))
    }
}


impl Default for AdaBoost {
    fn default() -> Self {
        Self::new()
    }
}


impl<W> AdaBoost<W> {
    /// Initialize `AdaBoost` with the weak learner template `weak_learner`.
    pub fn init(weak_learner: W) -> Self {
        Self {
            config: AdaBoostConfig::default(),
            weak_learner,
            ensemble: Vec::new(),
            n_feature: 0,
        }
    }


    /// Replace the whole configuration.
    pub fn config(mut self, config: AdaBoostConfig) -> Self {
        self.config = config;
        self
    }


    /// Set the number of rounds. Default is `10`.
    pub fn rounds(mut self, rounds: usize) -> Self {
        self.config.rounds = rounds;
        self
    }


    /// Set the feature selection mode.
    /// Default is [`WeakLearnerTrainingMode::RandomSubset`].
    pub fn mode(mut self, mode: WeakLearnerTrainingMode) -> Self {
        self.config.mode = mode;
        self
    }


    /// Set the time bin width. Default is `14`.
    pub fn channel_count(mut self, channel_count: usize) -> Self {
        self.config.channel_count = channel_count;
        self
    }


    /// Set the weak learner template.
    pub fn weak_learner<V>(self, weak_learner: V) -> AdaBoost<V> {
        AdaBoost::init(weak_learner).config(self.config)
    }


    /// Returns the configuration.
    pub fn configuration(&self) -> &AdaBoostConfig {
        &self.config
    }


    /// Returns the rounds of the last training, in order.
    pub fn ensemble(&self) -> &[BoostRound<W>] {
        &self.ensemble
    }


    /// Returns the number of rounds of the last training.
    pub fn rounds_trained(&self) -> usize {
        self.ensemble.len()
    }
}


impl<W> Validate for AdaBoost<W> {
    fn violations(&self) -> Vec<Violation> {
        self.config.violations()
    }
}


impl<W> BinaryClassifier for AdaBoost<W>
    where W: WeightedClassifier + Clone + Sync,
{
    const NEGATIVE: Label = -1;
    const POSITIVE: Label = 1;


    fn name(&self) -> &str {
        "AdaBoost"
    }


    fn train_binary(&mut self, examples: &[Example], weights: &[f64])
        -> Result<()>
    {
        let booster = Boosting::new(
            &self.config, &self.weak_learner, examples, weights
        );
        let ensemble = booster.run()?;

        info!(rounds = ensemble.len(), "AdaBoost finished");
        self.n_feature = examples[0].len();
        self.ensemble = ensemble;
        Ok(())
    }


    fn predict_binary(&self, example: &Example) -> Result<Prediction> {
        if self.ensemble.is_empty() {
            return Err(ClassifierError::NotTrained);
        }
        example.check_len(self.n_feature)?;

        let mut score = 0.0;
        for round in &self.ensemble {
            let projected = example.with_features(&round.features);
            let label = round.weak_learner.predict(&projected)?.label;
            score += round.alpha * label as f64;
        }

        let label = if score > 0.0 { Self::POSITIVE } else { Self::NEGATIVE };
        Ok(Prediction::new(label, UNRATED_CONFIDENCE))
    }


    fn computes_confidence(&self) -> bool {
        false
    }
}


/// The state of one AdaBoost training run.
pub(crate) struct Boosting<'a, W> {
    config: &'a AdaBoostConfig,
    template: &'a W,
    examples: &'a [Example],
    weights: &'a [f64],

    // Distribution on the examples.
    dist: Vec<f64>,

    rng: StdRng,
    n_feature: usize,

    ensemble: Vec<BoostRound<W>>,
}


impl<'a, W> Boosting<'a, W> {
    pub(crate) fn new(
        config: &'a AdaBoostConfig,
        template: &'a W,
        examples: &'a [Example],
        weights: &'a [f64],
    ) -> Self
    {
        Self {
            config,
            template,
            examples,
            weights,
            dist: Vec::new(),
            rng: StdRng::seed_from_u64(0),
            n_feature: 0,
            ensemble: Vec::new(),
        }
    }


    /// Returns the current distribution on the examples.
    #[cfg(test)]
    pub(crate) fn distribution(&self) -> &[f64] {
        &self.dist
    }


    /// Returns the rounds finished so far.
    #[cfg(test)]
    pub(crate) fn rounds(&self) -> &[BoostRound<W>] {
        &self.ensemble
    }


    /// Reweights the examples after a round with vote `alpha`.
    /// Correctly classified examples lose weight,
    /// misclassified ones gain weight.
    fn update_params(&mut self, correct: &[bool], alpha: f64) {
        // To prevent overflow, take the logarithm.
        self.dist.par_iter_mut()
            .zip(correct)
            .for_each(|(d, &ok)| {
                let margin = if ok { 1.0 } else { -1.0 };
                *d = d.ln() - alpha * margin;
            });

        utils::normalize_log_weights(&mut self.dist);
    }
}


impl<W> Booster for Boosting<'_, W>
    where W: WeightedClassifier + Clone + Sync,
{
    type Output = Vec<BoostRound<W>>;


    fn name(&self) -> &str {
        "AdaBoost"
    }


    fn preprocess(&mut self) -> Result<()> {
        self.config.validate()?;
        checker::weights_match(self.examples.len(), self.weights)?;
        let (n_sample, n_feature) = crate::sample::shape(self.examples)?;
        if n_feature == 0 {
            return Err(ClassifierError::invalid_set(
                "AdaBoost needs at least one feature"
            ));
        }

        if self.weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ClassifierError::invalid_set(
                "example weights must be finite and non-negative"
            ));
        }
        if self.weights.iter().all(|&w| w == 0.0) {
            return Err(ClassifierError::invalid_set(
                "every example weight is zero"
            ));
        }
        self.dist = self.weights.to_vec();
        utils::normalize(&mut self.dist);

        let seed = round_seed(self.config.rounds, n_sample, n_feature);
        self.rng = StdRng::seed_from_u64(seed);
        self.n_feature = n_feature;
        self.ensemble = Vec::with_capacity(self.config.rounds);
        Ok(())
    }


    fn boost(&mut self, iteration: usize) -> Result<ControlFlow<usize>> {
        if self.config.rounds < iteration {
            return Ok(ControlFlow::Break(self.config.rounds));
        }

        let features = self.config.mode.select(
            iteration - 1,
            self.n_feature,
            self.config.channel_count,
            &mut self.rng,
        );
        let projected = self.examples.iter()
            .map(|ex| ex.with_features(&features))
            .collect::<Vec<_>>();

        let mut h = self.template.clone();
        h.train_weighted(&projected, &self.dist)?;

        let correct = projected.par_iter()
            .map(|ex| h.predict(ex).map(|p| p.label == ex.class()))
            .collect::<Result<Vec<bool>>>()?;

        let error = correct.iter()
            .zip(&self.dist)
            .filter_map(|(&ok, &d)| (!ok).then_some(d))
            .sum::<f64>();
        let clamped = error.clamp(MIN_ROUND_ERROR, 1.0 - MIN_ROUND_ERROR);
        if clamped != error {
            warn!(iteration, error, "round error clamped to {clamped}");
        }
        let alpha = 0.5 * ((1.0 - clamped) / clamped).ln();

        debug!(
            booster = self.name(),
            iteration,
            n_features = features.len(),
            error,
            alpha,
            "AdaBoost round"
        );

        self.update_params(&correct, alpha);
        self.ensemble.push(BoostRound { weak_learner: h, features, alpha });

        Ok(ControlFlow::Continue(()))
    }


    fn postprocess(self) -> Self::Output {
        self.ensemble
    }
}
