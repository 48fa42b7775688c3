//! Provides the decision stump learner.
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::{
    BinaryClassifier,
    ClassifierError,
    Example,
    Label,
    Prediction,
    Result,
    Validate,
    common::checker::Violation,
    constants::{
        STUMP_EDGE_EPSILON,
        STUMP_EDGE_MARGIN,
        UNRATED_CONFIDENCE,
    },
};

use super::{PositiveSide, StumpRule};


/// Parameters of [`DecisionStump`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionStumpConfig {
    /// Index of the feature the stump thresholds.
    /// An index past the last feature falls back to `0`.
    pub feature: usize,
}


impl Validate for DecisionStumpConfig {
    fn violations(&self) -> Vec<Violation> {
        Vec::new()
    }
}


/// A single-feature weighted threshold classifier.
///
/// Training sorts the examples by the chosen feature and
/// sweeps every cut point once, keeping running sums of the
/// negative and positive weight below the cut.
/// For each cut it scores both polarities
/// (negatives below / negatives above)
/// and keeps the first cut with the strictly smallest weighted error.
///
/// Labels are `-1` (negative) and `+1` (positive);
/// wrap it in [`Binary`](crate::Binary) for arbitrary labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionStump {
    config: DecisionStumpConfig,
    rule: Option<StumpRule>,
    n_feature: usize,
    weighted_error: f64,
}


impl DecisionStump {
    /// Construct an untrained stump.
    pub fn new(config: DecisionStumpConfig) -> Self {
        Self { config, ..Self::default() }
    }


    /// Set the feature index. Default is `0`.
    pub fn feature(mut self, feature: usize) -> Self {
        self.config.feature = feature;
        self
    }


    /// Returns the configuration.
    pub fn config(&self) -> &DecisionStumpConfig {
        &self.config
    }


    /// Returns the learned rule, if trained.
    pub fn rule(&self) -> Option<&StumpRule> {
        self.rule.as_ref()
    }


    /// Returns the weighted training error of the learned rule,
    /// relative to the total training weight.
    pub fn weighted_error(&self) -> f64 {
        self.weighted_error
    }
}


// The cut that leaves the first `below` sorted examples under the threshold.
struct Cut {
    error: f64,
    below: usize,
    positive_side: PositiveSide,
}


/// Sweep every cut of `sorted` and return the best one.
/// `sorted` holds `(value, is_positive, weight)` in ascending value order.
fn best_cut(sorted: &[(f64, bool, f64)]) -> Cut {
    let (total_neg, total_pos) = sorted.iter()
        .fold((0.0, 0.0), |(n, p), &(_, pos, w)| {
            if pos { (n, p + w) } else { (n + w, p) }
        });

    let mut best = Cut {
        error: f64::INFINITY,
        below: 0,
        positive_side: PositiveSide::RHS,
    };

    let mut neg_below = 0.0;
    let mut pos_below = 0.0;
    for below in 0..=sorted.len() {
        // Cuts between equal values cannot be realized by a threshold.
        let splits_tie = below > 0
            && below < sorted.len()
            && sorted[below - 1].0 == sorted[below].0;

        if !splits_tie {
            // Negatives below, positives above.
            let rhs = pos_below + (total_neg - neg_below);
            if rhs < best.error {
                best = Cut { error: rhs, below, positive_side: PositiveSide::RHS };
            }
            // Positives below, negatives above.
            let lhs = neg_below + (total_pos - pos_below);
            if lhs < best.error {
                best = Cut { error: lhs, below, positive_side: PositiveSide::LHS };
            }
        }

        if let Some(&(_, pos, w)) = sorted.get(below) {
            if pos { pos_below += w; } else { neg_below += w; }
        }
    }

    best
}


/// Place the threshold for a cut leaving `below` examples under it.
fn threshold_at(sorted: &[(f64, bool, f64)], below: usize) -> f64 {
    let n = sorted.len();
    if below == 0 {
        let min = sorted[0].0;
        min - min.abs() * STUMP_EDGE_MARGIN - STUMP_EDGE_EPSILON
    } else if below == n {
        let max = sorted[n - 1].0;
        max + max.abs() * STUMP_EDGE_MARGIN + STUMP_EDGE_EPSILON
    } else {
        (sorted[below - 1].0 + sorted[below].0) / 2.0
    }
}


impl Validate for DecisionStump {
    fn violations(&self) -> Vec<Violation> {
        self.config.violations()
    }
}


impl BinaryClassifier for DecisionStump {
    const NEGATIVE: Label = -1;
    const POSITIVE: Label = 1;


    fn name(&self) -> &str {
        "DecisionStump"
    }


    fn train_binary(&mut self, examples: &[Example], weights: &[f64])
        -> Result<()>
    {
        let n_feature = examples[0].len();
        if n_feature == 0 {
            return Err(ClassifierError::invalid_set("examples have no feature"));
        }
        let feature_index = if self.config.feature < n_feature {
            self.config.feature
        } else {
            0
        };

        let mut sorted = examples.iter()
            .zip(weights)
            .map(|(ex, &w)| {
                (ex.value_at(feature_index), ex.class() == Self::POSITIVE, w)
            })
            .collect::<Vec<_>>();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let cut = best_cut(&sorted);
        let threshold = threshold_at(&sorted, cut.below);

        let total = weights.iter().sum::<f64>();
        self.weighted_error = if total > 0.0 { cut.error / total } else { 0.0 };
        self.n_feature = n_feature;
        self.rule = Some(StumpRule {
            threshold,
            feature_index,
            positive_side: cut.positive_side,
        });

        debug!(
            feature_index,
            threshold,
            weighted_error = self.weighted_error,
            "decision stump fitted"
        );
        Ok(())
    }


    fn predict_binary(&self, example: &Example) -> Result<Prediction> {
        let rule = self.rule.as_ref().ok_or(ClassifierError::NotTrained)?;
        example.check_len(self.n_feature)?;

        let label = if rule.is_positive(example) {
            Self::POSITIVE
        } else {
            Self::NEGATIVE
        };
        Ok(Prediction::new(label, UNRATED_CONFIDENCE))
    }


    fn computes_confidence(&self) -> bool {
        false
    }
}
