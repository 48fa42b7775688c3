//! Provides the kernelized voted perceptron.
use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use crate::{
    BinaryClassifier,
    ClassifierError,
    Example,
    Kernel,
    Label,
    OnlineBinaryClassifier,
    Prediction,
    Result,
    Validate,
    common::checker::{self, Violation},
    constants::UNRATED_CONFIDENCE,
};


/// Parameters of [`VotedPerceptron`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VotedPerceptronConfig {
    /// Transform applied to every inner product.
    pub kernel: Kernel,
    /// Number of passes over the training examples.
    pub epochs: usize,
}


impl Default for VotedPerceptronConfig {
    fn default() -> Self {
        Self { kernel: Kernel::Basic, epochs: 1 }
    }
}


impl Validate for VotedPerceptronConfig {
    fn violations(&self) -> Vec<Violation> {
        let mut out = self.kernel.violations();
        checker::at_least(&mut out, "epochs", self.epochs as f64, 1.0);
        out
    }
}


/// The voted perceptron of Freund & Schapire (1999)
/// with a scalar kernel on the inner product.
///
/// Instead of storing every intermediate perceptron,
/// the model stores the sequence of mistakes.
/// The `i`th perceptron is the sum of `label * features` over
/// the first `i` mistakes, and it votes with the total weight of
/// the examples it classified correctly.
/// Entry `0` of the mistake list is a zero vector standing for the
/// initial, all-zero perceptron.
///
/// Labels are `-1` and `+1`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VotedPerceptron {
    config: VotedPerceptronConfig,

    // Mistakes, with the zero padding entry at index 0.
    mistakes: Vec<Example>,

    // Vote of the perceptron after the `i`th mistake.
    weights: Vec<f64>,

    // The current perceptron, as an explicit vector.
    perceptron: Vec<f64>,

    // Total weight of every processed example.
    confidence_range: f64,
}


impl VotedPerceptron {
    /// Construct an untrained perceptron.
    pub fn new(config: VotedPerceptronConfig) -> Self {
        Self { config, ..Self::default() }
    }


    /// Set the kernel. Default is [`Kernel::Basic`].
    pub fn kernel(mut self, kernel: Kernel) -> Self {
        self.config.kernel = kernel;
        self
    }


    /// Set the number of passes. Default is `1`.
    pub fn epochs(mut self, epochs: usize) -> Self {
        self.config.epochs = epochs;
        self
    }


    /// Returns the configuration.
    pub fn config(&self) -> &VotedPerceptronConfig {
        &self.config
    }


    /// Returns the number of mistakes made during training.
    pub fn n_mistakes(&self) -> usize {
        self.mistakes.len().saturating_sub(1)
    }


    /// Returns the total weight of all processed examples.
    pub fn confidence_range(&self) -> f64 {
        self.confidence_range
    }


    fn reset(&mut self, n_feature: usize) -> Result<()> {
        let zero = Example::from_vec(0, vec![0.0; n_feature])?;
        self.mistakes = vec![zero];
        self.weights = vec![0.0];
        self.perceptron = vec![0.0; n_feature];
        self.confidence_range = 0.0;
        Ok(())
    }


    fn run_epochs(&mut self, examples: &[Example], weights: &[f64]) {
        for epoch in 0..self.config.epochs {
            let before = self.mistakes.len();
            for (ex, &w) in examples.iter().zip(weights) {
                self.step(ex, w);
            }
            debug!(
                epoch,
                new_mistakes = self.mistakes.len() - before,
                "voted perceptron epoch finished"
            );
        }

        if self.confidence_range == 0.0 {
            warn!("all training weights are zero; confidence is not available");
        }
    }


    fn step(&mut self, example: &Example, weight: f64) {
        let y = example.class() as f64;
        let ip = self.config.kernel.apply(
            example.iter()
                .zip(&self.perceptron)
                .map(|(x, p)| x * p)
                .sum::<f64>()
        );

        if ip * y > 0.0 {
            if let Some(last) = self.weights.last_mut() {
                *last += weight;
            }
        } else {
            self.perceptron.iter_mut()
                .zip(example.iter())
                .for_each(|(p, x)| *p += y * x);
            self.mistakes.push(example.clone());
            self.weights.push(weight);
        }
        self.confidence_range += weight;
    }


    /// The weighted vote of every perceptron on `example`.
    ///
    /// The inner product of the `i`th perceptron with the query is
    /// the inner product of the `i - 1`th one
    /// plus `label_i * (mistake_i . query)`,
    /// so each mistake is touched once.
    fn vote(&self, example: &Example) -> f64 {
        let mut acc = 0.0;
        self.mistakes.iter()
            .zip(&self.weights)
            .map(|(mistake, &w)| {
                acc += mistake.class() as f64 * mistake.dot(example);
                w * self.config.kernel.apply(acc)
            })
            .sum()
    }


    fn check_trained(&self, example: &Example) -> Result<()> {
        if self.mistakes.is_empty() {
            return Err(ClassifierError::NotTrained);
        }
        example.check_len(self.perceptron.len())
    }
}


impl Validate for VotedPerceptron {
    fn violations(&self) -> Vec<Violation> {
        self.config.violations()
    }
}


impl BinaryClassifier for VotedPerceptron {
    const NEGATIVE: Label = -1;
    const POSITIVE: Label = 1;


    fn name(&self) -> &str {
        "VotedPerceptron"
    }


    fn train_binary(&mut self, examples: &[Example], weights: &[f64])
        -> Result<()>
    {
        self.reset(examples[0].len())?;
        self.run_epochs(examples, weights);
        Ok(())
    }


    fn predict_binary(&self, example: &Example) -> Result<Prediction> {
        self.check_trained(example)?;
        let vote = self.vote(example);

        let label = if vote > 0.0 {
            Self::POSITIVE
        } else if vote < 0.0 {
            Self::NEGATIVE
        } else {
            // Fall back to the majority label among the mistakes.
            let positives = self.mistakes.iter()
                .skip(1)
                .filter(|m| m.class() == Self::POSITIVE)
                .count();
            if 2 * positives > self.n_mistakes() {
                Self::POSITIVE
            } else {
                Self::NEGATIVE
            }
        };

        let confidence = if self.confidence_range > 0.0 {
            let range = self.confidence_range;
            ((vote.abs() + range) / (2.0 * range)).min(1.0)
        } else {
            UNRATED_CONFIDENCE
        };

        Ok(Prediction::new(label, confidence))
    }


    fn computes_confidence(&self) -> bool {
        false
    }
}


impl OnlineBinaryClassifier for VotedPerceptron {
    fn train_more_binary(&mut self, examples: &[Example], weights: &[f64])
        -> Result<()>
    {
        if self.mistakes.is_empty() {
            return self.train_binary(examples, weights);
        }
        examples[0].check_len(self.perceptron.len())?;
        self.run_epochs(examples, weights);
        Ok(())
    }
}
