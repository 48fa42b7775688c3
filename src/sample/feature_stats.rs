//! Per-feature statistics for z-score normalization.
use serde::{Serialize, Deserialize};

use crate::{ClassifierError, Example, Result};


/// Mean and standard deviation of every feature
/// over a reference set of examples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    /// Mean of each feature.
    pub means: Vec<f64>,
    /// Population standard deviation of each feature.
    pub std_devs: Vec<f64>,
}


impl FeatureStats {
    /// Compute the statistics of `examples`.
    /// Every example must have the same number of features.
    pub fn from_examples(examples: &[Example]) -> Result<Self> {
        let first = examples.first()
            .ok_or_else(|| ClassifierError::invalid_set("no examples"))?;
        let n_feature = first.len();
        let n_sample = examples.len() as f64;

        let mut means = vec![0.0; n_feature];
        for ex in examples {
            ex.check_len(n_feature)?;
            means.iter_mut()
                .zip(ex.iter())
                .for_each(|(m, x)| *m += x);
        }
        means.iter_mut().for_each(|m| *m /= n_sample);

        let mut std_devs = vec![0.0; n_feature];
        for ex in examples {
            std_devs.iter_mut()
                .zip(ex.iter().zip(&means))
                .for_each(|(s, (x, m))| *s += (x - m).powi(2));
        }
        std_devs.iter_mut().for_each(|s| *s = (*s / n_sample).sqrt());

        Ok(Self { means, std_devs })
    }


    /// Z-score a single example with these statistics.
    pub fn apply(&self, example: &Example) -> Result<Example> {
        example.z_scored(&self.means, &self.std_devs)
    }


    /// Z-score every example.
    pub fn apply_all(&self, examples: &[Example]) -> Result<Vec<Example>> {
        examples.iter()
            .map(|ex| self.apply(ex))
            .collect()
    }
}


/// Z-score `examples` with their own statistics.
/// Returns the normalized examples together with the statistics,
/// so that held-out examples can be normalized the same way.
pub fn z_score(examples: &[Example]) -> Result<(Vec<Example>, FeatureStats)> {
    let stats = FeatureStats::from_examples(examples)?;
    let normalized = stats.apply_all(examples)?;
    Ok((normalized, stats))
}
