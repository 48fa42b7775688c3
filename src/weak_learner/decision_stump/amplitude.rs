//! A decision stump over the mean absolute amplitude of the signal.
use serde::{Serialize, Deserialize};

use crate::{
    BinaryClassifier,
    Example,
    Label,
    Prediction,
    Result,
    Validate,
    common::checker::Violation,
};

use super::DecisionStump;


/// A [`DecisionStump`] trained on a single derived feature:
/// the mean absolute value of the whole feature vector.
///
/// Useful when the classes differ mostly in signal amplitude,
/// e.g., eyes open versus eyes closed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmplitudeStump {
    stump: DecisionStump,
}


impl AmplitudeStump {
    /// Construct an untrained amplitude stump.
    pub fn new() -> Self {
        Self::default()
    }


    /// Returns the underlying stump, trained on the amplitude feature.
    pub fn stump(&self) -> &DecisionStump {
        &self.stump
    }


    fn amplitude(example: &Example) -> Result<Example> {
        Example::from_vec(example.class(), vec![example.mean_abs()])
    }
}


impl Validate for AmplitudeStump {
    fn violations(&self) -> Vec<Violation> {
        self.stump.violations()
    }
}


impl BinaryClassifier for AmplitudeStump {
    const NEGATIVE: Label = <DecisionStump as BinaryClassifier>::NEGATIVE;
    const POSITIVE: Label = <DecisionStump as BinaryClassifier>::POSITIVE;


    fn name(&self) -> &str {
        "AmplitudeStump"
    }


    fn train_binary(&mut self, examples: &[Example], weights: &[f64])
        -> Result<()>
    {
        let amplitudes = examples.iter()
            .map(Self::amplitude)
            .collect::<Result<Vec<_>>>()?;
        self.stump.train_binary(&amplitudes, weights)
    }


    fn predict_binary(&self, example: &Example) -> Result<Prediction> {
        self.stump.predict_binary(&Self::amplitude(example)?)
    }


    fn computes_confidence(&self) -> bool {
        false
    }
}
