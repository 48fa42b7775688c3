//! Provides the ridge-penalized logistic regression.
use nalgebra::{DMatrix, DVector};
use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use crate::{
    BinaryClassifier,
    ClassifierError,
    Example,
    Label,
    Prediction,
    Result,
    Validate,
    common::checker::{self, Violation},
    common::utils,
    constants::MIN_NEWTON_DISTANCE,
};


/// Parameters of [`LogisticRegression`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticRegressionConfig {
    /// Ridge penalty on every coefficient except the bias.
    /// Must be in `[0, 1]`.
    pub lambda: f64,
    /// The iteration stops once no coefficient moves by more than this.
    pub min_distance: f64,
    /// Upper bound on the number of Newton steps.
    pub max_iterations: usize,
}


impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            lambda: 1e-4,
            min_distance: 1e-6,
            max_iterations: 100,
        }
    }
}


impl Validate for LogisticRegressionConfig {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        checker::at_least(&mut out, "lambda", self.lambda, 0.0);
        checker::at_most(&mut out, "lambda", self.lambda, 1.0);
        checker::at_least(
            &mut out, "min_distance", self.min_distance, MIN_NEWTON_DISTANCE
        );
        checker::at_least(
            &mut out, "max_iterations", self.max_iterations as f64, 1.0
        );
        out
    }
}


/// Logistic regression with a Tikhonov (ridge) penalty,
/// fitted by Newton-Raphson (iteratively reweighted least squares).
///
/// Each step solves
/// ```txt
/// H delta = g,
/// g = X (c * (d - p)) - lambda I' w,
/// H = X diag(c * p * (1 - p)) X^T + lambda I',
/// ```
/// where the columns of `X` are the examples with a trailing `1`,
/// `d` the `{0, 1}` labels, `p` the current probabilities,
/// `c` the example weights,
/// and `I'` the identity without its bias entry.
/// The iteration stops when the step is below `min_distance`,
/// after `max_iterations` steps, or when `H` is singular,
/// keeping the last weights it computed.
///
/// Labels are `0` and `1`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogisticRegression {
    config: LogisticRegressionConfig,
    // `n_feature + 1` coefficients, the bias last.
    weights: Vec<f64>,
    iterations: usize,
    converged: bool,
}


impl LogisticRegression {
    /// Construct an untrained model.
    pub fn new(config: LogisticRegressionConfig) -> Self {
        Self { config, ..Self::default() }
    }


    /// Set the ridge penalty. Default is `1e-4`.
    pub fn lambda(mut self, lambda: f64) -> Self {
        self.config.lambda = lambda;
        self
    }


    /// Set the convergence tolerance. Default is `1e-6`.
    pub fn min_distance(mut self, min_distance: f64) -> Self {
        self.config.min_distance = min_distance;
        self
    }


    /// Set the maximal number of Newton steps. Default is `100`.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }


    /// Returns the configuration.
    pub fn config(&self) -> &LogisticRegressionConfig {
        &self.config
    }


    /// Returns the fitted coefficients, the bias last.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }


    /// Returns the number of Newton steps taken by the last training.
    pub fn iterations(&self) -> usize {
        self.iterations
    }


    /// Returns `true` if the last training stopped because
    /// the step fell below `min_distance`.
    pub fn converged(&self) -> bool {
        self.converged
    }


    /// Probability of the positive class.
    pub fn probability(&self, example: &Example) -> Result<f64> {
        if self.weights.is_empty() {
            return Err(ClassifierError::NotTrained);
        }
        let n_feature = self.weights.len() - 1;
        example.check_len(n_feature)?;

        let z = example.iter()
            .zip(&self.weights)
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.weights[n_feature];
        Ok(utils::logistic(z))
    }


    /// One Newton step from `w`.
    /// Returns `None` if the Hessian is not positive definite.
    fn newton_step(
        &self,
        x: &DMatrix<f64>,
        targets: &DVector<f64>,
        costs: &DVector<f64>,
        w: &DVector<f64>,
    ) -> Option<DVector<f64>>
    {
        let dim = x.nrows();
        let lambda = self.config.lambda;

        let p = (x.transpose() * w).map(utils::logistic);

        let residual = DVector::from_fn(p.len(), |i, _| {
            costs[i] * (targets[i] - p[i])
        });
        let penalty = DVector::from_fn(dim, |r, _| {
            if r + 1 < dim { lambda * w[r] } else { 0.0 }
        });
        let gradient = x * residual - penalty;

        let mut scaled = x.clone();
        for (j, mut col) in scaled.column_iter_mut().enumerate() {
            col *= costs[j] * p[j] * (1.0 - p[j]);
        }
        let mut hessian = scaled * x.transpose();
        for r in 0..dim - 1 {
            hessian[(r, r)] += lambda;
        }

        let delta = hessian.cholesky()?.solve(&gradient);
        delta.iter().all(|v| v.is_finite()).then_some(delta)
    }
}


impl Validate for LogisticRegression {
    fn violations(&self) -> Vec<Violation> {
        self.config.violations()
    }
}


impl BinaryClassifier for LogisticRegression {
    const NEGATIVE: Label = 0;
    const POSITIVE: Label = 1;


    fn name(&self) -> &str {
        "LogisticRegression"
    }


    fn train_binary(&mut self, examples: &[Example], weights: &[f64])
        -> Result<()>
    {
        let n_sample = examples.len();
        let n_feature = examples[0].len();

        let x = DMatrix::from_fn(n_feature + 1, n_sample, |r, c| {
            if r < n_feature { examples[c].value_at(r) } else { 1.0 }
        });
        let targets = DVector::from_fn(n_sample, |i, _| {
            if examples[i].class() == Self::POSITIVE { 1.0 } else { 0.0 }
        });
        let costs = DVector::from_column_slice(weights);

        let mut w = DVector::<f64>::zeros(n_feature + 1);
        self.iterations = 0;
        self.converged = false;

        for iteration in 1..=self.config.max_iterations {
            let Some(delta) = self.newton_step(&x, &targets, &costs, &w) else {
                warn!(iteration, "singular Hessian, keeping the last weights");
                break;
            };
            w += &delta;
            self.iterations = iteration;

            let distance = delta.amax();
            debug!(iteration, distance, "newton step");
            if distance < self.config.min_distance {
                self.converged = true;
                break;
            }
        }

        self.weights = w.iter().copied().collect();
        Ok(())
    }


    fn predict_binary(&self, example: &Example) -> Result<Prediction> {
        let p1 = self.probability(example)?;
        let prediction = if p1 >= 0.5 {
            Prediction::new(Self::POSITIVE, p1)
        } else {
            Prediction::new(Self::NEGATIVE, 1.0 - p1)
        };
        Ok(prediction)
    }


    fn computes_confidence(&self) -> bool {
        true
    }
}
