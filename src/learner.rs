//! Stand-alone classifiers:
//! k-nearest-neighbor, the voted perceptron,
//! and penalized logistic regression.

pub mod knn;
pub mod voted_perceptron;
pub mod logistic_regression;

pub use knn::{KNearestNeighbors, KnnConfig};
pub use voted_perceptron::{VotedPerceptron, VotedPerceptronConfig};
pub use logistic_regression::{LogisticRegression, LogisticRegressionConfig};
