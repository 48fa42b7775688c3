//! Defines `AdaBoost`.
//! This struct is based on the book: 
//! [Boosting: Foundations and Algorithms](https://direct.mit.edu/books/oa-monograph/5342/BoostingFoundations-and-Algorithms)
//! by Robert E. Schapire and Yoav Freund.
pub mod adaboost_algorithm;
pub mod feature_selection;

pub use adaboost_algorithm::{AdaBoost, AdaBoostConfig, BoostRound, round_seed};
pub use feature_selection::{WeakLearnerTrainingMode, n_time_bins, time_bin};
