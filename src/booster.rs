//! Provides the boosting algorithms.

mod core;

mod adaboost;


/// Booster trait
pub use self::core::Booster;

pub use self::adaboost::{
    AdaBoost,
    AdaBoostConfig,
    BoostRound,
    WeakLearnerTrainingMode,
    n_time_bins,
    round_seed,
    time_bin,
};
