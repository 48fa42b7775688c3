//! Exports the classifiers, their configurations, and the core traits.
//!
pub use crate::{
    // Errors -----------------------------------
    ClassifierError,

    // Data -------------------------------------
    Example,
    FeatureStats,
    Label,
    z_score,

    // Classifier traits and adapters -----------
    Binary,
    BinaryClassifier,
    Classifier,
    Online,
    OnlineBinaryClassifier,
    OnlineClassifier,
    Prediction,
    WeightedClassifier,

    // Configuration ----------------------------
    Validate,
    config_from_json,

    // Algorithms -------------------------------
    AdaBoost,
    AdaBoostConfig,
    WeakLearnerTrainingMode,

    AmplitudeStump,
    DecisionStump,
    DecisionStumpConfig,

    KNearestNeighbors,
    KnnConfig,

    Kernel,
    VotedPerceptron,
    VotedPerceptronConfig,

    LogisticRegression,
    LogisticRegressionConfig,
};
