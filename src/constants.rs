//! Numeric constants shared by the classifiers.

/// Confidence reported by classifiers whose confidence is not meaningful.
pub const UNRATED_CONFIDENCE: f64 = 0.5;

/// Lower clamp on the weighted error of a boosting round.
pub const MIN_ROUND_ERROR: f64 = 1e-6;

/// Relative margin by which a decision stump threshold is pushed
/// outside the observed range when the best cut is at an end.
pub const STUMP_EDGE_MARGIN: f64 = 0.01;

/// Absolute margin added on top of [`STUMP_EDGE_MARGIN`].
pub const STUMP_EDGE_EPSILON: f64 = 1e-10;

/// Number of EEG channels per time bin.
pub const DEFAULT_CHANNEL_COUNT: usize = 14;

/// Smallest allowed convergence tolerance for the Newton iteration.
pub const MIN_NEWTON_DISTANCE: f64 = 2e-15;
