//! Synthetic EEG-like data shared by the integration tests.
#![allow(dead_code)]

use rand::prelude::*;
use rand_distr::Normal;

use eeg_classify::prelude::*;


/// Two balanced Gaussian clusters centered at `-1` and `+1`
/// on every feature, labeled `negative` and `positive`.
pub fn gaussian_clusters(
    n_examples: usize,
    n_feature: usize,
    noise: f64,
    labels: (Label, Label),
    seed: u64,
) -> Vec<Example>
{
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::<f64>::new(0.0, noise).unwrap();

    (0..n_examples)
        .map(|i| {
            let (class, center) = if i % 2 == 0 {
                (labels.0, -1.0)
            } else {
                (labels.1, 1.0)
            };
            let features = (0..n_feature)
                .map(|_| center + dist.sample(&mut rng))
                .collect::<Vec<_>>();
            Example::from_vec(class, features).unwrap()
        })
        .collect()
}


/// Fraction of `examples` predicted correctly.
pub fn accuracy<C: Classifier>(clf: &C, examples: &[Example]) -> f64 {
    eeg_classify::research::accuracy(clf, examples).unwrap()
}


/// Install a `tracing` subscriber that writes to the test output.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
