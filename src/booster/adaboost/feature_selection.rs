//! Feature subsets offered to the weak learner in each boosting round.
use rand::Rng;
use rand::seq::index;
use serde::{Serialize, Deserialize};

use std::ops::Range;


/// How [`AdaBoost`](crate::AdaBoost) picks the features
/// the weak learner of a round may look at.
///
/// A *time bin* is a contiguous block of `channel_count` columns,
/// i.e., one sampling window across all EEG channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeakLearnerTrainingMode {
    /// Every feature.
    AllFeatures,
    /// One feature chosen at random.
    RandomFeature,
    /// Feature `round % n_feature`.
    SequentialFeature,
    /// A random number of distinct random features.
    #[default]
    RandomSubset,
    /// One time bin chosen at random.
    RandomTimeBin,
    /// Time bin `round % n_bins`.
    SequentialTimeBin,
}


/// Number of time bins over `n_feature` columns.
/// A trailing partial bin counts as a bin.
#[inline]
pub fn n_time_bins(n_feature: usize, channel_count: usize) -> usize {
    (n_feature + channel_count - 1) / channel_count
}


/// The columns of time bin `bin`.
/// The last bin is truncated at `n_feature`.
#[inline]
pub fn time_bin(bin: usize, n_feature: usize, channel_count: usize)
    -> Range<usize>
{
    let start = bin * channel_count;
    start..(start + channel_count).min(n_feature)
}


impl WeakLearnerTrainingMode {
    /// Returns the sorted feature indices for round `round`
    /// (counted from `0`).
    /// The result is never empty as long as
    /// `n_feature > 0` and `channel_count > 0`.
    pub fn select<R: Rng>(
        &self,
        round: usize,
        n_feature: usize,
        channel_count: usize,
        rng: &mut R,
    ) -> Vec<usize>
    {
        match self {
            Self::AllFeatures => (0..n_feature).collect(),
            Self::RandomFeature => vec![rng.gen_range(0..n_feature)],
            Self::SequentialFeature => vec![round % n_feature],
            Self::RandomSubset => {
                let size = rng.gen_range(1..=n_feature);
                let mut ix = index::sample(rng, n_feature, size).into_vec();
                ix.sort_unstable();
                ix
            },
            Self::RandomTimeBin => {
                let n_bins = n_time_bins(n_feature, channel_count);
                let bin = rng.gen_range(0..n_bins);
                time_bin(bin, n_feature, channel_count).collect()
            },
            Self::SequentialTimeBin => {
                let n_bins = n_time_bins(n_feature, channel_count);
                time_bin(round % n_bins, n_feature, channel_count).collect()
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_bins_on_exact_multiple() {
        assert_eq!(n_time_bins(28, 14), 2);
        assert_eq!(time_bin(0, 28, 14), 0..14);
        assert_eq!(time_bin(1, 28, 14), 14..28);
    }

    #[test]
    fn test_last_bin_is_truncated() {
        assert_eq!(n_time_bins(30, 14), 3);
        assert_eq!(time_bin(2, 30, 14), 28..30);
        assert_eq!(n_time_bins(5, 14), 1);
        assert_eq!(time_bin(0, 5, 14), 0..5);
    }

    #[test]
    fn test_sequential_modes_cycle() {
        let mut rng = StdRng::seed_from_u64(0);
        let mode = WeakLearnerTrainingMode::SequentialFeature;
        let picks = (0..7)
            .map(|r| mode.select(r, 3, 14, &mut rng)[0])
            .collect::<Vec<_>>();
        assert_eq!(picks, vec![0, 1, 2, 0, 1, 2, 0]);

        let mode = WeakLearnerTrainingMode::SequentialTimeBin;
        assert_eq!(mode.select(0, 30, 14, &mut rng), (0..14).collect::<Vec<_>>());
        assert_eq!(mode.select(2, 30, 14, &mut rng), vec![28, 29]);
        assert_eq!(mode.select(3, 30, 14, &mut rng), (0..14).collect::<Vec<_>>());
    }

    #[test]
    fn test_random_modes_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for round in 0..200 {
            let one = WeakLearnerTrainingMode::RandomFeature
                .select(round, 5, 2, &mut rng);
            assert_eq!(one.len(), 1);
            assert!(one[0] < 5);

            let subset = WeakLearnerTrainingMode::RandomSubset
                .select(round, 5, 2, &mut rng);
            assert!(!subset.is_empty() && subset.len() <= 5);
            assert!(subset.windows(2).all(|w| w[0] < w[1]));
            assert!(subset.iter().all(|&j| j < 5));

            let bin = WeakLearnerTrainingMode::RandomTimeBin
                .select(round, 5, 2, &mut rng);
            assert!(bin == vec![0, 1] || bin == vec![2, 3] || bin == vec![4]);
        }
    }

    #[test]
    fn test_all_features() {
        let mut rng = StdRng::seed_from_u64(1);
        let all = WeakLearnerTrainingMode::AllFeatures.select(3, 4, 14, &mut rng);
        assert_eq!(all, vec![0, 1, 2, 3]);
    }
}
