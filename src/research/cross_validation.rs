use rand::prelude::*;
use colored::Colorize;

use crate::{
    Example,
    Validate,
    common::checker::{self, Violation},
};

use std::iter::Iterator;

const WIDTH: usize = 9;

/// A struct that generates
/// pairs of training/test examples for `k`-fold cross validation.
/// Fold `i` holds out the `i`th contiguous block of the (shuffled) index
/// order; the block sizes differ by at most one.
///
/// # Example
/// ```
/// use eeg_classify::prelude::*;
/// use eeg_classify::research::{CrossValidation, accuracy};
///
/// let examples = (0..20)
///     .map(|i| Example::new(i % 2, &[(i % 2) as f64 * 10.0]).unwrap())
///     .collect::<Vec<_>>();
///
/// let cv = CrossValidation::new(&examples)
///     .n_folds(4)
///     .seed(777)
///     .shuffle();
/// assert!(cv.validate().is_ok());
///
/// for (train, test) in cv {
///     let mut knn = KNearestNeighbors::default();
///     knn.train(&train).unwrap();
///     assert_eq!(accuracy(&knn, &test).unwrap(), 1.0);
/// }
/// ```
pub struct CrossValidation<'a> {
    current_fold: usize,
    n_folds: usize,
    seed: u64,
    examples: &'a [Example],
    ix: Vec<usize>,
    verbose: bool,
}


impl<'a> CrossValidation<'a> {
    /// Construct a new instance of `CrossValidation.`
    #[inline]
    pub fn new(examples: &'a [Example]) -> Self {
        let ix = (0..examples.len()).collect::<Vec<_>>();
        Self {
            current_fold: 0,
            n_folds: 5,
            seed: 1234,
            verbose: false,
            examples,
            ix,
        }
    }


    /// Set the number of folds.
    /// Default value is `5.`
    #[inline]
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }


    /// Set the seed of the randomness for shuffling.
    /// Default vaule is `1234.`
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the verbose parameter.
    /// If `true`, `CrossValidation` prints the fold sizes
    /// when generating a train/test pair.
    /// Default vaule is `false.`
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Shuffle the examples.
    /// By default, `CrossValidation` does not shuffle the examples.
    #[inline]
    pub fn shuffle(mut self) -> Self {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.ix.shuffle(&mut rng);
        self
    }


    /// Returns the training/test examples for `i`th fold.
    #[inline]
    fn fold_at(&self, i: usize) -> (Vec<Example>, Vec<Example>) {
        let n = self.examples.len();
        let (start, end) = (i * n / self.n_folds, (i + 1) * n / self.n_folds);

        let mut train = Vec::with_capacity(n - (end - start));
        let mut test = Vec::with_capacity(end - start);
        for (pos, &k) in self.ix.iter().enumerate() {
            let ex = self.examples[k].clone();
            if (start..end).contains(&pos) {
                test.push(ex);
            } else {
                train.push(ex);
            }
        }
        (train, test)
    }
}


impl Validate for CrossValidation<'_> {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        checker::at_least(&mut out, "n_folds", self.n_folds as f64, 2.0);
        checker::at_most(
            &mut out, "n_folds", self.n_folds as f64, self.examples.len() as f64
        );
        out
    }
}


impl Iterator for CrossValidation<'_> {
    type Item = (Vec<Example>, Vec<Example>);
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_fold >= self.n_folds { return None; }

        let output = self.fold_at(self.current_fold);
        self.current_fold += 1;

        if self.verbose {
            let train_size = output.0.len();
            let test_size = output.1.len();
            println!(
                "{}    {}    {}",
                format!("  [{: >3}'th fold]", self.current_fold).bold().red(),
                format!("[TRAIN {:>WIDTH$}]", train_size).bold().green(),
                format!("[TEST {:>WIDTH$}]", test_size).bold().yellow(),
            );
        }

        Some(output)
    }
}
