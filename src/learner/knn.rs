//! Provides the k-nearest-neighbor classifier.
use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::{
    Classifier,
    ClassifierError,
    Example,
    Label,
    OnlineClassifier,
    Prediction,
    Result,
    Validate,
    common::checker::{self, Violation},
    sample,
};


/// Parameters of [`KNearestNeighbors`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnnConfig {
    /// Number of neighbors that vote. Must be at least `1`.
    pub k: usize,
    /// If `true`, each neighbor votes `1 / distance`
    /// instead of `1`.
    pub weighted_voting: bool,
}


impl Default for KnnConfig {
    fn default() -> Self {
        Self { k: 1, weighted_voting: false }
    }
}


impl Validate for KnnConfig {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        checker::at_least(&mut out, "k", self.k as f64, 1.0);
        out
    }
}


/// Classifies a query by a vote among the `k` stored examples
/// with the smallest squared euclidean distance to it.
///
/// Any number of classes is supported.
/// The confidence is the winning vote's share of the total vote.
///
/// With weighted voting, neighbors at distance `0` outvote
/// everything else: if any exist, only they vote, with weight `1`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KNearestNeighbors {
    config: KnnConfig,
    examples: Vec<Example>,
    trained: bool,
}


impl KNearestNeighbors {
    /// Construct an untrained classifier.
    pub fn new(config: KnnConfig) -> Self {
        Self { config, ..Self::default() }
    }


    /// Set the number of neighbors. Default is `1`.
    pub fn k(mut self, k: usize) -> Self {
        self.config.k = k;
        self
    }


    /// Enable or disable distance-weighted voting. Default is `false`.
    pub fn weighted_voting(mut self, weighted: bool) -> Self {
        self.config.weighted_voting = weighted;
        self
    }


    /// Returns the configuration.
    pub fn config(&self) -> &KnnConfig {
        &self.config
    }


    /// Returns the stored examples.
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }


    /// Returns the `k` nearest stored examples as
    /// `(squared distance, index)`, nearest first.
    /// Ties in distance keep the storage order.
    pub fn neighbors(&self, query: &Example) -> Result<Vec<(f64, usize)>> {
        let first = self.examples.first()
            .ok_or(ClassifierError::EmptyNeighborSet)?;
        query.check_len(first.len())?;

        let mut distances = self.examples.par_iter()
            .enumerate()
            .map(|(i, ex)| (ex.squared_distance(query), i))
            .collect::<Vec<_>>();
        distances.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        distances.truncate(self.config.k);
        Ok(distances)
    }


    fn check_dims(&self, examples: &[Example]) -> Result<()> {
        if examples.is_empty() { return Ok(()); }
        let (_, n_feature) = sample::shape(examples)?;
        if let Some(first) = self.examples.first() {
            if first.len() != n_feature {
                return Err(ClassifierError::DimensionMismatch {
                    expected: first.len(), got: n_feature,
                });
            }
        }
        Ok(())
    }
}


impl Classifier for KNearestNeighbors {
    fn train(&mut self, examples: &[Example]) -> Result<()> {
        self.config.validate()?;
        if !examples.is_empty() {
            sample::shape(examples)?;
        }
        self.examples = examples.to_vec();
        self.trained = true;
        debug!(n_examples = self.examples.len(), "k-NN examples stored");
        Ok(())
    }


    fn predict(&self, example: &Example) -> Result<Prediction> {
        if !self.trained {
            return Err(ClassifierError::NotTrained);
        }
        // The builder setters also apply to a trained model.
        self.config.validate()?;
        let neighbors = self.neighbors(example)?;

        let exact = self.config.weighted_voting
            && neighbors.iter().any(|&(d, _)| d == 0.0);

        // Labels in order of first appearance, nearest first.
        let mut votes: Vec<(Label, f64)> = Vec::new();
        for &(dist, i) in &neighbors {
            let vote = match (self.config.weighted_voting, exact) {
                (false, _) => 1.0,
                (true, true) => if dist == 0.0 { 1.0 } else { continue },
                (true, false) => 1.0 / dist,
            };
            let label = self.examples[i].class();
            match votes.iter_mut().find(|(l, _)| *l == label) {
                Some((_, v)) => *v += vote,
                None => votes.push((label, vote)),
            }
        }

        let total = votes.iter().map(|(_, v)| v).sum::<f64>();
        let first = *votes.first()
            .ok_or(ClassifierError::EmptyNeighborSet)?;
        let (label, best) = votes.iter()
            .fold(first, |best, &cur| if cur.1 > best.1 { cur } else { best });

        Ok(Prediction::new(label, best / total))
    }


    fn is_trained(&self) -> bool {
        self.trained
    }


    fn computes_confidence(&self) -> bool {
        true
    }
}


impl OnlineClassifier for KNearestNeighbors {
    fn train_more(&mut self, examples: &[Example]) -> Result<()> {
        self.config.validate()?;
        self.check_dims(examples)?;
        self.examples.extend_from_slice(examples);
        self.trained = true;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ex(class: Label, xs: &[f64]) -> Example {
        Example::new(class, xs).unwrap()
    }

    fn grid() -> Vec<Example> {
        vec![
            ex(1, &[0.0, 0.0]),
            ex(1, &[0.0, 1.0]),
            ex(2, &[5.0, 5.0]),
            ex(2, &[5.0, 6.0]),
            ex(3, &[10.0, 0.0]),
        ]
    }

    #[test]
    fn test_exact_match_with_k_1() {
        let mut knn = KNearestNeighbors::default();
        knn.train(&grid()).unwrap();
        for stored in grid() {
            let p = knn.predict(&stored).unwrap();
            assert_eq!(p.label, stored.class());
            assert_abs_diff_eq!(p.confidence, 1.0);
            assert_eq!(knn.neighbors(&stored).unwrap()[0].0, 0.0);
        }
    }

    #[test]
    fn test_majority_and_confidence() {
        let mut knn = KNearestNeighbors::default().k(3);
        knn.train(&grid()).unwrap();
        let p = knn.predict(&ex(0, &[1.0, 0.5])).unwrap();
        assert_eq!(p.label, 1);
        assert_abs_diff_eq!(p.confidence, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_distance_weighting_changes_the_winner() {
        let examples = vec![
            ex(1, &[1.0]),
            ex(2, &[-3.0]),
            ex(2, &[3.0]),
        ];
        let query = ex(0, &[0.0]);

        let mut plain = KNearestNeighbors::default().k(3);
        plain.train(&examples).unwrap();
        assert_eq!(plain.predict(&query).unwrap().label, 2);

        let mut weighted = KNearestNeighbors::default().k(3).weighted_voting(true);
        weighted.train(&examples).unwrap();
        let p = weighted.predict(&query).unwrap();
        assert_eq!(p.label, 1);
        // votes: 1/1 against 1/9 + 1/9
        assert_abs_diff_eq!(p.confidence, 1.0 / (1.0 + 2.0 / 9.0), epsilon = 1e-12);
    }

    #[test]
    fn test_weighted_exact_match() {
        let mut knn = KNearestNeighbors::default().k(4).weighted_voting(true);
        knn.train(&grid()).unwrap();
        let p = knn.predict(&ex(0, &[10.0, 0.0])).unwrap();
        assert_eq!(p.label, 3);
        assert_abs_diff_eq!(p.confidence, 1.0);
    }

    #[test]
    fn test_k_larger_than_the_set() {
        let mut knn = KNearestNeighbors::default().k(50);
        knn.train(&grid()).unwrap();
        let p = knn.predict(&ex(0, &[0.0, 0.5])).unwrap();
        assert_eq!(p.label, 1);
        assert_abs_diff_eq!(p.confidence, 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_train_more_appends() {
        let mut knn = KNearestNeighbors::default();
        knn.train_more(&grid()[..2]).unwrap();
        assert!(knn.is_trained());
        knn.train_more(&grid()[2..]).unwrap();
        assert_eq!(knn.examples().len(), 5);
        assert_eq!(knn.predict(&ex(0, &[9.0, 0.0])).unwrap().label, 3);

        assert!(matches!(
            knn.train_more(&[ex(1, &[1.0])]),
            Err(ClassifierError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_train_replaces() {
        let mut knn = KNearestNeighbors::default();
        knn.train(&grid()).unwrap();
        knn.train(&[ex(7, &[0.0, 0.0])]).unwrap();
        assert_eq!(knn.examples().len(), 1);
        assert_eq!(knn.predict(&ex(0, &[5.0, 5.0])).unwrap().label, 7);
    }

    #[test]
    fn test_lifecycle_errors() {
        let knn = KNearestNeighbors::default();
        assert!(matches!(
            knn.predict(&ex(0, &[0.0])),
            Err(ClassifierError::NotTrained)
        ));

        let mut empty = KNearestNeighbors::default();
        empty.train(&[]).unwrap();
        assert!(matches!(
            empty.predict(&ex(0, &[0.0])),
            Err(ClassifierError::EmptyNeighborSet)
        ));

        let mut bad = KNearestNeighbors::default().k(0);
        assert!(matches!(
            bad.train(&grid()),
            Err(ClassifierError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_k_zero_after_training_is_an_error() {
        let mut knn = KNearestNeighbors::default();
        knn.train(&grid()).unwrap();
        let knn = knn.k(0);
        assert!(knn.is_trained());
        assert!(matches!(
            knn.predict(&ex(0, &[0.0, 0.0])),
            Err(ClassifierError::InvalidParameters(_))
        ));
    }
}
