//! Defines [`Example`], a labeled feature vector.
use serde::{Serialize, Deserialize};

use std::sync::Arc;

use crate::{ClassifierError, Result};


/// Class label of an [`Example`].
pub type Label = i32;


/// An immutable `(label, feature vector)` pair.
///
/// The feature values live in shared storage.
/// [`Example::with_class`] and [`Example::with_features`]
/// reuse that storage instead of copying it,
/// so examples are cheap to clone and to pass around.
///
/// # Example
/// ```
/// use eeg_classify::prelude::*;
///
/// let ex = Example::new(1, &[0.5, -2.0, 3.0]).unwrap();
/// let relabeled = ex.with_class(-1);
/// assert!(relabeled.shares_storage(&ex));
///
/// let projected = ex.with_features(&[2, 0]);
/// assert_eq!(projected.to_vec(), vec![3.0, 0.5]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    class: Label,
    storage: Arc<[f64]>,
    // `None` means every value of `storage`, in order.
    view: Option<Arc<[usize]>>,
}


impl Example {
    /// Construct a new example from a copy of `features`.
    /// Returns `Err` if a value is NaN or infinite.
    pub fn new(class: Label, features: &[f64]) -> Result<Self> {
        Self::from_vec(class, features.to_vec())
    }


    /// Construct a new example, taking ownership of `features`.
    pub fn from_vec(class: Label, features: Vec<f64>) -> Result<Self> {
        if let Some((index, &value)) = features.iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(ClassifierError::NonFiniteFeature { index, value });
        }

        Ok(Self { class, storage: features.into(), view: None })
    }


    /// Returns the class label.
    #[inline]
    pub fn class(&self) -> Label {
        self.class
    }


    /// Returns the number of features.
    #[inline]
    pub fn len(&self) -> usize {
        match &self.view {
            Some(ix) => ix.len(),
            None => self.storage.len(),
        }
    }


    /// Returns `true` if the example has no feature.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// Returns the `i`th feature value.
    /// Panics if `i >= self.len()`.
    #[inline]
    pub fn value_at(&self, i: usize) -> f64 {
        match &self.view {
            Some(ix) => self.storage[ix[i]],
            None => self.storage[i],
        }
    }


    /// Iterate over the feature values.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.value_at(i))
    }


    /// Copy the feature values into a new vector.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }


    /// Returns `true` if `self` and `other` read
    /// the same underlying feature storage.
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }


    /// Returns a copy of `self` with label `class`.
    /// The feature storage is shared.
    pub fn with_class(&self, class: Label) -> Self {
        Self {
            class,
            storage: Arc::clone(&self.storage),
            view: self.view.clone(),
        }
    }


    /// Returns the projection of `self` onto the given feature indices.
    /// The `j`th feature of the result is the `indices[j]`th feature
    /// of `self`. The feature storage is shared.
    ///
    /// Panics if an index is out of range.
    pub fn with_features(&self, indices: &[usize]) -> Self {
        let n_feature = self.len();
        let view = indices.iter()
            .map(|&i| {
                assert!(
                    i < n_feature,
                    "feature index {i} out of range for {n_feature} features"
                );
                match &self.view {
                    Some(ix) => ix[i],
                    None => i,
                }
            })
            .collect::<Arc<[usize]>>();

        Self {
            class: self.class,
            storage: Arc::clone(&self.storage),
            view: Some(view),
        }
    }


    /// Returns the z-scored example
    /// `(x[j] - means[j]) / std_devs[j]` for every feature `j`.
    /// A zero standard deviation is treated as `1`.
    pub fn z_scored(&self, means: &[f64], std_devs: &[f64]) -> Result<Self> {
        let n_feature = self.len();
        for got in [means.len(), std_devs.len()] {
            if got != n_feature {
                return Err(ClassifierError::DimensionMismatch {
                    expected: n_feature, got,
                });
            }
        }

        let features = self.iter()
            .zip(means.iter().zip(std_devs))
            .map(|(x, (m, s))| {
                let s = if *s == 0.0 { 1.0 } else { *s };
                (x - m) / s
            })
            .collect::<Vec<_>>();
        Self::from_vec(self.class, features)
    }


    /// Inner product of the feature vectors of `self` and `other`.
    pub fn dot(&self, other: &Self) -> f64 {
        self.iter()
            .zip(other.iter())
            .map(|(a, b)| a * b)
            .sum()
    }


    /// Squared euclidean distance between `self` and `other`.
    pub fn squared_distance(&self, other: &Self) -> f64 {
        self.iter()
            .zip(other.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum()
    }


    /// Mean absolute value over the feature vector.
    /// Returns `0` for an empty vector.
    pub fn mean_abs(&self) -> f64 {
        let n = self.len();
        if n == 0 { return 0.0; }
        self.iter().map(f64::abs).sum::<f64>() / n as f64
    }


    pub(crate) fn check_len(&self, expected: usize) -> Result<()> {
        if self.len() != expected {
            return Err(ClassifierError::DimensionMismatch {
                expected, got: self.len(),
            });
        }
        Ok(())
    }
}


impl TryFrom<(Label, Vec<f64>)> for Example {
    type Error = ClassifierError;
    fn try_from((class, features): (Label, Vec<f64>)) -> Result<Self> {
        Self::from_vec(class, features)
    }
}


impl PartialEq for Example {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class
            && self.len() == other.len()
            && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}
