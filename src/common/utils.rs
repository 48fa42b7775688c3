//! This file provides some common numeric functions
//! such as inner products and normalization.
use rayon::prelude::*;


/// Compute the inner-product of the given two slices.
#[inline(always)]
pub(crate) fn inner_product(v1: &[f64], v2: &[f64]) -> f64 {
    v1.iter()
        .zip(v2)
        .map(|(a, b)| a * b)
        .sum::<f64>()
}


/// Normalize `items` so that `\| items \|_1 = 1`.
#[inline(always)]
pub(crate) fn normalize(items: &mut [f64]) {
    let z = items.iter()
        .map(|it| it.abs())
        .sum::<f64>();

    assert_ne!(z, 0.0);

    items.par_iter_mut()
        .for_each(|item| { *item /= z; });
}


/// Turn a vector of log-weights into a probability vector in place.
/// The normalizer is accumulated with `log-sum-exp`
/// from the smallest entry upwards, so no entry overflows.
/// Entries at `-inf` (zero weight) stay at zero.
#[inline(always)]
pub(crate) fn normalize_log_weights(log_weights: &mut [f64]) {
    let n = log_weights.len();
    if n == 0 { return; }

    // Sort indices by ascending order
    let mut indices = (0..n).collect::<Vec<usize>>();
    indices.sort_unstable_by(|&i, &j| {
        log_weights[i].total_cmp(&log_weights[j])
    });

    let mut normalizer = f64::NEG_INFINITY;
    for i in indices {
        let mut a = normalizer;
        let mut b = log_weights[i];
        if b == f64::NEG_INFINITY { continue; }
        if a == f64::NEG_INFINITY {
            normalizer = b;
            continue;
        }
        if a < b {
            std::mem::swap(&mut a, &mut b);
        }

        normalizer = a + (1.0 + (b - a).exp()).ln();
    }
    if normalizer == f64::NEG_INFINITY { return; }

    log_weights.par_iter_mut()
        .for_each(|d| *d = (*d - normalizer).exp());
}


/// The logistic function `1 / (1 + exp(-z))`.
#[inline(always)]
pub(crate) fn logistic(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
