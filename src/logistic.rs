//! The binary logit curve: the probability of an alternative against one with zero
//! utility.

use crate::helpers::helpers::linspace;

/// `1 / (1 + exp(-x))`, evaluated without overflow for large `|x|`.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// `n` evenly spaced `(x, sigmoid(x))` points over `[lo, hi]`, endpoints included.
pub fn curve(lo: f64, hi: f64, n: usize) -> Vec<(f64, f64)> {
    linspace(lo, hi, n)
        .into_iter()
        .map(|x| (x, sigmoid(x)))
        .collect()
}
