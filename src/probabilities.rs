use crate::utility::UtilityMatrix;

/// Choice probabilities per alternative, one value per observation.
///
/// Alternatives are keyed by the names of their availability columns and kept in
/// utility order. For every observation the probabilities sum to 1.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityTable {
    keys: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl ProbabilityTable {
    pub(crate) fn new(keys: Vec<String>, values: Vec<Vec<f64>>) -> Self {
        assert_eq!(keys.len(), values.len());
        ProbabilityTable { keys, values }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn num_alternatives(&self) -> usize {
        self.keys.len()
    }

    pub fn num_observations(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.keys
            .iter()
            .position(|k| k == key)
            .map(|alt| self.values[alt].as_slice())
    }

    /// Probabilities of alternative `alt` across all observations.
    pub fn alternative(&self, alt: usize) -> &[f64] {
        &self.values[alt]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.keys
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(Vec::as_slice))
    }

    /// Probability of each alternative for observation `obs`.
    pub fn observation(&self, obs: usize) -> Vec<(&str, f64)> {
        assert!(obs < self.num_observations());
        self.iter().map(|(key, vals)| (key, vals[obs])).collect()
    }

    /// Sum over alternatives for every observation.
    pub fn row_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.num_observations()];
        for vals in &self.values {
            for (sum, p) in sums.iter_mut().zip(vals) {
                *sum += p;
            }
        }
        sums
    }

    /// Largest distance of a per-observation sum from 1.
    pub fn max_normalization_error(&self) -> f64 {
        self.row_sums()
            .into_iter()
            .map(|sum| (sum - 1.0).abs())
            .fold(0.0, f64::max)
    }

    /// `(utility, probability)` pairs of alternative `alt`, one per observation.
    pub fn utility_pairs(&self, utilities: &UtilityMatrix, alt: usize) -> Vec<(f64, f64)> {
        utilities
            .alternative(alt)
            .iter()
            .copied()
            .zip(self.alternative(alt).iter().copied())
            .collect()
    }
}
