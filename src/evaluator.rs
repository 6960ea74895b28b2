use log::{debug, trace};
use stopwatch::Stopwatch;

use crate::{
    consts::DEFAULT_STABILIZATION,
    data::{ObservationTable, ParameterSet},
    error::Error,
    helpers::helpers::max_of,
    probabilities::ProbabilityTable,
    utility::{compute_utilities, UtilityExpression, UtilityMatrix},
};

/// How the exponentials of the softmax are formed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stabilization {
    /// Exponentiate the weighted utilities as they are.
    ///
    /// Overflows to `NaN` probabilities once a weighted utility exceeds about 709.
    Direct,
    /// Subtract the largest weighted utility of each observation before exponentiating.
    ///
    /// Gives the same probabilities as `Direct` wherever that does not overflow.
    MaxShift,
}

impl Default for Stabilization {
    fn default() -> Self {
        DEFAULT_STABILIZATION
    }
}

/// Turn utilities into choice probabilities with an availability-weighted softmax.
///
/// Uses [`Stabilization::MaxShift`]. See [`compute_probabilities_with`].
///
/// [`Stabilization::MaxShift`]: enum.Stabilization.html#variant.MaxShift
/// [`compute_probabilities_with`]: fn.compute_probabilities_with.html
pub fn compute_probabilities(
    parameters: &ParameterSet,
    observations: &ObservationTable,
    utilities: &UtilityMatrix,
) -> Result<ProbabilityTable, Error> {
    compute_probabilities_with(parameters, observations, utilities, DEFAULT_STABILIZATION)
}

/// Turn utilities into choice probabilities with an availability-weighted softmax.
///
/// With `A` alternatives, the last `A` columns of `observations` are taken as the
/// availability weights, the `j`-th of them belonging to the `j`-th utility row. The
/// table's columns are used in their insertion order, whatever their names.
///
/// For observation `i` the weighted utility is `w_j = u_j[i] * av_j[i]` and the
/// probability of alternative `j` is `exp(w_j) / sum_k exp(w_k)`. The result is keyed
/// by the names of the availability columns.
///
/// The dimension checks of [`compute_utilities`] apply. In addition there must be at
/// least one alternative, no more alternatives than columns, and one utility per
/// observation in every row.
///
/// [`compute_utilities`]: ../utility/fn.compute_utilities.html
pub fn compute_probabilities_with(
    parameters: &ParameterSet,
    observations: &ObservationTable,
    utilities: &UtilityMatrix,
    stabilization: Stabilization,
) -> Result<ProbabilityTable, Error> {
    let num_observations = observations.check_dimensions(parameters)?;

    let num_alternatives = utilities.num_alternatives();
    if num_alternatives == 0 {
        return Err(Error::DimensionMismatch(
            "no utilities to compute probabilities from".to_string(),
        ));
    }
    for (alt, row) in utilities.rows().iter().enumerate() {
        if row.len() != num_observations {
            return Err(Error::DimensionMismatch(format!(
                "utility of alternative {} has {} values, expected {}",
                alt,
                row.len(),
                num_observations
            )));
        }
    }

    let (keys, availability): (Vec<String>, Vec<&[f64]>) = observations
        .trailing(num_alternatives)
        .ok_or_else(|| {
            Error::DimensionMismatch(format!(
                "{} alternatives but only {} observation columns",
                num_alternatives,
                observations.num_columns()
            ))
        })?
        .map(|(name, values)| (name.to_string(), values))
        .unzip();
    trace!("availability columns: {:?}", keys);

    let mut values = vec![Vec::with_capacity(num_observations); num_alternatives];
    let mut weighted = vec![0.0; num_alternatives];
    let mut exps = vec![0.0; num_alternatives];
    for obs in 0..num_observations {
        for (alt, w) in weighted.iter_mut().enumerate() {
            *w = utilities.alternative(alt)[obs] * availability[alt][obs];
        }

        let shift = match stabilization {
            Stabilization::Direct => 0.0,
            Stabilization::MaxShift => max_of(&weighted),
        };

        // At least one term is positive, so the sum never vanishes.
        let mut denom = 0.0;
        for (e, &w) in exps.iter_mut().zip(&weighted) {
            *e = (w - shift).exp();
            denom += *e;
        }

        for (vals, &e) in values.iter_mut().zip(&exps) {
            vals.push(e / denom);
        }
    }

    Ok(ProbabilityTable::new(keys, values))
}

/// Utilities and probabilities produced by one evaluation.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub utilities: UtilityMatrix,
    pub probabilities: ProbabilityTable,
}

/// Computes utilities and choice probabilities in one call.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChoiceProbabilityEvaluator {
    stabilization: Stabilization,
}

impl ChoiceProbabilityEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stabilization(stabilization: Stabilization) -> Self {
        ChoiceProbabilityEvaluator { stabilization }
    }

    pub fn stabilization(&self) -> Stabilization {
        self.stabilization
    }

    pub fn evaluate<E>(
        &self,
        parameters: &ParameterSet,
        observations: &ObservationTable,
        expressions: &[E],
    ) -> Result<Evaluation, Error>
    where
        E: AsRef<dyn UtilityExpression>,
    {
        let sw = Stopwatch::start_new();

        let utilities = compute_utilities(parameters, observations, expressions)?;
        let probabilities =
            compute_probabilities_with(parameters, observations, &utilities, self.stabilization)?;

        debug!(
            "evaluated choice probabilities: alternatives: {}, observations: {}, max normalization error: {:e}, elapsed: {} ms",
            probabilities.num_alternatives(),
            probabilities.num_observations(),
            probabilities.max_normalization_error(),
            sw.elapsed_ms(),
        );

        Ok(Evaluation {
            utilities,
            probabilities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        consts::NORMALIZATION_TOL, helpers::helpers::assert_vec_close, utility::LinearUtility,
    };

    fn two_alternatives(
        utilities: [f64; 2],
        availability: [f64; 2],
    ) -> (ParameterSet, ObservationTable, UtilityMatrix) {
        let params = [("b_1", 1.0), ("b_2", 1.0)].into_iter().collect();
        let table = [("AV1", [availability[0]]), ("AV2", [availability[1]])]
            .into_iter()
            .collect();
        let utilities = UtilityMatrix::from(vec![vec![utilities[0]], vec![utilities[1]]]);
        (params, table, utilities)
    }

    #[test]
    fn equal_utilities_split_evenly() {
        let (params, table, utilities) = two_alternatives([0.0, 0.0], [1.0, 1.0]);
        let probs = compute_probabilities(&params, &table, &utilities).unwrap();

        assert_eq!(probs.keys(), ["AV1", "AV2"]);
        assert_vec_close(probs.alternative(0), &[0.5], 1e-12);
        assert_vec_close(probs.alternative(1), &[0.5], 1e-12);
    }

    #[test]
    fn logistic_of_unit_difference() {
        let (params, table, utilities) = two_alternatives([1.0, 0.0], [1.0, 1.0]);
        let probs = compute_probabilities(&params, &table, &utilities).unwrap();

        let e = std::f64::consts::E;
        assert_vec_close(probs.alternative(0), &[e / (e + 1.0)], 1e-12);
        assert_vec_close(probs.alternative(1), &[1.0 / (e + 1.0)], 1e-12);
        assert!((probs.alternative(0)[0] - 0.7311).abs() < 1e-4);
    }

    #[test]
    fn unavailable_alternative_has_zero_weighted_utility() {
        // av = 0 zeroes the utility, it does not remove the alternative.
        let (params, table, utilities) = two_alternatives([3.0, 1.0], [0.0, 1.0]);
        let probs = compute_probabilities(&params, &table, &utilities).unwrap();

        let e = std::f64::consts::E;
        assert_vec_close(probs.alternative(0), &[1.0 / (1.0 + e)], 1e-12);
        assert_vec_close(probs.alternative(1), &[e / (1.0 + e)], 1e-12);
    }

    #[test]
    fn uses_trailing_columns_in_table_order() {
        let params: ParameterSet = [("a", 0.0), ("b", 0.0), ("c", 0.0)].into_iter().collect();
        let table: ObservationTable = [
            ("X1", vec![5.0, 5.0]),
            ("Z", vec![1.0, 0.0]),
            ("A", vec![1.0, 1.0]),
        ]
        .into_iter()
        .collect();
        let utilities = UtilityMatrix::from(vec![vec![2.0, 2.0], vec![0.0, 0.0]]);

        let probs = compute_probabilities(&params, &table, &utilities).unwrap();
        assert_eq!(probs.keys(), ["Z", "A"]);
        // Second observation: Z zeroes the first utility.
        assert_vec_close(&probs.alternative(0)[1..], &[0.5], 1e-12);
        assert!(probs.alternative(0)[0] > 0.5);
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let (mut params, table, utilities) = two_alternatives([0.0, 0.0], [1.0, 1.0]);
        params.set("b_3", 0.0);
        assert!(matches!(
            compute_probabilities(&params, &table, &utilities),
            Err(Error::DimensionMismatch(_))
        ));

        let params: ParameterSet = [("a", 0.0), ("b", 0.0)].into_iter().collect();
        let ragged: ObservationTable = [("AV1", vec![1.0, 1.0]), ("AV2", vec![1.0])]
            .into_iter()
            .collect();
        let utilities = UtilityMatrix::from(vec![vec![0.0, 0.0], vec![0.0, 0.0]]);
        assert!(matches!(
            compute_probabilities(&params, &ragged, &utilities),
            Err(Error::DimensionMismatch(_))
        ));
    }

    #[test]
    fn rejects_bad_utility_shapes() {
        let (params, table, _) = two_alternatives([0.0, 0.0], [1.0, 1.0]);

        let none = UtilityMatrix::default();
        assert!(matches!(
            compute_probabilities(&params, &table, &none),
            Err(Error::DimensionMismatch(_))
        ));

        let too_many = UtilityMatrix::from(vec![vec![0.0]; 3]);
        assert!(matches!(
            compute_probabilities(&params, &table, &too_many),
            Err(Error::DimensionMismatch(_))
        ));

        let too_long = UtilityMatrix::from(vec![vec![0.0, 1.0], vec![0.0, 1.0]]);
        assert!(matches!(
            compute_probabilities(&params, &table, &too_long),
            Err(Error::DimensionMismatch(_))
        ));
    }

    #[test]
    fn max_shift_survives_large_utilities() {
        let (params, table, utilities) = two_alternatives([1000.0, 999.0], [1.0, 1.0]);

        let direct =
            compute_probabilities_with(&params, &table, &utilities, Stabilization::Direct).unwrap();
        assert!(direct.alternative(0)[0].is_nan());

        let shifted =
            compute_probabilities_with(&params, &table, &utilities, Stabilization::MaxShift)
                .unwrap();
        let e = std::f64::consts::E;
        assert_vec_close(shifted.alternative(0), &[e / (e + 1.0)], 1e-12);
        assert!(shifted.max_normalization_error() < NORMALIZATION_TOL);
    }

    #[test]
    fn evaluator_combines_both_steps() {
        let params: ParameterSet = [("b_0", 0.5), ("b_x", -1.0), ("c", 0.0)]
            .into_iter()
            .collect();
        let table: ObservationTable = [
            ("X", vec![0.0, 1.0, 2.0]),
            ("AV1", vec![1.0, 1.0, 1.0]),
            ("AV2", vec![1.0, 0.0, 1.0]),
        ]
        .into_iter()
        .collect();
        let expressions: Vec<Box<dyn UtilityExpression>> = vec![
            Box::new(LinearUtility::empty().constant("b_0")),
            Box::new(LinearUtility::empty().term("b_x", "X")),
        ];

        let evaluator = ChoiceProbabilityEvaluator::new();
        assert_eq!(evaluator.stabilization(), Stabilization::MaxShift);

        let evaluation = evaluator.evaluate(&params, &table, &expressions).unwrap();
        assert_vec_close(evaluation.utilities.alternative(1), &[0.0, -1.0, -2.0], 1e-12);
        assert_eq!(evaluation.probabilities.num_observations(), 3);
        assert!(evaluation.probabilities.max_normalization_error() < NORMALIZATION_TOL);

        let direct = ChoiceProbabilityEvaluator::with_stabilization(Stabilization::Direct)
            .evaluate(&params, &table, &expressions)
            .unwrap();
        for alt in 0..2 {
            assert_vec_close(
                direct.probabilities.alternative(alt),
                evaluation.probabilities.alternative(alt),
                1e-12,
            );
        }
    }
}
