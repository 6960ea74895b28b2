use log::debug;

use crate::{
    data::{ObservationTable, ParameterSet},
    error::Error,
};

/// A deterministic utility of one alternative.
///
/// Evaluation must be pure: the same parameters and observations always give the same
/// vector, holding one utility per observation.
pub trait UtilityExpression {
    fn evaluate(
        &self,
        parameters: &ParameterSet,
        observations: &ObservationTable,
    ) -> Result<Vec<f64>, Error>;
}

impl<F> UtilityExpression for F
where
    F: Fn(&ParameterSet, &ObservationTable) -> Result<Vec<f64>, Error>,
{
    fn evaluate(
        &self,
        parameters: &ParameterSet,
        observations: &ObservationTable,
    ) -> Result<Vec<f64>, Error> {
        self(parameters, observations)
    }
}

/// An intercept plus a sum of parameters multiplied by observed variables.
///
/// For observation `i` the utility is `b_0 + b_1 * x_1[i] + ... + b_k * x_k[i]`, where
/// `b_0` is the intercept parameter (0 if absent).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearUtility {
    constant: Option<String>,
    params: Vec<String>,
    vars: Vec<String>,
}

impl LinearUtility {
    /// Creates a utility that is 0 everywhere.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Use the parameter `param` as the intercept.
    pub fn constant(mut self, param: impl Into<String>) -> Self {
        self.constant = Some(param.into());
        self
    }

    /// Add a `param * var` term.
    ///
    /// A variable may appear in several terms, each with its own parameter.
    pub fn term(mut self, param: impl Into<String>, var: impl Into<String>) -> Self {
        self.add(param, var);
        self
    }

    pub fn add(&mut self, param: impl Into<String>, var: impl Into<String>) {
        self.params.push(param.into());
        self.vars.push(var.into());
    }

    pub fn num_terms(&self) -> usize {
        self.params.len()
    }
}

impl UtilityExpression for LinearUtility {
    fn evaluate(
        &self,
        parameters: &ParameterSet,
        observations: &ObservationTable,
    ) -> Result<Vec<f64>, Error> {
        let constant = match &self.constant {
            Some(param) => parameters.get(param)?,
            None => 0.0,
        };

        let mut values = vec![constant; observations.num_observations()];
        for (param, var) in self.params.iter().zip(&self.vars) {
            let coeff = parameters.get(param)?;
            let column = observations.column(var)?;
            if column.len() != values.len() {
                return Err(Error::DimensionMismatch(format!(
                    "column '{}' has {} observations, expected {}",
                    var,
                    column.len(),
                    values.len()
                )));
            }
            for (val, &x) in values.iter_mut().zip(column) {
                *val += coeff * x;
            }
        }
        Ok(values)
    }
}

/// A single `param * var` term of a linear utility.
/// This is an auxiliary struct for specifying conversions.
#[doc(hidden)]
#[derive(Clone, Debug)]
pub struct UtilityTerm(String, String);

impl<P: Into<String>, V: Into<String>> From<(P, V)> for UtilityTerm {
    fn from(term: (P, V)) -> Self {
        UtilityTerm(term.0.into(), term.1.into())
    }
}

impl<'a, P: AsRef<str>, V: AsRef<str>> From<&'a (P, V)> for UtilityTerm {
    fn from(term: &'a (P, V)) -> Self {
        UtilityTerm(term.0.as_ref().to_string(), term.1.as_ref().to_string())
    }
}

impl<T: Into<UtilityTerm>> std::iter::FromIterator<T> for LinearUtility {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut utility = LinearUtility::empty();
        utility.extend(iter);
        utility
    }
}

impl<T: Into<UtilityTerm>> std::iter::Extend<T> for LinearUtility {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for term in iter {
            let UtilityTerm(param, var) = term.into();
            self.add(param, var);
        }
    }
}

/// Utilities of every alternative, one row per alternative in expression order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UtilityMatrix {
    rows: Vec<Vec<f64>>,
}

impl UtilityMatrix {
    pub fn num_alternatives(&self) -> usize {
        self.rows.len()
    }

    /// Utilities of alternative `alt` across all observations.
    pub fn alternative(&self, alt: usize) -> &[f64] {
        &self.rows[alt]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }
}

impl From<Vec<Vec<f64>>> for UtilityMatrix {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        UtilityMatrix { rows }
    }
}

/// Evaluate every utility expression over the observations.
///
/// The number of parameters must equal the number of observation columns and all
/// columns must have the same length; otherwise [`Error::DimensionMismatch`] is
/// returned. Each expression must yield one utility per observation.
///
/// [`Error::DimensionMismatch`]: ../error/enum.Error.html#variant.DimensionMismatch
pub fn compute_utilities<E>(
    parameters: &ParameterSet,
    observations: &ObservationTable,
    expressions: &[E],
) -> Result<UtilityMatrix, Error>
where
    E: AsRef<dyn UtilityExpression>,
{
    let num_observations = observations.check_dimensions(parameters)?;

    let mut rows = Vec::with_capacity(expressions.len());
    for (alt, expr) in expressions.iter().enumerate() {
        let row = expr.as_ref().evaluate(parameters, observations)?;
        if row.len() != num_observations {
            return Err(Error::DimensionMismatch(format!(
                "utility of alternative {} has {} values, expected {}",
                alt,
                row.len(),
                num_observations
            )));
        }
        rows.push(row);
    }

    debug!(
        "computed utilities: alternatives: {}, observations: {}",
        rows.len(),
        num_observations
    );
    Ok(UtilityMatrix { rows })
}
