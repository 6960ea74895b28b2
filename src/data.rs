use crate::error::Error;

/// Named scalar coefficients of the utility functions.
///
/// Names keep their insertion order. Setting a name twice replaces the value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterSet {
    names: Vec<String>,
    values: Vec<f64>,
}

impl ParameterSet {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, returning its position in the set.
    pub fn set(&mut self, name: impl Into<String>, value: f64) -> usize {
        let name = name.into();
        match self.position(&name) {
            Some(idx) => {
                self.values[idx] = value;
                idx
            }
            None => {
                self.names.push(name);
                self.values.push(value);
                self.values.len() - 1
            }
        }
    }

    pub fn get(&self, name: &str) -> Result<f64, Error> {
        self.position(name)
            .map(|idx| self.values[idx])
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

impl<S: Into<String>> std::iter::FromIterator<(S, f64)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut params = ParameterSet::new();
        params.extend(iter);
        params
    }
}

impl<S: Into<String>> std::iter::Extend<(S, f64)> for ParameterSet {
    fn extend<I: IntoIterator<Item = (S, f64)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

/// Columns of observed values, one value per observation.
///
/// Column order is the insertion order and is significant: the trailing columns are
/// read as the availability weights of the alternatives, one column per alternative.
/// Columns of unequal length are accepted here and rejected by [`check_dimensions`].
///
/// [`check_dimensions`]: struct.ObservationTable.html#method.check_dimensions
#[derive(Clone, Default, PartialEq)]
pub struct ObservationTable {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl std::fmt::Debug for ObservationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservationTable")
            .field("columns", &self.names)
            .field("num_observations", &self.num_observations())
            .finish()
    }
}

impl ObservationTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, or replace the values of an existing one without moving it.
    pub fn add_column(&mut self, name: impl Into<String>, values: impl Into<Vec<f64>>) {
        let name = name.into();
        let values = values.into();
        match self.names.iter().position(|n| *n == name) {
            Some(idx) => self.columns[idx] = values,
            None => {
                self.names.push(name);
                self.columns.push(values);
            }
        }
    }

    pub fn column(&self, name: &str) -> Result<&[f64], Error> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.columns[idx].as_slice())
            .ok_or_else(|| Error::UnknownVariable(name.to_string()))
    }

    pub fn num_columns(&self) -> usize {
        self.names.len()
    }

    /// Length of the first column, 0 for an empty table.
    pub fn num_observations(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// The last `n` columns in table order, or `None` if there are fewer than `n`.
    pub fn trailing(&self, n: usize) -> Option<impl Iterator<Item = (&str, &[f64])>> {
        let skip = self.num_columns().checked_sub(n)?;
        Some(self.iter().skip(skip))
    }

    /// Checks the invariants every evaluation relies on.
    ///
    /// The number of parameters must equal the number of columns and every column
    /// must hold the same number of observations.
    pub fn check_dimensions(&self, parameters: &ParameterSet) -> Result<usize, Error> {
        if parameters.len() != self.num_columns() {
            return Err(Error::DimensionMismatch(format!(
                "{} parameters but {} observation columns",
                parameters.len(),
                self.num_columns()
            )));
        }

        let num_observations = self.num_observations();
        for (name, values) in self.iter() {
            if values.len() != num_observations {
                return Err(Error::DimensionMismatch(format!(
                    "column '{}' has {} observations, expected {}",
                    name,
                    values.len(),
                    num_observations
                )));
            }
        }
        Ok(num_observations)
    }
}

impl<S: Into<String>, V: Into<Vec<f64>>> std::iter::FromIterator<(S, V)> for ObservationTable {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        let mut table = ObservationTable::new();
        for (name, values) in iter {
            table.add_column(name, values);
        }
        table
    }
}
