/// An error encountered while evaluating a choice model.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Parameters, observation columns or utility rows disagree in size.
    DimensionMismatch(String),
    /// A utility expression referenced a parameter that is not in the set.
    UnknownParameter(String),
    /// A utility expression referenced a column that is not in the table.
    UnknownVariable(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::DimensionMismatch(msg) => write!(f, "mismatched dimensions: {}", msg),
            Error::UnknownParameter(name) => write!(f, "unknown parameter '{}'", name),
            Error::UnknownVariable(name) => write!(f, "unknown variable '{}'", name),
        }
    }
}

impl std::error::Error for Error {}
