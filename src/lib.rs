//! Multinomial choice probabilities from linear utilities.
//!
//! Utilities are evaluated per alternative over a table of observations, weighted by
//! the availability columns that trail the table and turned into probabilities with a
//! softmax.
//!
//! ```
//! use choiceprob::{dataset, evaluator::compute_probabilities, utility::compute_utilities};
//!
//! let parameters = dataset::parameters();
//! let observations = dataset::observations();
//! let utilities = compute_utilities(&parameters, &observations, &dataset::utilities()).unwrap();
//! let probabilities = compute_probabilities(&parameters, &observations, &utilities).unwrap();
//!
//! assert_eq!(probabilities.keys(), ["AV1", "AV2", "AV3"]);
//! assert!(probabilities.max_normalization_error() < 1e-9);
//! ```

pub mod consts;
pub mod data;
pub mod dataset;
pub mod error;
pub mod evaluator;
pub mod logistic;
pub mod probabilities;
pub mod report;
pub mod utility;

mod helpers;

pub use error::Error;
