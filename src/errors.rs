//! Errors
//!
//! Custom error types used throughout the `dichotomiser` crate.
use thiserror::Error;

/// Errors that can occur while assembling a dataset or working with a tree.
#[derive(Debug, Error)]
pub enum DichotomiserError {
    /// Something other than exactly two class labels was declared.
    #[error("Expected exactly two class labels, but {0} were declared.")]
    LabelCount(usize),
    /// The schema is internally inconsistent.
    #[error("Invalid schema: {0}.")]
    InvalidSchema(String),
    /// An instance does not conform to the schema.
    #[error("Invalid instance: {0}.")]
    InvalidInstance(String),
    /// A label was used which is not one of the declared class labels.
    #[error("Unknown class label {0:?}.")]
    UnknownLabel(String),
    /// An operation that needs instances was handed a dataset without any.
    #[error("The dataset contains no instances.")]
    EmptyDataSet,
    /// Unable to read a dataset from a file.
    #[error("Unable to read dataset from a file {0}")]
    UnableToRead(String),
    /// A dataset file line that could not be parsed.
    #[error("Parse error on line {0}: {1}.")]
    Parse(usize, String),
}
