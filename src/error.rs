use crate::object_id::ObjectId;
use crate::parameters::bounds::BoundsError;
use thiserror::Error;

/// Error types for the modelparams-rs library.
#[derive(Error, Debug)]
pub enum ModelParamsError {
    /// A parameter the caller expected to exist is missing.
    #[error("Parameter '{name}' not found in {owner}")]
    NotFound { name: String, owner: ObjectId },

    /// No object with the given identity exists in the tree.
    #[error("Model object {0} not found")]
    ObjectNotFound(ObjectId),

    /// A parameter with the same name is already registered.
    #[error("Parameter '{name}' already exists in {owner}")]
    DuplicateName { name: String, owner: ObjectId },

    /// An array does not have the fixed length of its parameter.
    #[error("Size mismatch for '{name}': expected {expected} elements, got {actual}")]
    SizeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// The guess vector does not match the number of calibrated elements.
    #[error("Guess length mismatch: traversal emits {expected} calibrated elements, guess has {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A value violates the bounds of a calibrated element.
    #[error("Value {value} of '{name}'[{index}] is outside bounds [{lower}, {upper}]")]
    OutOfBounds {
        name: String,
        index: usize,
        value: f64,
        lower: f64,
        upper: f64,
    },

    /// Target values violate the direction of a bounded vector.
    #[error("Target values are not monotone at position {index}")]
    NotMonotone { index: usize },

    /// The traversal disagrees with the layout a guess was built from.
    #[error("Guess layout mismatch at position {position}: expected {expected}, found {found}")]
    LayoutMismatch {
        position: usize,
        expected: String,
        found: String,
    },

    /// The increment transform cannot reproduce the requested values.
    #[error("Target end point {value} cannot be reproduced, the transform always ends at {end}")]
    UnreachableTarget { value: f64, end: f64 },

    /// Element index past the end of a vector.
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Invalid state of a data structure.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Invalid bounds.
    #[error("Bounds error: {0}")]
    Bounds(#[from] BoundsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for modelparams-rs operations.
pub type Result<T> = std::result::Result<T, ModelParamsError>;
