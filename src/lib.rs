//! # modelparams-rs
//!
//! `modelparams-rs` manages the parameters of economic models built as trees
//! of model objects, and flattens the calibrated ones into a single guess
//! vector for an optimizer.
//!
//! The library provides:
//! - Named, possibly vector-valued parameters with bounds and per-element
//!   calibration flags, collected in one registry per object
//! - Guess vectors (values and bound vectors) built from a whole model tree,
//!   and the inverse operation writing an optimizer's guess back
//! - Bounded monotone vectors parameterized by calibrated increments
//! - Registry lookup by object id and plain-text parameter reports
//!
//! ## Basic Usage
//!
//! ```
//! use modelparams_rs::{make_guess, set_params_from_guess};
//! use modelparams_rs::{BoundedVector, ObjectId};
//!
//! let mut grid = BoundedVector::increasing(ObjectId::new("grid"), 0.0, 1.0, 3)?;
//!
//! let guess = make_guess(&grid)?;
//! assert_eq!(guess.len(), 3);
//!
//! set_params_from_guess(&mut grid, &[0.2, 0.3, 0.5])?;
//! let values = grid.values();
//! assert!((values[2] - 1.0).abs() < 1e-12);
//! # Ok::<(), modelparams_rs::ModelParamsError>(())
//! ```

// Public modules
pub mod error;
pub mod object_id;

// Parameter system
pub mod parameters;

// Model trees
pub mod bounded_vector;
pub mod guess;
pub mod locator;
pub mod model;
pub mod report;

// Re-exports for convenience
pub use bounded_vector::{BoundedVector, IncrementScaling};
pub use error::{ModelParamsError, Result};
pub use guess::{make_guess, set_params_from_guess, Guess, GuessConfig, GuessLayout};
pub use locator::RegistryLocator;
pub use model::ModelObject;
pub use object_id::{IdSegment, ObjectId};
pub use parameters::{Bounds, ParamRegistry, Parameter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
