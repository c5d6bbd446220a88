//! # Parameter System
//!
//! Named, vector-valued parameters with bounds and calibration flags, and the
//! per-object registries that hold them.
//!
//! ## Core Components
//!
//! - [`Parameter`]: one named parameter with default and current values,
//!   per-element bounds and per-element calibration flags
//! - [`ParamRegistry`]: the ordered, name-unique parameter collection owned by
//!   one model object
//! - [`Bounds`]: per-element lower and upper bounds
//!
//! ## Example Usage
//!
//! ```rust
//! use modelparams_rs::{ObjectId, ParamRegistry, Parameter};
//!
//! let mut registry = ParamRegistry::new(ObjectId::new("household"));
//!
//! registry
//!     .append(
//!         Parameter::scalar("beta", 0.95)
//!             .with_description("Discount factor")
//!             .with_bounds(0.8, 0.99)
//!             .unwrap()
//!             .with_calibration(true).unwrap(),
//!     )
//!     .unwrap();
//! registry.append(Parameter::scalar("sigma", 2.0)).unwrap();
//!
//! // Optional parameters are looked up, not assumed
//! assert!(registry.retrieve("gamma").is_none());
//!
//! // Fix a calibrated parameter
//! registry.change_calibration_status("beta", false).unwrap();
//! assert_eq!(registry.n_calibrated(), 0);
//! ```

pub mod bounds;
pub mod parameter;
pub mod registry;


// Re-export key types
pub use bounds::{Bounds, BoundsError};
pub use parameter::Parameter;
pub use registry::ParamRegistry;
