//! Guess vectors for calibration.
//!
//! [`make_guess`] flattens the calibrated elements of every parameter in a
//! model tree into one vector (plus matching bound vectors) that can be handed
//! to an optimizer. [`set_params_from_guess`] is its inverse: it writes a
//! vector of that shape back into the registries and syncs the values into the
//! objects' fields.
//!
//! Both functions visit the tree in the same order: an object's own registry
//! in registry order, calibrated elements in element order, then its children
//! depth first in declaration order. Nothing but this order ties guess
//! elements to parameters, so the tree must not change between the two calls.
//! A changed element count is always detected; reorderings that keep the count
//! are detected only when the layout is passed back through [`GuessConfig`].
//!
//! # Example
//!
//! ```
//! use modelparams_rs::guess::{make_guess, set_params_from_guess};
//! use modelparams_rs::{ModelObject, ObjectId, ParamRegistry, Parameter, Result};
//!
//! struct Utility {
//!     pvector: ParamRegistry,
//!     sigma: f64,
//! }
//!
//! impl ModelObject for Utility {
//!     fn pvector(&self) -> &ParamRegistry {
//!         &self.pvector
//!     }
//!
//!     fn pvector_mut(&mut self) -> &mut ParamRegistry {
//!         &mut self.pvector
//!     }
//!
//!     fn sync_param(&mut self, _name: &str, _index: usize, value: f64) -> Result<()> {
//!         self.sigma = value;
//!         Ok(())
//!     }
//! }
//!
//! let mut pvector = ParamRegistry::new(ObjectId::new("utility"));
//! pvector
//!     .append(Parameter::scalar("sigma", 2.0).with_bounds(1.0, 5.0)?.with_calibration(true)?)?;
//! let mut utility = Utility { pvector, sigma: 2.0 };
//!
//! let guess = make_guess(&utility)?;
//! assert_eq!(guess.values.to_vec(), vec![2.0]);
//! assert_eq!(guess.lower_bounds.to_vec(), vec![1.0]);
//!
//! set_params_from_guess(&mut utility, &[3.5])?;
//! assert_eq!(utility.sigma, 3.5);
//! # Ok::<(), modelparams_rs::ModelParamsError>(())
//! ```

pub mod config;
pub mod layout;

pub use config::GuessConfig;
pub use layout::{GuessLayout, GuessSlot};

use crate::error::{ModelParamsError, Result};
use crate::model::{walk, walk_mut, ModelObject};
use crate::object_id::ObjectId;
use ndarray::Array1;
use tracing::{debug, trace};

/// Calibrated values of a model tree, flattened for an optimizer
#[derive(Debug, Clone, PartialEq)]
pub struct Guess {
    /// Current values of all calibrated elements
    pub values: Array1<f64>,

    /// Lower bound of each element
    pub lower_bounds: Array1<f64>,

    /// Upper bound of each element
    pub upper_bounds: Array1<f64>,

    /// Origin of each element
    pub layout: GuessLayout,
}

impl Guess {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Flatten the calibrated parameter values of the tree rooted at `root`
///
/// # Returns
///
/// The guess vector, its bounds and its layout
pub fn make_guess(root: &dyn ModelObject) -> Result<Guess> {
    let mut values = Vec::new();
    let mut lower = Vec::new();
    let mut upper = Vec::new();
    let mut layout = GuessLayout::new();

    walk(root, &mut |object| {
        let id = object.object_id();
        for param in object.pvector().iter() {
            for element in param.calibrated_indices() {
                let (lo, hi) =
                    param
                        .bounds()
                        .element(element)
                        .ok_or(ModelParamsError::IndexOutOfRange {
                            index: element,
                            len: param.bounds().len(),
                        })?;
                values.push(param.value()[element]);
                lower.push(lo);
                upper.push(hi);
                layout.push(GuessSlot::new(id.clone(), param.name(), element));
            }
        }
        Ok(())
    })?;

    debug!(root = %root.object_id(), n = values.len(), "made guess");

    Ok(Guess {
        values: Array1::from(values),
        lower_bounds: Array1::from(lower),
        upper_bounds: Array1::from(upper),
        layout,
    })
}

/// Number of calibrated scalar elements in the tree, i.e. the guess length
pub fn calibrated_count(root: &dyn ModelObject) -> usize {
    root.children()
        .into_iter()
        .fold(root.pvector().n_calibrated(), |count, child| {
            count + calibrated_count(child)
        })
}

/// Write a guess vector back into the tree rooted at `root`
///
/// Values are not bounds checked. See [`set_params_from_guess_with`].
pub fn set_params_from_guess(root: &mut dyn ModelObject, guess: &[f64]) -> Result<()> {
    set_params_from_guess_with(root, guess, &GuessConfig::default())
}

/// Write a guess vector back into the tree rooted at `root`
///
/// The guess is first consumed in lockstep with the traversal without writing
/// anything; it must be exhausted exactly when the traversal ends. Only then
/// are the values written into the registries and synced into the objects, so
/// a failed call leaves the tree unchanged.
///
/// # Returns
///
/// `LengthMismatch` if the guess has more or fewer elements than the tree has
/// calibrated elements, `LayoutMismatch` if `config.layout` disagrees with the
/// traversal, `OutOfBounds` in strict mode, or any error from
/// [`ModelObject::sync_param`]
pub fn set_params_from_guess_with(
    root: &mut dyn ModelObject,
    guess: &[f64],
    config: &GuessConfig,
) -> Result<()> {
    let mut values = guess.iter();
    let mut emitted = 0usize;
    let mut exhausted = false;
    let mut first_error: Option<ModelParamsError> = None;

    walk_mut(root, &mut |object| {
        let id = object.object_id().clone();
        for param in object.pvector().iter() {
            for element in param.calibrated_indices() {
                let position = emitted;
                emitted += 1;

                let value = match values.next() {
                    Some(&value) => value,
                    None => {
                        exhausted = true;
                        continue;
                    }
                };
                if first_error.is_some() {
                    continue;
                }

                if let Some(layout) = &config.layout {
                    if let Err(e) = check_slot(layout, position, &id, param.name(), element) {
                        first_error = Some(e);
                        continue;
                    }
                }
                if config.strict_bounds {
                    if let Err(e) = param.check_element(element, value) {
                        first_error = Some(e);
                    }
                }
            }
        }
        Ok(())
    })?;

    if exhausted || values.next().is_some() {
        return Err(ModelParamsError::LengthMismatch {
            expected: emitted,
            actual: guess.len(),
        });
    }
    if let Some(e) = first_error {
        return Err(e);
    }
    if let Some(layout) = &config.layout {
        if layout.len() != emitted {
            return Err(ModelParamsError::LayoutMismatch {
                position: emitted,
                expected: format!("{} slots", layout.len()),
                found: format!("{} slots", emitted),
            });
        }
    }

    let mut values = guess.iter().copied();
    walk_mut(root, &mut |object| {
        let slots: Vec<(String, usize)> = object
            .pvector()
            .iter()
            .flat_map(|p| p.calibrated_indices().map(move |i| (p.name().to_string(), i)))
            .collect();

        for (name, element) in slots {
            let value = values.next().ok_or(ModelParamsError::LengthMismatch {
                expected: emitted,
                actual: guess.len(),
            })?;
            object.pvector_mut().set_element(&name, element, value)?;
            object.sync_param(&name, element, value)?;
            trace!(object = %object.object_id(), param = %name, element, value, "set from guess");
        }
        Ok(())
    })?;

    debug!(root = %root.object_id(), n = guess.len(), "set params from guess");
    Ok(())
}

fn check_slot(
    layout: &GuessLayout,
    position: usize,
    object_id: &ObjectId,
    param_name: &str,
    element: usize,
) -> Result<()> {
    match layout.get(position) {
        Some(slot) if slot.matches(object_id, param_name, element) => Ok(()),
        expected => Err(ModelParamsError::LayoutMismatch {
            position,
            expected: expected
                .map(|s| s.to_string())
                .unwrap_or_else(|| "end of layout".to_string()),
            found: GuessSlot::new(object_id.clone(), param_name, element).to_string(),
        }),
    }
}
