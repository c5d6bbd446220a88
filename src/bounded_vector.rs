//! Bounded monotone vectors.
//!
//! A [`BoundedVector`] represents a monotone sequence inside `[lower, upper]`
//! (an increasing sequence of thresholds, say) through an array of increments
//! `dx`, each in `[0, 1]`. The increments are the calibrated parameter; the
//! values are always derived from them, so every guess the optimizer proposes
//! maps to a monotone, bounded vector without penalties or projections.
//!
//! With cumulative sums `c[i] = dx[0] + ... + dx[i]` the increasing values are
//! `lower + (upper - lower) * c[i] / s`, where `s` depends on the
//! [`IncrementScaling`]. Decreasing vectors swap the roles of the bounds.
//!
//! Construction is two-phase: [`BoundedVector::new`] sets the default
//! increments with an empty registry, then [`BoundedVector::set_pvector`]
//! registers the `dx` parameter.

use crate::error::{ModelParamsError, Result};
use crate::model::ModelObject;
use crate::object_id::ObjectId;
use crate::parameters::{ParamRegistry, Parameter};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Name of the increment parameter
pub const INCREMENTS_NAME: &str = "dx";

/// Relative tolerance for the end point check of `Normalized` targets
const END_POINT_TOL: f64 = 1e-9;

/// How cumulative increments are mapped onto `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IncrementScaling {
    /// Divide by the total of all increments. The last value is always the
    /// far bound (`upper` when increasing). All-zero increments give an evenly
    /// spaced sequence.
    #[default]
    Normalized,

    /// Divide by `max(total, 1)`. Any monotone target inside the bounds can be
    /// reproduced; all-zero increments give a constant sequence at the near
    /// bound.
    Saturating,
}

/// A monotone vector with values in `[lower, upper]`, calibrated through its
/// increments
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedVector {
    pvector: ParamRegistry,
    increasing: bool,
    lower: f64,
    upper: f64,
    /// Default increments before `set_pvector`, then a copy of the `dx`
    /// parameter kept current by `sync_param`
    dx: Vec<f64>,
    scaling: IncrementScaling,
}

impl BoundedVector {
    /// Create a bounded vector with an empty registry
    ///
    /// The length of `dx` fixes the length of the vector. Call
    /// [`set_pvector`](Self::set_pvector) to register the increments.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelparams_rs::{BoundedVector, ObjectId};
    ///
    /// let mut bv = BoundedVector::new(ObjectId::new("grid"), true, 1.0, 2.0, vec![0.3, 0.2, 0.5]).unwrap();
    /// bv.set_pvector("Gradient", "g(x)", true).unwrap();
    ///
    /// let values = bv.values();
    /// assert!((values[0] - 1.3).abs() < 1e-12);
    /// assert!((values[1] - 1.5).abs() < 1e-12);
    /// assert_eq!(values[2], 2.0);
    /// ```
    pub fn new(id: ObjectId, increasing: bool, lower: f64, upper: f64, dx: Vec<f64>) -> Result<Self> {
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(ModelParamsError::InvalidState(format!(
                "bounded vector {} needs finite bounds with lower < upper, got [{}, {}]",
                id, lower, upper
            )));
        }
        if dx.is_empty() {
            return Err(ModelParamsError::InvalidState(format!(
                "bounded vector {} needs at least one element",
                id
            )));
        }

        Ok(Self {
            pvector: ParamRegistry::new(id),
            increasing,
            lower,
            upper,
            dx,
            scaling: IncrementScaling::default(),
        })
    }

    /// A calibrated increasing vector of length `n`, starting evenly spaced
    pub fn increasing(id: ObjectId, lower: f64, upper: f64, n: usize) -> Result<Self> {
        let dx = vec![1.0 / n.max(1) as f64; n];
        let mut bv = Self::new(id, true, lower, upper, dx)?;
        bv.set_pvector("Increasing vector", "x", true)?;
        Ok(bv)
    }

    pub fn with_scaling(mut self, scaling: IncrementScaling) -> Self {
        self.scaling = scaling;
        self
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.dx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dx.is_empty()
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn is_increasing(&self) -> bool {
        self.increasing
    }

    pub fn scaling(&self) -> IncrementScaling {
        self.scaling
    }

    /// Current increments
    ///
    /// Read from the `dx` parameter once it is registered, so changes made
    /// directly on the registry are picked up; before that, the defaults.
    pub fn increments(&self) -> &[f64] {
        self.pvector
            .get(INCREMENTS_NAME)
            .map(|p| p.value())
            .unwrap_or(&self.dx)
    }

    /// Replace the increments
    ///
    /// Before `set_pvector` this sets the defaults it will register; after,
    /// it also becomes the default and current value of the `dx` parameter.
    pub fn set_increments(&mut self, dx: Vec<f64>) -> Result<()> {
        self.check_len(dx.len())?;
        if self.pvector.contains(INCREMENTS_NAME) {
            self.pvector.get_mut(INCREMENTS_NAME)?.set_default_value(&dx)?;
        }
        self.dx = dx;
        Ok(())
    }

    /// Register the increment parameter
    ///
    /// Uses the current increments as default value, with bounds `[0, 1]` on
    /// every element. Replaces an existing `dx` parameter.
    ///
    /// # Returns
    ///
    /// `InvalidState` if the increments are not finite values in `[0, 1]`
    pub fn set_pvector(&mut self, description: &str, symbol: &str, calibrated: bool) -> Result<()> {
        let dx = self.increments().to_vec();
        if let Some(index) = dx
            .iter()
            .position(|d| !(d.is_finite() && (0.0..=1.0).contains(d)))
        {
            return Err(ModelParamsError::InvalidState(format!(
                "increment {} of {} is {}, must be in [0, 1]",
                index,
                self.pvector.owner(),
                dx[index]
            )));
        }

        let param = Parameter::new(INCREMENTS_NAME, dx.clone())
            .with_description(description)
            .with_symbol(symbol)
            .with_bounds(0.0, 1.0)?
            .with_calibration(calibrated)?;

        if self.pvector.contains(INCREMENTS_NAME) {
            self.pvector.replace(param)?;
        } else {
            self.pvector.append(param)?;
        }
        self.dx = dx;
        Ok(())
    }

    /// Set the increments so that the vector reproduces `target`
    ///
    /// The increments become the default and the current value of `dx`.
    ///
    /// With `Normalized` scaling the last value is always the far bound, so
    /// only targets ending there can be reproduced. Use
    /// [`IncrementScaling::Saturating`] for arbitrary monotone targets.
    ///
    /// # Returns
    ///
    /// `SizeMismatch` on a length mismatch, `InvalidState` for non-finite
    /// targets, `NotMonotone` if `target` runs against the direction of the
    /// vector, and with `Normalized` scaling `UnreachableTarget` if `target`
    /// does not end at the far bound
    pub fn set_default_value(&mut self, target: &[f64]) -> Result<()> {
        let dx = self.increments_for(target)?;
        self.set_increments(dx)
    }

    /// Permanently fix the vector at `target`
    ///
    /// Like [`set_default_value`](Self::set_default_value), and switches
    /// calibration of the increments off. Registers `dx` if `set_pvector` has
    /// not been called yet.
    pub fn fix_values(&mut self, target: &[f64]) -> Result<()> {
        let dx = self.increments_for(target)?;
        if !self.pvector.contains(INCREMENTS_NAME) {
            self.dx = dx;
            return self.set_pvector("Increments", INCREMENTS_NAME, false);
        }

        let param = self.pvector.get_mut(INCREMENTS_NAME)?;
        param.set_calibrated(false)?;
        param.set_default_value(&dx)?;
        self.dx = dx;
        Ok(())
    }

    /// All values, recomputed from the increments
    pub fn values(&self) -> Vec<f64> {
        bounded_values(self.increments(), self.lower, self.upper, self.increasing, self.scaling)
    }

    /// The values at `indices`
    pub fn values_at(&self, indices: &[usize]) -> Result<Vec<f64>> {
        let values = self.values();
        indices
            .iter()
            .map(|&index| {
                values
                    .get(index)
                    .copied()
                    .ok_or(ModelParamsError::IndexOutOfRange {
                        index,
                        len: values.len(),
                    })
            })
            .collect()
    }

    /// Increments that reproduce `target` under the forward transform
    fn increments_for(&self, target: &[f64]) -> Result<Vec<f64>> {
        self.check_len(target.len())?;

        if let Some(index) = target.iter().position(|t| !t.is_finite()) {
            return Err(ModelParamsError::InvalidState(format!(
                "target {} of {} is {}, must be finite",
                index,
                self.pvector.owner(),
                target[index]
            )));
        }

        for i in 1..target.len() {
            let step = target[i] - target[i - 1];
            if (self.increasing && step < 0.0) || (!self.increasing && step > 0.0) {
                return Err(ModelParamsError::NotMonotone { index: i });
            }
        }

        if self.scaling == IncrementScaling::Normalized {
            let end = if self.increasing { self.upper } else { self.lower };
            let last = target[target.len() - 1];
            if (last - end).abs() > END_POINT_TOL * (self.upper - self.lower) {
                return Err(ModelParamsError::UnreachableTarget { value: last, end });
            }
        }

        let width = self.upper - self.lower;
        let mut previous = if self.increasing { self.lower } else { self.upper };
        let mut dx = Vec::with_capacity(target.len());
        for &t in target {
            let raw = (if self.increasing { t - previous } else { previous - t }) / width;
            let clipped = raw.max(0.0).min(1.0);
            if (clipped - raw).abs() > 1e-12 {
                warn!(
                    object = %self.pvector.owner(),
                    raw,
                    clipped,
                    "increment clipped into [0, 1]"
                );
            }
            dx.push(clipped);
            previous = t;
        }
        Ok(dx)
    }

    fn check_len(&self, actual: usize) -> Result<()> {
        if actual != self.dx.len() {
            return Err(ModelParamsError::SizeMismatch {
                name: INCREMENTS_NAME.to_string(),
                expected: self.dx.len(),
                actual,
            });
        }
        Ok(())
    }
}

/// Map increments onto a monotone sequence in `[lower, upper]`
///
/// Pure function of its inputs. The result is monotone in the direction given
/// by `increasing` and never leaves the bounds.
pub fn bounded_values(
    dx: &[f64],
    lower: f64,
    upper: f64,
    increasing: bool,
    scaling: IncrementScaling,
) -> Vec<f64> {
    let n = dx.len();
    let cumulative: Vec<f64> = dx
        .iter()
        .scan(0.0, |sum, &d| {
            *sum += d;
            Some(*sum)
        })
        .collect();
    let total = cumulative.last().copied().unwrap_or(0.0);

    let fractions: Vec<f64> = match scaling {
        IncrementScaling::Normalized if total > 0.0 => {
            cumulative.iter().map(|c| c / total).collect()
        }
        IncrementScaling::Normalized => (1..=n).map(|i| i as f64 / n as f64).collect(),
        IncrementScaling::Saturating => {
            let scale = total.max(1.0);
            cumulative.iter().map(|c| c / scale).collect()
        }
    };

    let width = upper - lower;
    fractions
        .into_iter()
        .map(|f| {
            if increasing {
                if f >= 1.0 {
                    upper
                } else {
                    (lower + width * f).max(lower).min(upper)
                }
            } else if f >= 1.0 {
                lower
            } else {
                (upper - width * f).max(lower).min(upper)
            }
        })
        .collect()
}

impl ModelObject for BoundedVector {
    fn pvector(&self) -> &ParamRegistry {
        &self.pvector
    }

    fn pvector_mut(&mut self) -> &mut ParamRegistry {
        &mut self.pvector
    }

    fn sync_param(&mut self, name: &str, index: usize, value: f64) -> Result<()> {
        if name != INCREMENTS_NAME {
            return Err(ModelParamsError::NotFound {
                name: name.to_string(),
                owner: self.pvector.owner().clone(),
            });
        }
        let len = self.dx.len();
        let slot = self
            .dx
            .get_mut(index)
            .ok_or(ModelParamsError::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }
}
