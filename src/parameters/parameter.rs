//! Parameter definition and implementation
//!
//! This module provides the [`Parameter`] struct, the fundamental building
//! block of the parameter system. A parameter is a named, fixed-length vector
//! of values with per-element bounds and per-element calibration flags.
//! Scalars are parameters of length one.

use crate::error::{ModelParamsError, Result};
use crate::parameters::bounds::Bounds;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A potentially calibrated model parameter
///
/// The default value determines the length of the parameter; the current
/// value, the bounds and the calibration flags always have that same length.
/// Bounds are enforced for calibrated elements only. Fixed elements may sit
/// outside their (then advisory) bounds, which is logged as a warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Name of the parameter, unique within its registry
    name: String,

    /// Human-readable description used in reports
    description: String,

    /// Display symbol (e.g. a LaTeX string)
    symbol: String,

    /// Value used when the parameter is not calibrated
    default_value: Vec<f64>,

    /// Current value
    value: Vec<f64>,

    /// Per-element bounds
    bounds: Bounds,

    /// Per-element calibration flags
    calibrated: Vec<bool>,
}

impl Parameter {
    /// Create a fixed, unbounded parameter with the given default value
    ///
    /// # Examples
    ///
    /// ```
    /// use modelparams_rs::parameters::Parameter;
    ///
    /// let param = Parameter::new("beta", vec![1.0, 2.0]);
    /// assert_eq!(param.name(), "beta");
    /// assert_eq!(param.len(), 2);
    /// assert_eq!(param.value(), &[1.0, 2.0]);
    /// assert!(!param.is_calibrated());
    /// ```
    pub fn new(name: &str, default_value: Vec<f64>) -> Self {
        let len = default_value.len();
        Self {
            name: name.to_string(),
            description: String::new(),
            symbol: String::new(),
            value: default_value.clone(),
            default_value,
            bounds: Bounds::unbounded(len),
            calibrated: vec![false; len],
        }
    }

    /// Create a scalar parameter
    ///
    /// # Examples
    ///
    /// ```
    /// use modelparams_rs::parameters::Parameter;
    ///
    /// let param = Parameter::scalar("alpha", 0.3)
    ///     .with_bounds(0.0, 1.0)
    ///     .unwrap()
    ///     .with_calibration(true)
    ///     .unwrap();
    /// assert_eq!(param.value(), &[0.3]);
    /// assert!(param.is_calibrated());
    /// ```
    pub fn scalar(name: &str, default_value: f64) -> Self {
        Self::new(name, vec![default_value])
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = symbol.to_string();
        self
    }

    /// Apply the same scalar bounds to every element
    pub fn with_bounds(self, lower: f64, upper: f64) -> Result<Self> {
        let bounds = Bounds::uniform(self.len(), lower, upper)?;
        self.with_bounds_vec(bounds)
    }

    /// Apply per-element bounds
    pub fn with_element_bounds(self, lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        let bounds = Bounds::new(lower, upper)?;
        self.with_bounds_vec(bounds)
    }

    fn with_bounds_vec(mut self, bounds: Bounds) -> Result<Self> {
        if bounds.len() != self.len() {
            return Err(self.size_mismatch(bounds.len()));
        }
        self.bounds = bounds;
        self.validate()?;
        Ok(self)
    }

    /// Set the calibration flag of every element
    ///
    /// # Returns
    ///
    /// `OutOfBounds` if calibrating would leave an element outside its bounds
    pub fn with_calibration(mut self, calibrated: bool) -> Result<Self> {
        self.calibrated = vec![calibrated; self.len()];
        self.validate()?;
        Ok(self)
    }

    /// Set per-element calibration flags
    pub fn with_element_calibration(mut self, calibrated: Vec<bool>) -> Result<Self> {
        if calibrated.len() != self.len() {
            return Err(self.size_mismatch(calibrated.len()));
        }
        self.calibrated = calibrated;
        self.validate()?;
        Ok(self)
    }

    /// Start from a current value different from the default
    pub fn with_value(mut self, value: Vec<f64>) -> Result<Self> {
        self.set_value(&value)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of elements, fixed at construction
    pub fn len(&self) -> usize {
        self.default_value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.default_value.is_empty()
    }

    pub fn default_value(&self) -> &[f64] {
        &self.default_value
    }

    pub fn value(&self) -> &[f64] {
        &self.value
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn calibration_flags(&self) -> &[bool] {
        &self.calibrated
    }

    /// True if any element is calibrated
    pub fn is_calibrated(&self) -> bool {
        self.calibrated.iter().any(|&c| c)
    }

    pub fn is_element_calibrated(&self, index: usize) -> bool {
        self.calibrated.get(index).copied().unwrap_or(false)
    }

    /// Number of calibrated elements
    pub fn n_calibrated(&self) -> usize {
        self.calibrated.iter().filter(|&&c| c).count()
    }

    /// Indices of calibrated elements, in element order
    pub fn calibrated_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.calibrated
            .iter()
            .enumerate()
            .filter(|(_, &c)| c)
            .map(|(i, _)| i)
    }

    /// Switch calibration on or off for every element
    ///
    /// Switching calibration on requires every current value to lie within its
    /// bounds; otherwise `OutOfBounds` is returned and nothing changes.
    pub fn set_calibrated(&mut self, calibrated: bool) -> Result<()> {
        if calibrated {
            for (index, &v) in self.value.iter().enumerate() {
                self.check_element(index, v)?;
            }
        }
        self.calibrated.iter_mut().for_each(|c| *c = calibrated);
        Ok(())
    }

    /// Switch calibration of one element, with the same bounds rule as
    /// [`set_calibrated`](Self::set_calibrated)
    pub fn set_element_calibrated(&mut self, index: usize, calibrated: bool) -> Result<()> {
        let len = self.len();
        let value = *self
            .value
            .get(index)
            .ok_or(ModelParamsError::IndexOutOfRange { index, len })?;
        if calibrated {
            self.check_element(index, value)?;
        }
        self.calibrated[index] = calibrated;
        Ok(())
    }

    /// Set the current value
    ///
    /// # Returns
    ///
    /// `Ok(())` if the value was set, `SizeMismatch` if the length differs from
    /// the parameter length, or `OutOfBounds` if a calibrated element violates
    /// its bounds. Nothing is changed on error.
    pub fn set_value(&mut self, value: &[f64]) -> Result<()> {
        if value.len() != self.len() {
            return Err(self.size_mismatch(value.len()));
        }
        for (index, &v) in value.iter().enumerate() {
            if self.calibrated[index] {
                self.check_element(index, v)?;
            }
        }

        self.value.copy_from_slice(value);
        self.warn_outside_bounds();
        Ok(())
    }

    /// Set the default value and reset the current value to it
    pub fn set_default_value(&mut self, default_value: &[f64]) -> Result<()> {
        self.set_value(default_value)?;
        self.default_value.copy_from_slice(default_value);
        Ok(())
    }

    /// Write one element without a bounds check
    pub fn set_element(&mut self, index: usize, value: f64) -> Result<()> {
        let len = self.len();
        let slot = self
            .value
            .get_mut(index)
            .ok_or(ModelParamsError::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Check `value` against the bounds of element `index`
    pub fn check_element(&self, index: usize, value: f64) -> Result<()> {
        let (lower, upper) = self
            .bounds
            .element(index)
            .ok_or(ModelParamsError::IndexOutOfRange {
                index,
                len: self.len(),
            })?;
        if value.is_nan() || value < lower || value > upper {
            return Err(ModelParamsError::OutOfBounds {
                name: self.name.clone(),
                index,
                value,
                lower,
                upper,
            });
        }
        Ok(())
    }

    /// Reset the current value to the default value
    pub fn reset(&mut self) {
        self.value.copy_from_slice(&self.default_value);
    }

    /// True if any calibrated element is within `tol` times its bound width of
    /// a bound
    pub fn is_close_to_bounds(&self, tol: f64) -> bool {
        self.calibrated_indices()
            .any(|i| self.bounds.is_close(i, self.value[i], tol))
    }

    /// Check the length invariants and the bounds of calibrated elements
    pub fn validate(&self) -> Result<()> {
        let len = self.len();
        for actual in [self.value.len(), self.bounds.len(), self.calibrated.len()] {
            if actual != len {
                return Err(self.size_mismatch(actual));
            }
        }
        for index in self.calibrated_indices() {
            self.check_element(index, self.value[index])?;
        }
        self.warn_outside_bounds();
        Ok(())
    }

    fn size_mismatch(&self, actual: usize) -> ModelParamsError {
        ModelParamsError::SizeMismatch {
            name: self.name.clone(),
            expected: self.len(),
            actual,
        }
    }

    fn warn_outside_bounds(&self) {
        for (index, &v) in self.value.iter().enumerate() {
            if !self.bounds.contains(index, v) {
                warn!(
                    param = %self.name,
                    index,
                    value = v,
                    calibrated = self.calibrated[index],
                    "parameter value outside bounds"
                );
            }
        }
    }
}
