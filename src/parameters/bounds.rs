//! Parameter bounds implementation
//!
//! Bounds are stored per element so that vector-valued parameters can carry a
//! different admissible range for each entry. Scalar bounds are broadcast to
//! every element. Missing bounds are represented by infinities and serialize
//! as `null`.

use serde::{Deserialize, Serialize};
use std::f64::{INFINITY, NEG_INFINITY};
use thiserror::Error;

/// Errors that can occur when working with parameter bounds
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsError {
    #[error("Invalid bounds at element {index}: lower ({lower}) must not exceed upper ({upper})")]
    InvalidBounds { index: usize, lower: f64, upper: f64 },

    #[error("Bounds have {lower} lower and {upper} upper elements")]
    LengthMismatch { lower: usize, upper: usize },

    #[error("NaN is not a valid bound")]
    NanBound,
}

/// Per-element bounds on a parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Serialize for Bounds {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        // JSON has no infinities
        let lower: Vec<Option<f64>> = self
            .lower
            .iter()
            .map(|&v| if v == NEG_INFINITY { None } else { Some(v) })
            .collect();
        let upper: Vec<Option<f64>> = self
            .upper
            .iter()
            .map(|&v| if v == INFINITY { None } else { Some(v) })
            .collect();

        let mut state = serializer.serialize_struct("Bounds", 2)?;
        state.serialize_field("lower", &lower)?;
        state.serialize_field("upper", &upper)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Bounds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct BoundsHelper {
            lower: Vec<Option<f64>>,
            upper: Vec<Option<f64>>,
        }

        let helper = BoundsHelper::deserialize(deserializer)?;

        let lower = helper
            .lower
            .into_iter()
            .map(|v| v.unwrap_or(NEG_INFINITY))
            .collect();
        let upper = helper
            .upper
            .into_iter()
            .map(|v| v.unwrap_or(INFINITY))
            .collect();

        Bounds::new(lower, upper).map_err(serde::de::Error::custom)
    }
}

impl Bounds {
    /// Create per-element bounds
    ///
    /// # Arguments
    ///
    /// * `lower` - Lower bound of each element
    /// * `upper` - Upper bound of each element
    ///
    /// # Returns
    ///
    /// The bounds, or an error if the vectors differ in length, contain NaN,
    /// or some lower bound exceeds its upper bound
    ///
    /// # Examples
    ///
    /// ```
    /// use modelparams_rs::parameters::Bounds;
    ///
    /// let bounds = Bounds::new(vec![0.0, 1.0], vec![1.0, 5.0]).unwrap();
    /// assert_eq!(bounds.len(), 2);
    /// assert!(Bounds::new(vec![2.0], vec![1.0]).is_err());
    /// ```
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, BoundsError> {
        if lower.len() != upper.len() {
            return Err(BoundsError::LengthMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }

        for (index, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if lo.is_nan() || hi.is_nan() {
                return Err(BoundsError::NanBound);
            }
            if lo > hi {
                return Err(BoundsError::InvalidBounds {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
        }

        Ok(Self { lower, upper })
    }

    /// The same scalar bounds for `len` elements
    pub fn uniform(len: usize, lower: f64, upper: f64) -> Result<Self, BoundsError> {
        Self::new(vec![lower; len], vec![upper; len])
    }

    /// No bounds on any of `len` elements
    pub fn unbounded(len: usize) -> Self {
        Self {
            lower: vec![NEG_INFINITY; len],
            upper: vec![INFINITY; len],
        }
    }

    pub fn len(&self) -> usize {
        self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Lower and upper bound of one element
    pub fn element(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.lower.get(index)?, *self.upper.get(index)?))
    }

    /// Check whether `value` lies within the bounds of element `index`
    ///
    /// Out-of-range indices are never within bounds.
    pub fn contains(&self, index: usize, value: f64) -> bool {
        match self.element(index) {
            Some((lo, hi)) => value >= lo && value <= hi,
            None => false,
        }
    }

    /// Check if element `index` has finite bounds on both sides
    pub fn is_finite(&self, index: usize) -> bool {
        self.element(index)
            .map(|(lo, hi)| lo.is_finite() && hi.is_finite())
            .unwrap_or(false)
    }

    /// Clamp a value to the bounds of element `index`
    pub fn clamp(&self, index: usize, value: f64) -> f64 {
        match self.element(index) {
            Some((lo, hi)) => value.max(lo).min(hi),
            None => value,
        }
    }

    /// Check whether `value` is within `tol` times the bound width of either
    /// bound of element `index`
    ///
    /// Elements without finite bounds on both sides are never close.
    pub fn is_close(&self, index: usize, value: f64, tol: f64) -> bool {
        if !self.is_finite(index) {
            return false;
        }
        let (lo, hi) = (self.lower[index], self.upper[index]);
        let margin = tol * (hi - lo);
        value - lo <= margin || hi - value <= margin
    }
}
