//! Posterior sample arrays and the named store a calibration produces.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImpactError {
    #[error("Incompatible sample shape on path '{path}': '{coefficient}' has shape {found:?}, expected {expected:?}")]
    IncompatibleSampleShape { path: String, coefficient: String, expected: Vec<usize>, found: Vec<usize> },
    #[error("Coefficient '{name}' is missing from the posterior")]
    MissingCoefficient { name: String },
    #[error("Shape {shape:?} does not hold {len} values")]
    InvalidShape { shape: Vec<usize>, len: usize },
}

/// Posterior draws of one quantity, row-major over `shape`
/// (typically `[chains, draws]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSampleArray")]
pub struct SampleArray {
    shape: Vec<usize>,
    values: Vec<f64>,
}

/// Unchecked wire form; deserialization goes through `SampleArray::new`.
#[derive(Deserialize)]
struct RawSampleArray {
    shape: Vec<usize>,
    values: Vec<f64>,
}

impl TryFrom<RawSampleArray> for SampleArray {
    type Error = ImpactError;

    fn try_from(raw: RawSampleArray) -> Result<Self, Self::Error> {
        SampleArray::new(raw.shape, raw.values)
    }
}

impl SampleArray {
    pub fn new(shape: Vec<usize>, values: Vec<f64>) -> Result<Self, ImpactError> {
        if shape.iter().product::<usize>() != values.len() {
            return Err(ImpactError::InvalidShape { shape, len: values.len() });
        }
        Ok(Self { shape, values })
    }

    /// A one-dimensional array of draws.
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self { shape: vec![values.len()], values }
    }

    /// Zero-dimensional array holding `1.0`; the neutral element of `multiply`.
    pub fn unit() -> Self {
        Self { shape: Vec::new(), values: vec![1.0] }
    }

    pub fn shape(&self) -> &[usize] { &self.shape }
    pub fn values(&self) -> &[f64] { &self.values }
    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    fn is_unit(&self) -> bool { self.shape.is_empty() }

    /// Elementwise product. A zero-dimensional operand broadcasts.
    pub fn multiply(&self, other: &SampleArray) -> Option<SampleArray> {
        if self.is_unit() {
            let s = self.values[0];
            return Some(SampleArray { shape: other.shape.clone(), values: other.values.iter().map(|v| s * v).collect() });
        }
        if other.is_unit() {
            return other.multiply(self);
        }
        if self.shape != other.shape {
            return None;
        }
        let values = self.values.iter().zip(&other.values).map(|(a, b)| a * b).collect();
        Some(SampleArray { shape: self.shape.clone(), values })
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Population standard deviation.
    pub fn std(&self) -> f64 {
        let m = self.mean();
        let var = self.values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / self.values.len() as f64;
        var.sqrt()
    }

    /// `|mean|`, used as the strength of a causal edge.
    pub fn mean_abs_strength(&self) -> f64 {
        self.mean().abs()
    }
}

/// Named posterior arrays returned by the sampling engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PosteriorStore {
    arrays: BTreeMap<String, SampleArray>,
}

impl PosteriorStore {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, name: impl Into<String>, samples: SampleArray) -> Option<SampleArray> {
        self.arrays.insert(name.into(), samples)
    }

    pub fn get(&self, name: &str) -> Option<&SampleArray> { self.arrays.get(name) }

    pub fn require(&self, name: &str) -> Result<&SampleArray, ImpactError> {
        self.get(name).ok_or_else(|| ImpactError::MissingCoefficient { name: name.to_string() })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.arrays.keys().map(String::as_str) }

    pub fn len(&self) -> usize { self.arrays.len() }
    pub fn is_empty(&self) -> bool { self.arrays.is_empty() }
}

impl FromIterator<(String, SampleArray)> for PosteriorStore {
    fn from_iter<T: IntoIterator<Item = (String, SampleArray)>>(iter: T) -> Self {
        Self { arrays: iter.into_iter().collect() }
    }
}
