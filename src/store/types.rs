use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::error::StoreError;

/// Stable index of a concrete variable inside a resolved graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct VariableId(pub u32);

impl VariableId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }
    pub fn new(idx: usize) -> Self { Self(idx as u32) }
}

/// The closed set of statistical variable kinds.
///
/// The kind decides both how the sampler models the variable (`likelihood`)
/// and how dataset values are prepared before reaching it (`data::transform`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VariableKind {
    Categorical,
    Continuous,
    /// Strictly positive quantity, modelled on the log scale.
    Positive,
    /// Quantity inside `[min, max]`. Missing bounds are taken from the data.
    Bounded { min: Option<f64>, max: Option<f64> },
    /// Ordered categories. `categories: None` infers the count from the data.
    OrdinalScale { categories: Option<u32> },
    Boolean,
}

/// Likelihood family the sampling engine should use for a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Likelihood {
    Normal,
    LogNormal,
    LogitNormal,
    OrderedLogistic,
    Bernoulli,
    Categorical,
}

impl VariableKind {
    pub fn likelihood(&self) -> Likelihood {
        match self {
            VariableKind::Continuous => Likelihood::Normal,
            VariableKind::Positive => Likelihood::LogNormal,
            VariableKind::Bounded { .. } => Likelihood::LogitNormal,
            VariableKind::OrdinalScale { .. } => Likelihood::OrderedLogistic,
            VariableKind::Boolean => Likelihood::Bernoulli,
            VariableKind::Categorical => Likelihood::Categorical,
        }
    }

    /// Number of ordered categories, if the kind has any.
    ///
    /// An undeclared count falls back to the number of distinct finite values in `data`.
    pub fn category_count(&self, data: Option<&[f64]>) -> Option<usize> {
        match self {
            VariableKind::Boolean => Some(2),
            VariableKind::OrdinalScale { categories: Some(n) } => Some(*n as usize),
            VariableKind::OrdinalScale { categories: None } => data.map(|values| {
                let mut distinct: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
                distinct.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
                distinct.dedup();
                distinct.len()
            }),
            _ => None,
        }
    }
}

/// A single named statistical quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub kind: VariableKind,
}

impl Variable {
    pub fn new(name: impl Into<String>, kind: VariableKind) -> Self {
        Self { name: name.into(), kind }
    }

    pub fn categorical(name: impl Into<String>) -> Self { Self::new(name, VariableKind::Categorical) }
    pub fn continuous(name: impl Into<String>) -> Self { Self::new(name, VariableKind::Continuous) }
    pub fn positive(name: impl Into<String>) -> Self { Self::new(name, VariableKind::Positive) }
    pub fn boolean(name: impl Into<String>) -> Self { Self::new(name, VariableKind::Boolean) }

    pub fn bounded(name: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(name, VariableKind::Bounded { min, max })
    }

    pub fn ordinal(name: impl Into<String>, categories: Option<u32>) -> Self {
        Self::new(name, VariableKind::OrdinalScale { categories })
    }

    /// Names of the nuisance parameters the sampler creates for this variable.
    pub fn auxiliary_parameters(&self) -> Vec<String> {
        match self.kind {
            VariableKind::Continuous
            | VariableKind::Positive
            | VariableKind::Bounded { .. }
            | VariableKind::Categorical => {
                vec![format!("b_{}", self.name), format!("sd_{}", self.name)]
            }
            VariableKind::Boolean => vec![format!("b_{}", self.name)],
            VariableKind::OrdinalScale { .. } => vec![format!("cutpoints_{}", self.name)],
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Name of the coefficient carrying the effect of `independent` on `dependent`.
pub fn coefficient_name(independent: &str, dependent: &str) -> String {
    format!("rel_{}_to_{}", independent, dependent)
}

/// Interchangeable candidates for one causal role, in preference order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVariableGroup")]
pub struct VariableGroup {
    name: String,
    candidates: Vec<Variable>,
}

#[derive(Deserialize)]
struct RawVariableGroup {
    name: String,
    candidates: Vec<Variable>,
}

impl TryFrom<RawVariableGroup> for VariableGroup {
    type Error = StoreError;

    fn try_from(raw: RawVariableGroup) -> Result<Self, Self::Error> {
        VariableGroup::new(raw.name, raw.candidates)
    }
}

impl VariableGroup {
    pub fn new(name: impl Into<String>, candidates: Vec<Variable>) -> Result<Self, StoreError> {
        let name = name.into();
        if candidates.is_empty() {
            return Err(StoreError::EmptyGroup { group: name });
        }
        Ok(Self { name, candidates })
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn candidates(&self) -> &[Variable] { &self.candidates }
}

impl fmt::Display for VariableGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One side of a relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Endpoint {
    Variable(Variable),
    Group(VariableGroup),
}

impl Endpoint {
    pub fn name(&self) -> &str {
        match self {
            Endpoint::Variable(v) => &v.name,
            Endpoint::Group(g) => g.name(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Variable> for Endpoint {
    fn from(v: Variable) -> Self { Endpoint::Variable(v) }
}

impl From<&Variable> for Endpoint {
    fn from(v: &Variable) -> Self { Endpoint::Variable(v.clone()) }
}

impl From<VariableGroup> for Endpoint {
    fn from(g: VariableGroup) -> Self { Endpoint::Group(g) }
}

impl From<&VariableGroup> for Endpoint {
    fn from(g: &VariableGroup) -> Self { Endpoint::Group(g.clone()) }
}

impl From<&Endpoint> for Endpoint {
    fn from(e: &Endpoint) -> Self { e.clone() }
}

/// A directed causal edge, `independent -> dependent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub independent: Endpoint,
    pub dependent: Endpoint,
}

impl Relation {
    pub fn new(independent: impl Into<Endpoint>, dependent: impl Into<Endpoint>) -> Self {
        Self { independent: independent.into(), dependent: dependent.into() }
    }

    /// Canonical total order: independent name first, dependent name second.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.independent
            .name()
            .cmp(other.independent.name())
            .then_with(|| self.dependent.name().cmp(other.dependent.name()))
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.independent, self.dependent)
    }
}
