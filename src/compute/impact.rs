//! Composes per-edge coefficient draws into path-level impact distributions.

use super::samples::{ImpactError, PosteriorStore, SampleArray};
use crate::store::{coefficient_name, Variable};
use rayon::prelude::*;
use serde::Serialize;

/// One edge of an impact path with its raw coefficient draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactComponent {
    pub dependent: Variable,
    pub independent: Variable,
    pub distribution: SampleArray,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Impact {
    pub path: Vec<Variable>,
    /// `a -> b -> c`
    pub name: String,
    pub distribution: SampleArray,
    pub components: Vec<ImpactComponent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactSummary {
    pub mean: f64,
    pub std: f64,
}

impl Impact {
    pub fn summary(&self) -> ImpactSummary {
        ImpactSummary { mean: self.distribution.mean(), std: self.distribution.std() }
    }
}

pub fn path_name(path: &[Variable]) -> String {
    path.iter().map(|v| v.name.as_str()).collect::<Vec<_>>().join(" -> ")
}

/// Elementwise product of `(coefficient name, draws)` pairs, seeded at unit.
///
/// Every array must have the shape of the first one.
pub fn compose<'a, I>(path: &str, edges: I) -> Result<SampleArray, ImpactError>
where
    I: IntoIterator<Item = (&'a str, &'a SampleArray)>,
{
    let mut acc = SampleArray::unit();
    for (coefficient, draws) in edges {
        acc = match acc.multiply(draws) {
            Some(product) => product,
            None => {
                return Err(ImpactError::IncompatibleSampleShape {
                    path: path.to_string(),
                    coefficient: coefficient.to_string(),
                    expected: acc.shape().to_vec(),
                    found: draws.shape().to_vec(),
                })
            }
        };
    }
    Ok(acc)
}

/// Composes one path against the calibrated coefficients.
pub fn compose_path(path: &[Variable], posterior: &PosteriorStore) -> Result<Impact, ImpactError> {
    let name = path_name(path);
    let mut components = Vec::with_capacity(path.len().saturating_sub(1));
    let mut coefficients = Vec::with_capacity(components.capacity());

    for pair in path.windows(2) {
        let (independent, dependent) = (&pair[0], &pair[1]);
        let coefficient = coefficient_name(&independent.name, &dependent.name);
        let draws = posterior.require(&coefficient)?;
        components.push(ImpactComponent {
            dependent: dependent.clone(),
            independent: independent.clone(),
            distribution: draws.clone(),
        });
        coefficients.push(coefficient);
    }

    let distribution = compose(
        &name,
        coefficients.iter().map(String::as_str).zip(components.iter().map(|c| &c.distribution)),
    )?;

    Ok(Impact { path: path.to_vec(), name, distribution, components })
}

/// Composes each path independently, preserving input order.
pub fn compose_paths(paths: &[Vec<Variable>], posterior: &PosteriorStore) -> Result<Vec<Impact>, ImpactError> {
    paths.par_iter().map(|p| compose_path(p, posterior)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Variable { Variable::continuous(name) }

    #[test]
    fn test_compose_two_edges() {
        let a = SampleArray::from_vec(vec![2.0, 3.0]);
        let b = SampleArray::from_vec(vec![5.0, 7.0]);
        let out = compose("a -> b -> c", [("rel_a_to_b", &a), ("rel_b_to_c", &b)]).unwrap();
        assert_eq!(out.values(), &[10.0, 21.0]);
        assert_eq!(out.shape(), &[2]);
    }

    #[test]
    fn test_compose_rejects_mismatched_lengths() {
        let a = SampleArray::from_vec(vec![2.0, 3.0]);
        let b = SampleArray::from_vec(vec![5.0, 7.0, 9.0]);
        let err = compose("a -> b -> c", [("rel_a_to_b", &a), ("rel_b_to_c", &b)]).unwrap_err();
        assert_eq!(
            err,
            ImpactError::IncompatibleSampleShape {
                path: "a -> b -> c".into(),
                coefficient: "rel_b_to_c".into(),
                expected: vec![2],
                found: vec![3],
            }
        );
    }

    #[test]
    fn test_compose_path_keeps_components() {
        let mut posterior = PosteriorStore::new();
        posterior.insert("rel_a_to_b", SampleArray::from_vec(vec![2.0, 3.0]));
        posterior.insert("rel_b_to_c", SampleArray::from_vec(vec![5.0, 7.0]));

        let impact = compose_path(&[var("a"), var("b"), var("c")], &posterior).unwrap();
        assert_eq!(impact.name, "a -> b -> c");
        assert_eq!(impact.distribution.values(), &[10.0, 21.0]);
        assert_eq!(impact.components.len(), 2);
        assert_eq!(impact.components[1].independent.name, "b");
        assert_eq!(impact.components[1].dependent.name, "c");
        assert_eq!(impact.components[0].distribution.values(), &[2.0, 3.0]);
        assert_eq!(impact.summary().mean, 15.5);
    }

    #[test]
    fn test_missing_coefficient() {
        let err = compose_path(&[var("a"), var("b")], &PosteriorStore::new()).unwrap_err();
        assert_eq!(err, ImpactError::MissingCoefficient { name: "rel_a_to_b".into() });
    }

    #[test]
    fn test_compose_paths_preserves_order() {
        let mut posterior = PosteriorStore::new();
        posterior.insert("rel_e_to_h", SampleArray::from_vec(vec![1.0]));
        posterior.insert("rel_e_to_p", SampleArray::from_vec(vec![2.0]));
        posterior.insert("rel_p_to_h", SampleArray::from_vec(vec![3.0]));

        let paths = vec![vec![var("e"), var("h")], vec![var("e"), var("p"), var("h")]];
        let impacts = compose_paths(&paths, &posterior).unwrap();
        let names: Vec<&str> = impacts.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["e -> h", "e -> p -> h"]);
        assert_eq!(impacts[1].distribution.values(), &[6.0]);
    }
}
