use crate::compute::{Impact, SampleArray};
use crate::store::coefficient_name;
use std::fmt::Write;

/// Text audit of impacts between two variables: one branch per path with the
/// composed mean/sd, and one leaf per edge coefficient.
///
/// ```text
/// IMPACT REPORT: education -> sick (2 paths)
/// --------------------------------------------------
/// |-- [P1] education -> sick [mean=1.000, sd=0.000]
/// |   `-- rel_education_to_sick [mean=1.000, sd=0.000, n=2]
/// `-- [P2] education -> poverty -> sick [mean=-3.500, sd=2.500]
///     |-- rel_education_to_poverty [mean=-1.000, sd=0.500, n=2]
///     `-- rel_poverty_to_sick [mean=3.000, sd=1.000, n=2]
/// ```
pub fn format_impacts(source: &str, target: &str, impacts: &[Impact]) -> String {
    let mut output = String::new();
    let noun = if impacts.len() == 1 { "path" } else { "paths" };
    let _ = writeln!(output, "IMPACT REPORT: {} -> {} ({} {})", source, target, impacts.len(), noun);
    let _ = writeln!(output, "--------------------------------------------------");

    if impacts.is_empty() {
        let _ = writeln!(output, "`-- (no causal path)");
        return output;
    }

    for (i, impact) in impacts.iter().enumerate() {
        let is_last = i == impacts.len() - 1;
        let connector = if is_last { "`--" } else { "|--" };
        let summary = impact.summary();
        let _ = writeln!(
            output,
            "{} [P{}] {} [mean={:.3}, sd={:.3}]",
            connector,
            i + 1,
            impact.name,
            summary.mean,
            summary.std
        );

        let stem = build_child_stem(connector);
        for (j, component) in impact.components.iter().enumerate() {
            let leaf = if j == impact.components.len() - 1 { "`--" } else { "|--" };
            let coefficient = coefficient_name(&component.independent.name, &component.dependent.name);
            let _ = writeln!(output, "{}{} {} {}", stem, leaf, coefficient, format_samples(&component.distribution));
        }
    }
    output
}

fn format_samples(samples: &SampleArray) -> String {
    format!("[mean={:.3}, sd={:.3}, n={}]", samples.mean(), samples.std(), samples.len())
}

fn build_child_stem(connector: &str) -> String {
    connector.replace("`--", "    ").replace("|--", "|   ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{compose_path, PosteriorStore};
    use crate::store::Variable;

    fn impacts() -> Vec<Impact> {
        let posterior: PosteriorStore = [
            ("rel_education_to_sick", vec![1.0, 1.0]),
            ("rel_education_to_poverty", vec![-0.5, -1.5]),
            ("rel_poverty_to_sick", vec![2.0, 4.0]),
        ]
        .into_iter()
        .map(|(n, v)| (n.to_string(), SampleArray::from_vec(v)))
        .collect();

        let (e, p, s) = (Variable::positive("education"), Variable::continuous("poverty"), Variable::boolean("sick"));
        vec![
            compose_path(&[e.clone(), s.clone()], &posterior).unwrap(),
            compose_path(&[e, p, s], &posterior).unwrap(),
        ]
    }

    #[test]
    fn test_report_tree() {
        let report = format_impacts("education", "sick", &impacts());
        let expected = "\
IMPACT REPORT: education -> sick (2 paths)
--------------------------------------------------
|-- [P1] education -> sick [mean=1.000, sd=0.000]
|   `-- rel_education_to_sick [mean=1.000, sd=0.000, n=2]
`-- [P2] education -> poverty -> sick [mean=-3.500, sd=2.500]
    |-- rel_education_to_poverty [mean=-1.000, sd=0.500, n=2]
    `-- rel_poverty_to_sick [mean=3.000, sd=1.000, n=2]
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_report_without_paths() {
        let report = format_impacts("rain", "sick", &[]);
        assert!(report.starts_with("IMPACT REPORT: rain -> sick (0 paths)"));
        assert!(report.ends_with("`-- (no causal path)\n"));
    }
}
