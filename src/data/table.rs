use super::error::DataError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Columnar numeric data backing a dataset.
pub trait TabularSource: Send + Sync + std::fmt::Debug {
    fn column(&self, name: &str) -> Option<&[f64]>;
    fn row_count(&self) -> usize;
}

/// In-memory columnar table. All columns share one length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Vec<f64>>", into = "BTreeMap<String, Vec<f64>>")]
pub struct Table {
    columns: BTreeMap<String, Vec<f64>>,
    rows: usize,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let columns: BTreeMap<String, Vec<f64>> = columns.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let mut lengths = columns.iter().map(|(name, values)| (name, values.len()));
        let rows = match lengths.next() {
            Some((_, len)) => len,
            None => 0,
        };
        if let Some((name, len)) = lengths.find(|&(_, len)| len != rows) {
            return Err(DataError::RaggedColumns { column: name.clone(), expected: rows, actual: len });
        }
        Ok(Self { columns, rows })
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}

impl TabularSource for Table {
    fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    fn row_count(&self) -> usize { self.rows }
}

impl TryFrom<BTreeMap<String, Vec<f64>>> for Table {
    type Error = DataError;

    fn try_from(columns: BTreeMap<String, Vec<f64>>) -> Result<Self, Self::Error> {
        Table::new(columns)
    }
}

impl From<Table> for BTreeMap<String, Vec<f64>> {
    fn from(table: Table) -> Self { table.columns }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_columns_rejected() {
        let err = Table::new([("a", vec![1.0, 2.0]), ("b", vec![1.0])]).unwrap_err();
        assert!(matches!(err, DataError::RaggedColumns { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn test_column_lookup() {
        let t = Table::new([("ISA", vec![1.0, 2.0, 3.0])]).unwrap();
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.column("ISA"), Some(&[1.0, 2.0, 3.0][..]));
        assert!(t.column("rural").is_none());
        assert_eq!(Table::default().row_count(), 0);
    }
}
