//! Date-aligned table of named series

use crate::core::price::PriceSeries;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Date-indexed table with one column per instrument.
///
/// Rows are the union of every joined series' dates. A cell is `None` when
/// the column's instrument has no quote on that date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesTable {
    columns: Vec<String>,
    rows: BTreeMap<NaiveDate, Vec<Option<f64>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

impl SeriesTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in ascending date order.
    pub fn rows(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<Option<f64>>)> {
        self.rows.iter()
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.rows.keys()
    }

    pub fn has_data(&self) -> bool {
        !self.columns.is_empty() && !self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one column in date order.
    pub fn column(&self, index: usize) -> Vec<Option<f64>> {
        self.rows.values().map(|row| row.get(index).copied().flatten()).collect()
    }

    pub fn to_records(&self) -> Vec<TableRow> {
        self.rows
            .iter()
            .map(|(date, values)| TableRow {
                date: *date,
                values: values.clone(),
            })
            .collect()
    }

    /// Outer-joins `series` on date as the column `name`.
    ///
    /// An empty series is skipped and adds no column. Joining into a column
    /// name that already exists merges into it: values already present win,
    /// the new series only fills dates that were missing.
    pub fn join_series(&mut self, name: &str, series: &PriceSeries) {
        if series.is_empty() {
            return;
        }

        let index = match self.column_index(name) {
            Some(index) => index,
            None => {
                self.columns.push(name.to_string());
                for row in self.rows.values_mut() {
                    row.push(None);
                }
                self.columns.len() - 1
            }
        };

        let width = self.columns.len();
        for (date, value) in &series.points {
            let row = self.rows.entry(*date).or_insert_with(|| vec![None; width]);
            if row[index].is_none() {
                row[index] = Some(*value);
            }
        }
    }

    /// Rescales every column so its first non-null value becomes 100.
    ///
    /// Columns are independent: a column starting later is scaled to its own
    /// first value. A column whose first value is zero, or which has no value
    /// at all, cannot be scaled and is left entirely null; its name is
    /// returned in the second element.
    pub fn normalized(&self) -> (SeriesTable, Vec<String>) {
        let bases: Vec<Option<f64>> = (0..self.columns.len())
            .map(|index| {
                self.rows
                    .values()
                    .find_map(|row| row[index])
                    .filter(|base| *base != 0.0 && base.is_finite())
            })
            .collect();

        let degenerate = self
            .columns
            .iter()
            .zip(&bases)
            .filter(|(_, base)| base.is_none())
            .map(|(name, _)| name.clone())
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|(date, row)| {
                let scaled = row
                    .iter()
                    .zip(&bases)
                    .map(|(value, base)| match (value, base) {
                        (Some(value), Some(base)) => Some(value / base * 100.0),
                        _ => None,
                    })
                    .collect();
                (*date, scaled)
            })
            .collect();

        (
            SeriesTable {
                columns: self.columns.clone(),
                rows,
            },
            degenerate,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn series(symbol: &str, points: &[(&str, f64)]) -> PriceSeries {
        PriceSeries::new(
            symbol,
            points.iter().map(|(date, value)| (d(date), *value)).collect(),
        )
    }

    #[test]
    fn test_outer_join_keeps_every_date() {
        let mut table = SeriesTable::new();
        table.join_series("A", &series("a", &[("2024-01-01", 1.0), ("2024-01-02", 2.0)]));
        table.join_series("B", &series("b", &[("2024-01-02", 20.0), ("2024-01-03", 30.0)]));

        assert_eq!(table.columns(), ["A", "B"]);
        assert_eq!(table.dates().count(), 3);
        assert_eq!(table.column(0), vec![Some(1.0), Some(2.0), None]);
        assert_eq!(table.column(1), vec![None, Some(20.0), Some(30.0)]);
    }

    #[test]
    fn test_empty_series_is_skipped() {
        let mut table = SeriesTable::new();
        table.join_series("A", &PriceSeries::new("a", Vec::new()));
        assert!(!table.has_data());
        assert!(table.columns().is_empty());

        table.join_series("B", &series("b", &[("2024-01-01", 1.0)]));
        table.join_series("C", &PriceSeries::new("c", Vec::new()));
        assert_eq!(table.columns(), ["B"]);
    }

    #[test]
    fn test_duplicate_name_merges_into_one_column() {
        let mut table = SeriesTable::new();
        table.join_series("A", &series("a", &[("2024-01-01", 1.0)]));
        table.join_series("A", &series("a2", &[("2024-01-01", 9.0), ("2024-01-02", 2.0)]));

        assert_eq!(table.columns(), ["A"]);
        assert_eq!(table.column(0), vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_normalization_example() {
        let mut table = SeriesTable::new();
        table.join_series("US CPI", &series("TIP", &[("2024-01-01", 300.0), ("2024-02-01", 303.0)]));

        let (normalized, degenerate) = table.normalized();
        assert!(degenerate.is_empty());
        assert_eq!(normalized.column(0), vec![Some(100.0), Some(101.0)]);
    }

    #[test]
    fn test_later_starting_column_uses_own_base() {
        let mut table = SeriesTable::new();
        table.join_series("A", &series("a", &[("2024-01-01", 50.0), ("2024-01-02", 75.0), ("2024-01-03", 25.0)]));
        table.join_series("B", &series("b", &[("2024-01-02", 4.0), ("2024-01-03", 3.0)]));

        let (normalized, _) = table.normalized();
        assert_eq!(normalized.column(0), vec![Some(100.0), Some(150.0), Some(50.0)]);
        assert_eq!(normalized.column(1), vec![None, Some(100.0), Some(75.0)]);
        for index in 0..2 {
            let first = normalized.column(index).into_iter().flatten().next();
            assert_eq!(first, Some(100.0));
        }
    }

    #[test]
    fn test_zero_base_column_is_left_null() {
        let mut table = SeriesTable::new();
        table.join_series("Zero", &series("z", &[("2024-01-01", 0.0), ("2024-01-02", 5.0)]));
        table.join_series("Ok", &series("o", &[("2024-01-01", 2.0), ("2024-01-02", 3.0)]));

        let (normalized, degenerate) = table.normalized();
        assert_eq!(degenerate, vec!["Zero".to_string()]);
        assert_eq!(normalized.column(0), vec![None, None]);
        assert_eq!(normalized.column(1), vec![Some(100.0), Some(150.0)]);
        assert_eq!(normalized.columns(), table.columns());
    }
}
