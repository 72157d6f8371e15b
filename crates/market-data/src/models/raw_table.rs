//! Provider-native tabular results.
//!
//! A [`RawTable`] is what a downloader hands back before any normalization:
//! rows keyed by trading date, columns named however the provider names them.
//! Bulk-download style providers group every field by ticker, so a column key
//! can be compound (`Close` + `AAPL`). Those keys are collapsed with
//! [`RawTable::flatten_columns`] before renaming.

use std::fmt;

use chrono::NaiveDate;

/// Column header in a raw provider table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    /// Plain header, e.g. `Close`
    Field(String),
    /// Header split across a grouping dimension, e.g. (`Close`, `600519.SS`)
    Grouped { field: String, group: String },
}

impl ColumnKey {
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    pub fn grouped(field: impl Into<String>, group: impl Into<String>) -> Self {
        Self::Grouped {
            field: field.into(),
            group: group.into(),
        }
    }

    /// Primary field name, ignoring any grouping.
    pub fn name(&self) -> &str {
        match self {
            Self::Field(name) => name,
            Self::Grouped { field, .. } => field,
        }
    }

    pub fn is_grouped(&self) -> bool {
        matches!(self, Self::Grouped { .. })
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, "{}", name),
            Self::Grouped { field, group } => write!(f, "({}, {})", field, group),
        }
    }
}

/// A single dated row. `values` lines up with the table's columns.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRow {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

/// Rows x named columns, indexed by date.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<ColumnKey>,
    rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(columns: Vec<ColumnKey>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Values are padded with `None` or truncated to the column count.
    pub fn push_row(&mut self, date: NaiveDate, mut values: Vec<Option<f64>>) {
        values.resize(self.columns.len(), None);
        self.rows.push(RawRow { date, values });
    }

    pub fn columns(&self) -> &[ColumnKey] {
        &self.columns
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_grouped_columns(&self) -> bool {
        self.columns.iter().any(ColumnKey::is_grouped)
    }

    /// Collapse compound headers down to their primary field name.
    ///
    /// The grouping dimension is discarded. Every call targets one instrument,
    /// so there is at most one group per field in practice; if several remain,
    /// lookups by name see the first.
    pub fn flatten_columns(mut self) -> Self {
        self.columns = self
            .columns
            .into_iter()
            .map(|key| match key {
                ColumnKey::Grouped { field, .. } => ColumnKey::Field(field),
                plain => plain,
            })
            .collect();
        self
    }

    /// Rename headers by primary name. Headers not in `mapping` are left alone.
    pub fn rename_columns(mut self, mapping: &[(&str, &str)]) -> Self {
        for key in &mut self.columns {
            let renamed = mapping
                .iter()
                .find(|(from, _)| *from == key.name())
                .map(|(_, to)| to.to_string());

            if let Some(to) = renamed {
                match key {
                    ColumnKey::Field(name) => *name = to,
                    ColumnKey::Grouped { field, .. } => *field = to,
                }
            }
        }
        self
    }

    /// Position of the first column whose primary name is `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|key| key.name() == name)
    }

    /// Order rows by ascending date. Rows sharing a date keep their order.
    pub fn sort_by_date(&mut self) {
        self.rows.sort_by_key(|row| row.date);
    }
}
