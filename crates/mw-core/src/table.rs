//! In-memory record store for one measurement table.
//!
//! A [`SourceTable`] is an ordered header plus ordered rows. It also names the
//! column holding the domain key and the column holding the reachability
//! status; every other column passes through untouched. Tables may declare key
//! or status columns they do not actually have: that is how a malformed input
//! file is represented, and consumers decide whether to skip it.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::key::NormalizedKey;
use crate::value::CellValue;

/// One row, with values aligned to the owning table's header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    values: Vec<CellValue>,
}

impl Record {
    #[must_use]
    pub const fn new(values: Vec<CellValue>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.values.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTable {
    name: String,
    columns: Vec<String>,
    key_column: String,
    status_column: String,
    rows: Vec<Record>,
}

impl SourceTable {
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        key_column: impl Into<String>,
        status_column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            columns,
            key_column: key_column.into(),
            status_column: status_column.into(),
            rows: Vec::new(),
        }
    }

    /// Build a table from string rows, typically in tests and fixtures.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RowWidth`] if any row does not match the header.
    pub fn from_rows<I, R, V>(
        name: &str,
        columns: &[&str],
        key_column: &str,
        status_column: &str,
        rows: I,
    ) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let mut table = Self::new(
            name,
            columns.iter().map(ToString::to_string).collect(),
            key_column,
            status_column,
        );
        for row in rows {
            table.push(row.into_iter().map(Into::into).collect())?;
        }
        Ok(table)
    }

    /// Append a row.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RowWidth`] if the row does not have one value per column.
    pub fn push(&mut self, values: Vec<CellValue>) -> Result<(), CoreError> {
        if values.len() != self.columns.len() {
            return Err(CoreError::RowWidth {
                table: self.name.clone(),
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        self.rows.push(Record::new(values));
        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    #[must_use]
    pub fn status_column(&self) -> &str {
        &self.status_column
    }

    #[must_use]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.trim() == column)
    }

    /// Declared key/status columns that are absent from the header.
    #[must_use]
    pub fn missing_columns(&self) -> Vec<String> {
        [&self.key_column, &self.status_column]
            .into_iter()
            .filter(|column| self.column_index(column).is_none())
            .cloned()
            .collect()
    }

    /// A table is usable for consensus when it has both declared columns.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.missing_columns().is_empty()
    }

    /// Value of `column` in `record`.
    #[must_use]
    pub fn value<'a>(&self, record: &'a Record, column: &str) -> Option<&'a CellValue> {
        self.column_index(column).and_then(|index| record.get(index))
    }

    /// Normalized key of a record; `None` when the key cell is missing or blank.
    #[must_use]
    pub fn key_of(&self, record: &Record) -> Option<NormalizedKey> {
        let cell = self.value(record, &self.key_column)?;
        if cell.is_blank() {
            return None;
        }
        let key = NormalizedKey::new(&cell.to_field());
        (!key.is_empty()).then_some(key)
    }

    #[must_use]
    pub fn status_of<'a>(&self, record: &'a Record) -> Option<&'a CellValue> {
        self.value(record, &self.status_column)
    }

    /// All records whose normalized key equals `key`, in row order.
    pub fn find<'a>(&'a self, key: &'a NormalizedKey) -> impl Iterator<Item = &'a Record> + 'a {
        self.rows
            .iter()
            .filter(move |record| self.key_of(record).as_ref() == Some(key))
    }

    /// First record for `key`; duplicates after it are ignored by lookups.
    #[must_use]
    pub fn first<'a>(&'a self, key: &'a NormalizedKey) -> Option<&'a Record> {
        self.find(key).next()
    }

    /// Overwrite the status cell of row `index`.
    ///
    /// Returns whether the stored value actually changed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingColumn`] if the table has no status column,
    /// [`CoreError::Validation`] if `index` is out of range, or
    /// [`CoreError::RowWidth`] if the row is narrower than the header.
    pub fn set_status(&mut self, index: usize, value: CellValue) -> Result<bool, CoreError> {
        let column = self
            .column_index(&self.status_column)
            .ok_or_else(|| CoreError::MissingColumn {
                table: self.name.clone(),
                column: self.status_column.clone(),
            })?;
        let row_count = self.rows.len();
        let expected = self.columns.len();
        let record = self.rows.get_mut(index).ok_or_else(|| {
            CoreError::Validation(format!("row {index} out of range (table has {row_count})"))
        })?;

        let actual = record.values.len();
        let cell = record
            .values
            .get_mut(column)
            .ok_or_else(|| CoreError::RowWidth {
                table: self.name.clone(),
                expected,
                actual,
            })?;
        if *cell == value {
            return Ok(false);
        }
        *cell = value;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dig_table() -> SourceTable {
        SourceTable::from_rows(
            "venezuela",
            &["Dominio", "Status", "Bloqueado"],
            "Dominio",
            "Bloqueado",
            [
                ["example.com", "NXDOMAIN", "Sí"],
                ["https://www.Example.com/", "NOERROR", "No"],
                ["other.org", "NOERROR", "No"],
                ["", "NOERROR", "Sí"],
            ],
        )
        .expect("fixture should build")
    }

    #[test]
    fn rejects_rows_of_wrong_width() {
        let mut table = dig_table();
        let err = table
            .push(vec![CellValue::from("x.com")])
            .expect_err("short row must fail");
        assert!(matches!(
            err,
            CoreError::RowWidth {
                expected: 3,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn find_groups_by_normalized_key() {
        let table = dig_table();
        let key = NormalizedKey::new("EXAMPLE.com");
        let statuses: Vec<String> = table
            .find(&key)
            .filter_map(|r| table.status_of(r))
            .map(CellValue::to_field)
            .collect();
        assert_eq!(statuses, vec!["Sí".to_string(), "No".to_string()]);
        assert_eq!(
            table.first(&key).and_then(|r| table.value(r, "Status")),
            Some(&CellValue::from("NXDOMAIN"))
        );
    }

    #[test]
    fn blank_keys_are_not_keys() {
        let table = dig_table();
        assert_eq!(table.key_of(&table.rows()[3]), None);
    }

    #[test]
    fn missing_columns_are_reported() {
        let table = SourceTable::from_rows(
            "broken",
            &["domain", "Bloqueado"],
            "Dominio",
            "Bloqueado",
            [["x.com", "Sí"]],
        )
        .expect("fixture should build");
        assert_eq!(table.missing_columns(), vec!["Dominio".to_string()]);
        assert!(!table.is_well_formed());
        assert!(dig_table().is_well_formed());
    }

    #[test]
    fn set_status_reports_actual_change() {
        let mut table = dig_table();
        assert!(table.set_status(0, CellValue::from("X")).expect("set"));
        assert!(!table.set_status(0, CellValue::from("X")).expect("set"));
        assert!(table.set_status(99, CellValue::from("X")).is_err());
    }

    #[test]
    fn set_status_on_deserialized_short_row_is_an_error() {
        let json = r#"{
            "name": "venezuela",
            "columns": ["Dominio", "Status", "Bloqueado"],
            "key_column": "Dominio",
            "status_column": "Bloqueado",
            "rows": [{"values": ["example.com"]}]
        }"#;
        let mut table: SourceTable = serde_json::from_str(json).expect("deserialize");

        let err = table
            .set_status(0, CellValue::from("X"))
            .expect_err("short row must fail");
        assert!(matches!(
            err,
            CoreError::RowWidth {
                expected: 3,
                actual: 1,
                ..
            }
        ));
    }
}
