//! In-memory dataset loaded from a single CSV file.
//!
//! The whole file is read up front, then every column is typed once from all
//! of its cells (see [`crate::data::infer_kind`]). The resulting [`Dataset`]
//! is immutable and is passed explicitly to the resolver, the aggregator and
//! the chart series builders.

use std::path::Path;

use anyhow::Result;
use encoding_rs::Encoding;
use log::{debug, info};

use crate::{
    data::{ColumnKind, Value, infer_kind, is_missing_token, parse_typed_value},
    error::ReportError,
    io_utils,
};

#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    cells: Vec<Option<Value>>,
}

impl Column {
    fn from_raw(name: String, raw: Vec<Option<String>>) -> Self {
        // A header-only file has no cells to type; its columns stay text.
        let kind = if raw.is_empty() {
            ColumnKind::Text
        } else {
            infer_kind(raw.iter().map(|cell| cell.as_deref()))
        };
        let cells = raw
            .iter()
            .map(|cell| {
                cell.as_deref()
                    .and_then(|value| parse_typed_value(value, kind))
            })
            .collect();
        Self { name, kind, cells }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn cells(&self) -> &[Option<Value>] {
        &self.cells
    }

    pub fn get(&self, row: usize) -> Option<&Value> {
        self.cells.get(row).and_then(Option::as_ref)
    }

    /// Numeric view of the column; non-numeric and missing cells yield `None`.
    pub fn numbers(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.cells
            .iter()
            .map(|cell| cell.as_ref().and_then(Value::as_f64))
    }

    /// Accepts numeric columns and columns without any present value, which
    /// summarize to an empty population.
    pub fn ensure_numeric(&self) -> Result<(), ReportError> {
        if self.kind == ColumnKind::Numeric || self.cells.iter().all(Option::is_none) {
            Ok(())
        } else {
            Err(ReportError::NotNumeric {
                name: self.name.clone(),
                kind: self.kind,
            })
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    /// Resolves the delimiter and encoding options for `path`, then loads it.
    pub fn open(path: &Path, delimiter: Option<u8>, encoding: Option<&str>) -> Result<Self> {
        let delimiter = io_utils::resolve_input_delimiter(path, delimiter);
        let encoding = io_utils::resolve_encoding(encoding)?;
        Self::load(path, delimiter, encoding)
    }

    /// Reads `path` into memory. A missing file is reported as
    /// [`ReportError::InputNotFound`] before any parsing happens.
    pub fn load(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Self> {
        if !path.exists() {
            return Err(ReportError::InputNotFound(path.to_path_buf()).into());
        }
        let table = io_utils::read_table(path, delimiter, encoding)?;
        let dataset = Self::from_records(table.headers, table.rows);
        info!(
            "Loaded {} row(s) across {} column(s) from {:?}",
            dataset.row_count(),
            dataset.column_count(),
            path
        );
        for column in &dataset.columns {
            debug!("Column '{}' inferred as {}", column.name, column.kind);
        }
        Ok(dataset)
    }

    /// Builds a dataset from raw string records. Short rows are padded with
    /// missing cells; NA tokens become missing cells.
    pub fn from_records(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let row_count = rows.len();
        let mut raw_columns: Vec<Vec<Option<String>>> =
            vec![Vec::with_capacity(row_count); headers.len()];
        for row in rows {
            let mut fields = row.into_iter();
            for column in raw_columns.iter_mut() {
                let cell = fields.next().filter(|value| !is_missing_token(value));
                column.push(cell);
            }
        }
        let columns = headers
            .into_iter()
            .zip(raw_columns)
            .map(|(name, raw)| Column::from_raw(name, raw))
            .collect();
        Self { columns, row_count }
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn column(&self, name: &str) -> Result<&Column, ReportError> {
        self.column_index(name)
            .map(|idx| &self.columns[idx])
            .ok_or_else(|| ReportError::ColumnNotFound(name.to_string()))
    }

    pub fn numeric_column(&self, name: &str) -> Result<&Column, ReportError> {
        let column = self.column(name)?;
        column.ensure_numeric()?;
        Ok(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn from_records_types_columns_and_marks_missing_cells() {
        let dataset = Dataset::from_records(
            strings(&["Name", "Department", "Monthly_Salary"]),
            vec![
                strings(&["Ana", "Sales", "5000"]),
                strings(&["Budi", "NA", ""]),
                strings(&["Citra"]),
            ],
        );

        assert_eq!(dataset.row_count(), 3);
        assert_eq!(dataset.headers(), vec!["Name", "Department", "Monthly_Salary"]);
        let salary = dataset.numeric_column("Monthly_Salary").unwrap();
        assert_eq!(
            salary.numbers().collect::<Vec<_>>(),
            vec![Some(5000.0), None, None]
        );
        let department = dataset.column("Department").unwrap();
        assert_eq!(department.kind(), ColumnKind::Text);
        assert_eq!(department.get(0), Some(&Value::Text("Sales".into())));
        assert_eq!(department.get(1), None);
    }

    #[test]
    fn numeric_column_rejects_text_columns() {
        let dataset = Dataset::from_records(
            strings(&["City"]),
            vec![strings(&["Jakarta"]), strings(&["Bandung"])],
        );
        let err = dataset.numeric_column("City").unwrap_err();
        assert!(matches!(err, ReportError::NotNumeric { .. }));
        assert_eq!(err.to_string(), "Column 'City' is text and cannot be summarized");
    }

    #[test]
    fn header_only_columns_are_text_but_still_summarizable() {
        let dataset =
            Dataset::from_records(strings(&["Name", "City", "Monthly_Salary"]), Vec::new());
        assert_eq!(dataset.row_count(), 0);
        assert!(dataset.columns().iter().all(|c| c.kind() == ColumnKind::Text));
        assert!(dataset.numeric_column("Monthly_Salary").is_ok());
    }

    #[test]
    fn column_lookup_reports_missing_names() {
        let dataset = Dataset::from_records(strings(&["City"]), Vec::new());
        let err = dataset.column("Region").unwrap_err();
        assert_eq!(err.to_string(), "Column 'Region' not found in dataset");
    }
}
