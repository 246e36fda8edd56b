use log::info;

use crate::{data::ColumnKind, dataset::Dataset, error::ReportError};

pub const PREFERRED_CATEGORY_COLUMNS: &[&str] = &["Category", "Department"];
pub const EXCLUDED_CATEGORY_COLUMN: &str = "Name";

/// Picks the grouping column: `Category`, then `Department`, then the first
/// text column (in file order) that is not `Name`.
pub fn resolve_category_column(dataset: &Dataset) -> Result<usize, ReportError> {
    let resolved = PREFERRED_CATEGORY_COLUMNS
        .iter()
        .find_map(|name| dataset.column_index(name))
        .or_else(|| {
            dataset.columns().iter().position(|column| {
                column.kind() == ColumnKind::Text && column.name() != EXCLUDED_CATEGORY_COLUMN
            })
        })
        .ok_or(ReportError::NoCategoryColumn)?;
    info!(
        "Grouping by column '{}'",
        dataset.columns()[resolved].name()
    );
    Ok(resolved)
}

/// Resolves an explicitly requested category column, falling back to
/// [`resolve_category_column`] when none is given.
pub fn select_category_column(
    dataset: &Dataset,
    requested: Option<&str>,
) -> Result<usize, ReportError> {
    match requested {
        Some(name) => dataset
            .column_index(name)
            .ok_or_else(|| ReportError::ColumnNotFound(name.to_string())),
        None => resolve_category_column(dataset),
    }
}
