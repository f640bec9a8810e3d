use indexmap::IndexMap;

use crate::cell::Cell;
use crate::format::{ColumnType, FormatError, FormatRegistry};

#[derive(Debug, Clone)]
pub struct TableOptions {
    pub colsep: usize,
    /// Field name to header label, taking precedence over registry defaults.
    pub hdr_override: IndexMap<String, String>,
}

impl TableOptions {
    pub fn with_colsep(mut self, colsep: usize) -> Self {
        self.colsep = colsep;
        self
    }

    pub fn with_label(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.hdr_override.insert(name.into(), label.into());
        self
    }
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            colsep: 2,
            hdr_override: IndexMap::new(),
        }
    }
}

pub fn log_header<N: AsRef<str>>(
    colnames: &[N],
    coltypes: &[ColumnType],
    options: &TableOptions,
) -> Result<String, FormatError> {
    FormatRegistry::standard().header(colnames, coltypes, &options.hdr_override, options.colsep)
}

/// Row line for `cells`, using the standard registry. Missing cells render as
/// a dash at the width of their type so rows stay aligned with the header.
pub fn log_row(cells: &[Cell], colsep: usize) -> Result<String, FormatError> {
    FormatRegistry::standard().row(cells, colsep)
}

/// A fixed set of named, typed columns bound to one registry.
///
/// Unlike [`log_row`], rows produced through [`Columns::row`] are checked
/// against the declared column types.
#[derive(Debug, Clone)]
pub struct Columns<'r> {
    registry: &'r FormatRegistry,
    names: Vec<String>,
    types: Vec<ColumnType>,
    options: TableOptions,
}

impl Columns<'static> {
    pub fn standard() -> Self {
        Self::new(FormatRegistry::standard())
    }
}

impl<'r> Columns<'r> {
    pub fn new(registry: &'r FormatRegistry) -> Self {
        Self {
            registry,
            names: Vec::new(),
            types: Vec::new(),
            options: TableOptions::default(),
        }
    }

    pub fn column(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.names.push(name.into());
        self.types.push(column_type);
        self
    }

    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn header(&self) -> Result<String, FormatError> {
        self.registry.header(
            &self.names,
            &self.types,
            &self.options.hdr_override,
            self.options.colsep,
        )
    }

    pub fn row(&self, cells: &[Cell]) -> Result<String, FormatError> {
        if cells.len() != self.types.len() {
            return Err(FormatError::CellCount {
                expected: self.types.len(),
                found: cells.len(),
            });
        }
        for (column, (cell, expected)) in cells.iter().zip(&self.types).enumerate() {
            let found = cell.column_type();
            if found != *expected {
                return Err(FormatError::CellType {
                    column,
                    expected: *expected,
                    found,
                });
            }
        }
        self.registry.row(cells, self.options.colsep)
    }
}
