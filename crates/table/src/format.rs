use indexmap::IndexMap;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

use crate::cell::{Cell, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Float,
    Integer,
    Text,
    Tag,
    /// Anything else, printed through its `Display` with no padding.
    Generic,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Float => "Float",
            ColumnType::Integer => "Integer",
            ColumnType::Text => "Text",
            ColumnType::Tag => "Tag",
            ColumnType::Generic => "Generic",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("no format registered for column type {0}")]
    UnknownFormatType(ColumnType),
    #[error("{names} column names but {types} column types")]
    ColumnMismatch { names: usize, types: usize },
    #[error("table has {expected} columns but the row has {found} cells")]
    CellCount { expected: usize, found: usize },
    #[error("column {column} holds {expected} values but the cell is {found}")]
    CellType {
        column: usize,
        expected: ColumnType,
        found: ColumnType,
    },
}

pub type FormatResult<T> = Result<T, FormatError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// `d.ddde±XX` with `precision` fractional digits and at least two
    /// exponent digits.
    Scientific { precision: usize },
    Fixed { precision: usize },
    Decimal,
    Literal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnFormat {
    pub width: usize,
    pub number: NumberFormat,
    pub align: Alignment,
}

impl ColumnFormat {
    pub const fn new(width: usize, number: NumberFormat, align: Alignment) -> Self {
        Self {
            width,
            number,
            align,
        }
    }

    /// Pads `text` to the column width in terminal columns.
    pub fn pad(&self, text: &str) -> String {
        let padding = " ".repeat(self.width.saturating_sub(display_width(text)));
        match self.align {
            Alignment::Left => format!("{text}{padding}"),
            Alignment::Right => format!("{padding}{text}"),
        }
    }

    /// Formats `value` and pads it to the column width. Wider output is
    /// never truncated.
    pub fn render(&self, value: &Value) -> String {
        self.pad(&self.render_unpadded(value))
    }

    /// Placeholder occupying the same width as a rendered value.
    pub fn placeholder(&self) -> String {
        self.pad("-")
    }

    fn render_unpadded(&self, value: &Value) -> String {
        match (value, self.number) {
            (Value::Float(v), NumberFormat::Scientific { precision }) => scientific(*v, precision),
            (Value::Integer(v), NumberFormat::Scientific { precision }) => {
                scientific(*v as f64, precision)
            }
            (Value::Float(v), NumberFormat::Fixed { precision }) => fixed(*v, precision),
            (Value::Integer(v), NumberFormat::Fixed { precision }) => fixed(*v as f64, precision),
            (Value::Float(v), _) => plain(*v),
            (Value::Integer(v), _) => v.to_string(),
            (Value::Text(s) | Value::Tag(s) | Value::Generic(s), _) => s.clone(),
        }
    }
}

/// Width of `text` in terminal columns, counting wide characters as two.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("Inf")
    } else if value == f64::NEG_INFINITY {
        Some("-Inf")
    } else {
        None
    }
}

fn scientific(value: f64, precision: usize) -> String {
    if let Some(name) = non_finite(value) {
        return name.to_owned();
    }
    let raw = format!("{value:.precision$e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => raw,
    }
}

fn fixed(value: f64, precision: usize) -> String {
    match non_finite(value) {
        Some(name) => name.to_owned(),
        None => format!("{value:.precision$}"),
    }
}

fn plain(value: f64) -> String {
    match non_finite(value) {
        Some(name) => name.to_owned(),
        None => value.to_string(),
    }
}

/// Column formats by type plus default header labels by field name.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    formats: IndexMap<ColumnType, ColumnFormat>,
    headers: IndexMap<String, String>,
}

impl FormatRegistry {
    pub fn empty() -> Self {
        Self {
            formats: IndexMap::new(),
            headers: IndexMap::new(),
        }
    }

    pub fn standard() -> &'static FormatRegistry {
        static STANDARD: OnceLock<FormatRegistry> = OnceLock::new();
        STANDARD.get_or_init(FormatRegistry::default)
    }

    pub fn register(&mut self, column_type: ColumnType, format: ColumnFormat) -> Option<ColumnFormat> {
        self.formats.insert(column_type, format)
    }

    pub fn with_format(mut self, column_type: ColumnType, format: ColumnFormat) -> Self {
        self.register(column_type, format);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, label: impl Into<String>) -> Self {
        self.headers.insert(name.into(), label.into());
        self
    }

    pub fn format(&self, column_type: ColumnType) -> FormatResult<&ColumnFormat> {
        self.formats
            .get(&column_type)
            .ok_or(FormatError::UnknownFormatType(column_type))
    }

    pub fn default_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Display label for column `name`: the override, else the registry
    /// default, else the name itself.
    pub fn label<'a>(&'a self, name: &'a str, overrides: &'a IndexMap<String, String>) -> &'a str {
        overrides
            .get(name)
            .map(String::as_str)
            .or_else(|| self.default_header(name))
            .unwrap_or(name)
    }

    pub fn render(&self, cell: &Cell) -> FormatResult<String> {
        let format = self.format(cell.column_type())?;
        Ok(match cell {
            Cell::Value(value) => format.render(value),
            Cell::Missing(_) => format.placeholder(),
        })
    }

    pub fn header<N: AsRef<str>>(
        &self,
        colnames: &[N],
        coltypes: &[ColumnType],
        hdr_override: &IndexMap<String, String>,
        colsep: usize,
    ) -> FormatResult<String> {
        if colnames.len() != coltypes.len() {
            return Err(FormatError::ColumnMismatch {
                names: colnames.len(),
                types: coltypes.len(),
            });
        }
        let labels = colnames
            .iter()
            .zip(coltypes)
            .map(|(name, column_type)| {
                let format = self.format(*column_type)?;
                Ok(format.pad(self.label(name.as_ref(), hdr_override)))
            })
            .collect::<FormatResult<Vec<_>>>()?;
        Ok(labels.join(&" ".repeat(colsep)))
    }

    pub fn row(&self, cells: &[Cell], colsep: usize) -> FormatResult<String> {
        let rendered = cells
            .iter()
            .map(|cell| self.render(cell))
            .collect::<FormatResult<Vec<_>>>()?;
        Ok(rendered.join(&" ".repeat(colsep)))
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::empty()
            .with_format(
                ColumnType::Float,
                ColumnFormat::new(8, NumberFormat::Scientific { precision: 1 }, Alignment::Right),
            )
            .with_format(
                ColumnType::Integer,
                ColumnFormat::new(6, NumberFormat::Decimal, Alignment::Right),
            )
            .with_format(
                ColumnType::Text,
                ColumnFormat::new(15, NumberFormat::Literal, Alignment::Left),
            )
            .with_format(
                ColumnType::Tag,
                ColumnFormat::new(15, NumberFormat::Literal, Alignment::Left),
            )
            .with_format(
                ColumnType::Generic,
                ColumnFormat::new(0, NumberFormat::Literal, Alignment::Right),
            )
            .with_header("name", "Name")
            .with_header("elapsed_time", "Time")
            .with_header("objective", "f(x)")
            .with_header("dual_feas", "Dual")
            .with_header("primal_feas", "Primal")
    }
}
