#![forbid(unsafe_code)]

pub mod cell;
pub mod format;
pub mod log;

pub use cell::{Cell, Value};
pub use format::{
    display_width, Alignment, ColumnFormat, ColumnType, FormatError, FormatRegistry, NumberFormat,
};
pub use log::{log_header, log_row, Columns, TableOptions};
