//! Shared inputs for the optreport benchmarks.

use optreport_table::{Cell, ColumnType};
use rand::{rngs::SmallRng, Rng};

pub const COLUMN_NAMES: [&str; 5] = ["iter", "objective", "dual_feas", "step", "status"];

pub const COLUMN_TYPES: [ColumnType; 5] = [
    ColumnType::Integer,
    ColumnType::Float,
    ColumnType::Float,
    ColumnType::Float,
    ColumnType::Tag,
];

/// A plausible iteration row; roughly one in ten has no step length.
pub fn random_row(iter: usize, rng: &mut SmallRng) -> Vec<Cell> {
    let step = if rng.gen_bool(0.1) {
        Cell::Missing(ColumnType::Float)
    } else {
        Cell::from(rng.gen::<f64>() * 1e-3)
    };
    vec![
        Cell::from(iter),
        Cell::from(rng.gen::<f64>() * 1e4 - 5e3),
        Cell::from(10f64.powi(-rng.gen_range(0..12))),
        step,
        Cell::tag("first_order"),
    ]
}
