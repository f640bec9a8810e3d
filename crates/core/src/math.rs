use num_traits::{Float as NumFloat, FromPrimitive};
use std::ops::{AddAssign, MulAssign, SubAssign};
use std::time::{Duration, Instant};

/// Scalar capability required of objective values and residuals.
pub trait RealNumber:
    NumFloat + FromPrimitive + Send + Sync + AddAssign + SubAssign + MulAssign + 'static
{
}

impl<T> RealNumber for T where
    T: NumFloat + FromPrimitive + Send + Sync + AddAssign + SubAssign + MulAssign + 'static
{
}

#[cfg(not(feature = "f32"))]
pub type Scalar = f64;

#[cfg(feature = "f32")]
pub type Scalar = f32;

pub fn dot<T: RealNumber>(lhs: &[T], rhs: &[T]) -> T {
    assert_eq!(lhs.len(), rhs.len(), "dot product dimension mismatch");
    lhs.iter()
        .zip(rhs.iter())
        .fold(T::zero(), |acc, (a, b)| acc + (*a) * (*b))
}

pub fn norm_inf<T: RealNumber>(data: &[T]) -> T {
    data.iter()
        .copied()
        .map(|v| v.abs())
        .fold(T::zero(), |acc, value| acc.max(value))
}

pub fn axpy<T: RealNumber>(alpha: T, x: &[T], y: &mut [T]) {
    assert_eq!(x.len(), y.len(), "axpy dimension mismatch");
    for (xi, yi) in x.iter().zip(y.iter_mut()) {
        *yi += alpha * (*xi);
    }
}

pub fn project_box<T: RealNumber>(x: &mut [T], lower: &[T], upper: &[T]) {
    assert_eq!(x.len(), lower.len());
    assert_eq!(x.len(), upper.len());
    for ((xi, lo), hi) in x.iter_mut().zip(lower.iter()).zip(upper.iter()) {
        *xi = xi.max(*lo).min(*hi);
    }
}

/// Row-major dense matrix-vector product `out = M x`.
pub fn matvec<T: RealNumber>(matrix: &[T], rows: usize, cols: usize, x: &[T], out: &mut [T]) {
    assert_eq!(matrix.len(), rows * cols, "matrix storage mismatch");
    assert_eq!(x.len(), cols);
    assert_eq!(out.len(), rows);
    for (row, slot) in out.iter_mut().enumerate() {
        *slot = dot(&matrix[row * cols..(row + 1) * cols], x);
    }
}

/// Largest absolute row sum of a square row-major matrix, an upper bound on
/// its spectral radius.
pub fn gershgorin_bound<T: RealNumber>(matrix: &[T], n: usize) -> T {
    assert_eq!(matrix.len(), n * n, "matrix storage mismatch");
    matrix
        .chunks(n.max(1))
        .map(|row| row.iter().fold(T::zero(), |acc, v| acc + v.abs()))
        .fold(T::zero(), |acc, value| acc.max(value))
}

#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed wall time in seconds, the unit `ExecutionStats::set_time` expects.
    pub fn seconds(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::{gershgorin_bound, matvec, norm_inf, project_box, Scalar, Timer};

    #[test]
    fn test_matvec_and_norm() {
        let m = [1.0 as Scalar, 2.0, 3.0, 4.0];
        let x = [1.0, -1.0];
        let mut out = [0.0; 2];
        matvec(&m, 2, 2, &x, &mut out);
        assert!((out[0] + 1.0).abs() < 1e-9);
        assert!((out[1] + 1.0).abs() < 1e-9);
        assert!((norm_inf(&[3.0 as Scalar, -4.0]) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_gershgorin_bound() {
        let m = [2.0 as Scalar, -1.0, -1.0, 3.0];
        assert!((gershgorin_bound(&m, 2) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_box() {
        let mut x = [5.0 as Scalar, -1.0];
        let lower = [0.0, 0.0];
        let upper = [3.0, 2.0];
        project_box(&mut x, &lower, &upper);
        assert!((x[0] - 3.0).abs() < 1e-9);
        assert!((x[1] - 0.0).abs() < 1e-9);
    }

    #[test]
    fn timer_is_monotonic() {
        let timer = Timer::start();
        let first = timer.elapsed();
        assert!(timer.elapsed() >= first);
        assert!(timer.seconds() >= first.as_secs_f64());
    }
}
