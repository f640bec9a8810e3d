use crate::math::RealNumber;
use crate::stats::ExecutionStats;
use anyhow::Result;
use sprs::CsVec;
use std::fmt::Debug;

/// Minimal vector capability required of solutions and multipliers stored in
/// an [`ExecutionStats`].
pub trait VectorLike: Clone + Debug {
    type Elem: RealNumber;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A placeholder of length `len` whose contents carry no meaning.
    fn unpopulated(len: usize) -> Self;

    /// Value at `index`, or `None` when out of range.
    fn entry(&self, index: usize) -> Option<Self::Elem>;
}

impl<T> VectorLike for Vec<T>
where
    T: RealNumber + Debug,
{
    type Elem = T;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn unpopulated(len: usize) -> Self {
        vec![T::nan(); len]
    }

    fn entry(&self, index: usize) -> Option<T> {
        self.get(index).copied()
    }
}

impl<T> VectorLike for CsVec<T>
where
    T: RealNumber + Debug,
{
    type Elem = T;

    fn len(&self) -> usize {
        self.dim()
    }

    fn unpopulated(len: usize) -> Self {
        CsVec::empty(len)
    }

    fn entry(&self, index: usize) -> Option<T> {
        if index >= self.dim() {
            return None;
        }
        Some(self.get(index).copied().unwrap_or_else(T::zero))
    }
}

/// A solver that runs to completion and publishes its outcome into a
/// caller-owned [`ExecutionStats`].
pub trait IterativeSolver<T, S = Vec<T>, V = Vec<T>>
where
    T: RealNumber,
    S: VectorLike<Elem = T>,
    V: VectorLike<Elem = T>,
{
    type Problem;

    fn solve(&mut self, problem: &Self::Problem, stats: &mut ExecutionStats<T, S, V>)
        -> Result<()>;
}
