#![forbid(unsafe_code)]

pub mod projected_gradient;

pub use projected_gradient::ProjectedGradient;
