#![forbid(unsafe_code)]

pub mod math;
pub mod options;
pub mod problem;
pub mod stats;
pub mod status;
pub mod traits;
pub mod value;

pub use math::*;
pub use options::*;
pub use problem::*;
pub use stats::*;
pub use status::*;
pub use traits::*;
pub use value::*;
