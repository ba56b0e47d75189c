pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod math;
pub mod motion;
pub mod operations;
pub mod tessellation;

pub use error::{PlotError, Result};
