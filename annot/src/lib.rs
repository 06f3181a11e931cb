//! Annotation value types and bounding box format conversions.

mod common;

pub mod annotation;
pub use annotation::*;

pub mod corners;
pub use corners::*;

pub mod error;
pub use error::*;

pub mod format;
pub use format::*;

pub mod size;
pub use size::*;

pub mod transform;
pub use transform::*;

pub mod prelude {
    pub use crate::{Annotation, BaseConvention, BoxFormat, Corners};
}
