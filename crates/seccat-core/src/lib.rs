// crates/seccat-core/src/lib.rs

pub mod access;
pub mod error;
pub mod escape;
pub mod options;
pub mod transform;

pub use crate::access::resolve;
pub use crate::error::{AccessError, CatError, Result, TransformError};
pub use crate::options::FormatOptions;
pub use crate::transform::{transform, StreamState};
