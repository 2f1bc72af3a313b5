//! Value Objects
//!
//! Immutable outcome types produced while resolving tokens.

mod resolution;
mod upload_failure;

pub use resolution::*;
pub use upload_failure::*;
