//! Traits which, typically, may be imported without concern: `use argchain::prelude::*`.

/// Needs to be imported in order to call `reduce` directly, or to implement a custom reducer.
pub use crate::matcher::Reducer;
