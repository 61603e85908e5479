mod model;
mod option;
mod positional;

pub(crate) use model::MatchError;
pub use model::{Mismatch, Outcome, Reducer, Validation};
pub use option::{FlagMatcher, StringListMatcher, StringMatcher};
pub use positional::{PositionalListMatcher, PositionalMatcher};
