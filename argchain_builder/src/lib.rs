//! Builder module for `argchain`.
//! See the `argchain` documentation root for full details.
#![deny(missing_docs)]
mod api;
mod matcher;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use matcher::{
    FlagMatcher, Mismatch, Outcome, PositionalListMatcher, PositionalMatcher, Reducer,
    StringListMatcher, StringMatcher, Validation,
};
pub use model::*;
pub use parser::{parse, parse_args, ParseResult};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
