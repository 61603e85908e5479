mod base;
mod interface;

pub use base::{parse, parse_args, ParseResult};

#[cfg(test)]
pub(crate) use interface::util;
