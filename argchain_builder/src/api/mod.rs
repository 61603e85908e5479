mod chain;
pub mod param;

use thiserror::Error;

pub use chain::*;
pub use param::ListOptions;

/// An invalid matcher configuration, reported when the matcher is constructed (never while parsing).
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);
