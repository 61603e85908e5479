use std::sync::Arc;

use crate::matcher::{Outcome, Reducer};
use crate::model::Parsed;

#[cfg(feature = "tracing_debug")]
use tracing::trace;

/// An ordered group of reducers with first-match-wins semantics.
///
/// A chain is itself a [`Reducer`], so chains nest: a chain of shared "global" flags may be added to any number of other chains.
/// Cloning a chain is cheap; the children are shared, immutable configuration.
///
/// ### Example
/// ```
/// # use argchain_builder as argchain;
/// use argchain::{param, parse, start_chain};
///
/// let global = start_chain()
///     .add_param(param::flag(&["-h", "--help"], "help"));
/// let chain = start_chain()
///     .add_param(global)
///     .add_param(param::string(&["-n", "--name"], "name"));
///
/// let parsed = parse(&chain, &["--name", "abc", "-h"]).extract();
/// assert_eq!(parsed.flag("help"), Some(true));
/// assert_eq!(parsed.string("name"), Some("abc"));
/// ```
#[derive(Clone, Default)]
pub struct Chain {
    params: Vec<Arc<dyn Reducer>>,
}

/// Start an empty chain, which declines everything until a parameter is added.
pub fn start_chain() -> Chain {
    Chain::default()
}

impl Chain {
    /// Start a chain seeded with `initial`.
    pub fn starting_with(initial: impl Reducer + 'static) -> Self {
        start_chain().add_param(initial)
    }

    /// Add a reducer after those already in the chain.
    ///
    /// Earlier parameters get first refusal on every step; `param` only sees the tokens they decline.
    pub fn add_param(mut self, param: impl Reducer + 'static) -> Self {
        self.params.push(Arc::new(param));
        self
    }

    /// The number of direct children in this chain.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether this chain has no children.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl Reducer for Chain {
    fn reduce(&self, input: &[String], parsed: &Parsed) -> Outcome {
        for (_index, param) in self.params.iter().enumerate() {
            match param.reduce(input, parsed) {
                Outcome::NoMatch => continue,
                outcome => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        trace!("Chain parameter #{_index} claimed the step.");
                    }
                    return outcome;
                }
            }
        }

        Outcome::NoMatch
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("params", &self.params.len())
            .finish()
    }
}
