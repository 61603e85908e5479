use thiserror::Error;

use crate::model::{Parsed, Value};

/// A recognized-but-invalid input, carrying the human readable reason.
///
/// A mismatch aborts the whole parse; its reason is forwarded verbatim to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct Mismatch {
    reason: String,
}

impl Mismatch {
    /// Create a mismatch with the user facing `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The user facing reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// The result of validating a single value token.
pub type Validation<T> = Result<T, Mismatch>;

/// The three ways a [`Reducer`] may respond to the remaining tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The reducer declines; the next reducer in the chain gets to try.
    NoMatch,
    /// The reducer consumed a prefix of the tokens.
    Match {
        /// The unconsumed remainder.
        rest: Vec<String>,
        /// The previous mapping with exactly one name added or replaced.
        parsed: Parsed,
    },
    /// The reducer recognized its key but the input is invalid.
    Mismatch(Mismatch),
}

impl Outcome {
    /// Build a [`Outcome::Match`] by merging `name = value` into a copy of `parsed`.
    ///
    /// ### Example
    /// ```
    /// # use argchain_builder as argchain;
    /// use argchain::{Outcome, Parsed};
    ///
    /// let outcome = Outcome::matched(&Parsed::new(), "name", "value", vec![]);
    /// assert_eq!(
    ///     outcome,
    ///     Outcome::Match {
    ///         rest: vec![],
    ///         parsed: Parsed::new().with("name", "value"),
    ///     }
    /// );
    /// ```
    pub fn matched(
        parsed: &Parsed,
        name: impl Into<String>,
        value: impl Into<Value>,
        rest: Vec<String>,
    ) -> Self {
        Outcome::Match {
            rest,
            parsed: parsed.with(name, value),
        }
    }

    /// Build a [`Outcome::Mismatch`] from a reason.
    pub fn mismatch(reason: impl Into<String>) -> Self {
        Outcome::Mismatch(Mismatch::new(reason))
    }
}

impl From<Mismatch> for Outcome {
    fn from(mismatch: Mismatch) -> Self {
        Outcome::Mismatch(mismatch)
    }
}

/// Behaviour to match the leading remaining tokens into the parsed mapping.
///
/// Implementations must be pure: the same `(input, parsed)` always produces the same [`Outcome`].
/// Every [`Outcome::Match`] must strictly shorten the input (fewer tokens, or a shorter leading token).
/// The driver relies on this to terminate.
///
/// Any `Fn(&[String], &Parsed) -> Outcome` closure is a reducer, so hand written matchers may join a chain.
pub trait Reducer: Send + Sync {
    /// Attempt to match the leading tokens of `input`.
    fn reduce(&self, input: &[String], parsed: &Parsed) -> Outcome;
}

impl<F> Reducer for F
where
    F: Fn(&[String], &Parsed) -> Outcome + Send + Sync,
{
    fn reduce(&self, input: &[String], parsed: &Parsed) -> Outcome {
        self(input, parsed)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("You have specified more than one value for {key}")]
    Duplicate { key: String },

    #[error("Missing string value for {key}")]
    MissingValue { key: String },

    #[error("Expected {subject} to be {}", describe_choices(.choices))]
    NotAChoice {
        subject: String,
        choices: Vec<String>,
    },

    #[error("{key} must be an integer")]
    NotAnInteger { key: String },

    #[error("{key} is greater than the max safe integer")]
    AboveSafeInteger { key: String },

    #[error("{key} is less than the min safe integer")]
    BelowSafeInteger { key: String },
}

impl From<MatchError> for Mismatch {
    fn from(error: MatchError) -> Self {
        Mismatch::new(error.to_string())
    }
}

impl From<MatchError> for Outcome {
    fn from(error: MatchError) -> Self {
        Outcome::Mismatch(error.into())
    }
}

// `a` alone, otherwise `one of "a", "b" or "c"`.
fn describe_choices(choices: &[String]) -> String {
    match choices {
        [] => String::default(),
        [only] => only.clone(),
        [init @ .., last] => {
            let quoted: Vec<String> = init.iter().map(|c| format!("\"{c}\"")).collect();
            format!("one of {} or \"{last}\"", quoted.join(", "))
        }
    }
}
