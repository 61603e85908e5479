use crate::matcher::model::*;
use crate::model::{Parsed, Value};

/// Validates a positional token.
/// `None` declines the token, letting other matchers try it.
pub(crate) type PositionalParse<T> = Box<dyn Fn(&str) -> Option<Validation<T>> + Send + Sync>;

/// Matches the first remaining token by position, at most once.
///
/// Once the name is filled this matcher declines everything.
pub struct PositionalMatcher<T> {
    name: String,
    parse: PositionalParse<T>,
}

impl<T> PositionalMatcher<T> {
    pub(crate) fn new(name: String, parse: PositionalParse<T>) -> Self {
        Self { name, parse }
    }
}

impl<T: Into<Value>> Reducer for PositionalMatcher<T> {
    fn reduce(&self, input: &[String], parsed: &Parsed) -> Outcome {
        if parsed.contains(&self.name) {
            return Outcome::NoMatch;
        }

        let Some(token) = input.first() else {
            return Outcome::NoMatch;
        };

        match (self.parse)(token) {
            None => Outcome::NoMatch,
            Some(Err(mismatch)) => mismatch.into(),
            Some(Ok(value)) => {
                Outcome::matched(parsed, self.name.as_str(), value, input[1..].to_vec())
            }
        }
    }
}

impl<T> std::fmt::Debug for PositionalMatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionalMatcher")
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// Matches positional tokens into a list.
///
/// Non-eager: one token per step.
/// Eager: the longest run of accepted tokens from the front, in a single step.
pub struct PositionalListMatcher<T> {
    name: String,
    parse: PositionalParse<T>,
    eager: bool,
}

impl<T> PositionalListMatcher<T> {
    pub(crate) fn new(name: String, parse: PositionalParse<T>, eager: bool) -> Self {
        Self { name, parse, eager }
    }
}

impl<T: Into<Value>> PositionalListMatcher<T> {
    fn reduce_eager(&self, input: &[String], parsed: &Parsed) -> Outcome {
        let mut values = Vec::default();

        for token in input {
            match (self.parse)(token) {
                None => break,
                Some(Err(mismatch)) => return mismatch.into(),
                Some(Ok(value)) => values.push(value.into()),
            }
        }

        if values.is_empty() {
            return Outcome::NoMatch;
        }

        let consumed = values.len();
        Outcome::Match {
            rest: input[consumed..].to_vec(),
            parsed: parsed.appended(&self.name, values),
        }
    }

    fn reduce_single(&self, input: &[String], parsed: &Parsed) -> Outcome {
        let Some(token) = input.first() else {
            return Outcome::NoMatch;
        };

        match (self.parse)(token) {
            None => Outcome::NoMatch,
            Some(Err(mismatch)) => mismatch.into(),
            Some(Ok(value)) => Outcome::Match {
                rest: input[1..].to_vec(),
                parsed: parsed.appended(&self.name, vec![value.into()]),
            },
        }
    }
}

impl<T: Into<Value>> Reducer for PositionalListMatcher<T> {
    fn reduce(&self, input: &[String], parsed: &Parsed) -> Outcome {
        if self.eager {
            self.reduce_eager(input, parsed)
        } else {
            self.reduce_single(input, parsed)
        }
    }
}

impl<T> std::fmt::Debug for PositionalListMatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionalListMatcher")
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .field("eager", &self.eager)
            .finish()
    }
}
