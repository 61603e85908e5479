use crate::matcher::model::*;
use crate::model::{Parsed, Value};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

pub(crate) type KeyedParse<T> = Box<dyn Fn(&str, &str) -> Validation<T> + Send + Sync>;

// Only the first remaining token is compared, by exact string equality.
fn leading_key<'k>(keys: &'k [String], input: &[String]) -> Option<&'k str> {
    let first = input.first()?;
    keys.iter()
        .find(|key| *key == first)
        .map(String::as_str)
}

// A short key is a dash followed by a single ascii letter, ex: `-v`.
fn short_letter(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('-'), Some(letter), None) if letter.is_ascii_alphabetic() => Some(letter),
        _ => None,
    }
}

// `--verbose` and `-v` negate to `--no-verbose` and `--no-v`.
fn negation(key: &str) -> String {
    let bare = key
        .strip_prefix("--")
        .or_else(|| key.strip_prefix('-'))
        .unwrap_or(key);
    format!("--no-{bare}")
}

fn is_short_cluster(token: &str) -> bool {
    match token.strip_prefix('-') {
        Some(letters) => !letters.is_empty() && letters.chars().all(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}

/// Matches a boolean switch.
///
/// * A configured key produces `true`.
/// * A negated key (`--no-<key>`) produces `false`.
/// * A short key (ex: `-v`) also matches inside a bundle (ex: `-xvf`).
/// The letter is peeled from the bundle and the remaining bundle (`-xf`) is left as the first token for other matchers.
pub struct FlagMatcher {
    keys: Vec<String>,
    negations: Vec<String>,
    shorthands: Vec<char>,
    name: String,
}

impl FlagMatcher {
    pub(crate) fn new(keys: Vec<String>, name: String) -> Self {
        let negations = keys.iter().map(|key| negation(key)).collect();
        let mut shorthands: Vec<char> = Vec::default();

        for letter in keys.iter().filter_map(|key| short_letter(key)) {
            if !shorthands.contains(&letter) {
                shorthands.push(letter);
            }
        }

        Self {
            keys,
            negations,
            shorthands,
            name,
        }
    }

    fn set(&self, input: &[String], parsed: &Parsed, key: &str, value: bool) -> Outcome {
        if parsed.contains(&self.name) {
            return MatchError::Duplicate {
                key: key.to_string(),
            }
            .into();
        }

        Outcome::matched(parsed, self.name.as_str(), value, input[1..].to_vec())
    }

    fn peel(&self, input: &[String], parsed: &Parsed) -> Outcome {
        let cluster = &input[0];

        for letter in cluster.chars().skip(1) {
            if self.shorthands.contains(&letter) {
                if parsed.contains(&self.name) {
                    return MatchError::Duplicate {
                        key: format!("-{letter}"),
                    }
                    .into();
                }

                // The leading dash is never a letter, so this strips from inside the bundle.
                // A repeated letter (`-vv`) strips the first copy; both copies are identical.
                let remainder = cluster.replacen(letter, "", 1);
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Peeled '-{letter}' from bundle '{cluster}', leaving '{remainder}'.");
                }
                let mut rest = Vec::with_capacity(input.len());
                rest.push(remainder);
                rest.extend_from_slice(&input[1..]);
                return Outcome::matched(parsed, self.name.as_str(), true, rest);
            }
        }

        Outcome::NoMatch
    }
}

impl Reducer for FlagMatcher {
    fn reduce(&self, input: &[String], parsed: &Parsed) -> Outcome {
        if let Some(key) = leading_key(&self.keys, input) {
            return self.set(input, parsed, key, true);
        }

        if let Some(key) = leading_key(&self.negations, input) {
            return self.set(input, parsed, key, false);
        }

        match input.first() {
            Some(token) if !self.shorthands.is_empty() && is_short_cluster(token) => {
                self.peel(input, parsed)
            }
            _ => Outcome::NoMatch,
        }
    }
}

impl std::fmt::Debug for FlagMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagMatcher")
            .field("keys", &self.keys)
            .field("name", &self.name)
            .finish()
    }
}

/// Matches a key followed by a single value token, at most once.
///
/// The value is passed through a validator `(value, matched_key) -> Validation<T>`.
pub struct StringMatcher<T> {
    keys: Vec<String>,
    name: String,
    parse: KeyedParse<T>,
}

impl<T> StringMatcher<T> {
    pub(crate) fn new(keys: Vec<String>, name: String, parse: KeyedParse<T>) -> Self {
        Self { keys, name, parse }
    }
}

impl<T: Into<Value>> Reducer for StringMatcher<T> {
    fn reduce(&self, input: &[String], parsed: &Parsed) -> Outcome {
        let Some(key) = leading_key(&self.keys, input) else {
            return Outcome::NoMatch;
        };

        if parsed.contains(&self.name) {
            return MatchError::Duplicate {
                key: key.to_string(),
            }
            .into();
        }

        let Some(token) = input.get(1) else {
            return MatchError::MissingValue {
                key: key.to_string(),
            }
            .into();
        };

        match (self.parse)(token, key) {
            Ok(value) => Outcome::matched(parsed, self.name.as_str(), value, input[2..].to_vec()),
            Err(mismatch) => mismatch.into(),
        }
    }
}

impl<T> std::fmt::Debug for StringMatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringMatcher")
            .field("keys", &self.keys)
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// Matches a key followed by a single value token, any number of times.
///
/// Each occurrence appends to the list stored under the name.
pub struct StringListMatcher<T> {
    keys: Vec<String>,
    name: String,
    parse: KeyedParse<T>,
}

impl<T> StringListMatcher<T> {
    pub(crate) fn new(keys: Vec<String>, name: String, parse: KeyedParse<T>) -> Self {
        Self { keys, name, parse }
    }
}

impl<T: Into<Value>> Reducer for StringListMatcher<T> {
    fn reduce(&self, input: &[String], parsed: &Parsed) -> Outcome {
        let Some(key) = leading_key(&self.keys, input) else {
            return Outcome::NoMatch;
        };

        let Some(token) = input.get(1) else {
            return MatchError::MissingValue {
                key: key.to_string(),
            }
            .into();
        };

        match (self.parse)(token, key) {
            Ok(value) => Outcome::Match {
                rest: input[2..].to_vec(),
                parsed: parsed.appended(&self.name, vec![value.into()]),
            },
            Err(mismatch) => mismatch.into(),
        }
    }
}

impl<T> std::fmt::Debug for StringListMatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringListMatcher")
            .field("keys", &self.keys)
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}
