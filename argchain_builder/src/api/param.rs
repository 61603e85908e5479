//! Constructors for the primitive matchers.
//!
//! Keyed matchers (`flag`, `string`, `integer`, ..) only ever inspect the first remaining token, comparing it against their keys by exact string equality.
//! There is no abbreviation and no `--key=value` syntax.
//!
//! Positional matchers never consume a dash-prefixed token.
use crate::api::ConfigError;
use crate::matcher::*;
use crate::model::Value;

// The largest integer an f64 represents exactly.
const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;
const MIN_SAFE_INTEGER: i64 = -MAX_SAFE_INTEGER;

/// Options for the positional list matchers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Consume the longest run of accepted tokens in a single step, rather than one token per step.
    pub eager: bool,
}

impl ListOptions {
    /// Options with `eager` set.
    pub fn eager() -> Self {
        Self { eager: true }
    }
}

fn owned(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|key| key.to_string()).collect()
}

fn undashed(value: &str) -> bool {
    !value.starts_with('-')
}

fn choices(
    subject: &str,
    name: &str,
    values: &[&str],
) -> Result<Vec<String>, ConfigError> {
    if values.is_empty() {
        return Err(ConfigError(format!(
            "{subject} '{name}' must be configured with at least one value."
        )));
    }

    Ok(owned(values))
}

fn choose(values: &[String], value: &str, subject: &str) -> Validation<String> {
    if values.iter().any(|v| v == value) {
        Ok(value.to_string())
    } else {
        Err(MatchError::NotAChoice {
            subject: subject.to_string(),
            choices: values.to_vec(),
        }
        .into())
    }
}

fn parse_integer(token: &str, key: &str) -> Validation<i64> {
    let digits = token.strip_prefix('-').unwrap_or(token);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(MatchError::NotAnInteger {
            key: key.to_string(),
        }
        .into());
    }

    // The shape is checked above, so a failed i128 parse can only mean overflow.
    let negative = token.starts_with('-');
    let value = match token.parse::<i128>() {
        Ok(value) => value,
        Err(_) if negative => i128::MIN,
        Err(_) => i128::MAX,
    };

    if value > MAX_SAFE_INTEGER as i128 {
        Err(MatchError::AboveSafeInteger {
            key: key.to_string(),
        }
        .into())
    } else if value < MIN_SAFE_INTEGER as i128 {
        Err(MatchError::BelowSafeInteger {
            key: key.to_string(),
        }
        .into())
    } else {
        Ok(value as i64)
    }
}

/// A boolean switch.
///
/// Matches any of `keys` (`true`), or their negation `--no-<key without dashes>` (`false`).
/// Single letter keys (ex: `-v`) also match inside a short option bundle (ex: `-xvf`).
///
/// ### Example
/// ```
/// # use argchain_builder as argchain;
/// use argchain::{param, parse, start_chain};
///
/// let chain = start_chain()
///     .add_param(param::flag(&["-x", "--extract"], "extract"))
///     .add_param(param::flag(&["-v", "--verbose"], "verbose"))
///     .add_param(param::flag(&["-f", "--force"], "force"));
///
/// let parsed = parse(&chain, &["-xvf"]).extract();
/// assert_eq!(parsed.flag("extract"), Some(true));
/// assert_eq!(parsed.flag("verbose"), Some(true));
/// assert_eq!(parsed.flag("force"), Some(true));
///
/// let parsed = parse(&chain, &["--no-verbose"]).extract();
/// assert_eq!(parsed.flag("verbose"), Some(false));
/// ```
pub fn flag(keys: &[&str], name: impl Into<String>) -> FlagMatcher {
    FlagMatcher::new(owned(keys), name.into())
}

/// A key followed by a single string value.
pub fn string(keys: &[&str], name: impl Into<String>) -> StringMatcher<String> {
    parsed_string(keys, name, |value, _| Ok(value.to_string()))
}

/// A key followed by a single value, validated by `parse(value, matched_key)`.
///
/// A validation `Err` aborts the parse with its reason verbatim.
///
/// ### Example
/// ```
/// # use argchain_builder as argchain;
/// use argchain::{param, parse, Mismatch};
///
/// let level = param::parsed_string(&["-l", "--log-level"], "level", |value, key| match value {
///     "debug" | "info" | "warn" | "error" => Ok(value.to_string()),
///     _ => Err(Mismatch::new(format!("{key} should be one of debug, info, warn or error"))),
/// });
///
/// let result = parse(&level, &["-l", "loud"]);
/// assert_eq!(result.reason(), Some("-l should be one of debug, info, warn or error"));
/// ```
pub fn parsed_string<T, F>(keys: &[&str], name: impl Into<String>, parse: F) -> StringMatcher<T>
where
    T: Into<Value>,
    F: Fn(&str, &str) -> Validation<T> + Send + Sync + 'static,
{
    StringMatcher::new(owned(keys), name.into(), Box::new(parse))
}

/// A repeatable key followed by a single string value, collected into a list.
pub fn string_list(keys: &[&str], name: impl Into<String>) -> StringListMatcher<String> {
    parsed_string_list(keys, name, |value, _| Ok(value.to_string()))
}

/// A repeatable key followed by a single value validated by `parse(value, matched_key)`, collected into a list.
pub fn parsed_string_list<T, F>(
    keys: &[&str],
    name: impl Into<String>,
    parse: F,
) -> StringListMatcher<T>
where
    T: Into<Value>,
    F: Fn(&str, &str) -> Validation<T> + Send + Sync + 'static,
{
    StringListMatcher::new(owned(keys), name.into(), Box::new(parse))
}

/// A key followed by one of a closed set of `values`.
///
/// Errors with [`ConfigError`] when `values` is empty.
///
/// ### Example
/// ```
/// # use argchain_builder as argchain;
/// use argchain::{param, parse};
///
/// let kind = param::enum_string(&["-k", "--kind"], "kind", &["awesome", "ok", "hmm"]).unwrap();
///
/// assert_eq!(parse(&kind, &["--kind", "ok"]).extract().string("kind"), Some("ok"));
/// assert_eq!(
///     parse(&kind, &["--kind", "yum"]).reason(),
///     Some(r#"Expected --kind to be one of "awesome", "ok" or "hmm""#),
/// );
/// ```
pub fn enum_string(
    keys: &[&str],
    name: impl Into<String>,
    values: &[&str],
) -> Result<StringMatcher<String>, ConfigError> {
    let name = name.into();
    let values = choices("enum_string", &name, values)?;
    Ok(parsed_string(keys, name, move |value, key| {
        choose(&values, value, key)
    }))
}

/// A key followed by an integer within the safe integer range (`±(2^53 - 1)`).
pub fn integer(keys: &[&str], name: impl Into<String>) -> StringMatcher<i64> {
    parsed_string(keys, name, parse_integer)
}

/// The first remaining token, by position, unless it is dash-prefixed.
/// Matches at most once.
pub fn positional_string(name: impl Into<String>) -> PositionalMatcher<String> {
    parsed_positional_string(name, |value| {
        undashed(value).then(|| Ok(value.to_string()))
    })
}

/// The first remaining token, by position, validated by `parse(value)`.
/// Matches at most once.
///
/// `parse` returns `None` to decline the token (other matchers then get to try it), or `Some(Err(..))` to abort the parse.
/// Note that `parse` sees dash-prefixed tokens too.
pub fn parsed_positional_string<T, F>(name: impl Into<String>, parse: F) -> PositionalMatcher<T>
where
    T: Into<Value>,
    F: Fn(&str) -> Option<Validation<T>> + Send + Sync + 'static,
{
    PositionalMatcher::new(name.into(), Box::new(parse))
}

/// Positional tokens collected into a list, excluding dash-prefixed tokens.
///
/// ### Example
/// ```
/// # use argchain_builder as argchain;
/// use argchain::{param, parse, ListOptions};
///
/// let files = param::positional_string_list("files", ListOptions::eager());
///
/// let result = parse(&files, &["a", "b", "--c", "d"]);
/// assert_eq!(result.rest(), Some(["--c".to_string(), "d".to_string()].as_slice()));
/// assert_eq!(result.parsed().and_then(|p| p.strings("files")), Some(vec!["a", "b"]));
/// ```
pub fn positional_string_list(
    name: impl Into<String>,
    options: ListOptions,
) -> PositionalListMatcher<String> {
    parsed_positional_string_list(
        name,
        |value| undashed(value).then(|| Ok(value.to_string())),
        options,
    )
}

/// Positional tokens validated by `parse(value)`, collected into a list.
///
/// `parse` returns `None` to decline a token.
/// When eager, the run ends at the first declined token; a run of zero tokens declines the whole step.
/// Both forms store the values returned by `parse`, not the raw tokens.
pub fn parsed_positional_string_list<T, F>(
    name: impl Into<String>,
    parse: F,
    options: ListOptions,
) -> PositionalListMatcher<T>
where
    T: Into<Value>,
    F: Fn(&str) -> Option<Validation<T>> + Send + Sync + 'static,
{
    PositionalListMatcher::new(name.into(), Box::new(parse), options.eager)
}

/// The first remaining token, by position, restricted to a closed set of `values`.
///
/// Failure messages name the parameter, since positionals have no key.
/// Errors with [`ConfigError`] when `values` is empty.
pub fn positional_enum_string(
    name: impl Into<String>,
    values: &[&str],
) -> Result<PositionalMatcher<String>, ConfigError> {
    let name = name.into();
    let values = choices("positional_enum_string", &name, values)?;
    let subject = name.clone();
    Ok(parsed_positional_string(name, move |value| {
        undashed(value).then(|| choose(&values, value, &subject))
    }))
}
