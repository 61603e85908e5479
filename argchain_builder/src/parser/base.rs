use std::env;
use thiserror::Error;

use crate::matcher::{Mismatch, Outcome, Reducer};
use crate::model::Parsed;
use crate::parser::interface::{ConsoleInterface, UserInterface};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Error)]
pub(crate) enum ExtractError {
    #[error("{0}")]
    Mismatch(#[from] Mismatch),

    #[error("Unrecognized option: {0}")]
    Unrecognized(String),
}

/// The result of [`parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    /// Every step matched until the tokens ran out, or until no reducer recognized the leading token.
    Valid {
        /// The unrecognized leftover tokens (empty when everything was consumed).
        rest: Vec<String>,
        /// The accumulated mapping.
        parsed: Parsed,
    },
    /// A reducer recognized its input but rejected it.
    /// Nothing parsed before the mismatch is kept.
    Invalid(Mismatch),
}

impl ParseResult {
    /// Whether the parse succeeded (leftover tokens are allowed).
    pub fn is_valid(&self) -> bool {
        matches!(self, ParseResult::Valid { .. })
    }

    /// The leftover tokens of a valid parse.
    pub fn rest(&self) -> Option<&[String]> {
        match self {
            ParseResult::Valid { rest, .. } => Some(rest.as_slice()),
            ParseResult::Invalid(_) => None,
        }
    }

    /// The mapping of a valid parse.
    pub fn parsed(&self) -> Option<&Parsed> {
        match self {
            ParseResult::Valid { parsed, .. } => Some(parsed),
            ParseResult::Invalid(_) => None,
        }
    }

    /// The reason of an invalid parse.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ParseResult::Valid { .. } => None,
            ParseResult::Invalid(mismatch) => Some(mismatch.reason()),
        }
    }

    /// Convert into a standard `Result` of `(rest, parsed)`.
    pub fn into_result(self) -> Result<(Vec<String>, Parsed), Mismatch> {
        match self {
            ParseResult::Valid { rest, parsed } => Ok((rest, parsed)),
            ParseResult::Invalid(mismatch) => Err(mismatch),
        }
    }

    /// Take the parsed mapping, for terminal programs.
    ///
    /// If the parse is invalid, prints the reason to stderr and exits with error code `1` (via [`std::process::exit`]).
    /// If any tokens are left over, prints `Unrecognized option: <first leftover>` and exits with error code `1`.
    ///
    /// Inspect the `ParseResult` directly for a recoverable error path.
    pub fn extract(self) -> Parsed {
        match self.extract_with(&ConsoleInterface::default()) {
            Ok(parsed) => parsed,
            Err(exit_code) => std::process::exit(exit_code),
        }
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Run [`ParseResult::extract`], returning the exit code it would have used rather than exiting.
    ///
    /// ### Example
    /// ```
    /// # use argchain_builder as argchain;
    /// use argchain::{param, parse};
    ///
    /// let name = param::string(&["--name"], "name");
    /// assert_eq!(parse(&name, &["--name"]).extract_or_exit_code(), Err(1));
    /// assert_eq!(parse(&name, &["oops"]).extract_or_exit_code(), Err(1));
    /// ```
    #[cfg(feature = "unit_test")]
    pub fn extract_or_exit_code(self) -> Result<Parsed, i32> {
        self.extract_with(&ConsoleInterface::default())
    }

    pub(crate) fn extract_with(
        self,
        user_interface: &(impl UserInterface + ?Sized),
    ) -> Result<Parsed, i32> {
        let error = match self {
            ParseResult::Valid { rest, parsed } => match rest.into_iter().next() {
                None => return Ok(parsed),
                Some(token) => ExtractError::Unrecognized(token),
            },
            ParseResult::Invalid(mismatch) => ExtractError::from(mismatch),
        };

        user_interface.print_error(error);
        Err(1)
    }
}

/// Run `reducer` against the input `tokens`.
///
/// Starting from an empty mapping, the reducer is applied to the remaining tokens repeatedly:
/// * [`Outcome::Match`] replaces the remaining tokens and the mapping, and the loop continues.
/// * [`Outcome::NoMatch`] stops the loop; the remaining tokens are returned as leftovers.
/// * [`Outcome::Mismatch`] stops the loop and fails the whole parse.
///
/// Leftover tokens are not an error at this level.
///
/// ### Example
/// ```
/// # use argchain_builder as argchain;
/// use argchain::{param, parse, start_chain};
///
/// let chain = start_chain()
///     .add_param(param::string(&["--input"], "input"))
///     .add_param(param::string(&["--output"], "output"))
///     .add_param(param::positional_string("value"));
///
/// let result = parse(&chain, &["--input", "a", "val", "--output", "b"]);
/// let parsed = result.parsed().unwrap();
/// assert_eq!(parsed.string("input"), Some("a"));
/// assert_eq!(parsed.string("output"), Some("b"));
/// assert_eq!(parsed.string("value"), Some("val"));
///
/// let result = parse(&chain, &["--val", "--input", "a"]);
/// assert_eq!(result.rest().unwrap().len(), 3);
/// assert!(result.parsed().unwrap().is_empty());
/// ```
pub fn parse<R, I, S>(reducer: &R, tokens: I) -> ParseResult
where
    R: Reducer + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut rest: Vec<String> = tokens
        .into_iter()
        .map(|token| token.as_ref().to_string())
        .collect();
    let mut parsed = Parsed::new();

    while !rest.is_empty() {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Reducing {} remaining token(s), leading '{}'.", rest.len(), rest[0]);
        }

        match reducer.reduce(&rest, &parsed) {
            Outcome::NoMatch => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("No parameter recognizes '{}'; stopping.", rest[0]);
                }
                break;
            }
            Outcome::Match {
                rest: next_rest,
                parsed: next_parsed,
            } => {
                rest = next_rest;
                parsed = next_parsed;
            }
            Outcome::Mismatch(mismatch) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Mismatch: {mismatch}");
                }
                return ParseResult::Invalid(mismatch);
            }
        }
    }

    ParseResult::Valid { rest, parsed }
}

/// Run `reducer` against the Cli [`env::args`], skipping the program name.
pub fn parse_args<R: Reducer + ?Sized>(reducer: &R) -> ParseResult {
    parse(reducer, env::args().skip(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{param, start_chain, Chain, ListOptions};
    use crate::model::Value;
    use crate::parser::util::InMemoryInterface;
    use crate::test::assert_contains;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn log_level(value: &str, key: &str) -> Result<String, Mismatch> {
        match value {
            "debug" | "info" | "warn" | "error" => Ok(value.to_string()),
            _ => Err(Mismatch::new(format!(
                "{key} should be one of debug, info, warn or error"
            ))),
        }
    }

    fn params() -> Chain {
        let global = start_chain()
            .add_param(param::flag(&["-h", "--help"], "help"))
            .add_param(param::parsed_string(
                &["-l", "--logLevel"],
                "logLevel",
                log_level,
            ));

        start_chain()
            .add_param(global)
            .add_param(param::string(&["-n", "--name"], "name"))
            .add_param(param::flag(&["-v", "--verified"], "verified"))
            .add_param(param::flag(&["-f", "--force"], "force"))
            .add_param(param::enum_string(&["-k", "--kind"], "kind", &["awesome", "ok", "hmm"]).unwrap())
    }

    fn positional() -> Chain {
        start_chain()
            .add_param(param::string(&["--input"], "input"))
            .add_param(param::string(&["--output"], "output"))
            .add_param(param::positional_string("value"))
    }

    #[test]
    fn parse_empty() {
        let input: &[&str] = &[];
        let result = parse(&params(), input);

        assert_eq!(
            result,
            ParseResult::Valid {
                rest: vec![],
                parsed: Parsed::new(),
            }
        );
    }

    #[test]
    fn parse_empty_chain() {
        let result = parse(&start_chain(), &["a", "--b"]);

        assert_eq!(
            result,
            ParseResult::Valid {
                rest: tokens(&["a", "--b"]),
                parsed: Parsed::new(),
            }
        );
    }

    #[test]
    fn parse_stops_at_unrecognized() {
        let result = parse(
            &params(),
            &["-h", "--logLevel", "info", "--verified", "oops", "--name", "Forbes Lindesay"],
        );

        assert_eq!(
            result,
            ParseResult::Valid {
                rest: tokens(&["oops", "--name", "Forbes Lindesay"]),
                parsed: Parsed::from([
                    ("help", Value::Flag(true)),
                    ("logLevel", Value::from("info")),
                    ("verified", Value::Flag(true)),
                ]),
            }
        );
    }

    #[rstest]
    #[case(vec!["-h", "--logLevel", "info", "--logLevel", "warn"], "--logLevel")]
    #[case(vec!["-n", "a", "--name", "b"], "--name")]
    #[case(vec!["-h", "--help"], "--help")]
    #[case(vec!["--verified", "-hv"], "-v")]
    fn parse_duplicate(#[case] input: Vec<&str>, #[case] key: &str) {
        let result = parse(&params(), &input);

        assert_matches!(result, ParseResult::Invalid(mismatch) => {
            assert_eq!(mismatch.reason(), format!("You have specified more than one value for {key}"));
        });
    }

    #[test]
    fn parse_validator_reason_verbatim() {
        let result = parse(&params(), &["-h", "-l", "loud", "-v"]);
        assert_eq!(result.reason(), Some("-l should be one of debug, info, warn or error"));
        assert_eq!(result.parsed(), None);
    }

    #[rstest]
    #[case(vec!["-hv"])]
    #[case(vec!["-vh"])]
    #[case(vec!["-h", "-v"])]
    #[case(vec!["-v", "--help"])]
    fn parse_short_bundle(#[case] input: Vec<&str>) {
        let result = parse(&params(), &input);

        assert_eq!(
            result,
            ParseResult::Valid {
                rest: vec![],
                parsed: Parsed::new().with("help", true).with("verified", true),
            }
        );
    }

    #[test]
    fn parse_short_bundle_partial() {
        let result = parse(&params(), &["-hxf", "y"]);

        assert_eq!(
            result,
            ParseResult::Valid {
                rest: tokens(&["-x", "y"]),
                parsed: Parsed::new().with("help", true).with("force", true),
            }
        );
    }

    #[rstest]
    #[case(vec!["--kind", "ok"], Ok("ok"))]
    #[case(vec!["-k", "hmm"], Ok("hmm"))]
    #[case(vec!["--kind", "yum"], Err(r#"Expected --kind to be one of "awesome", "ok" or "hmm""#))]
    #[case(vec!["-k", "yum"], Err(r#"Expected -k to be one of "awesome", "ok" or "hmm""#))]
    fn parse_enum(#[case] input: Vec<&str>, #[case] expected: Result<&str, &str>) {
        let result = parse(&params(), &input);

        match expected {
            Ok(kind) => assert_eq!(
                result,
                ParseResult::Valid {
                    rest: vec![],
                    parsed: Parsed::new().with("kind", kind),
                }
            ),
            Err(reason) => assert_eq!(result, ParseResult::Invalid(Mismatch::new(reason))),
        }
    }

    #[rstest]
    #[case(vec!["--input", "a", "--output", "b", "val"])]
    #[case(vec!["--input", "a", "val", "--output", "b"])]
    #[case(vec!["val", "--input", "a", "--output", "b"])]
    fn parse_positional_order_independent(#[case] input: Vec<&str>) {
        let result = parse(&positional(), &input);

        assert_eq!(
            result,
            ParseResult::Valid {
                rest: vec![],
                parsed: Parsed::new()
                    .with("input", "a")
                    .with("output", "b")
                    .with("value", "val"),
            }
        );
    }

    #[test]
    fn parse_positional_never_dashed() {
        let input = ["--val", "--input", "a", "--output", "b"];
        let result = parse(&positional(), &input);

        assert_eq!(
            result,
            ParseResult::Valid {
                rest: tokens(&input),
                parsed: Parsed::new(),
            }
        );
    }

    #[test]
    fn parse_multiple_positional() {
        let chain = start_chain()
            .add_param(param::positional_string("input"))
            .add_param(param::positional_string("output"))
            .add_param(param::positional_string("value"));

        let parsed = parse(&chain, &["a", "b", "val"]).extract();

        assert_eq!(
            parsed,
            Parsed::new()
                .with("input", "a")
                .with("output", "b")
                .with("value", "val")
        );
    }

    #[test]
    fn parse_positional_list_around_options() {
        let chain = start_chain()
            .add_param(param::flag(&["-v"], "verbose"))
            .add_param(param::integer(&["-n"], "count"))
            .add_param(param::positional_string_list("files", ListOptions::eager()));

        let result = parse(&chain, &["a", "b", "-n", "3", "c", "-v", "d"]);

        assert_eq!(
            result,
            ParseResult::Valid {
                rest: vec![],
                parsed: Parsed::new()
                    .with("files", vec!["a", "b", "c", "d"])
                    .with("count", 3i64)
                    .with("verbose", true),
            }
        );
    }

    #[test]
    fn parse_integer_bounds() {
        let chain = start_chain().add_param(param::integer(&["--n"], "n"));

        assert_eq!(
            parse(&chain, &["--n", "ten"]).reason(),
            Some("--n must be an integer")
        );
        assert_eq!(
            parse(&chain, &["--n", "9007199254740993"]).reason(),
            Some("--n is greater than the max safe integer")
        );
        assert_eq!(
            parse(&chain, &["--n", "-9007199254740993"]).reason(),
            Some("--n is less than the min safe integer")
        );
    }

    #[test]
    fn parse_unrecognized_returned_untouched() {
        let chain = positional();

        for _ in 0..100 {
            let length = thread_rng().gen_range(1..8);
            // Dash-prefixed, and never a configured key.
            let input: Vec<String> = (0..length)
                .map(|_| format!("--unknown-{}", thread_rng().gen::<u16>()))
                .collect();

            let result = parse(&chain, &input);

            assert_eq!(
                result,
                ParseResult::Valid {
                    rest: input.clone(),
                    parsed: Parsed::new(),
                }
            );
        }
    }

    #[test]
    fn parse_custom_reducer() {
        // Consumes `+name` tokens as flags.
        let plus = |input: &[String], parsed: &Parsed| -> Outcome {
            match input.first().and_then(|token| token.strip_prefix('+')) {
                Some(name) if !name.is_empty() => {
                    Outcome::matched(parsed, name, true, input[1..].to_vec())
                }
                _ => Outcome::NoMatch,
            }
        };
        let chain = start_chain()
            .add_param(plus)
            .add_param(param::positional_string("value"));

        let result = parse(&chain, &["+a", "x", "+b"]);

        assert_eq!(
            result,
            ParseResult::Valid {
                rest: vec![],
                parsed: Parsed::new()
                    .with("a", true)
                    .with("b", true)
                    .with("value", "x"),
            }
        );
    }

    #[test]
    fn into_result() {
        let (rest, parsed) = parse(&positional(), &["v", "--x"]).into_result().unwrap();
        assert_eq!(rest, tokens(&["--x"]));
        assert_eq!(parsed.string("value"), Some("v"));

        let mismatch = parse(&positional(), &["--input"]).into_result().unwrap_err();
        assert_eq!(mismatch.reason(), "Missing string value for --input");
    }

    #[test]
    fn extract_complete() {
        let interface = InMemoryInterface::default();

        let parsed = parse(&positional(), &["v"])
            .extract_with(&interface)
            .unwrap();

        assert_eq!(parsed.string("value"), Some("v"));
        assert_eq!(interface.consume(), None);
    }

    #[test]
    fn extract_leftover() {
        let interface = InMemoryInterface::default();

        let exit_code = parse(&positional(), &["v", "--x", "--y"])
            .extract_with(&interface)
            .unwrap_err();

        assert_eq!(exit_code, 1);
        let error = interface.consume().unwrap();
        assert_contains!(error, "Unrecognized option");
        assert_contains!(error, "--x");
    }

    #[test]
    fn extract_mismatch() {
        let interface = InMemoryInterface::default();

        let exit_code = parse(&params(), &["--kind", "yum"])
            .extract_with(&interface)
            .unwrap_err();

        assert_eq!(exit_code, 1);
        assert_eq!(
            interface.consume(),
            Some(r#"Expected --kind to be one of "awesome", "ok" or "hmm""#.to_string())
        );
    }
}
