//! `argchain` is a command line parser for Rust, assembled from small composable matchers.
//!
//! Rather than describing a whole program up front, `argchain` describes the grammar as a chain of independent *reducers*.
//! Each reducer looks at the remaining command line tokens and either:
//! * declines ([`Outcome::NoMatch`]), letting the next reducer in the chain try,
//! * matches ([`Outcome::Match`]), consuming a prefix of the tokens and adding one value to the [`Parsed`] mapping, or
//! * rejects ([`Outcome::Mismatch`]), when it recognizes its key but the value is invalid.
//!
//! The [`parse`] driver applies the chain repeatedly until the tokens run out, nothing matches, or something is rejected.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/demo_chain.rs")]
//! ```
//!
//! ```console
//! $ demo_chain -vf --name abc -r 3
//! force: true
//! name: abc
//! retries: 3
//! verified: true
//!
//! $ demo_chain --log-level loud
//! Expected --log-level to be one of "debug", "info", "warn" or "error"
//!
//! $ demo_chain --name abc --name def
//! You have specified more than one value for --name
//!
//! $ demo_chain oops
//! Unrecognized option: oops
//! ```
//!
//! # Matchers
//! All matchers are built via the [`param`] module.
//!
//! Keyed matchers compare only the *first* remaining token against their keys, by exact string equality.
//! ```console
//! Matcher                         | Syntax            | Value          | Repeatable
//! ---------------------------------------------------------------------------------
//! flag                            | --key, --no-key   | bool           | no
//! string, parsed_string           | --key VALUE       | string / T     | no
//! string_list, parsed_string_list | --key VALUE       | list           | yes
//! enum_string                     | --key CHOICE      | string         | no
//! integer                         | --key N           | integer        | no
//! ```
//!
//! Positional matchers take the first remaining token by position, and never consume a dash-prefixed token.
//! ```console
//! Matcher                                    | Value    | Repeatable
//! --------------------------------------------------------------------
//! positional_string, parsed_positional_string| string/T | no
//! positional_enum_string                     | string   | no
//! positional_string_list (eager or not)      | list     | yes
//! parsed_positional_string_list              | list     | yes
//! ```
//!
//! ```no_run
#![doc = include_str!("../demos/demo_positional.rs")]
//! ```
//!
//! # Cli Semantics
//! * Earlier parameters in a chain get first refusal on every step.
//! A chain is itself a reducer, so a group of shared parameters can be added to several chains.
//! * Scalar values may be given once.
//! A second occurrence fails with `You have specified more than one value for <key>`.
//! * Single letter flags may be bundled: `-xvf` is equivalent to `-x -v -f`.
//! Each flag peels its letter out of the bundle, leaving the rest for the other matchers.
//! * Options and positionals may be interleaved in any order.
//! * Unrecognized tokens stop the parse, and are returned as leftovers.
//! [`ParseResult::extract`] treats leftovers as fatal; inspect the [`ParseResult`] directly to handle them yourself.
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! * `tracing_debug`: Emit `tracing` debug events for each parse step.
pub use argchain_builder::*;
