//! `flagparse` is a declarative, flag-oriented command line parser.
//!
//! Register each option once (its flag spellings, type, arity, default and help text),
//! then hand the parser the raw argument tokens.
//! The result is a [`Namespace`] of typed values, keyed by option name.
//!
//! `flagparse` attempts to prioritize the following design concerns:
//! * *Typed values*:
//! Every option declares an [`OptionType`], and a token that does not match its option's type is rejected during the scan.
//! This includes file system paths (ex: [`OptionType::ExistingFile`]), which are checked against the live file system.
//! * *Tolerant scanning*:
//! Tokens that match no registered flag are skipped, not rejected.
//! Positional tokens remain the host program's concern.
//! * *Layering*:
//! Several parsers may share one argument vector, each consuming only the flags it owns (see [`ParseMode::consume`]).
//! * *Plain help*:
//! A fixed-width, word-wrapped help screen, with no colours or shell completions.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/summer.rs")]
//! ```
//!
//! ```console
//! $ summer --help
//! Help requested
//!
//!         Sums up the supplied items.
//!
//! Usage: [--help] [-i, --item ITEM...] [--verbose]
//!
//! Options:
//! -i, --item ITEM
//!         An item to sum.
//!
//! --verbose
//!         Print each item as it is added.
//!
//! $ summer -i 1 --item 2 -i 3
//! Sum: 6
//!
//! $ summer -i blah
//! Invalid argument for '-i': expected integer, but encountered 'blah'
//! InvalidArgument { flag: "-i", expected: Integer, value: "blah" }
//! <help screen>
//! ```
//!
//! # Cli Semantics
//! The tokens are scanned once, left to right.
//!
//! * `--help` is always recognized, and may not be registered.
//! It stops the scan with [`ParseError::HelpRequested`].
//! * A value-taking option uses the next token as its value: `--key value`.
//! The value must exist ([`ParseError::MissingArgument`]) and match the option's type ([`ParseError::InvalidArgument`]).
//! * A scalar option keeps the value of its final occurrence.
//! A repeatable option appends each occurrence's value, in order.
//! * A switch (an option that takes no value) inverts its stored value on each occurrence.
//! A repeatable switch instead appends the inverse of its configured default on each occurrence.
//! * Every required option must appear at least once ([`ParseError::RequiredOptionMissing`]).
//!
//! Unless consuming (see [`ParseMode`]), the scan does not step over an option's value.
//! The value token is inspected again, which means a value that happens to spell a registered flag also triggers that flag.
//!
//! # Features
//! * `tracing_debug`: Emit `tracing` debug events from the parser and help screen.
#![deny(missing_docs)]
mod api;
mod constant;
mod model;
mod parser;

pub use api::*;
pub use model::*;
pub use parser::{ConfigError, GeneralParser, ParseError, ParseMode, ParseOutcome};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
