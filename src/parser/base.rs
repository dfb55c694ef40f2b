use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{CliOption, Namespace, Value};
use crate::constant::*;
use crate::model::OptionType;

/// The parser could not be built from its configuration.
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// The ways a parse may stop short of producing a [`Namespace`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The `--help` token was seen.
    #[error("Help requested")]
    HelpRequested,
    /// A value-taking flag had no following token.
    #[error("No argument supplied: {flag}")]
    MissingArgument {
        /// The flag spelling that was matched.
        flag: String,
    },
    /// A value-taking flag's following token failed validation.
    #[error("Invalid argument for '{flag}': expected {expected}, but encountered '{value}'")]
    InvalidArgument {
        /// The flag spelling that was matched.
        flag: String,
        /// The option's type.
        expected: OptionType,
        /// The rejected token.
        value: String,
    },
    /// Required options were never matched, listed by primary flag in registration order.
    #[error("Required options not supplied: {}", .flags.join(", "))]
    RequiredOptionMissing {
        /// The primary flags of the missing options.
        flags: Vec<String>,
    },
}

/// Switches for a single parse.
///
/// The default (both `false`) is the behaviour of [`GeneralParser::parse_args`](crate::GeneralParser::parse_args).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseMode {
    /// Record the positions of matched flags and their values in [`ParseOutcome::consumed`].
    /// The scan also steps over each consumed value, rather than re-inspecting it as a potential flag.
    pub consume: bool,
    /// Swallow [`ParseError::HelpRequested`] and [`ParseError::RequiredOptionMissing`], returning a best-effort result.
    /// Missing and invalid arguments still fail.
    pub suppress_errors: bool,
}

/// The result of [`GeneralParser::parse_args_with`](crate::GeneralParser::parse_args_with).
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    /// The parsed values.
    pub namespace: Namespace,
    /// Whether `--help` was seen (only ever `true` when errors are suppressed).
    pub help_requested: bool,
    /// The sorted token positions consumed by this parser (empty unless [`ParseMode::consume`] is set).
    pub consumed: Vec<usize>,
}

impl ParseOutcome {
    /// The tokens not consumed by this parse, in their original order.
    ///
    /// ### Example
    /// ```
    /// use flagparse::{ArgumentParser, CliOption, ParseMode};
    ///
    /// let parser = ArgumentParser::new("program")
    ///     .add(CliOption::new("--name"))
    ///     .build()
    ///     .unwrap();
    /// let tokens = vec!["--name", "abc", "--other", "1"];
    ///
    /// let outcome = parser
    ///     .parse_args_with(&tokens, ParseMode { consume: true, suppress_errors: false })
    ///     .unwrap();
    ///
    /// assert_eq!(outcome.consumed, vec![0, 1]);
    /// assert_eq!(outcome.remaining(&tokens), vec!["--other", "1"]);
    /// ```
    pub fn remaining<'t>(&self, tokens: &[&'t str]) -> Vec<&'t str> {
        tokens
            .iter()
            .enumerate()
            .filter(|(i, _)| self.consumed.binary_search(i).is_err())
            .map(|(_, token)| *token)
            .collect()
    }
}

#[derive(Debug)]
pub(crate) struct Parser {
    options: Vec<CliOption>,
}

impl Parser {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Vec::default()).unwrap()
    }

    pub(crate) fn new(options: Vec<CliOption>) -> Result<Self, ConfigError> {
        let mut names: HashSet<&str> = HashSet::default();
        let mut flags: HashSet<&str> = HashSet::default();

        for option in &options {
            if !names.insert(option.get_name()) {
                return Err(ConfigError(format!(
                    "name '{}' is repeated across options.",
                    option.get_name()
                )));
            }

            for flag in option.flags() {
                if flag.is_empty() {
                    return Err(ConfigError(format!(
                        "option '{}' has an empty flag.",
                        option.get_name()
                    )));
                }

                if flag == HELP_FLAG {
                    return Err(ConfigError(format!(
                        "flag '{HELP_FLAG}' is reserved for the help screen."
                    )));
                }

                if !flags.insert(flag) {
                    return Err(ConfigError(format!(
                        "flag '{flag}' is repeated across options."
                    )));
                }
            }
        }

        Ok(Self { options })
    }

    pub(crate) fn options(&self) -> &[CliOption] {
        &self.options
    }

    /// Scan the tokens left to right, once.
    pub(crate) fn consume(
        &self,
        tokens: &[&str],
        mode: ParseMode,
    ) -> Result<ParseOutcome, ParseError> {
        let mut lookup: HashMap<&str, &CliOption> = HashMap::default();
        // Indices into the options, so the missing flags report in registration order.
        let mut pending: BTreeSet<usize> = BTreeSet::default();

        for (index, option) in self.options.iter().enumerate() {
            for flag in option.flags() {
                lookup.insert(flag, option);
            }

            if option.is_required() {
                pending.insert(index);
            }
        }

        let mut namespace = Namespace::seeded(&self.options);
        let mut help_requested = false;
        let mut consumed = Vec::default();
        let mut i = 0;

        while i < tokens.len() {
            let token = tokens[i];

            if token == HELP_FLAG {
                help_requested = true;

                if !mode.suppress_errors {
                    return Err(ParseError::HelpRequested);
                }

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Suppressed help request at token {i}.");
                }
            } else if let Some(option) = lookup.get(token) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Matched '{token}' at token {i} to '{}'.", option.get_name());
                }

                if option.has_value() {
                    let value = tokens
                        .get(i + 1)
                        .ok_or_else(|| ParseError::MissingArgument {
                            flag: token.to_string(),
                        })?;

                    if !option.is_valid(value) {
                        return Err(ParseError::InvalidArgument {
                            flag: token.to_string(),
                            expected: option.get_type(),
                            value: value.to_string(),
                        });
                    }

                    let parsed = option.parse(value).unwrap_or_else(|| {
                        unreachable!("internal error - a valid token must parse")
                    });

                    store(&mut namespace, option, parsed);

                    if mode.consume {
                        consumed.push(i);
                        consumed.push(i + 1);
                        i += 1;
                    }
                } else {
                    let flipped = if option.is_repeatable() {
                        option.flipped_default()
                    } else {
                        namespace.flip_default(option.get_name())
                    };
                    store(&mut namespace, option, Value::Boolean(flipped));

                    if mode.consume {
                        consumed.push(i);
                    }
                }

                pending.retain(|index| self.options[*index].get_name() != option.get_name());
            }

            i += 1;
        }

        if !pending.is_empty() {
            let flags: Vec<String> = pending
                .iter()
                .map(|index| self.options[*index].flag().to_string())
                .collect();

            if !mode.suppress_errors {
                return Err(ParseError::RequiredOptionMissing { flags });
            }

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Suppressed missing required options: {flags:?}.");
            }
        }

        Ok(ParseOutcome {
            namespace,
            help_requested,
            consumed,
        })
    }
}

fn store(namespace: &mut Namespace, option: &CliOption, value: Value) {
    if option.is_repeatable() {
        namespace.add_value(option.get_name(), value);
    } else {
        namespace.set_value(option.get_name(), value);
    }
}
