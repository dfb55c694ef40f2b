mod base;
mod interface;
mod middleware;
mod printer;

pub use base::{ConfigError, ParseError, ParseMode, ParseOutcome};
pub use middleware::GeneralParser;

pub(crate) use base::Parser;
pub(crate) use interface::{ConsoleInterface, LineWrapper, UserInterface, WrapWidth};
pub(crate) use printer::Printer;

#[cfg(test)]
pub(crate) use interface::util;
