use terminal_size::{terminal_size, Width};

use crate::api::CliOption;
use crate::constant::*;
use crate::parser::{ConfigError, ConsoleInterface, GeneralParser, UserInterface};
use crate::parser::{Parser, Printer};

/// Formatting of the help screen.
///
/// The description wraps at `screen_width`, while option help wraps at `screen_width - tab_width`
/// (each wrapped line is indented by one tab stop).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpFormat {
    /// Maximum characters per line.
    pub screen_width: usize,
    /// Columns taken by one tab stop.
    pub tab_width: usize,
    /// Characters a line may break after.
    pub break_chars: Vec<char>,
}

impl Default for HelpFormat {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            tab_width: DEFAULT_TAB_WIDTH,
            break_chars: DEFAULT_BREAK_CHARS.to_vec(),
        }
    }
}

/// The command line parser builder.
///
/// ### Example
/// ```
/// use flagparse::{ArgumentParser, CliOption, OptionType};
///
/// let parser = ArgumentParser::new("Sums the supplied integers.")
///     .add(CliOption::with_second("-i", "--item")
///         .name("item")
///         .option_type(OptionType::Integer)
///         .repeatable(true)
///         .help("An item to sum."))
///     .build()
///     .unwrap();
///
/// let namespace = parser.parse_args(&["-i", "1", "--item", "2"]).unwrap();
/// assert_eq!(namespace.get_all::<i32>("item").unwrap(), vec![1, 2]);
/// ```
pub struct ArgumentParser {
    description: String,
    options: Vec<CliOption>,
    format: HelpFormat,
}

impl ArgumentParser {
    /// Create a command line parser, described in full sentences by `description`.
    ///
    /// Line breaks `'\n'` in the description are kept; each line is word-wrapped separately.
    ///
    /// ### Example
    /// ```
    /// use flagparse::ArgumentParser;
    ///
    /// let parser = ArgumentParser::new("My program that does awesome stuff.")
    ///     .build()
    ///     .unwrap();
    ///
    /// parser.parse_args(&[]).unwrap();
    /// ```
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            options: Vec::default(),
            format: HelpFormat::default(),
        }
    }

    /// Register an option.
    ///
    /// Options are shown in the help screen in the order they are added.
    /// Names and flags must be unique, which is checked by [`ArgumentParser::build`].
    pub fn add(mut self, option: CliOption) -> Self {
        self.options.push(option);
        self
    }

    /// Set the maximum characters per help screen line.
    pub fn screen_width(mut self, screen_width: usize) -> Self {
        self.format.screen_width = screen_width;
        self
    }

    /// Set the columns taken by one tab stop in the help screen.
    pub fn tab_width(mut self, tab_width: usize) -> Self {
        self.format.tab_width = tab_width;
        self
    }

    /// Set the characters a help screen line may break after.
    ///
    /// ### Example
    /// ```
    /// use flagparse::{ArgumentParser, CliOption};
    ///
    /// let parser = ArgumentParser::new("program")
    ///     .add(CliOption::new("--path").help("One/of/many/path/components."))
    ///     .screen_width(20)
    ///     .break_chars(&[' ', '/'])
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(parser.help_screen(false).contains("\tOne/of/many/\n"));
    /// ```
    pub fn break_chars(mut self, break_chars: &[char]) -> Self {
        self.format.break_chars = break_chars.to_vec();
        self
    }

    /// Replace the whole help screen format.
    pub fn format(mut self, format: HelpFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the screen width from the attached terminal.
    /// Keeps the current screen width when there is no terminal.
    pub fn terminal_width(self) -> Self {
        if let Some((Width(terminal_width), _)) = terminal_size() {
            self.screen_width(terminal_width as usize)
        } else {
            self
        }
    }

    pub(crate) fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface + Send + Sync>,
    ) -> Result<GeneralParser, ConfigError> {
        let printer = Printer::new(self.description, self.options.clone(), &self.format)?;
        let parser = Parser::new(self.options)?;
        Ok(GeneralParser::new(parser, printer, user_interface))
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated option name).
    ///
    /// ### Example
    /// ```
    /// use flagparse::{ArgumentParser, CliOption};
    ///
    /// let result = ArgumentParser::new("program")
    ///     .add(CliOption::new("--name"))
    ///     .add(CliOption::new("-n").name("name"))
    ///     .build();
    ///
    /// assert!(result.is_err());
    /// ```
    pub fn build(self) -> Result<GeneralParser, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }
}
