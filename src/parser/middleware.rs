use std::env;
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{CliOption, Namespace};
use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::printer::Printer;

/// The configured command line parser.
/// Built via [`ArgumentParser::build`](crate::ArgumentParser::build).
///
/// Parsing only reads the configuration, so one parser may be shared across threads.
pub struct GeneralParser {
    parser: Parser,
    printer: Printer,
    help_requested: AtomicBool,
    user_interface: Box<dyn UserInterface + Send + Sync>,
}

impl std::fmt::Debug for GeneralParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneralParser")
            .field("parser", &self.parser)
            .field("printer", &self.printer)
            .field("help_requested", &self.help_requested)
            .finish()
    }
}

impl GeneralParser {
    pub(crate) fn new(
        parser: Parser,
        printer: Printer,
        user_interface: Box<dyn UserInterface + Send + Sync>,
    ) -> Self {
        Self {
            parser,
            printer,
            help_requested: AtomicBool::new(false),
            user_interface,
        }
    }

    /// Run the command line parser against the input tokens.
    ///
    /// Tokens that match no registered flag are ignored.
    /// The first problem stops the scan (ex: `--help`, or a value that does not match its option's type).
    /// Nothing is printed; see [`GeneralParser::handle_error`] to report the error.
    ///
    /// ### Example
    /// ```
    /// use flagparse::{ArgumentParser, CliOption, ParseError};
    ///
    /// let parser = ArgumentParser::new("program")
    ///     .add(CliOption::new("--name").required(true))
    ///     .build()
    ///     .unwrap();
    ///
    /// let namespace = parser.parse_args(&["--name", "abc"]).unwrap();
    /// assert_eq!(namespace.get_string("name").unwrap(), "abc");
    ///
    /// let error = parser.parse_args(&[]).unwrap_err();
    /// assert_eq!(error, ParseError::RequiredOptionMissing { flags: vec!["--name".to_string()] });
    /// ```
    pub fn parse_args(&self, tokens: &[&str]) -> Result<Namespace, ParseError> {
        self.parse_args_with(tokens, ParseMode::default())
            .map(|outcome| outcome.namespace)
    }

    /// Run the command line parser against the input tokens, with the [`ParseMode`] switches.
    ///
    /// With [`ParseMode::consume`], the outcome lists the token positions this parser owns,
    /// so the [`ParseOutcome::remaining`] tokens may be handed to another parser.
    ///
    /// ### Example
    /// ```
    /// use flagparse::{ArgumentParser, CliOption, ParseMode};
    ///
    /// let parser = ArgumentParser::new("program")
    ///     .add(CliOption::new("--name").required(true))
    ///     .build()
    ///     .unwrap();
    /// let mode = ParseMode { consume: false, suppress_errors: true };
    ///
    /// let outcome = parser.parse_args_with(&["--help"], mode).unwrap();
    /// assert!(outcome.help_requested);
    /// assert_eq!(outcome.namespace.get_string("name").unwrap(), "");
    /// ```
    pub fn parse_args_with(
        &self,
        tokens: &[&str],
        mode: ParseMode,
    ) -> Result<ParseOutcome, ParseError> {
        let result = self.parser.consume(tokens, mode);
        let requested = match &result {
            Ok(outcome) => outcome.help_requested,
            Err(ParseError::HelpRequested) => true,
            Err(_) => false,
        };
        self.help_requested.store(requested, Ordering::SeqCst);

        #[cfg(feature = "tracing_debug")]
        {
            if let Err(error) = &result {
                debug!("Parse of {} token(s) failed: {error:?}.", tokens.len());
            }
        }

        result
    }

    /// Run the command line parser against the Cli [`env::args`] (without the program name).
    pub fn parse_env(&self) -> Result<Namespace, ParseError> {
        let tokens: Vec<String> = env::args().skip(1).collect();
        self.parse_args(
            tokens
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        )
    }

    /// Run the command line parser against the Cli [`env::args`], handling any error.
    ///
    /// On `--help`, the help screen is printed and the process exits with code `0`.
    /// On any other error, the error and help screen are printed and the process exits with code `1` (via [`std::process::exit`]).
    pub fn parse(&self) -> Namespace {
        match self.parse_env() {
            Ok(namespace) => namespace,
            Err(error) => {
                self.handle_error(&error);
                std::process::exit(exit_code(&error));
            }
        }
    }

    /// Whether the most recent parse saw `--help`.
    pub fn help_requested(&self) -> bool {
        self.help_requested.load(Ordering::SeqCst)
    }

    /// Render the complete help screen.
    /// When `requested`, the screen opens with a "Help requested" banner.
    pub fn help_screen(&self, requested: bool) -> String {
        self.render_help(requested, true, true, true)
    }

    /// Render a selection of the help screen's blocks.
    pub fn render_help(
        &self,
        requested: bool,
        show_description: bool,
        show_usage: bool,
        show_options: bool,
    ) -> String {
        self.printer
            .render(requested, show_description, show_usage, show_options)
    }

    /// Report a parse error to the user.
    ///
    /// A help request prints the help screen to standard output.
    /// Any other error prints the message, its debug form, and then the help screen to standard error.
    pub fn handle_error(&self, error: &ParseError) {
        match error {
            ParseError::HelpRequested => {
                self.user_interface.print(self.help_screen(true));
            }
            _ => {
                self.user_interface.print_error(error.to_string());
                self.user_interface.print_error(format!("{error:?}"));
                self.user_interface.print_error(self.help_screen(false));
            }
        }
    }

    /// The registered options, in registration order.
    pub fn options(&self) -> &[CliOption] {
        self.parser.options()
    }

    /// The program description shown in the help screen.
    pub fn description(&self) -> &str {
        self.printer.description()
    }
}

fn exit_code(error: &ParseError) -> i32 {
    match error {
        ParseError::HelpRequested => 0,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ArgumentParser, HelpFormat};
    use crate::model::OptionType;
    use crate::parser::util::InMemoryInterface;
    use crate::test::assert_contains;
    use rstest::rstest;

    fn general_parser(interface: &InMemoryInterface) -> GeneralParser {
        ArgumentParser::new("Adds things up.")
            .add(CliOption::new("--name").required(true).help("Who is adding."))
            .add(
                CliOption::with_second("-n", "--number")
                    .name("number")
                    .option_type(OptionType::Integer)
                    .repeatable(true),
            )
            .add(CliOption::new("--verbose").takes_value(false))
            .build_with_interface(Box::new(interface.clone()))
            .unwrap()
    }

    #[test]
    fn parse_args_empty() {
        // Setup
        let interface = InMemoryInterface::default();
        let general_parser = GeneralParser::new(
            Parser::empty(),
            Printer::empty(),
            Box::new(interface.clone()),
        );

        // Execute
        let namespace = general_parser.parse_args(empty::slice()).unwrap();

        // Verify
        assert_eq!(namespace, Namespace::default());
        assert!(!general_parser.help_requested());
        assert_eq!(interface.consume(), (None, None));
    }

    #[test]
    fn parse_args() {
        // Setup
        let interface = InMemoryInterface::default();
        let general_parser = general_parser(&interface);

        // Execute
        let namespace = general_parser
            .parse_args(&["-n", "1", "--name", "abc", "--number", "2", "--verbose"])
            .unwrap();

        // Verify
        assert_eq!(namespace.get_string("name").unwrap(), "abc");
        assert_eq!(namespace.get_all::<i32>("number").unwrap(), vec![1, 2]);
        assert!(namespace.get_bool("verbose").unwrap());
        assert_eq!(interface.consume(), (None, None));
    }

    #[test]
    fn help_requested_tracks_latest_parse() {
        // Setup
        let interface = InMemoryInterface::default();
        let general_parser = general_parser(&interface);

        // Execute & Verify
        assert_eq!(
            general_parser.parse_args(&["--help"]),
            Err(ParseError::HelpRequested)
        );
        assert!(general_parser.help_requested());

        general_parser.parse_args(&["--name", "abc"]).unwrap();
        assert!(!general_parser.help_requested());

        let outcome = general_parser
            .parse_args_with(
                &["--help"],
                ParseMode {
                    consume: false,
                    suppress_errors: true,
                },
            )
            .unwrap();
        assert!(outcome.help_requested);
        assert!(general_parser.help_requested());
    }

    #[test]
    fn handle_error_help() {
        // Setup
        let interface = InMemoryInterface::default();
        let general_parser = general_parser(&interface);
        let error = general_parser.parse_args(&["--help"]).unwrap_err();

        // Execute
        general_parser.handle_error(&error);

        // Verify
        let message = interface.consume_message();
        assert_eq!(message, general_parser.help_screen(true));
        assert!(message.starts_with("Help requested\n\n"));
        assert_contains!(message, "\tAdds things up.\n");
        assert_contains!(
            message,
            "Usage: [--help] --name NAME [-n, --number NUMBER...] [--verbose]\n"
        );
        assert_contains!(message, "--name NAME\n\tWho is adding.\n");
        assert_contains!(message, "-n, --number NUMBER\n\tnumber\n");
        assert_contains!(message, "--verbose\n\tverbose\n");
    }

    #[rstest]
    #[case(vec![], "Required options not supplied: --name")]
    #[case(vec!["--name"], "No argument supplied: --name")]
    #[case(
        vec!["--name", "abc", "-n", "x"],
        "Invalid argument for '-n': expected integer, but encountered 'x'"
    )]
    fn handle_error(#[case] tokens: Vec<&str>, #[case] expected: &str) {
        // Setup
        let interface = InMemoryInterface::default();
        let general_parser = general_parser(&interface);
        let error = general_parser.parse_args(tokens.as_slice()).unwrap_err();

        // Execute
        general_parser.handle_error(&error);

        // Verify
        let (message, error_message) = interface.consume();
        assert_eq!(message, None);

        let error_message = error_message.unwrap();
        assert!(error_message.starts_with(expected));
        assert_contains!(error_message, &format!("{error:?}"));
        assert_contains!(error_message, &general_parser.help_screen(false));
        assert!(!error_message.contains("Help requested"));
    }

    #[rstest]
    #[case(ParseError::HelpRequested, 0)]
    #[case(ParseError::MissingArgument { flag: "--a".to_string() }, 1)]
    #[case(ParseError::RequiredOptionMissing { flags: vec![] }, 1)]
    fn exit_code_by_error(#[case] error: ParseError, #[case] expected: i32) {
        assert_eq!(exit_code(&error), expected);
    }

    #[test]
    fn render_help_blocks() {
        // Setup
        let interface = InMemoryInterface::default();
        let general_parser = general_parser(&interface);

        // Execute
        let usage = general_parser.render_help(false, false, true, false);
        let description = general_parser.render_help(false, true, false, false);

        // Verify
        assert!(usage.starts_with("Usage: [--help]"));
        assert!(!usage.contains("Options:"));
        assert_eq!(description, "\tAdds things up.\n\n");
        assert_eq!(general_parser.description(), "Adds things up.");
        assert_eq!(general_parser.options().len(), 3);
    }

    #[test]
    fn layered_parsers() {
        // Setup
        let first = ArgumentParser::new("first")
            .add(CliOption::new("--a"))
            .build_with_interface(Box::new(InMemoryInterface::default()))
            .unwrap();
        let second = ArgumentParser::new("second")
            .add(CliOption::new("--b").takes_value(false))
            .build_with_interface(Box::new(InMemoryInterface::default()))
            .unwrap();
        let mode = ParseMode {
            consume: true,
            suppress_errors: false,
        };
        let tokens = vec!["--b", "--a", "1", "rest"];

        // Execute
        let first_outcome = first.parse_args_with(&tokens, mode).unwrap();
        let remaining = first_outcome.remaining(&tokens);
        let second_outcome = second.parse_args_with(&remaining, mode).unwrap();

        // Verify
        assert_eq!(first_outcome.namespace.get_string("a").unwrap(), "1");
        assert_eq!(remaining, vec!["--b", "rest"]);
        assert!(second_outcome.namespace.get_bool("b").unwrap());
        assert_eq!(second_outcome.remaining(&remaining), vec!["rest"]);
    }

    #[test]
    fn shared_across_threads() {
        // Setup
        let general_parser = ArgumentParser::new("program")
            .add(CliOption::new("--n").option_type(OptionType::Long))
            .format(HelpFormat::default())
            .build_with_interface(Box::new(InMemoryInterface::default()))
            .unwrap();

        // Execute
        let results: Vec<i64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8i64)
                .map(|i| {
                    let general_parser = &general_parser;
                    scope.spawn(move || {
                        let value = i.to_string();
                        general_parser
                            .parse_args(&["--n", value.as_str()])
                            .unwrap()
                            .get_i64("n")
                            .unwrap()
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        // Verify
        assert_eq!(results, (0..8).collect::<Vec<i64>>());
    }
}
