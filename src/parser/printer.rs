#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{CliOption, HelpFormat};
use crate::constant::*;
use crate::parser::{ConfigError, LineWrapper, WrapWidth};

#[derive(Debug)]
pub(crate) struct Printer {
    description: String,
    options: Vec<CliOption>,
    screen_width: usize,
    description_wrapper: LineWrapper,
    option_wrapper: LineWrapper,
}

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new("", Vec::default(), &HelpFormat::default()).unwrap()
    }

    pub(crate) fn new(
        description: impl Into<String>,
        options: Vec<CliOption>,
        format: &HelpFormat,
    ) -> Result<Self, ConfigError> {
        let description_width = WrapWidth::new(format.screen_width).map_err(|_| {
            ConfigError(format!(
                "screen width must be at least 1 (was {}).",
                format.screen_width
            ))
        })?;
        let option_width = WrapWidth::new(format.screen_width.saturating_sub(format.tab_width))
            .map_err(|_| {
                ConfigError(format!(
                    "screen width {} must exceed the tab width {}.",
                    format.screen_width, format.tab_width
                ))
            })?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Help screen width {}, option help width {}.",
                description_width.value(),
                option_width.value()
            );
        }

        Ok(Self {
            description: description.into(),
            options,
            screen_width: format.screen_width,
            description_wrapper: LineWrapper::new(description_width, &format.break_chars),
            option_wrapper: LineWrapper::new(option_width, &format.break_chars),
        })
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn render(
        &self,
        requested: bool,
        show_description: bool,
        show_usage: bool,
        show_options: bool,
    ) -> String {
        let mut out = String::default();

        if requested {
            out.push_str(HELP_REQUESTED);
            out.push_str("\n\n");
        }

        if show_description {
            for line in self.description.split('\n') {
                push_indented(&mut out, self.description_wrapper.wrap(line));
            }

            out.push('\n');
        }

        if show_usage {
            self.render_usage(&mut out);
        }

        if show_options {
            out.push_str(OPTIONS_HEADER);
            out.push('\n');

            for option in &self.options {
                out.push_str(&flags_grammar(option));
                out.push('\n');

                for line in option.get_help().split('\n') {
                    push_indented(&mut out, self.option_wrapper.wrap(line));
                }

                out.push('\n');
            }
        }

        out
    }

    fn render_usage(&self, out: &mut String) {
        let continuation = format!("\n{:width$}", "", width = USAGE_PREFIX.len());
        out.push_str(USAGE_PREFIX);
        out.push_str(" [");
        out.push_str(HELP_FLAG);
        out.push(']');

        for option in &self.options {
            let grammar = usage_grammar(option);

            // The 1 accounts for the separating space.
            if current_line_width(out) + 1 + grammar.chars().count() > self.screen_width {
                out.push_str(&continuation);
            }

            out.push(' ');
            out.push_str(&grammar);
        }

        out.push_str("\n\n");
    }
}

fn push_indented(out: &mut String, lines: Vec<String>) {
    for line in lines {
        out.push('\t');
        out.push_str(&line);
        out.push('\n');
    }
}

// Measured from the last newline, not from the start of the buffer.
fn current_line_width(out: &str) -> usize {
    match out.rfind('\n') {
        Some(i) => out[i + 1..].chars().count(),
        None => out.chars().count(),
    }
}

// Ex: "-o, --output FILE"
fn flags_grammar(option: &CliOption) -> String {
    let mut grammar = option.flag().to_string();

    if let Some(second) = option.second_flag() {
        grammar.push_str(", ");
        grammar.push_str(second);
    }

    if option.has_value() {
        grammar.push(' ');
        grammar.push_str(&option.placeholder());
    }

    grammar
}

// Ex: "[-o, --output FILE...]"
fn usage_grammar(option: &CliOption) -> String {
    let mut grammar = flags_grammar(option);

    if option.is_repeatable() {
        grammar.push_str("...");
    }

    if option.is_required() {
        grammar
    } else {
        format!("[{grammar}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OptionType;
    use rstest::rstest;

    fn printer(options: Vec<CliOption>, screen_width: usize) -> Printer {
        Printer::new(
            "My program.",
            options,
            &HelpFormat {
                screen_width,
                ..HelpFormat::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn render_empty() {
        // Setup
        let printer = Printer::empty();

        // Execute
        let message = printer.render(false, true, true, true);

        // Verify
        assert_eq!(message, "\t\n\nUsage: [--help]\n\nOptions:\n");
    }

    #[test]
    fn render_requested() {
        let message = Printer::empty().render(true, false, false, false);
        assert_eq!(message, "Help requested\n\n");
    }

    #[test]
    fn render_option() {
        // Setup
        let printer = printer(
            vec![CliOption::with_second("-o", "--output")
                .name("output")
                .help("Where to write.")],
            80,
        );

        // Execute
        let message = printer.render(false, true, true, true);

        // Verify
        assert_eq!(
            message,
            "\tMy program.\n\
             \n\
             Usage: [--help] [-o, --output OUTPUT]\n\
             \n\
             Options:\n\
             -o, --output OUTPUT\n\
             \tWhere to write.\n\
             \n"
        );
    }

    #[rstest]
    #[case(CliOption::new("--flag"), "[--flag FLAG]")]
    #[case(CliOption::new("--flag").required(true), "--flag FLAG")]
    #[case(CliOption::new("--flag").repeatable(true), "[--flag FLAG...]")]
    #[case(CliOption::new("--flag").repeatable(true).required(true), "--flag FLAG...")]
    #[case(CliOption::new("--flag").takes_value(false), "[--flag]")]
    #[case(CliOption::new("--flag").takes_value(false).repeatable(true), "[--flag...]")]
    #[case(CliOption::new("--flag").display_name("NUM"), "[--flag NUM]")]
    #[case(CliOption::with_second("-f", "--flag"), "[-f, --flag F]")]
    #[case(CliOption::new("--out-dir").option_type(OptionType::Directory), "[--out-dir OUT-DIR]")]
    fn render_usage_grammar(#[case] option: CliOption, #[case] expected: &str) {
        let message = printer(vec![option], 80).render(false, false, true, false);
        assert_eq!(message, format!("Usage: [--help] {expected}\n\n"));
    }

    #[test]
    fn render_usage_wraps() {
        // Setup
        let printer = printer(
            vec![
                CliOption::new("--alpha").required(true),
                CliOption::new("--beta").required(true),
                CliOption::new("--gamma").required(true),
                CliOption::new("--delta").required(true),
            ],
            41,
        );

        // Execute
        let message = printer.render(false, false, true, false);

        // Verify
        assert_eq!(
            message,
            "Usage: [--help] --alpha ALPHA --beta BETA\n       --gamma GAMMA --delta DELTA\n\n"
        );

        for line in message.lines() {
            assert!(line.len() <= 41);
        }
    }

    #[test]
    fn render_usage_wraps_after_description() {
        // The description lines must not count towards the usage line width.
        let printer = Printer::new(
            "A description long enough to fill most of the line.",
            vec![CliOption::new("--alpha").required(true)],
            &HelpFormat {
                screen_width: 60,
                ..HelpFormat::default()
            },
        )
        .unwrap();

        let message = printer.render(true, true, true, false);

        assert_eq!(
            message,
            "Help requested\n\n\
             \tA description long enough to fill most of the line.\n\
             \n\
             Usage: [--help] --alpha ALPHA\n\n"
        );
    }

    #[test]
    fn render_description_wraps() {
        // Setup
        let printer = Printer::new(
            "The quick brown fox jumps over the lazy dog.\nSecond line.",
            Vec::default(),
            &HelpFormat {
                screen_width: 20,
                ..HelpFormat::default()
            },
        )
        .unwrap();

        // Execute
        let message = printer.render(false, true, false, false);

        // Verify
        assert_eq!(
            message,
            "\tThe quick brown fox\n\
             \tjumps over the lazy\n\
             \tdog.\n\
             \tSecond line.\n\
             \n"
        );
    }

    #[test]
    fn render_options_trailing_space() {
        // Setup
        let printer = printer(vec![CliOption::new("--o").help("abcdefghij ")], 18);

        // Execute
        let message = printer.render(false, false, false, true);

        // Verify
        assert_eq!(message, "Options:\n--o O\n\tabcdefghij\n\n");
    }

    #[test]
    fn render_options_wraps_help() {
        // Setup
        let printer = printer(
            vec![
                CliOption::new("--verbose")
                    .takes_value(false)
                    .help("Print more.\nRepeat the flag, to print even more than that."),
                CliOption::new("--n").option_type(OptionType::Integer),
            ],
            30,
        );

        // Execute
        let message = printer.render(false, false, false, true);

        // Verify
        assert_eq!(
            message,
            "Options:\n\
             --verbose\n\
             \tPrint more.\n\
             \tRepeat the flag, to\n\
             \tprint even more than\n\
             \tthat.\n\
             \n\
             --n N\n\
             \tn\n\
             \n"
        );
    }

    #[test]
    fn render_options_line_bound() {
        // Setup
        let help = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.";
        let printer = printer(vec![CliOption::new("--lorem").help(help)], 40);

        // Execute
        let message = printer.render(false, false, false, true);

        // Verify
        let wrapped: Vec<&str> = message
            .lines()
            .filter_map(|line| line.strip_prefix('\t'))
            .collect();
        assert!(wrapped.len() > 1);

        for line in &wrapped {
            assert!(line.len() <= 40 - 8, "'{line}' is too long");
        }

        assert_eq!(wrapped.join(" "), help);
    }

    #[rstest]
    #[case(0, 8)]
    #[case(8, 8)]
    #[case(4, 8)]
    fn new_invalid_widths(#[case] screen_width: usize, #[case] tab_width: usize) {
        let result = Printer::new(
            "",
            Vec::default(),
            &HelpFormat {
                screen_width,
                tab_width,
                ..HelpFormat::default()
            },
        );
        assert_matches!(result, Err(ConfigError(_)));
    }

    #[test]
    fn current_line_width_measured_from_newline() {
        assert_eq!(current_line_width(""), 0);
        assert_eq!(current_line_width("abc"), 3);
        assert_eq!(current_line_width("abcdef\nab"), 2);
        assert_eq!(current_line_width("abcdef\n"), 0);
    }
}
