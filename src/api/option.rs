use crate::api::Value;
use crate::model::OptionType;

/// A registered flag: its spelling(s), type, arity, defaults and documentation.
/// Used with [`ArgumentParser::add`](./struct.ArgumentParser.html#method.add).
///
/// Options are configured fluently; each call consumes and returns the option.
/// By default an option is an optional, non-repeatable [`OptionType::String`] that takes a value.
///
/// ### Example
/// ```
/// use flagparse::{CliOption, OptionType};
///
/// let option = CliOption::with_second("-o", "--output")
///     .name("output")
///     .option_type(OptionType::NonexistingFile)
///     .required(true)
///     .help("Where to write the result.");
///
/// assert_eq!(option.get_name(), "output");
/// assert_eq!(option.second_flag(), Some("--output"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CliOption {
    name: String,
    flag: String,
    second_flag: Option<String>,
    takes_value: bool,
    option_type: OptionType,
    repeatable: bool,
    required: bool,
    default: Option<Value>,
    help: String,
    display_name: Option<String>,
}

impl CliOption {
    /// Create an option triggered by `flag`.
    /// The name is the flag without its leading dashes.
    ///
    /// ### Example
    /// ```
    /// use flagparse::CliOption;
    ///
    /// assert_eq!(CliOption::new("--dry-run").get_name(), "dry-run");
    /// ```
    pub fn new(flag: impl Into<String>) -> Self {
        let flag = flag.into();
        let name = strip_dashes(&flag);

        Self {
            help: name.clone(),
            name,
            flag,
            second_flag: None,
            takes_value: true,
            option_type: OptionType::String,
            repeatable: false,
            required: false,
            default: None,
            display_name: None,
        }
    }

    /// Create an option triggered by either `flag` or `second_flag`.
    /// The name is derived from the primary `flag`.
    pub fn with_second(flag: impl Into<String>, second_flag: impl Into<String>) -> Self {
        let mut option = Self::new(flag);
        option.second_flag.replace(second_flag.into());
        option
    }

    /// Override the name under which the value is stored in the [`Namespace`](crate::Namespace).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Declare whether the flag consumes the following token.
    /// An option that takes no value is a [`OptionType::Boolean`] switch,
    /// and a switch that starts taking a value becomes a [`OptionType::String`] option.
    pub fn takes_value(mut self, takes_value: bool) -> Self {
        self.takes_value = takes_value;

        if !takes_value {
            self.option_type = OptionType::Boolean;
        } else if self.option_type == OptionType::Boolean {
            self.option_type = OptionType::String;
        }

        self
    }

    /// Set the type of the option's value.
    /// A [`OptionType::Boolean`] option never takes a value, every other type always does.
    ///
    /// ### Example
    /// ```
    /// use flagparse::{CliOption, OptionType};
    ///
    /// let option = CliOption::new("--verbose").option_type(OptionType::Boolean);
    /// assert!(!option.has_value());
    /// ```
    pub fn option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self.takes_value = option_type != OptionType::Boolean;
        self
    }

    /// Declare whether each occurrence appends to a list, rather than overwriting a single value.
    pub fn repeatable(mut self, repeatable: bool) -> Self {
        self.repeatable = repeatable;
        self
    }

    /// Declare whether the option must appear on the Cli.
    /// Requiring an option discards its default.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;

        if required {
            self.default = None;
        }

        self
    }

    /// Set the value installed when the option does not appear on the Cli.
    /// Ignored for required options.
    ///
    /// ### Example
    /// ```
    /// use flagparse::{CliOption, OptionType, Value};
    ///
    /// let option = CliOption::new("--retries")
    ///     .option_type(OptionType::Integer)
    ///     .default_value(3);
    /// assert_eq!(option.get_default(), Some(&Value::Integer(3)));
    /// ```
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default.replace(value.into());
        self
    }

    /// Document the help message for this option.
    /// If repeated, only the final message will apply to the option.
    ///
    /// Line breaks `'\n'` are kept; each line is word-wrapped separately in the help screen.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help = description.into();
        self
    }

    /// Set the placeholder shown for the option's value in the help screen (instead of the upper-cased name).
    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name.replace(display_name.into());
        self
    }

    /// The store name.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// The primary flag spelling.
    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// The alternate flag spelling, if any.
    pub fn second_flag(&self) -> Option<&str> {
        self.second_flag.as_deref()
    }

    /// Whether the flag consumes the following token.
    pub fn has_value(&self) -> bool {
        self.takes_value
    }

    /// The type of the option's value.
    pub fn get_type(&self) -> OptionType {
        self.option_type
    }

    /// Whether every occurrence is appended to a list.
    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    /// Whether the option must appear on the command line.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The configured default, if any.
    pub fn get_default(&self) -> Option<&Value> {
        if self.required {
            None
        } else {
            self.default.as_ref()
        }
    }

    /// The help text.
    pub fn get_help(&self) -> &str {
        &self.help
    }

    /// The placeholder for the option's value: the display name, or the upper-cased name.
    pub fn placeholder(&self) -> String {
        match &self.display_name {
            Some(display_name) => display_name.clone(),
            None => self.name.to_ascii_uppercase(),
        }
    }

    /// Type-check a raw token for this option, without converting it.
    pub fn is_valid(&self, token: &str) -> bool {
        self.option_type.is_valid(token)
    }

    /// Convert a raw token already accepted by [`CliOption::is_valid`].
    pub fn parse(&self, token: &str) -> Option<Value> {
        self.option_type.parse(token)
    }

    /// The value this option contributes to a freshly seeded [`Namespace`](crate::Namespace).
    pub(crate) fn seed(&self) -> Value {
        match (self.repeatable, self.get_default()) {
            (true, Some(Value::List(values))) => Value::List(values.clone()),
            (true, Some(value)) => Value::List(vec![value.clone()]),
            (true, None) => Value::List(Vec::default()),
            (false, Some(value)) => value.clone(),
            (false, None) => self.option_type.zero(),
        }
    }

    /// The value a repeatable switch appends on each occurrence: the negation of its configured default.
    pub(crate) fn flipped_default(&self) -> bool {
        !self.get_default().map(Value::is_true).unwrap_or(false)
    }

    pub(crate) fn flags(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.flag.as_str()).chain(self.second_flag.as_deref())
    }
}

fn strip_dashes(flag: &str) -> String {
    flag.trim_start_matches('-').to_string()
}
