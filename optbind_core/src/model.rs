use crate::constant::*;

/// The syntactic class of an [`OptionSpec`] name.
///
/// * A single character is a short option (`-x`).
/// * `argv.N` (for a non-negative integer `N`) is the `N`th positional argument.
/// * Anything else is a long option (`--name`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionName {
    /// `-x`
    Short(char),
    /// `--name`
    Long(String),
    /// `argv.N`
    Positional(usize),
}

impl OptionName {
    /// Classify a raw option name.
    ///
    /// ### Example
    /// ```
    /// # use optbind_core::OptionName;
    /// assert_eq!(OptionName::classify("o"), OptionName::Short('o'));
    /// assert_eq!(OptionName::classify("verbose"), OptionName::Long("verbose".to_string()));
    /// assert_eq!(OptionName::classify("argv.2"), OptionName::Positional(2));
    /// ```
    pub fn classify(name: &str) -> Self {
        if let Some(index) = positional_index(name) {
            return OptionName::Positional(index);
        }

        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => OptionName::Short(c),
            _ => OptionName::Long(name.to_string()),
        }
    }

    /// The key under which this name appears in [`ParsedArguments`](crate::ParsedArguments).
    pub fn key(&self) -> String {
        match self {
            OptionName::Short(c) => c.to_string(),
            OptionName::Long(name) => name.clone(),
            OptionName::Positional(index) => format!("{POSITIONAL_PREFIX}{index}"),
        }
    }

    pub(crate) fn is_help(&self) -> bool {
        match self {
            OptionName::Short(c) => *c == HELP_SHORT,
            OptionName::Long(name) => name == HELP_NAME,
            OptionName::Positional(_) => false,
        }
    }
}

// Only the canonical rendering counts: `argv.01` is not a positional name.
pub(crate) fn positional_index(name: &str) -> Option<usize> {
    let digits = name.strip_prefix(POSITIONAL_PREFIX)?;
    let index: usize = digits.parse().ok()?;

    if index.to_string() == digits {
        Some(index)
    } else {
        None
    }
}

/// A value bound to a key in [`ParsedArguments`](crate::ParsedArguments).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgValue {
    /// A presence-only option.
    /// Following the getopt convention, a present flag is recorded as `Flag(false)`.
    Flag(bool),
    /// The value of a value-taking option, or a positional token.
    Text(String),
}

impl ArgValue {
    /// The text of this value, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArgValue::Text(text) => Some(text.as_str()),
            ArgValue::Flag(_) => None,
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Text(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Flag(value)
    }
}

/// One declared option or positional parameter.
///
/// ### Example
/// ```
/// # use optbind_core::OptionSpec;
/// let spec = OptionSpec::new("o")
///     .takes_value()
///     .required()
///     .meta("WOW_LEVEL")
///     .help("For the wow.")
///     .group("main");
///
/// assert_eq!(spec.name(), "o");
/// assert!(spec.requires_value());
/// assert_eq!(spec.value_description(), Some("WOW_LEVEL"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    name: String,
    requires_value: bool,
    required: bool,
    description: String,
    value_description: Option<String>,
    group: Option<String>,
}

impl OptionSpec {
    /// Declare a presence-only, optional parameter by name.
    /// Use the builder methods to refine it.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requires_value: false,
            required: false,
            description: String::default(),
            value_description: None,
            group: None,
        }
    }

    /// Declare the positional parameter at `index` (named `argv.<index>`).
    pub fn positional(index: usize) -> Self {
        Self::new(format!("{POSITIONAL_PREFIX}{index}"))
    }

    /// The option consumes a value token.
    pub fn takes_value(mut self) -> Self {
        self.requires_value = true;
        self
    }

    /// Absence of the parameter is a validation error.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Document the parameter for the help screen.
    /// If repeated, only the final description applies.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Placeholder shown after a value-taking option in the help screen (ex: `WOW_LEVEL`).
    pub fn meta(mut self, value_description: impl Into<String>) -> Self {
        self.value_description.replace(value_description.into());
        self
    }

    /// Tag the parameter with a logical group.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group.replace(group.into());
        self
    }

    /// The declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The syntactic class of the declared name.
    pub fn option_name(&self) -> OptionName {
        OptionName::classify(&self.name)
    }

    /// Whether the option consumes a value token.
    pub fn requires_value(&self) -> bool {
        self.requires_value
    }

    /// Whether absence is a validation error.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The help description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The help placeholder for the option value.
    pub fn value_description(&self) -> Option<&str> {
        self.value_description.as_deref()
    }

    /// The group tag.
    pub fn group_tag(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// How the parameter is referred to in messages: `-x`, `--name`, or the positional description.
    pub fn label(&self) -> String {
        match self.option_name() {
            OptionName::Short(c) => format!("-{c}"),
            OptionName::Long(name) => format!("--{name}"),
            OptionName::Positional(_) if !self.description.is_empty() => {
                format!("{} ({})", self.name, self.description)
            }
            OptionName::Positional(_) => self.name.clone(),
        }
    }
}
