use thiserror::Error;

use crate::api::InvalidValue;
use crate::constant::*;
use crate::matcher::GetoptFailure;
use crate::parser::UserInterface;

/// The option-parsing primitive could not interpret the Cli input.
#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "Parse error: {reason} (options '{short_options}', long options [{}], input [{}]).",
    .long_options.join(", "),
    .raw_args.join(" ")
)]
pub struct ParseError {
    /// The getopt-style short option string that was attempted.
    pub short_options: String,
    /// The long option list that was attempted.
    pub long_options: Vec<String>,
    /// The raw Cli input, including the program name.
    pub raw_args: Vec<String>,
    /// What the primitive reported.
    pub reason: String,
}

impl ParseError {
    pub(crate) fn new(
        short_options: &str,
        long_options: &[String],
        raw_args: Vec<String>,
        failure: GetoptFailure,
    ) -> Self {
        Self {
            short_options: short_options.to_string(),
            long_options: long_options.to_vec(),
            raw_args,
            reason: failure.reason().to_string(),
        }
    }
}

/// The parsed values do not satisfy the schema, or cannot be bound.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Required options/positionals that were not provided, by label.
    #[error("Missing required input: {}.", .0.join(", "))]
    Missing(Vec<String>),

    /// A provided value could not be converted.
    #[error("Invalid input: {0}")]
    Invalid(#[from] InvalidValue),
}

/// The schema configuration is malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Option names must be unique within one schema.
    #[error("Config error: the name '{0}' is repeated.")]
    RepeatedName(String),

    /// Option names must not be empty.
    #[error("Config error: an option name must not be empty.")]
    EmptyName,

    /// Option names are declared without their `-`/`--` prefix.
    #[error("Config error: the name '{0}' must not begin with '-'.")]
    DashPrefix(String),

    /// Option names must not contain the characters reserved by the option strings (`:` and `=`).
    #[error("Config error: the name '{0}' must not contain ':' or '='.")]
    ReservedCharacter(String),

    /// Names under the positional prefix must be `argv.<index>`.
    #[error("Config error: the name '{0}' must be of the form 'argv.<index>'.")]
    MalformedPositional(String),
}

/// Every outcome of evaluating Cli input, other than success.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    /// See [`ParseError`].
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// `-h` or `--help` was present.
    /// Not a failure: the caller displays the help screen.
    #[error("Help requested.")]
    HelpRequested,
}

impl ArgumentError {
    /// The conventional exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            ArgumentError::HelpRequested => EXIT_HELP,
            ArgumentError::Parse(_) | ArgumentError::Validation(_) => EXIT_USAGE,
        }
    }
}

/// An error message for display by the top-level handler.
///
/// Either plain text, or a renderer that writes to the [`UserInterface`] itself.
/// The renderer is only invoked at the point of display.
pub enum ErrorMessage {
    /// Printed verbatim to the error stream.
    Plain(String),
    /// Invoked with the interface when displayed.
    Rendered(Box<dyn Fn(&dyn UserInterface)>),
}

impl ErrorMessage {
    /// A plain text message.
    pub fn plain(message: impl Into<String>) -> Self {
        ErrorMessage::Plain(message.into())
    }

    /// A deferred message.
    ///
    /// ### Example
    /// ```
    /// # use optbind_core::ErrorMessage;
    /// let message = ErrorMessage::rendered(|ui| {
    ///     ui.print_error("Could not install 'example'.".to_string());
    ///     ui.print_error("Try again with --verbose.".to_string());
    /// });
    /// ```
    pub fn rendered(renderer: impl Fn(&dyn UserInterface) + 'static) -> Self {
        ErrorMessage::Rendered(Box::new(renderer))
    }

    /// Write the message to the interface's error stream.
    pub fn display(&self, user_interface: &dyn UserInterface) {
        match self {
            ErrorMessage::Plain(message) => user_interface.print_error(message.clone()),
            ErrorMessage::Rendered(renderer) => renderer(user_interface),
        }
    }
}

impl std::fmt::Debug for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorMessage::Plain(message) => f.debug_tuple("Plain").field(message).finish(),
            ErrorMessage::Rendered(_) => f.write_str("Rendered(..)"),
        }
    }
}

impl From<String> for ErrorMessage {
    fn from(value: String) -> Self {
        ErrorMessage::Plain(value)
    }
}

impl From<&str> for ErrorMessage {
    fn from(value: &str) -> Self {
        ErrorMessage::Plain(value.to_string())
    }
}
