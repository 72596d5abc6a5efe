use crate::api::{ParsedArguments, Schema};
use crate::matcher::{Getopt, OptionParser, OptionStrings, Reconciliation};
use crate::parser::ParseError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Turns raw Cli input into [`ParsedArguments`].
///
/// Named options are parsed by the [`OptionParser`] primitive (by default [`Getopt`]).
/// The remaining tokens become positional entries `argv.0`, `argv.1`, .. in order of appearance.
///
/// ### Example
/// ```
/// # use optbind_core::{ArgValue, ArgumentParser, OptionSpec, Schema};
/// let parser = ArgumentParser::new(
///     Schema::new()
///         .add(OptionSpec::new("n").takes_value())
///         .add(OptionSpec::new("verbose")),
/// );
///
/// let parsed = parser.parse(&["prog", "-n", "example", "--verbose", "install"]).unwrap();
///
/// assert_eq!(parsed.value("n"), Some("example"));
/// assert_eq!(parsed.get("verbose"), Some(&ArgValue::Flag(false)));
/// assert_eq!(parsed.value("argv.0"), Some("install"));
/// assert_eq!(parsed.len(), 3);
/// ```
pub struct ArgumentParser {
    schema: Schema,
    reconciliation: Reconciliation,
    option_parser: Box<dyn OptionParser>,
}

impl std::fmt::Debug for ArgumentParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentParser")
            .field("schema", &self.schema)
            .field("reconciliation", &self.reconciliation)
            .finish()
    }
}

impl ArgumentParser {
    /// Create an argument parser over `schema`, using [`Getopt`] and [`Reconciliation::Precise`].
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            reconciliation: Reconciliation::default(),
            option_parser: Box::new(Getopt),
        }
    }

    /// Replace the option-parsing primitive.
    pub fn with_option_parser(mut self, option_parser: impl OptionParser + 'static) -> Self {
        self.option_parser = Box::new(option_parser);
        self
    }

    pub(crate) fn with_boxed_option_parser(mut self, option_parser: Box<dyn OptionParser>) -> Self {
        self.option_parser = option_parser;
        self
    }

    /// Choose how positional tokens are identified.
    pub fn with_reconciliation(mut self, reconciliation: Reconciliation) -> Self {
        self.reconciliation = reconciliation;
        self
    }

    /// The schema this parser applies.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The option strings handed to the primitive.
    pub fn option_strings(&self) -> OptionStrings {
        OptionStrings::synthesize(self.schema.iter())
    }

    /// Parse the raw Cli input; the first token is the program name.
    ///
    /// With an empty schema no option parsing happens: every token is positional.
    /// Otherwise, the help trigger (`-h`/`--help`) is always recognized; see [`ParsedArguments::help_requested`].
    ///
    /// Fails when the option-parsing primitive fails.
    /// No partial result is produced.
    pub fn parse(&self, raw_args: &[impl AsRef<str>]) -> Result<ParsedArguments, ParseError> {
        let tokens: Vec<String> = raw_args
            .iter()
            .skip(1)
            .map(|token| token.as_ref().to_string())
            .collect();

        if self.schema.is_empty() {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Empty schema; all {} tokens are positional.", tokens.len());
            }

            return Ok(ParsedArguments::new(tokens, Default::default()));
        }

        let strings = self.option_strings();
        let values = self
            .option_parser
            .getopt(&tokens, strings.short(), strings.long())
            .map_err(|failure| {
                ParseError::new(
                    strings.short(),
                    strings.long(),
                    raw_args.iter().map(|t| t.as_ref().to_string()).collect(),
                    failure,
                )
            })?;
        let positionals = self.reconciliation.positionals(&tokens, &values, &strings);

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Parsed {} named options and {} positionals.",
                values.len(),
                positionals.len()
            );
        }

        Ok(ParsedArguments::new(positionals, values))
    }
}
