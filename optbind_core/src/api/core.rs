use crate::api::{Request, Schema};
use crate::matcher::{ArgumentParser, OptionParser, Reconciliation};
use crate::model::OptionSpec;
use crate::parser::{ConfigError, ConsoleInterface, GeneralParser, HelpScreen, UserInterface};

/// The base command line parser.
///
/// ### Example
/// ```
/// # use optbind_core::{CommandLineParser, OptionSpec};
/// let parser = CommandLineParser::new("program")
///     .about("Installs packages.")
///     .add(OptionSpec::new("n").takes_value().help("The name."))
///     .add(OptionSpec::positional(0).required().help("package"))
///     .build();
///
/// let parsed = parser.parse_tokens(&["-n", "example", "install"]).unwrap();
/// assert_eq!(parsed.value("n"), Some("example"));
/// assert_eq!(parsed.positional(0), Some("install"));
/// ```
pub struct CommandLineParser {
    program: String,
    about: Option<String>,
    schema: Schema,
    group: Option<String>,
    reconciliation: Reconciliation,
    option_parser: Option<Box<dyn OptionParser>>,
}

impl CommandLineParser {
    /// Create a command line parser.
    /// The `program` name is shown in the help screen usage line.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            schema: Schema::default(),
            group: None,
            reconciliation: Reconciliation::default(),
            option_parser: None,
        }
    }

    /// Create a command line parser with the schema of the request type `R`.
    pub fn for_request<R: Request>(program: impl Into<String>) -> Self {
        Self::new(program).schema(R::schema())
    }

    /// Document the about message for this command line parser; shown at the top of the help screen.
    /// If repeated, only the final message will apply.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Add an option/positional declaration.
    ///
    /// The order of declarations is the order of the help screen.
    pub fn add(mut self, spec: OptionSpec) -> Self {
        self.schema.push(spec);
        self
    }

    /// Add every declaration of `schema`.
    pub fn schema(mut self, schema: Schema) -> Self {
        for spec in &schema {
            self.schema.push(spec.clone());
        }
        self
    }

    /// Only the declarations tagged with `group` participate in parsing, validation, and help.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group.replace(group.into());
        self
    }

    /// Choose how positional tokens are identified (default: [`Reconciliation::Precise`]).
    pub fn reconciliation(mut self, reconciliation: Reconciliation) -> Self {
        self.reconciliation = reconciliation;
        self
    }

    /// Replace the option-parsing primitive (default: [`Getopt`](crate::Getopt)).
    pub fn option_parser(mut self, option_parser: impl OptionParser + 'static) -> Self {
        self.option_parser.replace(Box::new(option_parser));
        self
    }

    fn build_with(
        self,
        help_screen: HelpScreen,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<GeneralParser, ConfigError> {
        self.schema.check()?;
        let schema = self.schema.filter_group(self.group.as_deref());
        let mut argument_parser =
            ArgumentParser::new(schema.clone()).with_reconciliation(self.reconciliation);

        if let Some(option_parser) = self.option_parser {
            argument_parser = argument_parser.with_boxed_option_parser(option_parser);
        }

        Ok(GeneralParser::new(
            self.program,
            self.about,
            schema,
            argument_parser,
            help_screen,
            user_interface,
        ))
    }

    /// Build the command line parser against the provided interface, with an unwrapped help screen.
    #[cfg(any(test, feature = "unit_test"))]
    pub fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<GeneralParser, ConfigError> {
        self.build_with(HelpScreen::new(), user_interface)
    }

    /// Build the command line parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated option name).
    pub fn build_parser(self) -> Result<GeneralParser, ConfigError> {
        self.build_with(HelpScreen::terminal(), Box::new(ConsoleInterface::default()))
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated option name).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> GeneralParser {
        match self.build_parser() {
            Ok(gp) => gp,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}
