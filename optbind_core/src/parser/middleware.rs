use std::env;

use crate::api::{ParsedArguments, Request, Schema};
use crate::constant::*;
use crate::matcher::ArgumentParser;
use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::printer::HelpScreen;

/// The configured command line parser.
/// Built via `CommandLineParser::build`.
pub struct GeneralParser {
    program: String,
    about: Option<String>,
    schema: Schema,
    argument_parser: ArgumentParser,
    help_screen: HelpScreen,
    user_interface: Box<dyn UserInterface>,
}

impl std::fmt::Debug for GeneralParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneralParser")
            .field("program", &self.program)
            .field("about", &self.about)
            .field("argument_parser", &self.argument_parser)
            .finish()
    }
}

impl GeneralParser {
    pub(crate) fn new(
        program: impl Into<String>,
        about: Option<String>,
        schema: Schema,
        argument_parser: ArgumentParser,
        help_screen: HelpScreen,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            program: program.into(),
            about,
            schema,
            argument_parser,
            help_screen,
            user_interface,
        }
    }

    /// The rendered help screen.
    pub fn help(&self) -> String {
        self.help_screen
            .render(self.about.as_deref(), &self.program, &self.schema, None)
    }

    /// Evaluate the raw Cli input (the first token is the program name).
    ///
    /// Nothing is printed; the outcome is returned as-is:
    /// 1. Parse the input (see [`ArgumentParser::parse`]).
    /// 2. If `-h`/`--help` was given, `ArgumentError::HelpRequested`.
    /// 3. Validate the required declarations are present.
    pub fn evaluate(&self, raw_args: &[impl AsRef<str>]) -> Result<ParsedArguments, ArgumentError> {
        let parsed = self.argument_parser.parse(raw_args)?;

        if parsed.help_requested() {
            return Err(ArgumentError::HelpRequested);
        }

        self.schema.validate(&parsed)?;
        Ok(parsed)
    }

    /// Run the command line parser against the input tokens (excluding the program name).
    ///
    /// If the input cannot be parsed or validated, the error is displayed and the result is `Err(1)`.
    ///
    /// If the help switch (`-h` or `--help`) is encountered, the help screen is displayed and the result is `Err(0)`.
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<ParsedArguments, i32> {
        let raw_args: Vec<&str> = std::iter::once(self.program.as_str())
            .chain(tokens.iter().copied())
            .collect();

        self.evaluate(raw_args.as_slice()).map_err(|error| self.report(error))
    }

    /// Run the command line parser against the input tokens, and bind them into the request `R`.
    ///
    /// Follows the same display/exit code conventions as [`GeneralParser::parse_tokens`].
    pub fn parse_request<R: Request>(&self, tokens: &[&str]) -> Result<R, i32> {
        let parsed = self.parse_tokens(tokens)?;
        R::bind(&parsed).map_err(|error| self.report(error.into()))
    }

    /// Run the command line parser against the input tokens, then hand the result to `program`.
    ///
    /// Returns the exit code:
    /// * `0` when `program` succeeds, or when the help screen is displayed.
    /// * `1` when the input cannot be parsed or validated.
    /// * `2` when `program` fails; its [`ErrorMessage`] is displayed.
    pub fn run<F>(&self, tokens: &[&str], program: F) -> i32
    where
        F: FnOnce(ParsedArguments) -> Result<(), ErrorMessage>,
    {
        match self.parse_tokens(tokens) {
            Ok(parsed) => match program(parsed) {
                Ok(()) => 0,
                Err(message) => {
                    message.display(&*self.user_interface);
                    EXIT_FAILURE
                }
            },
            Err(exit_code) => exit_code,
        }
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// If the input cannot be parsed or validated, the error is displayed and the process exits with code `1` (via `std::process::exit`).
    ///
    /// If the help switch (`-h` or `--help`) is encountered, the help screen is displayed and the process exits with code `0`.
    pub fn parse(&self) -> ParsedArguments {
        let command_input: Vec<String> = env::args().skip(1).collect();
        match self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(parsed) => parsed,
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        }
    }

    fn report(&self, error: ArgumentError) -> i32 {
        match &error {
            ArgumentError::HelpRequested => {
                for line in self.help_screen.lines(
                    self.about.as_deref(),
                    &self.program,
                    &self.schema,
                    None,
                ) {
                    self.user_interface.print(line);
                }
            }
            ArgumentError::Parse(_) | ArgumentError::Validation(_) => {
                self.user_interface.print_error(error.to_string());
            }
        }

        error.exit_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{GetoptFailure, OptionValues};
    use crate::model::{ArgValue, OptionSpec};
    use crate::test::assert_contains;
    use crate::util::{channel_interface, ReceiverInterface};
    use crate::ValidationError;

    fn demo_schema() -> Schema {
        Schema::new()
            .add(
                OptionSpec::new("n")
                    .takes_value()
                    .required()
                    .meta("NAME")
                    .help("The name."),
            )
            .add(OptionSpec::new("verbose").help("Print more."))
            .add(OptionSpec::positional(0).required().help("package"))
    }

    fn general_parser(schema: Schema) -> (GeneralParser, ReceiverInterface) {
        let (sender, receiver) = channel_interface();
        let general_parser = GeneralParser::new(
            "program",
            Some("Demo app".to_string()),
            schema.clone(),
            ArgumentParser::new(schema),
            HelpScreen::new(),
            Box::new(sender),
        );
        (general_parser, receiver)
    }

    const DEMO_HELP: &str = r#"Demo app
Usage: program [options] package
Options:
   -n NAME        The name.
   --verbose      Print more.
   -h or --help   Prints this help."#;

    #[test]
    fn parse_tokens() {
        // Setup
        let (general_parser, receiver) = general_parser(demo_schema());

        // Execute
        let parsed = general_parser
            .parse_tokens(&["-n", "example", "--verbose", "install"])
            .unwrap();

        // Verify
        assert_eq!(parsed.value("n"), Some("example"));
        assert_eq!(parsed.get("verbose"), Some(&ArgValue::Flag(false)));
        assert_eq!(parsed.positionals(), vec!["install"]);
        assert_eq!(receiver.consume(), (None, None));
    }

    #[test]
    fn parse_tokens_empty_schema() {
        let (general_parser, receiver) = general_parser(Schema::new());

        let parsed = general_parser.parse_tokens(&["bar", "baz"]).unwrap();

        assert_eq!(parsed.positionals(), vec!["bar", "baz"]);
        assert_eq!(parsed.len(), 2);
        assert_eq!(receiver.consume(), (None, None));
    }

    #[test]
    fn parse_tokens_nothing() {
        let (general_parser, receiver) = general_parser(Schema::new());

        let parsed = general_parser.parse_tokens(&[]).unwrap();

        assert!(parsed.is_empty());
        assert_eq!(receiver.consume(), (None, None));
    }

    #[test]
    fn parse_tokens_help() {
        // Setup
        let (general_parser, receiver) = general_parser(demo_schema());

        // Execute
        // Help takes precedence over the missing required inputs.
        let result = general_parser.parse_tokens(&["--help"]);

        // Verify
        assert_eq!(result, Err(0));
        let (message, error) = receiver.consume();
        assert_eq!(message, Some(DEMO_HELP.to_string()));
        assert_eq!(error, None);
        assert_eq!(general_parser.help(), format!("{DEMO_HELP}\n"));
    }

    #[test]
    fn parse_tokens_missing() {
        // Setup
        let (general_parser, receiver) = general_parser(demo_schema());

        // Execute
        let result = general_parser.parse_tokens(&["--verbose"]);

        // Verify
        assert_eq!(result, Err(1));
        let (message, error) = receiver.consume();
        assert_eq!(message, None);
        assert_eq!(
            error,
            Some("Missing required input: -n, argv.0 (package).".to_string())
        );
    }

    #[test]
    fn parse_tokens_parse_error() {
        // Setup
        let (general_parser, receiver) = general_parser(demo_schema());

        // Execute
        let result = general_parser.parse_tokens(&["install", "-n"]);
        let result_value_missing = general_parser.parse_tokens(&["-n"]);

        // Verify
        // Getopt stops at 'install', so only the second input fails to parse.
        assert_eq!(result, Err(1));
        assert_eq!(result_value_missing, Err(1));
        let (_, error) = receiver.consume();
        let error = error.unwrap();
        assert_contains!(error, "Missing required input: -n.");
        assert_contains!(error, "Parse error: option '-n' requires a value");
    }

    #[test]
    fn evaluate() {
        // Setup
        let schema = demo_schema();
        let (sender, receiver) = channel_interface();
        let general_parser = GeneralParser::new(
            "program",
            None,
            schema.clone(),
            ArgumentParser::new(schema).with_option_parser(
                |_: &[String], _: &str, _: &[String]| -> Result<OptionValues, GetoptFailure> {
                    Err(GetoptFailure::new("bad input"))
                },
            ),
            HelpScreen::new(),
            Box::new(sender),
        );

        // Execute
        let error = general_parser.evaluate(&["program", "-x"]).unwrap_err();

        // Verify
        assert_matches!(error, ArgumentError::Parse(ParseError { reason, raw_args, .. }) => {
            assert_eq!(reason, "bad input");
            assert_eq!(raw_args, vec!["program".to_string(), "-x".to_string()]);
        });
        // Evaluate never prints.
        assert_eq!(receiver.consume(), (None, None));
    }

    #[test]
    fn evaluate_outcomes() {
        let (general_parser, _receiver) = general_parser(demo_schema());

        assert_matches!(
            general_parser.evaluate(&["program", "-h"]),
            Err(ArgumentError::HelpRequested)
        );
        assert_matches!(
            general_parser.evaluate(&["program", "-n", "x"]),
            Err(ArgumentError::Validation(ValidationError::Missing(missing))) => {
                assert_eq!(missing, vec!["argv.0 (package)".to_string()]);
            }
        );
        assert_matches!(general_parser.evaluate(&["program", "-n", "x", "y"]), Ok(_));
    }

    #[derive(Debug)]
    struct Install {
        name: String,
        package: String,
        verbose: bool,
        retries: u32,
    }

    impl Request for Install {
        fn schema() -> Schema {
            demo_schema().add(OptionSpec::new("retries").takes_value())
        }

        fn bind(arguments: &ParsedArguments) -> Result<Self, ValidationError> {
            Ok(Install {
                name: arguments.parse("n")?.unwrap_or_default(),
                package: arguments.parse("argv.0")?.unwrap_or_default(),
                verbose: arguments.contains("verbose"),
                retries: arguments.parse("retries")?.unwrap_or(3),
            })
        }
    }

    #[test]
    fn parse_request() {
        let (general_parser, receiver) = general_parser(Install::schema());

        let install: Install = general_parser
            .parse_request(&["-n", "example", "--retries", "5", "pkg"])
            .unwrap();

        assert_eq!(install.name, "example");
        assert_eq!(install.package, "pkg");
        assert!(!install.verbose);
        assert_eq!(install.retries, 5);
        assert_eq!(receiver.consume(), (None, None));
    }

    #[test]
    fn parse_request_invalid() {
        let (general_parser, receiver) = general_parser(Install::schema());

        let result = general_parser.parse_request::<Install>(&["-n", "x", "--retries", "many", "pkg"]);

        assert_matches!(result, Err(1));
        let (_, error) = receiver.consume();
        assert_eq!(
            error,
            Some("Invalid input: cannot convert 'many' to u32 for 'retries'.".to_string())
        );
    }

    #[test]
    fn run_ok() {
        let (general_parser, receiver) = general_parser(demo_schema());

        let exit_code = general_parser.run(&["-n", "x", "pkg"], |parsed| {
            assert_eq!(parsed.positional(0), Some("pkg"));
            Ok(())
        });

        assert_eq!(exit_code, 0);
        assert_eq!(receiver.consume(), (None, None));
    }

    #[test]
    fn run_help_skips_program() {
        let (general_parser, _receiver) = general_parser(demo_schema());

        let exit_code = general_parser.run(&["-h"], |_| unreachable!("program must not run"));

        assert_eq!(exit_code, 0);
    }

    #[test]
    fn run_usage_error() {
        let (general_parser, _receiver) = general_parser(demo_schema());

        let exit_code = general_parser.run(&[], |_| unreachable!("program must not run"));

        assert_eq!(exit_code, 1);
    }

    #[test]
    fn run_failure_plain() {
        let (general_parser, receiver) = general_parser(demo_schema());

        let exit_code = general_parser.run(&["-n", "x", "pkg"], |_| Err("it broke".into()));

        assert_eq!(exit_code, 2);
        assert_eq!(receiver.consume(), (None, Some("it broke".to_string())));
    }

    #[test]
    fn run_failure_rendered() {
        let (general_parser, receiver) = general_parser(demo_schema());

        let exit_code = general_parser.run(&["-n", "x", "pkg"], |parsed| {
            let package = parsed.positional(0).unwrap_or_default().to_string();
            Err(ErrorMessage::rendered(move |ui| {
                ui.print("partial output".to_string());
                ui.print_error(format!("Could not install '{package}'."));
            }))
        });

        assert_eq!(exit_code, 2);
        assert_eq!(
            receiver.consume(),
            (
                Some("partial output".to_string()),
                Some("Could not install 'pkg'.".to_string())
            )
        );
    }
}
