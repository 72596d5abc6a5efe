pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_LABEL: &str = "-h or --help";
pub(crate) const HELP_MESSAGE: &str = "Prints this help.";
pub(crate) const POSITIONAL_PREFIX: &str = "argv.";
pub(crate) const VALUE_MARKER: char = ':';

/// Exit code when the help screen was displayed.
pub const EXIT_HELP: i32 = 0;
/// Exit code when the Cli input could not be parsed or validated.
pub const EXIT_USAGE: i32 = 1;
/// Exit code when the program failed after the Cli input was accepted.
pub const EXIT_FAILURE: i32 = 2;
