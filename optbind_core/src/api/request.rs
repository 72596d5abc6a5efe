use crate::api::{ParsedArguments, Schema};
use crate::parser::ValidationError;

/// A typed request object populated from the Cli.
///
/// The implementor declares its own [`Schema`], and binds itself out of the validated [`ParsedArguments`].
///
/// ### Example
/// ```
/// # use optbind_core::{OptionSpec, ParsedArguments, Request, Schema, ValidationError};
/// struct Install {
///     package: String,
///     verbose: bool,
/// }
///
/// impl Request for Install {
///     fn schema() -> Schema {
///         Schema::new()
///             .add(OptionSpec::positional(0).required().help("package"))
///             .add(OptionSpec::new("verbose").help("Print more."))
///     }
///
///     fn bind(arguments: &ParsedArguments) -> Result<Self, ValidationError> {
///         Ok(Install {
///             package: arguments.parse("argv.0")?.unwrap_or_default(),
///             verbose: arguments.contains("verbose"),
///         })
///     }
/// }
/// ```
pub trait Request: Sized {
    /// The declarations of this request's inputs.
    fn schema() -> Schema;

    /// Populate the request from arguments that already satisfy [`Request::schema`].
    fn bind(arguments: &ParsedArguments) -> Result<Self, ValidationError>;
}
