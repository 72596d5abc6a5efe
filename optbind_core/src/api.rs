mod core;
mod parsed;
mod request;
mod schema;

pub use self::core::CommandLineParser;
pub use self::parsed::{InvalidValue, ParsedArguments};
pub use self::request::Request;
pub use self::schema::Schema;
