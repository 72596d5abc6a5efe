//! Core module for `optbind`.
//! See [documentation root](https://docs.rs/optbind/latest/optbind/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
pub mod prelude;

pub use api::*;
pub use constant::{EXIT_FAILURE, EXIT_HELP, EXIT_USAGE};
pub use matcher::{ArgumentParser, Getopt, GetoptFailure, OptionStrings, OptionValues, Reconciliation};
pub use model::*;
pub use parser::{
    ArgumentError, ConfigError, ConsoleInterface, ErrorMessage, GeneralParser, HelpScreen,
    ParseError, ValidationError,
};

#[cfg(any(test, feature = "unit_test"))]
pub use parser::util;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
