//! `optbind` is a getopt-style command line parser for Rust.
//!
//! It maps the Cli input onto a flat set of named values, driven by a declarative schema of options and positionals.
//! The design concerns are deliberately narrow:
//! * *Getopt conventions*:
//! Short options (`-n value`, `-nvalue`, clustered `-abc`) and long options (`--name value`, `--name=value`) behave as they do in C getopt.
//! Parsing stops at the first non-option token or at `--`.
//! Unrecognized options, and everything from the first non-option onward, become positionals.
//! * *Named, flat results*:
//! Options are keyed by their name (without dashes), and the leftover tokens are keyed `argv.0`, `argv.1`, etc.
//! There are no sub-commands and no nested structure.
//! * *Generated help*:
//! The help screen is rendered from the same schema, with aligned columns, and `-h`/`--help` is always available.
//! * *Replaceable option parsing*:
//! The getopt primitive sits behind the [`prelude::OptionParser`] trait; any closure with the right signature may stand in for it.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/demo.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ demo -h
//! Demo app
//! Usage: bin/demo [options]
//! Options:
//!    --bar2         Set the bar option.
//!    -o WOW_LEVEL   For the wow.
//!    -h or --help   Prints this help.
//!
//! $ demo --bar2 7 -o 11
//! bar2: 7, wow level: 11
//!
//! $ demo --bar2 7
//! Missing required input: -o.
//! ```
//!
//! # Schema
//! Configure `optbind` by starting with a [`CommandLineParser`] and `add`ing [`OptionSpec`]s.
//! Each declaration is one of:
//! * A short option, named with a single character (ex: `OptionSpec::new("n")` for `-n`).
//! * A long option, named with multiple characters (ex: `OptionSpec::new("verbose")` for `--verbose`).
//! * A positional, named by its index (ex: `OptionSpec::positional(0)` for `argv.0`).
//!
//! Options are presence-only flags unless they [`OptionSpec::takes_value`].
//! Any declaration may be [`OptionSpec::required`]; missing required inputs are reported together.
//! Declarations may be tagged with a [`OptionSpec::group`], so that a single schema can serve multiple entry points (see [`CommandLineParser::group`]).
//!
//! # Results
//! [`ParsedArguments`] holds the values, keyed by name:
//! * Presence-only flags map to [`ArgValue::Flag`].
//! * Options with a value, and positionals, map to [`ArgValue::Text`].
//!
//! Values are converted with [`ParsedArguments::parse`], which is driven by [`std::str::FromStr`].
//!
//! # Requests
//! A type may declare its own schema and bind itself out of the results via [`prelude::Request`].
//! ```no_run
#![doc = include_str!("../demos/install.rs")]
//! ```
//!
//! # Exit codes
//! [`GeneralParser::run`] turns each outcome into an exit code:
//! * [`EXIT_HELP`] (`0`) when the program succeeds, or the help screen is displayed.
//! * [`EXIT_USAGE`] (`1`) when the Cli input cannot be parsed or validated.
//! * [`EXIT_FAILURE`] (`2`) when the program fails with an [`ErrorMessage`].
//!
//! # Features
//! * `tracing_debug`: emit `tracing` debug events from the parser internals.
//! * `unit_test`: expose the in-memory [`util`] interfaces, for testing Cli programs.
pub use optbind_core::*;
