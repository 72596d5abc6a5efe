use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

use crate::constant::*;
use crate::matcher::OptionValues;
use crate::model::ArgValue;

/// A parsed value could not be converted to the requested type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidValue {
    /// `FromStr` rejected the value.
    #[error("cannot convert '{token}' to {type_name} for '{name}'.")]
    Conversion {
        /// The key of the value.
        name: String,
        /// The value text.
        token: String,
        /// The requested type.
        type_name: &'static str,
    },

    /// The key is a presence-only flag, which carries no value text.
    #[error("'{name}' was given without a value.")]
    MissingValue {
        /// The key of the flag.
        name: String,
    },
}

/// The result of a parse: named options keyed by name (without dashes), and positional arguments keyed `argv.<index>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArguments {
    values: HashMap<String, ArgValue>,
}

impl ParsedArguments {
    pub(crate) fn new(positionals: Vec<String>, named: OptionValues) -> Self {
        let mut values: HashMap<String, ArgValue> = positionals
            .into_iter()
            .enumerate()
            .map(|(index, token)| (format!("{POSITIONAL_PREFIX}{index}"), ArgValue::Text(token)))
            .collect();
        // Named options win any (unlikely) key collision.
        values.extend(named);
        Self { values }
    }

    /// The value for `name`.
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// Whether `name` was given (as a flag, option value, or positional).
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The text value for `name`; `None` for absent keys and presence-only flags.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(ArgValue::as_text)
    }

    /// Whether the presence-only flag `name` was given.
    /// Options given with a value are not flags.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(ArgValue::Flag(_)))
    }

    /// The positional argument at `index`.
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.value(&format!("{POSITIONAL_PREFIX}{index}"))
    }

    /// The positional arguments, in order.
    pub fn positionals(&self) -> Vec<&str> {
        (0..)
            .map_while(|index| self.positional(index))
            .collect()
    }

    /// Convert the text value for `name` into `T`.
    /// Absent keys are `Ok(None)`.
    ///
    /// ### Example
    /// ```
    /// # use optbind_core::{ArgumentParser, OptionSpec, Schema};
    /// let parser = ArgumentParser::new(Schema::new().add(OptionSpec::new("n").takes_value()));
    /// let parsed = parser.parse(&["prog", "-n", "7"]).unwrap();
    ///
    /// assert_eq!(parsed.parse::<u32>("n"), Ok(Some(7)));
    /// assert_eq!(parsed.parse::<u32>("missing"), Ok(None));
    /// assert!(parsed.parse::<bool>("n").is_err());
    /// ```
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<Option<T>, InvalidValue> {
        match self.values.get(name) {
            None => Ok(None),
            Some(ArgValue::Flag(_)) => Err(InvalidValue::MissingValue {
                name: name.to_string(),
            }),
            Some(ArgValue::Text(token)) => match T::from_str(token) {
                Ok(value) => Ok(Some(value)),
                Err(_) => Err(InvalidValue::Conversion {
                    name: name.to_string(),
                    token: token.clone(),
                    type_name: std::any::type_name::<T>(),
                }),
            },
        }
    }

    /// Whether the help trigger (`-h` or `--help`) was given.
    pub fn help_requested(&self) -> bool {
        self.contains(&HELP_SHORT.to_string()) || self.contains(HELP_NAME)
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ArgValue)> {
        self.values.iter()
    }

    /// The underlying name to value mapping.
    pub fn into_map(self) -> HashMap<String, ArgValue> {
        self.values
    }
}

impl From<HashMap<String, ArgValue>> for ParsedArguments {
    fn from(values: HashMap<String, ArgValue>) -> Self {
        Self { values }
    }
}
