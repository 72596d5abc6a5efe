use std::collections::HashSet;

use crate::api::ParsedArguments;
use crate::constant::*;
use crate::model::{positional_index, OptionSpec};
use crate::parser::{ConfigError, ValidationError};

/// The ordered declarations of the options and positional parameters for one parse/help operation.
///
/// ### Example
/// ```
/// # use optbind_core::{OptionSpec, Schema};
/// let schema = Schema::new()
///     .add(OptionSpec::new("n").takes_value().required().group("main"))
///     .add(OptionSpec::new("verbose").group("debug"))
///     .add(OptionSpec::positional(0).required().help("package"));
///
/// assert!(schema.check().is_ok());
/// assert_eq!(schema.filter_group(Some("main")).len(), 1);
/// assert_eq!(schema.filter_group(None).len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    specs: Vec<OptionSpec>,
}

impl Schema {
    /// An empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration.
    pub fn add(mut self, spec: OptionSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Append a declaration in place.
    pub fn push(&mut self, spec: OptionSpec) {
        self.specs.push(spec);
    }

    /// The declarations, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, OptionSpec> {
        self.specs.iter()
    }

    /// The number of declarations.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether there are no declarations.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// The declarations tagged with `group`, in order.
    /// With `None`, every declaration.
    pub fn filter_group(&self, group: Option<&str>) -> Schema {
        match group {
            Some(group) => self
                .specs
                .iter()
                .filter(|spec| spec.group_tag() == Some(group))
                .cloned()
                .collect(),
            None => self.clone(),
        }
    }

    /// Check the declarations are well formed.
    /// * Names are non-empty, unique, and not prefixed with `-`.
    /// * Names do not contain `:` or `=`.
    /// * Names beginning with `argv.` are exactly `argv.<index>`.
    pub fn check(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();

        for spec in &self.specs {
            let name = spec.name();

            if name.is_empty() {
                return Err(ConfigError::EmptyName);
            }

            if name.starts_with('-') {
                return Err(ConfigError::DashPrefix(name.to_string()));
            }

            if name.contains(&[VALUE_MARKER, '='][..]) {
                return Err(ConfigError::ReservedCharacter(name.to_string()));
            }

            if name.starts_with(POSITIONAL_PREFIX) && positional_index(name).is_none() {
                return Err(ConfigError::MalformedPositional(name.to_string()));
            }

            if !names.insert(name) {
                return Err(ConfigError::RepeatedName(name.to_string()));
            }
        }

        Ok(())
    }

    /// Check every required declaration is present in `arguments`.
    /// All the missing declarations are reported together.
    pub fn validate(&self, arguments: &ParsedArguments) -> Result<(), ValidationError> {
        let missing: Vec<String> = self
            .specs
            .iter()
            .filter(|spec| spec.is_required())
            .filter(|spec| !arguments.contains(&spec.option_name().key()))
            .map(OptionSpec::label)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Missing(missing))
        }
    }

    /// The declaration for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.specs.iter().find(|spec| spec.name() == name)
    }
}

impl FromIterator<OptionSpec> for Schema {
    fn from_iter<I: IntoIterator<Item = OptionSpec>>(iter: I) -> Self {
        Self {
            specs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a OptionSpec;
    type IntoIter = std::slice::Iter<'a, OptionSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}
