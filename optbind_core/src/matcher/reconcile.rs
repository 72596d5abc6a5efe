use crate::matcher::getopt::scan;
use crate::matcher::{OptionStrings, OptionValues};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// How the tokens left over from option parsing are identified as positional arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reconciliation {
    /// Walk the tokens exactly as [`Getopt`](crate::Getopt) does, over the declared options.
    ///
    /// Unrecognized options are positional, in place (for a short cluster, just its unrecognized characters: `-vz` leaves `-z`).
    /// Every token from the first non-option onward is positional.
    /// A `--` ends the options and is itself dropped.
    #[default]
    Precise,
    /// Drop any token which names a recognized option (after stripping `-` or `--`), or which equals the value of any recognized option.
    ///
    /// Note, a positional argument whose text happens to equal an option's value is also dropped.
    Heuristic,
}

impl Reconciliation {
    /// The positional tokens of `tokens`, in order.
    pub(crate) fn positionals(
        &self,
        tokens: &[String],
        values: &OptionValues,
        strings: &OptionStrings,
    ) -> Vec<String> {
        let positionals = match self {
            Reconciliation::Precise => precise(tokens, strings),
            Reconciliation::Heuristic => heuristic(tokens, values),
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Reconciled {self:?}: {tokens:?} -> {positionals:?}.");
        }

        positionals
    }
}

fn precise(tokens: &[String], strings: &OptionStrings) -> Vec<String> {
    let scanned = scan(tokens, strings.short(), strings.long());

    scanned
        .unrecognized
        .into_iter()
        .chain(tokens[scanned.rest..].iter().cloned())
        .collect()
}

fn heuristic(tokens: &[String], values: &OptionValues) -> Vec<String> {
    let bound: Vec<&str> = values.values().filter_map(|v| v.as_text()).collect();

    tokens
        .iter()
        .filter(|token| {
            let names_option = token.starts_with('-')
                && [token.get(1..), token.get(2..)]
                    .into_iter()
                    .flatten()
                    .any(|name| values.contains_key(name));

            !names_option && !bound.contains(&token.as_str())
        })
        .cloned()
        .collect()
}
