use std::collections::HashMap;
use thiserror::Error;

use crate::constant::*;
use crate::model::{ArgValue, OptionName, OptionSpec};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The named options recognized by an [`OptionParser`], keyed by name without dashes.
pub type OptionValues = HashMap<String, ArgValue>;

/// The failure sentinel of an [`OptionParser`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct GetoptFailure {
    reason: String,
}

impl GetoptFailure {
    /// A failure described by `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Why the option parsing failed.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Behaviour of a getopt-style option-parsing primitive.
///
/// * `tokens`: the Cli input, without the program name.
/// * `short_options`: the concatenated single character options, each followed by `:` if it requires a value (ex: `"n:vh"`).
/// * `long_options`: the long options, each suffixed with `:` if it requires a value (ex: `["verbose", "output:"]`).
///
/// Returns the recognized options, with presence-only flags mapped to `ArgValue::Flag(false)`.
///
/// Any `Fn(&[String], &str, &[String]) -> Result<OptionValues, GetoptFailure>` is an `OptionParser`.
pub trait OptionParser {
    /// Parse the options out of `tokens`.
    fn getopt(
        &self,
        tokens: &[String],
        short_options: &str,
        long_options: &[String],
    ) -> Result<OptionValues, GetoptFailure>;
}

impl<F> OptionParser for F
where
    F: Fn(&[String], &str, &[String]) -> Result<OptionValues, GetoptFailure>,
{
    fn getopt(
        &self,
        tokens: &[String],
        short_options: &str,
        long_options: &[String],
    ) -> Result<OptionValues, GetoptFailure> {
        self(tokens, short_options, long_options)
    }
}

/// The default [`OptionParser`], following getopt conventions.
///
/// * Scanning stops at the first non-option token, or at `--`.
/// * Short options may be clustered (`-abc`).
/// A value-taking short option consumes the rest of its token (`-nvalue` or `-n=value`), otherwise the next token.
/// * Value-taking long options accept `--name=value` or `--name value`.
/// * Unknown options are skipped (and left for [`Reconciliation`](crate::Reconciliation) to treat as positional).
/// * If an option is repeated, the last occurrence wins.
/// * A value-taking option at the end of the input fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Getopt;

impl OptionParser for Getopt {
    fn getopt(
        &self,
        tokens: &[String],
        short_options: &str,
        long_options: &[String],
    ) -> Result<OptionValues, GetoptFailure> {
        let scanned = scan(tokens, short_options, long_options);

        match scanned.failure {
            Some(failure) => Err(failure),
            None => Ok(scanned.values),
        }
    }
}

/// The outcome of walking tokens by getopt conventions.
#[derive(Debug, Default)]
pub(crate) struct Scan {
    pub(crate) values: OptionValues,
    /// Option tokens that were not recognized, in order of appearance.
    /// For a short cluster, only its unrecognized characters are kept (`-vz` leaves `-z`).
    pub(crate) unrecognized: Vec<String>,
    /// The index of the first token after the options (`--` excluded).
    pub(crate) rest: usize,
    pub(crate) failure: Option<GetoptFailure>,
}

pub(crate) fn scan(tokens: &[String], short_options: &str, long_options: &[String]) -> Scan {
    let shorts = short_table(short_options);
    let longs = long_table(long_options);
    let mut scanned = Scan {
        rest: tokens.len(),
        ..Scan::default()
    };
    let mut index = 0;

    while index < tokens.len() {
        let token = &tokens[index];

        if token == "--" {
            scanned.rest = index + 1;
            break;
        }

        if let Some(body) = token.strip_prefix("--") {
            index += 1;
            let (name, attached) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };

            match longs.get(name) {
                Some(true) => {
                    let value = match (attached, tokens.get(index)) {
                        (Some(value), _) => value.to_string(),
                        (None, Some(value)) => {
                            index += 1;
                            value.clone()
                        }
                        (None, None) => {
                            scanned.failure = Some(GetoptFailure::new(format!(
                                "option '--{name}' requires a value"
                            )));
                            break;
                        }
                    };
                    scanned.values.insert(name.to_string(), ArgValue::Text(value));
                }
                Some(false) => {
                    scanned.values.insert(name.to_string(), ArgValue::Flag(false));
                }
                None => scanned.unrecognized.push(token.clone()),
            }
        } else if let Some(cluster) = token.strip_prefix('-').filter(|c| !c.is_empty()) {
            index += 1;
            let mut unknown = String::default();

            for (offset, c) in cluster.char_indices() {
                match shorts.get(&c) {
                    Some(true) => {
                        let rest = &cluster[offset + c.len_utf8()..];
                        let rest = rest.strip_prefix('=').unwrap_or(rest);

                        if !rest.is_empty() {
                            scanned.values.insert(c.to_string(), ArgValue::Text(rest.to_string()));
                        } else if let Some(value) = tokens.get(index) {
                            index += 1;
                            scanned.values.insert(c.to_string(), ArgValue::Text(value.clone()));
                        } else {
                            scanned.failure =
                                Some(GetoptFailure::new(format!("option '-{c}' requires a value")));
                        }

                        break;
                    }
                    Some(false) => {
                        scanned.values.insert(c.to_string(), ArgValue::Flag(false));
                    }
                    None => unknown.push(c),
                }
            }

            if !unknown.is_empty() {
                scanned.unrecognized.push(format!("-{unknown}"));
            }

            if scanned.failure.is_some() {
                break;
            }
        } else {
            scanned.rest = index;
            break;
        }
    }

    #[cfg(feature = "tracing_debug")]
    {
        debug!(
            "Scanned {} options, {} unrecognized, positionals from {}.",
            scanned.values.len(),
            scanned.unrecognized.len(),
            scanned.rest
        );
    }

    scanned
}

fn short_table(short_options: &str) -> HashMap<char, bool> {
    let mut table = HashMap::default();
    let mut chars = short_options.chars().peekable();

    while let Some(c) = chars.next() {
        if c == VALUE_MARKER {
            continue;
        }

        let takes_value = chars.peek() == Some(&VALUE_MARKER);
        table.insert(c, takes_value);
    }

    table
}

fn long_table(long_options: &[String]) -> HashMap<&str, bool> {
    long_options
        .iter()
        .map(|long| match long.strip_suffix(VALUE_MARKER) {
            Some(name) => (name, true),
            None => (long.as_str(), false),
        })
        .collect()
}

/// The getopt-style option strings synthesized from a schema.
/// The help trigger (`h` / `help`) is always present, exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionStrings {
    short: String,
    long: Vec<String>,
}

impl OptionStrings {
    /// Synthesize the option strings for `specs`; positional parameters are ignored.
    pub fn synthesize<'a>(specs: impl IntoIterator<Item = &'a OptionSpec>) -> Self {
        let mut strings = Self::default();

        for spec in specs {
            match spec.option_name() {
                OptionName::Short(c) => strings.push_short(c, spec.requires_value()),
                OptionName::Long(name) => strings.push_long(&name, spec.requires_value()),
                OptionName::Positional(_) => {}
            }
        }

        strings.ensure_help();

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Synthesized option strings: short='{}', long={:?}.",
                strings.short, strings.long
            );
        }

        strings
    }

    /// The concatenated short options (ex: `"n:h"`).
    pub fn short(&self) -> &str {
        &self.short
    }

    /// The long options (ex: `["verbose", "help"]`).
    pub fn long(&self) -> &[String] {
        &self.long
    }

    /// Whether the short option `c` takes a value; `None` if it is not declared.
    pub fn short_takes_value(&self, c: char) -> Option<bool> {
        short_table(&self.short).get(&c).copied()
    }

    /// Whether the long option `name` takes a value; `None` if it is not declared.
    pub fn long_takes_value(&self, name: &str) -> Option<bool> {
        long_table(&self.long).get(name).copied()
    }

    fn push_short(&mut self, c: char, requires_value: bool) {
        self.short.push(c);

        if requires_value {
            self.short.push(VALUE_MARKER);
        }
    }

    fn push_long(&mut self, name: &str, requires_value: bool) {
        if requires_value {
            self.long.push(format!("{name}{VALUE_MARKER}"));
        } else {
            self.long.push(name.to_string());
        }
    }

    fn ensure_help(&mut self) {
        if self.short_takes_value(HELP_SHORT).is_none() {
            self.push_short(HELP_SHORT, false);
        }

        if self.long_takes_value(HELP_NAME).is_none() {
            self.push_long(HELP_NAME, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn longs(values: &[&str]) -> Vec<String> {
        tokens(values)
    }

    fn text(value: &str) -> ArgValue {
        ArgValue::Text(value.to_string())
    }

    #[test]
    fn synthesize() {
        let specs = vec![
            OptionSpec::new("n").takes_value(),
            OptionSpec::new("verbose"),
            OptionSpec::new("v"),
            OptionSpec::new("output").takes_value(),
            OptionSpec::positional(0),
        ];

        let strings = OptionStrings::synthesize(&specs);

        assert_eq!(strings.short(), "n:vh");
        assert_eq!(strings.long(), &["verbose", "output:", "help"]);
        assert_eq!(strings.short_takes_value('n'), Some(true));
        assert_eq!(strings.short_takes_value('v'), Some(false));
        assert_eq!(strings.short_takes_value('x'), None);
        assert_eq!(strings.long_takes_value("output"), Some(true));
        assert_eq!(strings.long_takes_value("help"), Some(false));
        assert_eq!(strings.long_takes_value("output:"), None);
    }

    #[test]
    fn synthesize_empty() {
        let strings = OptionStrings::synthesize(&Vec::<OptionSpec>::default());
        assert_eq!(strings.short(), "h");
        assert_eq!(strings.long(), &["help"]);
    }

    #[rstest]
    #[case(vec![OptionSpec::new("h")], "h", vec!["help"])]
    #[case(vec![OptionSpec::new("h").takes_value()], "h:", vec!["help"])]
    #[case(vec![OptionSpec::new("help")], "h", vec!["help"])]
    #[case(vec![OptionSpec::new("help").takes_value()], "h", vec!["help:"])]
    #[case(vec![OptionSpec::new("help"), OptionSpec::new("h")], "h", vec!["help"])]
    fn synthesize_help_not_duplicated(
        #[case] specs: Vec<OptionSpec>,
        #[case] expected_short: &str,
        #[case] expected_long: Vec<&str>,
    ) {
        let strings = OptionStrings::synthesize(&specs);
        assert_eq!(strings.short(), expected_short);
        assert_eq!(strings.long(), expected_long.as_slice());
    }

    #[test]
    fn synthesize_help_exactly_once() {
        let pool = ["h", "help", "a", "b", "alpha", "beta", "x", "output"];

        for _ in 0..100 {
            let specs: Vec<OptionSpec> = pool
                .iter()
                .filter(|_| thread_rng().gen_bool(0.5))
                .map(|name| {
                    let spec = OptionSpec::new(*name);
                    if thread_rng().gen_bool(0.5) {
                        spec.takes_value()
                    } else {
                        spec
                    }
                })
                .collect();

            let strings = OptionStrings::synthesize(&specs);
            // Re-synthesizing from the same declarations is stable.
            assert_eq!(OptionStrings::synthesize(&specs), strings);
            assert_eq!(strings.short().matches('h').count(), 1);
            assert_eq!(
                strings
                    .long()
                    .iter()
                    .filter(|l| l.trim_end_matches(':') == "help")
                    .count(),
                1
            );
        }
    }

    #[test]
    fn getopt_empty() {
        let values = Getopt.getopt(&[], "n:h", &longs(&["help"])).unwrap();
        assert!(values.is_empty());
    }

    #[rstest]
    #[case(vec!["-n", "example"], "n", text("example"))]
    #[case(vec!["-nexample"], "n", text("example"))]
    #[case(vec!["-n=example"], "n", text("example"))]
    #[case(vec!["-n", "-v"], "n", text("-v"))]
    #[case(vec!["--output", "out.txt"], "output", text("out.txt"))]
    #[case(vec!["--output=out.txt"], "output", text("out.txt"))]
    #[case(vec!["--output=a=b"], "output", text("a=b"))]
    #[case(vec!["--output="], "output", text(""))]
    #[case(vec!["-v"], "v", ArgValue::Flag(false))]
    #[case(vec!["--verbose"], "verbose", ArgValue::Flag(false))]
    #[case(vec!["-n", "1", "-n", "2"], "n", text("2"))]
    fn getopt_single(#[case] input: Vec<&str>, #[case] name: &str, #[case] expected: ArgValue) {
        // Execute
        let values = Getopt
            .getopt(&tokens(&input), "n:vh", &longs(&["verbose", "output:", "help"]))
            .unwrap();

        // Verify
        assert_eq!(values, OptionValues::from([(name.to_string(), expected)]));
    }

    #[test]
    fn getopt_cluster() {
        let values = Getopt
            .getopt(&tokens(&["-vqnabc", "rest"]), "vqn:h", &longs(&["help"]))
            .unwrap();

        assert_eq!(
            values,
            OptionValues::from([
                ("v".to_string(), ArgValue::Flag(false)),
                ("q".to_string(), ArgValue::Flag(false)),
                ("n".to_string(), text("abc")),
            ])
        );
    }

    #[rstest]
    #[case(vec!["install", "-v"])]
    #[case(vec!["--", "-v"])]
    #[case(vec!["-", "-v"])]
    fn getopt_stops(#[case] input: Vec<&str>) {
        let values = Getopt
            .getopt(&tokens(&input), "vh", &longs(&["help"]))
            .unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn getopt_unknown_skipped() {
        let values = Getopt
            .getopt(&tokens(&["-z", "--zed", "-v"]), "vh", &longs(&["help"]))
            .unwrap();
        assert_eq!(
            values,
            OptionValues::from([("v".to_string(), ArgValue::Flag(false))])
        );
    }

    #[rstest]
    #[case(vec!["-n"], "option '-n' requires a value")]
    #[case(vec!["-vn"], "option '-n' requires a value")]
    #[case(vec!["--output"], "option '--output' requires a value")]
    fn getopt_missing_value(#[case] input: Vec<&str>, #[case] reason: &str) {
        let failure = Getopt
            .getopt(&tokens(&input), "vn:h", &longs(&["output:", "help"]))
            .unwrap_err();
        assert_eq!(failure.reason(), reason);
        assert_eq!(failure.to_string(), reason);
    }

    #[rstest]
    #[case(vec!["-v", "install", "-n", "y"], vec![], 1)]
    #[case(vec!["-vz", "install"], vec!["-z"], 1)]
    #[case(vec!["-zv", "--zed", "install"], vec!["-z", "--zed"], 2)]
    #[case(vec!["-v", "--", "-z"], vec![], 2)]
    #[case(vec!["-v"], vec![], 1)]
    fn scan_positions(
        #[case] input: Vec<&str>,
        #[case] unrecognized: Vec<&str>,
        #[case] rest: usize,
    ) {
        // Execute
        let scanned = scan(&tokens(&input), "n:vh", &longs(&["help"]));

        // Verify
        assert_eq!(
            scanned.values,
            OptionValues::from([("v".to_string(), ArgValue::Flag(false))])
        );
        assert_eq!(scanned.unrecognized, unrecognized);
        assert_eq!(scanned.rest, rest);
        assert_eq!(scanned.failure, None);
    }

    #[test]
    fn scan_failure_keeps_unrecognized() {
        let scanned = scan(&tokens(&["-zn"]), "n:h", &longs(&["help"]));

        assert_eq!(scanned.unrecognized, vec!["-z"]);
        assert_eq!(
            scanned.failure,
            Some(GetoptFailure::new("option '-n' requires a value"))
        );
    }

    #[test]
    fn closure_option_parser() {
        let parser = |tokens: &[String], short: &str, long: &[String]| {
            Ok::<_, GetoptFailure>(OptionValues::from([(
                format!("{}:{short}:{}", tokens.len(), long.len()),
                ArgValue::Flag(true),
            )]))
        };

        let values = parser
            .getopt(&tokens(&["a", "b"]), "h", &longs(&["help"]))
            .unwrap();

        assert_eq!(
            values,
            OptionValues::from([("2:h:1".to_string(), ArgValue::Flag(true))])
        );
    }
}
