use terminal_size::{terminal_size, Width};

use crate::api::Schema;
use crate::constant::*;
use crate::model::{OptionName, OptionSpec};
use crate::parser::{ColumnRenderer, LeftWidth, PaddingWidth, TotalWidth};

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 3;

/// Renders the usage text for a schema.
///
/// The output is:
/// ```console
/// <app description>
/// Usage: <script> [options] <positionals..>
/// Options:
///    <option label>   <description>
///    ..
///    -h or --help     Prints this help.
/// ```
/// Descriptions begin at a common column: the widest option label (including the help label) plus a fixed gap.
///
/// ### Example
/// ```
/// # use optbind_core::{HelpScreen, OptionSpec, Schema};
/// let schema = Schema::new()
///     .add(OptionSpec::new("o").takes_value().meta("WOW_LEVEL").help("For the wow."));
///
/// let help = HelpScreen::new().render(Some("Demo app"), "bin/demo", &schema, None);
///
/// assert_eq!(
///     help,
///     "Demo app\nUsage: bin/demo [options]\nOptions:\n   -o WOW_LEVEL   For the wow.\n   -h or --help   Prints this help.\n"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpScreen {
    terminal_width: Option<usize>,
}

impl HelpScreen {
    /// A help screen which never wraps descriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// A help screen which wraps descriptions to fit the current terminal, if there is one.
    pub fn terminal() -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new().with_width(terminal_width)
    }

    /// Wrap descriptions to fit within `width` characters (`None` disables wrapping).
    pub fn with_width(mut self, width: Option<usize>) -> Self {
        self.terminal_width = width;
        self
    }

    /// Render the help screen; each line is terminated by `\n`.
    ///
    /// When `group` is set, only the parameters tagged with that group are shown.
    pub fn render(
        &self,
        app_description: Option<&str>,
        script_name: &str,
        schema: &Schema,
        group: Option<&str>,
    ) -> String {
        self.lines(app_description, script_name, schema, group)
            .into_iter()
            .map(|line| line + "\n")
            .collect()
    }

    /// Render the help screen, line by line.
    pub fn lines(
        &self,
        app_description: Option<&str>,
        script_name: &str,
        schema: &Schema,
        group: Option<&str>,
    ) -> Vec<String> {
        let schema = schema.filter_group(group);
        let mut positionals: Vec<(usize, &OptionSpec)> = Vec::default();
        let mut options: Vec<(String, &str)> = Vec::default();

        for spec in schema.iter() {
            match spec.option_name() {
                OptionName::Positional(index) => positionals.push((index, spec)),
                name if name.is_help() => {}
                name => options.push((option_label(&name, spec), spec.description())),
            }
        }

        positionals.sort_by_key(|(index, _)| *index);
        options.push((HELP_LABEL.to_string(), HELP_MESSAGE));

        let mut usage = format!("Usage: {script_name} [options]");

        for (_, spec) in &positionals {
            let text = if spec.description().is_empty() {
                spec.name()
            } else {
                spec.description()
            };

            if spec.is_required() {
                usage.push_str(&format!(" {text}"));
            } else {
                usage.push_str(&format!(" [{text}]"));
            }
        }

        let left_column_width = options
            .iter()
            .map(|(label, _)| label.chars().count())
            .fold(0, usize::max);
        let padding = PaddingWidth::new(PADDING_WIDTH).unwrap();
        let left = LeftWidth::new(left_column_width).unwrap();
        let column_renderer = match self.terminal_width {
            Some(tw) => ColumnRenderer::guided(MAIN_INDENT, padding, left, TotalWidth(tw)),
            None => ColumnRenderer::new(MAIN_INDENT, padding, left),
        };

        let mut out = Vec::default();

        if let Some(description) = app_description {
            out.push(description.trim_end().to_string());
        }

        out.push(usage.trim_end().to_string());
        out.push("Options:".to_string());

        for (label, description) in &options {
            out.extend(column_renderer.render(label, description));
        }

        out
    }
}

fn option_label(name: &OptionName, spec: &OptionSpec) -> String {
    let flag = match name {
        OptionName::Short(c) => format!("-{c}"),
        _ => format!("--{}", spec.name()),
    };

    match spec.value_description() {
        Some(meta) if spec.requires_value() => format!("{flag} {meta}"),
        _ => flag,
    }
}
