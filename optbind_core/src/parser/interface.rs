#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub(crate) struct PaddingWidth(usize);

impl PaddingWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // padding must be at least 1
        if width >= 1 {
            Ok(PaddingWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct LeftWidth(usize);

impl LeftWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // left must be at least 1
        if width >= 1 {
            Ok(LeftWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TotalWidth(pub usize);

/// Renders a two column layout: a left label column, and a description column which begins at a fixed offset.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    indent: usize,
    padding: PaddingWidth,
    left: LeftWidth,
    middle: Option<usize>,
}

// We'll target 95% of the total width, to ensure the renderer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Produce a renderer whose description column never wraps.
    pub(crate) fn new(indent: usize, padding: PaddingWidth, left: LeftWidth) -> Self {
        Self {
            indent,
            padding,
            left,
            middle: None,
        }
    }

    /// Produce a renderer which wraps the description column to fit the total width.
    /// The description column never gets narrower than `MINIMUM_MIDDLE_WIDTH`.
    pub(crate) fn guided(
        indent: usize,
        padding: PaddingWidth,
        left: LeftWidth,
        total_width: TotalWidth,
    ) -> Self {
        let non_middle = indent + left.0 + padding.0;
        let target_total_width = (total_width.0 as f64 * TARGET_TOTAL_FACTOR) as usize;

        let middle = if non_middle + MINIMUM_MIDDLE_WIDTH <= target_total_width {
            let guided_middle = target_total_width - non_middle;
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} fit within the target total {target_total_width}.  Selecting middle: {guided_middle}.");
            }
            guided_middle
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} do not fit within the target total {target_total_width}.  Selecting middle: {MINIMUM_MIDDLE_WIDTH}.");
            }
            MINIMUM_MIDDLE_WIDTH
        };

        Self {
            indent,
            padding,
            left,
            middle: Some(middle),
        }
    }

    /// The character offset at which the description column begins.
    #[cfg(test)]
    pub(crate) fn description_offset(&self) -> usize {
        self.indent + self.left.0 + self.padding.0
    }

    pub(crate) fn render(&self, left: &str, middle: &str) -> Vec<String> {
        assert!(left.chars().count() <= self.left.0);
        let indent = self.indent;
        let left_column_width = self.left.0;
        let padding = format!("{:width$}", "", width = self.padding.0);
        let middle_parts = match self.middle {
            Some(width) => chunk(middle, width),
            None if middle.trim().is_empty() => Vec::default(),
            None => vec![middle.trim().to_string()],
        };

        if middle_parts.is_empty() {
            return vec![format!("{:indent$}{left}", "")];
        }

        middle_parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let label = if i == 0 { left } else { "" };
                format!("{:indent$}{label:left_column_width$}{padding}{part}", "")
                    .trim_end()
                    .to_string()
            })
            .collect()
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word.chars().count() + 1 <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let chars: Vec<char> = word.chars().collect();
    let increment = std::cmp::max(width, 2) - 1;
    let mut left = 0;

    while chars.len() - left > increment + 1 {
        let piece: String = chars[left..left + increment].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
    }

    current.extend(&chars[left..]);
}

/// The output streams of a Cli program.
///
/// Implementations are passed explicitly to whoever needs to write output (there is no global stdout/stderr handle).
pub trait UserInterface {
    /// Write one line to the output stream.
    fn print(&self, message: String);

    /// Write one line to the error stream.
    fn print_error(&self, message: String);
}

/// The process' stdout & stderr.
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, message: String) {
        eprintln!("{message}");
    }
}

/// In-memory [`UserInterface`]s for testing Cli programs.
#[cfg(any(test, feature = "unit_test"))]
#[allow(missing_docs)]
pub mod util {
    use crate::parser::UserInterface;
    use std::cell::RefCell;
    use std::sync::mpsc;

    /// Collects everything printed, for inspection via `consume`.
    #[derive(Debug, Default)]
    pub struct InMemoryInterface {
        message: RefCell<Vec<String>>,
        error: RefCell<Vec<String>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            self.message.borrow_mut().push(message);
        }

        fn print_error(&self, message: String) {
            self.error.borrow_mut().push(message);
        }
    }

    impl InMemoryInterface {
        /// The (output, error) streams, each line joined by `\n`; `None` if nothing was printed.
        pub fn consume(self) -> (Option<String>, Option<String>) {
            (
                join(self.message.into_inner()),
                join(self.error.into_inner()),
            )
        }

        pub fn consume_message(self) -> String {
            let (message, _) = self.consume();
            message.unwrap_or_default()
        }
    }

    /// An interface which can be handed off (ex: boxed into a parser), with a receiver to inspect what was printed.
    pub fn channel_interface() -> (SenderInterface, ReceiverInterface) {
        let (message_tx, message_rx) = mpsc::channel();
        let (error_tx, error_rx) = mpsc::channel();

        (
            SenderInterface {
                message: message_tx,
                error: error_tx,
            },
            ReceiverInterface {
                message: message_rx,
                error: error_rx,
            },
        )
    }

    pub struct SenderInterface {
        message: mpsc::Sender<String>,
        error: mpsc::Sender<String>,
    }

    impl UserInterface for SenderInterface {
        fn print(&self, message: String) {
            // The receiver may have gone away; the output is simply dropped.
            let _ = self.message.send(message);
        }

        fn print_error(&self, message: String) {
            let _ = self.error.send(message);
        }
    }

    pub struct ReceiverInterface {
        message: mpsc::Receiver<String>,
        error: mpsc::Receiver<String>,
    }

    impl ReceiverInterface {
        /// The (output, error) streams, each line joined by `\n`; `None` if nothing was printed.
        pub fn consume(&self) -> (Option<String>, Option<String>) {
            (
                join(self.message.try_iter().collect()),
                join(self.error.try_iter().collect()),
            )
        }
    }

    fn join(lines: Vec<String>) -> Option<String> {
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}
