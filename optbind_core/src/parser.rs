mod base;
mod interface;
mod middleware;
mod printer;

pub use self::base::*;
pub(crate) use self::interface::{ColumnRenderer, LeftWidth, PaddingWidth, TotalWidth};
pub use self::interface::{ConsoleInterface, UserInterface};
pub use self::middleware::GeneralParser;
pub use self::printer::HelpScreen;

#[cfg(any(test, feature = "unit_test"))]
pub use self::interface::util;
