mod core;
mod getopt;
mod reconcile;

pub use self::core::ArgumentParser;
pub use self::getopt::{Getopt, GetoptFailure, OptionParser, OptionStrings, OptionValues};
pub use self::reconcile::Reconciliation;
