//! Traits which, typically, may be imported without concern: `use optbind::prelude::*`.

// Needs to be imported in order to implement a custom option-parsing primitive.
pub use crate::matcher::OptionParser;
// Needs to be imported in order to bind a request type.
pub use crate::api::Request;
// Needs to be imported in order to write a custom `ErrorMessage` renderer.
pub use crate::parser::UserInterface;
