//! Data types shared between the Taipan tokenizer, parser and AST.

mod error;
mod flags;
mod format;
mod location;
mod mode;

pub use error::BaseError;
pub use flags::ParserFlags;
pub use format::ConversionFlag;
pub use location::{Location, SourceRange};
pub use mode::{Mode, ModeParseError};
