//! Core extraction engine.
//!
//! - `parsers` / `emit`: source text to AST and back, via swc
//! - `literal`: constant folding of string concatenations
//! - `matcher`: recognition of direct and curried minErr calls
//! - `registry`: the ordered namespace → code → template table
//! - `rewrite`: dropping the message argument from a call
//! - `definition`: substitution of the factory declaration
//! - `pass`: the traversal tying the above together

pub mod definition;
pub mod emit;
pub mod literal;
pub mod matcher;
pub mod parsers;
pub mod pass;
pub mod registry;
pub mod rewrite;
pub mod source;

pub use matcher::{CallShape, MinErrMatcher};
pub use pass::{
    DEFAULT_FACTORY_NAME, DEFAULT_SUFFIX, MinErrPass, PassAbort, PassOptions, PassOutcome,
    PassStats,
};
pub use registry::{EntryAction, ExtractedEntry, ExtractionTable};
pub use source::{SourceContext, SourceLocation};
