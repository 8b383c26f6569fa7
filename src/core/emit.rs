//! Rendering a (possibly rewritten) program back to JavaScript source.

use std::sync::Arc;

use swc_common::{SourceMap, comments::Comments};
use swc_ecma_ast::Program;

/// Print `program` with swc's default code generator settings.
///
/// `comments` are the ones collected while parsing; passing them keeps
/// license headers and doc comments in the output.
pub fn print_program(
    program: &Program,
    source_map: Arc<SourceMap>,
    comments: Option<&dyn Comments>,
) -> String {
    swc_ecma_codegen::to_code_default(source_map, comments, program)
}
