use std::sync::Arc;

use swc_common::{FileName, Globals, SourceMap, Spanned, comments::SingleThreadedComments};
use swc_ecma_ast::{Decl, FnDecl, ModuleItem, Program, Stmt};
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax};

use crate::core::{SourceContext, SourceLocation};

/// A program parsed from source, together with the state needed to print it back.
pub struct ParsedJs {
    pub program: Program,
    /// Comments are kept so the printer can re-attach license headers and the like.
    pub comments: SingleThreadedComments,
}

/// A syntax error with the position it was reported at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsParseError {
    pub context: SourceContext,
    pub message: String,
}

impl std::fmt::Display for JsParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.context.file_path(),
            self.context.line(),
            self.context.col(),
            self.message
        )
    }
}

impl std::error::Error for JsParseError {}

fn syntax() -> Syntax {
    Syntax::Es(EsSyntax::default())
}

/// Parse JavaScript source code into a program AST.
///
/// The file is registered in the shared `source_map`, so spans in the returned
/// program (and in diagnostics raised against it) resolve through that map.
pub fn parse_js_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedJs, JsParseError> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(syntax(), StringInput::from(&*source_file), Some(&comments));

        let program = parser.parse_program().map_err(|e| JsParseError {
            context: SourceContext::from_span(&source_map, file_path, e.span()),
            message: e.kind().msg().to_string(),
        })?;

        Ok(ParsedJs { program, comments })
    })
}

/// Parse a standalone function declaration, such as a production replacement
/// for the factory definition.
///
/// The fragment must consist of exactly one function declaration; anything
/// else cannot stand in for a declaration and is rejected.
pub fn parse_fn_decl_fragment(
    code: String,
    name: &str,
    source_map: Arc<SourceMap>,
) -> Result<FnDecl, JsParseError> {
    let ParsedJs { program, .. } = parse_js_source(code, name, source_map)?;

    let mut stmts: Vec<Stmt> = match program {
        Program::Script(script) => script.body,
        Program::Module(module) => module
            .body
            .into_iter()
            .filter_map(|item| match item {
                ModuleItem::Stmt(stmt) => Some(stmt),
                ModuleItem::ModuleDecl(_) => None,
            })
            .collect(),
    };

    let fragment_error = |message: &str| JsParseError {
        context: SourceContext::new(SourceLocation::new(name, 1, 1), ""),
        message: message.to_string(),
    };

    if stmts.len() != 1 {
        return Err(fragment_error(
            "replacement must contain exactly one function declaration",
        ));
    }

    match stmts.pop() {
        Some(Stmt::Decl(Decl::Fn(fn_decl))) => Ok(fn_decl),
        _ => Err(fragment_error("replacement must be a function declaration")),
    }
}
