//! The minErr extraction pass.
//!
//! A single `VisitMut` traversal over the program that, at every node:
//!
//! 1. records declarations of the factory function (for definition substitution)
//! 2. matches minErr calls, folds their code and message to constants,
//!    records the template in the extraction table, and drops the message
//!    argument from the call
//!
//! After traversal the factory declaration is substituted when that is
//! unambiguous, and the table is handed back to the caller.
//!
//! # Outcomes
//!
//! A run either completes or aborts:
//!
//! - `Ok(PassOutcome)`: the table plus any warnings (throw-wrapped calls,
//!   multiple definitions). The caller emits the table exactly once.
//! - `Err(PassAbort)`: a code or message argument could not be folded to a
//!   constant. No table is reachable from this value; rewrites made before
//!   the failure are left in the program and are expected to be discarded.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use swc_common::SourceMap;
//! use minerr::core::{MinErrPass, PassOptions, parsers::js::parse_js_source};
//!
//! let source_map = Arc::new(SourceMap::default());
//! let mut parsed = parse_js_source(code, "app.js", source_map.clone())?;
//! let pass = MinErrPass::new(PassOptions::default(), source_map)?;
//!
//! match pass.run(&mut parsed.program, "app.js") {
//!     Ok(outcome) => outcome.table.write_json(&mut sink)?,
//!     Err(abort) => eprintln!("{}", abort),
//! }
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use swc_common::{SourceMap, Span, Spanned};
use swc_ecma_ast::{CallExpr, FnDecl, Program, ThrowStmt};
use swc_ecma_visit::{VisitMut, VisitMutWith};

use crate::core::{
    SourceContext,
    definition::{DefinitionSites, DefinitionSplicer, SubstitutionPlan},
    literal::resolve_string,
    matcher::{MinErrMatcher, error_wrapped_call},
    parsers::js::parse_fn_decl_fragment,
    registry::{EntryAction, ExtractedEntry, ExtractionTable},
    rewrite::strip_message,
};
use crate::issues::{
    ArgumentRole, Issue, MultipleMinErrDefinitionIssue, Report, ThrowIsNotMinErrErrorIssue,
    UnsupportedStringExpressionIssue,
};

pub const DEFAULT_FACTORY_NAME: &str = "minErr";
pub const DEFAULT_SUFFIX: &str = "MinErr";

/// Source name under which the replacement fragment is registered in the source map.
const REPLACEMENT_FILE_NAME: &str = "<minerr-replacement>";

/// Configuration of a pass instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOptions {
    /// Bare factory identifier: `minErr` in `minErr('ns')(...)`.
    pub factory_name: String,
    /// Direct-form marker: `MinErr` in `fooMinErr(...)`.
    pub suffix: String,
    /// Source of a function declaration that replaces the factory's own.
    pub replacement: Option<String>,
}

impl Default for PassOptions {
    fn default() -> Self {
        Self {
            factory_name: DEFAULT_FACTORY_NAME.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            replacement: None,
        }
    }
}

/// Counters collected during a completed run, for verbose output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Calls with a minErr shape.
    pub matched_calls: usize,
    /// Calls whose message argument was extracted and removed.
    pub rewritten_calls: usize,
    /// Rewritten calls whose `(namespace, code)` was already in the table.
    pub duplicate_codes: usize,
    /// Calls left alone because they were wrapped in `throw new Error(...)`.
    pub throw_wrapped_calls: usize,
    /// Declarations of the factory function.
    pub definitions: usize,
    pub definition_substituted: bool,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct PassOutcome {
    pub table: ExtractionTable,
    /// Non-fatal diagnostics, in the order they were raised.
    pub issues: Vec<Issue>,
    pub stats: PassStats,
}

/// Result of an aborted run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassAbort {
    pub error: UnsupportedStringExpressionIssue,
    /// Warnings raised before the abort.
    pub issues: Vec<Issue>,
}

impl std::fmt::Display for PassAbort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ctx = self.error.context();
        write!(
            f,
            "{}:{}:{}: {}",
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            self.error.message()
        )
    }
}

impl std::error::Error for PassAbort {}

/// The extraction pass. Holds configuration and the pre-parsed replacement;
/// each [`MinErrPass::run`] is an independent run with its own table.
pub struct MinErrPass {
    matcher: MinErrMatcher,
    replacement: Option<FnDecl>,
    source_map: Arc<SourceMap>,
}

impl MinErrPass {
    /// Create a pass, parsing the replacement fragment if one is given.
    ///
    /// `source_map` must be the map the programs passed to `run` were parsed
    /// with, so diagnostics resolve to the right lines.
    pub fn new(options: PassOptions, source_map: Arc<SourceMap>) -> Result<Self> {
        let PassOptions {
            factory_name,
            suffix,
            replacement,
        } = options;

        let replacement = replacement
            .map(|code| {
                parse_fn_decl_fragment(code, REPLACEMENT_FILE_NAME, source_map.clone())
                    .context("Invalid minErr replacement definition")
            })
            .transpose()?;

        Ok(Self {
            matcher: MinErrMatcher::new(factory_name, suffix),
            replacement,
            source_map,
        })
    }

    /// Run the pass over `program`, rewriting it in place.
    pub fn run(&self, program: &mut Program, file_path: &str) -> Result<PassOutcome, PassAbort> {
        let mut visitor = ExtractionVisitor::new(&self.matcher, &self.source_map, file_path);
        program.visit_mut_with(&mut visitor);
        visitor.finish(program, self.replacement.as_ref())
    }
}

#[derive(Debug)]
enum PassState {
    Running,
    Aborted(UnsupportedStringExpressionIssue),
}

struct ExtractionVisitor<'a> {
    matcher: &'a MinErrMatcher,
    source_map: &'a Arc<SourceMap>,
    file_path: &'a str,
    state: PassState,
    table: ExtractionTable,
    issues: Vec<Issue>,
    definitions: DefinitionSites,
    stats: PassStats,
}

impl<'a> ExtractionVisitor<'a> {
    fn new(matcher: &'a MinErrMatcher, source_map: &'a Arc<SourceMap>, file_path: &'a str) -> Self {
        Self {
            matcher,
            source_map,
            file_path,
            state: PassState::Running,
            table: ExtractionTable::new(),
            issues: Vec::new(),
            definitions: DefinitionSites::default(),
            stats: PassStats::default(),
        }
    }

    fn is_running(&self) -> bool {
        matches!(self.state, PassState::Running)
    }

    fn make_context(&self, span: Span) -> SourceContext {
        SourceContext::from_span(self.source_map, self.file_path, span)
    }

    fn abort(&mut self, span: Span, namespace: String, argument: ArgumentRole) {
        let error = UnsupportedStringExpressionIssue {
            context: self.make_context(span),
            namespace,
            argument,
        };
        self.state = PassState::Aborted(error);
    }

    /// Validate and rewrite one call if it is a minErr invocation.
    ///
    /// `thrown` is set when the call is the sole argument of a thrown
    /// `Error` construction; such calls are validated but never rewritten.
    fn process_call(&mut self, call: &mut CallExpr, thrown: bool) {
        let Some(candidate) = self.matcher.match_call(call) else {
            return;
        };
        self.stats.matched_calls += 1;

        let namespace = candidate.shape.namespace().to_string();

        let Some(code) = resolve_string(candidate.code) else {
            let span = candidate.code.span();
            self.abort(span, namespace, ArgumentRole::Code);
            return;
        };
        let Some(template) = resolve_string(candidate.message) else {
            let span = candidate.message.span();
            self.abort(span, namespace, ArgumentRole::Message);
            return;
        };

        if thrown {
            let context = self.make_context(call.span);
            self.issues
                .push(Issue::ThrowIsNotMinErrError(ThrowIsNotMinErrErrorIssue {
                    context,
                    namespace,
                    code,
                }));
            self.stats.throw_wrapped_calls += 1;
            return;
        }

        let action = self.table.insert(ExtractedEntry {
            namespace,
            code,
            template,
        });
        if action == EntryAction::Updated {
            self.stats.duplicate_codes += 1;
        }
        strip_message(call);
        self.stats.rewritten_calls += 1;
    }

    fn finish(
        mut self,
        program: &mut Program,
        replacement: Option<&FnDecl>,
    ) -> Result<PassOutcome, PassAbort> {
        if let PassState::Aborted(error) = self.state {
            return Err(PassAbort {
                error,
                issues: self.issues,
            });
        }

        self.stats.definitions = self.definitions.len();
        match self.definitions.plan(replacement.is_some()) {
            SubstitutionPlan::Keep => {}
            SubstitutionPlan::Substitute => {
                if let Some(replacement) = replacement {
                    let mut splicer = DefinitionSplicer::new(self.matcher.factory_name(), replacement);
                    program.visit_mut_with(&mut splicer);
                    self.stats.definition_substituted = splicer.replaced() > 0;
                }
            }
            SubstitutionPlan::Ambiguous { count, second } => {
                let context = self.make_context(second);
                self.issues
                    .push(Issue::MultipleMinErrDefinition(MultipleMinErrDefinitionIssue {
                        context,
                        factory_name: self.matcher.factory_name().to_string(),
                        count,
                    }));
            }
        }

        Ok(PassOutcome {
            table: self.table,
            issues: self.issues,
            stats: self.stats,
        })
    }
}

impl VisitMut for ExtractionVisitor<'_> {
    fn visit_mut_fn_decl(&mut self, n: &mut FnDecl) {
        if !self.is_running() {
            return;
        }
        if n.ident.sym.as_str() == self.matcher.factory_name() {
            self.definitions.record(n.ident.span);
        }
        n.visit_mut_children_with(self);
    }

    fn visit_mut_throw_stmt(&mut self, n: &mut ThrowStmt) {
        if !self.is_running() {
            return;
        }
        // `throw new Error(fooMinErr(...))`: the wrapped call is handled here
        // so it is never rewritten, while its arguments are still visited.
        if let Some(call) = error_wrapped_call(&mut n.arg)
            && self.matcher.match_call(call).is_some()
        {
            self.process_call(call, true);
            call.visit_mut_children_with(self);
            return;
        }
        n.visit_mut_children_with(self);
    }

    fn visit_mut_call_expr(&mut self, n: &mut CallExpr) {
        if !self.is_running() {
            return;
        }
        self.process_call(n, false);
        n.visit_mut_children_with(self);
    }
}
