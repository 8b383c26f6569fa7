//! Substitution of the factory's own declaration.
//!
//! Production builds replace the verbose `function minErr(module) { ... }`
//! with a compact version supplied as a separate source fragment. The
//! fragment is parsed once and spliced in as AST, so anything it contains
//! (regular expressions, escapes, nested functions) survives exactly as
//! parsed.

use swc_common::Span;
use swc_ecma_ast::FnDecl;
use swc_ecma_visit::{VisitMut, VisitMutWith};

/// Declarations of the factory seen during traversal, in source order.
#[derive(Debug, Default)]
pub struct DefinitionSites {
    spans: Vec<Span>,
}

/// What to do with the factory declarations once traversal is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstitutionPlan {
    /// No declaration, or one declaration and nothing to replace it with.
    Keep,
    /// Exactly one declaration and a replacement is available.
    Substitute,
    /// Two or more declarations: ambiguous, leave all of them alone.
    Ambiguous { count: usize, second: Span },
}

impl DefinitionSites {
    pub fn record(&mut self, span: Span) {
        self.spans.push(span);
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn plan(&self, has_replacement: bool) -> SubstitutionPlan {
        match self.spans.as_slice() {
            [] => SubstitutionPlan::Keep,
            [_] if has_replacement => SubstitutionPlan::Substitute,
            [_] => SubstitutionPlan::Keep,
            [_, second, ..] => SubstitutionPlan::Ambiguous {
                count: self.spans.len(),
                second: *second,
            },
        }
    }
}

/// Replaces the factory declaration with a parsed replacement.
///
/// Run only when exactly one declaration exists; every declaration with the
/// factory name is replaced and not descended into.
pub struct DefinitionSplicer<'a> {
    factory_name: &'a str,
    replacement: &'a FnDecl,
    replaced: usize,
}

impl<'a> DefinitionSplicer<'a> {
    pub fn new(factory_name: &'a str, replacement: &'a FnDecl) -> Self {
        Self {
            factory_name,
            replacement,
            replaced: 0,
        }
    }

    pub fn replaced(&self) -> usize {
        self.replaced
    }
}

impl VisitMut for DefinitionSplicer<'_> {
    fn visit_mut_fn_decl(&mut self, n: &mut FnDecl) {
        if n.ident.sym.as_str() == self.factory_name {
            *n = self.replacement.clone();
            self.replaced += 1;
            return;
        }
        n.visit_mut_children_with(self);
    }
}
