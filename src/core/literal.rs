//! Compile-time folding of string-literal expressions.
//!
//! minErr codes and message templates must be known at build time; this
//! module decides whether an argument expression qualifies and produces
//! its string value.

use swc_ecma_ast::{BinaryOp, Expr, Lit};

/// Resolve `expr` to a constant string.
///
/// Accepts:
/// - string literals: `'text'`
/// - `+` chains of resolvable operands, any nesting: `'a' + ('b' + 'c')`
/// - parenthesized resolvable expressions
///
/// Everything else (identifiers, calls, template literals, numbers, ...)
/// returns `None`.
pub fn resolve_string(expr: &Expr) -> Option<String> {
    let mut out = String::new();
    append_resolved(expr, &mut out).then_some(out)
}

fn append_resolved(expr: &Expr, out: &mut String) -> bool {
    match expr {
        // Lone surrogates have no UTF-8 form and cannot be emitted as JSON keys.
        Expr::Lit(Lit::Str(s)) => match s.value.as_str() {
            Some(value) => {
                out.push_str(value);
                true
            }
            None => false,
        },
        Expr::Bin(bin) if bin.op == BinaryOp::Add => {
            append_resolved(&bin.left, out) && append_resolved(&bin.right, out)
        }
        Expr::Paren(paren) => append_resolved(&paren.expr, out),
        _ => false,
    }
}
