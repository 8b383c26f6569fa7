//! Recognition of minErr call sites.
//!
//! Two call shapes denote a minErr invocation:
//!
//! ```text
//! fooMinErr('code', 'message {0}', arg)        // direct: namespace "foo"
//! minErr('foo')('code', 'message {0}', arg)    // curried: namespace "foo"
//! ```
//!
//! In both, argument 0 is the error code, argument 1 the message template and
//! the rest are passed through to the error at runtime.

use swc_ecma_ast::{CallExpr, Callee, Expr, ExprOrSpread, NewExpr};

use crate::core::literal::resolve_string;

/// How a matched call names its namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallShape {
    /// `fooMinErr(...)`: namespace taken from the callee name.
    Direct { namespace: String },
    /// `minErr('foo')(...)`: namespace taken from the factory argument.
    Curried { namespace: String },
}

impl CallShape {
    pub fn namespace(&self) -> &str {
        match self {
            CallShape::Direct { namespace } | CallShape::Curried { namespace } => namespace,
        }
    }
}

/// A call that has the shape of a minErr invocation.
///
/// Borrows the argument nodes from the call; nothing here is validated yet
/// beyond the shape itself.
#[derive(Debug)]
pub struct MatchCandidate<'a> {
    pub shape: CallShape,
    pub code: &'a Expr,
    pub message: &'a Expr,
    /// Arguments after the message, forwarded unchanged.
    pub trailing: &'a [ExprOrSpread],
}

/// Matches calls against the configured factory name and direct-form suffix.
#[derive(Debug, Clone)]
pub struct MinErrMatcher {
    factory_name: String,
    suffix: String,
}

impl MinErrMatcher {
    pub fn new(factory_name: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            factory_name: factory_name.into(),
            suffix: suffix.into(),
        }
    }

    pub fn factory_name(&self) -> &str {
        &self.factory_name
    }

    /// Match a call expression against both shapes.
    ///
    /// Returns `None` for calls that are not minErr invocations, including
    /// ones with fewer than two arguments (e.g. `minErr('foo')` on its own)
    /// and ones spreading into the code or message position.
    pub fn match_call<'a>(&self, call: &'a CallExpr) -> Option<MatchCandidate<'a>> {
        let shape = self.call_shape(&call.callee)?;

        let [code, message, trailing @ ..] = call.args.as_slice() else {
            return None;
        };
        if code.spread.is_some() || message.spread.is_some() {
            return None;
        }

        Some(MatchCandidate {
            shape,
            code: &code.expr,
            message: &message.expr,
            trailing,
        })
    }

    fn call_shape(&self, callee: &Callee) -> Option<CallShape> {
        let Callee::Expr(callee) = callee else {
            return None;
        };

        match &**callee {
            Expr::Ident(ident) => {
                let namespace = ident.sym.as_str().strip_suffix(self.suffix.as_str())?;
                if namespace.is_empty() {
                    return None;
                }
                Some(CallShape::Direct {
                    namespace: namespace.to_string(),
                })
            }
            Expr::Call(factory_call) if self.is_factory_callee(&factory_call.callee) => {
                let [arg] = factory_call.args.as_slice() else {
                    return None;
                };
                if arg.spread.is_some() {
                    return None;
                }
                resolve_string(&arg.expr).map(|namespace| CallShape::Curried { namespace })
            }
            _ => None,
        }
    }

    fn is_factory_callee(&self, callee: &Callee) -> bool {
        matches!(
            callee,
            Callee::Expr(expr)
                if matches!(&**expr, Expr::Ident(ident) if ident.sym.as_str() == self.factory_name)
        )
    }
}

/// Find the call wrapped by an error constructor: `new Error(call)` or `Error(call)`.
///
/// Only a sole, non-spread call argument counts. Parentheses around the
/// constructor expression, its callee or its argument are looked through.
/// Used on the argument of a `throw` statement.
pub fn error_wrapped_call(expr: &mut Expr) -> Option<&mut CallExpr> {
    let args = match unparen_mut(expr) {
        Expr::New(NewExpr {
            callee,
            args: Some(args),
            ..
        }) if is_error_ident(callee) => args,
        Expr::Call(CallExpr {
            callee: Callee::Expr(callee),
            args,
            ..
        }) if is_error_ident(callee) => args,
        _ => return None,
    };

    match args.as_mut_slice() {
        [ExprOrSpread { spread: None, expr }] => match unparen_mut(expr) {
            Expr::Call(call) => Some(call),
            _ => None,
        },
        _ => None,
    }
}

fn is_error_ident(expr: &Expr) -> bool {
    matches!(unparen(expr), Expr::Ident(ident) if ident.sym.as_str() == "Error")
}

fn unparen(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unparen(&paren.expr),
        _ => expr,
    }
}

fn unparen_mut(expr: &mut Expr) -> &mut Expr {
    match expr {
        Expr::Paren(paren) => unparen_mut(&mut paren.expr),
        _ => expr,
    }
}
