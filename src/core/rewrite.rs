//! Call-site rewriting.

use swc_ecma_ast::{CallExpr, ExprOrSpread};

/// Drop the message argument (position 1) from a matched minErr call.
///
/// `fooMinErr('code', 'message', a, b)` becomes `fooMinErr('code', a, b)`.
/// The callee, the code argument and every pass-through argument are kept
/// as the same nodes. Returns the removed argument, or `None` if the call
/// has no message argument.
pub fn strip_message(call: &mut CallExpr) -> Option<ExprOrSpread> {
    if call.args.len() < 2 {
        return None;
    }
    Some(call.args.remove(1))
}
