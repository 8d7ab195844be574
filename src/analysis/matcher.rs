//! Signature matcher
//!
//! Decides whether a call expression denotes a cataloged built-in, despite
//! overloads and qualifier ambiguity. The rules mirror how Processing
//! dispatches built-ins:
//!
//! - `this.`/`super.`-qualified calls only reach built-ins from the
//!   top-level applet scope; a nested class addressing its enclosing
//!   instance is something else entirely.
//! - A bare name that resolves to a visible variable declaration is user
//!   state shadowing the built-in, not a call to it.
//! - A dotted receiver (`obj.x(...)`) is an instance call on whatever type
//!   `obj` has; the catalog models implicit-receiver built-ins, so it never
//!   matches those directly.
//!
//! Overloads are selected by exact arity only, first match in catalog
//! declaration order. No type-based disambiguation is attempted; downstream
//! behavior was tuned against this heuristic.

use crate::catalog::ApiSignature;
use crate::model::{CallExpr, Qualifier, ScopeView};

/// Whether `call` matches one specific built-in signature.
pub fn matches(call: &CallExpr, sig: &ApiSignature, scope: &ScopeView) -> bool {
    match &call.qualifier {
        Qualifier::This | Qualifier::Super => {
            if !scope.in_top_level() {
                return false;
            }
        }
        Qualifier::Implicit => {
            if scope.resolves(&call.name) {
                return false;
            }
        }
        Qualifier::Named(_) => return false,
    }
    call.name == sig.name && call.arg_count() == sig.arity()
}

/// First signature in `sigs` that `call` matches, in iteration order.
pub fn match_first<'c, I>(call: &CallExpr, sigs: I, scope: &ScopeView) -> Option<&'c ApiSignature>
where
    I: IntoIterator<Item = &'c ApiSignature>,
{
    sigs.into_iter().find(|sig| matches(call, sig, scope))
}

/// Whether the call's base name denotes `variable` (unshadowed).
///
/// This is the loose form used for the matrix-stack methods: name identity
/// only, no arity check.
pub fn matches_variable(call: &CallExpr, variable: &str, scope: &ScopeView) -> bool {
    match &call.qualifier {
        Qualifier::This | Qualifier::Super => scope.in_top_level() && call.name == variable,
        Qualifier::Implicit => call.name == variable && !scope.resolves(variable),
        Qualifier::Named(_) => false,
    }
}

/// First of `variables` the call denotes, if any.
pub fn match_any_variable<'v>(
    call: &CallExpr,
    variables: &[&'v str],
    scope: &ScopeView,
) -> Option<&'v str> {
    variables
        .iter()
        .find(|v| matches_variable(call, v, scope))
        .copied()
}

/// First signature matching `call` as an instance call through a named
/// receiver (`v.rotate(a)` against the PVector surface).
///
/// The qualifier logic is inverted relative to [`matches`]: only calls made
/// through some receiver expression qualify, and the receiver's identity is
/// the caller's problem.
pub fn match_instance_call<'c, I>(call: &CallExpr, sigs: I) -> Option<&'c ApiSignature>
where
    I: IntoIterator<Item = &'c ApiSignature>,
{
    if !matches!(call.qualifier, Qualifier::Named(_)) {
        return None;
    }
    sigs.into_iter()
        .find(|sig| call.name == sig.name && call.arg_count() == sig.arity())
}

/// Whether `call` passes a bare literal in a pixel-tagged position of `sig`.
pub fn has_literal_pixel_args(call: &CallExpr, sig: &ApiSignature) -> bool {
    call.literal_args
        .iter()
        .zip(sig.params.iter())
        .any(|(literal, param)| *literal && param.pixels)
}
