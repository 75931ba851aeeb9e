//! Stack safety for recursive type classification.
//!
//! Classifying one root type walks every type reachable from its method
//! signatures, fields, superclasses and interfaces. The walk is recursive
//! and its depth follows the shape of the class graph, not the nesting of
//! any source file, so long inheritance chains or wide value-type graphs
//! can exceed the default thread stack.
//!
//! # Platform Support
//!
//! - **Native targets**: grows the stack on demand through `stacker`.
//! - **WASM targets**: direct call.
//!
//! # Configuration
//!
//! - **Red zone**: 100KB; below this the stack is grown before recursing.
//! - **Growth size**: 1MB per growth.

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f` with at least [`RED_ZONE`] bytes of stack available.
///
/// ```text
/// fn make_type(&mut self, ty: &JavaType, stack: &mut ContextStack) -> Attempt<TypeId> {
///     ensure_sufficient_stack(|| self.make_type_inner(ty, stack))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
