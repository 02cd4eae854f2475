//! Stack growth guard for recursive type walks.
//!
//! Record and table types nest arbitrarily deep (a table column may itself be
//! a table of records, and so on). Acceptance, union, coercion and the
//! serializability walk used by `Trace` all recurse over that nesting, so each
//! recursive step goes through [`ensure_sufficient_stack`].
//!
//! On native targets the stack is grown on demand with `stacker`; on wasm32
//! the closure is called directly.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, growing the stack first if fewer than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// wasm32 manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
