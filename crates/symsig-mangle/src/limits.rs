//! Centralized limits for the mangler.
//!
//! Declaration trees come from deserialized libraries, so parent chains and
//! override graphs are bounded here instead of trusted.

// =============================================================================
// Capacity
// =============================================================================

/// Initial capacity of the string builder used for one mangled name.
///
/// Most signatures fit; long generic signatures grow the buffer once.
pub const DEFAULT_MANGLE_CAPACITY: usize = 256;

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum number of enclosing scopes walked while building a qualifier.
///
/// Real nesting (package, classes, local functions) stays in single digits.
/// A parent chain longer than this means the snapshot has a parent cycle; the
/// qualifier is truncated at this depth.
pub const MAX_SCOPE_DEPTH: usize = 256;

/// Maximum depth of the overridden-declaration graph walked when resolving a
/// fake override to its concrete declarations.
pub const MAX_OVERRIDE_RESOLUTION_DEPTH: usize = 64;

/// Maximum nesting of type arguments encoded for one type reference.
pub const MAX_TYPE_NESTING_DEPTH: usize = 64;
