//! Cart error types.

use thiserror::Error;

/// Errors surfaced by the public cart API.
///
/// Storage failures are deliberately absent: persistence is best-effort and
/// never fails a mutation (see [`crate::store::CartStore`]).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CartError {
    /// The cart was accessed outside an active provider scope.
    ///
    /// This is a wiring mistake in the embedding application, not a runtime
    /// data issue, so it is surfaced immediately instead of being swallowed.
    #[error("cart must be used within an active CartProvider scope")]
    OutsideProvider,
}
