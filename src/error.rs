// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Usage errors.
//!
//! Every variant is a programmer bug on the caller's side. They are checked
//! before any state is touched, so a call that fails leaves the injector
//! exactly as it was.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, InjectorError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InjectorError {
    /// The merged sequence always exposes stable identities.
    #[error("stable identities of the merged sequence cannot be disabled")]
    StableIdentitiesRequired,

    /// The child sequence flipped its durable identity flag after construction.
    #[error("child sequence changed its durable identity policy (was {was}, now {now})")]
    IdentityPolicyChanged { was: bool, now: bool },

    /// Synthesized identities can only follow single item moves.
    #[error("moving {count} items at once is not supported; move one item at a time")]
    MultiItemMove { count: usize },

    #[error("child range {start}..{end} is out of bounds for {len} items")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    /// The child sequence length disagrees with the event just received.
    /// See the `handle` contract on [`ChildSequence`](crate::child::ChildSequence).
    #[error("child sequence has {actual} items, expected {expected} after the event")]
    LengthMismatch { expected: usize, actual: usize },
}
