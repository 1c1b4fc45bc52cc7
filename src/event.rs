// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Events in and notifications out.
//!
//! The host reports each child mutation as a [`ChildEvent`] in child-space
//! indices. The injector answers with [`Notification`]s in merged-space
//! indices, in the order they must be applied to the rendering surface.

use smallvec::SmallVec;

use crate::diff::EditOp;

/// A mutation of the child sequence, already applied by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChildEvent<P> {
    /// Everything may have changed.
    Reload,
    Inserted { start: usize, count: usize },
    Removed { start: usize, count: usize },
    /// Only single item moves (`count == 1`) are supported when identities
    /// are synthesized.
    Moved { from: usize, to: usize, count: usize },
    /// Content changed in place; order is untouched.
    Changed { start: usize, count: usize, payload: Option<P> },
}

/// A change of the merged sequence, for the rendering surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification<P> {
    /// Drop everything and re-read the merged sequence.
    Reset,
    Inserted { position: usize, count: usize },
    Removed { position: usize, count: usize },
    Moved { from: usize, to: usize },
    Changed { position: usize, count: usize, payload: Option<P> },
}

/// Notifications produced by one call. Usually a handful.
pub type Notifications<P> = SmallVec<[Notification<P>; 4]>;

impl<P> From<EditOp> for Notification<P> {
    fn from(op: EditOp) -> Self {
        return match op {
            EditOp::Removed { position, count } => Notification::Removed { position, count },
            EditOp::Inserted { position, count } => Notification::Inserted { position, count },
            EditOp::Moved { from, to } => Notification::Moved { from, to },
            EditOp::Changed { position, count } => Notification::Changed { position, count, payload: None },
        };
    }
}
