// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! The merge engine.
//!
//! Combines the overlay set and the child sequence into one ordered
//! sequence of [`MergedEntry`] under one of five policies. The policy is a
//! pure function of the options and whether the child sequence is empty.

use crate::entry::Identity;
use crate::entry::Kind;
use crate::entry::MergedEntry;
use crate::options::MergeOptions;
use crate::overlay::OverlaySet;

/// Read access to the child side of a merge.
pub trait ChildAccess {
    fn len(&self) -> usize;
    fn kind_at(&self, index: usize) -> Kind;
    fn identity_at(&self, index: usize) -> Identity;
}

/// `(kind, identity)` pairs, mostly useful in tests and benchmarks.
impl ChildAccess for [(Kind, Identity)] {
    fn len(&self) -> usize {
        return <[(Kind, Identity)]>::len(self);
    }

    fn kind_at(&self, index: usize) -> Kind {
        return self[index].0;
    }

    fn identity_at(&self, index: usize) -> Identity {
        return self[index].1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MergePolicy {
    /// Child entries only.
    Hidden,
    /// No children: every overlay, ascending by position.
    OverlayOnly,
    /// No children and overlays are not shown on their own.
    Empty,
    /// Overlays at their positions within `child_len + count_up_to(child_len)`;
    /// overlays beyond that range are dropped.
    Interleaved,
    /// Like `Interleaved`, with the overlays beyond the range appended at the
    /// tail in position order.
    InterleavedWithOverflow,
}

impl MergePolicy {
    pub fn select(options: &MergeOptions, child_len: usize) -> MergePolicy {
        if !options.show_overlay {
            return MergePolicy::Hidden;
        }
        if child_len == 0 {
            return match options.show_on_empty_child {
                true => MergePolicy::OverlayOnly,
                false => MergePolicy::Empty,
            };
        }
        return match options.allow_lower_position {
            true => MergePolicy::InterleavedWithOverflow,
            false => MergePolicy::Interleaved,
        };
    }

    pub fn apply<C, A>(self, overlays: &OverlaySet<C>, child: &A) -> Vec<MergedEntry>
    where
        A: ChildAccess + ?Sized,
    {
        return match self {
            MergePolicy::Hidden => children_only(child),
            MergePolicy::OverlayOnly => overlays
                .iter()
                .map(|o| MergedEntry::injected(o.kind))
                .collect(),
            MergePolicy::Empty => Vec::new(),
            MergePolicy::Interleaved => interleave(overlays, child).0,
            MergePolicy::InterleavedWithOverflow => {
                let (mut merged, emitted) = interleave(overlays, child);
                merged.extend(overlays.iter().skip(emitted).map(|o| MergedEntry::injected(o.kind)));
                merged
            }
        };
    }
}

/// Select the policy for `options` and merge.
pub fn merge<C, A>(overlays: &OverlaySet<C>, child: &A, options: &MergeOptions) -> Vec<MergedEntry>
where
    A: ChildAccess + ?Sized,
{
    let policy = MergePolicy::select(options, child.len());
    let merged = policy.apply(overlays, child);
    tracing::debug!(?policy, overlays = overlays.len(), children = child.len(), merged = merged.len(), "merged");
    return merged;
}

fn children_only<A: ChildAccess + ?Sized>(child: &A) -> Vec<MergedEntry> {
    return (0..child.len())
        .map(|i| MergedEntry::child(child.kind_at(i), child.identity_at(i)))
        .collect();
}

/// Walk merged positions `0..size`, emitting the overlay that occupies the
/// position, else the next child. `size` is the child count plus the
/// overlays at positions `<= child_len`; overlays at or past `size` are not
/// emitted, and in a crowded head the trailing children are cut off.
/// Returns the merged entries and how many overlays (a prefix of the set in
/// position order) were emitted.
fn interleave<C, A>(overlays: &OverlaySet<C>, child: &A) -> (Vec<MergedEntry>, usize)
where
    A: ChildAccess + ?Sized,
{
    let child_len = child.len();
    let size = child_len + overlays.count_up_to(child_len);
    let mut merged = Vec::with_capacity(size);
    let mut next_child = 0;
    let mut emitted = 0;
    for position in 0..size {
        if let Some(kind) = overlays.kind_at(position) {
            merged.push(MergedEntry::injected(kind));
            emitted += 1;
        } else if next_child < child_len {
            merged.push(MergedEntry::child(child.kind_at(next_child), child.identity_at(next_child)));
            next_child += 1;
        }
    }
    return (merged, emitted);
}
