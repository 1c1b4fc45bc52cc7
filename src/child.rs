// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

use crate::entry::Identity;
use crate::entry::Kind;
use crate::entry::NO_IDENTITY;

/// The backing sequence the overlay is layered on.
///
/// The host owns the items; the injector only reads counts, kinds and
/// identities. Every structural mutation must be followed by the matching
/// [`ChildEvent`](crate::event::ChildEvent).
///
/// # Contract of `Injector::handle`
///
/// The host mutates first and reports second, one event per mutation: by the
/// time [`Injector::handle`](crate::injector::Injector::handle) sees an
/// event, [`len`](ChildSequence::len) must already include it. With
/// synthesized identities the injector checks this, and an event whose
/// resulting length disagrees fails with
/// [`InjectorError::LengthMismatch`](crate::error::InjectorError::LengthMismatch)
/// and changes nothing. Batching several mutations behind one event, or
/// reporting before mutating, breaks the contract; report a
/// [`ChildEvent::Reload`](crate::event::ChildEvent::Reload) instead.
pub trait ChildSequence {
    /// Extra data carried by content-change events.
    type Payload: Clone;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        return self.len() == 0;
    }

    /// Kind of the item at `index`. Must stay below the overlay kind floor.
    fn kind_at(&self, index: usize) -> Kind;

    /// Stable identity of the item at `index`. Only read when
    /// [`has_durable_identities`](ChildSequence::has_durable_identities)
    /// returns true.
    fn identity_at(&self, _index: usize) -> Identity {
        return NO_IDENTITY;
    }

    /// Whether identities survive the sequence's own mutations.
    fn has_durable_identities(&self) -> bool {
        return false;
    }
}
