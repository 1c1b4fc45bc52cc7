// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Entries of the merged sequence and the kind allocator for overlays.
//!
//! Kinds share one integer space: child kinds are small non-negative
//! integers handed out by the host, overlay kinds are carved from the top of
//! the space downwards. Nothing checks that the two ranges stay apart. The
//! host must keep every child kind below [`KindAllocator::floor`].

/// A rendering/identity class tag.
pub type Kind = i32;

/// A stable identity of an entry.
pub type Identity = i64;

/// Identity reported by child sequences without durable identities.
pub const NO_IDENTITY: Identity = -1;

/// One entry of the merged sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MergedEntry {
    pub kind: Kind,
    pub identity: Identity,
    pub injected: bool,
}

impl MergedEntry {
    /// An overlay-derived entry. Overlay kinds are unique, so the kind doubles
    /// as the identity.
    pub fn injected(kind: Kind) -> MergedEntry {
        return MergedEntry {
            kind,
            identity: kind as Identity,
            injected: true,
        };
    }

    /// A child-derived entry.
    pub fn child(kind: Kind, identity: Identity) -> MergedEntry {
        return MergedEntry {
            kind,
            identity,
            injected: false,
        };
    }

    /// The key the differ matches entries by.
    pub fn identity_key(&self) -> (Kind, Identity) {
        return (self.kind, self.identity);
    }

    /// Identity equality: `(kind, identity)` only.
    pub fn same_identity(&self, other: &MergedEntry) -> bool {
        return self.identity_key() == other.identity_key();
    }
}

/// Hands out overlay kinds from `Kind::MAX` downwards.
///
/// Kinds are never reused, even after the overlay owning them is removed.
#[derive(Clone, Debug, Default)]
pub struct KindAllocator {
    assigned: Kind,
}

impl KindAllocator {
    pub fn new() -> KindAllocator {
        return KindAllocator { assigned: 0 };
    }

    /// Allocate the next overlay kind.
    pub fn next(&mut self) -> Kind {
        assert!(self.assigned < Kind::MAX, "overlay kind space exhausted");
        let kind = Kind::MAX - self.assigned;
        self.assigned += 1;
        return kind;
    }

    /// Number of kinds handed out so far.
    pub fn assigned(&self) -> usize {
        return self.assigned as usize;
    }

    /// The next kind to be handed out. Allocated overlay kinds all sit above
    /// it; child kinds must stay strictly below it.
    pub fn floor(&self) -> Kind {
        return Kind::MAX - self.assigned;
    }
}
