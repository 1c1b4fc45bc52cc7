// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! The overlay set: injected entries keyed by their desired merged position.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::entry::Kind;
use crate::entry::KindAllocator;

/// Produces the renderable view of an injected entry.
///
/// Invoked lazily, only when the entry is about to be shown.
pub trait ViewCreator<Parent: ?Sized> {
    type View;

    fn create_view(&self, parent: &Parent) -> Self::View;
}

impl<Parent: ?Sized, View, F> ViewCreator<Parent> for F
where
    F: Fn(&Parent) -> View,
{
    type View = View;

    fn create_view(&self, parent: &Parent) -> View {
        return self(parent);
    }
}

/// An injected entry.
#[derive(Clone, Debug)]
pub struct Overlay<C> {
    /// Desired merged-space index.
    pub position: usize,
    pub creator: C,
    pub kind: Kind,
}

/// Arena of overlays keyed by position, at most one per position.
#[derive(Clone, Debug)]
pub struct OverlaySet<C> {
    by_position: BTreeMap<usize, Overlay<C>>,
    position_of_kind: FxHashMap<Kind, usize>,
    kinds: KindAllocator,
}

impl<C> OverlaySet<C> {
    pub fn new() -> OverlaySet<C> {
        return OverlaySet {
            by_position: BTreeMap::new(),
            position_of_kind: FxHashMap::default(),
            kinds: KindAllocator::new(),
        };
    }

    /// Insert an overlay at `position` under a freshly allocated kind.
    /// Returns the overlay it replaced, if any.
    pub fn insert(&mut self, creator: C, position: usize) -> Option<Overlay<C>> {
        let kind = self.kinds.next();
        let replaced = self.by_position.insert(position, Overlay { position, creator, kind });
        if let Some(old) = &replaced {
            self.position_of_kind.remove(&old.kind);
        }
        self.position_of_kind.insert(kind, position);
        return replaced;
    }

    /// Remove the overlay at `position`.
    pub fn remove(&mut self, position: usize) -> Option<Overlay<C>> {
        let removed = self.by_position.remove(&position)?;
        self.position_of_kind.remove(&removed.kind);
        return Some(removed);
    }

    pub fn contains(&self, position: usize) -> bool {
        return self.by_position.contains_key(&position);
    }

    pub fn get(&self, position: usize) -> Option<&Overlay<C>> {
        return self.by_position.get(&position);
    }

    /// Kind of the overlay at `position`.
    pub fn kind_at(&self, position: usize) -> Option<Kind> {
        return self.by_position.get(&position).map(|o| o.kind);
    }

    /// Look up an overlay by its kind.
    pub fn by_kind(&self, kind: Kind) -> Option<&Overlay<C>> {
        let position = self.position_of_kind.get(&kind)?;
        return self.by_position.get(position);
    }

    pub fn len(&self) -> usize {
        return self.by_position.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.by_position.is_empty();
    }

    /// Occupied positions, ascending.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        return self.by_position.keys().copied();
    }

    /// Overlays in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = &Overlay<C>> + '_ {
        return self.by_position.values();
    }

    /// Number of overlays at positions `<= position`.
    pub fn count_up_to(&self, position: usize) -> usize {
        return self.by_position.range(..=position).count();
    }

    pub fn max_position(&self) -> Option<usize> {
        return self.by_position.keys().next_back().copied();
    }

    /// See [`KindAllocator::floor`].
    pub fn kind_floor(&self) -> Kind {
        return self.kinds.floor();
    }
}

impl<C> Default for OverlaySet<C> {
    fn default() -> Self {
        return Self::new();
    }
}
