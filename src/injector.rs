// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! The injector: owns the merged sequence and translates child events into
//! merged-space notifications.
//!
//! Structural events (reload, insert, remove, move) rebuild the merged
//! sequence and diff it against the previous one. Content changes cannot
//! reorder anything, so they skip the differ and translate indices directly.
//!
//! Nothing is merged until [`Injector::activate`] is called. Before that,
//! calls still update overlays, options and identities but return no
//! notifications.
//!
//! Single-threaded by contract: every call runs to completion and returns
//! the notifications for exactly that call.

use smallvec::smallvec;

use crate::child::ChildSequence;
use crate::diff::Differ;
use crate::diff::MyersDiffer;
use crate::entry::Identity;
use crate::entry::Kind;
use crate::entry::MergedEntry;
use crate::error::InjectorError;
use crate::error::Result;
use crate::event::ChildEvent;
use crate::event::Notification;
use crate::event::Notifications;
use crate::identity::Identities;
use crate::merge;
use crate::merge::ChildAccess;
use crate::options::MergeOptions;
use crate::overlay::OverlaySet;
use crate::overlay::ViewCreator;
use crate::vector::TranslationVectors;

/// What a merged position holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// An injected entry, with the position it was injected at.
    Injected { kind: Kind, position: usize },
    /// A child entry, with its child-space index.
    Child(usize),
}

/// The child sequence as seen by the merge engine.
struct ChildView<'a, S: ?Sized> {
    child: &'a S,
    identities: &'a Identities,
}

impl<S: ChildSequence + ?Sized> ChildAccess for ChildView<'_, S> {
    fn len(&self) -> usize {
        return self.child.len();
    }

    fn kind_at(&self, index: usize) -> Kind {
        return self.child.kind_at(index);
    }

    fn identity_at(&self, index: usize) -> Identity {
        return self.identities.identity_at(self.child, index);
    }
}

/// Overlays `C`-created entries onto the child sequence `S`.
pub struct Injector<S, C, D = MyersDiffer> {
    child: S,
    overlays: OverlaySet<C>,
    vectors: TranslationVectors,
    identities: Identities,
    options: MergeOptions,
    differ: D,
    merged: Vec<MergedEntry>,
    active: bool,
}

impl<S: ChildSequence, C> Injector<S, C, MyersDiffer> {
    pub fn new(child: S) -> Injector<S, C, MyersDiffer> {
        return Self::with_options(child, MergeOptions::default());
    }

    pub fn with_options(child: S, options: MergeOptions) -> Injector<S, C, MyersDiffer> {
        return Injector::with_differ(child, options, MyersDiffer);
    }
}

impl<S: ChildSequence, C, D: Differ> Injector<S, C, D> {
    /// The durable identity policy is read from `child` here and fixed for
    /// the injector's lifetime.
    pub fn with_differ(child: S, options: MergeOptions, differ: D) -> Injector<S, C, D> {
        let identities = Identities::new(child.has_durable_identities(), child.len());
        return Injector {
            child,
            overlays: OverlaySet::new(),
            vectors: TranslationVectors::new(),
            identities,
            options,
            differ,
            merged: Vec::new(),
            active: false,
        };
    }

    /// Perform the deferred first vector and merge computation. Idempotent.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.vectors = TranslationVectors::compute(&self.overlays);
        self.merged = self.rebuild();
        self.active = true;
        tracing::debug!(merged = self.merged.len(), "injector activated");
    }

    pub fn is_active(&self) -> bool {
        return self.active;
    }

    pub fn child(&self) -> &S {
        return &self.child;
    }

    /// Mutate the child sequence. Report each mutation through
    /// [`handle`](Injector::handle) before any other call.
    pub fn child_mut(&mut self) -> &mut S {
        return &mut self.child;
    }

    // -------------------------------------------------------------------------
    // Overlays
    // -------------------------------------------------------------------------

    /// Inject an entry at merged `position`, replacing whatever was injected
    /// there before.
    pub fn inject(&mut self, creator: C, position: usize) -> Notifications<S::Payload> {
        if let Some(replaced) = self.overlays.insert(creator, position) {
            tracing::debug!(position, old_kind = replaced.kind, "replaced injected entry");
        }
        return self.overlays_changed();
    }

    /// Remove the entry injected at `position`. A missing entry is logged and
    /// otherwise ignored.
    pub fn remove_injected(&mut self, position: usize) -> Notifications<S::Payload> {
        if self.overlays.remove(position).is_none() {
            tracing::warn!(position, "no injected entry to remove at this position");
            return Notifications::new();
        }
        return self.overlays_changed();
    }

    /// Positions holding an injected entry, ascending.
    pub fn injected_positions(&self) -> Vec<usize> {
        return self.overlays.positions().collect();
    }

    pub fn count_injected(&self) -> usize {
        return self.overlays.len();
    }

    pub fn overlays(&self) -> &OverlaySet<C> {
        return &self.overlays;
    }

    /// Create the view of the injected entry of `kind`. `None` when `kind`
    /// belongs to the child sequence.
    pub fn create_view<Parent>(&self, kind: Kind, parent: &Parent) -> Option<C::View>
    where
        Parent: ?Sized,
        C: ViewCreator<Parent>,
    {
        let overlay = self.overlays.by_kind(kind)?;
        return Some(overlay.creator.create_view(parent));
    }

    fn overlays_changed(&mut self) -> Notifications<S::Payload> {
        if !self.active {
            return Notifications::new();
        }
        self.vectors = TranslationVectors::compute(&self.overlays);
        return self.remerge();
    }

    // -------------------------------------------------------------------------
    // Options
    // -------------------------------------------------------------------------

    pub fn options(&self) -> MergeOptions {
        return self.options;
    }

    pub fn show_overlay(&self) -> bool {
        return self.options.show_overlay;
    }

    pub fn show_on_empty_child(&self) -> bool {
        return self.options.show_on_empty_child;
    }

    pub fn allow_lower_position(&self) -> bool {
        return self.options.allow_lower_position;
    }

    pub fn set_show_overlay(&mut self, show: bool) -> Notifications<S::Payload> {
        self.options.show_overlay = show;
        return self.remerge();
    }

    pub fn set_show_on_empty_child(&mut self, show: bool) -> Notifications<S::Payload> {
        self.options.show_on_empty_child = show;
        return self.remerge();
    }

    pub fn set_allow_lower_position(&mut self, allow: bool) -> Notifications<S::Payload> {
        self.options.allow_lower_position = allow;
        return self.remerge();
    }

    // -------------------------------------------------------------------------
    // Positions
    // -------------------------------------------------------------------------

    /// Merged position to child position. Unspecified for positions holding
    /// an injected entry; use [`slot`](Injector::slot) to tell them apart.
    pub fn to_child_position(&self, position: usize) -> usize {
        if !self.options.show_overlay {
            return position;
        }
        return self.vectors.to_child(position);
    }

    /// Child position to merged position.
    pub fn from_child_position(&self, child: usize) -> usize {
        if !self.options.show_overlay {
            return child;
        }
        return self.vectors.from_child(child);
    }

    /// Number of injected entries at positions `<= position`.
    pub fn injected_up_to(&self, position: usize) -> usize {
        return self.vectors.injected_up_to(position);
    }

    pub fn vectors(&self) -> &TranslationVectors {
        return &self.vectors;
    }

    // -------------------------------------------------------------------------
    // Merged sequence
    // -------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        return self.merged.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.merged.is_empty();
    }

    pub fn entries(&self) -> &[MergedEntry] {
        return &self.merged;
    }

    pub fn entry(&self, position: usize) -> Option<MergedEntry> {
        return self.merged.get(position).copied();
    }

    pub fn kind_at(&self, position: usize) -> Option<Kind> {
        return self.merged.get(position).map(|e| e.kind);
    }

    pub fn identity_at(&self, position: usize) -> Option<Identity> {
        return self.merged.get(position).map(|e| e.identity);
    }

    pub fn slot(&self, position: usize) -> Option<Slot> {
        let entry = self.merged.get(position)?;
        if entry.injected {
            let overlay = self.overlays.by_kind(entry.kind)?;
            return Some(Slot::Injected { kind: entry.kind, position: overlay.position });
        }
        return Some(Slot::Child(self.to_child_position(position)));
    }

    /// The merged sequence always carries stable identities.
    pub fn has_stable_identities(&self) -> bool {
        return true;
    }

    /// Only `true` is accepted.
    pub fn set_stable_identities(&mut self, stable: bool) -> Result<()> {
        if !stable {
            return Err(InjectorError::StableIdentitiesRequired);
        }
        return Ok(());
    }

    /// Synthesized child identities, when the child has no durable ones.
    pub fn synthesized_identities(&self) -> Option<&[Identity]> {
        return self.identities.synthesized();
    }

    // -------------------------------------------------------------------------
    // Child events
    // -------------------------------------------------------------------------

    /// Apply a child event the host has already performed on the child
    /// sequence. A rejected event leaves the injector untouched.
    pub fn handle(&mut self, event: ChildEvent<S::Payload>) -> Result<Notifications<S::Payload>> {
        let durable = self.child.has_durable_identities();
        if durable != self.identities.is_durable() {
            return Err(InjectorError::IdentityPolicyChanged {
                was: self.identities.is_durable(),
                now: durable,
            });
        }

        let child_len = self.child.len();
        match event {
            ChildEvent::Reload => {
                tracing::trace!(child_len, "child reloaded");
                self.identities.reset(child_len);
                if durable {
                    return Ok(self.remerge());
                }
                if !self.active {
                    return Ok(Notifications::new());
                }
                self.merged = self.rebuild();
                return Ok(smallvec![Notification::Reset]);
            }
            ChildEvent::Inserted { start, count } => {
                tracing::trace!(start, count, "child range inserted");
                self.identities.insert_range(start, count, child_len)?;
                return Ok(self.remerge());
            }
            ChildEvent::Removed { start, count } => {
                tracing::trace!(start, count, "child range removed");
                self.identities.remove_range(start, count, child_len)?;
                return Ok(self.remerge());
            }
            ChildEvent::Moved { from, to, count } => {
                tracing::trace!(from, to, count, "child range moved");
                self.identities.move_item(from, to, count, child_len)?;
                return Ok(self.remerge());
            }
            ChildEvent::Changed { start, count, payload } => {
                tracing::trace!(start, count, "child range changed");
                let end = match start.checked_add(count) {
                    Some(end) if end <= child_len => end,
                    Some(end) => return Err(InjectorError::RangeOutOfBounds { start, end, len: child_len }),
                    None => {
                        return Err(InjectorError::RangeOutOfBounds { start, end: usize::MAX, len: child_len });
                    }
                };
                if !self.active {
                    return Ok(Notifications::new());
                }
                // Kept current for lookups; order cannot change.
                self.merged = self.rebuild();
                // Children cut off by a crowded head have no merged position.
                return Ok((start..end)
                    .map(|child| self.from_child_position(child))
                    .filter(|&position| self.merged.get(position).is_some_and(|e| !e.injected))
                    .map(|position| Notification::Changed { position, count: 1, payload: payload.clone() })
                    .collect());
            }
        }
    }

    fn rebuild(&self) -> Vec<MergedEntry> {
        let view = ChildView {
            child: &self.child,
            identities: &self.identities,
        };
        return merge::merge(&self.overlays, &view, &self.options);
    }

    /// Rebuild the merged sequence and diff it against the previous one.
    fn remerge(&mut self) -> Notifications<S::Payload> {
        if !self.active {
            return Notifications::new();
        }
        let merged = self.rebuild();
        let previous = std::mem::replace(&mut self.merged, merged);
        let script = self.differ.diff(&previous, &self.merged, MergedEntry::identity_key, |_, _| true);
        tracing::debug!(ops = script.len(), merged = self.merged.len(), "dispatching edit script");
        return script.into_iter().map(Notification::from).collect();
    }
}
