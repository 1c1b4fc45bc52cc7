// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Property-based tests for the injector.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use injector::ChildEvent;
use injector::ChildSequence;
use injector::Identity;
use injector::Injector;
use injector::Kind;
use injector::MergedEntry;
use injector::Notification;
use injector::Notifications;
use injector::Slot;

// =============================================================================
// Test helpers
// =============================================================================

#[derive(Clone, Debug)]
struct List {
    rows: Vec<Identity>,
    durable: bool,
}

impl ChildSequence for List {
    type Payload = String;

    fn len(&self) -> usize {
        return self.rows.len();
    }

    fn kind_at(&self, _index: usize) -> Kind {
        return 0;
    }

    fn identity_at(&self, index: usize) -> Identity {
        return self.rows[index];
    }

    fn has_durable_identities(&self) -> bool {
        return self.durable;
    }
}

/// One caller action. Fractions pick indices relative to the current length.
#[derive(Clone, Debug)]
enum Op {
    Inject(usize),
    Remove(f64),
    Insert { at: f64, count: usize },
    Delete { at: f64, count: usize },
    Move { from: f64, to: f64 },
    Change(f64),
    ShowOverlay(bool),
    ShowOnEmptyChild(bool),
    AllowLowerPosition(bool),
    Reload,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..24).prop_map(Op::Inject),
        2 => (0.0..1.0f64).prop_map(Op::Remove),
        3 => (0.0..=1.0f64, 1usize..4).prop_map(|(at, count)| Op::Insert { at, count }),
        2 => (0.0..1.0f64, 1usize..4).prop_map(|(at, count)| Op::Delete { at, count }),
        2 => (0.0..1.0f64, 0.0..1.0f64).prop_map(|(from, to)| Op::Move { from, to }),
        1 => (0.0..1.0f64).prop_map(Op::Change),
        1 => any::<bool>().prop_map(Op::ShowOverlay),
        1 => any::<bool>().prop_map(Op::ShowOnEmptyChild),
        1 => any::<bool>().prop_map(Op::AllowLowerPosition),
        1 => Just(Op::Reload),
    ]
}

fn index(fraction: f64, len: usize) -> usize {
    return ((fraction * len as f64) as usize).min(len - 1);
}

/// Mutate the child the way the host would, then report it.
fn apply(injector: &mut Injector<List, ()>, next: &mut Identity, op: &Op) -> Notifications<String> {
    let len = injector.child().rows.len();
    match *op {
        Op::Inject(position) => return injector.inject((), position),
        Op::Remove(fraction) => {
            let positions = injector.injected_positions();
            if positions.is_empty() {
                return Notifications::new();
            }
            return injector.remove_injected(positions[index(fraction, positions.len())]);
        }
        Op::Insert { at, count } => {
            let start = ((at * len as f64) as usize).min(len);
            let ids: Vec<Identity> = (0..count as Identity).map(|k| *next + k).collect();
            *next += count as Identity;
            injector.child_mut().rows.splice(start..start, ids);
            return injector.handle(ChildEvent::Inserted { start, count }).unwrap();
        }
        Op::Delete { at, count } => {
            if len == 0 {
                return Notifications::new();
            }
            let start = index(at, len);
            let count = count.min(len - start);
            injector.child_mut().rows.drain(start..start + count);
            return injector.handle(ChildEvent::Removed { start, count }).unwrap();
        }
        Op::Move { from, to } => {
            if len == 0 {
                return Notifications::new();
            }
            let from = index(from, len);
            let to = index(to, len);
            let row = injector.child_mut().rows.remove(from);
            injector.child_mut().rows.insert(to, row);
            return injector.handle(ChildEvent::Moved { from, to, count: 1 }).unwrap();
        }
        Op::Change(at) => {
            if len == 0 {
                return Notifications::new();
            }
            let start = index(at, len);
            return injector.handle(ChildEvent::Changed { start, count: 1, payload: None }).unwrap();
        }
        Op::ShowOverlay(show) => return injector.set_show_overlay(show),
        Op::ShowOnEmptyChild(show) => return injector.set_show_on_empty_child(show),
        Op::AllowLowerPosition(allow) => return injector.set_allow_lower_position(allow),
        Op::Reload => {
            injector.child_mut().rows.reverse();
            return injector.handle(ChildEvent::Reload).unwrap();
        }
    }
}

/// Apply `notifications` to `old`, filling inserted slots from `new`.
fn replay(old: &[MergedEntry], notifications: &[Notification<String>], new: &[MergedEntry]) -> Vec<MergedEntry> {
    let mut current: Vec<Option<MergedEntry>> = old.iter().copied().map(Some).collect();
    for notification in notifications {
        match notification {
            Notification::Reset => current = vec![None; new.len()],
            Notification::Removed { position, count } => {
                current.drain(*position..*position + *count);
            }
            Notification::Inserted { position, count } => {
                for k in 0..*count {
                    current.insert(*position + k, None);
                }
            }
            Notification::Moved { from, to } => {
                let entry = current.remove(*from);
                current.insert(*to, entry);
            }
            Notification::Changed { .. } => {}
        }
    }
    assert_eq!(current.len(), new.len());
    return current
        .into_iter()
        .zip(new.iter())
        .map(|(slot, fresh)| slot.unwrap_or(*fresh))
        .collect();
}

/// The merged sequence built directly from the injector's inputs: children
/// walked with overlays over `0..len + overlays at positions <= len`, the
/// rest dropped or appended.
fn reference_merge(injector: &Injector<List, ()>) -> Vec<MergedEntry> {
    let ids = match injector.synthesized_identities() {
        Some(ids) => ids.to_vec(),
        None => injector.child().rows.clone(),
    };
    let children: Vec<MergedEntry> = ids.iter().map(|&id| MergedEntry::child(0, id)).collect();
    let overlays: Vec<(usize, Kind)> = injector.overlays().iter().map(|o| (o.position, o.kind)).collect();

    if !injector.show_overlay() {
        return children;
    }
    if children.is_empty() {
        if !injector.show_on_empty_child() {
            return Vec::new();
        }
        return overlays.iter().map(|&(_, kind)| MergedEntry::injected(kind)).collect();
    }

    let len = children.len();
    let size = len + overlays.iter().filter(|&&(p, _)| p <= len).count();
    let mut merged = Vec::new();
    let mut next = children.iter();
    for position in 0..size {
        match overlays.iter().find(|&&(p, _)| p == position) {
            Some(&(_, kind)) => merged.push(MergedEntry::injected(kind)),
            None => merged.extend(next.next().copied()),
        }
    }
    if injector.allow_lower_position() {
        let tail = overlays.iter().filter(|&&(p, _)| p >= size);
        merged.extend(tail.map(|&(_, kind)| MergedEntry::injected(kind)));
    }
    return merged;
}

/// Every merged child sits where translation says it does. Children cut off
/// by a crowded head are the trailing ones.
fn check_children(injector: &Injector<List, ()>) -> Result<(), TestCaseError> {
    let child = injector.child();
    let present = injector.entries().iter().filter(|e| !e.injected).count();
    prop_assert!(present <= child.rows.len());
    for c in 0..present {
        let position = injector.from_child_position(c);
        prop_assert_eq!(injector.slot(position), Some(Slot::Child(c)));
        prop_assert_eq!(injector.to_child_position(position), c);
        if child.durable {
            prop_assert_eq!(injector.identity_at(position), Some(child.rows[c]));
        }
    }
    return Ok(());
}

fn fresh(len: usize, durable: bool) -> Injector<List, ()> {
    let rows = (0..len as Identity).collect();
    let mut injector = Injector::new(List { rows, durable });
    injector.activate();
    return injector;
}

// =============================================================================
// Notification properties
// =============================================================================

proptest! {
    #[test]
    fn notifications_replay_to_the_new_sequence(
        durable in any::<bool>(),
        len in 0usize..12,
        ops in prop::collection::vec(arbitrary_op(), 1..40),
    ) {
        let mut injector = fresh(len, durable);
        let mut next = len as Identity;
        for op in &ops {
            let old = injector.entries().to_vec();
            let notifications = apply(&mut injector, &mut next, op);
            let replayed = replay(&old, &notifications, injector.entries());
            prop_assert_eq!(replayed.as_slice(), injector.entries());
        }
    }

    #[test]
    fn merged_sequence_matches_the_reference_merge(
        durable in any::<bool>(),
        len in 0usize..12,
        ops in prop::collection::vec(arbitrary_op(), 1..40),
    ) {
        let mut injector = fresh(len, durable);
        let mut next = len as Identity;
        for op in &ops {
            apply(&mut injector, &mut next, op);
            let expected = reference_merge(&injector);
            prop_assert_eq!(injector.entries(), expected.as_slice());
        }
    }

    #[test]
    fn overlays_within_reach_sit_at_their_positions(
        positions in prop::collection::btree_set(0usize..64, 0..16),
        len in 1usize..40,
        allow_lower_position in any::<bool>(),
    ) {
        let mut injector = fresh(len, true);
        injector.set_allow_lower_position(allow_lower_position);
        for &p in &positions {
            injector.inject((), p);
        }
        let size = len + injector.injected_up_to(len);
        for p in 0..size {
            let entry = injector.entry(p).unwrap();
            prop_assert_eq!(entry.injected, positions.contains(&p));
        }
        let beyond = positions.iter().filter(|&&p| p >= size).count();
        let expected = match allow_lower_position {
            true => size + beyond,
            false => size,
        };
        prop_assert_eq!(injector.len(), expected);
    }
}

// =============================================================================
// Translation properties
// =============================================================================

proptest! {
    #[test]
    fn children_round_trip_through_merged_space(
        durable in any::<bool>(),
        len in 0usize..12,
        ops in prop::collection::vec(arbitrary_op(), 1..40),
    ) {
        let mut injector = fresh(len, durable);
        let mut next = len as Identity;
        for op in &ops {
            apply(&mut injector, &mut next, op);
            check_children(&injector)?;
        }
    }

    #[test]
    fn injected_count_matches_positions(
        positions in prop::collection::btree_set(0usize..64, 0..16),
        removals in prop::collection::vec(0usize..64, 0..8),
    ) {
        let mut injector = fresh(10, true);
        let mut expected = positions.clone();
        for &p in &positions {
            injector.inject((), p);
        }
        for &p in &removals {
            injector.remove_injected(p);
            expected.remove(&p);
        }
        prop_assert_eq!(injector.count_injected(), expected.len());
        prop_assert_eq!(injector.injected_positions(), expected.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(injector.injected_up_to(usize::MAX), expected.len());
    }
}
