// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Sequence differ.
//!
//! A [`Differ`] turns two sequences into an edit script. Entries are matched
//! by the identity key they map to; content is judged by a separate
//! predicate. The script is ordered: removals (back to front), insertions,
//! moves, then content changes. Each operation's indices refer to the
//! sequence as left by the operations before it, so replaying the script in
//! order on the old sequence yields the new one.
//!
//! [`MyersDiffer`] is the default. The longest common subsequence comes from
//! `similar`'s Myers implementation; entries outside it that share a key on
//! both sides are paired up into moves.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use similar::Algorithm;
use similar::DiffOp;

/// One operation of an edit script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditOp {
    Removed { position: usize, count: usize },
    Inserted { position: usize, count: usize },
    Moved { from: usize, to: usize },
    Changed { position: usize, count: usize },
}

pub trait Differ {
    /// Entries with equal `identity` keys are the same entry; `same_content`
    /// decides whether a matched pair also needs a change.
    fn diff<T, K, I, C>(&self, old: &[T], new: &[T], identity: I, same_content: C) -> Vec<EditOp>
    where
        K: Hash + Eq + Ord,
        I: Fn(&T) -> K,
        C: Fn(&T, &T) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MyersDiffer;

impl Differ for MyersDiffer {
    fn diff<T, K, I, C>(&self, old: &[T], new: &[T], identity: I, same_content: C) -> Vec<EditOp>
    where
        K: Hash + Eq + Ord,
        I: Fn(&T) -> K,
        C: Fn(&T, &T) -> bool,
    {
        let old_keys: Vec<K> = old.iter().map(&identity).collect();
        let new_keys: Vec<K> = new.iter().map(&identity).collect();

        let mut old_to_new: Vec<Option<usize>> = vec![None; old.len()];
        let mut new_to_old: Vec<Option<usize>> = vec![None; new.len()];
        for (i, j) in common_subsequence(&old_keys, &new_keys) {
            old_to_new[i] = Some(j);
            new_to_old[j] = Some(i);
        }
        let moved = pair_moves(&old_keys, &new_keys, &mut old_to_new, &mut new_to_old);

        let mut script = Vec::new();
        remove_unmatched(&old_to_new, &mut script);
        insert_and_move(&old_to_new, &new_to_old, &moved, &mut script);

        for j in 0..new.len() {
            if let Some(i) = new_to_old[j] {
                if !same_content(&old[i], &new[j]) {
                    push_changed(&mut script, j);
                }
            }
        }
        return script;
    }
}

/// Matched `(old, new)` index pairs of a longest common subsequence, in
/// ascending order.
pub fn common_subsequence<K: Hash + Eq + Ord>(old: &[K], new: &[K]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for op in similar::capture_diff_slices(Algorithm::Myers, old, new) {
        if let DiffOp::Equal { old_index, new_index, len } = op {
            pairs.extend((0..len).map(|k| (old_index + k, new_index + k)));
        }
    }
    return pairs;
}

/// Pair each unmatched old entry with the first unmatched new entry sharing
/// its key. Returns which new entries were paired this way.
fn pair_moves<K: Hash + Eq>(
    old_keys: &[K],
    new_keys: &[K],
    old_to_new: &mut [Option<usize>],
    new_to_old: &mut [Option<usize>],
) -> Vec<bool> {
    // Stacks hold ascending indices from the top.
    let mut waiting: FxHashMap<&K, Vec<usize>> = FxHashMap::default();
    for j in (0..new_keys.len()).rev() {
        if new_to_old[j].is_none() {
            waiting.entry(&new_keys[j]).or_default().push(j);
        }
    }

    let mut moved = vec![false; new_keys.len()];
    for i in 0..old_keys.len() {
        if old_to_new[i].is_some() {
            continue;
        }
        let Some(j) = waiting.get_mut(&old_keys[i]).and_then(|stack| stack.pop()) else {
            continue;
        };
        old_to_new[i] = Some(j);
        new_to_old[j] = Some(i);
        moved[j] = true;
    }
    return moved;
}

/// Emit removals for old entries without a partner, back to front.
fn remove_unmatched(old_to_new: &[Option<usize>], script: &mut Vec<EditOp>) {
    let mut i = old_to_new.len();
    while i > 0 {
        if old_to_new[i - 1].is_some() {
            i -= 1;
            continue;
        }
        let end = i;
        while i > 0 && old_to_new[i - 1].is_none() {
            i -= 1;
        }
        script.push(EditOp::Removed { position: i, count: end - i });
    }
}

/// Emit insertions, then moves.
///
/// Every position the working sequence can hold an entry at gets a slot on
/// one line, laid out up front: surviving old entries in old order, each
/// subsequence entry followed by the new entries (inserted or moved) that
/// come after it in new order up to the next subsequence entry. An entry's
/// index in the working sequence is then the number of occupied slots
/// before its own.
fn insert_and_move(
    old_to_new: &[Option<usize>],
    new_to_old: &[Option<usize>],
    moved: &[bool],
    script: &mut Vec<EditOp>,
) {
    let new_len = new_to_old.len();

    // groups[0] leads the line; groups[j + 1] follows subsequence entry `j`.
    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); new_len + 1];
    let mut anchor = 0;
    for j in 0..new_len {
        if new_to_old[j].is_some() && !moved[j] {
            anchor = j + 1;
        } else {
            groups[anchor].push(j);
        }
    }

    let mut new_slot = vec![0; new_len];
    let mut old_slot = vec![0; old_to_new.len()];
    let mut occupied = Vec::new();
    let mut slots = 0;
    for &j in &groups[0] {
        new_slot[j] = slots;
        slots += 1;
    }
    for i in 0..old_to_new.len() {
        let Some(j) = old_to_new[i] else {
            continue;
        };
        old_slot[i] = slots;
        occupied.push(slots);
        slots += 1;
        if !moved[j] {
            for &g in &groups[j + 1] {
                new_slot[g] = slots;
                slots += 1;
            }
        }
    }

    let mut line = SlotLine::new(slots);
    for slot in occupied {
        line.fill(slot);
    }

    for j in 0..new_len {
        if new_to_old[j].is_some() {
            continue;
        }
        let position = line.before(new_slot[j]);
        line.fill(new_slot[j]);

        match script.last_mut() {
            Some(EditOp::Inserted { position: start, count }) if *start + *count == position => {
                *count += 1;
            }
            _ => script.push(EditOp::Inserted { position, count: 1 }),
        }
    }

    for j in 0..new_len {
        if !moved[j] {
            continue;
        }
        let Some(i) = new_to_old[j] else {
            continue;
        };
        let from = line.before(old_slot[i]);
        line.clear(old_slot[i]);
        let to = line.before(new_slot[j]);
        line.fill(new_slot[j]);

        if from != to {
            script.push(EditOp::Moved { from, to });
        }
    }
}

fn push_changed(script: &mut Vec<EditOp>, position: usize) {
    if let Some(EditOp::Changed { position: start, count }) = script.last_mut() {
        if *start + *count == position {
            *count += 1;
            return;
        }
    }
    script.push(EditOp::Changed { position, count: 1 });
}

/// Occupancy of a fixed line of slots, with logarithmic prefix counts
/// (a Fenwick tree).
struct SlotLine {
    tree: Vec<usize>,
}

impl SlotLine {
    fn new(len: usize) -> SlotLine {
        return SlotLine { tree: vec![0; len + 1] };
    }

    fn fill(&mut self, slot: usize) {
        let mut i = slot + 1;
        while i < self.tree.len() {
            self.tree[i] += 1;
            i += i & i.wrapping_neg();
        }
    }

    fn clear(&mut self, slot: usize) {
        let mut i = slot + 1;
        while i < self.tree.len() {
            self.tree[i] -= 1;
            i += i & i.wrapping_neg();
        }
    }

    /// Occupied slots strictly before `slot`.
    fn before(&self, slot: usize) -> usize {
        let mut sum = 0;
        let mut i = slot;
        while i > 0 {
            sum += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        return sum;
    }
}
