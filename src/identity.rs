// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Identities of child entries.
//!
//! A child sequence with durable identities is read directly. Otherwise an
//! identity list is synthesized, index-aligned with the child sequence and
//! patched in lock-step with every structural event.
//!
//! Synthesized numbering follows a fixed rule: a reload yields `0..len`,
//! and each inserted item gets `list size + 1` at the moment it is inserted.
//! That rule can hand out a value that is still in use after an earlier
//! removal, and the differ then sees two entries with the same identity.
//! Known weakness, kept because callers observe the exact numbers.

use crate::child::ChildSequence;
use crate::entry::Identity;
use crate::entry::NO_IDENTITY;
use crate::error::InjectorError;
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identities {
    /// Read through the child sequence.
    Durable,
    /// One synthesized identity per child item.
    Synthesized(Vec<Identity>),
}

impl Identities {
    pub fn new(durable: bool, len: usize) -> Identities {
        if durable {
            return Identities::Durable;
        }
        return Identities::Synthesized(fresh(len));
    }

    pub fn is_durable(&self) -> bool {
        return matches!(self, Identities::Durable);
    }

    /// Identity of the child at `index`.
    pub fn identity_at<S: ChildSequence + ?Sized>(&self, child: &S, index: usize) -> Identity {
        return match self {
            Identities::Durable => child.identity_at(index),
            Identities::Synthesized(ids) => ids.get(index).copied().unwrap_or(NO_IDENTITY),
        };
    }

    /// The synthesized list, if any.
    pub fn synthesized(&self) -> Option<&[Identity]> {
        return match self {
            Identities::Durable => None,
            Identities::Synthesized(ids) => Some(ids),
        };
    }

    /// Full reload: renumber `0..len`.
    pub fn reset(&mut self, len: usize) {
        if let Identities::Synthesized(ids) = self {
            *ids = fresh(len);
        }
    }

    /// `count` items were inserted at `start`; the child now has `child_len`.
    pub fn insert_range(&mut self, start: usize, count: usize, child_len: usize) -> Result<()> {
        let Identities::Synthesized(ids) = self else {
            return Ok(());
        };
        let len = ids.len();
        if start > len {
            return Err(InjectorError::RangeOutOfBounds { start, end: start, len });
        }
        let Some(grown) = len.checked_add(count) else {
            return Err(InjectorError::RangeOutOfBounds { start, end: usize::MAX, len });
        };
        expect_len(grown, child_len)?;

        // Inserting one at a time at `start`, each valued `size + 1`, leaves
        // the batch in descending order.
        ids.splice(start..start, (1..=count).rev().map(|k| (len + k) as Identity));
        return Ok(());
    }

    /// `count` items were removed at `start`; the child now has `child_len`.
    pub fn remove_range(&mut self, start: usize, count: usize, child_len: usize) -> Result<()> {
        let Identities::Synthesized(ids) = self else {
            return Ok(());
        };
        let len = ids.len();
        let end = match start.checked_add(count) {
            Some(end) if end <= len => end,
            Some(end) => return Err(InjectorError::RangeOutOfBounds { start, end, len }),
            None => return Err(InjectorError::RangeOutOfBounds { start, end: usize::MAX, len }),
        };
        expect_len(len - count, child_len)?;

        ids.drain(start..end);
        return Ok(());
    }

    /// One item moved from `from` to `to`. Multi-item moves are rejected.
    pub fn move_item(&mut self, from: usize, to: usize, count: usize, child_len: usize) -> Result<()> {
        let Identities::Synthesized(ids) = self else {
            return Ok(());
        };
        if count > 1 {
            return Err(InjectorError::MultiItemMove { count });
        }
        let len = ids.len();
        let furthest = from.max(to);
        if count == 1 && furthest >= len {
            return Err(InjectorError::RangeOutOfBounds { start: furthest, end: furthest + 1, len });
        }
        expect_len(len, child_len)?;

        if count == 1 {
            let id = ids.remove(from);
            ids.insert(to, id);
        }
        return Ok(());
    }
}

fn fresh(len: usize) -> Vec<Identity> {
    return (0..len).map(|i| i as Identity).collect();
}

fn expect_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(InjectorError::LengthMismatch { expected, actual });
    }
    return Ok(());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(identities: &Identities) -> Vec<Identity> {
        return identities.synthesized().unwrap().to_vec();
    }

    #[test]
    fn reset_numbers_from_zero() {
        let mut identities = Identities::new(false, 3);
        assert_eq!(ids(&identities), vec![0, 1, 2]);
        identities.reset(5);
        assert_eq!(ids(&identities), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn inserted_items_take_size_plus_one() {
        let mut identities = Identities::new(false, 3);
        identities.insert_range(1, 2, 5).unwrap();
        assert_eq!(ids(&identities), vec![0, 5, 4, 1, 2]);
    }

    #[test]
    fn insert_after_remove_can_repeat_an_identity() {
        let mut identities = Identities::new(false, 3);
        identities.insert_range(3, 1, 4).unwrap();
        assert_eq!(ids(&identities), vec![0, 1, 2, 4]);
        identities.remove_range(0, 1, 3).unwrap();
        identities.insert_range(0, 1, 4).unwrap();
        assert_eq!(ids(&identities), vec![4, 1, 2, 4]);
    }

    #[test]
    fn remove_and_move() {
        let mut identities = Identities::new(false, 5);
        identities.remove_range(1, 2, 3).unwrap();
        assert_eq!(ids(&identities), vec![0, 3, 4]);
        identities.move_item(0, 2, 1, 3).unwrap();
        assert_eq!(ids(&identities), vec![3, 4, 0]);
    }

    #[test]
    fn multi_item_move_is_rejected_without_mutation() {
        let mut identities = Identities::new(false, 4);
        let err = identities.move_item(0, 2, 2, 4).unwrap_err();
        assert_eq!(err, InjectorError::MultiItemMove { count: 2 });
        assert_eq!(ids(&identities), vec![0, 1, 2, 3]);
    }

    #[test]
    fn out_of_bounds_ranges_are_rejected() {
        let mut identities = Identities::new(false, 2);
        assert!(matches!(identities.remove_range(1, 2, 0), Err(InjectorError::RangeOutOfBounds { .. })));
        assert!(matches!(identities.insert_range(3, 1, 3), Err(InjectorError::RangeOutOfBounds { .. })));
        assert!(matches!(identities.move_item(0, 2, 1, 2), Err(InjectorError::RangeOutOfBounds { .. })));
        assert_eq!(ids(&identities), vec![0, 1]);
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        let mut identities = Identities::new(false, 3);
        let err = identities.remove_range(2, usize::MAX, 0).unwrap_err();
        assert_eq!(err, InjectorError::RangeOutOfBounds { start: 2, end: usize::MAX, len: 3 });
        let err = identities.insert_range(1, usize::MAX, 0).unwrap_err();
        assert_eq!(err, InjectorError::RangeOutOfBounds { start: 1, end: usize::MAX, len: 3 });
        assert_eq!(ids(&identities), vec![0, 1, 2]);
    }

    #[test]
    fn length_must_follow_the_event() {
        let mut identities = Identities::new(false, 2);
        let err = identities.insert_range(0, 1, 2).unwrap_err();
        assert_eq!(err, InjectorError::LengthMismatch { expected: 3, actual: 2 });
    }

    #[test]
    fn durable_identities_ignore_structure() {
        let mut identities = Identities::new(true, 4);
        assert!(identities.is_durable());
        identities.move_item(0, 3, 7, 4).unwrap();
        identities.remove_range(10, 10, 0).unwrap();
        assert!(identities.synthesized().is_none());
    }
}
