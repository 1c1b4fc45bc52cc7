// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Position-translation vectors.
//!
//! Three arrays derived from the overlay positions alone, recomputed only
//! when the overlay set changes, that turn merged/child index conversion
//! into a single array lookup.
//!
//! For a merged sequence shaped like this:
//!
//! ```text
//! 0  child
//! 1  child
//! 2  injected
//! 3  injected
//! 4  child
//! 5  injected
//! 6  child
//! ```
//!
//! the vectors are:
//!
//! ```text
//! count_before   [0, 0, 2, 2, 2, 3]
//! child_offset   [0, 0, 2, 3]
//! count_up_to    [0, 0, 1, 2, 2, 3]
//! ```
//!
//! All vectors are trimmed: a lookup past the last element yields the last
//! element, since the offset is constant beyond the last overlay. With no
//! overlays every vector is `[0]`.

use crate::overlay::OverlaySet;

/// Number of overlays before each position. Inside a run of consecutive
/// overlays every slot holds the count including the whole run. Only ever
/// consulted at positions that are not occupied by an overlay.
pub fn count_before<F>(max_position: Option<usize>, is_injected: F) -> Vec<usize>
where
    F: Fn(usize) -> bool,
{
    let Some(max) = max_position else {
        return vec![0];
    };

    let mut vector = vec![0; max + 1];
    let mut index = 0;
    let mut previous = 0;
    while index < vector.len() {
        if !is_injected(index) {
            vector[index] = previous;
            index += 1;
            continue;
        }

        let mut run = 0;
        while is_injected(index + run) {
            run += 1;
        }
        previous += run;
        let end = (index + run).min(vector.len());
        for slot in &mut vector[index..end] {
            *slot = previous;
        }
        index += run;
    }
    return vector;
}

/// Offset from the c-th child entry to its merged position.
pub fn child_offset<F>(max_position: Option<usize>, is_injected: F) -> Vec<usize>
where
    F: Fn(usize) -> bool,
{
    let Some(max) = max_position else {
        return vec![0];
    };

    let injected = (0..=max).filter(|&p| is_injected(p)).count();
    let size = max + 2 - injected;
    let mut vector = Vec::with_capacity(size);
    let mut accumulator = 0;
    let mut position = 0;
    while vector.len() < size {
        if is_injected(position) {
            accumulator += 1;
        } else {
            vector.push(accumulator);
        }
        position += 1;
    }
    return vector;
}

/// Number of overlays at positions `<= p`.
pub fn count_up_to<F>(max_position: Option<usize>, is_injected: F) -> Vec<usize>
where
    F: Fn(usize) -> bool,
{
    let Some(max) = max_position else {
        return vec![0];
    };

    let mut vector = Vec::with_capacity(max + 1);
    let mut previous = 0;
    for position in 0..=max {
        if is_injected(position) {
            previous += 1;
        }
        vector.push(previous);
    }
    return vector;
}

/// Lookup with the trimming rule.
pub fn trimmed(vector: &[usize], index: usize) -> usize {
    return match vector.get(index) {
        Some(value) => *value,
        None => vector.last().copied().unwrap_or(0),
    };
}

/// The three vectors for one overlay set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationVectors {
    count_before: Vec<usize>,
    child_offset: Vec<usize>,
    count_up_to: Vec<usize>,
}

impl TranslationVectors {
    /// Vectors for an empty overlay set.
    pub fn new() -> TranslationVectors {
        return TranslationVectors {
            count_before: vec![0],
            child_offset: vec![0],
            count_up_to: vec![0],
        };
    }

    pub fn compute<C>(overlays: &OverlaySet<C>) -> TranslationVectors {
        let max = overlays.max_position();
        let is_injected = |p| overlays.contains(p);
        return TranslationVectors {
            count_before: count_before(max, is_injected),
            child_offset: child_offset(max, is_injected),
            count_up_to: count_up_to(max, is_injected),
        };
    }

    /// Merged position to child position. Unspecified for positions holding
    /// an injected entry.
    pub fn to_child(&self, merged: usize) -> usize {
        return merged.saturating_sub(trimmed(&self.count_before, merged));
    }

    /// Child position to merged position.
    pub fn from_child(&self, child: usize) -> usize {
        return child + trimmed(&self.child_offset, child);
    }

    /// Number of overlays at positions `<= position`.
    pub fn injected_up_to(&self, position: usize) -> usize {
        return trimmed(&self.count_up_to, position);
    }

    pub fn count_before(&self) -> &[usize] {
        return &self.count_before;
    }

    pub fn child_offset(&self) -> &[usize] {
        return &self.child_offset;
    }

    pub fn count_up_to(&self) -> &[usize] {
        return &self.count_up_to;
    }
}

impl Default for TranslationVectors {
    fn default() -> Self {
        return Self::new();
    }
}
