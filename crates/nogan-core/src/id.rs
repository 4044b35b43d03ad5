use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifies a nod within its owning phantom. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodId(pub u32);

/// Identifies a wire within its owning phantom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WireId(pub u32);

impl fmt::Display for NodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nod#{}", self.0)
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wire#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// IdAllocator
// ---------------------------------------------------------------------------

/// Per-phantom id pool. Nods and wires share it, so a raw id is unique across
/// both within one phantom.
///
/// Allocation always hands out the smallest id not currently in use: freed ids
/// are reused (smallest first) before the pool grows. Freed ids are kept as
/// merged ranges, so adopting a nod with a large id costs no more than a small
/// one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    /// One past the highest id ever handed out or reserved.
    next: u64,
    /// Freed ids below `next`, as disjoint inclusive ranges keyed by start.
    /// Adjacent ranges are always merged.
    free: BTreeMap<u32, u32>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id.
    ///
    /// # Panics
    ///
    /// Panics if every `u32` id is already in use.
    pub fn create_id(&mut self) -> u32 {
        if let Some((start, end)) = self.free.pop_first() {
            if start < end {
                self.free.insert(start + 1, end);
            }
            return start;
        }
        let id = u32::try_from(self.next).unwrap_or_else(|_| panic!("id pool exhausted"));
        self.next += 1;
        id
    }

    /// Return an id to the pool. Freeing an id that is already free, or that
    /// was never handed out, has no effect.
    pub fn free_id(&mut self, id: u32) {
        if u64::from(id) < self.next && !self.is_free(id) {
            self.insert_free(id, id);
        }
    }

    /// Mark a specific id as used, e.g. when a nod built elsewhere is adopted.
    pub fn reserve(&mut self, id: u32) {
        if u64::from(id) >= self.next {
            // `next <= id`, so it fits in a u32.
            let first = self.next as u32;
            if first < id {
                self.insert_free(first, id - 1);
            }
            self.next = u64::from(id) + 1;
            return;
        }
        if let Some((&start, &end)) = self.free.range(..=id).next_back()
            && end >= id
        {
            self.free.remove(&start);
            if start < id {
                self.free.insert(start, id - 1);
            }
            if id < end {
                self.free.insert(id + 1, end);
            }
        }
    }

    /// Whether `id` is currently handed out.
    pub fn is_allocated(&self, id: u32) -> bool {
        u64::from(id) < self.next && !self.is_free(id)
    }

    /// Ids currently sitting in the free list, ascending.
    pub fn free_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.free.iter().flat_map(|(&start, &end)| start..=end)
    }

    fn is_free(&self, id: u32) -> bool {
        self.free
            .range(..=id)
            .next_back()
            .is_some_and(|(_, &end)| end >= id)
    }

    /// Add `start..=end` (not currently free) to the free list, merging with
    /// the ranges on either side.
    fn insert_free(&mut self, mut start: u32, mut end: u32) {
        if let Some(after) = end.checked_add(1)
            && let Some(right_end) = self.free.remove(&after)
        {
            end = right_end;
        }
        if let Some((&left_start, &left_end)) = self.free.range(..start).next_back()
            && left_end.checked_add(1) == Some(start)
        {
            self.free.remove(&left_start);
            start = left_start;
        }
        self.free.insert(start, end);
    }
}
