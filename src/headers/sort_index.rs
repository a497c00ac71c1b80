use super::list::HeaderList;
use crate::header::cmp_ignore_ascii_case;
use std::cmp::Ordering;
use tracing::trace;

/// Positions into a [`HeaderList`], stably sorted by case-insensitive name
/// ascending, ties keeping insertion order.
///
/// Empty-while-the-list-is-not means stale; [`ensure_fresh`](Self::ensure_fresh)
/// rebuilds on the first read that needs ordering.
#[derive(Debug, Default)]
pub(crate) struct SortIndex {
    pos: Vec<usize>,
}

impl SortIndex {
    #[inline]
    pub fn len(&self) -> usize {
        self.pos.len()
    }

    /// The list position stored at sorted position `sorted`.
    #[inline]
    pub fn at(&self, sorted: usize) -> usize {
        self.pos[sorted]
    }

    /// Marks the index stale after a structural list change.
    #[inline]
    pub fn invalidate(&mut self) {
        self.pos.clear();
    }

    pub fn ensure_fresh(&mut self, list: &HeaderList) {
        if !self.pos.is_empty() || list.is_empty() {
            debug_assert_eq!(self.pos.len(), list.len());
            return;
        }

        trace!(entries = list.len(), "rebuilding sort index");
        self.pos.extend(0..list.len());
        // sort_by is stable: same-named entries keep insertion order
        self.pos.sort_by(|&a, &b| {
            cmp_ignore_ascii_case(list.name_at(a).as_bytes(), list.name_at(b).as_bytes())
        });
    }

    /// First sorted position whose name compares equal to `name`, if any.
    /// The index must be fresh.
    pub fn lookup(&self, list: &HeaderList, name: &str) -> Option<usize> {
        let first = self.pos.partition_point(|&idx| {
            cmp_ignore_ascii_case(list.name_at(idx).as_bytes(), name.as_bytes())
                == Ordering::Less
        });
        if first < self.pos.len() && self.name_matches(list, first, name) {
            Some(first)
        } else {
            None
        }
    }

    #[inline]
    pub fn name_matches(&self, list: &HeaderList, sorted: usize, name: &str) -> bool {
        sorted < self.pos.len()
            && cmp_ignore_ascii_case(list.name_at(self.pos[sorted]).as_bytes(), name.as_bytes())
                == Ordering::Equal
    }

    /// Removes the entry at sorted position `sorted` from both the index
    /// and the list, keeping the two consistent.
    pub fn remove_at(&mut self, list: &mut HeaderList, sorted: usize) -> crate::header::Header {
        let idx = self.pos.remove(sorted);
        let entry = list.remove(idx);
        for pos in self.pos.iter_mut() {
            if *pos > idx {
                *pos -= 1;
            }
        }
        entry
    }
}
