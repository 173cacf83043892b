/*!
 * Ordering Engine
 * Stable merge sort over the ready queue, relinking in place
 */

use super::entry::ScheduleEntry;
use super::queue::ReadyQueue;
use serde::{Deserialize, Serialize};

/// Key a sort orders the queue by (ascending; smaller dispatches first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Priority,
    Size,
}

impl SortKey {
    fn of(&self, entry: &ScheduleEntry) -> i64 {
        match self {
            SortKey::Priority => entry.priority as i64,
            SortKey::Size => entry.size,
        }
    }
}

impl ReadyQueue {
    /// Stable merge sort by `key`, ascending. O(n log n) comparisons,
    /// in-place relinking, no entry moves in the arena.
    ///
    /// Panics on a circular queue: the midpoint walk would never terminate,
    /// so sorting one is a contract breach. Round-robin callers linearize
    /// first and re-circularize for their own use.
    pub fn sort_by(&mut self, key: SortKey) {
        assert!(!self.circular, "cannot sort a circular ready queue");

        let Some(head) = self.head else { return };
        let sorted = self.sort_chain(head, key);
        self.head = Some(sorted);
    }

    /// Sort one linear chain, returning its new head. Depth is bounded at
    /// O(log n): recursion only happens on halves.
    fn sort_chain(&mut self, head: usize, key: SortKey) -> usize {
        if self.entries[head].next.is_none() {
            return head;
        }

        let second = self.split(head);
        let a = self.sort_chain(head, key);
        let b = self.sort_chain(second, key);
        self.merge(a, b, key)
    }

    /// Divide a chain at its midpoint with the slow/fast walker; an odd
    /// length leaves the extra element in the first half. Returns the head
    /// of the second half, with the halves fully disconnected.
    fn split(&mut self, head: usize) -> usize {
        let mut slow = head;
        let mut fast = head;

        loop {
            let step1 = self.entries[fast].next;
            let step2 = step1.and_then(|i| self.entries[i].next);
            match step2 {
                Some(next_fast) => {
                    fast = next_fast;
                    slow = self.entries[slow].next.expect("slow trails fast");
                }
                None => break,
            }
        }

        let mid = self.entries[slow].next.expect("split needs two elements");
        self.entries[slow].next = None;
        self.entries[mid].prev = None;
        mid
    }

    /// Merge two sorted chains. Ties take from the first chain, which is
    /// what makes the sort stable.
    fn merge(&mut self, first: usize, second: usize, key: SortKey) -> usize {
        let mut a = Some(first);
        let mut b = Some(second);
        let mut head: Option<usize> = None;
        let mut tail: Option<usize> = None;

        loop {
            let picked = match (a, b) {
                (Some(x), Some(y)) => {
                    if key.of(&self.entries[x]) <= key.of(&self.entries[y]) {
                        a = self.entries[x].next;
                        x
                    } else {
                        b = self.entries[y].next;
                        y
                    }
                }
                // One chain drained: the rest is already sorted and linked,
                // append it wholesale.
                (rest, None) | (None, rest) => {
                    if let Some(idx) = rest {
                        self.entries[idx].prev = tail;
                        if let Some(t) = tail {
                            self.entries[t].next = Some(idx);
                        } else {
                            head = Some(idx);
                        }
                    }
                    break;
                }
            };

            self.entries[picked].prev = tail;
            self.entries[picked].next = None;
            if let Some(t) = tail {
                self.entries[t].next = Some(picked);
            } else {
                head = Some(picked);
            }
            tail = Some(picked);
        }

        head.expect("merge of non-empty chains has a head")
    }
}
