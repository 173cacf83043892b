/*!
 * Ready Queue
 * Arena-backed doubly-linked queue of schedule entries
 */

use super::entry::ScheduleEntry;
use crate::core::Pcb;
use log::debug;

/// The ready queue: one entry per PCB, linked through arena indices.
///
/// Entries live in a `Vec` arena and link to each other by index, so the
/// circular round-robin ring never needs self-referential pointers. The
/// queue owns its entries for the whole run; they are released together.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    pub(super) entries: Vec<ScheduleEntry>,
    pub(super) head: Option<usize>,
    pub(super) circular: bool,
}

impl ReadyQueue {
    /// Build the queue from a PCB list, timestamping each entry's arrival.
    ///
    /// Entries are linked at the head as they are created, so iteration
    /// order is the REVERSE of the input order. Callers that care about
    /// dispatch order sort explicitly or reverse their input first.
    pub fn from_pcbs(pcbs: &[Pcb]) -> Self {
        let mut queue = Self::default();

        for pcb in pcbs {
            let idx = queue.entries.len();
            let mut entry = ScheduleEntry::new(pcb);

            entry.next = queue.head;
            if let Some(old_head) = queue.head {
                queue.entries[old_head].prev = Some(idx);
            }
            queue.entries.push(entry);
            queue.head = Some(idx);
        }

        debug!("Ready queue built with {} entries", queue.len());
        queue
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_circular(&self) -> bool {
        self.circular
    }

    /// Index of the queue head, if any.
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    pub fn entry(&self, idx: usize) -> &ScheduleEntry {
        &self.entries[idx]
    }

    pub fn entry_mut(&mut self, idx: usize) -> &mut ScheduleEntry {
        &mut self.entries[idx]
    }

    /// Successor link of an entry (wraps on a circular queue).
    pub fn next_of(&self, idx: usize) -> Option<usize> {
        self.entries[idx].next
    }

    /// Predecessor link of an entry.
    pub fn prev_of(&self, idx: usize) -> Option<usize> {
        self.entries[idx].prev
    }

    /// Entry indices in queue order, bounded by the entry count so the walk
    /// is safe on a circular queue.
    pub fn order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.len());
        let mut cursor = self.head;

        while let Some(idx) = cursor {
            if order.len() == self.entries.len() {
                break;
            }
            order.push(idx);
            cursor = self.entries[idx].next;
        }

        order
    }

    fn tail_of_linear(&self) -> Option<usize> {
        let mut cursor = self.head?;
        while let Some(next) = self.entries[cursor].next {
            cursor = next;
        }
        Some(cursor)
    }

    /// Connect tail to head, forming the round-robin ring.
    ///
    /// Panics if the queue is already circular or empty: both are contract
    /// breaches in the caller, not runtime conditions.
    pub fn circularize(&mut self) {
        assert!(
            !self.circular,
            "ready queue is already circular; linearize it first"
        );
        let head = self.head.expect("cannot circularize an empty ready queue");
        let tail = self.tail_of_linear().expect("non-empty queue has a tail");

        self.entries[tail].next = Some(head);
        self.entries[head].prev = Some(tail);
        self.circular = true;
    }

    /// Break the ring back into a linear list.
    pub fn linearize(&mut self) {
        assert!(self.circular, "ready queue is not circular");
        let head = self.head.expect("circular queue has a head");
        let tail = self.entries[head].prev.expect("circular head has a prev");

        self.entries[tail].next = None;
        self.entries[head].prev = None;
        self.circular = false;
    }

    /// Release every entry, checking the walk against `expected` first.
    ///
    /// A circular queue has no terminator, so the caller must pass the entry
    /// count recorded at construction; the walk doubles as a structural
    /// self-check. Panics when the count does not cover the queue exactly
    /// once, or when the walk would pass the original head a second time.
    pub fn release(self, expected: usize) {
        assert_eq!(
            expected,
            self.entries.len(),
            "release count {} does not match the {} entries built",
            expected,
            self.entries.len()
        );

        let mut visited = 0usize;
        let mut cursor = self.head;
        while visited < expected {
            let idx = cursor.expect("release walked off the tail before the expected count");
            visited += 1;
            cursor = self.entries[idx].next;

            if visited < expected && cursor == self.head {
                panic!("release would traverse past the original head a second time");
            }
        }

        if let Some(idx) = cursor {
            assert!(
                Some(idx) == self.head,
                "release finished mid-queue; count does not cover the ring"
            );
        }

        debug!("Ready queue released ({} entries)", visited);
        // Arena (and the entries with it) dropped here.
    }
}
