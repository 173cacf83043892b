/*!
 * Ready Queue Tests
 * Structure and ordering properties, including randomized sort checks
 */

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sched_sim::{Pcb, ReadyQueue, SortKey};

fn queue_from_keys(keys: &[(i32, i64)]) -> ReadyQueue {
    // Reverse so queue iteration order matches `keys` order.
    let pcbs: Vec<Pcb> = keys
        .iter()
        .enumerate()
        .rev()
        .map(|(i, &(priority, size))| Pcb::new(i as u32 + 1, format!("./job{}", i), priority, size))
        .collect();
    ReadyQueue::from_pcbs(&pcbs)
}

fn pids_in_order(queue: &ReadyQueue) -> Vec<u32> {
    queue.order().iter().map(|&i| queue.entry(i).pid).collect()
}

#[test]
fn test_construction_is_reverse_of_input() {
    let pcbs: Vec<Pcb> = (1..=4).map(|i| Pcb::new(i, format!("./{}", i), 0, 0)).collect();
    let queue = ReadyQueue::from_pcbs(&pcbs);
    assert_eq!(pids_in_order(&queue), vec![4, 3, 2, 1]);
}

#[test]
fn test_spec_stability_vector() {
    // Arrivals A,B,C,D with priorities [3,1,3,2] sort to [B,D,A,C].
    let queue_keys = [(3, 0), (1, 0), (3, 0), (2, 0)];
    let mut queue = queue_from_keys(&queue_keys);
    queue.sort_by(SortKey::Priority);
    assert_eq!(pids_in_order(&queue), vec![2, 4, 1, 3]);
}

#[test]
fn test_circular_release_exact_walk() {
    let mut queue = queue_from_keys(&[(1, 0), (2, 0), (3, 0)]);
    queue.circularize();
    queue.release(3);
}

proptest! {
    #[test]
    fn prop_sort_matches_stable_oracle(keys in prop::collection::vec((0i32..4, 0i64..4), 1..32)) {
        let mut queue = queue_from_keys(&keys);

        // Snapshot queue order before sorting, then sort the snapshot with
        // the standard library's stable sort as the oracle.
        let before: Vec<(u32, i32)> = queue
            .order()
            .iter()
            .map(|&i| (queue.entry(i).pid, queue.entry(i).priority))
            .collect();
        let mut expected = before.clone();
        expected.sort_by_key(|&(_, priority)| priority);

        queue.sort_by(SortKey::Priority);
        let got: Vec<(u32, i32)> = queue
            .order()
            .iter()
            .map(|&i| (queue.entry(i).pid, queue.entry(i).priority))
            .collect();

        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_sort_by_size_is_idempotent(keys in prop::collection::vec((0i32..4, 0i64..6), 1..32)) {
        let mut queue = queue_from_keys(&keys);

        queue.sort_by(SortKey::Size);
        let once = pids_in_order(&queue);
        queue.sort_by(SortKey::Size);

        prop_assert_eq!(pids_in_order(&queue), once);
    }

    #[test]
    fn prop_circular_release_any_size(n in 1usize..24) {
        let keys: Vec<(i32, i64)> = (0..n).map(|i| (i as i32, i as i64)).collect();
        let mut queue = queue_from_keys(&keys);
        queue.circularize();
        queue.release(n);
    }

    #[test]
    fn prop_sort_preserves_link_symmetry(keys in prop::collection::vec((0i32..4, 0i64..4), 2..24)) {
        let mut queue = queue_from_keys(&keys);
        queue.sort_by(SortKey::Priority);

        let order = queue.order();
        prop_assert_eq!(order.len(), keys.len());
        for pair in order.windows(2) {
            prop_assert_eq!(queue.next_of(pair[0]), Some(pair[1]));
            prop_assert_eq!(queue.prev_of(pair[1]), Some(pair[0]));
        }
    }
}
