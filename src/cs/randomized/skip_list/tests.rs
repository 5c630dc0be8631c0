use std::collections::HashMap;
use std::fmt::Debug;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::node::{Node, NodeId};
use super::{SkipList, SkipListBuilder};
use crate::error::Error;

fn seeded<T>(seed: u64) -> SkipList<T> {
    SkipListBuilder::new().seed(seed).build().unwrap()
}

fn collect<T: Clone>(list: &SkipList<T>) -> Vec<T> {
    list.iter().cloned().collect()
}

/// Checks every structural invariant from scratch, without trusting the
/// stored indices or skips.
fn assert_consistent<T: Ord + Debug>(list: &SkipList<T>) {
    let heads = list.head_ids();
    assert_eq!(heads.len(), list.level_count());
    if heads.is_empty() {
        assert_eq!(list.len(), 0);
        return;
    }

    // Bottom-level positions counted by walking: head 0, elements 1..=n, tail n + 1.
    let bottom = *heads.last().unwrap();
    let mut position = HashMap::new();
    let mut cur = bottom;
    let mut rank = 0;
    loop {
        position.insert(cur, rank);
        match list.arena[cur].link() {
            Some(next) => {
                cur = next;
                rank += 1;
            }
            None => break,
        }
    }
    assert_eq!(rank, list.len() + 1, "bottom level holds every element");

    let bottom_of = |id: NodeId| {
        let mut cur = id;
        while let Some(below) = list.arena[cur].down() {
            cur = below;
        }
        cur
    };

    let mut counts_above: Option<Vec<&T>> = None;
    for (depth, &head) in heads.iter().enumerate() {
        let is_bottom = depth + 1 == heads.len();
        let below_head = heads.get(depth + 1).copied();
        assert_eq!(list.arena[head].kind_name(), "head");
        assert_eq!(list.arena[head].down(), below_head);

        let mut values = Vec::new();
        let mut cur = head;
        while let Some(next) = list.arena[cur].link() {
            let node = &list.arena[cur];
            let expected = position[&bottom_of(next)] - position[&bottom_of(cur)];
            assert!(node.skip() >= 1);
            assert_eq!(node.skip(), expected, "skip at level {}", depth);

            let succ = &list.arena[next];
            match succ {
                Node::Element { value, down, index, .. } => {
                    if let Some(prev) = values.last() {
                        assert!(*prev <= value, "level {} out of order", depth);
                    }
                    values.push(value);
                    if is_bottom {
                        assert!(down.is_none());
                        assert_eq!(*index, Some(position[&next] - 1));
                    } else {
                        let below = down.expect("upper element has a down link");
                        assert_eq!(list.arena[below].value(), Some(value));
                        assert!(index.is_none());
                    }
                }
                Node::Tail { down, index } => {
                    if is_bottom {
                        assert!(down.is_none());
                        assert_eq!(*index, Some(list.len()));
                    } else {
                        let below = down.expect("upper tail has a down link");
                        assert!(list.arena[below].is_tail());
                    }
                }
                Node::Head { .. } => panic!("head sentinel inside a level"),
            }
            cur = next;
        }
        assert!(list.arena[cur].is_tail(), "level {} ends in a tail", depth);

        // Towers are contiguous: every level is a sub-multiset of the next one down.
        if let Some(above) = counts_above.take() {
            let mut pool = values.clone();
            for v in above {
                let at = pool
                    .iter()
                    .position(|x| *x == v)
                    .expect("value above is missing below");
                pool.remove(at);
            }
        }
        counts_above = Some(values);
    }
}

impl<T> Node<T> {
    fn kind_name(&self) -> &'static str {
        match self {
            Node::Head { .. } => "head",
            Node::Element { .. } => "element",
            Node::Tail { .. } => "tail",
        }
    }
}

#[test]
fn test_new_list_is_empty() {
    let list: SkipList<i32> = SkipList::new();
    assert_eq!(list.len(), 0);
    assert!(list.is_empty());
    assert_eq!(list.level_count(), 0);
    assert_eq!(list.get_at(0), None);
    assert_eq!(list.to_string(), "");
    assert_consistent(&list);
}

#[test]
fn test_round_trip_with_duplicates() {
    let mut list = seeded(1);
    for v in [5, 3, 3, 1, 4] {
        list.insert(v);
        assert_consistent(&list);
    }
    assert_eq!(collect(&list), vec![1, 3, 3, 4, 5]);
    assert_eq!(list.len(), 5);
    assert!(list.contains(&3));

    assert!(list.remove(&3));
    assert_consistent(&list);
    assert!(list.contains(&3));
    assert_eq!(list.count(&3), 1);

    assert!(list.remove(&3));
    assert_consistent(&list);
    assert!(!list.contains(&3));
    assert_eq!(collect(&list), vec![1, 4, 5]);
}

#[test]
fn test_remove_absent_is_noop() {
    let mut list = seeded(2);
    list.extend([2, 4, 6]);
    let before = list.to_string();
    assert!(!list.remove(&5));
    assert_eq!(list.len(), 3);
    assert_eq!(list.to_string(), before);

    let mut empty: SkipList<i32> = seeded(3);
    assert!(!empty.remove(&1));
    assert_eq!(empty.len(), 0);
}

#[test]
fn test_levels_never_shrink() {
    let mut list = seeded(4);
    list.extend(0..100);
    let height = list.level_count();
    for v in 0..100 {
        assert!(list.remove(&v));
    }
    assert!(list.is_empty());
    assert_eq!(list.level_count(), height);
    assert!(list.levels().all(|level| level.is_empty()));
    assert_consistent(&list);

    list.insert(7);
    assert!(list.level_count() >= height);
    assert_eq!(collect(&list), vec![7]);
    assert_consistent(&list);
}

#[test]
fn test_tall_tower_grows_levels() {
    let mut list = SkipListBuilder::new()
        .seed(5)
        .probability(0.9)
        .build()
        .unwrap();
    list.insert(1);
    let first = list.level_count();
    for v in 2..40 {
        list.insert(v);
        assert_consistent(&list);
    }
    assert!(list.level_count() >= first);
    assert!(list.level_count() > 1);
}

#[test]
fn test_max_level_one_is_a_plain_list() {
    let mut list = SkipListBuilder::new().seed(6).max_level(1).build().unwrap();
    list.extend([5, 3, 1, 4]);
    assert_eq!(list.level_count(), 1);
    assert_eq!(list.to_string(), " -> 1 -> 3 -> 4 -> 5 -> ");
}

#[test]
fn test_display_aligns_levels_by_position() {
    let mut list = seeded(7);
    list.extend([8, 1, 6, 3, 9, 2, 7, 5, 4, 0]);
    let rendered = list.to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), list.level_count());

    let bottom = *lines.last().unwrap();
    assert_eq!(bottom, " -> 0 -> 1 -> 2 -> 3 -> 4 -> 5 -> 6 -> 7 -> 8 -> 9 -> ");
    for line in &lines {
        assert_eq!(line.len(), bottom.len());
        for (col, ch) in line.char_indices().filter(|(_, c)| c.is_ascii_digit()) {
            assert_eq!(bottom.as_bytes()[col] as char, ch);
        }
    }
}

#[test]
fn test_debug_lists_values() {
    let mut list = seeded(8);
    list.extend([3, 1, 2]);
    assert_eq!(format!("{:?}", list), "[1, 2, 3]");
}

#[test]
fn test_extend_matches_repeated_insert() {
    let values = [12, 7, 7, 3, 19, 0, 7, 15, 3];
    let mut one_by_one = seeded(9);
    for v in values {
        one_by_one.insert(v);
    }
    let mut batched = seeded(9);
    batched.extend(values);
    assert_consistent(&batched);
    assert_eq!(batched.to_string(), one_by_one.to_string());
    assert_eq!(collect(&batched), collect(&one_by_one));
}

#[test]
fn test_from_iterator() {
    let list: SkipList<&str> = ["pear", "apple", "fig", "apple"].into_iter().collect();
    assert_eq!(collect(&list), vec!["apple", "apple", "fig", "pear"]);
    assert_consistent(&list);
}

#[test]
fn test_clone_is_independent() {
    let mut list = seeded(10);
    list.extend([1, 2, 3]);
    let snapshot = list.clone();
    list.remove(&2);
    list.insert(9);
    assert_eq!(collect(&snapshot), vec![1, 2, 3]);
    assert_eq!(collect(&list), vec![1, 3, 9]);
    assert_consistent(&snapshot);
}

#[test]
fn test_clear_releases_every_node() {
    let mut list = seeded(11);
    list.extend(0..50);
    list.clear();
    assert!(list.is_empty());
    assert_eq!(list.level_count(), 0);
    assert_eq!(list.arena.live(), 0);
    assert!(!list.contains(&10));
    list.insert(10);
    assert!(list.contains(&10));
    assert_consistent(&list);
}

#[test]
fn test_removed_nodes_are_recycled() {
    let mut list = seeded(12);
    list.extend(0..30);
    assert!(list.arena.live() >= 30 + 2 * list.level_count());
    for v in 0..30 {
        list.remove(&v);
    }
    // Only the sentinels of the surviving levels remain.
    assert_eq!(list.arena.live(), 2 * list.level_count());
}

#[test]
fn test_builder_rejects_bad_config() {
    let bad_p = SkipListBuilder::new().probability(1.0).build::<i32>();
    assert!(matches!(bad_p, Err(Error::InvalidProbability(p)) if p == 1.0));
    let zero_p = SkipListBuilder::new().probability(0.0).build::<i32>();
    assert!(matches!(zero_p, Err(Error::InvalidProbability(_))));
    let nan_p = SkipListBuilder::new().probability(f64::NAN).build::<i32>();
    assert!(matches!(nan_p, Err(Error::InvalidProbability(_))));
    let zero_cap = SkipListBuilder::new().max_level(0).build::<i32>();
    assert_eq!(zero_cap.err(), Some(Error::InvalidMaxLevel));

    let list = SkipListBuilder::new()
        .probability(0.25)
        .max_level(8)
        .build::<i32>()
        .unwrap();
    assert_eq!(list.probability(), 0.25);
    assert_eq!(list.max_level(), Some(8));
}

#[test]
fn test_get_at_outside_range() {
    let mut list = seeded(13);
    list.extend([4, 2]);
    assert_eq!(list.get_at(0), Some(&2));
    assert_eq!(list.get_at(1), Some(&4));
    assert_eq!(list.get_at(2), None);
    assert_eq!(
        list.try_get_at(5),
        Err(Error::IndexOutOfRange { index: 5, len: 2 })
    );
}

#[test]
fn test_stress_insert_then_remove_all() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut list = seeded(14);
    let mut values: Vec<u32> = (0..10_000).map(|_| rng.gen_range(0..5_000)).collect();
    for &v in &values {
        list.insert(v);
    }
    assert_eq!(list.len(), values.len());
    assert_consistent(&list);

    let mut sorted = values.clone();
    sorted.sort();
    assert_eq!(collect(&list), sorted);
    for i in (0..sorted.len()).step_by(97) {
        assert_eq!(list.get_at(i), Some(&sorted[i]));
    }

    values.shuffle(&mut rng);
    for v in &values {
        assert!(list.remove(v));
    }
    assert_eq!(list.len(), 0);
    assert_eq!(list.iter().next(), None);
    assert_consistent(&list);
}

proptest! {
    #[test]
    fn prop_matches_sorted_model(
        ops in prop::collection::vec((any::<bool>(), 0i32..16), 0..60),
        seed in any::<u64>(),
    ) {
        let mut list = seeded(seed);
        let mut model: Vec<i32> = Vec::new();
        for (is_insert, v) in ops {
            if is_insert {
                list.insert(v);
                let at = model.partition_point(|x| *x < v);
                model.insert(at, v);
            } else {
                let removed = list.remove(&v);
                match model.iter().position(|x| *x == v) {
                    Some(at) => {
                        model.remove(at);
                        prop_assert!(removed);
                    }
                    None => prop_assert!(!removed),
                }
            }
            assert_consistent(&list);
            prop_assert_eq!(list.len(), model.len());
        }

        prop_assert_eq!(collect(&list), model.clone());
        for (i, v) in model.iter().enumerate() {
            prop_assert_eq!(list.get_at(i), Some(v));
        }
        prop_assert_eq!(list.get_at(model.len()), None);
        for v in -1..17 {
            prop_assert_eq!(list.contains(&v), model.contains(&v));
            prop_assert_eq!(list.count(&v), model.iter().filter(|x| **x == v).count());
        }
    }

    #[test]
    fn prop_last_occurrence_controls_membership(v in 0u8..10, copies in 1usize..6, seed in any::<u64>()) {
        let mut list = seeded(seed);
        list.extend([0u8, 5, 9]);
        for _ in 0..copies {
            list.insert(v);
        }
        let base = [0u8, 5, 9].iter().filter(|x| **x == v).count();
        for left in (0..copies + base).rev() {
            prop_assert!(list.remove(&v));
            prop_assert_eq!(list.contains(&v), left > 0);
            prop_assert_eq!(list.count(&v), left);
        }
    }
}
