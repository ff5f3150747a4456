#![cfg(test)]

// Property tests for DoublyLinkedMap that also check internal consistency
// between the hash index and the sequence after every step.

use crate::DoublyLinkedMap;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    PutBack(usize, i32),
    PutFront(usize, i32),
    Remove(usize),
    Get(usize),
    Mutate(usize, i32),
    PopFront,
    PopBack,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::hash_set("[a-z]{0,4}", 1..=8).prop_flat_map(|pool| {
        let pool: Vec<String> = pool.into_iter().collect();
        let idx = 0..pool.len();
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::PutBack(i, v)),
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::PutFront(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Get),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::PopFront),
            1 => Just(OpI::PopBack),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Model: entries in placement order. Linear scans are fine at this size.
fn position(model: &[(Key, i32)], k: &Key) -> Option<usize> {
    model.iter().position(|(mk, _)| mk == k)
}

fn run<S: BuildHasher>(
    mut sut: DoublyLinkedMap<Key, i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: Vec<(Key, i32)> = Vec::new();

    for op in ops {
        match op {
            OpI::PutBack(i, v) | OpI::PutFront(i, v) => {
                let k = Key(pool[i].clone());
                let prev = position(&model, &k).map(|at| model.remove(at).1);
                let got = match op {
                    OpI::PutBack(..) => {
                        model.push((k.clone(), v));
                        sut.put_back(k, v)
                    }
                    _ => {
                        model.insert(0, (k.clone(), v));
                        sut.put_front(k, v)
                    }
                };
                prop_assert_eq!(got, prev);
            }
            OpI::Remove(i) => {
                let k = Key(pool[i].clone());
                let prev = position(&model, &k).map(|at| model.remove(at).1);
                prop_assert_eq!(sut.remove(pool[i].as_str()), prev);
            }
            OpI::Get(i) => {
                let k = Key(pool[i].clone());
                let expected = position(&model, &k).map(|at| &model[at].1);
                prop_assert_eq!(sut.get(&k), expected);
                prop_assert_eq!(sut.contains_key(pool[i].as_str()), expected.is_some());
            }
            OpI::Mutate(i, d) => {
                let k = Key(pool[i].clone());
                match (sut.get_mut(&k), position(&model, &k)) {
                    (Some(sv), Some(at)) => {
                        *sv = sv.wrapping_add(d);
                        model[at].1 = model[at].1.wrapping_add(d);
                    }
                    (None, None) => {}
                    (s, m) => prop_assert!(false, "presence mismatch: {:?} vs {:?}", s, m),
                }
            }
            OpI::PopFront => {
                let expected = if model.is_empty() { None } else { Some(model.remove(0)) };
                prop_assert_eq!(sut.pop_front(), expected);
            }
            OpI::PopBack => {
                prop_assert_eq!(sut.pop_back(), model.pop());
            }
        }

        // Post-conditions after each op
        sut.assert_consistent();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());

        let fwd: Vec<i32> = sut.values().copied().collect();
        let expected: Vec<i32> = model.iter().map(|(_, v)| *v).collect();
        prop_assert_eq!(&fwd, &expected);
        let mut rev: Vec<i32> = sut.reverse_values().copied().collect();
        rev.reverse();
        prop_assert_eq!(&rev, &expected);

        let pairs: Vec<(Key, i32)> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(&pairs, &model);
    }
    Ok(())
}

// Property: State-machine equivalence against an ordered Vec model.
// Invariants exercised across random operation sequences:
// - put_back/put_front return the replaced value and move the key to the
//   requested end; keys stay unique.
// - remove/pop_* return exactly what the model removes.
// - get/contains_key parity; get_mut edits without repositioning.
// - Forward traversal equals the model; reverse traversal is its mirror.
// - Index and sequence stay in one-to-one correspondence.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(DoublyLinkedMap::<Key, i32, RandomState>::new(), &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: Same state-machine invariants under worst-case collision
// behavior. Positional removals (pop_*) must still find the right slot.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run(DoublyLinkedMap::with_hasher(ConstBuildHasher), &pool, ops)?;
    }
}
