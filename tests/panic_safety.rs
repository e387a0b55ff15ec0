//! What state the vector is left in when an element's `Clone` panics.
//!
//! Strong-guarantee operations must roll back to the pre-call state;
//! basic-guarantee operations must leave a valid vector (every slot below
//! `len` live, nothing leaked, nothing dropped twice).

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use static_vec::StaticVec;

/// Panics on the `fail_at`-th clone (1-based); counts live instances.
struct Brittle {
    id: i32,
    clones: Arc<AtomicUsize>,
    live: Arc<AtomicUsize>,
    fail_at: usize,
}

impl Brittle {
    fn new(id: i32, clones: &Arc<AtomicUsize>, live: &Arc<AtomicUsize>, fail_at: usize) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Brittle {
            id,
            clones: Arc::clone(clones),
            live: Arc::clone(live),
            fail_at,
        }
    }
}

impl Clone for Brittle {
    fn clone(&self) -> Self {
        if self.clones.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_at {
            panic!("clone {} failed", self.fail_at);
        }
        Self::new(self.id, &self.clones, &self.live, self.fail_at)
    }
}

impl Drop for Brittle {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

struct Harness {
    clones: Arc<AtomicUsize>,
    live: Arc<AtomicUsize>,
}

impl Harness {
    fn new() -> Self {
        Harness {
            clones: Arc::new(AtomicUsize::new(0)),
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// An element whose `fail_at`-th clone (counted across the harness)
    /// panics.
    fn elem(&self, id: i32, fail_at: usize) -> Brittle {
        Brittle::new(id, &self.clones, &self.live, fail_at)
    }

    fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

#[test]
fn resize_rolls_back_on_clone_panic() {
    let h = Harness::new();
    let mut vec: StaticVec<Brittle, 8> = StaticVec::new();
    vec.push(h.elem(1, usize::MAX));

    // Growing by 4 needs 3 clones plus the moved value; fail on the 3rd.
    let value = h.elem(9, 3);
    let result = catch_unwind(AssertUnwindSafe(|| vec.resize(5, value)));
    assert!(result.is_err());

    // Strong guarantee: exactly the original element remains.
    assert_eq!(vec.len(), 1);
    assert_eq!(vec[0].id, 1);
    assert_eq!(h.live(), 1);
}

#[test]
fn from_elem_leaves_nothing_on_clone_panic() {
    let h = Harness::new();

    let value = h.elem(1, 2);
    let result = catch_unwind(AssertUnwindSafe(|| {
        StaticVec::<Brittle, 8>::from_elem(value, 5)
    }));
    assert!(result.is_err());
    assert_eq!(h.live(), 0);
}

#[test]
fn resize_with_rolls_back_on_closure_panic() {
    let h = Harness::new();
    let mut vec: StaticVec<Brittle, 8> = StaticVec::new();
    vec.push(h.elem(1, usize::MAX));
    vec.push(h.elem(2, usize::MAX));

    let made = AtomicUsize::new(0);
    let result = catch_unwind(AssertUnwindSafe(|| {
        vec.resize_with(6, || {
            if made.fetch_add(1, Ordering::SeqCst) == 2 {
                panic!("third construction fails");
            }
            h.elem(50, usize::MAX)
        })
    }));
    assert!(result.is_err());

    assert_eq!(vec.len(), 2);
    assert_eq!(h.live(), 2);
}

#[test]
fn insert_keeps_prefix_and_completed_clones_on_panic() {
    let h = Harness::new();
    let mut vec: StaticVec<Brittle, 8> = StaticVec::new();
    for i in 1..=4 {
        vec.push(h.elem(i, usize::MAX));
    }

    // Insert 3 clones at index 1; the 3rd clone panics.
    let src = [h.elem(10, 3), h.elem(11, 3), h.elem(12, 3)];
    let old_len = vec.len();
    let result = catch_unwind(AssertUnwindSafe(|| vec.insert_from_slice(1, &src)));
    assert!(result.is_err());

    // Basic guarantee: the two completed clones stayed, the suffix closed
    // back over the unfilled gap, and the length never went below old_len.
    assert!(vec.len() >= old_len);
    assert_eq!(vec.len(), old_len + 2);
    let ids: Vec<i32> = vec.iter().map(|b| b.id).collect();
    assert_eq!(ids, [1, 10, 11, 2, 3, 4]);

    drop(vec);
    // src (3) still live, everything else dropped exactly once.
    assert_eq!(h.live(), 3);
}

#[test]
fn insert_from_elem_closes_gap_on_panic() {
    let h = Harness::new();
    let mut vec: StaticVec<Brittle, 8> = StaticVec::new();
    vec.push(h.elem(1, usize::MAX));
    vec.push(h.elem(2, usize::MAX));

    let value = h.elem(7, 2);
    let result = catch_unwind(AssertUnwindSafe(|| vec.insert_from_elem(1, 3, &value)));
    assert!(result.is_err());

    let ids: Vec<i32> = vec.iter().map(|b| b.id).collect();
    assert_eq!(ids, [1, 7, 2]);

    drop(vec);
    assert_eq!(h.live(), 1); // only `value`
}

#[test]
fn extend_from_slice_keeps_completed_tail_on_panic() {
    let h = Harness::new();
    let mut vec: StaticVec<Brittle, 8> = StaticVec::new();
    vec.push(h.elem(1, usize::MAX));

    let src = [h.elem(2, 2), h.elem(3, 2), h.elem(4, 2)];
    let result = catch_unwind(AssertUnwindSafe(|| vec.extend_from_slice(&src)));
    assert!(result.is_err());

    let ids: Vec<i32> = vec.iter().map(|b| b.id).collect();
    assert_eq!(ids, [1, 2]);

    drop(vec);
    assert_eq!(h.live(), 3);
}

#[test]
fn assign_stays_valid_on_clone_panic() {
    let h = Harness::new();
    let mut vec: StaticVec<Brittle, 8> = StaticVec::new();
    vec.push(h.elem(1, usize::MAX));
    vec.push(h.elem(2, usize::MAX));

    // Growing assign: the in-place prefix overwrite succeeds, the first
    // clone into the uninitialized tail lands and is rolled back when the
    // next one (the 4th overall) panics.
    let src = [h.elem(10, 4), h.elem(11, 4), h.elem(12, 4), h.elem(13, 4)];
    let result = catch_unwind(AssertUnwindSafe(|| vec.assign_from_slice(&src)));
    assert!(result.is_err());

    // Basic guarantee: still a valid vector of the old length.
    assert_eq!(vec.len(), 2);
    let ids: Vec<i32> = vec.iter().map(|b| b.id).collect();
    assert_eq!(ids, [10, 11]);

    drop(vec);
    assert_eq!(h.live(), 4);
}

#[test]
fn assign_from_iter_stays_valid_on_source_panic() {
    let h = Harness::new();
    let mut vec: StaticVec<Brittle, 8> = StaticVec::new();
    vec.push(h.elem(1, usize::MAX));
    vec.push(h.elem(2, usize::MAX));

    // The source clones lazily: two overwrite the existing slots, the third
    // is pushed, the fourth panics mid-iteration.
    let src = [h.elem(10, 4), h.elem(11, 4), h.elem(12, 4), h.elem(13, 4)];
    let result = catch_unwind(AssertUnwindSafe(|| {
        vec.assign_from_iter(src.iter().cloned())
    }));
    assert!(result.is_err());

    // Basic guarantee: a valid vector holding everything assigned so far.
    assert_eq!(vec.len(), 3);
    let ids: Vec<i32> = vec.iter().map(|b| b.id).collect();
    assert_eq!(ids, [10, 11, 12]);

    drop(vec);
    assert_eq!(h.live(), 4);
}

#[test]
fn assign_from_iter_truncates_unconsumed_tail() {
    let h = Harness::new();
    let mut vec: StaticVec<Brittle, 8> = StaticVec::new();
    for i in 1..=4 {
        vec.push(h.elem(i, usize::MAX));
    }

    // A source shorter than the destination: the overwrite phase ends early
    // and the leftover tail is dropped.
    let src = [h.elem(10, usize::MAX)];
    vec.assign_from_iter(src.iter().cloned());

    assert_eq!(vec.len(), 1);
    assert_eq!(vec[0].id, 10);
    assert_eq!(h.live(), 2); // the source element and its surviving clone
}

#[test]
fn clone_drops_partial_copy_on_panic() {
    let h = Harness::new();
    let mut vec: StaticVec<Brittle, 8> = StaticVec::new();
    for i in 1..=4 {
        vec.push(h.elem(i, usize::MAX));
    }
    // Third clone of the copy panics.
    vec[2].fail_at = 3;

    let result = catch_unwind(AssertUnwindSafe(|| vec.clone()));
    assert!(result.is_err());

    // The source is untouched, the two partial clones were dropped.
    assert_eq!(vec.len(), 4);
    assert_eq!(h.live(), 4);
}

#[test]
fn retain_compacts_survivors_when_predicate_panics() {
    let h = Harness::new();
    let mut vec: StaticVec<Brittle, 8> = StaticVec::new();
    for i in 1..=5 {
        vec.push(h.elem(i, usize::MAX));
    }

    let result = catch_unwind(AssertUnwindSafe(|| {
        vec.retain(|b| {
            if b.id == 4 {
                panic!("predicate failed");
            }
            b.id != 2
        })
    }));
    assert!(result.is_err());

    // Elements 1 and 3 were kept, 2 was dropped, 4 and 5 were still pending
    // and survive the unwind.
    let ids: Vec<i32> = vec.iter().map(|b| b.id).collect();
    assert_eq!(ids, [1, 3, 4, 5]);
    assert_eq!(h.live(), 4);
}
