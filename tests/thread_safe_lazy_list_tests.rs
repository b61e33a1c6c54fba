//! Integration tests for thread-safe lazy lists.
//!
//! These tests verify that lists built with the `arc` feature can be shared
//! across threads, that concurrent forcing of one node runs its producer
//! exactly once, and that every thread observes the same memoized tail.

#![cfg(feature = "arc")]

use lazy_list::persistent::LazyList;
use rstest::rstest;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

// =============================================================================
// Concurrent Forcing
// =============================================================================

#[rstest]
fn test_concurrent_force_runs_producer_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let list = LazyList::new(0, move || {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        LazyList::singleton(1)
    });
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let list = list.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                list.tail()
            })
        })
        .collect();

    let tails: Vec<LazyList<i32>> = handles
        .into_iter()
        .map(|handle| handle.join().expect("Thread panicked"))
        .collect();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    for tail in &tails {
        assert!(LazyList::ptr_eq(tail, &tails[0]));
        assert_eq!(tail.head(), Some(&1));
    }
}

#[rstest]
fn test_concurrent_consumers_agree_on_infinite_prefix() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let naturals = LazyList::iterate(0_u64, move |value| {
        counter.fetch_add(1, Ordering::SeqCst);
        value + 1
    });

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let naturals = naturals.clone();
            thread::spawn(move || naturals.take(100).fold(0, |total, value| total + value))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("Thread panicked"), 4950);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 99);
}

// =============================================================================
// Structural Sharing Across Threads
// =============================================================================

#[rstest]
fn test_cross_thread_cons_shares_suffix() {
    let original = LazyList::make([1, 2, 3]);

    let handles: Vec<_> = (0..4)
        .map(|index| {
            let suffix = original.clone();
            thread::spawn(move || {
                let extended = suffix.cons(index * 10);
                assert_eq!(extended.head(), Some(&(index * 10)));
                assert!(LazyList::ptr_eq(&extended.tail(), &suffix));
                extended.len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("Thread panicked"), 4);
    }
    assert_eq!(original.len(), 3);
}

#[rstest]
fn test_filter_and_map_on_worker_thread() {
    let evens = LazyList::series(0, 1).filter(|value| value % 2 == 0);
    let squares = thread::spawn(move || {
        evens
            .map(|value| value * value)
            .take(4)
            .into_iter()
            .collect::<Vec<i32>>()
    })
    .join()
    .expect("Thread panicked");

    assert_eq!(squares, vec![0, 4, 16, 36]);
}
