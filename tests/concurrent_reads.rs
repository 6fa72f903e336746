//! Shared reads of one variant from several threads.

use crossbeam_utils::thread;
use halo_variant::{alternatives, apply, Variant, Visit, Visitor};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type Shared = Variant<alternatives![u64, String, Arc<AtomicUsize>]>;

struct Weight;

impl Visitor for Weight {
    type Output = usize;
}

impl Visit<u64> for Weight {
    fn visit(&mut self, value: &u64) -> usize {
        usize::try_from(*value).unwrap_or(usize::MAX)
    }
}

impl Visit<String> for Weight {
    fn visit(&mut self, value: &String) -> usize {
        value.len()
    }
}

impl Visit<Arc<AtomicUsize>> for Weight {
    fn visit(&mut self, value: &Arc<AtomicUsize>) -> usize {
        value.fetch_add(1, Ordering::Relaxed)
    }
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_variant_is_send_sync_when_alternatives_are() {
    assert_send_sync::<Shared>();
    assert_send_sync::<Variant<alternatives![i32, Vec<u8>]>>();
}

#[test]
fn test_parallel_get_and_visit() {
    let v = Shared::new(String::from("shared text"));

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|_| {
                for _ in 0..1_000 {
                    assert_eq!(v.get::<String, _>().unwrap(), "shared text");
                    assert_eq!(apply(Weight, &v), 11);
                    assert_eq!(v.which(), 1);
                }
            });
        }
    })
    .unwrap();
}

#[test]
fn test_parallel_visits_observe_same_value() {
    let counter = Arc::new(AtomicUsize::new(0));
    let v = Shared::new(Arc::clone(&counter));

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|_| {
                for _ in 0..250 {
                    v.visit(&mut Weight);
                }
            });
        }
    })
    .unwrap();

    assert_eq!(counter.load(Ordering::Relaxed), 1_000);
}

#[test]
fn test_move_between_threads() {
    let mut v = Shared::new(7u64);
    let handle = std::thread::spawn(move || {
        v.set(String::from("moved"));
        v
    });
    let v = handle.join().unwrap();
    assert_eq!(v.get::<String, _>().unwrap(), "moved");
}
