use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn recall_reuses_the_cached_value_for_equal_keys() {
    let memo: Memo<String> = Memo::new();
    let runs = AtomicUsize::new(0);

    let project = || {
        runs.fetch_add(1, Ordering::SeqCst);
        "projected".to_string()
    };

    let first = memo.recall(&[1, 2], project);
    let second = memo.recall(&[1, 2], || {
        runs.fetch_add(1, Ordering::SeqCst);
        "projected".to_string()
    });

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn recall_recomputes_when_any_key_changes() {
    let memo: Memo<usize> = Memo::new();

    let first = memo.recall(&[1, 2], || 12);
    let second = memo.recall(&[1, 3], || 13);

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(*second, 13);
}

#[test]
fn recall_only_remembers_the_latest_inputs() {
    let memo: Memo<usize> = Memo::new();

    let first = memo.recall(&[1], || 1);
    memo.recall(&[2], || 2);
    let third = memo.recall(&[1], || 1);

    // Single-entry cache: going back to older inputs recomputes.
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(*first, *third);
}

#[test]
fn ident_tracks_allocation_not_content() {
    let a = Arc::new(vec![1, 2, 3]);
    let b = Arc::new(vec![1, 2, 3]);
    let c = Arc::clone(&a);

    assert_ne!(ident(&a), ident(&b));
    assert_eq!(ident(&a), ident(&c));
}
