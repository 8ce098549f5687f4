//! A published checker must answer from many threads and tasks at once.
use linkjail_core::fixtures::{Anchor, ESCAPE_CASES, reference_checker, replay};
use linkjail_core::{BoundarySet, EscapeChecker, JailPath};
use std::sync::{Arc, Barrier};
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_types_are_shareable() {
    assert_send_sync::<BoundarySet>();
    assert_send_sync::<EscapeChecker>();
    assert_send_sync::<JailPath>();
}

#[test]
fn test_parallel_threads_agree_with_table() {
    let checker = reference_checker(Anchor::Absolute).unwrap();
    let num_threads = 8;
    let barrier = Arc::new(Barrier::new(num_threads));
    let mut handles = vec![];

    for _ in 0..num_threads {
        let checker = checker.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..50 {
                assert_eq!(replay(&checker).unwrap(), ESCAPE_CASES.len() * 2);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_set_across_tasks() {
    let set = Arc::new(BoundarySet::from_strs(["/a/b", "/a/b/g/1"]).unwrap());
    let mut tasks = Vec::new();
    for i in 0..16 {
        let checker = EscapeChecker::from_shared(Arc::clone(&set));
        tasks.push(tokio::spawn(async move {
            let from = JailPath::parse(&format!("/a/b/g/1/task{i}")).unwrap();
            let inside = JailPath::parse("/a/b/g/1/shared").unwrap();
            let outside = JailPath::parse("/a/b").unwrap();
            (
                checker.is_escape(&from, &inside),
                checker.is_escape(&from, &outside),
            )
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), (false, true));
    }
}
