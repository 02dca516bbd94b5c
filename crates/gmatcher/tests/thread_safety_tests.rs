// Thread-safety tests for compiled globs and trees
use gmatcher::{GGlob, Glob, GlobTree, PathTree};
use std::sync::Arc;
use std::thread;

#[test]
fn test_types_are_send_sync() {
    // Compile-time assertion that matchers can be shared between threads
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    assert_send::<Glob>();
    assert_sync::<Glob>();
    assert_send::<GGlob>();
    assert_sync::<GGlob>();
    assert_send::<GlobTree>();
    assert_sync::<GlobTree>();
    assert_send::<PathTree>();
    assert_sync::<PathTree>();
}

#[test]
fn test_concurrent_tree_matching() {
    let patterns: Vec<String> = (0..200)
        .map(|i| match i % 4 {
            0 => format!("host{}*", i),
            1 => format!("*.svc{}", i),
            2 => format!("job-{}-?", i),
            _ => format!("*{{x,y}}{}*", i),
        })
        .collect();
    let tree = Arc::new(GlobTree::from_patterns(&patterns).unwrap());

    // Same answers single-threaded, to compare against
    let inputs: Vec<String> = (0..100)
        .map(|i| format!("host{}.svc{}", i * 2, i * 2 + 1))
        .collect();
    let expected: Vec<Vec<usize>> = inputs
        .iter()
        .map(|s| {
            let mut indices = Vec::new();
            tree.match_into(s, None, Some(&mut indices), None);
            indices.sort_unstable();
            indices
        })
        .collect();
    let inputs = Arc::new(inputs);
    let expected = Arc::new(expected);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let tree = Arc::clone(&tree);
            let inputs = Arc::clone(&inputs);
            let expected = Arc::clone(&expected);
            thread::spawn(move || {
                // Each thread reuses one buffer across queries
                let mut indices = Vec::new();
                for (s, want) in inputs.iter().zip(expected.iter()) {
                    indices.clear();
                    tree.match_into(s, None, Some(&mut indices), None);
                    indices.sort_unstable();
                    assert_eq!(&indices, want, "input {:?}", s);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // host0* and *.svc1 both match the first input
    assert_eq!(expected[0], vec![0, 1]);
}

#[test]
fn test_concurrent_path_matching() {
    let tree = Arc::new(
        PathTree::from_patterns(["DB.*.cpu", "DB.host*.*", "*.*.*", "DB.{a,b}.mem"]).unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|thread_id| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                let mut total = 0;
                for i in 0..100 {
                    let path = format!("DB.host{}.cpu", thread_id * 100 + i);
                    total += tree.match_into(&path, None, None, None);
                }
                total
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 300);
    }
}
