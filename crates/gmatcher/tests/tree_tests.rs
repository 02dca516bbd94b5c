// Integration tests for multi-pattern trees
use gmatcher::{AllStore, GlobTree, IndexStore, MatcherError, PathTree, Result, Store};

fn load(patterns: &[&str]) -> Result<GlobTree> {
    let mut tree = GlobTree::with_capacity(patterns.len());
    for (index, pattern) in patterns.iter().enumerate() {
        match tree.add(pattern, index) {
            Ok(_) => {}
            Err(e) => {
                let e = MatcherError::from(e);
                if !e.is_pattern_exists() {
                    return Err(e);
                }
            }
        }
    }
    Ok(tree)
}

#[test]
fn test_batch_load_treats_duplicates_as_soft() {
    let tree = load(&["a*", "a**", "*b", "{b,a}", "{a,b}"]).unwrap();
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.index_of("a**"), None);
    assert_eq!(tree.index_of("{b,a}"), Some(3));
    assert_eq!(tree.index_of("{a,b}"), Some(3));

    assert!(load(&["a", "b]"]).is_err());
}

#[test]
fn test_store_reuse() {
    let tree = GlobTree::from_patterns(["*.go", "main.*", "*_test.go", "?ain.go"]).unwrap();
    let mut store = AllStore::new();
    store.grow(tree.len());

    assert_eq!(tree.match_store("main.go", &mut store), 3);
    assert_eq!(store.first.get(), Some(0));
    let mut indices = store.indices.indices().to_vec();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 3]);

    store.init();
    assert_eq!(tree.match_store("x_test.go", &mut store), 2);
    assert_eq!(store.first.get(), Some(0));
    assert_eq!(store.globs.len(), 2);
}

/// A caller-defined store that only counts matches below a threshold
struct Below {
    limit: usize,
    count: usize,
}

impl<'t> Store<'t> for Below {
    fn store(&mut self, _glob: &'t str, index: usize) {
        if index < self.limit {
            self.count += 1;
        }
    }
}

#[test]
fn test_custom_store() {
    let tree = GlobTree::from_patterns(["a*", "*a", "a?", "??"]).unwrap();
    let mut below = Below { limit: 2, count: 0 };
    assert_eq!(tree.match_store("aa", &mut below), 4);
    assert_eq!(below.count, 2);

    let mut indices = IndexStore::new();
    tree.match_store("ba", &mut indices);
    let mut got = indices.indices().to_vec();
    got.sort_unstable();
    assert_eq!(got, vec![1, 3]);
}

#[test]
fn test_path_tree_lazy_and_split_agree() {
    let tree = PathTree::from_patterns([
        "carbon.agents.*.cpu",
        "carbon.*.host?.cpu",
        "carbon.{agents,relays}.*.*",
        "carbon.agents.host1.cpu",
        "*.*",
    ])
    .unwrap();

    let mut parts = Vec::new();
    for path in [
        "carbon.agents.host1.cpu",
        "carbon.relays.host2.cpu",
        "carbon.agents.host10.mem",
        "carbon.agents",
        "carbon.agents.",
        "carbon..host1.cpu",
        "",
    ] {
        let mut lazy = Vec::new();
        let mut split = Vec::new();
        gmatcher::split_path(path, &mut parts);
        let n = tree.match_into(path, None, Some(&mut lazy), None);
        let m = tree.match_parts_into(&parts, None, Some(&mut split), None);
        lazy.sort_unstable();
        split.sort_unstable();
        assert_eq!(n, m, "{:?}", path);
        assert_eq!(lazy, split, "{:?}", path);
    }

    let mut indices = Vec::new();
    tree.match_into("carbon.agents.host1.cpu", None, Some(&mut indices), None);
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}
