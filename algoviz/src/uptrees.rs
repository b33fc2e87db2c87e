use std::hash::Hash;

use indexmap::IndexMap;

/// What an element of the forest points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum Link<T> {
    /// Non-root: the element's parent.
    Parent(T),
    /// Root of a set holding `size` elements.
    Root { size: usize },
}

/// Disjoint-set forest (up-trees) with union-by-size and full path compression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct UpTrees<T: Hash + Eq> {
    forest: IndexMap<T, Link<T>>,
}

impl<T: Copy + Eq + Hash> Default for UpTrees<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Eq + Hash> UpTrees<T> {
    pub fn new() -> Self {
        Self {
            forest: IndexMap::new(),
        }
    }

    /// Build a forest from explicit links, without checking them.
    ///
    /// Parent chains must end at a `Root`; this is meant for setting up
    /// known shapes in tests.
    pub fn from_links(links: impl IntoIterator<Item = (T, Link<T>)>) -> Self {
        Self {
            forest: links.into_iter().collect(),
        }
    }

    /// Register `e` as a singleton set. Returns `false` if it was already known.
    pub fn add(&mut self, e: T) -> bool {
        if self.forest.contains_key(&e) {
            return false;
        }
        self.forest.insert(e, Link::Root { size: 1 });
        true
    }

    pub fn contains(&self, e: T) -> bool {
        self.forest.contains_key(&e)
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.forest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    /// The stored link for `e`, if registered.
    pub fn link(&self, e: T) -> Option<Link<T>> {
        self.forest.get(&e).copied()
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.forest
            .values()
            .filter(|l| matches!(l, Link::Root { .. }))
            .count()
    }

    /// Find the root of the set containing `e`, compressing the path.
    ///
    /// Every non-root element on the path is relinked directly to the root.
    /// If `e` has not been registered, it becomes its own singleton set.
    pub fn find(&mut self, e: T) -> T {
        if self.add(e) {
            return e;
        }
        let mut root = e;
        while let Some(&Link::Parent(p)) = self.forest.get(&root) {
            root = p;
        }
        let mut cur = e;
        while cur != root {
            match self.forest.get(&cur) {
                Some(&Link::Parent(next)) => {
                    self.forest.insert(cur, Link::Parent(root));
                    cur = next;
                }
                _ => break,
            }
        }
        root
    }

    /// Merge the sets containing `a` and `b`. Returns the surviving root.
    ///
    /// The smaller set is attached under the larger; on equal sizes `b`'s
    /// root goes under `a`'s. A no-op if both are already in one set.
    pub fn union(&mut self, a: T, b: T) -> T {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return ra;
        }
        let sa = self.root_size(ra);
        let sb = self.root_size(rb);
        let (child, root) = if sa < sb { (ra, rb) } else { (rb, ra) };
        self.forest.insert(child, Link::Parent(root));
        self.forest.insert(root, Link::Root { size: sa + sb });
        tracing::trace!(size = sa + sb, "merged sets");
        root
    }

    /// Size of the set containing `e`.
    pub fn size_of(&mut self, e: T) -> usize {
        let r = self.find(e);
        self.root_size(r)
    }

    pub fn same_set(&mut self, a: T, b: T) -> bool {
        self.find(a) == self.find(b)
    }

    fn root_size(&self, root: T) -> usize {
        match self.forest.get(&root) {
            Some(&Link::Root { size }) => size,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest_of(n: u32) -> UpTrees<u32> {
        let mut f = UpTrees::new();
        for e in 0..n {
            f.add(e);
        }
        f
    }

    #[test]
    fn add_registers_singletons() {
        let mut f = UpTrees::new();
        assert!(f.add(1));
        assert!(f.add(2));
        assert!(!f.add(2));
        assert_eq!(f.link(1), Some(Link::Root { size: 1 }));
        assert_eq!(f.link(2), Some(Link::Root { size: 1 }));
        assert_eq!(f.set_count(), 2);
    }

    #[test]
    fn trivial_find() {
        let mut f = forest_of(3);
        assert_eq!(f.find(1), 1);
        assert_eq!(f.find(2), 2);
    }

    #[test]
    fn find_registers_unknown_element() {
        let mut f = forest_of(2);
        assert_eq!(f.find(9), 9);
        assert_eq!(f.link(9), Some(Link::Root { size: 1 }));
    }

    #[test]
    fn simple_union() {
        let mut f = forest_of(3);
        assert_eq!(f.union(1, 2), 1);
        assert_eq!(f.link(1), Some(Link::Root { size: 2 }));
        assert_eq!(f.link(2), Some(Link::Parent(1)));
        assert_eq!(f.find(1), 1);
        assert_eq!(f.find(2), 1);
    }

    #[test]
    fn union_attaches_smaller_under_larger() {
        let mut f = forest_of(8);
        f.union(2, 5);
        assert_eq!(f.link(2), Some(Link::Root { size: 2 }));
        assert_eq!(f.link(5), Some(Link::Parent(2)));
        f.union(2, 6);
        assert_eq!(f.link(2), Some(Link::Root { size: 3 }));
        assert_eq!(f.link(6), Some(Link::Parent(2)));
        f.union(5, 7);
        assert_eq!(f.link(2), Some(Link::Root { size: 4 }));
        assert_eq!(f.link(5), Some(Link::Parent(2)));
        assert_eq!(f.link(7), Some(Link::Parent(2)));
        // 0 is the smaller set even though it is the first argument.
        f.union(0, 7);
        assert_eq!(f.link(2), Some(Link::Root { size: 5 }));
        assert_eq!(f.link(0), Some(Link::Parent(2)));
    }

    #[test]
    fn find_on_manual_links() {
        let mut f = UpTrees::from_links([
            (0, Link::Parent(7)),
            (1, Link::Root { size: 1 }),
            (2, Link::Root { size: 5 }),
            (5, Link::Parent(2)),
            (6, Link::Parent(2)),
            (7, Link::Parent(2)),
        ]);
        for e in [0, 2, 5, 6, 7] {
            assert_eq!(f.find(e), 2);
        }
        assert_eq!(f.find(1), 1);
        assert_eq!(f.link(0), Some(Link::Parent(2)));
    }

    #[test]
    fn path_compression_flattens_chain() {
        // 0 → 1 → 2 → ... → 7
        let mut links: Vec<(u32, Link<u32>)> = (0..7).map(|e| (e, Link::Parent(e + 1))).collect();
        links.push((7, Link::Root { size: 8 }));
        let mut f = UpTrees::from_links(links);

        assert_eq!(f.find(0), 7);
        for e in 0..7 {
            assert_eq!(f.link(e), Some(Link::Parent(7)));
        }
        assert_eq!(f.link(7), Some(Link::Root { size: 8 }));
        for e in 0..8 {
            assert_eq!(f.find(e), 7);
        }
    }

    #[test]
    fn repeated_find_is_idempotent() {
        let mut links: Vec<(u32, Link<u32>)> = (0..4).map(|e| (e, Link::Parent(e + 1))).collect();
        links.push((4, Link::Root { size: 5 }));
        let mut f = UpTrees::from_links(links);

        let first = f.find(0);
        let after_first = f.clone();
        let second = f.find(0);
        assert_eq!(first, second);
        assert_eq!(f, after_first);
    }

    #[test]
    fn larger_set_absorbs_on_merge() {
        let mut f = forest_of(8);
        f.union(0, 1);
        f.union(0, 3);
        f.union(4, 5);
        f.union(4, 6);
        f.union(4, 7);

        let roots: Vec<_> = (0..8).map(|e| f.find(e)).collect();
        assert_eq!(roots, vec![0, 0, 2, 0, 4, 4, 4, 4]);

        f.union(3, 7);
        let roots: Vec<_> = (0..8).map(|e| f.find(e)).collect();
        assert_eq!(roots, vec![4, 4, 2, 4, 4, 4, 4, 4]);

        f.union(0, 2);
        let roots: Vec<_> = (0..8).map(|e| f.find(e)).collect();
        assert_eq!(roots, vec![4; 8]);
        assert_eq!(f.size_of(2), 8);
        assert_eq!(f.set_count(), 1);
    }

    #[test]
    fn union_same_set_is_noop() {
        let mut f = forest_of(3);
        f.union(0, 1);
        let before = f.clone();
        assert_eq!(f.union(1, 0), 0);
        assert_eq!(f, before);
    }

    #[test]
    fn disjoint_sets_stay_separate() {
        let mut f = forest_of(4);
        f.union(0, 1);
        f.union(2, 3);
        assert!(!f.same_set(0, 2));
        assert!(f.same_set(2, 3));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(300))]

            #[test]
            fn union_joins_sets(
                n in 1_u32..20,
                ops in proptest::collection::vec((0_u32..20, 0_u32..20), 0..50),
            ) {
                let mut f = forest_of(n);
                for &(a, b) in &ops {
                    f.union(a, b);
                    prop_assert_eq!(f.find(a), f.find(b));
                }
            }

            #[test]
            fn sizes_sum_to_element_count(
                n in 1_u32..20,
                ops in proptest::collection::vec((0_u32..20, 0_u32..20), 0..50),
            ) {
                let mut f = forest_of(n);
                for &(a, b) in &ops {
                    f.union(a, b);
                }
                let elements: Vec<u32> = (0..20).filter(|&e| f.contains(e)).collect();
                let mut roots: Vec<u32> = elements.iter().map(|&e| f.find(e)).collect();
                roots.sort();
                roots.dedup();
                let total: usize = roots.iter().map(|&r| f.size_of(r)).sum();
                prop_assert_eq!(total, f.len());
                prop_assert_eq!(roots.len(), f.set_count());
            }

            #[test]
            fn find_twice_changes_nothing(
                n in 1_u32..20,
                ops in proptest::collection::vec((0_u32..20, 0_u32..20), 0..50),
                query in 0_u32..20,
            ) {
                let mut f = forest_of(n);
                for &(a, b) in &ops {
                    f.union(a, b);
                }
                let first = f.find(query);
                let snapshot = f.clone();
                prop_assert_eq!(f.find(query), first);
                prop_assert_eq!(f, snapshot);
            }
        }
    }
}
