//! Deterministic pre-order traversal of a [`DictionaryTree`].

use crate::{tree::DictionaryTree, types::DictionaryItem};

/// Lazy pre-order iterator yielding `(item, depth)`.
///
/// Siblings are visited in ascending ordinal order of their keys (plain
/// `str` comparison, no locale collation). The walk keeps an explicit stack
/// of pending nodes, so tree depth is bounded only by memory.
///
/// ```rust
/// use dictsync::{DictionaryItem, DictionaryTree};
///
/// let tree = DictionaryTree::from_items(vec![
///     DictionaryItem::new(1, "b"),
///     DictionaryItem::new(2, "a"),
///     DictionaryItem::new(3, "a.child").with_parent("a"),
/// ])?;
/// let visited: Vec<_> = tree.walk().map(|(item, depth)| (item.key.as_str(), depth)).collect();
/// assert_eq!(visited, vec![("a", 0), ("a.child", 1), ("b", 0)]);
/// # Ok::<(), dictsync::Error>(())
/// ```
pub struct TreeWalker<'a> {
    tree: &'a DictionaryTree,
    stack: Vec<(usize, usize)>,
    visited: usize,
}

impl<'a> TreeWalker<'a> {
    pub fn new(tree: &'a DictionaryTree) -> Self {
        let mut walker = Self {
            tree,
            stack: Vec::new(),
            visited: 0,
        };
        walker.push_sorted(tree.root_indices(), 0);
        walker
    }

    // Pushed in reverse so the smallest key is popped first.
    fn push_sorted(&mut self, indices: &[usize], depth: usize) {
        let mut siblings = indices.to_vec();
        siblings.sort_by(|&a, &b| self.tree.item_at(a).key.cmp(&self.tree.item_at(b).key));
        self.stack
            .extend(siblings.into_iter().rev().map(|index| (index, depth)));
    }
}

impl<'a> Iterator for TreeWalker<'a> {
    type Item = (&'a DictionaryItem, usize);

    fn next(&mut self) -> Option<Self::Item> {
        // The tree rejects cycles at construction; this bounds the walk anyway.
        if self.visited >= self.tree.len() {
            self.stack.clear();
            return None;
        }

        let (index, depth) = self.stack.pop()?;
        self.visited += 1;
        let tree = self.tree;
        self.push_sorted(tree.child_indices(index), depth + 1);
        Some((tree.item_at(index), depth))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tree.len() - self.visited;
        (self.stack.len().min(remaining), Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use crate::{tree::DictionaryTree, types::DictionaryItem};

    fn keys(tree: &DictionaryTree) -> Vec<(String, usize)> {
        tree.walk()
            .map(|(item, depth)| (item.key.clone(), depth))
            .collect()
    }

    #[test]
    fn test_pre_order_with_sorted_siblings() {
        let tree = DictionaryTree::from_items(vec![
            DictionaryItem::new(1, "Zoo"),
            DictionaryItem::new(2, "apple"),
            DictionaryItem::new(3, "apple.b").with_parent("apple"),
            DictionaryItem::new(4, "apple.a").with_parent("apple"),
            DictionaryItem::new(5, "apple.a.x").with_parent("apple.a"),
            DictionaryItem::new(6, "Alpha"),
        ])
        .unwrap();

        // Uppercase sorts before lowercase in ordinal order.
        assert_eq!(
            keys(&tree),
            vec![
                ("Alpha".to_string(), 0),
                ("Zoo".to_string(), 0),
                ("apple".to_string(), 0),
                ("apple.a".to_string(), 1),
                ("apple.a.x".to_string(), 2),
                ("apple.b".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_empty_tree() {
        let tree = DictionaryTree::default();
        assert_eq!(tree.walk().count(), 0);
    }

    #[test]
    fn test_walk_is_reproducible_regardless_of_storage_order() {
        let items = vec![
            DictionaryItem::new(1, "b"),
            DictionaryItem::new(2, "a"),
            DictionaryItem::new(3, "c").with_parent("a"),
        ];
        let mut reversed = items.clone();
        reversed.reverse();

        let first = DictionaryTree::from_items(items).unwrap();
        let second = DictionaryTree::from_items(reversed).unwrap();
        assert_eq!(keys(&first), keys(&second));
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let depth = 10_000;
        let mut items = vec![DictionaryItem::new(0, "k0")];
        for i in 1..depth {
            items.push(DictionaryItem::new(i as u64, format!("k{i}")).with_parent(format!("k{}", i - 1)));
        }
        let tree = DictionaryTree::from_items(items).unwrap();

        let mut walker = tree.walk();
        let mut last = 0;
        let mut count = 0;
        for (_, d) in &mut walker {
            last = d;
            count += 1;
        }
        assert_eq!(count, depth);
        assert_eq!(last, depth - 1);
        // Not restartable: the consumed walker stays exhausted.
        assert!(walker.next().is_none());
    }
}
