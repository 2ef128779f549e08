//! In-memory view of the dictionary as a tree.
//!
//! Items live in an arena (`Vec`) and are addressed by index; parent/child
//! links are derived from each item's `parent_key` when the tree is built.

use std::collections::HashMap;

use crate::{
    error::Error,
    registry::LanguageRegistry,
    types::{DictionaryItem, LanguageId, OverviewEntry},
    walker::TreeWalker,
};

#[derive(Debug, Clone, Default)]
pub struct DictionaryTree {
    items: Vec<DictionaryItem>,
    by_key: HashMap<String, usize>,
    roots: Vec<usize>,
    children: Vec<Vec<usize>>,
}

impl DictionaryTree {
    /// Builds a tree from a flat list of items.
    ///
    /// Fails on duplicate keys, on parent keys that name no item, and on
    /// cycles (items that cannot be reached from any root).
    pub fn from_items(items: Vec<DictionaryItem>) -> Result<Self, Error> {
        let mut by_key = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if by_key.insert(item.key.clone(), index).is_some() {
                return Err(Error::invalid_data(format!(
                    "duplicate dictionary key `{}`",
                    item.key
                )));
            }
        }

        let mut roots = Vec::new();
        let mut children = vec![Vec::new(); items.len()];
        for (index, item) in items.iter().enumerate() {
            match &item.parent_key {
                None => roots.push(index),
                Some(parent) => {
                    let parent_index = *by_key.get(parent).ok_or_else(|| {
                        Error::invalid_data(format!(
                            "item `{}` refers to unknown parent `{}`",
                            item.key, parent
                        ))
                    })?;
                    children[parent_index].push(index);
                }
            }
        }

        let tree = Self {
            items,
            by_key,
            roots,
            children,
        };
        tree.check_reachable()?;
        Ok(tree)
    }

    fn check_reachable(&self) -> Result<(), Error> {
        let mut seen = vec![false; self.items.len()];
        let mut stack: Vec<usize> = self.roots.clone();
        while let Some(index) = stack.pop() {
            if seen[index] {
                continue;
            }
            seen[index] = true;
            stack.extend(self.children[index].iter().copied());
        }

        match seen.iter().position(|visited| !visited) {
            Some(index) => Err(Error::invalid_data(format!(
                "item `{}` is part of a parent cycle",
                self.items[index].key
            ))),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Exact, case-sensitive key lookup.
    pub fn get(&self, key: &str) -> Option<&DictionaryItem> {
        self.by_key.get(key).map(|&i| &self.items[i])
    }

    /// Mutable access for editing translations. The key and parent must not
    /// be changed through this reference.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut DictionaryItem> {
        self.by_key.get(key).map(|&i| &mut self.items[i])
    }

    /// Root items, in storage order.
    pub fn roots(&self) -> impl Iterator<Item = &DictionaryItem> {
        self.roots.iter().map(|&i| &self.items[i])
    }

    /// Direct children of `key`, in storage order. Empty for unknown keys.
    pub fn children(&self, key: &str) -> Vec<&DictionaryItem> {
        match self.by_key.get(key) {
            Some(&index) => self.children[index].iter().map(|&i| &self.items[i]).collect(),
            None => Vec::new(),
        }
    }

    /// Writes a translation. Returns `false` if the key is unknown.
    pub fn set_translation(
        &mut self,
        key: &str,
        language: LanguageId,
        value: impl Into<String>,
    ) -> bool {
        match self.by_key.get(key) {
            Some(&index) => {
                self.items[index].set_translation(language, value);
                true
            }
            None => false,
        }
    }

    pub fn items(&self) -> &[DictionaryItem] {
        &self.items
    }

    /// Pre-order walk with ordinal key ordering among siblings.
    pub fn walk(&self) -> TreeWalker<'_> {
        TreeWalker::new(self)
    }

    /// Depth-annotated listing for display.
    pub fn overview(&self, registry: &LanguageRegistry) -> Vec<OverviewEntry> {
        self.walk()
            .map(|(item, level)| OverviewEntry {
                id: item.id,
                key: item.key.clone(),
                level,
                translations: item
                    .translations
                    .iter()
                    .filter_map(|(id, value)| {
                        registry
                            .by_id(*id)
                            .map(|l| (l.culture_name.clone(), value.clone()))
                    })
                    .collect(),
            })
            .collect()
    }

    pub(crate) fn item_at(&self, index: usize) -> &DictionaryItem {
        &self.items[index]
    }

    pub(crate) fn root_indices(&self) -> &[usize] {
        &self.roots
    }

    pub(crate) fn child_indices(&self, index: usize) -> &[usize] {
        &self.children[index]
    }
}
