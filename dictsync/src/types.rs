//! Core types for dictsync.
//! The tree, exporter and importer all operate on these.

use std::{
    collections::{BTreeMap, HashSet},
    fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

/// Opaque identifier of a dictionary item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

/// Opaque identifier of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageId(pub u32);

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for LanguageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A language known to the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: LanguageId,
    /// External identifier, used as the CSV column header (e.g. `en-US`).
    pub culture_name: String,
}

impl Language {
    pub fn new(id: u32, culture_name: impl Into<String>) -> Self {
        Self {
            id: LanguageId(id),
            culture_name: culture_name.into(),
        }
    }
}

/// A localizable string entry.
///
/// Children are not stored on the item. The tree derives them from
/// `parent_key`, so sibling order is whatever the walker imposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryItem {
    pub id: ItemId,

    /// Unique, case-sensitive key.
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<String>,

    /// Translated values by language. An empty string is a present but
    /// empty translation, which is not the same as a missing one.
    #[serde(default)]
    pub translations: BTreeMap<LanguageId, String>,
}

impl DictionaryItem {
    pub fn new(id: u64, key: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            key: key.into(),
            parent_key: None,
            translations: BTreeMap::new(),
        }
    }

    /// Sets the parent key, builder style.
    pub fn with_parent(mut self, parent_key: impl Into<String>) -> Self {
        self.parent_key = Some(parent_key.into());
        self
    }

    /// Adds a translation, builder style.
    pub fn with_translation(mut self, language: LanguageId, value: impl Into<String>) -> Self {
        self.translations.insert(language, value.into());
        self
    }

    pub fn translation(&self, language: LanguageId) -> Option<&str> {
        self.translations.get(&language).map(String::as_str)
    }

    pub fn set_translation(&mut self, language: LanguageId, value: impl Into<String>) {
        self.translations.insert(language, value.into());
    }
}

/// One proposed or applied translation change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    pub item_key: String,
    pub culture_name: String,
    /// Value before the import pass touched it; empty if there was none.
    pub old_value: String,
    pub new_value: String,
}

impl Display for ChangeRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}]: {:?} -> {:?}",
            self.item_key, self.culture_name, self.old_value, self.new_value
        )
    }
}

/// Ordered changes produced by one import pass.
///
/// Records are appended row-major, then in header column order within a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet {
    records: Vec<ChangeRecord>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ChangeRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ChangeRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ChangeRecord> {
        self.records
    }

    /// Keys of the items that received at least one change, in discovery order.
    pub fn item_keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|record| record.item_key.as_str())
            .filter(|key| seen.insert(*key))
            .collect()
    }
}

impl From<Vec<ChangeRecord>> for ChangeSet {
    fn from(records: Vec<ChangeRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a ChangeRecord;
    type IntoIter = std::slice::Iter<'a, ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for ChangeSet {
    type Item = ChangeRecord;
    type IntoIter = std::vec::IntoIter<ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// A row of the depth-annotated dictionary listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewEntry {
    pub id: ItemId,
    pub key: String,
    /// Depth in the tree, 0 for roots.
    pub level: usize,
    /// Translations by culture name, only for languages in the registry.
    pub translations: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, culture: &str) -> ChangeRecord {
        ChangeRecord {
            item_key: key.to_string(),
            culture_name: culture.to_string(),
            old_value: String::new(),
            new_value: "x".to_string(),
        }
    }

    #[test]
    fn test_change_record_serializes_camel_case() {
        let record = ChangeRecord {
            item_key: "greeting".to_string(),
            culture_name: "en-US".to_string(),
            old_value: "Hi".to_string(),
            new_value: "Hello".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["itemKey"], "greeting");
        assert_eq!(json["cultureName"], "en-US");
        assert_eq!(json["oldValue"], "Hi");
        assert_eq!(json["newValue"], "Hello");
    }

    #[test]
    fn test_change_set_serializes_as_array() {
        let set = ChangeSet::from(vec![record("a", "en-US")]);
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.starts_with('['));
        let back: ChangeSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_item_keys_are_unique_and_ordered() {
        let set = ChangeSet::from(vec![
            record("b", "en-US"),
            record("a", "en-US"),
            record("b", "fr-FR"),
        ]);
        assert_eq!(set.item_keys(), vec!["b", "a"]);
    }

    #[test]
    fn test_empty_translation_is_present() {
        let item = DictionaryItem::new(1, "greeting").with_translation(LanguageId(2), "");
        assert_eq!(item.translation(LanguageId(2)), Some(""));
        assert_eq!(item.translation(LanguageId(3)), None);
    }

    #[test]
    fn test_item_json_omits_missing_parent() {
        let item = DictionaryItem::new(7, "root");
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("parentKey").is_none());
        assert_eq!(json["id"], 7);
    }
}
