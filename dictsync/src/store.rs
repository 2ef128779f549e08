//! The storage collaborator: where languages and dictionary items live.
//!
//! The engine only reads a fresh registry and tree per request and hands
//! back the items it changed. [`JsonFileStore`] keeps everything in one
//! JSON document; [`MemoryStore`] is for tests and embedding.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::Error,
    registry::LanguageRegistry,
    tree::DictionaryTree,
    types::{DictionaryItem, Language},
};

/// Source of languages and dictionary items, and sink for saved items.
pub trait DictionaryStore {
    /// All known languages.
    fn languages(&self) -> Result<LanguageRegistry, Error>;

    /// A fresh copy of the dictionary tree.
    fn load_tree(&self) -> Result<DictionaryTree, Error>;

    /// Persists `items` in one batch, replacing stored items with the same key.
    fn save(&mut self, items: &[DictionaryItem]) -> Result<(), Error>;
}

/// Serialized form of a whole dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryDocument {
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub items: Vec<DictionaryItem>,
}

impl DictionaryDocument {
    pub fn new(languages: Vec<Language>, items: Vec<DictionaryItem>) -> Self {
        Self { languages, items }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Json)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(writer, self).map_err(Error::Json)
    }

    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path).map_err(Error::Io)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Replaces the stored items whose keys match `items`.
    ///
    /// Fails without modifying anything if one of the keys is unknown.
    pub fn merge_items(&mut self, items: &[DictionaryItem]) -> Result<(), Error> {
        let index: HashMap<&str, usize> = self
            .items
            .iter()
            .enumerate()
            .map(|(position, stored)| (stored.key.as_str(), position))
            .collect();
        let mut positions = Vec::with_capacity(items.len());
        for item in items {
            let position = *index.get(item.key.as_str()).ok_or_else(|| {
                Error::storage_error(format!("cannot save unknown item `{}`", item.key), None)
            })?;
            positions.push(position);
        }
        for (position, item) in positions.into_iter().zip(items) {
            self.items[position] = item.clone();
        }
        Ok(())
    }

    pub fn registry(&self) -> Result<LanguageRegistry, Error> {
        LanguageRegistry::new(self.languages.clone())
    }

    pub fn tree(&self) -> Result<DictionaryTree, Error> {
        DictionaryTree::from_items(self.items.clone())
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: DictionaryDocument,
    saves: usize,
    read_only: bool,
}

impl MemoryStore {
    pub fn new(languages: Vec<Language>, items: Vec<DictionaryItem>) -> Self {
        Self {
            document: DictionaryDocument::new(languages, items),
            ..Self::default()
        }
    }

    /// Makes every subsequent `save` fail.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn document(&self) -> &DictionaryDocument {
        &self.document
    }
}

impl DictionaryStore for MemoryStore {
    fn languages(&self) -> Result<LanguageRegistry, Error> {
        self.document.registry()
    }

    fn load_tree(&self) -> Result<DictionaryTree, Error> {
        self.document.tree()
    }

    fn save(&mut self, items: &[DictionaryItem]) -> Result<(), Error> {
        if self.read_only {
            return Err(Error::storage_error("store is read-only", None));
        }
        self.document.merge_items(items)?;
        self.saves += 1;
        Ok(())
    }
}

/// Store backed by a JSON [`DictionaryDocument`] on disk.
///
/// Every read goes to the file, so each request sees the current state.
/// Saves rewrite the whole document through a temporary file in the same
/// directory that then replaces the original.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Creates the file with `document` and returns a store for it.
    pub fn create<P: Into<PathBuf>>(path: P, document: &DictionaryDocument) -> Result<Self, Error> {
        let store = Self::new(path);
        store.write_document(document)?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_document(&self) -> Result<DictionaryDocument, Error> {
        DictionaryDocument::read_from(&self.path)
    }

    fn write_document(&self, document: &DictionaryDocument) -> Result<(), Error> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(Error::Io)?;

        let mut staged = tempfile::NamedTempFile::new_in(&dir).map_err(Error::Io)?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            document.to_writer(&mut writer)?;
            writer.flush().map_err(Error::Io)?;
        }
        staged.persist(&self.path).map_err(|e| {
            Error::storage_error(
                format!("cannot replace {}", self.path.display()),
                Some(Box::new(e.error)),
            )
        })?;
        Ok(())
    }
}

impl DictionaryStore for JsonFileStore {
    fn languages(&self) -> Result<LanguageRegistry, Error> {
        self.read_document()?.registry()
    }

    fn load_tree(&self) -> Result<DictionaryTree, Error> {
        self.read_document()?.tree()
    }

    fn save(&mut self, items: &[DictionaryItem]) -> Result<(), Error> {
        let mut document = self.read_document()?;
        document.merge_items(items)?;
        self.write_document(&document)?;
        debug!(path = %self.path.display(), items = items.len(), "saved dictionary items");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LanguageId;
    use tempfile::TempDir;

    fn document() -> DictionaryDocument {
        DictionaryDocument::new(
            vec![Language::new(1, "en-US")],
            vec![
                DictionaryItem::new(1, "greeting").with_translation(LanguageId(1), "Hello"),
                DictionaryItem::new(2, "greeting.formal").with_parent("greeting"),
            ],
        )
    }

    #[test]
    fn test_memory_store_save_replaces_items() {
        let mut store = MemoryStore::new(document().languages, document().items);
        let mut tree = store.load_tree().unwrap();
        tree.set_translation("greeting.formal", LanguageId(1), "Good day");
        let changed = tree.get("greeting.formal").unwrap().clone();

        store.save(&[changed]).unwrap();
        assert_eq!(store.save_count(), 1);
        let reloaded = store.load_tree().unwrap();
        assert_eq!(
            reloaded.get("greeting.formal").unwrap().translation(LanguageId(1)),
            Some("Good day")
        );
    }

    #[test]
    fn test_memory_store_read_only() {
        let mut store = MemoryStore::new(document().languages, document().items);
        store.set_read_only(true);
        let item = store.load_tree().unwrap().get("greeting").unwrap().clone();
        assert!(matches!(store.save(&[item]), Err(Error::Storage { .. })));
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_merge_unknown_item_changes_nothing() {
        let mut doc = document();
        let before = doc.clone();
        let known = DictionaryItem::new(1, "greeting");
        let unknown = DictionaryItem::new(9, "missing");
        assert!(doc.merge_items(&[known, unknown]).is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dictionary.json");
        let mut store = JsonFileStore::create(&path, &document()).unwrap();

        assert_eq!(store.languages().unwrap().len(), 1);
        let mut tree = store.load_tree().unwrap();
        assert_eq!(tree.len(), 2);

        tree.set_translation("greeting", LanguageId(1), "Hi");
        store.save(&[tree.get("greeting").unwrap().clone()]).unwrap();

        let reread = JsonFileStore::new(&path).load_tree().unwrap();
        assert_eq!(reread.get("greeting").unwrap().translation(LanguageId(1)), Some("Hi"));
        // Only the store file remains; the staging file was renamed over it.
        assert_eq!(std::fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[test]
    fn test_json_document_shape() {
        let json = r#"{
            "languages": [{"id": 1, "cultureName": "en-US"}],
            "items": [{"id": 5, "key": "a", "translations": {"1": "A"}}]
        }"#;
        let doc = DictionaryDocument::from_reader(json.as_bytes()).unwrap();
        assert_eq!(doc.items[0].translation(LanguageId(1)), Some("A"));
        assert_eq!(doc.languages[0].culture_name, "en-US");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let store = JsonFileStore::new("/definitely/not/here.json");
        assert!(matches!(store.load_tree(), Err(Error::Io(_))));
    }
}
