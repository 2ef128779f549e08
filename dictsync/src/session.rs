//! Two-phase preview/confirm import.
//!
//! No state is kept between the two phases: the client resubmits the same
//! file and options to confirm, and the session parses it again against a
//! freshly loaded tree.

use tracing::{debug, info};

use crate::{
    error::Error,
    import::{ImportOutcome, import_csv},
    options::ImportOptions,
    store::DictionaryStore,
    types::{ChangeSet, DictionaryItem},
};

/// Runs imports against a [`DictionaryStore`].
///
/// # Example
///
/// ```rust
/// use dictsync::{DictionaryItem, ImportOptions, ImportSession, Language, MemoryStore};
///
/// let mut store = MemoryStore::new(
///     vec![Language::new(1, "en-US")],
///     vec![DictionaryItem::new(1, "greeting")],
/// );
/// let csv = b",en-US\ngreeting,Hello\n";
///
/// let preview = ImportSession::new(&mut store).preview(csv, ImportOptions::new())?;
/// assert_eq!(preview.len(), 1);
/// assert_eq!(store.save_count(), 0);
///
/// let confirmed = ImportSession::new(&mut store).confirm(csv, ImportOptions::new())?;
/// assert_eq!(confirmed, preview);
/// assert_eq!(store.save_count(), 1);
/// # Ok::<(), dictsync::Error>(())
/// ```
pub struct ImportSession<'s, S: DictionaryStore> {
    store: &'s mut S,
}

impl<'s, S: DictionaryStore> ImportSession<'s, S> {
    pub fn new(store: &'s mut S) -> Self {
        Self { store }
    }

    /// Parses `bytes` and, if `options.confirmed` is set, saves every
    /// touched item in one batch. A failed save is returned as an error.
    pub fn import(&mut self, bytes: &[u8], options: ImportOptions) -> Result<ImportOutcome, Error> {
        let registry = self.store.languages()?;
        let mut tree = self.store.load_tree()?;
        let outcome = import_csv(bytes, &options, &mut tree, &registry)?;

        if !options.confirmed {
            debug!(changes = outcome.changes.len(), "preview only, nothing saved");
            return Ok(outcome);
        }
        if outcome.touched.is_empty() {
            debug!("confirmed import without changes");
            return Ok(outcome);
        }

        let items: Vec<DictionaryItem> = outcome
            .touched
            .iter()
            .filter_map(|key| tree.get(key).cloned())
            .collect();
        self.store.save(&items)?;
        info!(items = items.len(), changes = outcome.changes.len(), "saved imported translations");
        Ok(outcome)
    }

    /// Computes the changes without saving anything.
    pub fn preview(&mut self, bytes: &[u8], options: ImportOptions) -> Result<ChangeSet, Error> {
        self.import(bytes, options.with_confirmed(false))
            .map(|outcome| outcome.changes)
    }

    /// Re-runs the same parse and saves the result.
    ///
    /// Anything another writer changed since the preview is overwritten
    /// according to the usual conflict rules; use [`Self::confirm_expected`]
    /// to refuse instead.
    pub fn confirm(&mut self, bytes: &[u8], options: ImportOptions) -> Result<ChangeSet, Error> {
        self.import(bytes, options.with_confirmed(true))
            .map(|outcome| outcome.changes)
    }

    /// Confirms only if the changes are exactly the ones previewed.
    ///
    /// The parse is repeated as a preview first; if its change set differs
    /// from `expected` in any record the store is left untouched and
    /// [`Error::StaleChangeSet`] is returned.
    pub fn confirm_expected(
        &mut self,
        bytes: &[u8],
        options: ImportOptions,
        expected: &ChangeSet,
    ) -> Result<ChangeSet, Error> {
        let current = self.preview(bytes, options)?;
        if &current != expected {
            return Err(Error::StaleChangeSet {
                expected: expected.len(),
                actual: current.len(),
            });
        }
        self.confirm(bytes, options)
    }

    /// Previews or confirms depending on `options.confirmed`.
    pub fn run(&mut self, bytes: &[u8], options: ImportOptions) -> Result<ChangeSet, Error> {
        self.import(bytes, options).map(|outcome| outcome.changes)
    }
}
