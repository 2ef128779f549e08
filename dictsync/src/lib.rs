#![forbid(unsafe_code)]
//! Translation exchange engine for hierarchical dictionaries.
//!
//! A dictionary is a tree of items, each identified by a unique key and
//! holding one translated value per language. `dictsync` flattens that tree
//! into a CSV file with one column per language for bulk editing, and reads
//! edited files back as a list of proposed changes that can be previewed
//! before they are saved.
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use dictsync::{
//!     DictionaryItem, ExportOptions, ImportOptions, ImportSession, Language, LanguageId,
//!     MemoryStore, export::export_csv, store::DictionaryStore,
//! };
//!
//! let en = LanguageId(1);
//! let mut store = MemoryStore::new(
//!     vec![Language::new(1, "en-US"), Language::new(2, "fr-FR")],
//!     vec![DictionaryItem::new(1, "greeting").with_translation(en, "Hello")],
//! );
//!
//! // Export every language
//! let registry = store.languages()?;
//! let tree = store.load_tree()?;
//! let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
//! let export = export_csv(&tree, &registry, &registry.ids(), &ExportOptions::default(), date)?;
//! assert_eq!(export.rows, 2);
//!
//! // Import an edited file: preview first, then confirm
//! let edited = b",en-US,fr-FR\ngreeting,Hello,Bonjour\n";
//! let options = ImportOptions::new().with_encoding(dictsync::TextEncoding::Utf8);
//! let changes = ImportSession::new(&mut store).preview(edited, options)?;
//! assert_eq!(changes.len(), 1);
//! ImportSession::new(&mut store).confirm(edited, options)?;
//! # Ok::<(), dictsync::Error>(())
//! ```
//!
//! # Behaviour worth knowing
//!
//! - Siblings are ordered by plain ordinal key comparison, so exports are
//!   reproducible on every machine.
//! - Unknown keys, unknown language columns, blank keys and blank cells are
//!   skipped silently.
//! - An existing non-empty translation is only replaced when override is on;
//!   identical values never produce a change.

pub mod encoding;
pub mod error;
pub mod export;
pub mod import;
pub mod options;
pub mod registry;
pub mod resolver;
pub mod session;
pub mod store;
pub mod tree;
pub mod types;
pub mod upload;
pub mod walker;

// Re-export most used types for easy consumption
pub use crate::{
    encoding::{Delimiter, TextEncoding},
    error::Error,
    export::{ExportOutput, export_csv, export_file_name},
    import::{ImportOutcome, import_csv},
    options::{ExportOptions, ImportOptions},
    registry::LanguageRegistry,
    resolver::{ConflictPolicy, Resolution},
    session::ImportSession,
    store::{DictionaryDocument, DictionaryStore, JsonFileStore, MemoryStore},
    tree::DictionaryTree,
    types::{
        ChangeRecord, ChangeSet, DictionaryItem, ItemId, Language, LanguageId, OverviewEntry,
    },
    upload::StagedUpload,
    walker::TreeWalker,
};
