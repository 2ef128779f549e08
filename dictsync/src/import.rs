//! Parses a user-supplied CSV back into translation changes.
//!
//! The first row is the header: cell 0 is ignored and every following cell
//! names a culture. Each data row carries an item key in cell 0 and one
//! value per header column. Unknown keys, unknown cultures, blank keys and
//! blank values are skipped without error.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::Error,
    options::ImportOptions,
    registry::LanguageRegistry,
    resolver::{ConflictPolicy, Resolution},
    tree::DictionaryTree,
    types::{ChangeRecord, ChangeSet, LanguageId},
};

/// One header cell after column 0.
///
/// Columns whose culture name is unknown keep their position with
/// `language: None`, so later columns stay aligned with the data rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderColumn {
    pub index: usize,
    pub language: Option<LanguageId>,
}

/// Counters describing what an import pass skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub data_rows: usize,
    pub blank_keys: usize,
    pub unknown_keys: usize,
    pub unknown_columns: usize,
    pub unchanged: usize,
    pub kept: usize,
}

/// Result of an import pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub changes: ChangeSet,
    /// Keys of the items that received at least one change, in discovery order.
    pub touched: Vec<String>,
    pub stats: ImportStats,
}

/// Decodes `bytes` and parses every CSV record up front.
///
/// Rows may have any number of fields. Any decoding or CSV syntax error is
/// returned before the caller gets a chance to mutate anything.
pub fn read_records(bytes: &[u8], options: &ImportOptions) -> Result<Vec<csv::StringRecord>, Error> {
    let text = options.encoding.decode(bytes)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter.as_byte())
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }
    Ok(records)
}

/// Maps header cells (from index 1 until the row ends) to known languages.
pub fn parse_header(header: &csv::StringRecord, registry: &LanguageRegistry) -> Vec<HeaderColumn> {
    header
        .iter()
        .enumerate()
        .skip(1)
        .map(|(index, culture_name)| HeaderColumn {
            index,
            language: registry.by_culture_name(culture_name).map(|l| l.id),
        })
        .collect()
}

/// Applies already parsed records to `tree`, returning the changes made.
///
/// Accepted values are written into the in-memory tree right away, so a
/// preview leaves the tree consistent with the returned change set.
pub fn apply_records(
    records: &[csv::StringRecord],
    policy: ConflictPolicy,
    tree: &mut DictionaryTree,
    registry: &LanguageRegistry,
) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();
    let Some((header, rows)) = records.split_first() else {
        debug!("empty CSV, nothing to import");
        return outcome;
    };

    let columns = parse_header(header, registry);
    outcome.stats.unknown_columns = columns.iter().filter(|c| c.language.is_none()).count();
    for column in columns.iter().filter(|c| c.language.is_none()) {
        debug!(
            column = column.index,
            culture = header.get(column.index).unwrap_or(""),
            "ignoring unknown culture column"
        );
    }

    // Values as they were before this pass, per (key, language).
    let mut originals: HashMap<(String, LanguageId), String> = HashMap::new();
    let mut touched: HashSet<String> = HashSet::new();

    for row in rows {
        outcome.stats.data_rows += 1;
        let key = row.get(0).unwrap_or("");
        if key.trim().is_empty() {
            outcome.stats.blank_keys += 1;
            continue;
        }
        let Some(item) = tree.get(key) else {
            debug!(key, "skipping unknown dictionary key");
            outcome.stats.unknown_keys += 1;
            continue;
        };
        let key = item.key.clone();

        for column in &columns {
            let Some(language_id) = column.language else {
                continue;
            };
            let incoming = row.get(column.index).unwrap_or("");
            if incoming.trim().is_empty() {
                continue;
            }

            let existing = tree
                .get(&key)
                .and_then(|item| item.translation(language_id))
                .map(str::to_owned);

            let resolution = policy.resolve(existing.as_deref(), incoming);
            if !resolution.is_accepted() {
                match resolution {
                    Resolution::Kept => outcome.stats.kept += 1,
                    _ => outcome.stats.unchanged += 1,
                }
                continue;
            }

            let old_value = originals
                .entry((key.clone(), language_id))
                .or_insert_with(|| existing.unwrap_or_default())
                .clone();
            let culture_name = registry
                .by_id(language_id)
                .map(|l| l.culture_name.clone())
                .unwrap_or_default();

            outcome.changes.push(ChangeRecord {
                item_key: key.clone(),
                culture_name,
                old_value,
                new_value: incoming.to_string(),
            });
            tree.set_translation(&key, language_id, incoming);
            if touched.insert(key.clone()) {
                outcome.touched.push(key.clone());
            }
        }
    }

    outcome
}

/// Parses `bytes` and applies the result to `tree` under `options`.
///
/// Persistence is not handled here; see [`crate::session::ImportSession`].
pub fn import_csv(
    bytes: &[u8],
    options: &ImportOptions,
    tree: &mut DictionaryTree,
    registry: &LanguageRegistry,
) -> Result<ImportOutcome, Error> {
    let records = read_records(bytes, options)?;
    let policy = ConflictPolicy::new(options.override_existing);
    let outcome = apply_records(&records, policy, tree, registry);
    info!(
        rows = outcome.stats.data_rows,
        changes = outcome.changes.len(),
        items = outcome.touched.len(),
        unknown_keys = outcome.stats.unknown_keys,
        kept = outcome.stats.kept,
        "parsed dictionary import"
    );
    Ok(outcome)
}
