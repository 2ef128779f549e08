//! Flattens a dictionary tree into a multi-language CSV.
//!
//! The header row starts with an empty cell followed by one culture name per
//! selected language. Every item in the tree becomes one row, in walker
//! order, with its key in the first cell.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
    error::Error,
    options::ExportOptions,
    registry::LanguageRegistry,
    tree::DictionaryTree,
    types::LanguageId,
};

/// Result of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutput {
    /// `translations-YYYY-MM-DD.csv`
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Number of CSV rows written, header included.
    pub rows: usize,
}

/// Name of an export file produced on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("translations-{}.csv", date.format("%Y-%m-%d"))
}

/// Writes the CSV text for `tree` restricted to `language_ids`.
///
/// Ids missing from `registry` are dropped from both the header and the
/// rows; the remaining ones keep the caller's order. Returns the text and
/// the number of rows.
pub fn write_csv(
    tree: &DictionaryTree,
    registry: &LanguageRegistry,
    language_ids: &[LanguageId],
    options: &ExportOptions,
) -> Result<(String, usize), Error> {
    let columns = registry.resolve(language_ids);
    if columns.len() < language_ids.len() {
        debug!(
            requested = language_ids.len(),
            resolved = columns.len(),
            "dropped unknown language ids from export"
        );
    }

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(options.delimiter.as_byte())
        .flexible(false)
        .from_writer(Vec::new());

    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push("");
    header.extend(columns.iter().map(|l| l.culture_name.as_str()));
    wtr.write_record(&header)?;
    let mut rows = 1;

    for (item, _depth) in tree.walk() {
        let mut row = Vec::with_capacity(columns.len() + 1);
        row.push(item.key.as_str());
        for language in &columns {
            row.push(item.translation(language.id).unwrap_or(""));
        }
        wtr.write_record(&row)?;
        rows += 1;
    }

    wtr.flush()?;
    let buffer = wtr
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    let text = String::from_utf8(buffer)
        .map_err(|e| Error::invalid_data(format!("CSV writer produced invalid UTF-8: {}", e)))?;
    Ok((text, rows))
}

/// Exports `tree` to encoded CSV bytes.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use dictsync::{DictionaryItem, DictionaryTree, ExportOptions, Language, LanguageId, LanguageRegistry};
/// use dictsync::export::export_csv;
///
/// let registry = LanguageRegistry::new(vec![Language::new(1, "English"), Language::new(2, "French")])?;
/// let tree = DictionaryTree::from_items(vec![
///     DictionaryItem::new(1, "greeting")
///         .with_translation(LanguageId(1), "Hello")
///         .with_translation(LanguageId(2), ""),
/// ])?;
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
/// let output = export_csv(&tree, &registry, &[LanguageId(1), LanguageId(2)], &ExportOptions::default(), date)?;
/// assert_eq!(output.file_name, "translations-2024-03-09.csv");
/// assert_eq!(String::from_utf8(output.bytes).unwrap(), ",English,French\ngreeting,Hello,\n");
/// # Ok::<(), dictsync::Error>(())
/// ```
pub fn export_csv(
    tree: &DictionaryTree,
    registry: &LanguageRegistry,
    language_ids: &[LanguageId],
    options: &ExportOptions,
    date: NaiveDate,
) -> Result<ExportOutput, Error> {
    let (text, rows) = write_csv(tree, registry, language_ids, options)?;
    let bytes = options.encoding.encode(&text)?;
    let file_name = export_file_name(date);
    info!(
        file = %file_name,
        rows,
        encoding = %options.encoding,
        delimiter = %options.delimiter,
        "exported dictionary"
    );
    Ok(ExportOutput {
        file_name,
        bytes,
        rows,
    })
}
