//! Plain-text rendering of change sets, dictionary listings and languages.

use dictsync::{ChangeSet, LanguageRegistry, OverviewEntry};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Values wider than this are cut unless `full` output is requested.
const MAX_VALUE_WIDTH: usize = 40;

/// Makes a value fit on one line: newlines and tabs are shown escaped and
/// the result is cut at [`MAX_VALUE_WIDTH`] columns unless `full` is set.
pub fn display_value(value: &str, full: bool) -> String {
    let flat = value.replace('\r', "\\r").replace('\n', "\\n").replace('\t', "\\t");
    if full || flat.width() <= MAX_VALUE_WIDTH {
        return flat;
    }

    let mut out = String::new();
    let mut width = 0;
    for c in flat.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > MAX_VALUE_WIDTH - 3 {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Left-aligns `text` in a column `width` terminal cells wide.
pub fn pad(text: &str, width: usize) -> String {
    let used = text.width();
    let mut out = String::with_capacity(text.len() + width.saturating_sub(used));
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let last = cells.len().saturating_sub(1);
        let mut out = String::new();
        for (i, cell) in cells.into_iter().enumerate() {
            if i == last {
                out.push_str(cell);
            } else {
                out.push_str(&pad(cell, widths[i]));
                out.push_str("  ");
            }
        }
        out.trim_end().to_string()
    };

    let mut out = line(headers.to_vec());
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

/// Table of proposed or applied changes.
pub fn render_changes(changes: &ChangeSet, full: bool) -> String {
    if changes.is_empty() {
        return "No changes.\n".to_string();
    }
    let rows: Vec<Vec<String>> = changes
        .iter()
        .map(|record| {
            vec![
                record.item_key.clone(),
                record.culture_name.clone(),
                display_value(&record.old_value, full),
                display_value(&record.new_value, full),
            ]
        })
        .collect();
    render_table(&["KEY", "LANGUAGE", "OLD", "NEW"], &rows)
}

/// One-line summary of a saved change set.
pub fn saved_summary(changes: &ChangeSet) -> String {
    format!(
        "Saved {} change(s) to {} item(s)",
        changes.len(),
        changes.item_keys().len()
    )
}

/// Depth-indented listing with one column per culture.
pub fn render_overview(entries: &[OverviewEntry], registry: &LanguageRegistry, full: bool) -> String {
    let cultures: Vec<&str> = registry.iter().map(|l| l.culture_name.as_str()).collect();
    let mut headers = vec!["KEY"];
    headers.extend(cultures.iter().copied());

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            let mut row = vec![format!("{}{}", "  ".repeat(entry.level), entry.key)];
            row.extend(cultures.iter().map(|culture| {
                entry
                    .translations
                    .get(*culture)
                    .map(|value| display_value(value, full))
                    .unwrap_or_default()
            }));
            row
        })
        .collect();
    render_table(&headers, &rows)
}

pub fn render_languages(registry: &LanguageRegistry) -> String {
    let rows: Vec<Vec<String>> = registry
        .iter()
        .map(|l| vec![l.id.to_string(), l.culture_name.clone()])
        .collect();
    render_table(&["ID", "CULTURE"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dictsync::{ChangeRecord, DictionaryItem, DictionaryTree, Language, LanguageId};

    #[test]
    fn test_display_value_escapes_and_truncates() {
        assert_eq!(display_value("a\nb\tc", false), "a\\nb\\tc");
        let long = "x".repeat(60);
        let shown = display_value(&long, false);
        assert_eq!(shown.width(), MAX_VALUE_WIDTH);
        assert!(shown.ends_with("..."));
        assert_eq!(display_value(&long, true), long);
    }

    #[test]
    fn test_truncation_counts_wide_characters() {
        let wide = "字".repeat(30);
        let shown = display_value(&wide, false);
        assert!(shown.width() <= MAX_VALUE_WIDTH);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn test_pad_uses_display_width() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("字", 4), "字  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }

    #[test]
    fn test_render_changes() {
        let changes = ChangeSet::from(vec![ChangeRecord {
            item_key: "greeting".to_string(),
            culture_name: "fr-FR".to_string(),
            old_value: String::new(),
            new_value: "Bonjour".to_string(),
        }]);
        let text = render_changes(&changes, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "KEY       LANGUAGE  OLD  NEW");
        assert_eq!(lines[1], "greeting  fr-FR          Bonjour");
        assert_eq!(render_changes(&ChangeSet::new(), false), "No changes.\n");
    }

    #[test]
    fn test_saved_summary_counts_items_once() {
        let record = |key: &str, culture: &str| ChangeRecord {
            item_key: key.to_string(),
            culture_name: culture.to_string(),
            old_value: String::new(),
            new_value: "x".to_string(),
        };
        let changes = ChangeSet::from(vec![
            record("greeting", "en-US"),
            record("farewell", "en-US"),
            record("greeting", "fr-FR"),
        ]);
        assert_eq!(saved_summary(&changes), "Saved 3 change(s) to 2 item(s)");
    }

    #[test]
    fn test_render_overview_indents_by_level() {
        let registry = LanguageRegistry::new(vec![Language::new(1, "en")]).unwrap();
        let tree = DictionaryTree::from_items(vec![
            DictionaryItem::new(1, "menu").with_translation(LanguageId(1), "Menu"),
            DictionaryItem::new(2, "menu.open")
                .with_parent("menu")
                .with_translation(LanguageId(1), "Open"),
        ])
        .unwrap();
        let text = render_overview(&tree.overview(&registry), &registry, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "KEY          en");
        assert_eq!(lines[1], "menu         Menu");
        assert_eq!(lines[2], "  menu.open  Open");
    }

    #[test]
    fn test_render_languages() {
        let registry =
            LanguageRegistry::new(vec![Language::new(1, "en-US"), Language::new(12, "fr-FR")])
                .unwrap();
        assert_eq!(
            render_languages(&registry),
            "ID  CULTURE\n1   en-US\n12  fr-FR\n"
        );
    }
}
