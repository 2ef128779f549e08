use chrono::NaiveDate;
use dictsync::{
    DictionaryItem, DictionaryTree, ExportOptions, ImportOptions, Language, LanguageId,
    LanguageRegistry, TextEncoding, export_csv, import_csv,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z][a-zA-Z0-9_.]{0,12}").expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,;!\\?\"\\n]{0,20}").expect("valid value regex")
}

/// Items with unique keys; each item after the first may hang below an earlier one.
fn tree_strategy() -> impl Strategy<Value = Vec<DictionaryItem>> {
    prop::collection::btree_map(
        key_strategy(),
        (any::<prop::sample::Index>(), any::<bool>(), value_strategy(), value_strategy()),
        0..24,
    )
    .prop_map(|entries: BTreeMap<String, (prop::sample::Index, bool, String, String)>| {
        let mut items: Vec<DictionaryItem> = Vec::new();
        for (i, (key, (parent, nested, en, fr))) in entries.into_iter().enumerate() {
            let mut item = DictionaryItem::new(i as u64, key)
                .with_translation(LanguageId(1), en)
                .with_translation(LanguageId(2), fr);
            if nested && !items.is_empty() {
                item.parent_key = Some(items[parent.index(items.len())].key.clone());
            }
            items.push(item);
        }
        items
    })
}

fn registry() -> LanguageRegistry {
    LanguageRegistry::new(vec![Language::new(1, "en-US"), Language::new(2, "fr-FR")]).unwrap()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
}

proptest! {
    #[test]
    fn prop_export_has_one_row_per_item_plus_header(
        items in tree_strategy(),
        ids in prop::collection::vec(0u32..5, 0..4),
    ) {
        let tree = DictionaryTree::from_items(items).unwrap();
        let ids: Vec<LanguageId> = ids.into_iter().map(LanguageId).collect();
        let output = export_csv(&tree, &registry(), &ids, &ExportOptions::default(), date()).unwrap();
        prop_assert_eq!(output.rows, tree.len() + 1);

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(output.bytes.as_slice());
        prop_assert_eq!(rdr.records().count(), tree.len() + 1);
    }

    #[test]
    fn prop_unknown_ids_do_not_change_export(
        items in tree_strategy(),
        unknown in prop::collection::vec(3u32..50, 1..4),
    ) {
        let tree = DictionaryTree::from_items(items).unwrap();
        let mut mixed: Vec<LanguageId> = unknown.into_iter().map(LanguageId).collect();
        mixed.insert(mixed.len() / 2, LanguageId(2));
        mixed.push(LanguageId(1));

        let options = ExportOptions::default();
        let with_unknown = export_csv(&tree, &registry(), &mixed, &options, date()).unwrap();
        let valid_only =
            export_csv(&tree, &registry(), &[LanguageId(2), LanguageId(1)], &options, date()).unwrap();
        prop_assert_eq!(with_unknown.bytes, valid_only.bytes);
    }

    #[test]
    fn prop_reimporting_an_export_changes_nothing(items in tree_strategy()) {
        let registry = registry();
        let mut tree = DictionaryTree::from_items(items).unwrap();
        let before = tree.items().to_vec();
        let output = export_csv(&tree, &registry, &registry.ids(), &ExportOptions::default(), date()).unwrap();

        let options = ImportOptions::new()
            .with_encoding(TextEncoding::Utf8)
            .with_override(true);
        let outcome = import_csv(&output.bytes, &options, &mut tree, &registry).unwrap();
        prop_assert!(outcome.changes.is_empty(), "unexpected changes: {:?}", outcome.changes);
        prop_assert_eq!(tree.items(), before.as_slice());
    }
}
