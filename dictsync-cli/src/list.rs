use dictsync::DictionaryStore;

use crate::view::{render_languages, render_overview};

/// Run the list command: the whole dictionary in walk order.
pub fn run_list_command<S: DictionaryStore>(store: &S, json: bool, full: bool) -> Result<String, String> {
    let registry = store.languages().map_err(|e| e.to_string())?;
    let tree = store.load_tree().map_err(|e| e.to_string())?;
    let overview = tree.overview(&registry);

    if json {
        serde_json::to_string_pretty(&overview)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| format!("Error serializing to JSON: {}", e))
    } else {
        Ok(render_overview(&overview, &registry, full))
    }
}

/// Run the languages command.
pub fn run_languages_command<S: DictionaryStore>(store: &S) -> Result<String, String> {
    let registry = store.languages().map_err(|e| e.to_string())?;
    Ok(render_languages(&registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dictsync::{DictionaryItem, Language, LanguageId, MemoryStore};

    fn store() -> MemoryStore {
        MemoryStore::new(
            vec![Language::new(1, "en-US")],
            vec![
                DictionaryItem::new(2, "b.child")
                    .with_parent("b")
                    .with_translation(LanguageId(1), "Child"),
                DictionaryItem::new(1, "b"),
                DictionaryItem::new(3, "a"),
            ],
        )
    }

    #[test]
    fn test_list_json_uses_walk_order() {
        let text = run_list_command(&store(), true, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let entries = value.as_array().unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e["key"].as_str().unwrap()).collect();
        assert_eq!(keys, vec!["a", "b", "b.child"]);
        assert_eq!(entries[2]["level"], 1);
        assert_eq!(entries[2]["translations"]["en-US"], "Child");
    }

    #[test]
    fn test_list_table() {
        let text = run_list_command(&store(), false, false).unwrap();
        assert!(text.contains("  b.child  Child"));
    }

    #[test]
    fn test_languages() {
        assert_eq!(run_languages_command(&store()).unwrap(), "ID  CULTURE\n1   en-US\n");
    }
}
