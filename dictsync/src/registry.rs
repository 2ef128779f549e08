//! Lookup of known languages by id and by culture name.

use std::collections::HashMap;

use crate::{
    error::Error,
    types::{Language, LanguageId},
};

/// Read-only set of languages, in the order the storage collaborator listed them.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: Vec<Language>,
    by_id: HashMap<LanguageId, usize>,
    by_culture: HashMap<String, usize>,
}

impl LanguageRegistry {
    /// Builds a registry, rejecting duplicate ids or culture names.
    pub fn new(languages: Vec<Language>) -> Result<Self, Error> {
        let mut by_id = HashMap::with_capacity(languages.len());
        let mut by_culture = HashMap::with_capacity(languages.len());

        for (index, language) in languages.iter().enumerate() {
            if by_id.insert(language.id, index).is_some() {
                return Err(Error::invalid_data(format!(
                    "duplicate language id {}",
                    language.id
                )));
            }
            if by_culture
                .insert(language.culture_name.clone(), index)
                .is_some()
            {
                return Err(Error::invalid_data(format!(
                    "duplicate culture name `{}`",
                    language.culture_name
                )));
            }
        }

        Ok(Self {
            languages,
            by_id,
            by_culture,
        })
    }

    pub fn by_id(&self, id: LanguageId) -> Option<&Language> {
        self.by_id.get(&id).map(|&i| &self.languages[i])
    }

    /// Exact, case-sensitive match on the culture name.
    pub fn by_culture_name(&self, culture_name: &str) -> Option<&Language> {
        self.by_culture.get(culture_name).map(|&i| &self.languages[i])
    }

    /// Resolves the requested ids in the caller's order, dropping unknown ones.
    pub fn resolve(&self, ids: &[LanguageId]) -> Vec<&Language> {
        ids.iter().filter_map(|id| self.by_id(*id)).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Language> {
        self.languages.iter()
    }

    pub fn ids(&self) -> Vec<LanguageId> {
        self.languages.iter().map(|l| l.id).collect()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
