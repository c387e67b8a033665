//! Display name and loader resolution for mod identifiers.
//!
//! Curated names come from the optional `data/mod-names.json`; everything
//! else falls back to a capitalization heuristic.

use crate::log;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

/// Loader tag used when the mapping has no entry for a mod
const DEFAULT_LOADER: &str = "Forge";

/// One mapping entry. The legacy format was a bare display-name string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NameEntry {
    Detailed {
        name: String,
        #[serde(default, rename = "modLoader")]
        mod_loader: Option<String>,
    },
    Plain(String),
}

/// Curated modId → name/loader mapping, possibly empty.
#[derive(Debug, Default)]
pub struct ModNames(HashMap<String, NameEntry>);

impl ModNames {
    /// Load the mapping file. A missing or unreadable file yields an empty
    /// mapping; the catalog never fails because of curation data.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let parsed = fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|content| Ok(serde_json::from_str(&content)?));

        match parsed {
            Ok(map) => Self(map),
            Err(err) => {
                log!("warn"; "ignoring {}: {:#}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Curated display name, or the capitalization fallback.
    pub fn display_name(&self, mod_id: &str) -> String {
        match self.0.get(mod_id) {
            Some(NameEntry::Plain(name)) => name.clone(),
            Some(NameEntry::Detailed { name, .. }) => name.clone(),
            None => capitalize(mod_id),
        }
    }

    /// Curated loader tag, or `"Forge"`.
    pub fn mod_loader(&self, mod_id: &str) -> String {
        match self.0.get(mod_id) {
            Some(NameEntry::Detailed {
                mod_loader: Some(loader),
                ..
            }) => loader.clone(),
            _ => DEFAULT_LOADER.into(),
        }
    }
}

/// Fallback display name for unmapped identifiers.
///
/// Mixed-case ids pass through unchanged, short all-lowercase ids are treated
/// as acronyms, everything else gets an initial capital.
fn capitalize(mod_id: &str) -> String {
    if mod_id != mod_id.to_lowercase() {
        return mod_id.to_owned();
    }

    if mod_id.chars().count() <= 3 {
        return mod_id.to_uppercase();
    }

    let mut chars = mod_id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_capitalize_short_id_becomes_acronym() {
        assert_eq!(capitalize("jei"), "JEI");
        assert_eq!(capitalize("ae2"), "AE2");
    }

    #[test]
    fn test_capitalize_long_id_initial_capital() {
        assert_eq!(capitalize("beautify"), "Beautify");
        assert_eq!(capitalize("create"), "Create");
    }

    #[test]
    fn test_capitalize_mixed_case_passes_through() {
        assert_eq!(capitalize("JEIIntegration"), "JEIIntegration");
        assert_eq!(capitalize("McJtyLib"), "McJtyLib");
    }

    #[test]
    fn test_capitalize_empty() {
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_missing_file_is_empty_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let names = ModNames::load(&dir.path().join("mod-names.json"));

        assert_eq!(names.display_name("jei"), "JEI");
        assert_eq!(names.mod_loader("jei"), "Forge");
    }

    #[test]
    fn test_legacy_string_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mod-names.json");
        fs::write(&path, r#"{"jei": "Just Enough Items"}"#).unwrap();

        let names = ModNames::load(&path);
        assert_eq!(names.display_name("jei"), "Just Enough Items");
        assert_eq!(names.mod_loader("jei"), "Forge");
    }

    #[test]
    fn test_detailed_entry_with_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mod-names.json");
        fs::write(
            &path,
            r#"{"sodium": {"name": "Sodium", "modLoader": "Fabric"}}"#,
        )
        .unwrap();

        let names = ModNames::load(&path);
        assert_eq!(names.display_name("sodium"), "Sodium");
        assert_eq!(names.mod_loader("sodium"), "Fabric");
    }

    #[test]
    fn test_detailed_entry_without_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mod-names.json");
        fs::write(&path, r#"{"create": {"name": "Create"}}"#).unwrap();

        let names = ModNames::load(&path);
        assert_eq!(names.display_name("create"), "Create");
        assert_eq!(names.mod_loader("create"), "Forge");
    }

    #[test]
    fn test_broken_mapping_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mod-names.json");
        fs::write(&path, "not json at all").unwrap();

        let names = ModNames::load(&path);
        assert_eq!(names.display_name("beautify"), "Beautify");
    }
}
