//! Catalog generation for the distribution site.
//!
//! Scans all built archives, rebuilds `data/packs.json` from disk state and
//! patches the pack count into the front page's metadata.
//!
//! ```text
//! generate_index()
//!     │
//!     ├── ModNames::load()          data/mod-names.json (optional)
//!     ├── Catalog::scan()           downloads/<version>/*.zip → entries
//!     ├── Catalog::write()          data/packs.json
//!     └── patch_site_metadata()     index.html
//! ```

mod catalog;
mod html;
mod names;

pub use catalog::{Catalog, CatalogEntry};

use crate::{config::PacksConfig, log};
use anyhow::Result;
use html::patch_site_metadata;
use names::ModNames;

/// Regenerate the full catalog and the patched site metadata.
pub fn generate_index(config: &PacksConfig) -> Result<()> {
    log!("index"; "generating pack catalog...");

    let names = ModNames::load(&config.mod_names_path());
    let catalog = Catalog::scan(config, &names)?;
    catalog.write(&config.catalog_path())?;

    log!("index"; "{} pack(s) catalogued -> {}", catalog.total(), config.catalog_path().display());
    for (version, count) in catalog.version_stats() {
        log!("index"; "  {}: {}", version, count);
    }

    patch_site_metadata(&config.build.html, catalog.total(), &config.site)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build_packs;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_index_end_to_end() {
        let root = TempDir::new().unwrap();
        let mut config = PacksConfig::default();
        config.resolve_paths(root.path());

        let source_dir = config.source_dir("1.20.1");
        fs::create_dir_all(&source_dir).unwrap();
        fs::write(source_dir.join("jei ja_jp.json"), "{}").unwrap();
        build_packs(&config, None, true).unwrap();

        fs::write(
            &config.build.html,
            r#"<title>x</title><meta name="description" content="x">"#,
        )
        .unwrap();

        generate_index(&config).unwrap();

        let catalog: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(config.catalog_path()).unwrap()).unwrap();
        assert_eq!(catalog["meta"]["totalPacks"], 1);
        assert_eq!(catalog["packs"][0]["displayName"], "JEI");

        let html = fs::read_to_string(&config.build.html).unwrap();
        assert!(html.contains("1個のパックを無料配布"));
    }
}
