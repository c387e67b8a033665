//! Catalog construction and `packs.json` output.
//!
//! The catalog is rebuilt from disk state on every run; nothing is carried
//! over from a previous file.

use super::names::ModNames;
use crate::{
    config::PacksConfig,
    log,
    utils::files::{format_size, list_files_with_ext},
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{collections::BTreeMap, fs, path::Path, time::SystemTime};

/// One pack as presented by the site front-end (camelCase JSON).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub mod_name: String,
    pub display_name: String,
    pub mod_loader: String,
    pub mc_version: String,
    pub file_name: String,
    pub download_url: String,
    pub file_size: String,
    pub file_size_bytes: u64,
    pub last_update: String,
}

/// Aggregate statistics placed in front of the entry list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMeta {
    pub last_update: String,
    pub total_packs: usize,
    pub versions: Vec<String>,
    pub version_stats: BTreeMap<String, usize>,
    pub generated_by: String,
}

/// The full `packs.json` document.
#[derive(Debug, Serialize)]
pub struct Catalog {
    pub meta: CatalogMeta,
    pub packs: Vec<CatalogEntry>,
}

impl Catalog {
    /// Scan every configured version's downloads directory and rebuild the
    /// catalog from scratch.
    pub fn scan(config: &PacksConfig, names: &ModNames) -> Result<Self> {
        let mut packs = Vec::new();

        for spec in &config.versions {
            let dir = config.downloads_dir(&spec.id);
            if !dir.exists() {
                log!("warn"; "downloads directory not found for {}: {}", spec.id, dir.display());
                continue;
            }

            let files = list_files_with_ext(&dir, "zip");
            if files.is_empty() {
                log!("warn"; "no packs under {}", dir.display());
                continue;
            }

            for file in &files {
                packs.push(scan_entry(config, names, &spec.id, file)?);
            }
            log!("index"; "{}: {} pack(s)", spec.id, files.len());
        }

        // Deterministic display-name order; a full Japanese collation is out
        // of scope, case folding keeps mixed-case names grouped sensibly
        packs.sort_by_cached_key(|entry| {
            (entry.display_name.to_lowercase(), entry.display_name.clone())
        });

        let mut version_stats = BTreeMap::new();
        for spec in &config.versions {
            let count = packs.iter().filter(|p| p.mc_version == spec.id).count();
            version_stats.insert(spec.id.clone(), count);
        }

        Ok(Self {
            meta: CatalogMeta {
                last_update: date_string(SystemTime::now()),
                total_packs: packs.len(),
                versions: config.versions.iter().map(|v| v.id.clone()).collect(),
                version_stats,
                generated_by: "japack index".into(),
            },
            packs,
        })
    }

    pub fn total(&self) -> usize {
        self.meta.total_packs
    }

    /// Per-version counts, in key order.
    pub fn version_stats(&self) -> impl Iterator<Item = (&str, usize)> {
        self.meta
            .version_stats
            .iter()
            .map(|(version, count)| (version.as_str(), *count))
    }

    /// Write the catalog as pretty-printed JSON, via temp file + rename so
    /// site readers never observe a half-written document.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move catalog into place: {}", path.display()))?;

        Ok(())
    }
}

/// Build the catalog entry for one archive on disk.
fn scan_entry(
    config: &PacksConfig,
    names: &ModNames,
    version: &str,
    path: &Path,
) -> Result<CatalogEntry> {
    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();

    let suffix = format!("-ja-{version}.zip");
    let mod_id = file_name
        .strip_suffix(&suffix)
        .unwrap_or(&file_name)
        .to_owned();

    let meta = path
        .metadata()
        .with_context(|| format!("Failed to stat {}", path.display()))?;

    // The source file's mtime is the real "last update"; the archive's own
    // mtime only moves on rebuild
    let source = config.source_dir(version).join(format!("{mod_id} ja_jp.json"));
    let updated = fs::metadata(&source)
        .and_then(|m| m.modified())
        .or_else(|_| meta.modified())?;

    Ok(CatalogEntry {
        id: format!("{}-{}", mod_id, version.replace('.', "")),
        display_name: names.display_name(&mod_id),
        mod_loader: names.mod_loader(&mod_id),
        mod_name: mod_id,
        mc_version: version.to_owned(),
        download_url: format!("downloads/{version}/{file_name}"),
        file_size: format_size(meta.len()),
        file_size_bytes: meta.len(),
        last_update: date_string(updated),
        file_name,
    })
}

/// `YYYY-MM-DD` in UTC.
fn date_string(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format("%Y-%m-%d").to_string()
}

// ============================================================================
// Tests
// ============================================================================
