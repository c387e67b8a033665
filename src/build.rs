//! Pack build orchestration.
//!
//! # Pipeline
//!
//! ```text
//! build_packs()
//!     │
//!     └── build_version()          one version at a time
//!             │
//!             ├── extract_mod_id() file name → identifier
//!             ├── is_up_to_date()  skip unchanged packs unless --force
//!             └── build_one()      validate JSON → assemble archive
//! ```
//!
//! Every stage reports per-file failures and keeps going; the batch itself
//! never aborts. Each version produces its own [`BuildStats`] value which the
//! caller folds into the run total.

use crate::{
    config::{PacksConfig, VersionSpec},
    log, pack,
    utils::files::{format_size, is_up_to_date, list_files_with_ext},
};
use anyhow::{Context, Result};
use regex::Regex;
use std::{fs, path::Path, sync::LazyLock};

/// One failed pack with enough context for the closing summary.
#[derive(Debug)]
pub struct BuildFailure {
    pub version: String,
    pub file: String,
    pub reason: String,
}

/// Outcome counters for a build scope (one version, or the whole run).
#[derive(Debug, Default)]
pub struct BuildStats {
    pub built: usize,
    pub skipped: usize,
    pub failures: Vec<BuildFailure>,
}

impl BuildStats {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Fold another scope's counters into this one.
    fn absorb(&mut self, other: BuildStats) {
        self.built += other.built;
        self.skipped += other.skipped;
        self.failures.extend(other.failures);
    }

    /// Print the end-of-run summary, including itemized failures.
    pub fn log_summary(&self) {
        log!("build"; "done: {} built, {} skipped", self.built, self.skipped);

        if !self.failures.is_empty() {
            log!("error"; "{} pack(s) failed:", self.failed());
            for failure in &self.failures {
                log!("error"; "  {}/{}: {}", failure.version, failure.file, failure.reason);
            }
        }
    }
}

/// Build packs for the requested version, or for all configured versions.
///
/// Config validation has already rejected unconfigured targets, so an empty
/// selection cannot happen here.
pub fn build_packs(config: &PacksConfig, target: Option<&str>, force: bool) -> Result<BuildStats> {
    if force {
        log!("build"; "force rebuild requested");
    }

    let mut total = BuildStats::default();
    for spec in &config.versions {
        if let Some(target) = target
            && spec.id != target
        {
            continue;
        }
        total.absorb(build_version(config, spec, force)?);
    }

    Ok(total)
}

/// Build every recognized localization file for one version.
fn build_version(config: &PacksConfig, spec: &VersionSpec, force: bool) -> Result<BuildStats> {
    log!("build"; "processing {}", spec.id);

    let mut stats = BuildStats::default();
    let source_dir = config.source_dir(&spec.id);
    let output_dir = config.downloads_dir(&spec.id);

    if !source_dir.exists() {
        log!("warn"; "source directory not found: {}, skipping {}", source_dir.display(), spec.id);
        return Ok(stats);
    }

    let files = list_files_with_ext(&source_dir, "json");
    if files.is_empty() {
        log!("warn"; "no .json files under {}, skipping {}", source_dir.display(), spec.id);
        return Ok(stats);
    }

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    log!("build"; "{}: {} mod(s) to process", spec.id, files.len());

    for source in &files {
        let file_name = source
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();

        let Some(mod_id) = extract_mod_id(&file_name) else {
            log!("error"; "{}: could not extract a mod id", file_name);
            stats.failures.push(BuildFailure {
                version: spec.id.clone(),
                file: file_name,
                reason: "identifier extraction failed".into(),
            });
            continue;
        };

        let artifact = output_dir.join(pack::artifact_name(&mod_id, &spec.id));

        if !force && is_up_to_date(source, &artifact) {
            stats.skipped += 1;
            continue;
        }

        match build_one(source, &artifact, &mod_id, spec, config) {
            Ok(size) => {
                log!("build"; "{} ({})", mod_id, format_size(size));
                stats.built += 1;
            }
            Err(err) => {
                log!("error"; "{}: {:#}", mod_id, err);
                stats.failures.push(BuildFailure {
                    version: spec.id.clone(),
                    file: file_name,
                    reason: format!("{err:#}"),
                });
            }
        }
    }

    log!(
        "build";
        "{}: {} built | {} skipped | {} failed",
        spec.id, stats.built, stats.skipped, stats.failed()
    );

    Ok(stats)
}

/// Validate one source file and assemble its archive. Returns the archive size.
fn build_one(
    source: &Path,
    artifact: &Path,
    mod_id: &str,
    spec: &VersionSpec,
    config: &PacksConfig,
) -> Result<u64> {
    let lang_json = fs::read_to_string(source)
        .with_context(|| format!("Failed to read {}", source.display()))?;

    serde_json::from_str::<serde_json::Value>(&lang_json).context("invalid JSON")?;

    pack::write_pack(
        artifact,
        mod_id,
        &spec.id,
        spec.pack_format,
        &lang_json,
        &config.site,
    )?;

    Ok(artifact.metadata()?.len())
}

/// Derive the mod identifier from a localization file name.
///
/// Strips a trailing ` ja_jp.json` suffix (case-insensitive), trims and
/// lowercases. `"Example Mod ja_jp.json"` → `"example mod"`. Returns `None`
/// when nothing is left.
fn extract_mod_id(file_name: &str) -> Option<String> {
    static RE_LANG_SUFFIX: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)\s+ja_jp\.json$").unwrap());

    let mod_id = RE_LANG_SUFFIX
        .replace(file_name, "")
        .trim()
        .to_lowercase();

    if mod_id.is_empty() { None } else { Some(mod_id) }
}

// ============================================================================
// Tests
// ============================================================================
