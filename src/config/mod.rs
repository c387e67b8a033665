//! Project configuration management for `japack.toml`.
//!
//! # Sections
//!
//! | Section        | Purpose                                         |
//! |----------------|-------------------------------------------------|
//! | `[site]`       | Site metadata (name, url, issue tracker)        |
//! | `[build]`      | Directory layout (source, downloads, data, html)|
//! | `[[versions]]` | Supported Minecraft versions and pack formats   |
//!
//! # Example
//!
//! ```toml
//! [site]
//! name = "Minecraft MOD日本語化パック配布サイト"
//! url = "https://ykpiece.github.io/minecraft-ja-packs/"
//!
//! [build]
//! source = "data/source"
//! downloads = "downloads"
//!
//! [[versions]]
//! id = "1.20.1"
//! pack_format = 15
//! ```

pub mod defaults;
mod error;

use error::ConfigError;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing japack.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PacksConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site metadata used in generated packs and patched pages
    #[serde(default)]
    pub site: SiteConfig,

    /// Directory layout
    #[serde(default)]
    pub build: BuildConfig,

    /// Supported versions, in display order
    #[serde(default = "defaults::versions")]
    pub versions: Vec<VersionSpec>,
}

/// Site metadata embedded into readmes and the patched front page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    #[serde(default = "defaults::site::name")]
    pub name: String,

    #[serde(default = "defaults::site::url")]
    pub url: String,

    #[serde(default = "defaults::site::issues_url")]
    pub issues_url: String,
}

/// Directory layout, all paths relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (set from CLI, not from the config file)
    #[serde(default = "defaults::build::root")]
    pub root: Option<PathBuf>,

    /// Per-version localization sources live under `<source>/<version>/`
    #[serde(default = "defaults::build::source")]
    pub source: PathBuf,

    /// Built archives land under `<downloads>/<version>/`
    #[serde(default = "defaults::build::downloads")]
    pub downloads: PathBuf,

    /// Holds `packs.json` and the optional `mod-names.json`
    #[serde(default = "defaults::build::data")]
    pub data: PathBuf,

    /// Static front page whose metadata gets patched
    #[serde(default = "defaults::build::html")]
    pub html: PathBuf,
}

/// One supported Minecraft version and its resource pack format number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionSpec {
    pub id: String,
    pub pack_format: u32,
}

impl Default for PacksConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            site: SiteConfig::default(),
            build: BuildConfig::default(),
            versions: defaults::versions(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: defaults::site::name(),
            url: defaults::site::url(),
            issues_url: defaults::site::issues_url(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: defaults::build::root(),
            source: defaults::build::source(),
            downloads: defaults::build::downloads(),
            data: defaults::build::data(),
            html: defaults::build::html(),
        }
    }
}

impl PacksConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: PacksConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Anchor all configured paths at `root` and normalize them to absolute
    pub fn resolve_paths(&mut self, root: &Path) {
        let root = Self::normalize_path(root);

        self.build.source = Self::normalize_path(&root.join(&self.build.source));
        self.build.downloads = Self::normalize_path(&root.join(&self.build.downloads));
        self.build.data = Self::normalize_path(&root.join(&self.build.data));
        self.build.html = Self::normalize_path(&root.join(&self.build.html));
        self.config_path = Self::normalize_path(&root.join(&self.config_path));

        self.build.root = Some(root);
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration, optionally against a version requested on the CLI
    pub fn validate(&self, target: Option<&str>) -> Result<()> {
        if self.versions.is_empty() {
            bail!(ConfigError::Validation(
                "at least one [[versions]] entry is required".into()
            ));
        }

        let mut seen = HashSet::new();
        for spec in &self.versions {
            if spec.pack_format == 0 {
                bail!(ConfigError::Validation(format!(
                    "version `{}` has pack_format 0",
                    spec.id
                )));
            }
            if !seen.insert(spec.id.as_str()) {
                bail!(ConfigError::Validation(format!(
                    "version `{}` is configured twice",
                    spec.id
                )));
            }
        }

        // An unconfigured version must never be processed
        if let Some(target) = target
            && !seen.contains(target)
        {
            bail!(ConfigError::Validation(format!(
                "version `{target}` is not configured in [[versions]]"
            )));
        }

        Ok(())
    }

    /// Pack format number for a configured version
    pub fn pack_format(&self, version: &str) -> Option<u32> {
        self.versions
            .iter()
            .find(|v| v.id == version)
            .map(|v| v.pack_format)
    }

    /// Localization source directory for one version
    pub fn source_dir(&self, version: &str) -> PathBuf {
        self.build.source.join(version)
    }

    /// Built archive directory for one version
    pub fn downloads_dir(&self, version: &str) -> PathBuf {
        self.build.downloads.join(version)
    }

    /// Path of the generated catalog file
    pub fn catalog_path(&self) -> PathBuf {
        self.build.data.join("packs.json")
    }

    /// Path of the optional curated name mapping
    pub fn mod_names_path(&self) -> PathBuf {
        self.build.data.join("mod-names.json")
    }
}

// ============================================================================
// Tests
// ============================================================================
