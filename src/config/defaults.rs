//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization. The
//! defaults reproduce the canonical site layout, so running without a
//! `japack.toml` at all is fully supported.

use super::VersionSpec;

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn name() -> String {
        "Minecraft MOD日本語化パック配布サイト".into()
    }

    pub fn url() -> String {
        "https://ykpiece.github.io/minecraft-ja-packs/".into()
    }

    pub fn issues_url() -> String {
        "https://github.com/ykpiece/minecraft-ja-packs/issues".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn source() -> PathBuf {
        "data/source".into()
    }

    pub fn downloads() -> PathBuf {
        "downloads".into()
    }

    pub fn data() -> PathBuf {
        "data".into()
    }

    pub fn html() -> PathBuf {
        "index.html".into()
    }
}

// ============================================================================
// [[versions]] Defaults
// ============================================================================

/// The two versions supported out of the box, in display order.
pub fn versions() -> Vec<VersionSpec> {
    vec![
        VersionSpec {
            id: "1.20.1".into(),
            pack_format: 15,
        },
        VersionSpec {
            id: "1.18.2".into(),
            pack_format: 9,
        },
    ]
}
