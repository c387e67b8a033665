//! Site metadata patching for the static front page.
//!
//! Four fixed fields are replaced by exact-pattern match: the page title, the
//! description meta tag and both social-preview descriptions. The rest of the
//! document is left untouched.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use std::{fs, path::Path, sync::LazyLock};

static RE_TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<title>[^<]*</title>").unwrap());
static RE_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<meta name="description" content="[^"]*""#).unwrap());
static RE_OG_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<meta property="og:description" content="[^"]*""#).unwrap());
static RE_TW_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<meta name="twitter:description" content="[^"]*""#).unwrap());

/// Patch the front page's metadata with the current pack count.
///
/// A missing page is a warning, not an error: the catalog is still valid
/// without the static site checked out next to it.
pub fn patch_site_metadata(path: &Path, total_packs: usize, site: &SiteConfig) -> Result<()> {
    if !path.exists() {
        log!("warn"; "{} not found, skipping site metadata patch", path.display());
        return Ok(());
    }

    let html = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let patched = apply_patches(&html, total_packs, site);

    if patched != html {
        fs::write(path, patched)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log!("index"; "site metadata updated ({} packs)", total_packs);
    }

    Ok(())
}

fn apply_patches(html: &str, total_packs: usize, site: &SiteConfig) -> String {
    let title = format!("{}｜{}個のパックを無料配布", site.name, total_packs);
    let description = format!(
        "MinecraftのMOD日本語化リソースパックを{total_packs}個配布中。zipを入れるだけで、人気MODのUIやアイテム名が日本語になります。"
    );

    let swaps = [
        (&RE_TITLE, format!("<title>{title}</title>")),
        (
            &RE_DESCRIPTION,
            format!(r#"<meta name="description" content="{description}""#),
        ),
        (
            &RE_OG_DESCRIPTION,
            format!(r#"<meta property="og:description" content="{description}""#),
        ),
        (
            &RE_TW_DESCRIPTION,
            format!(r#"<meta name="twitter:description" content="{description}""#),
        ),
    ];

    let mut patched = html.to_owned();
    for (pattern, replacement) in swaps {
        patched = pattern
            .replace(&patched, NoExpand(&replacement))
            .into_owned();
    }
    patched
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html lang="ja">
<head>
  <title>old title</title>
  <meta name="description" content="old description">
  <meta property="og:title" content="untouched">
  <meta property="og:description" content="old og">
  <meta name="twitter:description" content="old twitter">
</head>
<body><h1>packs</h1></body>
</html>
"#;

    #[test]
    fn test_apply_patches_replaces_four_fields() {
        let site = SiteConfig::default();
        let patched = apply_patches(PAGE, 42, &site);

        assert!(patched.contains("42個のパックを無料配布</title>"));
        assert_eq!(patched.matches("42個配布中").count(), 3);
        assert!(!patched.contains("old title"));
        assert!(!patched.contains("old description"));
        assert!(!patched.contains("old og"));
        assert!(!patched.contains("old twitter"));
    }

    #[test]
    fn test_apply_patches_leaves_rest_untouched() {
        let patched = apply_patches(PAGE, 7, &SiteConfig::default());

        assert!(patched.contains(r#"<meta property="og:title" content="untouched">"#));
        assert!(patched.contains("<h1>packs</h1>"));
    }

    #[test]
    fn test_apply_patches_idempotent() {
        let site = SiteConfig::default();
        let once = apply_patches(PAGE, 7, &site);
        let twice = apply_patches(&once, 7, &site);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_patches_no_match_is_noop() {
        let html = "<html><body>no metadata here</body></html>";
        assert_eq!(apply_patches(html, 3, &SiteConfig::default()), html);
    }

    #[test]
    fn test_patch_missing_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("index.html");

        assert!(patch_site_metadata(&missing, 5, &SiteConfig::default()).is_ok());
        assert!(!missing.exists());
    }

    #[test]
    fn test_patch_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, PAGE).unwrap();

        patch_site_metadata(&path, 12, &SiteConfig::default()).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("12個のパックを無料配布"));
    }
}
