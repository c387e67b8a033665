//! Translation pack archive assembly.
//!
//! A pack is a zip archive with exactly three members:
//!
//! | Member                           | Content                          |
//! |----------------------------------|----------------------------------|
//! | `assets/<modId>/lang/ja_jp.json` | Raw localization payload         |
//! | `pack.mcmeta`                    | Manifest consumed by the game    |
//! | `README.md`                      | Generated installation guide     |
//!
//! The archive is written to a sibling `.tmp` file and renamed into place
//! once the zip central directory has been flushed, so a crashed run never
//! leaves a half-written pack behind.

use crate::config::SiteConfig;
use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

const MANIFEST_ENTRY: &str = "pack.mcmeta";
const README_ENTRY: &str = "README.md";

/// `pack.mcmeta` manifest, recognized by the game to accept the pack.
#[derive(Debug, Serialize)]
pub struct PackMeta {
    pack: PackSection,
}

#[derive(Debug, Serialize)]
struct PackSection {
    pack_format: u32,
    description: String,
}

impl PackMeta {
    pub fn new(mod_id: &str, version: &str, pack_format: u32) -> Self {
        Self {
            pack: PackSection {
                pack_format,
                description: format!("{mod_id} Japanese Translation for {version}"),
            },
        }
    }
}

/// Archive-internal path of the localization payload for a mod.
pub fn lang_entry_path(mod_id: &str) -> String {
    format!("assets/{mod_id}/lang/ja_jp.json")
}

/// Output file name for a (modId, version) pair.
pub fn artifact_name(mod_id: &str, version: &str) -> String {
    format!("{mod_id}-ja-{version}.zip")
}

/// Assemble one pack archive at `dest`.
///
/// `lang_json` must already be validated; it is stored byte for byte.
/// Returns only after the archive is fully written and renamed into place.
pub fn write_pack(
    dest: &Path,
    mod_id: &str,
    version: &str,
    pack_format: u32,
    lang_json: &str,
    site: &SiteConfig,
) -> Result<()> {
    let tmp = dest.with_extension("zip.tmp");

    let file = File::create(&tmp)
        .with_context(|| format!("Failed to create {}", tmp.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(lang_entry_path(mod_id), options)?;
    zip.write_all(lang_json.as_bytes())?;

    let manifest = serde_json::to_string_pretty(&PackMeta::new(mod_id, version, pack_format))?;
    zip.start_file(MANIFEST_ENTRY, options)?;
    zip.write_all(manifest.as_bytes())?;

    zip.start_file(README_ENTRY, options)?;
    zip.write_all(render_readme(mod_id, version, site).as_bytes())?;

    // The archive only becomes valid once the central directory is written
    let mut file = zip.finish().context("Failed to finalize archive")?;
    file.flush()?;
    drop(file);

    fs::rename(&tmp, dest)
        .with_context(|| format!("Failed to move pack into place: {}", dest.display()))?;

    Ok(())
}

/// Generate the pack readme, dated with today's date.
fn render_readme(mod_id: &str, version: &str, site: &SiteConfig) -> String {
    let build_date = Local::now().format("%Y/%-m/%-d");

    format!(
        r#"# {mod_id} 日本語化パック

## 対応バージョン
- Minecraft: {version}
- MOD ID: {mod_id}

## 導入方法
1. このzipファイルをMinecraftの「リソースパック」フォルダに入れる
   - Windowsの場合: %appdata%\.minecraft\resourcepacks
   - Macの場合: ~/Library/Application Support/minecraft/resourcepacks
2. Minecraftを起動し、「設定」→「リソースパック」を開く
3. このパックを「使用中」に移動して適用

## ビルド情報
- ビルド日: {build_date}
- 配布元: {url}

## ライセンス
この翻訳は個人利用・配信・動画投稿すべてOKです。
再配布する場合は配布元へのリンクをお願いします。

## 問題報告
不具合や翻訳の改善提案は以下へお願いします：
{issues_url}
"#,
        url = site.url,
        issues_url = site.issues_url,
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_entry(path: &Path, name: &str) -> String {
        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_lang_entry_path() {
        assert_eq!(
            lang_entry_path("example mod"),
            "assets/example mod/lang/ja_jp.json"
        );
    }

    #[test]
    fn test_artifact_name() {
        assert_eq!(artifact_name("jei", "1.20.1"), "jei-ja-1.20.1.zip");
    }

    #[test]
    fn test_manifest_format() {
        let meta = PackMeta::new("jei", "1.20.1", 15);
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string_pretty(&meta).unwrap()).unwrap();

        assert_eq!(json["pack"]["pack_format"], 15);
        assert_eq!(
            json["pack"]["description"],
            "jei Japanese Translation for 1.20.1"
        );
    }

    #[test]
    fn test_write_pack_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("example mod-ja-1.20.1.zip");
        let site = SiteConfig::default();

        write_pack(&dest, "example mod", "1.20.1", 15, r#"{"a":"b"}"#, &site).unwrap();

        // Payload survives byte for byte
        let lang = read_entry(&dest, "assets/example mod/lang/ja_jp.json");
        assert_eq!(lang, r#"{"a":"b"}"#);

        // Manifest carries the configured pack format
        let manifest: serde_json::Value =
            serde_json::from_str(&read_entry(&dest, "pack.mcmeta")).unwrap();
        assert_eq!(manifest["pack"]["pack_format"], 15);

        // Readme embeds mod id and version
        let readme = read_entry(&dest, "README.md");
        assert!(readme.contains("example mod"));
        assert!(readme.contains("1.20.1"));
        assert!(readme.contains(&site.url));
    }

    #[test]
    fn test_write_pack_exactly_three_members() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("jei-ja-1.18.2.zip");

        write_pack(&dest, "jei", "1.18.2", 9, "{}", &SiteConfig::default()).unwrap();

        let archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        assert_eq!(archive.len(), 3);
    }

    #[test]
    fn test_write_pack_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("jei-ja-1.20.1.zip");

        write_pack(&dest, "jei", "1.20.1", 15, "{}", &SiteConfig::default()).unwrap();

        assert!(dest.exists());
        assert!(!dir.path().join("jei-ja-1.20.1.zip.tmp").exists());
    }

    #[test]
    fn test_write_pack_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("jei-ja-1.20.1.zip");
        let site = SiteConfig::default();

        write_pack(&dest, "jei", "1.20.1", 15, r#"{"old":"1"}"#, &site).unwrap();
        write_pack(&dest, "jei", "1.20.1", 15, r#"{"new":"2"}"#, &site).unwrap();

        let lang = read_entry(&dest, "assets/jei/lang/ja_jp.json");
        assert_eq!(lang, r#"{"new":"2"}"#);
    }
}
