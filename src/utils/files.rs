//! Filesystem helpers shared by the builder and the indexer.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files to ignore during directory listing
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// List files with the given extension directly under `dir`.
///
/// The listing is non-recursive and sorted by file name so that batch runs
/// process files in a stable order.
pub fn list_files_with_ext(dir: &Path, ext: &str) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .filter(|e| e.path().extension().is_some_and(|e| e == ext))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Check if the artifact is at least as new as its source.
///
/// Any missing file or unreadable timestamp means "rebuild".
pub fn is_up_to_date(src: &Path, dst: &Path) -> bool {
    let (Ok(src_meta), Ok(dst_meta)) = (src.metadata(), dst.metadata()) else {
        return false;
    };
    let (Ok(src_time), Ok(dst_time)) = (src_meta.modified(), dst_meta.modified()) else {
        return false;
    };

    // Source newer than artifact means stale; equal timestamps count as fresh
    src_time <= dst_time
}

/// Human-readable file size: `812B`, `4.2KB`, `1.3MB`.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes < KB {
        format!("{bytes}B")
    } else if bytes < MB {
        format!("{:.1}KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    }
}
