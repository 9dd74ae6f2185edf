//! Circular file discovery by naming convention.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::NaiveDate;
use glob::glob;
use tracing::debug;

use reckon_core::date_from_filename;

/// Default filename keywords that mark a circular.
pub const DEFAULT_KEYWORDS: [&str; 2] = ["circular", "ready-reckoner"];

/// User-supplied keywords, or the defaults when none were given.
pub fn keywords_or_default(user: &[String]) -> Vec<String> {
    if user.is_empty() {
        DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect()
    } else {
        user.to_vec()
    }
}

/// Candidate roots to search: the explicit roots when given, otherwise the
/// user's download directory and the working directory.
pub fn search_roots(explicit: &[PathBuf]) -> Vec<PathBuf> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }

    let mut roots = Vec::new();
    if let Some(downloads) = dirs::download_dir() {
        roots.push(downloads);
    }
    roots.push(PathBuf::from("."));
    roots
}

/// Find every PDF under `roots` whose file name contains one of `keywords`
/// (case-insensitive).
pub fn discover_all(roots: &[PathBuf], keywords: &[String]) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for root in roots {
        let Some(pattern) = root.join("**").join("*.pdf").to_str().map(String::from) else {
            continue;
        };
        let Ok(paths) = glob(&pattern) else {
            continue;
        };

        for path in paths.flatten() {
            if matches_keywords(&path, keywords) && !found.contains(&path) {
                found.push(path);
            }
        }
    }

    debug!("discovered {} circular files", found.len());
    found
}

/// The most recent circular, ranked by filename date with modification time
/// as the tie-break for undated names.
pub fn discover_latest(roots: &[PathBuf], keywords: &[String]) -> Option<PathBuf> {
    discover_all(roots, keywords)
        .into_iter()
        .max_by_key(|path| rank(path))
}

fn rank(path: &Path) -> (Option<NaiveDate>, Option<SystemTime>) {
    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let date = date_from_filename(filename);
    let mtime = path.metadata().and_then(|m| m.modified()).ok();
    (date, mtime)
}

fn matches_keywords(path: &Path, keywords: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let lower = name.to_lowercase();
    keywords.iter().any(|k| lower.contains(&k.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_discover_all_filters_by_keyword() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "primary-ready-reckoner-11-july-2025.pdf");
        touch(dir.path(), "Circular_04_Jul_25.pdf");
        touch(dir.path(), "unrelated.pdf");
        touch(dir.path(), "circular-notes.txt");

        let keywords = keywords_or_default(&[]);
        let found = discover_all(&[dir.path().to_path_buf()], &keywords);

        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_discover_all_walks_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("2025").join("Jul")).unwrap();
        touch(
            &dir.path().join("2025").join("Jul"),
            "Circular_11_Jul_25.pdf",
        );

        let keywords = keywords_or_default(&[]);
        let found = discover_all(&[dir.path().to_path_buf()], &keywords);

        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_discover_latest_prefers_newest_filename_date() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "primary-ready-reckoner-04-july-2025.pdf");
        touch(dir.path(), "primary-ready-reckoner-11-july-2025.pdf");
        touch(dir.path(), "circular-undated.pdf");

        let keywords = keywords_or_default(&[]);
        let latest = discover_latest(&[dir.path().to_path_buf()], &keywords).unwrap();

        assert_eq!(
            latest.file_name().unwrap(),
            "primary-ready-reckoner-11-july-2025.pdf"
        );
    }
}
