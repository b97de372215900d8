//! Locates the freshest export file for a calendar name.
//!
//! Exports land either directly under the export root
//! (`export/<name>/*.ics`) or inside a date-range directory
//! (`export/2025-02-01_to_2025-02-07/<name>/*.ics`). A direct export
//! always wins; date-range directories are tried newest first.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::warn;

const EXPORT_EXTENSION: &str = "ics";

/// Return the freshest raw document text for `name`, or `None`.
///
/// A missing directory is a normal outcome, not an error; filesystem
/// failures are logged and reported as absent.
pub fn locate(export_root: &Path, name: &str) -> Option<String> {
    if let Some(content) = read_calendar_dir(&export_root.join(name)) {
        return Some(content);
    }

    for dir in date_range_dirs(export_root) {
        if let Some(content) = read_calendar_dir(&dir.join(name)) {
            return Some(content);
        }
    }

    None
}

/// Calendar names visible anywhere under the export root, sorted.
/// Advisory, used by the server's info page only.
pub fn available_calendars(export_root: &Path) -> Vec<String> {
    let mut names: BTreeSet<String> = BTreeSet::new();

    let Ok(entries) = fs::read_dir(export_root) else {
        return Vec::new();
    };

    for path in entries.filter_map(|e| e.ok()).map(|e| e.path()) {
        if !path.is_dir() {
            continue;
        }
        let Some(dir_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if has_export(&path) {
            names.insert(dir_name.to_string());
        } else if dir_name.contains('-') {
            let Ok(subentries) = fs::read_dir(&path) else {
                continue;
            };
            for sub_path in subentries.filter_map(|e| e.ok()).map(|e| e.path()) {
                if sub_path.is_dir() && has_export(&sub_path) {
                    if let Some(name) = sub_path.file_name().and_then(|n| n.to_str()) {
                        names.insert(name.to_string());
                    }
                }
            }
        }
    }

    names.into_iter().collect()
}

/// Date-range directories under the export root, newest first.
///
/// ISO-style `YYYY-MM-DD_to_YYYY-MM-DD` names sort chronologically, so
/// descending lexicographic order is descending chronological order.
/// The hyphen is the heuristic that separates them from plain calendar
/// directories.
fn date_range_dirs(export_root: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(export_root) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.contains('-'))
        })
        .collect();

    dirs.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
    dirs
}

fn has_export(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .any(|e| e.path().extension().and_then(|x| x.to_str()) == Some(EXPORT_EXTENSION))
        })
        .unwrap_or(false)
}

/// Read the export inside one calendar directory, picking the most
/// recently modified `.ics` file when several are present.
fn read_calendar_dir(dir: &Path) -> Option<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            warn!("could not list {}: {err}", dir.display());
            return None;
        }
    };

    let mut exports: Vec<(SystemTime, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(EXPORT_EXTENSION))
        .map(|path| {
            let modified = fs::metadata(&path)
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, path)
        })
        .collect();

    exports.sort_by(|a, b| b.0.cmp(&a.0));
    let (_, path) = exports.into_iter().next()?;

    match fs::read_to_string(&path) {
        Ok(content) => Some(content),
        Err(err) => {
            warn!("could not read {}: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn write_export(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
    }

    #[test]
    fn test_direct_export_wins_over_dated() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write_export(root, "FOO/class.ics", "direct");
        write_export(root, "2025-01-01_to_2025-01-07/FOO/old.ics", "dated");

        assert_eq!(locate(root, "FOO").as_deref(), Some("direct"));
    }

    #[test]
    fn test_latest_dated_directory_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write_export(root, "2025-01-01_to_2025-01-07/FOO/x.ics", "january");
        write_export(root, "2025-02-01_to_2025-02-07/FOO/x.ics", "february");

        assert_eq!(locate(root, "FOO").as_deref(), Some("february"));
    }

    #[test]
    fn test_most_recently_modified_file_wins_within_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write_export(root, "FOO/stale.ics", "stale");
        write_export(root, "FOO/fresh.ics", "fresh");

        let stale = fs::OpenOptions::new()
            .write(true)
            .open(root.join("FOO/stale.ics"))
            .unwrap();
        stale
            .set_modified(SystemTime::now() - Duration::from_secs(3600))
            .unwrap();

        assert_eq!(locate(root, "FOO").as_deref(), Some("fresh"));
    }

    #[test]
    fn test_non_ics_files_are_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write_export(root, "FOO/notes.txt", "not a calendar");

        assert_eq!(locate(root, "FOO"), None);
    }

    #[test]
    fn test_unknown_calendar_and_missing_root_are_absent() {
        let tmp = tempfile::tempdir().unwrap();

        assert_eq!(locate(tmp.path(), "NOPE"), None);
        assert_eq!(locate(&tmp.path().join("missing"), "NOPE"), None);
    }

    #[test]
    fn test_available_calendars_spans_direct_and_dated() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        write_export(root, "FOO/class.ics", "a");
        write_export(root, "2025-02-01_to_2025-02-07/BAR/x.ics", "b");

        assert_eq!(available_calendars(root), vec!["BAR", "FOO"]);
    }
}
