// src/tests/common.rs

//! Shared helpers for _raptlib_ tests.

use std::fs;
use std::path::Path;

use ::chrono::{Duration, Local};

use crate::common::{path_to_fpath, FPath};

#[doc(hidden)]
pub use ::tempfile::{tempdir, TempDir};

/// Write `content` to `name` under `dir`, returning the full path.
pub fn write_file(
    dir: &Path,
    name: &str,
    content: &str,
) -> FPath {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();

    path_to_fpath(&path)
}

pub fn read_file(path: &FPath) -> String {
    fs::read_to_string(path).unwrap()
}

pub fn file_exists(path: &FPath) -> bool {
    Path::new(path).exists()
}

/// `YYYYMMDD` for `days_ago` days before today.
pub fn ymd_days_ago(days_ago: i64) -> String {
    (Local::now() - Duration::days(days_ago))
        .format("%Y%m%d")
        .to_string()
}

/// Canonical backup name dated `days_ago` days before today,
/// e.g. `app_20260206.log`.
pub fn canonical_named(
    stem: &str,
    days_ago: i64,
    ext: &str,
) -> String {
    format!("{}_{}{}", stem, ymd_days_ago(days_ago), ext)
}

/// Raw rotated backup name dated `days_ago` days before today,
/// e.g. `app.log.2026-02-06_10-20-30_000001`.
pub fn raw_named(
    active_name: &str,
    days_ago: i64,
) -> String {
    format!(
        "{}.{}_10-20-30_000001",
        active_name,
        (Local::now() - Duration::days(days_ago)).format("%Y-%m-%d"),
    )
}

/// Sorted names of all entries in `dir`.
pub fn dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();

    names
}
