// src/logging/retention.rs

//! Retention housekeeping for rotated log files.
//!
//! The rotating file writer leaves backups named with a full timestamp,
//! e.g. `app.log.2026-02-06_00-00-00_000000` (a "raw" backup). At each
//! rotation event a [`RetentionHandler`]:
//!
//! 1. renames each raw backup to its canonical dated form
//!    `{stem}_{YYYYMMDD}{ext}`, one file per calendar day
//!    (see [`canonical_name`])
//! 2. deletes canonical files older than the retention age
//!    (see [`parse_retention_days`])
//!
//! Housekeeping is best-effort maintenance attached to the logging path:
//! malformed names, unparsable dates, and files that vanish mid-operation
//! are skipped, never errors. Remaining I/O failures (e.g. permission
//! denied) surface through [`RetentionHandler::process`] and the caller
//! decides.
//!
//! [`RetentionHandler`]: self::RetentionHandler
//! [`canonical_name`]: self::canonical_name
//! [`parse_retention_days`]: self::parse_retention_days

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ::chrono::{Duration, Local, NaiveDate};
use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{fpath_to_path, path_to_fpath, FPath};
use crate::debug::printers::e_wrn;

/// Fallback when a retention specification cannot be understood.
pub const RETENTION_DAYS_DEFAULT: u32 = 10;

/// `strftime` pattern of the date field in a canonical backup name.
const CANONICAL_DATE_PATTERN: &str = "%Y%m%d";

lazy_static! {
    /// Leading integer then a unit word; `"10 days"`, `"2 weeks"`.
    /// Prefix match, case-sensitive.
    static ref RETENTION_SPEC_REGEX: Regex = Regex::new(r"^(\d+)\s*(day|week)").unwrap();

    /// Trailing timestamp appended by the rotating writer after the
    /// active-file name; `app.log.2026-02-06_00-00-00_000000`.
    static ref RAW_BACKUP_REGEX: Regex = Regex::new(
        r"^(?P<prefix>.+)\.(?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})_\d{2}-\d{2}-\d{2}_\d+$",
    )
    .unwrap();
}

/// Parse a retention age specification into a day count.
///
/// Accepts `"<integer> day|days|week|weeks"`; a `week` unit multiplies by 7.
/// Anything that does not match, including integers too large to hold,
/// falls back to [`RETENTION_DAYS_DEFAULT`]. Never fails.
pub fn parse_retention_days(retention: &str) -> u32 {
    let captures = match RETENTION_SPEC_REGEX.captures(retention) {
        Some(val) => val,
        None => {
            defñ!("no match {:?}; default {}", retention, RETENTION_DAYS_DEFAULT);
            return RETENTION_DAYS_DEFAULT;
        }
    };
    let count: u32 = match captures[1].parse() {
        Ok(val) => val,
        Err(_err) => {
            defñ!("digit run {:?} overflows; default {}", &captures[1], RETENTION_DAYS_DEFAULT);
            return RETENTION_DAYS_DEFAULT;
        }
    };
    match &captures[2] {
        "week" => count.saturating_mul(7),
        _ => count,
    }
}

/// Derive the canonical dated name for a raw rotated backup.
///
/// `/logs/app.log.2026-02-06_00-00-00_000000` becomes
/// `/logs/app_20260206.log`. A path without the trailing timestamp is
/// returned unchanged; it is either already canonical or a foreign file
/// and must not be touched.
///
/// Pure path transform, no I/O, no calendar validation (the prune pass
/// validates dates).
pub fn canonical_name(raw_path: &FPath) -> FPath {
    let captures = match RAW_BACKUP_REGEX.captures(raw_path) {
        Some(val) => val,
        None => return raw_path.clone(),
    };
    // `prefix` is the active-file path the backup was rotated from,
    // e.g. `/logs/app.log`
    let prefix = Path::new(captures.name("prefix").unwrap().as_str());
    let ymd = format!(
        "{}{}{}",
        &captures["year"], &captures["month"], &captures["day"],
    );
    let stem = match prefix.file_stem() {
        Some(val) => val.to_string_lossy(),
        None => return raw_path.clone(),
    };
    let name = match prefix.extension() {
        Some(ext) => format!("{}_{}.{}", stem, ymd, ext.to_string_lossy()),
        None => format!("{}_{}", stem, ymd),
    };
    let parent = prefix.parent().unwrap_or_else(|| Path::new(""));

    path_to_fpath(&parent.join(name))
}

/// `fs::remove_file` that tolerates a file already removed.
fn remove_file_tolerant(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            defñ!("already removed {:?}", path);
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// Callback signature of the rotating writer's retention extension point.
pub type RetentionCallback = Box<dyn Fn(&[FPath]) + Send>;

/// Retention housekeeping bound to one active log file.
///
/// All configuration (log directory, canonical-name pattern, retention age)
/// is fixed at construction.
#[derive(Debug)]
pub struct RetentionHandler {
    /// directory holding the active file and its backups
    log_dir: PathBuf,
    /// delete canonical backups older than this many days
    max_age_days: u32,
    /// anchored match for `{stem}_{8 digits}{ext}`, capture 1 is the date
    canonical_regex: Regex,
}

impl RetentionHandler {
    /// Create a handler for `log_file`, parsing `retention` per
    /// [`parse_retention_days`].
    pub fn new(
        retention: &str,
        log_file: &FPath,
    ) -> RetentionHandler {
        RetentionHandler::with_max_age_days(parse_retention_days(retention), log_file)
    }

    /// Create a handler for `log_file` with an already-resolved age limit
    /// (configuration loading parses the retention specification once).
    pub fn with_max_age_days(
        max_age_days: u32,
        log_file: &FPath,
    ) -> RetentionHandler {
        defn!("({:?}, {:?})", max_age_days, log_file);
        let path = Path::new(log_file);
        let log_dir: PathBuf = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let stem = path
            .file_stem()
            .map(|val| val.to_string_lossy().to_string())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|val| format!(".{}", val.to_string_lossy()))
            .unwrap_or_default();
        let pattern = format!(
            r"^{}_(\d{{8}}){}$",
            regex::escape(&stem),
            regex::escape(&ext),
        );
        // the pattern is escaped user input around a fixed skeleton
        let canonical_regex = Regex::new(&pattern).unwrap();
        defx!("log_dir {:?} pattern {:?}", log_dir, pattern);

        RetentionHandler {
            log_dir,
            max_age_days,
            canonical_regex,
        }
    }

    pub fn max_age_days(&self) -> u32 {
        self.max_age_days
    }

    /// Run one housekeeping pass for a rotation event.
    ///
    /// The rename pass completes before the prune pass begins; a freshly
    /// rotated file must reach its canonical name before the prune scan may
    /// consider it, else a very short retention window could delete it
    /// while still raw.
    pub fn process(
        &self,
        rotated_paths: &[FPath],
    ) -> io::Result<()> {
        defn!("({} rotated paths)", rotated_paths.len());
        self.rename_rotated(rotated_paths)?;
        let cutoff: NaiveDate =
            (Local::now() - Duration::days(self.max_age_days as i64)).date_naive();
        let ret = self.prune_older_than(cutoff);
        defx!();

        ret
    }

    /// Rename pass: move each raw backup to its canonical dated name.
    ///
    /// One canonical file per (stem, date); on collision the raw file is
    /// deleted and the existing canonical file keeps its content
    /// (first-renamed-wins). Paths without the raw timestamp tail are left
    /// untouched.
    fn rename_rotated(
        &self,
        rotated_paths: &[FPath],
    ) -> io::Result<()> {
        for raw in rotated_paths.iter() {
            let canonical: FPath = canonical_name(raw);
            if &canonical == raw {
                defo!("not a raw backup, skip {:?}", raw);
                continue;
            }
            if fpath_to_path(&canonical).exists() {
                defo!("collision {:?}, discard {:?}", canonical, raw);
                remove_file_tolerant(fpath_to_path(raw))?;
                continue;
            }
            defo!("rename {:?} -> {:?}", raw, canonical);
            match fs::rename(raw, &canonical) {
                Ok(_) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    /// Prune pass: delete canonical backups dated strictly before `cutoff`.
    ///
    /// Only names matching `{stem}_{8 digits}{ext}` exactly are considered.
    /// An 8-digit field that is not a valid calendar date is skipped.
    pub fn prune_older_than(
        &self,
        cutoff: NaiveDate,
    ) -> io::Result<()> {
        defn!("({:?})", cutoff);
        let entries = match fs::read_dir(&self.log_dir) {
            Ok(val) => val,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                defx!("no log_dir {:?}", self.log_dir);
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        for entry in entries {
            let entry = entry?;
            let name_os = entry.file_name();
            let name = name_os.to_string_lossy();
            let captures = match self.canonical_regex.captures(&name) {
                Some(val) => val,
                None => continue,
            };
            let date = match NaiveDate::parse_from_str(&captures[1], CANONICAL_DATE_PATTERN) {
                Ok(val) => val,
                Err(_err) => {
                    defo!("unparsable date in {:?}, skip", name);
                    continue;
                }
            };
            if date < cutoff {
                defo!("expired ({} < {}), delete {:?}", date, cutoff, name);
                remove_file_tolerant(&entry.path())?;
            }
        }
        defx!();

        Ok(())
    }

    /// Adapt this handler into the writer's retention extension point.
    ///
    /// The writer holds its sink lock during rotation so the adapter must
    /// not log through the facade; failures go to *stderr* and rotation
    /// continues.
    pub fn into_callback(self) -> RetentionCallback {
        Box::new(move |rotated_paths: &[FPath]| {
            if let Err(err) = self.process(rotated_paths) {
                e_wrn!("log retention housekeeping failed: {}", err);
            }
        })
    }
}
