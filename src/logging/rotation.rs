// src/logging/rotation.rs

//! Rotation of the active log file.
//!
//! A [`RotatingFileWriter`] appends records to the active file. When the
//! bound [`RotationPolicy`] triggers, the active file is renamed to a raw
//! timestamped backup (`{active}.{%Y-%m-%d_%H-%M-%S_%6f}`), a fresh active
//! file is opened, and the retention callback receives the backup path.
//!
//! Policy specifications are strings from configuration, parsed once at
//! configuration load (see [`parse_rotation_policy`]): `"HH:MM"` rotates
//! daily when crossing that local time, `"<n> KB|MB|GB"` rotates when the
//! active file would exceed that size, anything else falls back to daily at
//! midnight.
//!
//! [`RotatingFileWriter`]: self::RotatingFileWriter
//! [`RotationPolicy`]: self::RotationPolicy
//! [`parse_rotation_policy`]: self::parse_rotation_policy

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use ::chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime};
use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{FPath, FileOpenOptions};
use crate::logging::retention::RetentionCallback;

/// `strftime` pattern appended to the active-file name on rotation.
/// The microsecond field keeps two rotations within one second distinct.
pub const RAW_TIMESTAMP_PATTERN: &str = "%Y-%m-%d_%H-%M-%S_%6f";

lazy_static! {
    /// time-of-day rotation specification, `"00:00"`
    static ref TIME_OF_DAY_REGEX: Regex = Regex::new(r"^(\d{1,2}):(\d{2})$").unwrap();
    /// size rotation specification, `"100 MB"`
    static ref SIZE_SPEC_REGEX: Regex = Regex::new(r"^(\d+)\s*(B|KB|MB|GB)$").unwrap();
}

/// When to rotate the active log file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationPolicy {
    /// rotate when crossing this local time of day
    TimeOfDay(NaiveTime),
    /// rotate before a write would grow the active file past this many bytes
    Size(u64),
}

impl Default for RotationPolicy {
    fn default() -> RotationPolicy {
        RotationPolicy::TimeOfDay(NaiveTime::MIN)
    }
}

/// Parse a size specification into bytes. `"1 MB"` is 1048576 (binary
/// multiples). `None` if the string is not a size specification.
pub fn parse_size_spec(spec: &str) -> Option<u64> {
    let captures = SIZE_SPEC_REGEX.captures(spec.trim())?;
    let count: u64 = captures[1].parse().ok()?;
    let multiplier: u64 = match &captures[2] {
        "B" => 1,
        "KB" => 1024,
        "MB" => 1024 * 1024,
        "GB" => 1024 * 1024 * 1024,
        _ => return None,
    };

    count.checked_mul(multiplier)
}

/// Parse a rotation specification.
///
/// `"HH:MM"` → [`RotationPolicy::TimeOfDay`]; `"<n> KB|MB|GB"` →
/// [`RotationPolicy::Size`]. Anything unparsable falls back to daily at
/// midnight rather than failing; same permissive policy as
/// [`parse_retention_days`].
///
/// [`parse_retention_days`]: crate::logging::retention::parse_retention_days
pub fn parse_rotation_policy(spec: &str) -> RotationPolicy {
    if let Some(captures) = TIME_OF_DAY_REGEX.captures(spec.trim()) {
        let hour: u32 = captures[1].parse().unwrap_or(24);
        let minute: u32 = captures[2].parse().unwrap_or(60);
        match NaiveTime::from_hms_opt(hour, minute, 0) {
            Some(time) => return RotationPolicy::TimeOfDay(time),
            None => {
                defñ!("out-of-range time {:?}; default midnight", spec);
                return RotationPolicy::default();
            }
        }
    }
    if let Some(size) = parse_size_spec(spec) {
        return RotationPolicy::Size(size);
    }
    defñ!("unparsable rotation spec {:?}; default midnight", spec);

    RotationPolicy::default()
}

/// The first instant strictly after `now` at time-of-day `time`.
fn next_rotation_after(
    now: NaiveDateTime,
    time: NaiveTime,
) -> NaiveDateTime {
    let today_at = now.date().and_time(time);
    if now < today_at {
        today_at
    } else {
        today_at + Duration::days(1)
    }
}

/// Append-only writer for the active log file with rotation and a
/// retention extension point.
pub struct RotatingFileWriter {
    /// active log file path
    path: FPath,
    policy: RotationPolicy,
    file: File,
    /// bytes in the active file
    written: u64,
    /// next trigger instant for `RotationPolicy::TimeOfDay`
    next_rotation: NaiveDateTime,
    /// invoked once per rotation event with the rotated backup paths
    retention: Option<RetentionCallback>,
}

impl std::fmt::Debug for RotatingFileWriter {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("RotatingFileWriter")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .field("written", &self.written)
            .field("next_rotation", &self.next_rotation)
            .finish_non_exhaustive()
    }
}

impl RotatingFileWriter {
    /// Open (creating directories as needed) the active file for append.
    pub fn new(
        path: &FPath,
        policy: RotationPolicy,
        retention: Option<RetentionCallback>,
    ) -> io::Result<RotatingFileWriter> {
        defn!("({:?}, {:?})", path, policy);
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = Self::open_active(path)?;
        let written = file.metadata()?.len();
        let now = Local::now().naive_local();
        let next_rotation = match policy {
            RotationPolicy::TimeOfDay(time) => next_rotation_after(now, time),
            // unused for size policy; any value works
            RotationPolicy::Size(_) => now,
        };
        defx!("written {} next_rotation {:?}", written, next_rotation);

        Ok(RotatingFileWriter {
            path: path.clone(),
            policy,
            file,
            written,
            next_rotation,
            retention,
        })
    }

    fn open_active(path: &FPath) -> io::Result<File> {
        FileOpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
    }

    fn should_rotate(
        &self,
        now: NaiveDateTime,
        incoming: u64,
    ) -> bool {
        // never rotate an empty active file
        if self.written == 0 {
            return false;
        }
        match self.policy {
            RotationPolicy::TimeOfDay(_) => now >= self.next_rotation,
            RotationPolicy::Size(max) => self.written + incoming > max,
        }
    }

    /// Rename the active file to a raw timestamped backup, reopen a fresh
    /// active file, then run the retention callback with the backup path.
    fn rotate(
        &mut self,
        now: DateTime<Local>,
    ) -> io::Result<()> {
        defn!("({:?})", self.path);
        self.file.flush()?;
        let raw: FPath = format!("{}.{}", self.path, now.format(RAW_TIMESTAMP_PATTERN));
        fs::rename(&self.path, &raw)?;
        self.file = Self::open_active(&self.path)?;
        self.written = 0;
        if let RotationPolicy::TimeOfDay(time) = self.policy {
            self.next_rotation = next_rotation_after(now.naive_local(), time);
        }
        if let Some(retention) = self.retention.as_ref() {
            let rotated: Vec<FPath> = vec![raw];
            retention(&rotated);
        }
        defx!();

        Ok(())
    }

    /// Append one formatted record, rotating first if the policy triggers.
    pub fn write_record(
        &mut self,
        record: &[u8],
    ) -> io::Result<()> {
        let now = Local::now();
        if self.should_rotate(now.naive_local(), record.len() as u64) {
            self.rotate(now)?;
        }
        self.file.write_all(record)?;
        self.written += record.len() as u64;

        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }

    pub fn path(&self) -> &FPath {
        &self.path
    }
}
