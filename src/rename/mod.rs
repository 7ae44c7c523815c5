// src/rename/mod.rs

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument, warn};

use crate::error::StageError;
use crate::naming::{parse_sequence, target_name};

/// How many successful renames are echoed before going quiet.
const PREVIEW_LIMIT: usize = 10;

/// Why a single entry could not be renamed.
#[derive(Debug)]
pub enum FailureReason {
    /// Something already sits at the target name.
    Collision { target: String },
    /// The directory entry itself could not be read.
    Unreadable(io::Error),
    Io(io::Error),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Collision { target } => write!(f, "'{}' already exists", target),
            FailureReason::Unreadable(e) => write!(f, "unreadable entry: {}", e),
            FailureReason::Io(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug)]
pub struct RenameFailure {
    /// Entry name as listed, or a placeholder when the listing failed.
    pub entry: String,
    pub reason: FailureReason,
}

#[derive(Debug, Default)]
pub struct RenameReport {
    /// `(old name, new name)` in the order the renames happened.
    pub renamed: Vec<(String, String)>,
    /// New names of the renames that were echoed to the log.
    pub echoed: Vec<String>,
    pub failures: Vec<RenameFailure>,
}

impl RenameReport {
    pub fn renamed_count(&self) -> usize {
        self.renamed.len()
    }

    /// Nothing was renamed.
    pub fn is_empty(&self) -> bool {
        self.renamed.is_empty()
    }

    /// Closing line for the run: a total, or the no-match notice.
    pub fn summary(&self, dir: &Path) -> String {
        if self.is_empty() {
            format!(
                "no files matching 'Recording (X).wav' found in {}",
                dir.display()
            )
        } else {
            format!("rename complete: {} files renamed", self.renamed_count())
        }
    }
}

/// Echo the first `PREVIEW_LIMIT` renames, and always the one that reaches
/// `count`. `done` is the number of renames before this one.
fn should_echo(done: usize, k: u64, count: u64) -> bool {
    done < PREVIEW_LIMIT || k == count
}

/// Rename every `Recording (k).wav` directly inside `dir` with
/// `1 <= k <= count` to `audio{k}-Tung.wav`.
///
/// Only an unusable `dir` is an error. Individual entries that fail are
/// logged and collected in the report while the rest of the listing is
/// still processed.
#[instrument(level = "info", skip(dir), fields(dir = %dir.as_ref().display()))]
pub fn rename_matching<P: AsRef<Path>>(dir: P, count: u64) -> Result<RenameReport, StageError> {
    let dir = dir.as_ref();
    info!("renaming up to {} recordings", count);

    if !dir.is_dir() {
        return Err(StageError::InvalidDirectory {
            path: dir.to_path_buf(),
        });
    }
    let entries = fs::read_dir(dir).map_err(|_| StageError::InvalidDirectory {
        path: dir.to_path_buf(),
    })?;

    let mut report = RenameReport::default();

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("failed to read directory entry: {}", e);
                report.failures.push(RenameFailure {
                    entry: "<unreadable>".to_string(),
                    reason: FailureReason::Unreadable(e),
                });
                continue;
            }
        };

        let file_name = entry.file_name();
        let name = match file_name.to_str() {
            Some(n) => n,
            None => continue,
        };
        let stt = match parse_sequence(name) {
            Some(k) if (1..=count).contains(&k) => k,
            Some(k) => {
                debug!(name, k, "sequence number out of range, skipping");
                continue;
            }
            None => continue,
        };

        let new_name = target_name(stt);
        match rename_one(dir, name, &new_name) {
            Ok(()) => {
                if should_echo(report.renamed.len(), stt, count) {
                    info!("renamed \"{}\" -> \"{}\"", name, new_name);
                    report.echoed.push(new_name.clone());
                }
                report.renamed.push((name.to_string(), new_name));
            }
            Err(reason) => {
                warn!("failed to rename {}: {}", name, reason);
                report.failures.push(RenameFailure {
                    entry: name.to_string(),
                    reason,
                });
            }
        }
    }

    info!("{}", report.summary(dir));
    if !report.failures.is_empty() {
        warn!("{} entries could not be renamed", report.failures.len());
    }

    Ok(report)
}

fn rename_one(dir: &Path, from: &str, to: &str) -> Result<(), FailureReason> {
    let old_path = dir.join(from);
    let new_path: PathBuf = dir.join(to);

    // fs::rename replaces an existing target on Unix; refuse instead.
    if new_path.symlink_metadata().is_ok() {
        return Err(FailureReason::Collision {
            target: to.to_string(),
        });
    }
    fs::rename(&old_path, &new_path).map_err(FailureReason::Io)
}
