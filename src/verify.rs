use anyhow::{anyhow, Context, Result};
use std::{fs, path::Path};
use tracing::{debug, instrument};

use crate::naming::{parse_sequence, FILE_NAME_COLUMN};
use crate::table::Dataset;

/// Differences between a renamed recording directory and an updated CSV.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Rows checked: the first `min(count, rows)` of the CSV.
    pub rows_checked: usize,
    /// `file_name` values among those rows with no matching file.
    pub missing_files: Vec<String>,
    /// `Recording (k).wav` entries with `k` in range that are still there.
    pub leftover_recordings: Vec<String>,
}

impl VerifyReport {
    pub fn is_consistent(&self) -> bool {
        self.missing_files.is_empty() && self.leftover_recordings.is_empty()
    }
}

/// Read-only cross-check of `dir` against the updated CSV at `table_path`.
#[instrument(level = "info", skip(dir, table_path), fields(dir = %dir.as_ref().display()))]
pub fn check<P: AsRef<Path>, Q: AsRef<Path>>(
    dir: P,
    table_path: Q,
    count: u64,
) -> Result<VerifyReport> {
    let dir = dir.as_ref();
    let table_path = table_path.as_ref();

    let data = Dataset::load(table_path)
        .with_context(|| format!("loading {}", table_path.display()))?;
    let col = data.column_index(FILE_NAME_COLUMN).ok_or_else(|| {
        anyhow!(
            "column '{}' not found in {}",
            FILE_NAME_COLUMN,
            table_path.display()
        )
    })?;

    let mut report = VerifyReport::default();
    let limit = usize::try_from(count).unwrap_or(usize::MAX).min(data.len());
    for row in data.rows.iter().take(limit) {
        let name = &row[col];
        if !dir.join(name).is_file() {
            report.missing_files.push(name.clone());
        }
    }
    report.rows_checked = limit;

    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if matches!(parse_sequence(name), Some(k) if (1..=count).contains(&k)) {
            report.leftover_recordings.push(name.to_string());
        }
    }
    report.leftover_recordings.sort();

    debug!(?report, "verification finished");
    Ok(report)
}
