use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::StageError;
use crate::rename::{rename_matching, RenameReport};
use crate::table::{update_table, TableReport};

/// What each stage did. `rename` is `None` only when the recording
/// directory was unusable, in which case the table stage never ran.
#[derive(Debug)]
pub struct RunSummary {
    pub rename: Option<RenameReport>,
    pub table: Option<Result<TableReport, StageError>>,
}

impl RunSummary {
    /// Both stages ran and the table was written.
    pub fn is_complete(&self) -> bool {
        self.rename.is_some() && matches!(self.table, Some(Ok(_)))
    }
}

/// Rename the recordings, then bring the CSV in line with the new names.
///
/// Stage failures are logged, not returned: the CSV stage is skipped only
/// when the recording directory itself is unusable.
pub fn run(cfg: &Config) -> RunSummary {
    let count = cfg.num_files_to_rename;

    // ─── 1) rename recordings ───────────────────────────────────────
    let rename = match rename_matching(&cfg.audio_folder_path, count) {
        Ok(report) => report,
        Err(e) => {
            error!("{}; skipping CSV update", e);
            return RunSummary {
                rename: None,
                table: None,
            };
        }
    };
    if rename.is_empty() {
        warn!("no recordings were renamed; the CSV is updated anyway");
    }

    // ─── 2) update CSV ──────────────────────────────────────────────
    let table = update_table(&cfg.csv_file_path, count);
    match &table {
        Ok(report) => info!(
            rows_updated = report.rows_updated,
            "CSV written to {}",
            report.output_path.display()
        ),
        Err(e @ StageError::MissingColumn { .. }) => warn!("{}; CSV not updated", e),
        Err(e) => error!("CSV update failed: {}", e),
    }

    RunSummary {
        rename: Some(rename),
        table: Some(table),
    }
}
