// src/table/mod.rs

use csv::{ReaderBuilder, WriterBuilder};
use std::{
    ffi::OsString,
    fs::{self, File, Permissions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::error::StageError;
use crate::naming::{target_name, FILE_NAME_COLUMN, SEQUENCE_COLUMN};

pub mod preview;

/// A CSV held fully in memory as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// Column names from the header row, in file order.
    pub headers: Vec<String>,
    /// Every data row, one `String` per field, verbatim.
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Read a UTF-8, comma-delimited file with a header row.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StageError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StageError::SourceNotFound {
                path: path.to_path_buf(),
            },
            _ => StageError::Io(e),
        })?;

        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);
        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!(path = %path.display(), rows = rows.len(), "loaded table");
        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Position of the first column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Relabel column `from` as `to`. Row values are not touched.
    /// Returns the column's position, or `None` if `from` does not exist.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Option<usize> {
        let idx = self.column_index(from)?;
        self.headers[idx] = to.to_string();
        Some(idx)
    }

    /// Overwrite column `col` in the first `min(count, len)` rows with
    /// `value(position)`. Returns how many rows were written.
    pub fn overwrite_prefix<F>(&mut self, col: usize, count: u64, mut value: F) -> usize
    where
        F: FnMut(usize) -> String,
    {
        let limit = usize::try_from(count).unwrap_or(usize::MAX).min(self.rows.len());
        for (pos, row) in self.rows.iter_mut().take(limit).enumerate() {
            if let Some(cell) = row.get_mut(col) {
                *cell = value(pos);
            }
        }
        limit
    }

    /// Position of the first row whose column `col` equals `value`.
    pub fn find_row(&self, col: usize, value: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.get(col).map(String::as_str) == Some(value))
    }

    /// Write the table to `path`. The file only appears once every row has
    /// been written; a failure part way leaves nothing behind. An existing
    /// file at `path` keeps its permissions.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), StageError> {
        let path = path.as_ref();
        let perms = fs::metadata(path).ok().map(|m| m.permissions());
        self.write_inner(path, perms)
    }

    /// Like [`Dataset::write`], but the new file gets `perms`.
    pub fn write_with_permissions<P: AsRef<Path>>(
        &self,
        path: P,
        perms: Permissions,
    ) -> Result<(), StageError> {
        self.write_inner(path.as_ref(), Some(perms))
    }

    fn write_inner(&self, path: &Path, perms: Option<Permissions>) -> Result<(), StageError> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(dir)?;
        {
            let mut wtr = WriterBuilder::new().from_writer(BufWriter::new(tmp.as_file()));
            wtr.write_record(&self.headers)?;
            for row in &self.rows {
                wtr.write_record(row)?;
            }
            let mut inner = wtr.into_inner().map_err(|e| e.into_error())?;
            inner.flush()?;
        }
        // temp files are created owner-only
        if let Some(perms) = perms {
            fs::set_permissions(tmp.path(), perms)?;
        }
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Sibling of `source` with `_updated` inserted before the extension.
pub fn updated_path(source: &Path) -> PathBuf {
    let mut name: OsString = source.file_stem().unwrap_or_default().to_os_string();
    name.push("_updated");
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    source.with_file_name(name)
}

#[derive(Debug)]
pub struct TableReport {
    pub output_path: PathBuf,
    pub total_rows: usize,
    pub rows_updated: usize,
    /// Markdown of the boundary row and its successor, when the boundary
    /// row exists.
    pub preview: Option<String>,
}

/// Load `source`, relabel `stt` as `file_name`, rewrite the first `count`
/// values of that column to the renamed recording names and save the result
/// next to `source` as `<stem>_updated.<ext>`.
#[instrument(level = "info", skip(source), fields(source = %source.as_ref().display()))]
pub fn update_table<P: AsRef<Path>>(source: P, count: u64) -> Result<TableReport, StageError> {
    let source = source.as_ref();
    info!("updating CSV");

    let mut data = Dataset::load(source)?;
    let col = data
        .rename_column(SEQUENCE_COLUMN, FILE_NAME_COLUMN)
        .ok_or_else(|| StageError::MissingColumn {
            column: SEQUENCE_COLUMN.to_string(),
            path: source.to_path_buf(),
        })?;

    let rows_updated = data.overwrite_prefix(col, count, |pos| target_name(pos as u64 + 1));

    let output_path = updated_path(source);
    let perms = fs::metadata(source)?.permissions();
    data.write_with_permissions(&output_path, perms)?;
    info!(
        rows_updated,
        total_rows = data.len(),
        "saved updated CSV to {}",
        output_path.display()
    );

    let preview = preview::boundary_preview(&data, col, count);
    match &preview {
        Some(text) => println!("{}", text),
        None => info!("no row named {} to preview", target_name(count)),
    }

    Ok(TableReport {
        output_path,
        total_rows: data.len(),
        rows_updated,
        preview,
    })
}
