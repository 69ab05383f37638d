use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub(crate) const SHEET_HEADER: [&str; 9] = [
    "Timestamp",
    "Name",
    "Email",
    "Phone",
    "Position",
    "LinkedIn",
    "Portfolio",
    "Resume",
    "Message",
];

#[derive(Debug, Error)]
pub(crate) enum SheetError {
    #[error("sheet io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("row has {actual} cells, sheet expects {expected}")]
    RowShape { expected: usize, actual: usize },
}

/// Append-only table of submitted applications.
#[async_trait]
pub(crate) trait SheetSink: Send + Sync {
    async fn append_row(&self, row: Vec<String>) -> Result<(), SheetError>;
}

/// CSV file sink. Writes go through one lock so rows never interleave.
pub(crate) struct CsvSheet {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvSheet {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl SheetSink for CsvSheet {
    async fn append_row(&self, row: Vec<String>) -> Result<(), SheetError> {
        if row.len() != SHEET_HEADER.len() {
            return Err(SheetError::RowShape {
                expected: SHEET_HEADER.len(),
                actual: row.len(),
            });
        }

        let _guard = self.lock.lock().await;

        let is_new = tokio::fs::metadata(&self.path)
            .await
            .map(|meta| meta.len() == 0)
            .unwrap_or(true);

        let mut out = String::new();
        if is_new {
            out.push_str(&csv_line(SHEET_HEADER.iter().copied()));
        }
        out.push_str(&csv_line(row.iter().map(String::as_str)));

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(out.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

fn csv_line<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = cells.map(csv_cell).collect::<Vec<_>>().join(",");
    line.push_str("\r\n");
    line
}

/// RFC 4180 quoting: only cells with a separator, quote or line break are wrapped.
fn csv_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
