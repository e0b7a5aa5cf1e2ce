//! Splitting CSV input into header-prefixed line batches
//!
//! The first line is the header and is repeated at the top of every chunk.
//! Blank lines are skipped. A chunk knows whether it is the last one, which
//! needs one line of lookahead when reading a file.
//!
//! Lines are split on raw bytes, so input in any ASCII-compatible encoding
//! (Latin-1 spreadsheet exports included) is uploaded unchanged.

use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use zanalytics_domain::{AnalyticsError, Result};

/// One batch of CSV bytes ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Zero-based position in the sequence
    pub index: usize,
    /// Header line followed by up to `batch_size` data lines, each `\n` terminated
    pub body: Vec<u8>,
    pub rows: usize,
    pub is_last: bool,
}

fn check_batch_size(batch_size: usize) -> Result<()> {
    if batch_size == 0 {
        return Err(AnalyticsError::Validation("batch size must be at least 1".to_string()));
    }
    Ok(())
}

/// Strip the line terminator; `None` for blank lines.
fn trim_line(line: &[u8]) -> Option<&[u8]> {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        Some(line)
    }
}

fn render<L: AsRef<[u8]>>(header: &[u8], lines: &[L]) -> Vec<u8> {
    let size = header.len() + 1 + lines.iter().map(|l| l.as_ref().len() + 1).sum::<usize>();
    let mut body = Vec::with_capacity(size);
    body.extend_from_slice(header);
    body.push(b'\n');
    for line in lines {
        body.extend_from_slice(line.as_ref());
        body.push(b'\n');
    }
    body
}

/// Split in-memory CSV content into chunks.
///
/// # Errors
///
/// `Validation` if `batch_size` is zero or the input holds no data lines.
pub fn split_into_batches(input: impl AsRef<[u8]>, batch_size: usize) -> Result<Vec<Chunk>> {
    check_batch_size(batch_size)?;

    let mut lines = input.as_ref().split_inclusive(|b| *b == b'\n').filter_map(trim_line);
    let header = lines
        .next()
        .ok_or_else(|| AnalyticsError::Validation("import data has no header line".to_string()))?;
    let rows: Vec<&[u8]> = lines.collect();
    if rows.is_empty() {
        return Err(AnalyticsError::Validation("import data has no data lines".to_string()));
    }

    let total = rows.len().div_ceil(batch_size);
    Ok(rows
        .chunks(batch_size)
        .enumerate()
        .map(|(index, lines)| Chunk {
            index,
            body: render(header, lines),
            rows: lines.len(),
            is_last: index + 1 == total,
        })
        .collect())
}

/// Streams chunks from a reader without holding the whole input in memory.
pub struct BatchReader<R> {
    reader: R,
    /// Reported on every `Io` error; empty for in-memory readers
    path: PathBuf,
    header: Vec<u8>,
    lookahead: Option<Vec<u8>>,
    batch_size: usize,
    next_index: usize,
}

impl BatchReader<BufReader<tokio::fs::File>> {
    /// Open `path` and read its header.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read; `Validation` as for [`BatchReader::new`].
    pub async fn open(path: &Path, batch_size: usize) -> Result<Self> {
        check_batch_size(batch_size)?;
        let file = tokio::fs::File::open(path).await.map_err(|e| AnalyticsError::io(path, &e))?;
        Self::with_path(BufReader::new(file), path.to_path_buf(), batch_size).await
    }
}

impl<R: AsyncBufRead + Unpin> BatchReader<R> {
    /// # Errors
    ///
    /// `Validation` if `batch_size` is zero or the input holds no data lines.
    pub async fn new(reader: R, batch_size: usize) -> Result<Self> {
        Self::with_path(reader, PathBuf::new(), batch_size).await
    }

    async fn with_path(reader: R, path: PathBuf, batch_size: usize) -> Result<Self> {
        check_batch_size(batch_size)?;

        let mut this =
            Self { reader, path, header: Vec::new(), lookahead: None, batch_size, next_index: 0 };
        this.header = this
            .next_line()
            .await?
            .ok_or_else(|| AnalyticsError::Validation("import data has no header line".to_string()))?;
        this.lookahead = this.next_line().await?;
        if this.lookahead.is_none() {
            return Err(AnalyticsError::Validation("import data has no data lines".to_string()));
        }
        Ok(this)
    }

    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// Next chunk, or `None` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// `Io` carrying the reader's path if reading fails.
    pub async fn next_chunk(&mut self) -> Result<Option<Chunk>> {
        let mut rows = Vec::with_capacity(self.batch_size);
        while rows.len() < self.batch_size {
            match self.lookahead.take() {
                Some(line) => {
                    rows.push(line);
                    self.lookahead = self.next_line().await?;
                }
                None => break,
            }
        }

        if rows.is_empty() {
            return Ok(None);
        }

        let chunk = Chunk {
            index: self.next_index,
            body: render(&self.header, &rows),
            rows: rows.len(),
            is_last: self.lookahead.is_none(),
        };
        self.next_index += 1;
        Ok(Some(chunk))
    }

    async fn next_line(&mut self) -> Result<Option<Vec<u8>>> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = self
                .reader
                .read_until(b'\n', &mut buf)
                .await
                .map_err(|e| AnalyticsError::io(&self.path, &e))?;
            if read == 0 {
                return Ok(None);
            }
            if let Some(line) = trim_line(&buf) {
                return Ok(Some(line.to_vec()));
            }
        }
    }
}
