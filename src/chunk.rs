use crate::constants::{CHUNK_INDEX_WIDTH, CHUNK_LABEL_PREFIX, OUTPUT_EXTENSION};
use crate::timestamp::extract_label;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    #[error("Failed to read input line: {0}")]
    Read(#[source] io::Error),
    #[error("Failed to write chunk {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Lines of a reader with their terminators kept, so chunks can be written back verbatim.
pub struct LogLines<R> {
    reader: R,
}

impl<R: BufRead> LogLines<R> {
    pub fn new(reader: R) -> Self {
        LogLines { reader }
    }
}

impl<R: BufRead> Iterator for LogLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(err) => Some(Err(err)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    Timestamp,
    Sequence,
}

/// A chunk that has been flushed to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenChunk {
    pub path: PathBuf,
    pub index: usize,
    pub bytes: u64,
    pub lines: usize,
    pub label_source: LabelSource,
}

#[derive(Debug)]
struct Chunk {
    index: usize,
    body: String,
    lines: usize,
    label: Option<String>,
}

impl Chunk {
    fn new(index: usize) -> Self {
        Chunk {
            index,
            body: String::new(),
            lines: 0,
            label: None,
        }
    }

    fn push(&mut self, line: &str) {
        self.body.push_str(line);
        self.lines += 1;
        if self.label.is_none() {
            self.label = extract_label(line);
            if let Some(label) = &self.label {
                debug!(chunk = self.index, line = self.lines, %label, "captured chunk label");
            }
        }
    }

    fn size(&self) -> u64 {
        self.body.len() as u64
    }

    fn is_empty(&self) -> bool {
        self.lines == 0
    }
}

/// Partitions a line stream into threshold-bounded chunk files.
#[derive(Debug, Clone)]
pub struct ChunkWriter {
    output_dir: PathBuf,
    threshold: u64,
}

impl ChunkWriter {
    pub fn new(output_dir: impl Into<PathBuf>, threshold: u64) -> Self {
        ChunkWriter {
            output_dir: output_dir.into(),
            threshold,
        }
    }

    /// Consume `lines`, writing a file each time the running size reaches the
    /// threshold and once more for any remainder at the end of input.
    ///
    /// Chunks already written stay on disk when a later read or write fails.
    pub fn write_chunks<I>(&self, lines: I) -> Result<Vec<WrittenChunk>, ChunkError>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let mut written = Vec::new();
        let mut chunk = Chunk::new(1);

        for line in lines {
            let line = line.map_err(ChunkError::Read)?;
            chunk.push(&line);
            if chunk.size() >= self.threshold {
                let next = Chunk::new(chunk.index + 1);
                written.push(self.flush(std::mem::replace(&mut chunk, next))?);
            }
        }

        if !chunk.is_empty() {
            written.push(self.flush(chunk)?);
        }
        Ok(written)
    }

    fn flush(&self, chunk: Chunk) -> Result<WrittenChunk, ChunkError> {
        let (label, label_source) = match chunk.label {
            Some(label) => (label, LabelSource::Timestamp),
            None => (sequence_label(chunk.index), LabelSource::Sequence),
        };
        let path = persist_chunk(&self.output_dir, &label, chunk.body.as_bytes())?;
        info!(
            chunk = chunk.index,
            bytes = chunk.body.len(),
            lines = chunk.lines,
            path = %path.display(),
            "wrote chunk"
        );
        Ok(WrittenChunk {
            path,
            index: chunk.index,
            bytes: chunk.body.len() as u64,
            lines: chunk.lines,
            label_source,
        })
    }
}

/// Fallback label for a chunk without a recognizable timestamp, e.g. `chunk0007`.
pub fn sequence_label(index: usize) -> String {
    format!("{CHUNK_LABEL_PREFIX}{index:0width$}", width = CHUNK_INDEX_WIDTH)
}

/// `<dir>/<label>.txt` for suffix 0, `<dir>/<label>_<suffix>.txt` otherwise.
pub fn candidate_path(dir: &Path, label: &str, suffix: usize) -> PathBuf {
    if suffix == 0 {
        dir.join(format!("{label}.{OUTPUT_EXTENSION}"))
    } else {
        dir.join(format!("{label}_{suffix}.{OUTPUT_EXTENSION}"))
    }
}

fn stage_chunk(dir: &Path, content: &[u8]) -> io::Result<NamedTempFile> {
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content)?;
    temp.flush()?;
    Ok(temp)
}

fn write_error(path: &Path, source: io::Error) -> ChunkError {
    ChunkError::Write {
        path: path.display().to_string(),
        source,
    }
}

/// Write `content` to a temp file in `dir`, then move it to the first free
/// candidate path. The no-clobber rename never replaces an existing file.
fn persist_chunk(dir: &Path, label: &str, content: &[u8]) -> Result<PathBuf, ChunkError> {
    let mut temp =
        stage_chunk(dir, content).map_err(|err| write_error(&candidate_path(dir, label, 0), err))?;

    let mut suffix = 0;
    loop {
        let path = candidate_path(dir, label, suffix);
        if path.exists() {
            debug!(path = %path.display(), "chunk path taken");
            suffix += 1;
            continue;
        }
        match temp.persist_noclobber(&path) {
            Ok(_) => return Ok(path),
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "chunk path taken");
                temp = err.file;
                suffix += 1;
            }
            Err(err) => return Err(write_error(&path, err.error)),
        }
    }
}
