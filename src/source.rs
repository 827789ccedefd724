//! Sequence file source.
//!
//! Walks a directory for raw `seq_*.json` files, deserializes each one, and
//! formats every session it holds per the active [`FormatConfig`]. Files are
//! independent of one another, so the directory APIs come in sequential and
//! rayon-parallel flavors; example ids are derived from each session's own
//! identifiers, never from processing order.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::FormatConfig;
use crate::constants::source::{SEQUENCE_FILE_EXTENSION, SEQUENCE_FILE_PREFIX};
use crate::data::RawSequenceFile;
use crate::errors::FormatError;
use crate::features::Example;
use crate::sequence::format_session;
use crate::types::ExampleId;

/// Formats a directory of raw sequence files into examples.
pub struct SequenceFileSource {
    root: PathBuf,
    config: FormatConfig,
}

impl SequenceFileSource {
    /// Create a source rooted at `root` with the given formatting config.
    pub fn new(root: impl Into<PathBuf>, config: FormatConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// List the sequence files under the root, sorted by path.
    ///
    /// Only files named `seq_*.json` qualify; unreadable directory entries
    /// are skipped with a warning.
    pub fn sequence_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("skipping unreadable directory entry: {err}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| is_sequence_file(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        files.sort();
        files
    }

    /// Format one sequence file into examples.
    ///
    /// Every session in the file's `data` array is formatted; any error
    /// aborts this file only.
    pub fn format_file(&self, path: &Path) -> Result<Vec<(ExampleId, Example)>, FormatError> {
        let raw = fs::read_to_string(path)?;
        let file: RawSequenceFile =
            serde_json::from_str(&raw).map_err(|source| FormatError::Json {
                path: path.display().to_string(),
                source,
            })?;
        let mut examples = Vec::new();
        for session in &file.data {
            examples.extend(format_session(session, &self.config)?);
        }
        debug!(
            path = %path.display(),
            examples = examples.len(),
            "formatted sequence file"
        );
        Ok(examples)
    }

    /// Format every sequence file under the root, in path order.
    ///
    /// The first malformed file aborts the run; callers that prefer to skip
    /// bad files can iterate [`Self::sequence_files`] and call
    /// [`Self::format_file`] per file.
    pub fn format_dir(&self) -> Result<Vec<(ExampleId, Example)>, FormatError> {
        let mut examples = Vec::new();
        for path in self.sequence_files() {
            examples.extend(self.format_file(&path)?);
        }
        Ok(examples)
    }

    /// Format every sequence file under the root in parallel.
    ///
    /// Each file's sequence is fully assembled, padded, and flattened before
    /// being emitted, so files can be processed independently. Output order
    /// still follows path order.
    pub fn format_dir_parallel(&self) -> Result<Vec<(ExampleId, Example)>, FormatError> {
        let per_file: Vec<Vec<(ExampleId, Example)>> = self
            .sequence_files()
            .par_iter()
            .map(|path| self.format_file(path))
            .collect::<Result<_, _>>()?;
        Ok(per_file.into_iter().flatten().collect())
    }
}

fn is_sequence_file(path: &Path) -> bool {
    let named_like_sequence = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.starts_with(SEQUENCE_FILE_PREFIX));
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == SEQUENCE_FILE_EXTENSION);
    named_like_sequence && has_extension
}
