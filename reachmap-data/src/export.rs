//! Writing river documents to per-state shards and the end-to-end pipeline.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use reachmap_core::{
    FeatureError, KmlDocument, ReachPages, ReachSource, RiverGroup, SourceError,
    build_river_document, group_reaches,
};
use thiserror::Error;

use crate::kml::{KmlError, encode_document};

/// Output root used when no directory is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Errors raised by [`OutputWriter::write`] and [`export_all`].
#[derive(Debug, Error)]
pub enum ExportError {
    /// The reach source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// A reach could not be converted into features.
    #[error(transparent)]
    Feature(#[from] FeatureError),
    /// A shard directory could not be created.
    #[error("failed to create directory for {path}: {source}")]
    CreateDir {
        /// File whose parent could not be created.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// A shard file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// File that failed to write.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The document could not be encoded.
    #[error("failed to encode document for {path}: {source}")]
    Encode {
        /// File the document was destined for.
        path: Utf8PathBuf,
        /// Encoder error.
        #[source]
        source: KmlError,
    },
}

/// Totals reported after a completed export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportSummary {
    /// Rivers exported.
    pub rivers: usize,
    /// Reaches exported across all rivers.
    pub reaches: usize,
    /// Files written across all state shards.
    pub files: usize,
}

/// Sanitise a river name into a file name.
///
/// # Examples
///
/// ```
/// use reachmap_data::river_file_name;
///
/// assert_eq!(river_file_name("Salmon/Snake"), "Salmon-Snake.kml");
/// ```
#[must_use]
pub fn river_file_name(river: &str) -> String {
    let mut name = river.replace(['/', '\\'], "-");
    name.push_str(".kml");
    name
}

/// Sanitise a state key into a single directory name below the output root.
///
/// Separators become `-` and the dot-only names `.` and `..` are replaced, so
/// the result never leaves the root.
///
/// # Examples
///
/// ```
/// use reachmap_data::state_dir_name;
///
/// assert_eq!(state_dir_name("OR"), "OR");
/// assert_eq!(state_dir_name("../x"), "..-x");
/// assert_eq!(state_dir_name(".."), "--");
/// ```
#[must_use]
pub fn state_dir_name(key: &str) -> String {
    let name = key.replace(['/', '\\'], "-");
    if name.chars().all(|c| c == '.') {
        "-".repeat(name.len().max(1))
    } else {
        name
    }
}

/// Path of the shard for `river` under state `key`.
#[must_use]
pub fn destination(root: &Utf8Path, key: &str, river: &str) -> Utf8PathBuf {
    root.join(state_dir_name(key)).join(river_file_name(river))
}

/// Writes one copy of a river document per state the river touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputWriter {
    root: Utf8PathBuf,
}

impl Default for OutputWriter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl OutputWriter {
    /// Create a writer rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `document` once for every state key of `group`.
    ///
    /// Existing files are overwritten. A group with no keys writes nothing.
    /// Paths are returned in key order.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError`] on the first directory, encoding, or write
    /// failure.
    pub fn write(
        &self,
        group: &RiverGroup,
        document: &KmlDocument,
    ) -> Result<Vec<Utf8PathBuf>, ExportError> {
        let Some(first) = group.states.first() else {
            debug!("river {:?} has no state keys; nothing written", group.river);
            return Ok(Vec::new());
        };

        let bytes =
            encode_document(document, Vec::new()).map_err(|source| ExportError::Encode {
                path: destination(&self.root, first, &group.river),
                source,
            })?;

        let mut written = Vec::with_capacity(group.states.len());
        for key in &group.states {
            let path = destination(&self.root, key, &group.river);
            write_bytes(&path, &bytes)?;
            debug!("wrote {path}");
            written.push(path);
        }
        Ok(written)
    }
}

fn write_bytes(path: &Utf8Path, bytes: &[u8]) -> Result<(), ExportError> {
    reachmap_fs::ensure_parent_dir(path).map_err(|source| ExportError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = reachmap_fs::create_utf8_file(path).map_err(write_err)?;
    file.write_all(bytes).map_err(write_err)?;
    file.flush().map_err(write_err)
}

/// Fetch every reach from `source`, group by river and write each river.
///
/// # Errors
///
/// Aborts with the first source, feature or output error.
pub fn export_all<S: ReachSource + ?Sized>(
    source: &S,
    writer: &OutputWriter,
    page_size: u32,
) -> Result<ExportSummary, ExportError> {
    let reaches = ReachPages::with_page_size(source, page_size).collect::<Result<Vec<_>, _>>()?;
    let groups = group_reaches(reaches);

    let mut summary = ExportSummary::default();
    for group in &groups {
        let document = build_river_document(group)?;
        let written = writer.write(group, &document)?;
        info!(
            "exported {} ({} reaches) to {} file(s)",
            group.river,
            group.reaches.len(),
            written.len()
        );
        summary.rivers += 1;
        summary.reaches += group.reaches.len();
        summary.files += written.len();
    }
    Ok(summary)
}
