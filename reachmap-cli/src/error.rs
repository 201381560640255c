//! Error types emitted by the reachmap CLI.
//!
//! Keep this error type reasonably small, as CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use reachmap_data::ExportError;
use reachmap_data::graphql::SourceBuildError;
use thiserror::Error;

/// Errors emitted by the reachmap CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// The page size resolved to zero.
    #[error("{field} must be at least 1 (set --{field} or {env})")]
    InvalidPageSize {
        /// Flag carrying the page size.
        field: &'static str,
        /// Environment variable carrying the page size.
        env: &'static str,
    },
    /// The output directory path names an existing file.
    #[error("output directory {path:?} is a file")]
    OutputDirectoryIsFile {
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// The output directory could not be inspected.
    #[error("failed to inspect output directory {path:?}: {source}")]
    InspectOutputDirectory {
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Constructing the GraphQL source failed.
    #[error("failed to build reach source for {endpoint:?}: {source}")]
    BuildSource {
        /// Endpoint the source was configured for.
        endpoint: String,
        /// Construction failure.
        #[source]
        source: SourceBuildError,
    },
    /// The export pipeline failed.
    #[error("export failed: {0}")]
    Export(#[source] Box<ExportError>),
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        Self::Export(Box::new(err))
    }
}
