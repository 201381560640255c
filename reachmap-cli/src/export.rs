//! Export command implementation for the reachmap CLI.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use reachmap_core::{DEFAULT_PAGE_SIZE, ReachSource};
use reachmap_data::graphql::{GraphqlSourceConfig, HttpReachSource};
use reachmap_data::{DEFAULT_OUTPUT_DIR, ExportSummary, OutputWriter, export_all};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ENDPOINT, ARG_OUTPUT_DIR, ARG_PAGE_SIZE, ARG_TIMEOUT_SECS, ARG_USER_AGENT, CliError,
    ENV_PAGE_SIZE,
};

/// CLI arguments for the `export` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Page through the American Whitewater GraphQL API, group \
                 reaches by river and write one KML document per river into \
                 a directory for every state it touches. Options can come \
                 from CLI flags, configuration files, or environment \
                 variables.",
    about = "Export every reach as KML"
)]
#[ortho_config(prefix = "REACHMAP")]
pub(crate) struct ExportArgs {
    /// GraphQL endpoint URL.
    #[arg(long = ARG_ENDPOINT, value_name = "url")]
    #[serde(default)]
    pub(crate) endpoint: Option<String>,
    /// User-Agent header identifying this client.
    #[arg(long = ARG_USER_AGENT, value_name = "tag")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
    /// Root directory for the per-state shards (default `data`).
    #[arg(long = ARG_OUTPUT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
    /// Reaches requested per page.
    #[arg(long = ARG_PAGE_SIZE, value_name = "n")]
    #[serde(default)]
    pub(crate) page_size: Option<u32>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl ExportArgs {
    pub(crate) fn into_config(self) -> Result<ExportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ExportConfig::try_from(merged)
    }
}

/// Resolved `export` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExportConfig {
    /// GraphQL endpoint and transport settings.
    pub(crate) source: GraphqlSourceConfig,
    /// Root directory for output shards.
    pub(crate) output_dir: Utf8PathBuf,
    /// Reaches requested per page.
    pub(crate) page_size: u32,
}

impl ExportConfig {
    pub(crate) fn validate_output_dir(&self) -> Result<(), CliError> {
        Self::require_directory_or_absent(&self.output_dir)
    }

    fn require_directory_or_absent(path: &Utf8Path) -> Result<(), CliError> {
        match reachmap_fs::file_is_file(path) {
            Ok(false) => Ok(()),
            Ok(true) => Err(CliError::OutputDirectoryIsFile {
                path: path.to_path_buf(),
            }),
            Err(source) => Err(CliError::InspectOutputDirectory {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<ExportArgs> for ExportConfig {
    type Error = CliError;

    fn try_from(args: ExportArgs) -> Result<Self, Self::Error> {
        let page_size = args.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(CliError::InvalidPageSize {
                field: ARG_PAGE_SIZE,
                env: ENV_PAGE_SIZE,
            });
        }

        let mut source = GraphqlSourceConfig::default();
        if let Some(endpoint) = args.endpoint {
            source.endpoint = endpoint;
        }
        if let Some(user_agent) = args.user_agent {
            source.user_agent = user_agent;
        }
        if let Some(secs) = args.timeout_secs {
            source.timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            source,
            output_dir: args
                .output_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT_DIR)),
            page_size,
        })
    }
}

pub(super) fn run_export(args: ExportArgs) -> Result<ExportSummary, CliError> {
    let config = resolve_export_config(args)?;
    let source = HttpReachSource::with_config(config.source.clone()).map_err(|source| {
        CliError::BuildSource {
            endpoint: config.source.endpoint.clone(),
            source,
        }
    })?;
    run_export_with(&config, &source)
}

pub(super) fn run_export_with(
    config: &ExportConfig,
    source: &dyn ReachSource,
) -> Result<ExportSummary, CliError> {
    log::info!(
        "exporting reaches from {} into {}",
        config.source.endpoint,
        config.output_dir
    );
    let writer = OutputWriter::new(config.output_dir.clone());
    Ok(export_all(source, &writer, config.page_size)?)
}

pub(super) fn resolve_export_config(args: ExportArgs) -> Result<ExportConfig, CliError> {
    let config = args.into_config()?;
    config.validate_output_dir()?;
    Ok(config)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ExportConfig, CliError> {
    let merged = ExportArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ExportConfig::try_from(merged)
}
