//! Shared test harness modules for the reachmap CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;
use crate::export::{
    ExportArgs, ExportConfig, config_from_layers_for_test, resolve_export_config, run_export_with,
};

mod helpers;
mod unit;
