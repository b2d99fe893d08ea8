//! Command-line and environment configuration

use std::path::PathBuf;

use clap::Args;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::acquire::FanOutPolicy;
use crate::client::DEFAULT_BASE_URL;
use crate::derive::StatBarScale;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Catalog flags, flattened into the binary's argument parser.
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Base URL of the catalog service
    #[arg(long, env = "POKECATALOG_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Only fetch the first N entries of the listing
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Per-request timeout in seconds (minimum 1)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Publish the records that loaded even if some detail requests fail
    #[arg(long)]
    pub partial: bool,

    /// Cap stat bars at 100% instead of letting values above 255 overflow
    #[arg(long)]
    pub clamp_stat_bars: bool,

    /// Write tracing output to this file (filter via POKECATALOG_LOG)
    #[arg(long, env = "POKECATALOG_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Resolved configuration shared by the effect handler and the state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogConfig {
    pub base_url: String,
    pub limit: Option<usize>,
    pub timeout_secs: u64,
    pub policy: FanOutPolicy,
    pub stat_bars: StatBarScale,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            policy: FanOutPolicy::FailFast,
            stat_bars: StatBarScale::Literal,
        }
    }
}

impl From<&CatalogArgs> for CatalogConfig {
    fn from(args: &CatalogArgs) -> Self {
        Self {
            base_url: args.base_url.clone(),
            limit: args.limit.map(|limit| limit as usize),
            timeout_secs: args.timeout_secs.max(1),
            policy: if args.partial {
                FanOutPolicy::Partial
            } else {
                FanOutPolicy::FailFast
            },
            stat_bars: if args.clamp_stat_bars {
                StatBarScale::Clamped
            } else {
                StatBarScale::Literal
            },
        }
    }
}
