use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::extract::extractor::ExtractConfig;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "locator-catalog",
    version,
    about = "Synthesize ranked element locators from Angular component templates"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: locator-catalog.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover components under one or more roots and emit the catalog
    Scan {
        /// Project root to scan; repeat for several roots (order = discovery order)
        #[arg(long = "root", required = true)]
        roots: Vec<String>,

        /// Output format: json, yaml or console
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Append a JSONL analysis trace to this file
        #[arg(long)]
        trace: Option<String>,
    },

    /// Run the extractor pipeline over a single markup file
    Inspect {
        /// Path to an HTML template
        #[arg(long)]
        template: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `locator-catalog.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    #[serde(default = "default_json")]
    pub format: String,

    pub output: Option<String>,

    pub trace: Option<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: default_exclude_dirs(),
            format: default_json(),
            output: None,
            trace: None,
        }
    }
}

// Serde default helpers
fn default_exclude_dirs() -> Vec<String> {
    ["node_modules", "dist", ".angular", ".git", "coverage"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_json() -> String { "json".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("locator-catalog.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

/// Scan settings after applying CLI overrides on top of the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedScan {
    pub roots: Vec<String>,
    pub format: String,
    pub output: Option<String>,
    pub trace: Option<String>,
    pub exclude_dirs: Vec<String>,
}

/// Merge CLI arguments over config values (CLI > config > defaults).
pub fn resolve_scan(
    config: &ScanConfig,
    roots: Vec<String>,
    format: Option<String>,
    output: Option<String>,
    trace: Option<String>,
) -> ResolvedScan {
    ResolvedScan {
        roots,
        format: format.unwrap_or_else(|| config.format.clone()),
        output: output.or_else(|| config.output.clone()),
        trace: trace.or_else(|| config.trace.clone()),
        exclude_dirs: config.exclude_dirs.clone(),
    }
}
