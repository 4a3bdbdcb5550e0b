use clap::Parser;
use std::path::PathBuf;

use bom_reconciler::bom_reconciliation::domain::ProjectType;

/// Reconcile CycloneDX and SPDX SBOMs into one CycloneDX 1.6 BOM
#[derive(Parser, Debug)]
#[command(name = "bom-reconciler")]
#[command(version)]
#[command(
    about = "Reconcile CycloneDX and SPDX SBOMs into one CycloneDX 1.6 BOM",
    long_about = None
)]
pub struct Args {
    /// Path to a config file (defaults to ./bom-reconciler.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project name, used in output file names
    #[arg(short = 'n', long)]
    pub project_name: Option<String>,

    /// Project type: npm, nuget, maven, python, conan, debian, alpine, cargo, choco
    #[arg(short = 't', long, value_name = "TYPE")]
    pub project_type: Option<ProjectType>,

    /// CycloneDX or SPDX input file (repeatable; replaces config inputs)
    #[arg(short, long = "input", value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Baseline BOM to reconcile against
    #[arg(long, value_name = "FILE")]
    pub comparison_bom: Option<PathBuf>,

    /// Folder the BOM is written to
    #[arg(short, long, value_name = "DIR")]
    pub output_folder: Option<PathBuf>,

    /// Output file suffix (default: Bom.cdx.json)
    #[arg(long, value_name = "SUFFIX")]
    pub output_suffix: Option<String>,

    /// Exclude components: a purl, or name:version where * is a wildcard
    /// Can be specified multiple times: -e "pkg:npm/left-pad@1.3.0" -e "debug-*:*"
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// SW360 base URL; enables the tracker comparison
    #[arg(long, value_name = "URL")]
    pub sw360_url: Option<String>,

    /// Environment variable holding the SW360 token (default: SW360_TOKEN)
    #[arg(long, value_name = "VAR")]
    pub sw360_token_env: Option<String>,

    /// Write the tracker status report (Markdown) to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Print debug diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
