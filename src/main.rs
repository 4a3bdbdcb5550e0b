mod cli;
mod config;

use bom_reconciler::adapters::outbound::console::{render_run_summary, StderrProgressReporter};
use bom_reconciler::adapters::outbound::filesystem::{FilePresenter, FileSystemWriter, StdoutPresenter};
use bom_reconciler::adapters::outbound::formatters::{CycloneDxFormatter, MarkdownFormatter};
use bom_reconciler::adapters::outbound::network::{CachingReleaseRepository, Sw360ReleaseRepository};
use bom_reconciler::adapters::outbound::parsers::{CycloneDxFileParser, SpdxFileParser};
use bom_reconciler::application::dto::{ManualComponent, ReconcileRequest};
use bom_reconciler::application::use_cases::{CompareWithTrackerUseCase, ReconcileBomUseCase};
use bom_reconciler::bom_reconciliation::domain::{Bom, ProjectType};
use bom_reconciler::ports::outbound::{OutputPresenter, StatusReportFormatter};
use bom_reconciler::shared::error::{ExitCode, MergeError, SbomError};
use bom_reconciler::shared::Result;
use cli::Args;
use config::ConfigFile;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable read for the SW360 token when none is configured
const DEFAULT_TOKEN_ENV: &str = "SW360_TOKEN";

/// Tracker comparison settings, resolved from CLI and config
#[derive(Debug, Clone, PartialEq)]
struct TrackerSettings {
    url: String,
    token_env: String,
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Parse command-line arguments (clap exits with code 2 on error)
    let args = Args::parse_args();
    init_tracing(args.verbose);

    let exit_code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            exit_code_for(&e)
        }
    };

    process::exit(exit_code.as_i32());
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(&args)?;
    let tracker = tracker_settings(&args, config.as_ref());
    let request = build_request(args, config)?;

    // Resolve the token before writing anything
    let tracker = match tracker {
        Some(settings) => Some((read_token(&settings.token_env)?, settings)),
        None => None,
    };

    // Create adapters (Dependency Injection)
    let use_case = ReconcileBomUseCase::new(
        CycloneDxFileParser::new(),
        SpdxFileParser::new(),
        FileSystemWriter::new(),
        CycloneDxFormatter::new(),
        StderrProgressReporter::new(),
    );

    let project_name = request.project_name.clone();
    let response = use_case.execute(request)?;

    if let Some((token, settings)) = tracker {
        compare_with_tracker(&project_name, &response.bom, &settings, token).await?;
    }

    eprint!(
        "{}",
        render_run_summary(&response, std::io::stderr().is_terminal())
    );

    Ok(response.status.exit_code())
}

async fn compare_with_tracker(
    project_name: &str,
    bom: &Bom,
    settings: &TrackerSettings,
    token: String,
) -> Result<()> {
    let repository = CachingReleaseRepository::new(Sw360ReleaseRepository::new(&settings.url, token)?);
    let use_case = CompareWithTrackerUseCase::new(repository, StderrProgressReporter::new());

    let report = use_case.execute(project_name, bom).await;
    let output = MarkdownFormatter::new().format_report(&report)?;

    let presenter: Box<dyn OutputPresenter> = match &settings.report {
        Some(path) => Box::new(FilePresenter::new(path.clone())),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&output)
}

fn load_config(args: &Args) -> Result<Option<ConfigFile>> {
    match &args.config {
        Some(path) => {
            let config = config::load_config_from_path(path)?;
            eprintln!("📄 Loaded config from: {}", path.display());
            Ok(Some(config))
        }
        None => {
            let dir = std::env::current_dir()?;
            let config = config::discover_config(&dir)?;
            if config.is_some() {
                eprintln!(
                    "📄 Auto-discovered config file: {}",
                    dir.join(config::CONFIG_FILENAME).display()
                );
            }
            Ok(config)
        }
    }
}

/// Merges CLI arguments over the config file into one request
///
/// Single values given on the command line win. A list given on the command
/// line (inputs, exclusions) replaces the config list.
fn build_request(args: Args, config: Option<ConfigFile>) -> Result<ReconcileRequest> {
    let config = config.unwrap_or_default();

    let project_name = args
        .project_name
        .or(config.project_name)
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| SbomError::Validation {
            message: "A project name is required.\n\n💡 Hint: Pass --project-name or set project_name in the config file.".to_string(),
        })?;

    let project_type = match (args.project_type, config.project_type) {
        (Some(project_type), _) => project_type,
        (None, Some(value)) => value.parse::<ProjectType>()?,
        (None, None) => {
            return Err(SbomError::Validation {
                message: "A project type is required.\n\n💡 Hint: Pass --project-type or set project_type in the config file.".to_string(),
            }
            .into())
        }
    };

    let output_folder = args
        .output_folder
        .or(config.output_folder)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut request = ReconcileRequest::new(project_name, project_type, output_folder);
    request.inputs = if args.inputs.is_empty() {
        config.inputs.unwrap_or_default()
    } else {
        args.inputs
    };
    if request.inputs.is_empty() {
        return Err(SbomError::Validation {
            message: "No input files given.\n\n💡 Hint: Pass -i <FILE> or list inputs in the config file.".to_string(),
        }
        .into());
    }

    request.comparison_bom = args.comparison_bom.or(config.comparison_bom);
    if let Some(suffix) = args.output_suffix.or(config.output_suffix) {
        request.output_suffix = suffix;
    }
    request.exclude_components = if args.exclude.is_empty() {
        config.exclude_components.unwrap_or_default()
    } else {
        args.exclude
    };
    request.include_components = config
        .include_components
        .unwrap_or_default()
        .into_iter()
        .map(|c| ManualComponent {
            name: c.name,
            version: c.version,
            purl: c.purl,
            group: c.group,
        })
        .collect();
    request.internal_repos = config.internal_repos.unwrap_or_default();

    Ok(request)
}

fn tracker_settings(args: &Args, config: Option<&ConfigFile>) -> Option<TrackerSettings> {
    let sw360 = config.and_then(|c| c.sw360.as_ref());
    let url = args
        .sw360_url
        .clone()
        .or_else(|| sw360.map(|s| s.url.clone()))?;
    let token_env = args
        .sw360_token_env
        .clone()
        .or_else(|| sw360.and_then(|s| s.token_env.clone()))
        .unwrap_or_else(|| DEFAULT_TOKEN_ENV.to_string());

    Some(TrackerSettings {
        url,
        token_env,
        report: args.report.clone(),
    })
}

fn read_token(token_env: &str) -> Result<String> {
    std::env::var(token_env)
        .ok()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| {
            SbomError::Validation {
                message: format!(
                    "SW360 token not found in environment variable {}.\n\n💡 Hint: Export the token or point --sw360-token-env at the variable holding it.",
                    token_env
                ),
            }
            .into()
        })
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    error
        .downcast_ref::<MergeError>()
        .map(MergeError::exit_code)
        .unwrap_or(ExitCode::ApplicationError)
}
