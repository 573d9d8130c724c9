//! reqtrace: thin dispatcher over the traceability engine.
//!
//! Exit codes: 0 success, 1 validation failure (score below threshold or
//! unknown requirement), 2 fatal error.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reqtrace_core::{TraceConfig, TraceError};
use reqtrace_engine::coverage::VALIDATION_THRESHOLD;
use reqtrace_engine::vcs::GitGateway;
use reqtrace_engine::TraceEngine;

#[derive(Parser)]
#[command(name = "reqtrace")]
#[command(about = "Requirement traceability: link requirements to tests, branches, commits, and compliance")]
#[command(version)]
struct Cli {
    /// Project root (defaults to the current directory).
    #[arg(long, global = true)]
    project_root: Option<PathBuf>,
    /// Config file path (defaults to <project-root>/reqtrace.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan all artifacts, build the matrix, sign and persist it.
    Generate,
    /// Score one requirement's coverage against the 80% threshold.
    Validate {
        /// Requirement id (REQ-###; loose forms like req-44 are accepted).
        requirement_id: String,
    },
    /// Print the coverage summary.
    Coverage,
    /// Write the audit export artifacts (HTML, CSV, JSON, Markdown).
    AuditExport {
        /// Output directory (defaults to the configured audit-export dir).
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Build the config once: explicit file, or <root>/reqtrace.toml when
/// present, or defaults. The CLI flag overrides the file's project root.
fn load_config(cli: &Cli) -> Result<TraceConfig, String> {
    let root = cli
        .project_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));

    let config_path = cli.config.clone().or_else(|| {
        let candidate = root.join("reqtrace.toml");
        candidate.is_file().then_some(candidate)
    });

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            toml::from_str::<TraceConfig>(&content)
                .map_err(|e| format!("invalid config {}: {e}", path.display()))?
        }
        None => TraceConfig::default(),
    };

    if cli.project_root.is_some() || config.project_root.is_none() {
        config.project_root = Some(root);
    }
    Ok(config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let gateway = GitGateway::new(
        &config.effective_project_root(),
        config.effective_max_commits(),
    );
    let engine = TraceEngine::new(&config, &gateway);

    match run(&cli.command, &engine, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(
    command: &Commands,
    engine: &TraceEngine<'_>,
    config: &TraceConfig,
) -> Result<ExitCode, TraceError> {
    match command {
        Commands::Generate => {
            let matrix = engine.generate()?;
            println!(
                "matrix generated: {} requirements, {} tests, {} features",
                matrix.requirements.len(),
                matrix.tests.len(),
                matrix.features.len(),
            );
            println!(
                "requirement coverage: {}%",
                matrix.coverage.requirements.percentage
            );
            if let Some(trail) = &matrix.audit_trail {
                println!("signature: {}", trail.signature);
            }
            println!(
                "persisted to {}",
                config.effective_matrix_path().display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { requirement_id } => match engine.validate(requirement_id) {
            Ok(score) => {
                println!("{}: {}% coverage", score.id, score.percentage);
                for gap in &score.gaps {
                    println!("  gap: {gap}");
                }
                if score.passes() {
                    println!("PASS (threshold {VALIDATION_THRESHOLD}%)");
                    Ok(ExitCode::SUCCESS)
                } else {
                    println!("FAIL (threshold {VALIDATION_THRESHOLD}%)");
                    Ok(ExitCode::from(1))
                }
            }
            Err(TraceError::UnknownRequirement { id }) => {
                eprintln!("requirement not found: {id}");
                Ok(ExitCode::from(1))
            }
            Err(e) => Err(e),
        },
        Commands::Coverage => {
            let summary = engine.coverage_summary()?;
            println!(
                "requirements: {}/{} tested ({}%)",
                summary.requirements.tested,
                summary.requirements.total,
                summary.requirements.percentage,
            );
            println!(
                "features: {}/{} linked ({}%), {}/{} tested ({}%)",
                summary.features.with_requirements,
                summary.features.total,
                summary.features.with_requirements_percentage,
                summary.features.with_tested_requirements,
                summary.features.total,
                summary.features.with_tested_requirements_percentage,
            );
            for (name, fw) in &summary.compliance {
                println!(
                    "compliance {}: {}/{} clauses ({}%)",
                    name, fw.covered_clauses, fw.total_clauses, fw.coverage_percentage,
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::AuditExport { output } => {
            let written = engine.audit_export(output.as_deref())?;
            for path in written {
                println!("wrote {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
