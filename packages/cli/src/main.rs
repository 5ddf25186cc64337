// Main entry point for the docchain CLI

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pipeline::testing::MockCollaborator;
use pipeline::{Collaborator, OpenAiCollaborator, Pipeline, PipelineConfig, PipelineState};

/// Turn a document into verified facts, an outline, and a validated summary.
#[derive(Parser, Debug)]
#[command(name = "docchain", version, about)]
struct Args {
    /// Input document file (omit to read from stdin with --stdin)
    input: Option<PathBuf>,

    /// Read the document from stdin
    #[arg(long)]
    stdin: bool,

    /// Output directory for the artifact files
    #[arg(long, default_value = "outputs")]
    out: PathBuf,

    /// Model identifier for the collaborator
    #[arg(long)]
    model: Option<String>,

    /// Per-stage timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Run against a scripted mock collaborator instead of a real model
    #[arg(long)]
    mock: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pipeline=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(Args::parse()).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let text = read_document(&args)?;

    let mut config = PipelineConfig::default().with_stage_timeout_secs(args.timeout_secs);
    if let Some(model) = &args.model {
        config = config.with_model(model);
    }

    if args.mock {
        let collaborator = MockCollaborator::default();
        run_and_write(collaborator, config, &text, &args.out).await
    } else {
        let collaborator = OpenAiCollaborator::from_env()
            .context("collaborator credentials unavailable (set OPENAI_API_KEY or use --mock)")?
            .with_config(&config);
        run_and_write(collaborator, config, &text, &args.out).await
    }
}

async fn run_and_write<C: Collaborator>(
    collaborator: C,
    config: PipelineConfig,
    text: &str,
    out_dir: &PathBuf,
) -> Result<ExitCode> {
    let pipeline = Pipeline::new(collaborator).with_config(config);
    let outcome = pipeline.run(text).await;

    let written = pipeline::io::write_artifacts(out_dir, &outcome)
        .context("failed to write artifact files")?;
    for path in &written {
        println!("Wrote: {}", path.display());
    }

    if let Some(report) = &outcome.report {
        println!(
            "Validation: {} ({} errors, {} warnings)",
            if report.passed() { "pass" } else { "fail" },
            report.error_count(),
            report.warning_count(),
        );
    }
    if outcome.state == PipelineState::Aborted {
        if let Some(failure) = &outcome.failure {
            eprintln!("Run aborted in the {} stage: {}", failure.stage, failure.error);
        }
    }

    Ok(ExitCode::from(outcome.exit_code()))
}

fn read_document(args: &Args) -> Result<String> {
    if args.stdin {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read document from stdin")?;
        return Ok(text);
    }

    let path = args
        .input
        .as_ref()
        .context("no input: pass a document path or --stdin")?;
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read document from {}", path.display()))
}
