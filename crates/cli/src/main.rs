use clap::Parser;
use polybuild::{BuildManifest, BuildTarget, HttpStatusSink, Orchestrator};
use polybuild_runner::{ShellExecutor, ZipArchiver};
use std::{path::PathBuf, process::ExitCode};

/// Drive a multi-target build run from a manifest: each target is built in
/// turn, progress is reported to the configured status endpoint, and a
/// timing report is written at the end of the run.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
  /// Path to the build manifest
  #[arg(long, short)]
  manifest: PathBuf,

  /// Override the manifest's report output path
  #[arg(long)]
  report: Option<PathBuf>,

  /// Override the manifest's status endpoint
  #[arg(long)]
  endpoint: Option<String>,

  /// Build only the listed targets, e.g. --target windows --target webgl
  #[arg(long = "target", value_name = "TARGET")]
  targets: Vec<BuildTarget>,
}

#[tokio::main]
async fn main() -> ExitCode {
  polybuild_logger::init_logger();

  let cli = Cli::parse();

  match run(cli).await {
    // The report file records which targets failed and why.
    Ok(true) => ExitCode::SUCCESS,
    Ok(false) => ExitCode::from(1),
    Err(err) => {
      log::error!("{}", err);
      ExitCode::from(2)
    }
  }
}

async fn run(cli: Cli) -> polybuild::Result<bool> {
  let config = tokio::fs::read_to_string(&cli.manifest).await.map_err(|err| {
    polybuild::Error::manifest_error(format!(
      "Failed to read {}: {}",
      cli.manifest.display(),
      err
    ))
  })?;

  let mut manifest = BuildManifest::from_str(&config)?;

  if let Some(report_path) = cli.report {
    manifest.report_path = report_path;
  }

  if let Some(endpoint) = cli.endpoint {
    manifest.endpoint = Some(endpoint);
  }

  if !cli.targets.is_empty() {
    manifest.retain_targets(&cli.targets);

    if manifest.targets.is_empty() {
      return Err(polybuild::Error::manifest_error(
        "None of the requested targets are in the manifest",
      ));
    }
  }

  let mut builder = Orchestrator::builder()
    .executor(ShellExecutor)
    .archiver(ZipArchiver);

  if let Some(endpoint) = &manifest.endpoint {
    builder = builder.sink(HttpStatusSink::new(endpoint));
  }

  let orchestrator = builder.build()?;

  let signal = orchestrator.signal();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      log::warn!("Interrupt received, cancelling build run");
      signal.cancel();
    }
  });

  let report = orchestrator.run(&manifest).await?;

  for target in report.failed_targets() {
    let record = report.record(target);
    log::error!(
      "{} failed: {}",
      target,
      record.reason.as_deref().unwrap_or("unknown")
    );
  }

  Ok(report.all_succeeded())
}
