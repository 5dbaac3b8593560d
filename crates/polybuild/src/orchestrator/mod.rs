mod builder;

pub use builder::OrchestratorBuilder;

use crate::{
  Archiver, BuildExecutor, BuildManifest, BuildResult, BuildSignal, Error, Result, StatusReport,
  StatusSink, TargetEntry, TargetState,
};
use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

/// # Orchestrator
/// Drives a build run: every selected target moves through its state machine
/// strictly in declaration order, one at a time, because the underlying
/// executor is a singleton, non-reentrant resource.
///
/// One target failing never aborts the rest of the run. The only error `run`
/// itself returns is a failure to persist the final report, since the report
/// file is the authoritative record of the run while the status sink is
/// advisory.
pub struct Orchestrator {
  pub(crate) executor: Arc<Box<dyn BuildExecutor>>,
  pub(crate) archiver: Option<Arc<Box<dyn Archiver>>>,
  pub(crate) sink: Option<Arc<Box<dyn StatusSink>>>,
  pub(crate) signal: BuildSignal,
}

impl Orchestrator {
  pub fn builder() -> OrchestratorBuilder {
    OrchestratorBuilder::new()
  }

  /// Handle for cancelling the run from outside the orchestrator.
  pub fn signal(&self) -> BuildSignal {
    self.signal.clone()
  }

  pub async fn run(&self, manifest: &BuildManifest) -> Result<StatusReport> {
    let selected = manifest.selected_targets();

    log::info!(
      "Starting build run for {} with {} targets",
      manifest.product_name,
      selected.len()
    );

    let mut report = StatusReport::new(&manifest.product_name, &selected);
    report.push_id = manifest.push_id.clone();
    report.repository_name = manifest.repository_name.clone();
    report.branch_name = manifest.branch_name.clone();

    for target in &selected {
      report.transition(*target, TargetState::Waiting);
    }

    // One publish for the initialization batch, before any build starts.
    let any_telemetry = manifest
      .targets
      .iter()
      .any(|entry| entry.config.reports_telemetry);
    self.publish(any_telemetry, &report).await;

    for entry in &manifest.targets {
      if self.signal.is_cancelled() {
        log::warn!("Build run cancelled, {} not attempted", entry.target);
        continue;
      }

      self.run_target(entry, &mut report).await;
    }

    self.persist(&report, &manifest.report_path).await?;

    let failed = report.failed_targets();
    if failed.is_empty() {
      log::info!("Build run finished, all {} targets succeeded", selected.len());
    } else {
      log::error!(
        "Build run finished, {} of {} targets failed",
        failed.len(),
        selected.len()
      );
    }

    Ok(report)
  }

  async fn run_target(&self, entry: &TargetEntry, report: &mut StatusReport) {
    let target = entry.target;
    let config = &entry.config;

    let output_dir = match &config.output_dir {
      Some(output_dir) => output_dir.clone(),
      None => {
        log::error!("{} has no output directory configured", target);
        report.fail(target, "missing output directory");
        self.publish(config.reports_telemetry, report).await;
        return;
      }
    };

    report.transition(target, TargetState::Building);
    log::info!("Building {}", target);
    self.publish(config.reports_telemetry, report).await;

    let result = tokio::select! {
      result = self.executor.build(target, config) => result,
      _ = self.signal.cancelled() => {
        log::warn!("{} build cancelled", target);
        report.fail(target, "build cancelled");
        self.publish(config.reports_telemetry, report).await;
        return;
      }
    };

    let result = match result {
      Ok(result) => result,
      // An executor error is no different from a reported failure.
      Err(err) => BuildResult::failed(err.to_string()),
    };

    if let BuildResult::Failed { reason } = result {
      log::error!("{} build failed: {}", target, reason);
      report.fail(target, reason);
      self.publish(config.reports_telemetry, report).await;
      return;
    }

    if config.requires_archiving {
      report.transition(target, TargetState::Zipping);
      self.publish(config.reports_telemetry, report).await;

      if let Err(err) = self.archive_output(&output_dir).await {
        // A built-but-unpackaged artifact is not a success.
        log::error!("Failed to archive {} build output: {}", target, err);
        report.fail(target, err.to_string());
        self.publish(config.reports_telemetry, report).await;
        return;
      }
    }

    report.transition(target, TargetState::Succeeded);

    match report.record(target).duration_seconds {
      Some(duration) => log::info!("{} build succeeded in {} seconds", target, duration),
      None => log::info!("{} build succeeded", target),
    }

    self.publish(config.reports_telemetry, report).await;
  }

  async fn archive_output(&self, output_dir: &Path) -> Result<()> {
    let archiver = self
      .archiver
      .as_ref()
      .ok_or(Error::configuration_error(
        "No archiver is configured for this run",
      ))?;

    let mut dest_file = output_dir.as_os_str().to_owned();
    dest_file.push(".zip");

    archiver.archive(output_dir, &PathBuf::from(dest_file)).await
  }

  async fn publish(&self, enabled: bool, report: &StatusReport) {
    if !enabled {
      return;
    }

    if let Some(sink) = &self.sink {
      if let Err(err) = sink.publish(report).await {
        log::warn!("Failed to publish status report: {}", err);
      }
    }
  }

  async fn persist(&self, report: &StatusReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
      .map_err(|err| Error::persistence_error(format!("Failed to serialize report: {}", err)))?;

    if let Some(parent) = path.parent() {
      if !parent.as_os_str().is_empty() {
        tokio::fs::create_dir_all(parent).await.map_err(|err| {
          Error::persistence_error(format!(
            "Failed to create report directory {}: {}",
            parent.display(),
            err
          ))
        })?;
      }
    }

    tokio::fs::write(path, json).await.map_err(|err| {
      Error::persistence_error(format!(
        "Failed to write report to {}: {}",
        path.display(),
        err
      ))
    })?;

    log::info!("Build report written to {}", path.display());

    Ok(())
  }
}
