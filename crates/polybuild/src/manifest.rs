use crate::{BuildTarget, Error, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::PathBuf};

fn default_capability() -> bool {
  true
}

/// Per-target build configuration. Beyond the output location, the
/// orchestrator treats every field as opaque and passes it straight to the
/// executor.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
  /// Directory the toolchain writes its build output into. Required to run
  /// a target; a target without one fails before the executor is invoked.
  #[serde(rename = "output-dir")]
  pub output_dir: Option<PathBuf>,
  /// Artifact extension for the platform, e.g. `.apk` or `.exe`.
  pub extension: Option<String>,
  /// Toolchain invocation used by the shell executor.
  #[serde(rename = "build-command")]
  pub build_command: Option<String>,
  /// Free-form toolchain settings (scripting backend, compression format,
  /// ...). Carried per target so builds do not depend on ambient state.
  #[serde(default, rename = "toolchain-options")]
  pub toolchain_options: HashMap<String, String>,
  /// Whether the build output directory is compressed into an artifact.
  /// Platforms whose output already is the final artifact turn this off.
  #[serde(default = "default_capability", rename = "requires-archiving")]
  pub requires_archiving: bool,
  /// Whether this target's transitions are published to the status sink.
  #[serde(default = "default_capability", rename = "reports-telemetry")]
  pub reports_telemetry: bool,
}

impl Default for TargetConfig {
  fn default() -> Self {
    TargetConfig {
      output_dir: None,
      extension: None,
      build_command: None,
      toolchain_options: HashMap::new(),
      requires_archiving: true,
      reports_telemetry: true,
    }
  }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetEntry {
  pub target: BuildTarget,
  #[serde(flatten)]
  pub config: TargetConfig,
}

/// User-facing description of a build run, usually loaded from a YAML file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildManifest {
  #[serde(rename = "product-name")]
  pub product_name: String,
  /// Where the final report is written. The write is the authoritative
  /// record of the run and must succeed.
  #[serde(rename = "report-path")]
  pub report_path: PathBuf,
  /// Remote status collector. Without one the run is local-only.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub endpoint: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none", rename = "push-id")]
  pub push_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none", rename = "repository-name")]
  pub repository_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none", rename = "branch-name")]
  pub branch_name: Option<String>,
  /// Targets are built strictly in declaration order.
  pub targets: Vec<TargetEntry>,
}

impl BuildManifest {
  pub fn from_str(config: &str) -> Result<Self> {
    let manifest: BuildManifest =
      serde_yaml::from_str(config).map_err(Error::manifest_error)?;

    Self::validate(&manifest)?;

    Ok(manifest)
  }

  fn validate(manifest: &BuildManifest) -> Result<()> {
    if manifest.targets.is_empty() {
      return Err(Error::manifest_error(
        "Build manifest must select at least one target",
      ));
    }

    let mut seen: Vec<BuildTarget> = Vec::new();
    for entry in &manifest.targets {
      if seen.contains(&entry.target) {
        return Err(Error::manifest_error(format!(
          "Target {} is selected more than once",
          entry.target
        )));
      }

      seen.push(entry.target);
    }

    Ok(())
  }

  pub fn selected_targets(&self) -> Vec<BuildTarget> {
    self.targets.iter().map(|entry| entry.target).collect()
  }

  /// Narrows the run to `selected`, keeping declaration order.
  pub fn retain_targets(&mut self, selected: &[BuildTarget]) {
    self.targets.retain(|entry| selected.contains(&entry.target));
  }
}
