use crate::{BuildTarget, Result, TargetConfig};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum BuildResult {
  Succeeded,
  Failed { reason: String },
}

impl BuildResult {
  pub fn failed(reason: impl Into<String>) -> Self {
    BuildResult::Failed {
      reason: reason.into(),
    }
  }
}

/// # BuildExecutor
/// The toolchain capability that actually compiles a target. The orchestrator
/// never interprets toolchain specifics: it hands over the per-target
/// configuration and acts on the outcome.
///
/// Returning `Err` is treated exactly like `BuildResult::Failed`: the target
/// is recorded as failed and the run moves on to the next target. Executors
/// are assumed to be singleton, non-reentrant resources; the orchestrator
/// never calls `build` concurrently.
#[async_trait::async_trait]
pub trait BuildExecutor: Send + Sync {
  async fn build(&self, target: BuildTarget, config: &TargetConfig) -> Result<BuildResult>;
}

/// Compresses a finished build output directory into a single artifact file.
#[async_trait::async_trait]
pub trait Archiver: Send + Sync {
  async fn archive(&self, source_dir: &Path, dest_file: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_failed_constructor() {
    assert_eq!(
      BuildResult::failed("toolchain missing"),
      BuildResult::Failed {
        reason: "toolchain missing".to_string()
      }
    );
  }
}
