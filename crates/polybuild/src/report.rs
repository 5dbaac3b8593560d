use crate::{BuildTarget, TargetState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Time = chrono::DateTime<chrono::Utc>;

/// Progress of a single target within a build run.
///
/// `duration_seconds` is derived: it is present exactly when both timestamps
/// are, and holds their difference in whole seconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetRecord {
  pub state: TargetState,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub start_time: Option<Time>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub end_time: Option<Time>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub duration_seconds: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reason: Option<String>,
}

impl TargetRecord {
  fn new() -> Self {
    TargetRecord {
      state: TargetState::NotStarted,
      start_time: None,
      end_time: None,
      duration_seconds: None,
      reason: None,
    }
  }
}

/// The complete record of a build run across all selected targets.
///
/// The orchestrator is the only writer. The report is serialized after state
/// transitions for the status sink and once in full at run end for the
/// persisted report file; it is never read back during the run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
  pub product_name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub push_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub repository_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub branch_name: Option<String>,
  pub targets: BTreeMap<BuildTarget, TargetRecord>,
}

impl StatusReport {
  pub fn new(product_name: impl Into<String>, targets: &[BuildTarget]) -> Self {
    StatusReport {
      product_name: product_name.into(),
      push_id: None,
      repository_name: None,
      branch_name: None,
      targets: targets
        .iter()
        .map(|target| (*target, TargetRecord::new()))
        .collect(),
    }
  }

  /// Panics when `target` was not selected for this run. The target set is
  /// fixed at construction, so an unknown target is a caller bug.
  pub fn record(&self, target: BuildTarget) -> &TargetRecord {
    self
      .targets
      .get(&target)
      .unwrap_or_else(|| panic!("{} is not part of this build run", target))
  }

  /// Moves `target` to `state`, stamping `start_time` on entry to `Building`
  /// and `end_time` plus `duration_seconds` on entry to a terminal state when
  /// a build was started. Panics on an unknown target or a disallowed edge.
  pub fn transition(&mut self, target: BuildTarget, state: TargetState) {
    let record = self
      .targets
      .get_mut(&target)
      .unwrap_or_else(|| panic!("{} is not part of this build run", target));

    assert!(
      record.state.can_transition_to(state),
      "Illegal state transition for {}: {:?} -> {:?}",
      target,
      record.state,
      state
    );

    record.state = state;

    match state {
      TargetState::Building => {
        record.start_time = Some(chrono::Utc::now());
      }
      TargetState::Succeeded | TargetState::Failed => {
        if let Some(start_time) = record.start_time {
          let end_time = chrono::Utc::now();
          record.end_time = Some(end_time);
          record.duration_seconds = Some((end_time - start_time).num_seconds().max(0) as u64);
        }
      }
      _ => {}
    }
  }

  /// Marks `target` as failed with a reason for the persisted report.
  pub fn fail(&mut self, target: BuildTarget, reason: impl Into<String>) {
    self.transition(target, TargetState::Failed);

    if let Some(record) = self.targets.get_mut(&target) {
      record.reason = Some(reason.into());
    }
  }

  pub fn all_succeeded(&self) -> bool {
    self
      .targets
      .values()
      .all(|record| record.state.is_succeeded())
  }

  pub fn failed_targets(&self) -> Vec<BuildTarget> {
    self
      .targets
      .iter()
      .filter(|(_, record)| record.state == TargetState::Failed)
      .map(|(target, _)| *target)
      .collect()
  }
}
