use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TargetState {
  NotStarted,
  Waiting,
  Building,
  Zipping,
  Succeeded,
  Failed,
}

impl TargetState {
  pub fn is_terminal(&self) -> bool {
    matches!(self, TargetState::Succeeded | TargetState::Failed)
  }

  pub fn is_succeeded(&self) -> bool {
    matches!(self, TargetState::Succeeded)
  }

  /// States move forward only. `Waiting -> Failed` covers targets rejected
  /// before the executor runs, `Zipping -> Failed` covers archiver failures.
  pub fn can_transition_to(&self, next: TargetState) -> bool {
    matches!(
      (self, next),
      (TargetState::NotStarted, TargetState::Waiting)
        | (TargetState::Waiting, TargetState::Building)
        | (TargetState::Waiting, TargetState::Failed)
        | (TargetState::Building, TargetState::Zipping)
        | (TargetState::Building, TargetState::Succeeded)
        | (TargetState::Building, TargetState::Failed)
        | (TargetState::Zipping, TargetState::Succeeded)
        | (TargetState::Zipping, TargetState::Failed)
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_terminal() {
    assert!(!TargetState::NotStarted.is_terminal());
    assert!(!TargetState::Waiting.is_terminal());
    assert!(!TargetState::Building.is_terminal());
    assert!(!TargetState::Zipping.is_terminal());
    assert!(TargetState::Succeeded.is_terminal());
    assert!(TargetState::Failed.is_terminal());
  }

  #[test]
  fn test_allowed_transitions() {
    assert!(TargetState::NotStarted.can_transition_to(TargetState::Waiting));
    assert!(TargetState::Waiting.can_transition_to(TargetState::Building));
    assert!(TargetState::Waiting.can_transition_to(TargetState::Failed));
    assert!(TargetState::Building.can_transition_to(TargetState::Zipping));
    assert!(TargetState::Building.can_transition_to(TargetState::Succeeded));
    assert!(TargetState::Building.can_transition_to(TargetState::Failed));
    assert!(TargetState::Zipping.can_transition_to(TargetState::Succeeded));
    assert!(TargetState::Zipping.can_transition_to(TargetState::Failed));
  }

  #[test]
  fn test_rejected_transitions() {
    assert!(!TargetState::NotStarted.can_transition_to(TargetState::Building));
    assert!(!TargetState::NotStarted.can_transition_to(TargetState::Failed));
    assert!(!TargetState::Waiting.can_transition_to(TargetState::Zipping));
    assert!(!TargetState::Waiting.can_transition_to(TargetState::Succeeded));
    assert!(!TargetState::Zipping.can_transition_to(TargetState::Building));
    assert!(!TargetState::Succeeded.can_transition_to(TargetState::Failed));
    assert!(!TargetState::Failed.can_transition_to(TargetState::Waiting));

    // No state transitions to itself.
    for state in [
      TargetState::NotStarted,
      TargetState::Waiting,
      TargetState::Building,
      TargetState::Zipping,
      TargetState::Succeeded,
      TargetState::Failed,
    ] {
      assert!(!state.can_transition_to(state));
    }
  }

  #[test]
  fn test_serde_names() {
    assert_eq!(
      serde_json::to_string(&TargetState::NotStarted).unwrap(),
      "\"not_started\""
    );
    assert_eq!(
      serde_json::from_str::<TargetState>("\"zipping\"").unwrap(),
      TargetState::Zipping
    );
  }
}
