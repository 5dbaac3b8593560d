use parking_lot::Mutex;
use polybuild::{
  BuildExecutor, BuildManifest, BuildResult, BuildSignal, BuildTarget, Orchestrator, StatusReport,
  StatusSink, TargetConfig, TargetState,
};
use std::{path::PathBuf, sync::Arc, time::Duration};

/// Executor that hangs until the run is cancelled, like a toolchain stuck on
/// a long compile.
struct SlowExecutor;

#[async_trait::async_trait]
impl BuildExecutor for SlowExecutor {
  async fn build(&self, _target: BuildTarget, _config: &TargetConfig) -> polybuild::Result<BuildResult> {
    tokio::time::sleep(Duration::from_secs(60)).await;
    Ok(BuildResult::Succeeded)
  }
}

#[derive(Clone)]
struct RecordingSink {
  reports: Arc<Mutex<Vec<StatusReport>>>,
}

#[async_trait::async_trait]
impl StatusSink for RecordingSink {
  async fn publish(&self, report: &StatusReport) -> polybuild::Result<()> {
    self.reports.lock().push(report.clone());
    Ok(())
  }
}

fn manifest(report_path: &PathBuf) -> BuildManifest {
  let config = format!(
    r#"
product-name: Example
report-path: {}
targets:
  - target: windows
    output-dir: out/windows
    extension: .exe
  - target: linux
    output-dir: out/linux
"#,
    report_path.display()
  );

  BuildManifest::from_str(&config).unwrap()
}

#[tokio::test]
async fn test_cancelled_run_fails_in_flight_target_and_stops() {
  let path =
    std::env::temp_dir().join(format!("polybuild-report-{}.json", uuid::Uuid::new_v4()));
  let manifest = manifest(&path);

  let sink = RecordingSink {
    reports: Arc::new(Mutex::new(Vec::new())),
  };
  let reports = sink.reports.clone();

  let signal = BuildSignal::new();
  let orchestrator = Orchestrator::builder()
    .executor(SlowExecutor)
    .sink(sink)
    .signal(signal.clone())
    .build()
    .unwrap();

  tokio::spawn(async move {
    tokio::time::sleep(Duration::from_millis(100)).await;
    signal.cancel();
  });

  let report = orchestrator.run(&manifest).await.unwrap();

  // The in-flight target is failed, not left hanging in Building.
  let windows = report.record(BuildTarget::Windows);
  assert_eq!(windows.state, TargetState::Failed);
  assert_eq!(windows.reason.as_deref(), Some("build cancelled"));

  // The remaining target was never attempted.
  assert_eq!(report.record(BuildTarget::Linux).state, TargetState::Waiting);

  // The cancellation was published and the partial report persisted.
  let last = reports.lock().last().cloned().unwrap();
  assert_eq!(
    last.record(BuildTarget::Windows).state,
    TargetState::Failed
  );

  let json = std::fs::read_to_string(&path).unwrap();
  let persisted: StatusReport = serde_json::from_str(&json).unwrap();
  assert_eq!(persisted, report);
}

#[tokio::test]
async fn test_signal_handle_from_orchestrator() {
  let path =
    std::env::temp_dir().join(format!("polybuild-report-{}.json", uuid::Uuid::new_v4()));
  let manifest = manifest(&path);

  let orchestrator = Orchestrator::builder().executor(SlowExecutor).build().unwrap();

  let signal = orchestrator.signal();
  tokio::spawn(async move {
    tokio::time::sleep(Duration::from_millis(100)).await;
    signal.cancel();
  });

  let report = orchestrator.run(&manifest).await.unwrap();

  assert_eq!(
    report.record(BuildTarget::Windows).state,
    TargetState::Failed
  );
}
