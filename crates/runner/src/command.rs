use polybuild::{Error, Result};
use std::{path::Path, process::Stdio};
use tokio::{
  io::{AsyncBufReadExt, BufReader},
  process::Command as Cmd,
};

/// Last stderr lines kept as the failure reason for the report.
const STDERR_TAIL_LINES: usize = 10;

pub struct CommandOutput {
  pub success: bool,
  pub exit_code: Option<i32>,
  pub stderr_tail: Vec<String>,
}

/// A toolchain invocation run through the system shell, with output streamed
/// into the log while the command runs.
pub struct ShellCommand {
  command: Cmd,
}

impl ShellCommand {
  pub fn new(cmd: impl Into<String>) -> Self {
    if cfg!(target_os = "windows") {
      ShellCommand::powershell(cmd)
    } else {
      ShellCommand::sh(cmd)
    }
  }

  pub fn powershell(cmd: impl Into<String>) -> Self {
    let cmd: String = cmd.into();
    let mut command = Cmd::new("powershell.exe");

    command
      .arg("-NoProfile")
      .arg("-NonInteractive")
      .arg("-Command")
      .arg(cmd);

    ShellCommand { command }
  }

  pub fn sh(cmd: impl Into<String>) -> Self {
    let cmd: String = cmd.into();
    let mut command = Cmd::new("sh");

    command.arg("-c").arg(cmd);

    ShellCommand { command }
  }

  pub fn env(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
    self.command.env(key.into(), value.into());

    self
  }

  pub fn dir(&mut self, dir: &Path) -> &mut Self {
    self.command.current_dir(dir);

    self
  }

  pub async fn run(&mut self) -> Result<CommandOutput> {
    let mut child = self
      .command
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .map_err(|err| Error::executor_error(format!("Failed to spawn build command: {}", err)))?;

    let stdout = child
      .stdout
      .take()
      .ok_or(Error::executor_error("Failed to capture command stdout"))?;
    let stderr = child
      .stderr
      .take()
      .ok_or(Error::executor_error("Failed to capture command stderr"))?;

    let stdout_task = tokio::spawn(async move {
      let mut lines = BufReader::new(stdout).lines();
      while let Ok(Some(line)) = lines.next_line().await {
        log::info!("{}", line);
      }
    });

    let stderr_task = tokio::spawn(async move {
      let mut tail: Vec<String> = Vec::new();
      let mut lines = BufReader::new(stderr).lines();

      while let Ok(Some(line)) = lines.next_line().await {
        log::error!("{}", line);

        if tail.len() == STDERR_TAIL_LINES {
          tail.remove(0);
        }
        tail.push(line);
      }

      tail
    });

    let status = child
      .wait()
      .await
      .map_err(|err| Error::executor_error(format!("Failed to wait for build command: {}", err)))?;

    let _ = stdout_task.await;
    let stderr_tail = stderr_task.await.unwrap_or_default();

    Ok(CommandOutput {
      success: status.success(),
      exit_code: status.code(),
      stderr_tail,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_run_success() {
    let output = ShellCommand::new("exit 0").run().await.unwrap();

    assert!(output.success);
    assert_eq!(output.exit_code, Some(0));
    assert!(output.stderr_tail.is_empty());
  }

  #[tokio::test]
  async fn test_run_captures_stderr_tail() {
    let output = ShellCommand::new("echo one >&2; echo two >&2; exit 3")
      .run()
      .await
      .unwrap();

    assert!(!output.success);
    assert_eq!(output.exit_code, Some(3));
    assert_eq!(output.stderr_tail, vec!["one".to_string(), "two".to_string()]);
  }

  #[tokio::test]
  async fn test_stderr_tail_is_bounded() {
    let output = ShellCommand::new("for i in $(seq 1 20); do echo line$i >&2; done; exit 1")
      .run()
      .await
      .unwrap();

    assert_eq!(output.stderr_tail.len(), STDERR_TAIL_LINES);
    assert_eq!(output.stderr_tail.last().unwrap(), "line20");
  }

  #[tokio::test]
  async fn test_env_is_visible_to_command() {
    let mut command = ShellCommand::new("test \"$POLYBUILD_TEST_ENV\" = expected");
    command.env("POLYBUILD_TEST_ENV", "expected");

    let output = command.run().await.unwrap();

    assert!(output.success);
  }

  #[tokio::test]
  async fn test_dir_sets_working_directory() {
    let dir = std::env::temp_dir().join(format!("polybuild-cmd-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();

    let mut command = ShellCommand::new("echo marker > created-here");
    command.dir(&dir);

    let output = command.run().await.unwrap();

    assert!(output.success);
    assert!(dir.join("created-here").is_file());

    std::fs::remove_dir_all(&dir).unwrap();
  }
}
