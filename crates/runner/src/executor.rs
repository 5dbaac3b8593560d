use crate::ShellCommand;
use polybuild::{BuildExecutor, BuildResult, BuildTarget, Error, Result, TargetConfig};

/// # ShellExecutor
/// Runs the per-target `build-command` through the system shell. The actual
/// toolchain stays external; this executor only wires the target's
/// configuration into the command's environment and interprets its exit
/// status:
///
/// - `POLYBUILD_TARGET`: the target being built
/// - `POLYBUILD_OUTPUT_DIR` / `POLYBUILD_EXTENSION`: artifact location
/// - `POLYBUILD_OPT_*`: one variable per `toolchain-options` entry
pub struct ShellExecutor;

#[async_trait::async_trait]
impl BuildExecutor for ShellExecutor {
  async fn build(&self, target: BuildTarget, config: &TargetConfig) -> Result<BuildResult> {
    let build_command = config
      .build_command
      .as_ref()
      .ok_or(Error::configuration_error("missing build command"))?;

    let mut command = ShellCommand::new(build_command);
    command.env("POLYBUILD_TARGET", target.to_string());

    if let Some(output_dir) = &config.output_dir {
      command.env("POLYBUILD_OUTPUT_DIR", output_dir.display().to_string());
    }

    if let Some(extension) = &config.extension {
      command.env("POLYBUILD_EXTENSION", extension);
    }

    for (key, value) in &config.toolchain_options {
      command.env(format!("POLYBUILD_OPT_{}", env_key(key)), value);
    }

    log::debug!("Running build command for {}: {}", target, build_command);

    let output = command.run().await?;

    if output.success {
      return Ok(BuildResult::Succeeded);
    }

    let reason = if output.stderr_tail.is_empty() {
      match output.exit_code {
        Some(code) => format!("build command exited with code {}", code),
        None => "build command was terminated by a signal".to_string(),
      }
    } else {
      output.stderr_tail.join("\n")
    };

    Ok(BuildResult::Failed { reason })
  }
}

fn env_key(key: &str) -> String {
  key.to_uppercase().replace('-', "_")
}
