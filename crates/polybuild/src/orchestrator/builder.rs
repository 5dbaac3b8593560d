use super::Orchestrator;
use crate::{Archiver, BuildExecutor, BuildSignal, Error, Result, StatusSink};
use std::sync::Arc;

pub struct OrchestratorBuilder {
  executor: Option<Arc<Box<dyn BuildExecutor>>>,
  archiver: Option<Arc<Box<dyn Archiver>>>,
  sink: Option<Arc<Box<dyn StatusSink>>>,
  signal: Option<BuildSignal>,
}

impl OrchestratorBuilder {
  pub fn new() -> Self {
    OrchestratorBuilder {
      executor: None,
      archiver: None,
      sink: None,
      signal: None,
    }
  }

  pub fn executor<T>(mut self, executor: T) -> Self
  where
    T: BuildExecutor + 'static,
  {
    self.executor = Some(Arc::new(Box::new(executor)));
    self
  }

  pub fn archiver<T>(mut self, archiver: T) -> Self
  where
    T: Archiver + 'static,
  {
    self.archiver = Some(Arc::new(Box::new(archiver)));
    self
  }

  pub fn sink<T>(mut self, sink: T) -> Self
  where
    T: StatusSink + 'static,
  {
    self.sink = Some(Arc::new(Box::new(sink)));
    self
  }

  pub fn signal(mut self, signal: BuildSignal) -> Self {
    self.signal = Some(signal);
    self
  }

  pub fn build(self) -> Result<Orchestrator> {
    let executor = self.executor.ok_or(Error::init_error(
      "Build executor is not set in orchestrator builder",
    ))?;

    let orchestrator = Orchestrator {
      executor,
      archiver: self.archiver,
      sink: self.sink,
      signal: self.signal.unwrap_or_else(BuildSignal::new),
    };

    Ok(orchestrator)
  }
}

impl Default for OrchestratorBuilder {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_executor_is_required() {
    let res = OrchestratorBuilder::new().build();

    assert_eq!(
      res.err(),
      Some(Error::init_error(
        "Build executor is not set in orchestrator builder"
      ))
    );
  }
}
