#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("Failed to parse build manifest: {0}")]
  ManifestError(String),

  #[error("Invalid target configuration: {0}")]
  ConfigurationError(String),

  #[error("Build executor error: {0}")]
  ExecutorError(String),

  #[error("Failed to archive build output: {0}")]
  ArchiverError(String),

  #[error("Failed to publish status report: {0}")]
  SinkError(String),

  #[error("Failed to persist build report: {0}")]
  PersistenceError(String),

  #[error("Failed to initialize orchestrator: {0}")]
  InitError(String),
}

impl Error {
  pub fn manifest_error<T: ToString>(message: T) -> Self {
    Self::ManifestError(message.to_string())
  }

  pub fn configuration_error<T: ToString>(message: T) -> Self {
    Self::ConfigurationError(message.to_string())
  }

  pub fn executor_error<T: ToString>(message: T) -> Self {
    Self::ExecutorError(message.to_string())
  }

  pub fn archiver_error<T: ToString>(message: T) -> Self {
    Self::ArchiverError(message.to_string())
  }

  pub fn sink_error<T: ToString>(message: T) -> Self {
    Self::SinkError(message.to_string())
  }

  pub fn persistence_error<T: ToString>(message: T) -> Self {
    Self::PersistenceError(message.to_string())
  }

  pub fn init_error<T: ToString>(message: T) -> Self {
    Self::InitError(message.to_string())
  }
}

// implement Eq and PartialEq for Error so that we can compare errors in tests
impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Self::ManifestError(a), Self::ManifestError(b)) => a == b,
      (Self::ConfigurationError(a), Self::ConfigurationError(b)) => a == b,
      (Self::ExecutorError(a), Self::ExecutorError(b)) => a == b,
      (Self::ArchiverError(a), Self::ArchiverError(b)) => a == b,
      (Self::SinkError(a), Self::SinkError(b)) => a == b,
      (Self::PersistenceError(a), Self::PersistenceError(b)) => a == b,
      (Self::InitError(a), Self::InitError(b)) => a == b,
      _ => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_eq() {
    assert_eq!(Error::manifest_error("hello"), Error::manifest_error("hello"));
    assert_eq!(
      Error::configuration_error("hello"),
      Error::configuration_error("hello")
    );
    assert_eq!(Error::executor_error("hello"), Error::executor_error("hello"));
    assert_eq!(Error::archiver_error("hello"), Error::archiver_error("hello"));
    assert_eq!(Error::sink_error("hello"), Error::sink_error("hello"));
    assert_eq!(
      Error::persistence_error("hello"),
      Error::persistence_error("hello")
    );
    assert_eq!(Error::init_error("hello"), Error::init_error("hello"));
  }

  #[test]
  fn test_ne() {
    assert_ne!(Error::manifest_error("hello"), Error::manifest_error("world"));
    assert_ne!(Error::sink_error("hello"), Error::sink_error("world"));
    assert_ne!(Error::sink_error("hello"), Error::archiver_error("hello"));
    assert_ne!(Error::executor_error("hello"), Error::executor_error("world"));
  }

  #[test]
  fn test_display() {
    assert_eq!(
      Error::configuration_error("missing output directory").to_string(),
      "Invalid target configuration: missing output directory"
    );
  }
}
