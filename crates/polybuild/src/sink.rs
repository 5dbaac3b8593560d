use crate::{Error, Result, StatusReport};
use std::time::Duration;

/// # StatusSink
/// Delivers a serialized [`StatusReport`] to a remote collector after state
/// transitions. Sinks are advisory telemetry: the orchestrator logs a failed
/// publish as a warning and carries on, so implementations should not retry.
#[async_trait::async_trait]
pub trait StatusSink: Send + Sync {
  async fn publish(&self, report: &StatusReport) -> Result<()>;
}

/// Posts reports as JSON to a configured HTTP endpoint.
pub struct HttpStatusSink {
  endpoint: String,
  client: reqwest::Client,
}

impl HttpStatusSink {
  pub fn new(endpoint: impl Into<String>) -> Self {
    HttpStatusSink {
      endpoint: endpoint.into(),
      client: reqwest::Client::new(),
    }
  }
}

#[async_trait::async_trait]
impl StatusSink for HttpStatusSink {
  async fn publish(&self, report: &StatusReport) -> Result<()> {
    let response = self
      .client
      .post(&self.endpoint)
      .header("Content-Type", "application/json")
      .timeout(Duration::from_secs(10))
      .json(report)
      .send()
      .await
      .map_err(Error::sink_error)?;

    let status = response.status();
    if !status.is_success() {
      return Err(Error::sink_error(format!(
        "{} responded with {}",
        self.endpoint, status
      )));
    }

    // The collector's response body carries nothing the run depends on.
    if let Ok(body) = response.text().await {
      if !body.is_empty() {
        log::debug!("Status endpoint response: {}", body);
      }
    }

    Ok(())
  }
}
