use parking_lot::Mutex;
use std::{
  future::Future,
  sync::Arc,
  task::{Context, Poll, Waker},
};

#[derive(Debug)]
struct SignalState {
  cancelled: bool,
  waker: Option<Waker>,
}

/// Cancellation signal for a build run. Cloned handles share state: the CLI
/// hands one clone to the Ctrl-C handler while the orchestrator selects on
/// [`BuildSignal::cancelled`] around the in-flight executor call.
#[derive(Clone, Debug)]
pub struct BuildSignal {
  state: Arc<Mutex<SignalState>>,
}

pub struct Cancelled<'a> {
  signal: &'a BuildSignal,
}

impl BuildSignal {
  pub fn new() -> Self {
    Self {
      state: Arc::new(Mutex::new(SignalState {
        cancelled: false,
        waker: None,
      })),
    }
  }

  pub fn cancel(&self) {
    let mut state = self.state.lock();
    state.cancelled = true;

    if let Some(waker) = state.waker.take() {
      waker.wake();
    }
  }

  pub fn is_cancelled(&self) -> bool {
    self.state.lock().cancelled
  }

  /// Resolves once the run is cancelled.
  pub fn cancelled(&self) -> Cancelled {
    Cancelled { signal: self }
  }
}

impl Default for BuildSignal {
  fn default() -> Self {
    Self::new()
  }
}

impl<'a> Future for Cancelled<'a> {
  type Output = ();

  fn poll(self: std::pin::Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    let mut state = self.signal.state.lock();

    if state.cancelled {
      Poll::Ready(())
    } else {
      state.waker = Some(cx.waker().clone());
      Poll::Pending
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_wait_for_cancel() {
    let signal = BuildSignal::new();
    assert_eq!(signal.is_cancelled(), false);

    let cloned_signal = signal.clone();

    tokio::spawn(async move {
      tokio::time::sleep(std::time::Duration::from_millis(100)).await;
      cloned_signal.cancel();
    });

    signal.cancelled().await;
    assert_eq!(signal.is_cancelled(), true);
  }

  #[tokio::test]
  async fn test_cancel_before_wait() {
    let signal = BuildSignal::new();
    signal.cancel();

    // Resolves immediately when the signal already fired.
    signal.cancelled().await;
    assert_eq!(signal.is_cancelled(), true);
  }
}
