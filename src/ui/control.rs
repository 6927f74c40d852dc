use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// How long a finished action shows its outcome before it can be used again.
pub const RESTORE_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControlState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

#[derive(Debug, Default)]
struct Inner {
    state: ControlState,
    restore: Option<CancellationToken>,
}

/// A button that locks while its request runs.
#[derive(Debug, Clone, Default)]
pub struct ActionControl {
    inner: Arc<Mutex<Inner>>,
}

impl ActionControl {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> ControlState {
        self.lock().state
    }

    /// Returns `false` when a request is already running.
    pub fn begin(&self) -> bool {
        let mut inner = self.lock();
        if inner.state == ControlState::InFlight {
            return false;
        }

        if let Some(pending) = inner.restore.take() {
            pending.cancel();
        }
        inner.state = ControlState::InFlight;
        true
    }

    /// Shows the outcome, then returns to idle after [`RESTORE_DELAY`].
    pub fn finish(&self, ok: bool) {
        let token = CancellationToken::new();
        {
            let mut inner = self.lock();
            inner.state = if ok {
                ControlState::Succeeded
            } else {
                ControlState::Failed
            };
            inner.restore = Some(token.clone());
        }

        // Without a runtime the outcome stays until the next `begin`.
        let Ok(runtime) = Handle::try_current() else {
            return;
        };

        let inner = self.inner.clone();
        runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(RESTORE_DELAY) => {
                    let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
                    inner.state = ControlState::Idle;
                    inner.restore = None;
                }
            }
        });
    }
}
