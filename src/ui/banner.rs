use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

pub const BANNER_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
struct BannerState {
    message: String,
    active: bool,
    dismissal: Option<CancellationToken>,
}

/// The single place failures are shown to the user. Each message hides itself after
/// [`BANNER_TIMEOUT`] unless a newer one replaced it first.
#[derive(Debug, Clone, Default)]
pub struct ErrorBanner {
    state: Arc<Mutex<BannerState>>,
}

impl ErrorBanner {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BannerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Outside a tokio runtime the message stays up until dismissed.
    pub fn show(&self, message: impl Into<String>) {
        let token = CancellationToken::new();
        {
            let mut state = self.lock();
            if let Some(previous) = state.dismissal.replace(token.clone()) {
                previous.cancel();
            }
            state.message = message.into();
            state.active = true;
            log::warn!("{}", state.message);
        }

        let Ok(runtime) = Handle::try_current() else {
            return;
        };

        let state = self.state.clone();
        runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(BANNER_TIMEOUT) => {
                    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                    state.active = false;
                    state.dismissal = None;
                }
            }
        });
    }

    pub fn dismiss(&self) {
        let mut state = self.lock();
        if let Some(pending) = state.dismissal.take() {
            pending.cancel();
        }
        state.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.lock().active
    }

    /// The last message shown, even after it was hidden.
    pub fn message(&self) -> String {
        self.lock().message.clone()
    }
}
