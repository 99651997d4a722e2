use tokio::task::JoinHandle;
use tracing::warn;

/// Handle to one lookup cycle started by a controller.
///
/// Awaiting [`LookupHandle::settled`] returns once the lookup has committed
/// its outcome or was cancelled. Dropping the handle does not cancel anything.
#[must_use = "await `settled()` to observe the outcome, or drop to run in the background"]
pub struct LookupHandle {
    task: Option<JoinHandle<()>>,
}

impl LookupHandle {
    /// A cycle that finished synchronously (no network access needed)
    pub(crate) fn settled_now() -> Self {
        Self { task: None }
    }

    pub(crate) fn spawned(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    pub fn is_pending(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub async fn settled(self) {
        if let Some(task) = self.task {
            if let Err(e) = task.await {
                warn!(error = %e, "Lookup task did not complete");
            }
        }
    }
}
