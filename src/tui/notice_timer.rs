//! Scheduled notice dismissal.
//!
//! Holds at most one pending dismissal task. Scheduling a new one aborts
//! the previous task first, so an older notice's timer never reports back
//! once it has been superseded.

use std::sync::mpsc::Sender;
use std::time::Duration;

use log::{debug, warn};
use tokio::task::AbortHandle;

use crate::core::action::Action;

#[derive(Debug, Default)]
pub struct NoticeTimer {
    pending: Option<AbortHandle>,
}

impl NoticeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `NoticeExpired { generation }` on `tx` after `after`, replacing any pending dismissal.
    pub fn schedule(&mut self, generation: u64, after: Duration, tx: Sender<Action>) {
        self.cancel();
        debug!("Scheduling dismissal of notice {} in {:?}", generation, after);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if tx.send(Action::NoticeExpired { generation }).is_err() {
                warn!("Failed to send NoticeExpired: receiver dropped");
            }
        });
        self.pending = Some(handle.abort_handle());
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for NoticeTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
