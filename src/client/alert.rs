//! Banner shown above the book list, dismissed automatically after a delay

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug, Default)]
struct Slot {
    /// Bumped on every change so a stale dismissal cannot clear a newer banner
    generation: u64,
    banner: Option<Banner>,
}

/// Single banner slot. A pending dismissal is aborted when the banner is
/// replaced or cleared, and when the alert is dropped.
pub struct Alert {
    slot: Arc<Mutex<Slot>>,
    dismiss: Option<JoinHandle<()>>,
    ttl: Duration,
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Alert {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            dismiss: None,
            ttl,
        }
    }

    /// Show a banner that disappears after the configured delay.
    /// Must be called from within a tokio runtime.
    pub fn show(&mut self, kind: AlertKind, message: impl Into<String>) {
        let generation = self.replace(Some(Banner {
            kind,
            message: message.into(),
        }));

        let slot = Arc::clone(&self.slot);
        let ttl = self.ttl;
        self.dismiss = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut slot = lock(&slot);
            if slot.generation == generation {
                slot.banner = None;
            }
        }));
    }

    /// Show a banner that stays until replaced or cleared
    pub fn pin(&mut self, kind: AlertKind, message: impl Into<String>) {
        self.replace(Some(Banner {
            kind,
            message: message.into(),
        }));
    }

    pub fn clear(&mut self) {
        self.replace(None);
    }

    pub fn current(&self) -> Option<Banner> {
        lock(&self.slot).banner.clone()
    }

    fn replace(&mut self, banner: Option<Banner>) -> u64 {
        if let Some(handle) = self.dismiss.take() {
            handle.abort();
        }
        let mut slot = lock(&self.slot);
        slot.generation += 1;
        slot.banner = banner;
        slot.generation
    }
}

impl Drop for Alert {
    fn drop(&mut self) {
        if let Some(handle) = self.dismiss.take() {
            handle.abort();
        }
    }
}
