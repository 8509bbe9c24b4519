//! Single-slot transient message banner.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::{sync::Mutex, time::Instant};
use tracing::debug;

use crate::surface::DashboardSurface;

/// How long a message stays visible unless superseded first.
pub const DISPLAY_DURATION: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub expires_at: Instant,
}

/// Holds at most one visible message. A newer `show` replaces both the
/// displayed message and the pending auto-hide of the previous one; only the
/// final message's timer takes effect. No queueing.
pub struct NotificationChannel {
    surface: Arc<dyn DashboardSurface>,
    slot: Mutex<Option<Notice>>,
    generation: AtomicU64,
}

impl NotificationChannel {
    pub fn new(surface: Arc<dyn DashboardSurface>) -> Arc<Self> {
        Arc::new(Self {
            surface,
            slot: Mutex::new(None),
            generation: AtomicU64::new(0),
        })
    }

    pub async fn show(self: &Arc<Self>, text: impl Into<String>, kind: NoticeKind) {
        let notice = Notice {
            text: text.into(),
            kind,
            expires_at: Instant::now() + DISPLAY_DURATION,
        };
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut slot = self.slot.lock().await;
            *slot = Some(notice.clone());
        }
        self.surface.show_notice(&notice);

        let channel = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep_until(notice.expires_at).await;
            let mut slot = channel.slot.lock().await;
            if channel.generation.load(Ordering::SeqCst) != generation {
                debug!(generation, "hide timer superseded by a newer message");
                return;
            }
            if slot.take().is_some() {
                channel.surface.clear_notice();
            }
        });
    }

    /// The currently displayed message, if its expiry has not fired yet.
    pub async fn current(&self) -> Option<Notice> {
        self.slot.lock().await.clone()
    }
}
