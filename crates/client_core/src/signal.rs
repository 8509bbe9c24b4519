//! Shared loading indicator, reference counted across in-flight operations.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use crate::surface::DashboardSurface;

/// Process-wide loading signal. Every operation that reaches the network
/// holds a [`LoadingGuard`] for the duration of the call; the indicator is
/// visible while at least one guard is alive and hides when the count
/// returns to zero.
pub struct UiSignal {
    surface: Arc<dyn DashboardSurface>,
    in_flight: AtomicUsize,
}

impl UiSignal {
    pub fn new(surface: Arc<dyn DashboardSurface>) -> Arc<Self> {
        Arc::new(Self {
            surface,
            in_flight: AtomicUsize::new(0),
        })
    }

    /// Acquires the indicator for one operation. The returned guard releases
    /// it when dropped, on every exit path including unwinds.
    pub fn begin(self: &Arc<Self>) -> LoadingGuard {
        let previous = self.in_flight.fetch_add(1, Ordering::SeqCst);
        if previous == 0 {
            self.surface.set_loading(true);
        }
        LoadingGuard {
            signal: Arc::clone(self),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Clears the indicator unconditionally. Reserved for the top-level
    /// failure handler so a panicked operation cannot leave it stuck.
    pub fn force_idle(&self) {
        self.in_flight.store(0, Ordering::SeqCst);
        self.surface.set_loading(false);
    }
}

pub struct LoadingGuard {
    signal: Arc<UiSignal>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        // saturating: force_idle may already have zeroed the count
        let previous = self
            .signal
            .in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                Some(count.saturating_sub(1))
            })
            .unwrap_or(0);
        if previous == 1 {
            self.signal.surface.set_loading(false);
        }
    }
}
