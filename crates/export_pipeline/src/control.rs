//! The export trigger and its single in-flight guard

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Trigger label while idle
pub const IDLE_LABEL: &str = "Download as PDF";
/// Trigger label while an export runs
pub const BUSY_LABEL: &str = "Generating PDF...";

/// State of the export trigger.
///
/// Clones share state. At most one [`ExportGuard`] exists at a time; while
/// it lives the trigger is disabled.
#[derive(Debug, Clone, Default)]
pub struct ExportControl {
    busy: Arc<AtomicBool>,
}

impl ExportControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the trigger accepts a click
    pub fn is_enabled(&self) -> bool {
        !self.busy.load(Ordering::SeqCst)
    }

    pub fn label(&self) -> &'static str {
        if self.is_enabled() {
            IDLE_LABEL
        } else {
            BUSY_LABEL
        }
    }

    /// Disable the trigger, or return `None` if an export is in flight
    pub fn try_acquire(&self) -> Option<ExportGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| ExportGuard {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Re-enables the trigger when dropped
#[derive(Debug)]
pub struct ExportGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}
