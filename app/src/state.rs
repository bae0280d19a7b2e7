//! Application state management

use cover_model::{CoverPageInfo, FieldName};
use cover_render::CoverRegion;
use export_pipeline::ExportPipeline;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

/// Scale of the on-screen preview panel
pub const PREVIEW_SCALE: f32 = 0.6;

/// Global application state
pub struct AppState {
    /// The form's field record
    info: Mutex<CoverPageInfo>,
    /// The preview surface exports are captured from
    pub region: CoverRegion,
    pub pipeline: ExportPipeline,
}

impl AppState {
    pub fn new(pipeline: ExportPipeline) -> Self {
        Self {
            info: Mutex::new(CoverPageInfo::new()),
            region: CoverRegion::preview(PREVIEW_SCALE),
            pipeline,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CoverPageInfo> {
        match self.info.lock() {
            Ok(info) => info,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn set_field(&self, field: FieldName, value: impl Into<String>) {
        self.lock().set(field, value);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// A copy of the record as it is right now
    pub fn snapshot(&self) -> CoverPageInfo {
        self.lock().clone()
    }

    /// Start an export of the current record in the background.
    ///
    /// The trigger is disabled before this returns; `None` means another
    /// export already holds it.
    pub fn start_export(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let guard = self.pipeline.control().try_acquire()?;

        let state = Arc::clone(self);
        let info = self.snapshot();
        Some(tokio::spawn(async move {
            match state
                .pipeline
                .export_with(guard, Some(&state.region), &info)
                .await
            {
                Ok(receipt) => {
                    tracing::info!(path = %receipt.path.display(), "Export finished")
                }
                Err(err) => tracing::debug!(stage = err.stage(), "Export did not complete"),
            }
        }))
    }
}
