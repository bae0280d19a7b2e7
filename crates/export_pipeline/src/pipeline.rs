//! The export orchestrator

use crate::{
    pdf_options, ExportControl, ExportError, ExportGuard, Notification, Notifier, PipelineError,
    Result, TracingNotifier,
};
use cover_model::{validate, CoverPageInfo};
use cover_render::{CoverLayout, CoverRegion, RegionRasterizer, RenderError, CAPTURE_SCALE};
use std::path::PathBuf;
use std::sync::Arc;
use store::pdf::{export_image_pdf_bytes, DEFAULT_CREATOR};
use store::{derive_filename, Clock, FileSink, SystemClock};

/// Tunables for one pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Device pixels per logical pixel
    pub scale: f32,
    /// Flate-compress the embedded image
    pub compress: bool,
    /// Creator and producer name in the PDF
    pub creator: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: CAPTURE_SCALE,
            compress: true,
            creator: DEFAULT_CREATOR.to_string(),
        }
    }
}

/// What a successful export produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub filename: String,
    /// Where the sink stored the file
    pub path: PathBuf,
    pub bytes_written: usize,
    pub page_count: u32,
}

/// Turns a field record into a saved single-page PDF.
///
/// Clones share the same [`ExportControl`], so at most one export runs
/// across all of them.
#[derive(Clone)]
pub struct ExportPipeline {
    rasterizer: Arc<dyn RegionRasterizer>,
    sink: Arc<dyn FileSink>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    control: ExportControl,
    config: ExportConfig,
}

impl ExportPipeline {
    pub fn new(rasterizer: Arc<dyn RegionRasterizer>, sink: Arc<dyn FileSink>) -> Self {
        Self {
            rasterizer,
            sink,
            clock: Arc::new(SystemClock),
            notifier: Arc::new(TracingNotifier),
            control: ExportControl::new(),
            config: ExportConfig::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// The trigger state shared by every clone of this pipeline
    pub fn control(&self) -> &ExportControl {
        &self.control
    }

    /// Run one export of `info` from `region`.
    ///
    /// Returns [`PipelineError::InFlight`] without side effects while
    /// another export holds the guard.
    pub async fn export(
        &self,
        region: Option<&CoverRegion>,
        info: &CoverPageInfo,
    ) -> Result<ExportReceipt> {
        let Some(guard) = self.control.try_acquire() else {
            tracing::debug!("Export requested while one is in flight, ignoring");
            return Err(PipelineError::InFlight);
        };
        self.export_with(guard, region, info).await
    }

    /// Run one export under a guard already taken from [`Self::control`].
    ///
    /// The trigger is re-enabled when `guard` drops at the end of the run.
    pub async fn export_with(
        &self,
        guard: ExportGuard,
        region: Option<&CoverRegion>,
        info: &CoverPageInfo,
    ) -> Result<ExportReceipt> {
        let _guard = guard;

        if let Err(err) = validate(info) {
            tracing::info!(missing = err.missing.len(), "Export blocked by validation");
            self.notifier
                .notify(Notification::ValidationFailed(err.clone()));
            return Err(err.into());
        }

        let Some(region) = region else {
            tracing::warn!("No cover page region to capture");
            self.notifier.notify(Notification::RegionMissing);
            return Err(RenderError::RegionNotFound.into());
        };

        self.notifier.notify(Notification::InProgress);

        match self.run(region, info).await {
            Ok(receipt) => {
                self.notifier.notify(Notification::Succeeded {
                    filename: receipt.filename.clone(),
                });
                Ok(receipt)
            }
            Err(err) => {
                tracing::error!(stage = err.stage(), error = %err, "Error generating PDF");
                self.notifier.notify(Notification::Failed);
                Err(err)
            }
        }
    }

    async fn run(&self, region: &CoverRegion, info: &CoverPageInfo) -> Result<ExportReceipt> {
        let captured = region.for_capture();
        let layout = CoverLayout::build(info, &captured);

        let rasterizer = Arc::clone(&self.rasterizer);
        let scale = self.config.scale;
        let raster =
            tokio::task::spawn_blocking(move || rasterizer.rasterize(&layout, scale)).await??;
        tracing::debug!(
            width = raster.width(),
            height = raster.height(),
            "Rasterized cover page"
        );

        let png = tokio::task::spawn_blocking(move || raster.encode_png())
            .await?
            .map_err(ExportError::from)?;

        let now = self.clock.now();
        let options = pdf_options(info, &self.config, now);
        let pdf = tokio::task::spawn_blocking(move || export_image_pdf_bytes(&png, options))
            .await?
            .map_err(ExportError::from)?;

        let filename = derive_filename(info, now.date_naive());
        let bytes_written = pdf.len();
        let sink = Arc::clone(&self.sink);
        let name = filename.clone();
        let path = tokio::task::spawn_blocking(move || sink.save(&name, &pdf))
            .await?
            .map_err(ExportError::from)?;

        tracing::info!(%filename, bytes = bytes_written, "PDF generated");
        Ok(ExportReceipt {
            filename,
            path,
            bytes_written,
            page_count: 1,
        })
    }
}

impl std::fmt::Debug for ExportPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportPipeline")
            .field("control", &self.control)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
