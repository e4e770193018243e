use crate::core::Pipeline;
use crate::utils::error::Result;
use std::path::PathBuf;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn run(&self) -> Result<PathBuf> {
        let started = Instant::now();
        tracing::info!("Starting conversion...");

        // Extract
        let stage = Instant::now();
        let headings = self.pipeline.extract()?;
        tracing::info!(
            "📄 Extracted {} heading groups in {:?}",
            headings.len(),
            stage.elapsed()
        );

        // Transform
        let stage = Instant::now();
        let result = self.pipeline.transform(headings)?;
        tracing::info!(
            "🔄 Shaped {} rows ({} items) in {:?}",
            result.rows.len(),
            result.item_count,
            stage.elapsed()
        );

        // Load
        let stage = Instant::now();
        let output_path = self.pipeline.load(result)?;
        tracing::info!(
            "💾 Wrote {} in {:?}",
            output_path.display(),
            stage.elapsed()
        );

        tracing::debug!("Conversion finished in {:?}", started.elapsed());
        Ok(output_path)
    }
}
