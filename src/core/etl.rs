use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<String> {
        tracing::info!("Loading hotel documents...");
        let sources = self.pipeline.extract()?;

        tracing::info!("Combining hotel records...");
        let result = self.pipeline.transform(sources)?;
        if !result.report.duplicate_detail_ids.is_empty() {
            tracing::warn!(
                "{} duplicate detail ids were collapsed",
                result.report.duplicate_detail_ids.len()
            );
        }

        tracing::info!("Writing {} combined records...", result.records.len());
        let output_path = self.pipeline.load(result)?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
