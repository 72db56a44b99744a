use crate::core::{Manifest, Pipeline};
use crate::utils::error::Result;

pub struct LayoutEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> LayoutEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Loads, validates and packs without writing anything.
    pub fn plan(&self) -> Result<Manifest> {
        tracing::info!("Loading input documents...");
        let inputs = self.pipeline.extract()?;
        tracing::info!(
            "Loaded {} categories and {} layout entries",
            inputs.categories.len(),
            inputs.layout.len()
        );

        tracing::info!("Validating and packing...");
        let manifest = self.pipeline.transform(inputs)?;
        tracing::info!(
            "Packed {} items into {} bins ({} slots)",
            manifest.assigned_items(),
            manifest.bins.len(),
            manifest.slot_count()
        );
        Ok(manifest)
    }

    pub fn run(&self) -> Result<String> {
        let manifest = self.plan()?;

        tracing::info!("Writing manifest...");
        let output_path = self.pipeline.load(manifest)?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
