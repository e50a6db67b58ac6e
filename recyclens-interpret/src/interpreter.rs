use crate::error::Result;
use async_trait::async_trait;
use recyclens_core::{Interpretation, VisionLabel};

/// Fixed disposal rules for the service area, embedded into every LLM
/// prompt so answers stay jurisdiction-specific.
pub const JURISDICTION_RULES: &str = "Terre Haute accepts: plastic bottles #1-7, aluminum cans, \
glass bottles, paper, cardboard.\n\
Does NOT accept: plastic bags, styrofoam, electronics (need special disposal), \
batteries (hazardous waste).";

#[async_trait]
pub trait Interpreter: Send + Sync {
    /// Interpreter identity, recorded on the response for observability.
    fn name(&self) -> &'static str;

    /// Whether credentials are present. Unconfigured interpreters are
    /// skipped by the fallback chain.
    fn is_configured(&self) -> bool;

    /// Turn detected labels into disposal guidance. Any failure makes the
    /// chain fall through to the next interpreter.
    async fn interpret(&self, labels: &[VisionLabel]) -> Result<Interpretation>;
}

/// Render labels as "name (95%), ..." for prompt embedding.
pub fn format_labels(labels: &[VisionLabel]) -> String {
    labels
        .iter()
        .map(|l| format!("{} ({:.0}%)", l.name, l.confidence * 100.0))
        .collect::<Vec<_>>()
        .join(", ")
}
