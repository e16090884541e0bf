use crate::{
    engine::{
        analyzer::{AnalysisReport, Analyzer},
        error::AnalysisError,
    },
    extract::extractor::{ExtractConfig, ExtractorPipeline},
    source::{component_source::ComponentSource, template_loader::TemplateResolver},
};

pub mod catalog;
pub mod cli;
pub mod engine;
pub mod extract;
pub mod markup;
pub mod report;
pub mod source;
pub mod trace;

/// Analyze `sources` with the standard twelve-pass pipeline and default
/// extractor settings. Output is deduplicated by component name.
pub fn analyze(
    sources: &[ComponentSource],
    resolver: Box<dyn TemplateResolver>,
) -> Result<AnalysisReport, AnalysisError> {
    let pipeline = ExtractorPipeline::standard(&ExtractConfig::default());
    Analyzer::new(pipeline, resolver).analyze(sources)
}
