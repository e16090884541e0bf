use rayon::prelude::*;

use crate::catalog::catalog_model::{ComponentCatalog, ComponentDescriptor, ElementSelector};
use crate::catalog::dedup::dedup_components;
use crate::engine::error::{AnalysisError, AnalysisWarning};
use crate::extract::extractor::ExtractorPipeline;
use crate::source::component_source::{ComponentSource, parse_component_meta};
use crate::source::template_loader::TemplateResolver;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

// ============================================================================
// Analysis results
// ============================================================================

/// Result of analyzing a single component source.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentOutcome {
    /// `None` when the source declares no component
    pub descriptor: Option<ComponentDescriptor>,
    pub warnings: Vec<AnalysisWarning>,
}

/// Deduplicated descriptors plus every non-fatal warning, in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub components: Vec<ComponentDescriptor>,
    pub warnings: Vec<AnalysisWarning>,
}

impl AnalysisReport {
    pub fn into_catalog(self) -> Result<(ComponentCatalog, Vec<AnalysisWarning>), AnalysisError> {
        let catalog =
            ComponentCatalog::new(self.components).map_err(|source| AnalysisError::JsonSerialize {
                context: "catalog fingerprint".to_string(),
                source,
            })?;
        Ok((catalog, self.warnings))
    }
}

// ============================================================================
// Analyzer: template loading, extraction, assembly, dedup
// ============================================================================

pub struct Analyzer {
    pipeline: ExtractorPipeline,
    resolver: Box<dyn TemplateResolver>,
    tracer: TraceLogger,
}

impl Analyzer {
    pub fn new(pipeline: ExtractorPipeline, resolver: Box<dyn TemplateResolver>) -> Self {
        Self {
            pipeline,
            resolver,
            tracer: TraceLogger::disabled(),
        }
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn pipeline(&self) -> &ExtractorPipeline {
        &self.pipeline
    }

    /// Analyze every source and deduplicate by component name.
    ///
    /// Components are analyzed in parallel; results are collected in input
    /// order, so `sources` order is the discovery order dedup relies on.
    /// Only an empty pipeline is fatal.
    pub fn analyze(&self, sources: &[ComponentSource]) -> Result<AnalysisReport, AnalysisError> {
        if self.pipeline.is_empty() {
            return Err(AnalysisError::NoExtractors);
        }

        let outcomes: Vec<ComponentOutcome> = sources
            .par_iter()
            .map(|source| self.analyze_component(source))
            .collect();

        let mut descriptors = Vec::new();
        let mut warnings = Vec::new();
        for outcome in outcomes {
            descriptors.extend(outcome.descriptor);
            warnings.extend(outcome.warnings);
        }

        let discovered = descriptors.len();
        let components = dedup_components(descriptors);

        self.tracer.log(
            &TraceEvent::now("summary")
                .with_components(components.len())
                .with_selectors(components.iter().map(|c| c.selectors.len()).sum())
                .with_warnings(&warnings),
        );
        if discovered != components.len() {
            self.tracer.log(
                &TraceEvent::now("dedup").with_components(discovered - components.len()),
            );
        }

        Ok(AnalysisReport {
            components,
            warnings,
        })
    }

    /// Analyze one component in isolation. Never fails; problems become warnings.
    pub fn analyze_component(&self, source: &ComponentSource) -> ComponentOutcome {
        let Some(meta) = parse_component_meta(&source.text) else {
            let warning = AnalysisWarning {
                component: None,
                path: source.path.clone(),
                message: "no @Component declaration found".to_string(),
            };
            self.tracer.log(
                &TraceEvent::now("component")
                    .with_component(None, &source.path)
                    .with_warnings(std::slice::from_ref(&warning)),
            );
            return ComponentOutcome {
                descriptor: None,
                warnings: vec![warning],
            };
        };

        let mut warnings = Vec::new();
        let warn = |message: String| AnalysisWarning {
            component: Some(meta.name.clone()),
            path: source.path.clone(),
            message,
        };

        let resolved = match self.resolver.resolve(&source.path, &source.text) {
            Ok(Some(template)) => Some(template),
            Ok(None) => {
                warnings.push(warn("no template found".to_string()));
                None
            }
            Err(e) => {
                warnings.push(warn(e.to_string()));
                None
            }
        };

        let selectors = resolved
            .as_ref()
            .map(|t| self.pipeline.run(&t.markup))
            .unwrap_or_default();

        self.tracer.log(
            &TraceEvent::now("component")
                .with_component(Some(&meta.name), &source.path)
                .with_template(resolved.as_ref().map(|t| &t.origin))
                .with_selectors(selectors.len())
                .with_warnings(&warnings),
        );

        let descriptor = ComponentDescriptor {
            name: meta.name,
            tag_selector: meta.tag_selector,
            source_path: source.path.clone(),
            template_source: resolved.as_ref().and_then(|t| t.file().map(|p| p.to_path_buf())),
            selectors,
            inputs: meta.inputs,
            outputs: meta.outputs,
            route_path: None,
        };

        ComponentOutcome {
            descriptor: Some(descriptor),
            warnings,
        }
    }

    /// Run the extractor pipeline over bare markup.
    pub fn extract_selectors(&self, markup: &str) -> Vec<ElementSelector> {
        self.pipeline.run(markup)
    }
}
