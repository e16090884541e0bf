use serde::{Deserialize, Serialize};

use crate::catalog::assembler::assemble;
use crate::catalog::catalog_model::ElementSelector;
use crate::extract::attributes::{IdExtractor, TestIdExtractor};
use crate::extract::candidate::Candidate;
use crate::extract::controls::{
    ButtonTextExtractor, ClickHandlerExtractor, FormControlExtractor, RouterLinkExtractor,
    TypedInputExtractor,
};
use crate::extract::text::{CustomTagTextExtractor, DynamicContentExtractor};
use crate::extract::widgets::{LabeledFieldExtractor, MaterialButtonExtractor, TableExtractor};
use crate::markup::naming::{CollisionPolicy, NameRegistry};

// ============================================================================
// Extractor trait: one independent pattern pass over raw markup
// ============================================================================

/// A single extraction pass.
///
/// `extract` is pure: it sees only the markup, never the output of other
/// passes. Naming and collision handling happen in `ExtractorPipeline::run`.
pub trait Extractor: Send + Sync {
    /// Short stable identifier, used in traces and reports.
    fn id(&self) -> &'static str;

    fn collision_policy(&self) -> CollisionPolicy {
        CollisionPolicy::Skip
    }

    fn extract(&self, markup: &str) -> Vec<Candidate>;
}

// ============================================================================
// Extraction settings
// ============================================================================

/// Tunables for the standard pipeline, loadable from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Test-identifier attributes, most preferred first
    #[serde(default = "default_test_id_attributes")]
    pub test_id_attributes: Vec<String>,

    /// Class tokens too generic to name an input after
    #[serde(default = "default_generic_class_tokens")]
    pub generic_class_tokens: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            test_id_attributes: default_test_id_attributes(),
            generic_class_tokens: default_generic_class_tokens(),
        }
    }
}

fn default_test_id_attributes() -> Vec<String> {
    ["data-testid", "data-test-id", "data-test", "data-cy", "data-qa"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_generic_class_tokens() -> Vec<String> {
    [
        "form-control", "form-input", "form-field", "input", "input-field", "field",
        "control", "w-full", "w-100", "full-width", "block", "flex", "col", "row",
        "mat-input-element", "ng-untouched", "ng-pristine", "ng-valid", "ng-invalid",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// ============================================================================
// Pipeline: explicit ordered sequence of passes
// ============================================================================

/// Ordered extractor list. Order is precedence: earlier passes claim names
/// and elements first.
pub struct ExtractorPipeline {
    extractors: Vec<Box<dyn Extractor>>,
}

impl ExtractorPipeline {
    pub fn new(extractors: Vec<Box<dyn Extractor>>) -> Self {
        Self { extractors }
    }

    /// The standard twelve passes in precedence order.
    pub fn standard(config: &ExtractConfig) -> Self {
        Self::new(vec![
            Box::new(TestIdExtractor::new(&config.test_id_attributes)),
            Box::new(IdExtractor),
            Box::new(ButtonTextExtractor),
            Box::new(FormControlExtractor),
            Box::new(TypedInputExtractor::new(&config.generic_class_tokens)),
            Box::new(ClickHandlerExtractor::new(&config.generic_class_tokens)),
            Box::new(RouterLinkExtractor),
            Box::new(MaterialButtonExtractor),
            Box::new(LabeledFieldExtractor),
            Box::new(TableExtractor::new(&config.test_id_attributes)),
            Box::new(CustomTagTextExtractor),
            Box::new(DynamicContentExtractor),
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|e| e.id()).collect()
    }

    /// Run every pass over one component's markup.
    ///
    /// The collision table lives only for this call.
    pub fn run(&self, markup: &str) -> Vec<ElementSelector> {
        let mut registry = NameRegistry::new();
        let mut selectors = Vec::new();

        for extractor in &self.extractors {
            let policy = extractor.collision_policy();

            for (index, candidate) in extractor.extract(markup).into_iter().enumerate() {
                if registry.is_element_claimed(candidate.element_start) {
                    continue;
                }

                let element_start = candidate.element_start;
                let Some(name) = registry.claim(&candidate.base_name, policy, index) else {
                    continue;
                };

                if let Some(selector) = assemble(candidate, name) {
                    registry.claim_element(element_start);
                    selectors.push(selector);
                }
            }
        }

        selectors
    }
}

impl Default for ExtractorPipeline {
    fn default() -> Self {
        Self::standard(&ExtractConfig::default())
    }
}
