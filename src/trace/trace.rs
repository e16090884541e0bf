use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::engine::error::AnalysisWarning;
use crate::source::template_loader::TemplateOrigin;

#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,

    /// `component` or `summary`
    pub event: String,

    pub component: Option<String>,
    pub path: Option<String>,

    /// `external`, `sibling`, `inline` or `none`
    pub template: Option<String>,

    pub selectors: Option<usize>,
    pub components: Option<usize>,

    pub warnings: Vec<String>,
}

impl TraceEvent {
    pub fn now(event: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            event: event.to_string(),
            component: None,
            path: None,
            template: None,
            selectors: None,
            components: None,
            warnings: vec![],
        }
    }

    pub fn with_component(mut self, name: Option<&str>, path: &std::path::Path) -> Self {
        self.component = name.map(str::to_string);
        self.path = Some(path.display().to_string());
        self
    }

    pub fn with_template(mut self, origin: Option<&TemplateOrigin>) -> Self {
        let label = match origin {
            Some(TemplateOrigin::External(_)) => "external",
            Some(TemplateOrigin::Sibling(_)) => "sibling",
            Some(TemplateOrigin::Inline) => "inline",
            None => "none",
        };
        self.template = Some(label.to_string());
        self
    }

    pub fn with_selectors(mut self, count: usize) -> Self {
        self.selectors = Some(count);
        self
    }

    pub fn with_components(mut self, count: usize) -> Self {
        self.components = Some(count);
        self
    }

    pub fn with_warnings(mut self, warnings: &[AnalysisWarning]) -> Self {
        self.warnings = warnings.iter().map(|w| w.message.clone()).collect();
        self
    }
}
