use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum AnalysisError {
    /// Component source file could not be read
    SourceRead { path: PathBuf, source: std::io::Error },

    /// External template exists but could not be read
    TemplateRead { path: PathBuf, source: std::io::Error },

    /// Analyzer was built with an empty extractor pipeline
    NoExtractors,

    /// Directory traversal failed during discovery
    Walk { root: PathBuf, source: walkdir::Error },

    /// Catalog serialization to JSON failed
    JsonSerialize { context: String, source: serde_json::Error },

    /// Catalog serialization to YAML failed
    YamlSerialize { context: String, source: serde_yaml::Error },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::SourceRead { path, source } => {
                write!(f, "Failed to read component source {}: {}", path.display(), source)
            }
            AnalysisError::TemplateRead { path, source } => {
                write!(f, "Failed to read template {}: {}", path.display(), source)
            }
            AnalysisError::NoExtractors => {
                write!(f, "No extractors registered; nothing to analyze with")
            }
            AnalysisError::Walk { root, source } => {
                write!(f, "Failed to walk {}: {}", root.display(), source)
            }
            AnalysisError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            AnalysisError::YamlSerialize { context, source } => {
                write!(f, "YAML serialize error ({}): {}", context, source)
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::SourceRead { source, .. } => Some(source),
            AnalysisError::TemplateRead { source, .. } => Some(source),
            AnalysisError::Walk { source, .. } => Some(source),
            AnalysisError::JsonSerialize { source, .. } => Some(source),
            AnalysisError::YamlSerialize { source, .. } => Some(source),
            AnalysisError::NoExtractors => None,
        }
    }
}

/// A non-fatal problem local to one component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisWarning {
    /// Component class name, when it could be determined
    pub component: Option<String>,
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.component {
            Some(name) => write!(f, "{} ({}): {}", name, self.path.display(), self.message),
            None => write!(f, "{}: {}", self.path.display(), self.message),
        }
    }
}
