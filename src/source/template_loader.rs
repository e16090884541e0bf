use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use crate::engine::error::AnalysisError;
use crate::source::component_source::{inline_template, parse_component_meta};

// ============================================================================
// Template resolution
// ============================================================================

/// Where a component's markup came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// `templateUrl` reference in the decorator
    External(PathBuf),

    /// Sibling file found by naming convention
    Sibling(PathBuf),

    /// Template literal inside the component source
    Inline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTemplate {
    pub markup: String,
    pub origin: TemplateOrigin,
}

impl ResolvedTemplate {
    /// Markup file path, `None` for inline templates.
    pub fn file(&self) -> Option<&Path> {
        match &self.origin {
            TemplateOrigin::External(path) | TemplateOrigin::Sibling(path) => Some(path),
            TemplateOrigin::Inline => None,
        }
    }
}

/// Supplies the markup to scan for a component.
///
/// `Ok(None)` means no template could be found; `Err` means one was found
/// but could not be read.
pub trait TemplateResolver: Send + Sync {
    fn resolve(
        &self,
        component_path: &Path,
        source_text: &str,
    ) -> Result<Option<ResolvedTemplate>, AnalysisError>;
}

/// Convention-named sibling files for a component, in lookup order.
///
/// `login.component.ts` → `login.component.html`, then `login.html`.
pub fn sibling_candidates(component_path: &Path) -> Vec<PathBuf> {
    let dir = component_path.parent().unwrap_or_else(|| Path::new(""));
    let file_name = component_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(".ts").unwrap_or(&file_name);
    let base = stem.strip_suffix(".component").unwrap_or(stem);

    vec![
        dir.join(format!("{}.component.html", base)),
        dir.join(format!("{}.html", base)),
    ]
}

/// Join a `templateUrl` onto the component's directory, dropping `.` segments.
pub fn resolve_template_url(component_path: &Path, url: &str) -> PathBuf {
    let dir = component_path.parent().unwrap_or_else(|| Path::new(""));
    dir.join(url)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Resolution order: `templateUrl`, sibling conventions, inline literal.
fn resolve_with<F>(
    component_path: &Path,
    source_text: &str,
    read: F,
) -> Result<Option<ResolvedTemplate>, AnalysisError>
where
    F: Fn(&Path) -> Result<Option<String>, AnalysisError>,
{
    let template_url = parse_component_meta(source_text).and_then(|meta| meta.template_url);

    if let Some(url) = template_url {
        let path = resolve_template_url(component_path, &url);
        if let Some(markup) = read(&path)? {
            return Ok(Some(ResolvedTemplate {
                markup,
                origin: TemplateOrigin::External(path),
            }));
        }
    }

    for path in sibling_candidates(component_path) {
        if let Some(markup) = read(&path)? {
            return Ok(Some(ResolvedTemplate {
                markup,
                origin: TemplateOrigin::Sibling(path),
            }));
        }
    }

    Ok(inline_template(source_text).map(|markup| ResolvedTemplate {
        markup,
        origin: TemplateOrigin::Inline,
    }))
}

// ============================================================================
// FsTemplateResolver: reads markup files from disk
// ============================================================================

pub struct FsTemplateResolver;

impl TemplateResolver for FsTemplateResolver {
    fn resolve(
        &self,
        component_path: &Path,
        source_text: &str,
    ) -> Result<Option<ResolvedTemplate>, AnalysisError> {
        resolve_with(component_path, source_text, |path| {
            match std::fs::read_to_string(path) {
                Ok(markup) => Ok(Some(markup)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(source) => Err(AnalysisError::TemplateRead {
                    path: path.to_path_buf(),
                    source,
                }),
            }
        })
    }
}

// ============================================================================
// MemoryTemplateResolver: markup files held in memory
// ============================================================================

/// Resolver over an in-memory file map; same resolution order as the
/// filesystem resolver.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateResolver {
    files: HashMap<PathBuf, String>,
}

impl MemoryTemplateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, markup: impl Into<String>) -> Self {
        self.files.insert(path.into(), markup.into());
        self
    }
}

impl TemplateResolver for MemoryTemplateResolver {
    fn resolve(
        &self,
        component_path: &Path,
        source_text: &str,
    ) -> Result<Option<ResolvedTemplate>, AnalysisError> {
        resolve_with(component_path, source_text, |path| {
            Ok(self.files.get(path).cloned())
        })
    }
}
