use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::engine::error::AnalysisError;
use crate::source::component_source::ComponentSource;
use crate::source::routes::is_routing_file;

/// Files found under one scan root, each list in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Discovery {
    pub components: Vec<PathBuf>,
    pub routing: Vec<PathBuf>,
}

impl Discovery {
    /// Concatenate another root's discoveries after this one's.
    pub fn extend(&mut self, other: Discovery) {
        self.components.extend(other.components);
        self.routing.extend(other.routing);
    }
}

fn is_excluded(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    entry.file_type().is_dir()
        && entry.depth() > 0
        && exclude_dirs
            .iter()
            .any(|d| entry.file_name().to_string_lossy() == d.as_str())
}

fn is_typescript_source(name: &str) -> bool {
    name.ends_with(".ts") && !name.ends_with(".spec.ts") && !name.ends_with(".d.ts")
}

/// Walk `root` for component and routing sources.
///
/// Entries are visited sorted by file name so discovery order is stable
/// across runs. A `.ts` file not named `*.component.ts` counts as a
/// component only if it declares `@Component`.
pub fn discover(root: &Path, exclude_dirs: &[String]) -> Result<Discovery, AnalysisError> {
    let mut discovery = Discovery::default();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e, exclude_dirs));

    for entry in walker {
        let entry = entry.map_err(|source| AnalysisError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if !is_typescript_source(&name) {
            continue;
        }

        let path = entry.into_path();
        if is_routing_file(&path) {
            discovery.routing.push(path);
        } else if name.ends_with(".component.ts") || declares_component(&path) {
            discovery.components.push(path);
        }
    }

    Ok(discovery)
}

fn declares_component(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .map(|text| text.contains("@Component"))
        .unwrap_or(false)
}

/// Load every listed source, keeping order. Unreadable files are returned
/// as errors alongside the sources that did load.
pub fn load_sources(paths: &[PathBuf]) -> (Vec<ComponentSource>, Vec<AnalysisError>) {
    let mut sources = Vec::new();
    let mut errors = Vec::new();

    for path in paths {
        match ComponentSource::load(path) {
            Ok(source) => sources.push(source),
            Err(e) => errors.push(e),
        }
    }

    (sources, errors)
}
