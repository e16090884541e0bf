use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use crate::catalog::catalog_model::ComponentDescriptor;
use crate::source::component_source::ComponentSource;

static INNERMOST_OBJECT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^{}]*\}").unwrap());
static PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bpath\s*:\s*(?:'([^']*)'|"([^"]*)"|`([^`]*)`)"#).unwrap());
static COMPONENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bcomponent\s*:\s*([A-Za-z_$][\w$]*)").unwrap());
static LAZY_COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bloadComponent\s*:[^}]*?\.then\(\s*\(?\s*[\w$]+\s*\)?\s*=>\s*[\w$]+\.([A-Za-z_$][\w$]*)")
        .unwrap()
});
static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\u{0}(\d+)\u{0}").unwrap());

/// Whether a file name follows a routing-definition convention.
pub fn is_routing_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    name.ends_with(".routes.ts") || name.ends_with("-routing.module.ts") || name.ends_with(".routing.ts")
}

/// One route object, with children referenced by index.
#[derive(Debug, Clone)]
struct RouteNode {
    path: Option<String>,
    component: Option<String>,
    children: Vec<usize>,
}

// ============================================================================
// Route table: component name → route path
// ============================================================================

/// Routes read from routing-definition files. The first route found for a
/// component wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: BTreeMap<String, String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sources(sources: &[ComponentSource]) -> Self {
        let mut table = Self::new();
        for source in sources {
            table.add_routes(&source.text);
        }
        table
    }

    /// Collect every `{ path, component | loadComponent }` route in `text`.
    ///
    /// Object literals are reduced innermost-first so nested `children`
    /// routes resolve to their full path.
    pub fn add_routes(&mut self, text: &str) {
        let mut nodes: Vec<RouteNode> = Vec::new();
        let mut working = text.to_string();

        while let Some(m) = INNERMOST_OBJECT_RE.find(&working) {
            let (start, end) = (m.start(), m.end());
            let object = &working[start..end];

            let children = MARKER_RE
                .captures_iter(object)
                .filter_map(|caps| caps[1].parse::<usize>().ok())
                .collect();
            // Drop child markers before reading this object's own fields
            let own = MARKER_RE.replace_all(object, "");
            let path = PATH_RE.captures(&own).and_then(|caps| {
                (1..=3).find_map(|i| caps.get(i)).map(|m| m.as_str().to_string())
            });
            let component = COMPONENT_RE
                .captures(&own)
                .or_else(|| LAZY_COMPONENT_RE.captures(&own))
                .map(|caps| caps[1].to_string());

            let marker = format!("\u{0}{}\u{0}", nodes.len());
            nodes.push(RouteNode {
                path,
                component,
                children,
            });
            working.replace_range(start..end, &marker);
        }

        let referenced: HashSet<usize> = nodes.iter().flat_map(|n| n.children.clone()).collect();
        for root in (0..nodes.len()).filter(|i| !referenced.contains(i)) {
            self.walk(&nodes, root, &[]);
        }
    }

    fn walk(&mut self, nodes: &[RouteNode], index: usize, parents: &[String]) {
        let node = &nodes[index];
        let mut segments = parents.to_vec();
        if let Some(path) = &node.path {
            segments.extend(
                path.split('/')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            );
        }

        if let (Some(_), Some(component)) = (&node.path, &node.component) {
            self.routes
                .entry(component.clone())
                .or_insert_with(|| format!("/{}", segments.join("/")));
        }

        for &child in &node.children {
            self.walk(nodes, child, &segments);
        }
    }

    pub fn route_for(&self, component: &str) -> Option<&str> {
        self.routes.get(component).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Fill `route_path` on descriptors that do not have one yet.
    pub fn apply(&self, descriptors: &mut [ComponentDescriptor]) {
        for descriptor in descriptors.iter_mut() {
            if descriptor.route_path.is_none() {
                descriptor.route_path = self.route_for(&descriptor.name).map(str::to_string);
            }
        }
    }
}
