use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ============================================================================
// Selector catalog produced by template analysis
// ============================================================================

/// Locator technique used to address an element.
///
/// Declaration order is precedence order, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SelectorStrategy {
    TestId,
    Id,
    Role,
    Text,
    Placeholder,
    Label,
    Css,
}

impl SelectorStrategy {
    /// Strategies whose expression is built from literal text content.
    pub fn requires_text(&self) -> bool {
        matches!(
            self,
            SelectorStrategy::Role
                | SelectorStrategy::Text
                | SelectorStrategy::Placeholder
                | SelectorStrategy::Label
        )
    }
}

/// Shape of accessor the emission stage should generate for a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessorKind {
    Click,
    Fill,
    Assert,
}

/// A single synthesized locator for one element of a component template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSelector {
    /// Lower-cased tag name, or `"unknown"`
    pub element_type: String,

    pub strategy: SelectorStrategy,

    /// Final locator expression, interpreted according to `strategy`
    pub selector_expression: String,

    /// Identifier unique within the owning component
    pub property_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,

    pub has_click_handler: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_handler: Option<String>,

    pub is_link: bool,
    pub is_table: bool,
    pub is_platform_widget: bool,

    /// Element content depends on a live binding; only assertion accessors apply
    pub is_dynamic: bool,

    pub accessor: AccessorKind,
}

/// Everything known about one discovered UI component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    /// Class name from the component definition
    pub name: String,

    /// The component's own custom-element selector
    pub tag_selector: String,

    pub source_path: PathBuf,

    /// External markup file, `None` when the template is inline or absent
    pub template_source: Option<PathBuf>,

    /// Insertion order is extraction order
    pub selectors: Vec<ElementSelector>,

    pub inputs: BTreeSet<String>,
    pub outputs: BTreeSet<String>,

    pub route_path: Option<String>,
}

impl ComponentDescriptor {
    /// Look up a selector by its property name.
    pub fn selector(&self, property_name: &str) -> Option<&ElementSelector> {
        self.selectors
            .iter()
            .find(|s| s.property_name == property_name)
    }
}

/// The complete, deduplicated output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentCatalog {
    pub components: Vec<ComponentDescriptor>,

    /// SHA-1 over the canonical JSON of `components`
    pub fingerprint: String,
}

impl ComponentCatalog {
    /// Build a catalog and compute its content fingerprint.
    pub fn new(components: Vec<ComponentDescriptor>) -> Result<Self, serde_json::Error> {
        let canonical = serde_json::to_string(&components)?;
        Ok(Self {
            fingerprint: catalog_fingerprint(&canonical),
            components,
        })
    }

    pub fn component(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn selector_count(&self) -> usize {
        self.components.iter().map(|c| c.selectors.len()).sum()
    }
}

pub fn catalog_fingerprint(text: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
