use crate::catalog::catalog_model::AccessorKind;
use crate::markup::scan::OpenTag;

/// What a candidate should be located by, before formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    TestId { attribute: String, value: String },
    Id(String),
    /// Identifier carried by a test attribute; ranks as an Id selector
    IdAttribute { attribute: String, value: String },
    Role { role: String, name: String },
    Text(String),
    Placeholder(String),
    Label(String),
    Css {
        tag: String,
        qualifier: CssQualifier,
        /// Zero-based index among same-shaped elements, when ambiguous
        nth: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CssQualifier {
    None,
    Attribute { name: String, value: Option<String> },
    Class(String),
}

/// A raw, unnamed match produced by one extractor pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Offset of the owning element's opening tag
    pub element_start: usize,
    pub element_type: String,

    /// Preferred property name before disambiguation
    pub base_name: String,

    pub target: Target,

    pub click_handler: Option<String>,
    pub is_link: bool,
    pub is_table: bool,
    pub is_platform_widget: bool,
    pub is_dynamic: bool,

    pub accessor_hint: Option<AccessorKind>,
}

impl Candidate {
    /// Candidate anchored on a parsed opening tag. Table and widget flags are
    /// derived from the tag itself.
    pub fn for_tag(tag: &OpenTag, base_name: impl Into<String>, target: Target) -> Self {
        Self {
            element_start: tag.start,
            element_type: tag.name.clone(),
            base_name: base_name.into(),
            target,
            click_handler: None,
            is_link: false,
            is_table: is_table_tag(tag),
            is_platform_widget: is_platform_tag(tag),
            is_dynamic: false,
            accessor_hint: None,
        }
    }

    /// Candidate whose element could not be located; `position` stands in
    /// for the element identity.
    pub fn unanchored(position: usize, base_name: impl Into<String>, target: Target) -> Self {
        Self {
            element_start: position,
            element_type: "unknown".to_string(),
            base_name: base_name.into(),
            target,
            click_handler: None,
            is_link: false,
            is_table: false,
            is_platform_widget: false,
            is_dynamic: false,
            accessor_hint: None,
        }
    }

    pub fn with_click_handler(mut self, handler: Option<String>) -> Self {
        self.click_handler = handler;
        self
    }

    pub fn link(mut self) -> Self {
        self.is_link = true;
        self
    }

    pub fn table(mut self) -> Self {
        self.is_table = true;
        self
    }

    pub fn platform_widget(mut self) -> Self {
        self.is_platform_widget = true;
        self
    }

    pub fn dynamic(mut self) -> Self {
        self.is_dynamic = true;
        self
    }

    pub fn with_accessor(mut self, accessor: AccessorKind) -> Self {
        self.accessor_hint = Some(accessor);
        self
    }
}

fn is_table_tag(tag: &OpenTag) -> bool {
    matches!(tag.name.as_str(), "table" | "mat-table") || tag.has_attr("mat-table")
}

fn is_platform_tag(tag: &OpenTag) -> bool {
    tag.name.starts_with("mat-")
        || tag
            .attributes
            .iter()
            .any(|a| a.name.to_ascii_lowercase().starts_with("mat-"))
}
