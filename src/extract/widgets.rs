use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::extract::candidate::{Candidate, CssQualifier, Target};
use crate::extract::controls::{css_target, handler_name};
use crate::extract::extractor::Extractor;
use crate::markup::naming::{CollisionPolicy, to_identifier};
use crate::markup::scan::{
    OpenTag, element_at, inner_markup, inner_text, is_dynamic, normalize_text, parse_open_tag,
    static_text,
};

/// Angular Material attributes and elements that render as buttons.
const MATERIAL_BUTTON_MARKERS: &[&str] = &[
    "mat-button",
    "mat-raised-button",
    "mat-flat-button",
    "mat-stroked-button",
    "mat-icon-button",
    "mat-fab",
    "mat-mini-fab",
    "matbutton",
    "mat-menu-item",
    "mat-button-toggle",
];

static MATERIAL_BUTTON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\s|<)(mat-(?:raised-|flat-|stroked-|icon-)?button(?:-toggle)?|mat-(?:mini-)?fab|matButton|mat-menu-item)\b",
    )
    .unwrap()
});
static FORM_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<mat-form-field\b").unwrap());
static MAT_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<mat-label\b[^>]*>(.*?)</mat-label>").unwrap());
static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(?:table|mat-table)\b").unwrap());
static DATA_SOURCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[\w$]+\.)*([\w$]+)").unwrap());
static ANY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

fn is_material_button(tag: &OpenTag) -> bool {
    MATERIAL_BUTTON_MARKERS.contains(&tag.name.as_str())
        || tag
            .attributes
            .iter()
            .any(|a| MATERIAL_BUTTON_MARKERS.contains(&a.name.to_ascii_lowercase().as_str()))
}

// ============================================================================
// Pass 8: Material composite buttons
// ============================================================================

pub struct MaterialButtonExtractor;

impl Extractor for MaterialButtonExtractor {
    fn id(&self) -> &'static str {
        "material-button"
    }

    fn extract(&self, markup: &str) -> Vec<Candidate> {
        let mut seen = HashSet::new();

        MATERIAL_BUTTON_RE
            .captures_iter(markup)
            .filter_map(|caps| {
                let marker = caps.get(1)?;
                let tag = element_at(markup, marker.start())?;
                if !is_material_button(&tag) || !seen.insert(tag.start) {
                    return None;
                }
                let text = static_text(inner_text(markup, &tag))?;

                let is_menu_item = tag.has_attr("mat-menu-item");
                let (role, suffix) = if is_menu_item {
                    ("menuitem", "MenuItem")
                } else {
                    ("button", "Button")
                };
                let name = format!("{}{}", to_identifier(&text), suffix);
                let handler = tag.attr("(click)").and_then(handler_name);

                Some(
                    Candidate::for_tag(
                        &tag,
                        name,
                        Target::Role {
                            role: role.to_string(),
                            name: text,
                        },
                    )
                    .with_click_handler(handler)
                    .platform_widget(),
                )
            })
            .collect()
    }
}

// ============================================================================
// Pass 9: Material labeled form fields
// ============================================================================

pub struct LabeledFieldExtractor;

impl Extractor for LabeledFieldExtractor {
    fn id(&self) -> &'static str {
        "labeled-field"
    }

    fn extract(&self, markup: &str) -> Vec<Candidate> {
        FORM_FIELD_RE
            .find_iter(markup)
            .filter_map(|m| parse_open_tag(markup, m.start()))
            .filter_map(|tag| {
                let body = inner_markup(markup, &tag)?;
                let raw_label = MAT_LABEL_RE.captures(body)?.get(1)?.as_str();
                let label = normalize_text(&ANY_TAG_RE.replace_all(raw_label, " "))?;
                if is_dynamic(&label) {
                    return None;
                }
                let name = format!("{}Field", to_identifier(&label));

                Some(Candidate::for_tag(&tag, name, Target::Label(label)).platform_widget())
            })
            .collect()
    }
}

// ============================================================================
// Pass 10: tabular containers
// ============================================================================

pub struct TableExtractor {
    test_id_attributes: Vec<String>,
}

impl TableExtractor {
    pub fn new(test_id_attributes: &[String]) -> Self {
        Self {
            test_id_attributes: test_id_attributes
                .iter()
                .map(|a| a.to_ascii_lowercase())
                .collect(),
        }
    }
}

impl Extractor for TableExtractor {
    fn id(&self) -> &'static str {
        "table"
    }

    fn collision_policy(&self) -> CollisionPolicy {
        CollisionPolicy::Ordinal
    }

    fn extract(&self, markup: &str) -> Vec<Candidate> {
        TABLE_RE
            .find_iter(markup)
            .filter_map(|m| parse_open_tag(markup, m.start()))
            .map(|tag| {
                let composite = tag.name == "mat-table" || tag.has_attr("mat-table");
                let id = tag.static_attr("id").map(str::to_string);
                let test_id = self
                    .test_id_attributes
                    .iter()
                    .find_map(|a| tag.static_attr(a).map(|v| (a.clone(), v.to_string())));
                let data_source = tag
                    .attr("[dataSource]")
                    .and_then(|ds| DATA_SOURCE_RE.captures(ds))
                    .map(|caps| caps[1].to_string());

                let stem = data_source
                    .as_deref()
                    .or(id.as_deref())
                    .or(test_id.as_ref().map(|(_, v)| v.as_str()))
                    .map(to_identifier)
                    .unwrap_or_default();
                let name = format!("{}Table", stem);

                let target = match (id, test_id) {
                    (Some(id), _) => Target::Id(id),
                    (None, Some((attribute, value))) => Target::IdAttribute { attribute, value },
                    (None, None) if composite && tag.name == "table" => css_target(
                        markup,
                        &tag,
                        CssQualifier::Attribute {
                            name: "mat-table".to_string(),
                            value: None,
                        },
                    ),
                    (None, None) => css_target(markup, &tag, CssQualifier::None),
                };

                Candidate::for_tag(&tag, name, target).table()
            })
            .collect()
    }
}
