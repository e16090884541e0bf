use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::catalog::catalog_model::AccessorKind;
use crate::extract::attributes::quoted_value;
use crate::extract::candidate::{Candidate, CssQualifier, Target};
use crate::extract::extractor::Extractor;
use crate::markup::naming::{CollisionPolicy, to_identifier};
use crate::markup::scan::{
    OpenTag, element_at, element_text, inner_text, is_css_identifier, is_dynamic, ordinal_among,
    parse_open_tag, static_text, text_after,
};

static BUTTON_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<button\b").unwrap());
static INPUT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<input\b").unwrap());
static FORM_CONTROL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\sformControlName\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});
static CLICK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\(click\)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});
static ROUTER_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s\[?routerLink\]?\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});
static HANDLER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[A-Za-z_$][\w$]*\.)*([A-Za-z_$][\w$]*)").unwrap());

// ============================================================================
// Shared helpers
// ============================================================================

/// Name suffix describing a form control element.
fn control_suffix(tag: &OpenTag) -> &'static str {
    match tag.name.as_str() {
        "select" | "mat-select" => "Select",
        "textarea" => "Textarea",
        "mat-checkbox" => "Checkbox",
        "mat-radio-group" => "Radio",
        "mat-slide-toggle" => "Toggle",
        "input" => match tag.static_attr("type").map(|t| t.to_ascii_lowercase()).as_deref() {
            Some("checkbox") => "Checkbox",
            Some("radio") => "Radio",
            _ => "Input",
        },
        _ => "Input",
    }
}

fn is_toggle_control(tag: &OpenTag) -> bool {
    matches!(control_suffix(tag), "Checkbox" | "Radio" | "Toggle")
}

/// Identifier of the method a click binding invokes.
pub fn handler_name(expression: &str) -> Option<String> {
    HANDLER_RE
        .captures(expression)
        .map(|caps| caps[1].to_string())
}

/// `onSave` → `Save`; names without the convention pass through.
pub fn strip_on_prefix(handler: &str) -> &str {
    match handler.strip_prefix("on") {
        Some(rest) if rest.chars().next().is_some_and(|c| c.is_uppercase()) => rest,
        _ => handler,
    }
}

fn first_specific_class<'a>(tag: &'a OpenTag, generic: &HashSet<String>) -> Option<&'a str> {
    tag.class_tokens()
        .into_iter()
        .find(|c| {
            is_css_identifier(c)
                && !c.starts_with("ng-")
                && !generic.contains(&c.to_ascii_lowercase())
        })
}

/// CSS target for `tag` narrowed by `qualifier`, with an ordinal when the
/// same shape occurs more than once in the template.
pub(crate) fn css_target(markup: &str, tag: &OpenTag, qualifier: CssQualifier) -> Target {
    let (index, total) = ordinal_among(markup, tag, |other| {
        other.name == tag.name && qualifier_matches(other, &qualifier)
    });

    Target::Css {
        tag: tag.name.clone(),
        qualifier,
        nth: (total > 1).then_some(index),
    }
}

fn qualifier_matches(tag: &OpenTag, qualifier: &CssQualifier) -> bool {
    match qualifier {
        CssQualifier::None => true,
        CssQualifier::Attribute { name, value: None } => tag.has_attr(name),
        CssQualifier::Attribute {
            name,
            value: Some(value),
        } => tag.attr(name).map(str::trim) == Some(value.as_str()),
        CssQualifier::Class(class) => tag.class_tokens().contains(&class.as_str()),
    }
}

fn click_handler_of(tag: &OpenTag) -> Option<String> {
    tag.attr("(click)").and_then(handler_name)
}

// ============================================================================
// Pass 3: buttons with literal text
// ============================================================================

pub struct ButtonTextExtractor;

impl Extractor for ButtonTextExtractor {
    fn id(&self) -> &'static str {
        "button-text"
    }

    fn extract(&self, markup: &str) -> Vec<Candidate> {
        BUTTON_RE
            .find_iter(markup)
            .filter_map(|m| parse_open_tag(markup, m.start()))
            .filter_map(|tag| {
                let text = static_text(inner_text(markup, &tag))?;
                let name = format!("{}Button", to_identifier(&text));
                let handler = click_handler_of(&tag);

                Some(
                    Candidate::for_tag(
                        &tag,
                        name,
                        Target::Role {
                            role: "button".to_string(),
                            name: text,
                        },
                    )
                    .with_click_handler(handler),
                )
            })
            .collect()
    }
}

// ============================================================================
// Pass 4: reactive-form bound controls
// ============================================================================

pub struct FormControlExtractor;

impl Extractor for FormControlExtractor {
    fn id(&self) -> &'static str {
        "form-control"
    }

    fn extract(&self, markup: &str) -> Vec<Candidate> {
        FORM_CONTROL_RE
            .captures_iter(markup)
            .filter_map(|caps| {
                let position = caps.get(0)?.start();
                let binding = quoted_value(&caps, 1)?.trim();
                if binding.is_empty() || is_dynamic(binding) {
                    return None;
                }

                let qualifier = CssQualifier::Attribute {
                    name: "formcontrolname".to_string(),
                    value: Some(binding.to_string()),
                };

                let Some(tag) = element_at(markup, position) else {
                    let name = format!("{}Input", to_identifier(binding));
                    let target = Target::Css {
                        tag: "unknown".to_string(),
                        qualifier,
                        nth: None,
                    };
                    return Some(Candidate::unanchored(position, name, target));
                };

                let name = format!("{}{}", to_identifier(binding), control_suffix(&tag));
                let accessor = if is_toggle_control(&tag) {
                    AccessorKind::Click
                } else {
                    AccessorKind::Fill
                };
                let target = css_target(markup, &tag, qualifier);

                Some(Candidate::for_tag(&tag, name, target).with_accessor(accessor))
            })
            .collect()
    }
}

// ============================================================================
// Pass 5: typed inputs without a form binding
// ============================================================================

pub struct TypedInputExtractor {
    generic_classes: HashSet<String>,
}

impl TypedInputExtractor {
    pub fn new(generic_classes: &[String]) -> Self {
        Self {
            generic_classes: generic_classes.iter().map(|c| c.to_ascii_lowercase()).collect(),
        }
    }

    fn candidate(&self, markup: &str, tag: &OpenTag) -> Option<Candidate> {
        if tag.has_attr("formControlName") {
            return None;
        }
        let input_type = tag.static_attr("type")?.to_ascii_lowercase();
        if input_type == "hidden" {
            return None;
        }

        let placeholder = tag.static_attr("placeholder").map(str::to_string);
        let class = first_specific_class(tag, &self.generic_classes);

        let name = if let Some(text) = &placeholder {
            format!("{}Input", to_identifier(text))
        } else if input_type == "checkbox" {
            let label = tag
                .static_attr("name")
                .map(str::to_string)
                .or_else(|| static_text(text_after(markup, tag)));
            match label {
                Some(label) => format!("{}Checkbox", to_identifier(&label)),
                None => "Checkbox".to_string(),
            }
        } else if let Some(class) = class {
            format!("{}Input", to_identifier(class))
        } else {
            format!("{}Input", to_identifier(&input_type))
        };

        let target = match placeholder {
            Some(text) => Target::Placeholder(text),
            None => {
                let qualifier = if let Some(field) = tag.static_attr("name") {
                    CssQualifier::Attribute {
                        name: "name".to_string(),
                        value: Some(field.to_string()),
                    }
                } else if let Some(class) = class {
                    CssQualifier::Class(class.to_string())
                } else {
                    CssQualifier::Attribute {
                        name: "type".to_string(),
                        value: Some(input_type.clone()),
                    }
                };
                css_target(markup, tag, qualifier)
            }
        };

        let accessor = match input_type.as_str() {
            "checkbox" | "radio" | "submit" | "button" | "reset" => AccessorKind::Click,
            _ => AccessorKind::Fill,
        };

        Some(
            Candidate::for_tag(tag, name, target)
                .with_click_handler(click_handler_of(tag))
                .with_accessor(accessor),
        )
    }
}

impl Extractor for TypedInputExtractor {
    fn id(&self) -> &'static str {
        "typed-input"
    }

    fn collision_policy(&self) -> CollisionPolicy {
        CollisionPolicy::NumericSuffix
    }

    fn extract(&self, markup: &str) -> Vec<Candidate> {
        INPUT_RE
            .find_iter(markup)
            .filter_map(|m| parse_open_tag(markup, m.start()))
            .filter_map(|tag| self.candidate(markup, &tag))
            .collect()
    }
}

// ============================================================================
// Pass 6: elements with a click binding
// ============================================================================

pub struct ClickHandlerExtractor {
    generic_classes: HashSet<String>,
}

impl ClickHandlerExtractor {
    pub fn new(generic_classes: &[String]) -> Self {
        Self {
            generic_classes: generic_classes.iter().map(|c| c.to_ascii_lowercase()).collect(),
        }
    }
}

impl Extractor for ClickHandlerExtractor {
    fn id(&self) -> &'static str {
        "click-handler"
    }

    fn extract(&self, markup: &str) -> Vec<Candidate> {
        CLICK_RE
            .captures_iter(markup)
            .filter_map(|caps| {
                let position = caps.get(0)?.start();
                let handler = handler_name(quoted_value(&caps, 1)?)?;
                let tag = element_at(markup, position)?;

                let suffix = match tag.name.as_str() {
                    "button" => "Button",
                    "a" => "Link",
                    _ => "",
                };
                let text = static_text(element_text(markup, &tag));

                let (base, target) = match text {
                    Some(text) => (to_identifier(&text), Target::Text(text)),
                    None => {
                        let base = to_identifier(strip_on_prefix(&handler));
                        let aria = tag.static_attr("aria-label").map(str::to_string);
                        let target = match aria {
                            Some(label) if tag.name == "button" => Target::Role {
                                role: "button".to_string(),
                                name: label,
                            },
                            _ => {
                                let qualifier = match first_specific_class(&tag, &self.generic_classes) {
                                    Some(class) => CssQualifier::Class(class.to_string()),
                                    None => CssQualifier::None,
                                };
                                css_target(markup, &tag, qualifier)
                            }
                        };
                        (base, target)
                    }
                };
                if base.is_empty() {
                    return None;
                }

                let mut candidate = Candidate::for_tag(&tag, format!("{}{}", base, suffix), target)
                    .with_click_handler(Some(handler))
                    .with_accessor(AccessorKind::Click);
                if tag.name == "a" {
                    candidate = candidate.link();
                }
                Some(candidate)
            })
            .collect()
    }
}

// ============================================================================
// Pass 7: router links with literal text
// ============================================================================

pub struct RouterLinkExtractor;

impl Extractor for RouterLinkExtractor {
    fn id(&self) -> &'static str {
        "router-link"
    }

    fn extract(&self, markup: &str) -> Vec<Candidate> {
        let mut seen = HashSet::new();

        ROUTER_LINK_RE
            .captures_iter(markup)
            .filter_map(|caps| {
                let position = caps.get(0)?.start();
                let tag = element_at(markup, position)?;
                if !seen.insert(tag.start) {
                    return None;
                }
                let text = static_text(element_text(markup, &tag))?;
                let name = format!("{}Link", to_identifier(&text));

                Some(
                    Candidate::for_tag(&tag, name, Target::Text(text))
                        .with_click_handler(click_handler_of(&tag))
                        .link(),
                )
            })
            .collect()
    }
}

