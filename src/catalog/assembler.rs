use crate::catalog::catalog_model::{AccessorKind, ElementSelector, SelectorStrategy};
use crate::extract::candidate::{Candidate, CssQualifier, Target};
use crate::markup::scan::is_dynamic;

// ============================================================================
// Selector assembly: candidate + claimed name → ElementSelector
// ============================================================================

const FILL_ELEMENTS: &[&str] = &["input", "textarea", "select", "mat-select"];

/// Turn a named candidate into its final selector.
///
/// Returns `None` when a text-based strategy would be built from empty or
/// interpolated text. No extractor should produce such a candidate, so debug
/// builds assert instead.
pub fn assemble(candidate: Candidate, property_name: String) -> Option<ElementSelector> {
    let (strategy, selector_expression, text_content) = format_target(&candidate.target);

    if strategy.requires_text() {
        let valid = text_content
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty() && !is_dynamic(t));
        debug_assert!(
            valid,
            "{:?} selector '{}' built without static text",
            strategy, property_name
        );
        if !valid {
            return None;
        }
    }

    let accessor = accessor_for(&candidate, strategy);

    Some(ElementSelector {
        element_type: candidate.element_type,
        strategy,
        selector_expression,
        property_name,
        text_content,
        has_click_handler: candidate.click_handler.is_some(),
        click_handler: candidate.click_handler,
        is_link: candidate.is_link,
        is_table: candidate.is_table,
        is_platform_widget: candidate.is_platform_widget,
        is_dynamic: candidate.is_dynamic,
        accessor,
    })
}

/// Strategy, expression and associated text for a target.
pub fn format_target(target: &Target) -> (SelectorStrategy, String, Option<String>) {
    match target {
        Target::TestId { attribute, value } => (
            SelectorStrategy::TestId,
            format!("[{}={}]", attribute, quote(value)),
            None,
        ),
        Target::Id(id) => (SelectorStrategy::Id, format_id(id), None),
        Target::IdAttribute { attribute, value } => (
            SelectorStrategy::Id,
            format!("[{}={}]", attribute, quote(value)),
            None,
        ),
        Target::Role { role, name } => (
            SelectorStrategy::Role,
            format!("getByRole({}, {{ name: {} }})", quote(role), quote(name)),
            Some(name.clone()),
        ),
        Target::Text(text) => (
            SelectorStrategy::Text,
            format!("getByText({})", quote(text)),
            Some(text.clone()),
        ),
        Target::Placeholder(text) => (
            SelectorStrategy::Placeholder,
            format!("getByPlaceholder({})", quote(text)),
            Some(text.clone()),
        ),
        Target::Label(text) => (
            SelectorStrategy::Label,
            format!("getByLabel({})", quote(text)),
            Some(text.clone()),
        ),
        Target::Css { tag, qualifier, nth } => {
            (SelectorStrategy::Css, format_css(tag, qualifier, *nth), None)
        }
    }
}

/// Quote a literal with `'`, switching to `"` when the value contains `'`.
pub fn quote(value: &str) -> String {
    match (value.contains('\''), value.contains('"')) {
        (false, _) => format!("'{}'", value),
        (true, false) => format!("\"{}\"", value),
        (true, true) => format!("'{}'", value.replace('\'', "\\'")),
    }
}

fn format_id(id: &str) -> String {
    let mut chars = id.chars();
    let plain = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if plain {
        format!("#{}", id)
    } else {
        format!("[id={}]", quote(id))
    }
}

fn format_css(tag: &str, qualifier: &CssQualifier, nth: Option<usize>) -> String {
    let base = if tag == "unknown" { "" } else { tag };

    let mut css = match qualifier {
        CssQualifier::None => base.to_string(),
        CssQualifier::Attribute { name, value: None } => format!("{}[{}]", base, name),
        CssQualifier::Attribute {
            name,
            value: Some(value),
        } => format!("{}[{}={}]", base, name, quote(value)),
        CssQualifier::Class(class) => format!("{}.{}", base, class),
    };

    if css.is_empty() {
        css.push('*');
    }
    if let Some(n) = nth {
        css.push_str(&format!(" >> nth={}", n));
    }
    css
}

fn accessor_for(candidate: &Candidate, strategy: SelectorStrategy) -> AccessorKind {
    if candidate.is_dynamic || candidate.is_table {
        return AccessorKind::Assert;
    }
    if let Some(hint) = candidate.accessor_hint {
        return hint;
    }
    match strategy {
        SelectorStrategy::Placeholder | SelectorStrategy::Label => AccessorKind::Fill,
        _ if FILL_ELEMENTS.contains(&candidate.element_type.as_str()) => AccessorKind::Fill,
        _ => AccessorKind::Click,
    }
}
