use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::catalog::catalog_model::AccessorKind;
use crate::extract::candidate::{Candidate, CssQualifier, Target};
use crate::extract::controls::css_target;
use crate::extract::extractor::Extractor;
use crate::markup::naming::{CollisionPolicy, to_identifier};
use crate::markup::scan::{
    element_at, is_css_identifier, is_dynamic, open_tags, static_text, text_after, text_run_at,
};

/// Hyphenated framework elements the generic text pass never matches.
const FRAMEWORK_TAGS: &[&str] = &[
    "ng-container", "ng-template", "ng-content", "router-outlet", "mat-icon", "mat-label",
    "mat-error", "mat-hint",
];

/// Elements whose interpolated content is never worth an assertion accessor.
const NON_CONTENT_TAGS: &[&str] = &[
    "ng-container", "ng-template", "script", "style", "option", "mat-icon",
];

static INTERPOLATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{").unwrap());

// ============================================================================
// Pass 11: non-standard elements wrapping literal text
// ============================================================================

pub struct CustomTagTextExtractor;

impl Extractor for CustomTagTextExtractor {
    fn id(&self) -> &'static str {
        "custom-tag-text"
    }

    fn extract(&self, markup: &str) -> Vec<Candidate> {
        open_tags(markup)
            .into_iter()
            .filter(|tag| tag.name.contains('-') && !FRAMEWORK_TAGS.contains(&tag.name.as_str()))
            .filter_map(|tag| {
                let text = static_text(text_after(markup, &tag))?;
                let name = to_identifier(&text);
                Some(Candidate::for_tag(&tag, name, Target::Text(text)))
            })
            .collect()
    }
}

// ============================================================================
// Pass 12: dynamic content (assertion-only accessors)
// ============================================================================

/// Tags elements whose own text contains an interpolation. These never get
/// interaction selectors; the emitted selector targets the element
/// structurally and is flagged for presence/text assertions.
pub struct DynamicContentExtractor;

impl Extractor for DynamicContentExtractor {
    fn id(&self) -> &'static str {
        "dynamic-content"
    }

    fn collision_policy(&self) -> CollisionPolicy {
        CollisionPolicy::NumericSuffix
    }

    fn extract(&self, markup: &str) -> Vec<Candidate> {
        let mut seen = HashSet::new();

        INTERPOLATION_RE
            .find_iter(markup)
            .filter_map(|m| {
                let tag = element_at(markup, m.start())?;
                // Interpolation inside an attribute value is not element content
                if m.start() < tag.end || NON_CONTENT_TAGS.contains(&tag.name.as_str()) {
                    return None;
                }
                if !seen.insert(tag.start) {
                    return None;
                }
                let text = text_run_at(markup, m.start())?;
                if !is_dynamic(&text) {
                    return None;
                }

                let qualifier = match tag
                    .class_tokens()
                    .into_iter()
                    .find(|c| is_css_identifier(c) && !c.starts_with("ng-"))
                {
                    Some(class) => CssQualifier::Class(class.to_string()),
                    None => CssQualifier::None,
                };
                let name = format!("{}Text", to_identifier(&tag.name));
                let target = css_target(markup, &tag, qualifier);

                Some(
                    Candidate::for_tag(&tag, name, target)
                        .dynamic()
                        .with_accessor(AccessorKind::Assert),
                )
            })
            .collect()
    }
}
