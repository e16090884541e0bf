use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::extract::candidate::{Candidate, Target};
use crate::extract::extractor::Extractor;
use crate::markup::naming::to_identifier;
use crate::markup::scan::{element_at, is_dynamic};

static DATA_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s(data-[\w-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});
static ID_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\sid\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// First populated capture group at or after `first`.
pub(crate) fn quoted_value<'a>(caps: &Captures<'a>, first: usize) -> Option<&'a str> {
    caps.get(first)
        .or_else(|| caps.get(first + 1))
        .map(|m| m.as_str())
}

// ============================================================================
// Pass 1: explicit test-identifier attributes
// ============================================================================

pub struct TestIdExtractor {
    /// Lower-cased, most preferred first
    attributes: Vec<String>,
}

impl TestIdExtractor {
    pub fn new(attributes: &[String]) -> Self {
        Self {
            attributes: attributes.iter().map(|a| a.to_ascii_lowercase()).collect(),
        }
    }
}

impl Extractor for TestIdExtractor {
    fn id(&self) -> &'static str {
        "test-id"
    }

    fn extract(&self, markup: &str) -> Vec<Candidate> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for caps in DATA_ATTR_RE.captures_iter(markup) {
            let attribute = caps[1].to_ascii_lowercase();
            if !self.attributes.contains(&attribute) {
                continue;
            }
            let position = caps.get(0).map_or(0, |m| m.start());

            let Some(tag) = element_at(markup, position) else {
                let value = quoted_value(&caps, 2).unwrap_or("").trim();
                if !value.is_empty() && !is_dynamic(value) {
                    candidates.push(Candidate::unanchored(
                        position,
                        to_identifier(value),
                        Target::TestId {
                            attribute,
                            value: value.to_string(),
                        },
                    ));
                }
                continue;
            };
            if !seen.insert(tag.start) {
                continue;
            }

            // An element carrying several test attributes uses the preferred one
            let preferred = self
                .attributes
                .iter()
                .find_map(|a| tag.attr(a).map(|v| (a.clone(), v.trim().to_string())));
            let Some((attribute, value)) = preferred else {
                continue;
            };
            if value.is_empty() || is_dynamic(&value) {
                continue;
            }

            candidates.push(Candidate::for_tag(
                &tag,
                to_identifier(&value),
                Target::TestId { attribute, value },
            ));
        }

        candidates
    }
}

// ============================================================================
// Pass 2: explicit id attributes
// ============================================================================

pub struct IdExtractor;

impl Extractor for IdExtractor {
    fn id(&self) -> &'static str {
        "id"
    }

    fn extract(&self, markup: &str) -> Vec<Candidate> {
        ID_ATTR_RE
            .captures_iter(markup)
            .filter_map(|caps| {
                let position = caps.get(0)?.start();
                let value = quoted_value(&caps, 1)?.trim();
                if value.is_empty() || is_dynamic(value) {
                    return None;
                }

                let target = Target::Id(value.to_string());
                let name = to_identifier(value);
                Some(match element_at(markup, position) {
                    Some(tag) => Candidate::for_tag(&tag, name, target),
                    None => Candidate::unanchored(position, name, target),
                })
            })
            .collect()
    }
}
