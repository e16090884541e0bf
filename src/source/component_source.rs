use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::engine::error::AnalysisError;

static COMPONENT_DECORATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@Component\s*\(\s*\{").unwrap());
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bclass\s+([A-Za-z_$][\w$]*)").unwrap()
});
static SELECTOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bselector\s*:\s*(?:'([^']*)'|"([^"]*)"|`([^`]*)`)"#).unwrap()
});
static TEMPLATE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\btemplateUrl\s*:\s*(?:'([^']*)'|"([^"]*)"|`([^`]*)`)"#).unwrap()
});

// Inline template conventions, tried in this order
static BACKTICK_TEMPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\btemplate\s*:\s*`((?:[^`\\]|\\.)*)`").unwrap());
static SINGLE_QUOTE_TEMPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\btemplate\s*:\s*'((?:[^'\\]|\\.)*)'").unwrap());
static DOUBLE_QUOTE_TEMPLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\btemplate\s*:\s*"((?:[^"\\]|\\.)*)""#).unwrap());

const MEMBER_MODIFIERS: &str = r"(?:(?:public|private|protected|readonly|override|declare)\s+)*";

static INPUT_DECORATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"@Input\s*\([^)]*\)\s*{}(?:set\s+)?([A-Za-z_$][\w$]*)",
        MEMBER_MODIFIERS
    ))
    .unwrap()
});
static OUTPUT_DECORATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"@Output\s*\([^)]*\)\s*{}([A-Za-z_$][\w$]*)",
        MEMBER_MODIFIERS
    ))
    .unwrap()
});
static SIGNAL_INPUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z_$][\w$]*)\s*=\s*(?:input|model)(?:\.required)?\s*[<(]").unwrap()
});
static SIGNAL_OUTPUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z_$][\w$]*)\s*=\s*(?:output|outputFromObservable)\s*[<(]").unwrap()
});

// ============================================================================
// Component source text and the metadata read from it
// ============================================================================

/// Raw source of one component definition, in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSource {
    pub path: PathBuf,
    pub text: String,
}

impl ComponentSource {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read a component source from disk.
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let text = std::fs::read_to_string(path).map_err(|source| AnalysisError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, text))
    }
}

/// Metadata declared by a `@Component` class.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentMeta {
    pub name: String,
    pub tag_selector: String,
    pub template_url: Option<String>,
    pub inputs: BTreeSet<String>,
    pub outputs: BTreeSet<String>,
}

fn first_group<'a>(caps: &Captures<'a>) -> Option<&'a str> {
    (1..caps.len()).find_map(|i| caps.get(i)).map(|m| m.as_str())
}

/// Read component metadata. `None` when the text declares no `@Component`.
pub fn parse_component_meta(text: &str) -> Option<ComponentMeta> {
    let decorator = COMPONENT_DECORATOR_RE.find(text)?;
    let metadata_end = closing_brace(text, decorator.end() - 1).unwrap_or(decorator.end());
    let after = &text[decorator.start()..];
    let class = CLASS_RE.captures_at(after, metadata_end - decorator.start())?;
    let class_start = class.get(0)?.start();
    let decorator_body = &after[..class_start];

    let tag_selector = SELECTOR_RE
        .captures(decorator_body)
        .and_then(|caps| first_group(&caps).map(|s| s.trim().to_string()))
        .unwrap_or_default();
    let template_url = TEMPLATE_URL_RE
        .captures(decorator_body)
        .and_then(|caps| first_group(&caps).map(|s| s.trim().to_string()))
        .filter(|url| !url.is_empty());

    let class_body = &after[class_start..];
    let inputs = INPUT_DECORATOR_RE
        .captures_iter(class_body)
        .chain(SIGNAL_INPUT_RE.captures_iter(class_body))
        .map(|caps| caps[1].to_string())
        .collect();
    let outputs = OUTPUT_DECORATOR_RE
        .captures_iter(class_body)
        .chain(SIGNAL_OUTPUT_RE.captures_iter(class_body))
        .map(|caps| caps[1].to_string())
        .collect();

    Some(ComponentMeta {
        name: class[1].to_string(),
        tag_selector,
        template_url,
        inputs,
        outputs,
    })
}

/// Offset just past the `}` matching the `{` at `open`, skipping string and
/// template literals.
fn closing_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (offset, ch) in text.get(open..)?.char_indices() {
        if let Some(q) = quote {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                c if c == q => quote = None,
                _ => {}
            }
            continue;
        }
        match ch {
            '\'' | '"' | '`' => quote = Some(ch),
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Inline template literal, trying back-quoted, single- then double-quoted.
///
/// The first convention that matches wins, even if its literal is empty.
pub fn inline_template(text: &str) -> Option<String> {
    [
        &*BACKTICK_TEMPLATE_RE,
        &*SINGLE_QUOTE_TEMPLATE_RE,
        &*DOUBLE_QUOTE_TEMPLATE_RE,
    ]
    .iter()
    .find_map(|re| re.captures(text))
    .map(|caps| caps[1].to_string())
}
