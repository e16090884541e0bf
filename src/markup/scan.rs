use regex::Regex;
use std::sync::LazyLock;

// ============================================================================
// Raw-text scanning helpers shared by every extractor
// ============================================================================

/// Angular live-binding interpolation marker.
pub const INTERPOLATION_MARKER: &str = "{{";

static OPEN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([a-zA-Z][\w:-]*)").unwrap());
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=/>"']+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});
static ICON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(mat-icon|i)\b[^>]*>.*?</(mat-icon|i)>").unwrap()
});
static ANY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Whether a literal value depends on a live binding.
pub fn is_dynamic(text: &str) -> bool {
    text.contains(INTERPOLATION_MARKER)
}

/// A single attribute as written in an opening tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

/// An opening tag located in raw markup.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenTag {
    /// Byte offset of `<`; doubles as the element's identity within one template
    pub start: usize,

    /// Byte offset of the closing `>`
    pub end: usize,

    /// Lower-cased tag name
    pub name: String,

    pub attributes: Vec<Attribute>,
}

impl OpenTag {
    /// Value of a static attribute, matched case-insensitively.
    ///
    /// Bound forms such as `[placeholder]` never match `placeholder`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Static attribute value that is non-empty and free of interpolation.
    pub fn static_attr(&self, name: &str) -> Option<&str> {
        self.attr(name)
            .map(str::trim)
            .filter(|v| !v.is_empty() && !is_dynamic(v))
    }

    pub fn class_tokens(&self) -> Vec<&str> {
        self.static_attr("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn is_self_closing(&self, markup: &str) -> bool {
        markup[..self.end].ends_with('/')
    }
}

/// Parse the opening tag whose `<` sits at `start`.
pub fn parse_open_tag(markup: &str, start: usize) -> Option<OpenTag> {
    let rest = markup.get(start..)?;
    let caps = OPEN_TAG_RE.captures(rest)?;
    if caps.get(0)?.start() != 0 {
        return None;
    }
    let name_match = caps.get(1)?;
    let end = open_tag_end(markup, start)?;
    let attr_region = &markup[start + name_match.end()..end];

    Some(OpenTag {
        start,
        end,
        name: name_match.as_str().to_lowercase(),
        attributes: parse_attributes(attr_region),
    })
}

/// Locate the `>` ending the tag that opens at `start`, skipping quoted values.
pub fn open_tag_end(markup: &str, start: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (offset, ch) in markup.get(start..)?.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(ch),
            (None, '>') => return Some(start + offset),
            _ => {}
        }
    }
    None
}

fn parse_attributes(region: &str) -> Vec<Attribute> {
    ATTR_RE
        .captures_iter(region)
        .map(|caps| Attribute {
            name: caps[1].to_string(),
            value: caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string()),
        })
        .collect()
}

/// Every opening tag in document order.
pub fn open_tags(markup: &str) -> Vec<OpenTag> {
    OPEN_TAG_RE
        .find_iter(markup)
        .filter_map(|m| parse_open_tag(markup, m.start()))
        .collect()
}

/// Scan backward from `pos` to the nearest unclosed opening tag.
///
/// A position inside an opening tag (an attribute) resolves to that tag.
/// Closed elements met on the way are skipped with their closing tags, as are
/// void and self-closing tags.
pub fn element_at(markup: &str, pos: usize) -> Option<OpenTag> {
    let pos = pos.min(markup.len());
    let mut cursor = pos;
    let mut closed: Vec<String> = Vec::new();

    while let Some(lt) = markup.get(..cursor)?.rfind('<') {
        cursor = lt;
        let rest = &markup[lt + 1..];

        if let Some(after) = rest.strip_prefix('/') {
            closed.push(closing_name(after));
            continue;
        }
        if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
            continue;
        }
        let Some(tag) = parse_open_tag(markup, lt) else {
            continue;
        };
        if pos <= tag.end {
            return Some(tag);
        }
        if VOID_ELEMENTS.contains(&tag.name.as_str()) || tag.is_self_closing(markup) {
            continue;
        }
        match closed.last() {
            Some(name) if *name == tag.name => {
                closed.pop();
            }
            _ => return Some(tag),
        }
    }
    None
}

fn closing_name(after_slash: &str) -> String {
    after_slash
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | ':' | '_'))
        .collect::<String>()
        .to_lowercase()
}

/// Tag name of the element enclosing `pos`, or `"unknown"`.
pub fn element_type_at(markup: &str, pos: usize) -> String {
    element_at(markup, pos)
        .map(|tag| tag.name)
        .unwrap_or_else(|| "unknown".to_string())
}

/// Text between the end of an opening tag and the next `<`.
pub fn text_after(markup: &str, tag: &OpenTag) -> Option<String> {
    let rest = markup.get(tag.end + 1..)?;
    let raw = match rest.find('<') {
        Some(lt) => &rest[..lt],
        None => rest,
    };
    normalize_text(raw)
}

/// The run of text around `pos`, bounded by the nearest `>` before it and `<` after it.
pub fn text_run_at(markup: &str, pos: usize) -> Option<String> {
    let pos = pos.min(markup.len());
    let start = markup.get(..pos)?.rfind('>').map_or(0, |gt| gt + 1);
    let rest = markup.get(pos..)?;
    let end = rest.find('<').map_or(markup.len(), |lt| pos + lt);
    normalize_text(markup.get(start..end)?)
}

/// Whether a class token can be used verbatim after `.` in a CSS selector.
pub fn is_css_identifier(token: &str) -> bool {
    let body = token.strip_prefix('-').unwrap_or(token);
    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c == '-' || c.is_ascii_alphanumeric())
}

/// Full inner text of an element up to its first matching close tag.
///
/// Icon ligatures are dropped and nested markup is stripped.
pub fn inner_text(markup: &str, tag: &OpenTag) -> Option<String> {
    let body = inner_markup(markup, tag)?;
    let without_icons = ICON_RE.replace_all(body, " ");
    let stripped = ANY_TAG_RE.replace_all(&without_icons, " ");
    normalize_text(&stripped)
}

/// Raw markup between an opening tag and its first matching close tag.
pub fn inner_markup<'a>(markup: &'a str, tag: &OpenTag) -> Option<&'a str> {
    let body_start = tag.end + 1;
    let rest = markup.get(body_start..)?;
    let closing = format!("</{}", tag.name);
    let close = rest.to_ascii_lowercase().find(&closing)?;
    rest.get(..close)
}

/// Collapse runs of whitespace; `None` when nothing remains.
pub fn normalize_text(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Text usable in a static selector: present and free of interpolation.
pub fn static_text(text: Option<String>) -> Option<String> {
    text.filter(|t| !is_dynamic(t))
}

/// Position of `tag` among the opening tags accepted by `same`, and their total.
pub fn ordinal_among<F>(markup: &str, tag: &OpenTag, same: F) -> (usize, usize)
where
    F: Fn(&OpenTag) -> bool,
{
    let matching: Vec<usize> = open_tags(markup)
        .iter()
        .filter(|t| same(t))
        .map(|t| t.start)
        .collect();
    let index = matching.iter().position(|&s| s == tag.start).unwrap_or(0);
    (index, matching.len())
}

const VOID_ELEMENTS: &[&str] = &["input", "img", "br", "hr", "meta", "link", "source", "wbr"];

/// Immediate text after the opening tag, falling back to the stripped inner text.
///
/// Void elements have no text of their own.
pub fn element_text(markup: &str, tag: &OpenTag) -> Option<String> {
    if VOID_ELEMENTS.contains(&tag.name.as_str()) || tag.is_self_closing(markup) {
        return None;
    }
    text_after(markup, tag).or_else(|| inner_text(markup, tag))
}
