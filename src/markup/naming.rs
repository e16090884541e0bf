use std::collections::HashSet;

// ============================================================================
// Property naming and per-component uniqueness
// ============================================================================

/// Convert free text or an attribute value into a PascalCase identifier.
///
/// Splits on every non-alphanumeric run and capitalizes each word:
/// `"go-btn"` → `"GoBtn"`, `"Sign in"` → `"SignIn"`. A leading digit is
/// prefixed with `_` so the result stays a valid property name.
pub fn to_identifier(raw: &str) -> String {
    let mut out = String::new();

    for word in raw.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// What a pass does when its preferred name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Drop the candidate
    Skip,

    /// Try `Name2`, `Name3`, ... until one is free
    NumericSuffix,

    /// Append how many candidates the pass found before this one; drop if that is taken too
    Ordinal,
}

/// Collision table for one component's extraction run.
///
/// Tracks claimed property names and the elements (by opening-tag offset)
/// that already produced a selector. Created per component and dropped with it.
#[derive(Debug, Default)]
pub struct NameRegistry {
    names: HashSet<String>,
    elements: HashSet<usize>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_element_claimed(&self, element_start: usize) -> bool {
        self.elements.contains(&element_start)
    }

    pub fn claim_element(&mut self, element_start: usize) {
        self.elements.insert(element_start);
    }

    /// Claim `base` (or a disambiguated variant of it) under `policy`.
    ///
    /// Returns the claimed name, or `None` if the candidate must be dropped.
    pub fn claim(&mut self, base: &str, policy: CollisionPolicy, ordinal: usize) -> Option<String> {
        if base.is_empty() {
            return None;
        }

        let name = if !self.names.contains(base) {
            base.to_string()
        } else {
            match policy {
                CollisionPolicy::Skip => return None,
                CollisionPolicy::NumericSuffix => (2..)
                    .map(|n| format!("{}{}", base, n))
                    .find(|candidate| !self.names.contains(candidate))?,
                CollisionPolicy::Ordinal => {
                    let candidate = format!("{}{}", base, ordinal);
                    if self.names.contains(&candidate) {
                        return None;
                    }
                    candidate
                }
            }
        };

        self.names.insert(name.clone());
        Some(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
