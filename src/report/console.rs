use crate::catalog::catalog_model::{
    AccessorKind, ComponentCatalog, ComponentDescriptor, ElementSelector, SelectorStrategy,
};
use crate::engine::error::AnalysisWarning;

// ============================================================================
// Console reporter: catalog summary for the terminal
// ============================================================================

/// Format a catalog for terminal output.
///
/// Produces output like:
/// ```text
/// === Component Catalog (1 components, 2 selectors) ===
///
/// LoginComponent <app-login> /login
///   TestId      Click  Submit         [data-testid='submit']
///   Css         Fill   UsernameInput  input[formcontrolname='username']
///
/// === Warnings: 1 ===
///   ProfileComponent (src/app/profile.component.ts): no template found
/// ```
pub fn format_catalog_report(catalog: &ComponentCatalog, warnings: &[AnalysisWarning]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Component Catalog ({} components, {} selectors) ===\n",
        catalog.components.len(),
        catalog.selector_count()
    ));

    for component in &catalog.components {
        out.push('\n');
        out.push_str(&format_component_header(component));
        out.push_str(&format_selector_table(&component.selectors));
    }

    if !warnings.is_empty() {
        out.push_str(&format!("\n=== Warnings: {} ===\n", warnings.len()));
        for warning in warnings {
            out.push_str(&format!("  {}\n", warning));
        }
    }

    out.push_str(&format!("\nfingerprint: {}\n", catalog.fingerprint));
    out
}

fn format_component_header(component: &ComponentDescriptor) -> String {
    let mut header = component.name.clone();
    if !component.tag_selector.is_empty() {
        header.push_str(&format!(" <{}>", component.tag_selector));
    }
    if let Some(route) = &component.route_path {
        header.push_str(&format!(" {}", route));
    }
    header.push('\n');
    header
}

/// One row per selector, columns padded to the widest property name.
pub fn format_selector_table(selectors: &[ElementSelector]) -> String {
    if selectors.is_empty() {
        return "  (no selectors)\n".to_string();
    }

    let width = selectors
        .iter()
        .map(|s| s.property_name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for selector in selectors {
        let mut flags = Vec::new();
        if selector.is_link {
            flags.push("link");
        }
        if selector.is_table {
            flags.push("table");
        }
        if selector.is_platform_widget {
            flags.push("widget");
        }
        if selector.is_dynamic {
            flags.push("dynamic");
        }
        let flag_text = if flags.is_empty() {
            String::new()
        } else {
            format!("  ({})", flags.join(", "))
        };

        out.push_str(&format!(
            "  {:<11} {:<6} {:<width$}  {}{}\n",
            strategy_label(selector.strategy),
            accessor_label(selector.accessor),
            selector.property_name,
            selector.selector_expression,
            flag_text,
            width = width
        ));
    }
    out
}

fn strategy_label(strategy: SelectorStrategy) -> &'static str {
    match strategy {
        SelectorStrategy::TestId => "TestId",
        SelectorStrategy::Id => "Id",
        SelectorStrategy::Role => "Role",
        SelectorStrategy::Text => "Text",
        SelectorStrategy::Placeholder => "Placeholder",
        SelectorStrategy::Label => "Label",
        SelectorStrategy::Css => "Css",
    }
}

fn accessor_label(accessor: AccessorKind) -> &'static str {
    match accessor {
        AccessorKind::Click => "Click",
        AccessorKind::Fill => "Fill",
        AccessorKind::Assert => "Assert",
    }
}
