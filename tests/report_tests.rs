use std::path::PathBuf;

use locator_catalog::catalog::catalog_model::{AccessorKind, ComponentCatalog};
use locator_catalog::engine::error::AnalysisWarning;
use locator_catalog::report::console::{format_catalog_report, format_selector_table};

mod common;
use crate::common::utils::{descriptor, dummy_selector, selectors};

// ============================================================================
// Helper builders
// ============================================================================

fn sample_catalog() -> ComponentCatalog {
    let mut login = descriptor("LoginComponent", "src/app/login.component.ts", 0);
    login.tag_selector = "app-login".into();
    login.route_path = Some("/login".into());
    login.selectors = selectors(
        r#"<button data-testid="submit">Save</button><input formControlName="username" />"#,
    );

    let empty = descriptor("EmptyComponent", "src/app/empty.component.ts", 0);

    ComponentCatalog::new(vec![login, empty]).unwrap()
}

fn no_template_warning() -> AnalysisWarning {
    AnalysisWarning {
        component: Some("ProfileComponent".into()),
        path: PathBuf::from("src/app/profile.component.ts"),
        message: "no template found".into(),
    }
}

// ============================================================================
// Console report
// ============================================================================

#[test]
fn console_report_header_counts() {
    let report = format_catalog_report(&sample_catalog(), &[]);
    assert!(report.starts_with("=== Component Catalog (2 components, 2 selectors) ===\n"));
}

#[test]
fn console_report_lists_components_with_route() {
    let catalog = sample_catalog();
    let report = format_catalog_report(&catalog, &[]);

    assert!(report.contains("LoginComponent <app-login> /login\n"));
    assert!(report.contains("[data-testid='submit']"));
    assert!(report.contains("input[formcontrolname='username']"));
    assert!(report.contains("EmptyComponent\n  (no selectors)\n"));
    assert!(report.ends_with(&format!("fingerprint: {}\n", catalog.fingerprint)));
}

#[test]
fn console_report_warnings_section() {
    let report = format_catalog_report(&sample_catalog(), &[no_template_warning()]);

    assert!(report.contains("=== Warnings: 1 ==="));
    assert!(report.contains(
        "  ProfileComponent (src/app/profile.component.ts): no template found\n"
    ));
}

#[test]
fn console_report_omits_empty_warnings() {
    let report = format_catalog_report(&sample_catalog(), &[]);
    assert!(!report.contains("Warnings"));
}

#[test]
fn selector_table_pads_names_and_shows_flags() {
    let mut wide = dummy_selector("VeryLongPropertyName");
    wide.is_link = true;
    let mut short = dummy_selector("Go");
    short.accessor = AccessorKind::Assert;
    short.is_dynamic = true;

    let table = format_selector_table(&[wide, short]);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("  TestId      Click  VeryLongPropertyName  "));
    assert!(lines[0].ends_with("  (link)"));
    assert!(lines[1].starts_with("  TestId      Assert Go                    "));
    assert!(lines[1].ends_with("  (dynamic)"));
}

#[test]
fn warning_display_without_component() {
    let warning = AnalysisWarning {
        component: None,
        path: PathBuf::from("notes.ts"),
        message: "no @Component declaration found".into(),
    };
    assert_eq!(warning.to_string(), "notes.ts: no @Component declaration found");
}
