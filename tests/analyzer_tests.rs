use std::path::{Path, PathBuf};

use locator_catalog::catalog::catalog_model::SelectorStrategy;
use locator_catalog::engine::analyzer::Analyzer;
use locator_catalog::engine::error::AnalysisError;
use locator_catalog::extract::extractor::ExtractorPipeline;
use locator_catalog::source::component_source::ComponentSource;
use locator_catalog::source::template_loader::MemoryTemplateResolver;
use locator_catalog::trace::logger::TraceLogger;

mod common;
use crate::common::utils::{external_component, inline_component};

fn analyzer(resolver: MemoryTemplateResolver) -> Analyzer {
    Analyzer::new(ExtractorPipeline::default(), Box::new(resolver))
}

// ============================================================================
// Single-component analysis
// ============================================================================

#[test]
fn external_template_produces_descriptor() {
    let source = external_component(
        "src/app/login/login.component.ts",
        "LoginComponent",
        "app-login",
        "./login.component.html",
    );
    let resolver = MemoryTemplateResolver::new().with_file(
        "src/app/login/login.component.html",
        r#"<button data-testid="submit">Save</button>"#,
    );

    let outcome = analyzer(resolver).analyze_component(&source);
    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);

    let login = outcome.descriptor.unwrap();
    assert_eq!(login.name, "LoginComponent");
    assert_eq!(login.tag_selector, "app-login");
    assert_eq!(
        login.template_source,
        Some(PathBuf::from("src/app/login/login.component.html"))
    );
    assert_eq!(login.selectors.len(), 1);
    assert_eq!(login.selectors[0].strategy, SelectorStrategy::TestId);
    assert_eq!(login.selectors[0].selector_expression, "[data-testid='submit']");
    assert!(login.route_path.is_none());
}

#[test]
fn inline_template_has_no_template_source() {
    let source = inline_component(
        "src/app/hello.component.ts",
        "HelloComponent",
        "app-hello",
        "<h1>{{ title }}</h1>",
    );

    let hello = analyzer(MemoryTemplateResolver::new())
        .analyze_component(&source)
        .descriptor
        .unwrap();

    assert!(hello.template_source.is_none());
    assert_eq!(hello.selectors.len(), 1);
    assert_eq!(hello.selectors[0].property_name, "H1Text");
    assert!(hello.selectors[0].is_dynamic);
}

#[test]
fn missing_template_warns_and_keeps_empty_descriptor() {
    let source = external_component(
        "src/app/ghost.component.ts",
        "GhostComponent",
        "app-ghost",
        "./missing.html",
    );

    let outcome = analyzer(MemoryTemplateResolver::new()).analyze_component(&source);

    let ghost = outcome.descriptor.unwrap();
    assert!(ghost.selectors.is_empty());
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].component.as_deref(), Some("GhostComponent"));
    assert_eq!(outcome.warnings[0].message, "no template found");
}

#[test]
fn non_component_source_is_skipped_with_warning() {
    let source = ComponentSource::new(
        "src/app/util.ts",
        "export function add(a: number, b: number) { return a + b; }",
    );

    let outcome = analyzer(MemoryTemplateResolver::new()).analyze_component(&source);

    assert!(outcome.descriptor.is_none());
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].component.is_none());
    assert_eq!(outcome.warnings[0].path, Path::new("src/app/util.ts"));
}

#[test]
fn inputs_and_outputs_are_recorded() {
    let source = ComponentSource::new(
        "src/app/card.component.ts",
        r#"
@Component({
  selector: 'app-card',
  template: '<app-title>Card</app-title>',
})
export class CardComponent {
  @Input() heading = '';
  @Output() closed = new EventEmitter<void>();
  readonly size = input(1);
}
"#,
    );

    let card = analyzer(MemoryTemplateResolver::new())
        .analyze_component(&source)
        .descriptor
        .unwrap();

    assert!(card.inputs.contains("heading"));
    assert!(card.inputs.contains("size"));
    assert!(card.outputs.contains("closed"));
    assert_eq!(card.selectors[0].property_name, "Card");
}

// ============================================================================
// Multi-component analysis and dedup
// ============================================================================

#[test]
fn empty_pipeline_is_fatal() {
    let analyzer = Analyzer::new(
        ExtractorPipeline::new(vec![]),
        Box::new(MemoryTemplateResolver::new()),
    );

    let result = analyzer.analyze(&[]);
    assert!(matches!(result, Err(AnalysisError::NoExtractors)));
}

#[test]
fn duplicate_component_names_keep_richer_descriptor() {
    let sources = vec![
        inline_component("projects/a/login.component.ts", "LoginComponent", "app-login", "<div></div>"),
        inline_component(
            "projects/b/login.component.ts",
            "LoginComponent",
            "app-login",
            r#"<button data-testid="submit">Go</button><a routerLink="/help">Help</a>"#,
        ),
    ];

    let report = analyzer(MemoryTemplateResolver::new()).analyze(&sources).unwrap();

    assert_eq!(report.components.len(), 1);
    let login = &report.components[0];
    assert_eq!(login.selectors.len(), 2);
    assert_eq!(login.source_path, Path::new("projects/b/login.component.ts"));
}

#[test]
fn output_follows_discovery_order() {
    let sources = vec![
        inline_component("z.component.ts", "ZetaComponent", "app-zeta", "<b>z</b>"),
        inline_component("a.component.ts", "AlphaComponent", "app-alpha", "<b>a</b>"),
        inline_component("m.component.ts", "MuComponent", "app-mu", "<b>m</b>"),
    ];

    let report = analyzer(MemoryTemplateResolver::new()).analyze(&sources).unwrap();
    let names: Vec<&str> = report.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["ZetaComponent", "AlphaComponent", "MuComponent"]);
}

#[test]
fn catalog_fingerprint_is_stable_across_runs() {
    let sources = vec![
        inline_component(
            "a.component.ts",
            "AComponent",
            "app-a",
            r#"<input formControlName="username" /><button>Sign in</button>"#,
        ),
        inline_component("b.component.ts", "BComponent", "app-b", "<p>{{ total }}</p>"),
    ];

    let (first, _) = analyzer(MemoryTemplateResolver::new())
        .analyze(&sources)
        .unwrap()
        .into_catalog()
        .unwrap();
    let (second, _) = analyzer(MemoryTemplateResolver::new())
        .analyze(&sources)
        .unwrap()
        .into_catalog()
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.fingerprint.len(), 40);
    assert_eq!(first.selector_count(), 3);
    assert!(first.component("BComponent").is_some());
}

#[test]
fn warnings_do_not_stop_other_components() {
    let sources = vec![
        ComponentSource::new("notes.ts", "// nothing here"),
        inline_component("ok.component.ts", "OkComponent", "app-ok", "<button>Ok</button>"),
    ];

    let report = analyzer(MemoryTemplateResolver::new()).analyze(&sources).unwrap();

    assert_eq!(report.components.len(), 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.components[0].selector("OkButton").is_some());
}

#[test]
fn convenience_analyze_uses_standard_pipeline() {
    let sources = vec![inline_component(
        "x.component.ts",
        "XComponent",
        "app-x",
        r#"<button id="go" data-testid="go-btn">Go</button>"#,
    )];

    let report = locator_catalog::analyze(&sources, Box::new(MemoryTemplateResolver::new())).unwrap();
    assert_eq!(report.components[0].selectors.len(), 1);
    assert_eq!(report.components[0].selectors[0].property_name, "GoBtn");
}

// ============================================================================
// Trace output
// ============================================================================

#[test]
fn tracer_writes_component_and_summary_events() {
    let dir = tempfile::tempdir().unwrap();
    let trace_path = dir.path().join("trace.jsonl");

    let analyzer = analyzer(MemoryTemplateResolver::new())
        .with_tracer(TraceLogger::new(&trace_path));
    let sources = vec![inline_component("a.component.ts", "AComponent", "app-a", "<button>Hi</button>")];
    analyzer.analyze(&sources).unwrap();

    let content = std::fs::read_to_string(&trace_path).unwrap();
    let events: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["event"], "component");
    assert_eq!(events[0]["component"], "AComponent");
    assert_eq!(events[0]["template"], "inline");
    assert_eq!(events[0]["selectors"], 1);
    assert_eq!(events[1]["event"], "summary");
    assert_eq!(events[1]["components"], 1);
}

#[test]
fn disabled_tracer_has_no_path() {
    assert!(TraceLogger::disabled().path().is_none());
}
