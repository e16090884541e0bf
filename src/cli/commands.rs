use std::path::Path;

use crate::catalog::catalog_model::ComponentCatalog;
use crate::cli::config::ResolvedScan;
use crate::engine::analyzer::Analyzer;
use crate::engine::error::{AnalysisError, AnalysisWarning};
use crate::extract::extractor::{ExtractConfig, ExtractorPipeline};
use crate::report::console::{format_catalog_report, format_selector_table};
use crate::source::discovery::{Discovery, discover, load_sources};
use crate::source::routes::RouteTable;
use crate::source::template_loader::FsTemplateResolver;
use crate::trace::logger::TraceLogger;

// ============================================================================
// scan subcommand
// ============================================================================

/// Scan every root, analyze, and write the catalog. Returns the warnings.
pub fn cmd_scan(
    scan: &ResolvedScan,
    extract: &ExtractConfig,
    verbose: u8,
) -> Result<Vec<AnalysisWarning>, Box<dyn std::error::Error>> {
    let mut discovery = Discovery::default();
    for root in &scan.roots {
        let found = discover(Path::new(root), &scan.exclude_dirs)?;
        if verbose > 0 {
            eprintln!(
                "Scanned {}: {} components, {} routing files",
                root,
                found.components.len(),
                found.routing.len()
            );
        }
        discovery.extend(found);
    }

    let (catalog, warnings) = build_catalog(&discovery, scan.trace.as_deref(), extract, verbose)?;

    let rendered = match scan.format.as_str() {
        "console" => format_catalog_report(&catalog, &warnings),
        format => render_catalog(&catalog, format)?,
    };
    match &scan.output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            if verbose > 0 {
                eprintln!("  Wrote: {}", path);
            }
        }
        None => print!("{}", rendered),
    }

    if scan.format != "console" {
        for warning in &warnings {
            eprintln!("Warning: {}", warning);
        }
    }
    if verbose > 0 {
        eprintln!(
            "Catalog: {} components, {} selectors (fingerprint {})",
            catalog.components.len(),
            catalog.selector_count(),
            catalog.fingerprint
        );
    }

    Ok(warnings)
}

/// Load, analyze, route and deduplicate everything in `discovery`.
pub fn build_catalog(
    discovery: &Discovery,
    trace_path: Option<&str>,
    extract: &ExtractConfig,
    verbose: u8,
) -> Result<(ComponentCatalog, Vec<AnalysisWarning>), AnalysisError> {
    let (sources, load_errors) = load_sources(&discovery.components);
    let (routing, routing_errors) = load_sources(&discovery.routing);

    let tracer = match trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };
    let analyzer = Analyzer::new(
        ExtractorPipeline::standard(extract),
        Box::new(FsTemplateResolver),
    )
    .with_tracer(tracer);

    if verbose > 1 {
        eprintln!("Extractor order: {}", analyzer.pipeline().ids().join(", "));
    }

    let mut report = analyzer.analyze(&sources)?;
    RouteTable::from_sources(&routing).apply(&mut report.components);

    // Unreadable files never reach the analyzer; surface them as warnings
    for error in load_errors.iter().chain(routing_errors.iter()) {
        let path = match error {
            AnalysisError::SourceRead { path, .. } => path.clone(),
            _ => Default::default(),
        };
        report.warnings.push(AnalysisWarning {
            component: None,
            path,
            message: error.to_string(),
        });
    }

    report.into_catalog()
}

/// Serialize a catalog as `json` (default) or `yaml`.
pub fn render_catalog(catalog: &ComponentCatalog, format: &str) -> Result<String, AnalysisError> {
    match format {
        "yaml" | "yml" => serde_yaml::to_string(catalog).map_err(|source| {
            AnalysisError::YamlSerialize {
                context: "catalog".to_string(),
                source,
            }
        }),
        _ => serde_json::to_string_pretty(catalog)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|source| AnalysisError::JsonSerialize {
                context: "catalog".to_string(),
                source,
            }),
    }
}

// ============================================================================
// inspect subcommand
// ============================================================================

pub fn cmd_inspect(
    template: &str,
    extract: &ExtractConfig,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let markup = std::fs::read_to_string(template)?;
    let analyzer = Analyzer::new(
        ExtractorPipeline::standard(extract),
        Box::new(FsTemplateResolver),
    );

    if verbose > 0 {
        eprintln!("Inspecting {} ({} bytes)...", template, markup.len());
    }

    let selectors = analyzer.extract_selectors(&markup);
    println!("=== {} ({} selectors) ===", template, selectors.len());
    print!("{}", format_selector_table(&selectors));
    Ok(())
}

