#![allow(dead_code)]

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use locator_catalog::catalog::catalog_model::{
    AccessorKind, ComponentDescriptor, ElementSelector, SelectorStrategy,
};
use locator_catalog::extract::extractor::ExtractorPipeline;
use locator_catalog::source::component_source::ComponentSource;

/// Run the standard pipeline over bare markup.
pub fn selectors(markup: &str) -> Vec<ElementSelector> {
    ExtractorPipeline::default().run(markup)
}

/// Find a selector by property name, panicking with the full list if absent.
pub fn selector<'a>(all: &'a [ElementSelector], name: &str) -> &'a ElementSelector {
    all.iter().find(|s| s.property_name == name).unwrap_or_else(|| {
        let names: Vec<&str> = all.iter().map(|s| s.property_name.as_str()).collect();
        panic!("no selector named {} in {:?}", name, names)
    })
}

/// Component source with an inline back-quoted template.
pub fn inline_component(path: &str, class: &str, tag: &str, template: &str) -> ComponentSource {
    ComponentSource::new(
        path,
        format!(
            "import {{ Component }} from '@angular/core';\n\n\
             @Component({{\n  selector: '{}',\n  template: `{}`,\n}})\n\
             export class {} {{}}\n",
            tag, template, class
        ),
    )
}

/// Component source pointing at an external template.
pub fn external_component(path: &str, class: &str, tag: &str, template_url: &str) -> ComponentSource {
    ComponentSource::new(
        path,
        format!(
            "@Component({{\n  selector: '{}',\n  templateUrl: '{}',\n}})\n\
             export class {} {{}}\n",
            tag, template_url, class
        ),
    )
}

pub fn dummy_selector(name: &str) -> ElementSelector {
    ElementSelector {
        element_type: "button".into(),
        strategy: SelectorStrategy::TestId,
        selector_expression: format!("[data-testid='{}']", name),
        property_name: name.into(),
        text_content: None,
        has_click_handler: false,
        click_handler: None,
        is_link: false,
        is_table: false,
        is_platform_widget: false,
        is_dynamic: false,
        accessor: AccessorKind::Click,
    }
}

/// Descriptor with `count` placeholder selectors.
pub fn descriptor(name: &str, path: &str, count: usize) -> ComponentDescriptor {
    ComponentDescriptor {
        name: name.into(),
        tag_selector: String::new(),
        source_path: PathBuf::from(path),
        template_source: None,
        selectors: (0..count).map(|i| dummy_selector(&format!("S{}", i))).collect(),
        inputs: BTreeSet::new(),
        outputs: BTreeSet::new(),
        route_path: None,
    }
}

/// Write `content` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}
