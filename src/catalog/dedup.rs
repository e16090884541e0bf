use std::collections::HashMap;

use crate::catalog::catalog_model::ComponentDescriptor;

// ============================================================================
// Component deduplication: "more information wins"
// ============================================================================

/// Collapse descriptors sharing a component name into one per name.
///
/// The first-discovered descriptor is kept unless a later one has strictly
/// more selectors, or the kept one has none and the later one has some. A
/// replacement takes the whole descriptor (no field merge) and occupies the
/// slot of the first discovery, so output order follows first discovery.
///
/// Two unrelated components that share a class name across projects are not
/// told apart by source path; the richer one silently wins.
pub fn dedup_components(descriptors: Vec<ComponentDescriptor>) -> Vec<ComponentDescriptor> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<ComponentDescriptor> = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        match slots.get(&descriptor.name) {
            Some(&slot) => {
                if should_replace(&kept[slot], &descriptor) {
                    kept[slot] = descriptor;
                }
            }
            None => {
                slots.insert(descriptor.name.clone(), kept.len());
                kept.push(descriptor);
            }
        }
    }

    kept
}

/// Whether a later discovery should replace the kept descriptor.
pub fn should_replace(kept: &ComponentDescriptor, later: &ComponentDescriptor) -> bool {
    let kept_count = kept.selectors.len();
    let later_count = later.selectors.len();

    later_count > kept_count || (kept_count == 0 && later_count > 0)
}
