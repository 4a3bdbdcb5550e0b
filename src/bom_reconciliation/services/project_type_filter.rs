use super::property_annotator::PropertyAnnotator;
use crate::bom_reconciliation::domain::property::{names, parse_bool};
use crate::bom_reconciliation::domain::{Bom, Component, ProjectType};

/// Components and dependencies of one SPDX import, split by whether the
/// project type can process them
#[derive(Debug, Default, Clone)]
pub struct SpdxSplit {
    pub supported: Bom,
    pub unsupported: Bom,
}

/// Components of a template BOM that have name, version and purl
pub fn extract_fully_specified_components(template: &Bom) -> Vec<Component> {
    template
        .components
        .iter()
        .filter(|c| c.is_fully_specified())
        .cloned()
        .collect()
}

/// Keeps components whose purl carries the project type's marker.
///
/// # Returns
/// The removed components, for the unsupported-components report
pub fn retain_supported_components(
    components: &mut Vec<Component>,
    project_type: ProjectType,
) -> Vec<Component> {
    let (supported, unsupported): (Vec<_>, Vec<_>) = std::mem::take(components)
        .into_iter()
        .partition(|c| project_type.supports_purl(c.purl_str()));

    for component in &unsupported {
        tracing::warn!(
            name = %component.name,
            version = %component.version,
            purl = %component.purl_str(),
            project_type = %project_type,
            "unsupported component removed"
        );
    }

    *components = supported;
    unsupported
}

/// Splits an SPDX import into the part the project type supports and the rest.
///
/// A component is supported when it is fully specified and its purl carries
/// the marker; a dependency is supported when its ref carries the marker.
/// Both halves are stamped with `identifier-type=SpdxImport` and the source
/// file name, keeping any dev classification already on the component.
pub fn split_spdx_bom(bom: Bom, project_type: ProjectType, file_name: &str) -> SpdxSplit {
    let Bom {
        components,
        dependencies,
        ..
    } = bom;

    let (mut supported, mut unsupported): (Vec<_>, Vec<_>) = components
        .into_iter()
        .partition(|c| c.is_fully_specified() && project_type.supports_purl(c.purl_str()));

    for component in supported.iter_mut().chain(unsupported.iter_mut()) {
        let is_development = component
            .property(names::IS_DEVELOPMENT)
            .and_then(parse_bool);
        PropertyAnnotator::mark_spdx_import(component, file_name, is_development);
    }

    let (supported_deps, unsupported_deps): (Vec<_>, Vec<_>) = dependencies
        .into_iter()
        .partition(|d| project_type.supports_purl(&d.bom_ref));

    if !unsupported.is_empty() {
        tracing::warn!(
            file = file_name,
            count = unsupported.len(),
            project_type = %project_type,
            "SPDX components not supported for this project type"
        );
    }

    SpdxSplit {
        supported: Bom {
            components: supported,
            dependencies: supported_deps,
            ..Bom::default()
        },
        unsupported: Bom {
            components: unsupported,
            dependencies: unsupported_deps,
            ..Bom::default()
        },
    }
}
