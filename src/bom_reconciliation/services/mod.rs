mod bom_generator;
mod bom_merger;
mod dependency_cleaner;
mod exclusion_filter;
mod project_type_filter;
mod property_annotator;
mod validity_filter;

pub use bom_generator::{BomGenerator, TOOL_NAME};
pub use bom_merger::{
    combine_components_from_existing_bom, dedup_dependencies_by_ref, merge, merge_compositions,
    MergedBom,
};
pub use dependency_cleaner::remove_invalid_dependencies_and_references;
pub use exclusion_filter::ExclusionFilter;
pub use project_type_filter::{
    extract_fully_specified_components, retain_supported_components, split_spdx_bom, SpdxSplit,
};
pub use property_annotator::PropertyAnnotator;
pub use validity_filter::{dedup_by_identity, remove_invalid_components, ValidityReport};
