pub mod bom;
pub mod comparison_bom_data;
pub mod component;
pub mod composition;
pub mod dependency;
pub mod property;
pub mod purl;

pub use bom::{Bom, Metadata};
pub use comparison_bom_data::{
    ComparisonBomData, ReleaseRecord, TrackerLookup, TrackerStatus, UploadStatus,
};
pub use component::{Classification, Component};
pub use composition::Composition;
pub use dependency::Dependency;
pub use property::{IdentifierType, Property};
pub use purl::{normalize_purl, ProjectType};
