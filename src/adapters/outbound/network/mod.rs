/// Network adapters for the component-tracking system
mod caching_release_repository;
mod sw360_client;

pub use caching_release_repository::CachingReleaseRepository;
pub use sw360_client::Sw360ReleaseRepository;
