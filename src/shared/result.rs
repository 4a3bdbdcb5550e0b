/// Result alias with `anyhow::Error`, used across the crate for fallible
/// operations whose callers only need to report the failure.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
