use crate::shared::Result;

/// OutputPresenter port for presenting the status report
///
/// This port abstracts where a rendered report goes (stdout, a file).
pub trait OutputPresenter {
    /// Presents rendered content to the output destination
    ///
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}
