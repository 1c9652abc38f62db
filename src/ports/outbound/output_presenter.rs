use crate::shared::Result;

/// Destination for a formatted dashboard view (stdout, a file).
pub trait OutputPresenter {
    /// # Errors
    /// Fails when the destination cannot be written, or is a symbolic link.
    fn present(&self, content: &str) -> Result<()>;
}
