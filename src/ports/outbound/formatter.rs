use crate::application::read_models::DashboardView;
use crate::shared::Result;

/// ViewFormatter port for rendering a dashboard view
///
/// This port abstracts the output format (JSON, Markdown) that a rendered
/// view is turned into before presentation.
pub trait ViewFormatter {
    /// Formats one rendered view
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, view: &DashboardView) -> Result<String>;
}
