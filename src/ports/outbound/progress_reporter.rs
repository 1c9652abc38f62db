/// Feedback channel for a fixture load.
///
/// Fetches settle inside concurrent futures, hence `Send + Sync`.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, message: &str);

    /// `current` of `total` fixtures have settled; `message` names the last one.
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Shown even in quiet mode.
    fn report_error(&self, message: &str);

    fn report_completion(&self, message: &str);
}
