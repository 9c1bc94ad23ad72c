/// ProgressReporter port for reporting progress during a BOM fetch
///
/// This port abstracts progress reporting (e.g., to stderr) so the walker
/// can narrate what it does without knowing where the lines end up.
/// Nothing reported here is authoritative; the exported records are.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports a per-component detail line
    ///
    /// Implementations may drop these unless verbose output was requested.
    fn report_detail(&self, message: &str);

    /// Reports progress of the traversal
    ///
    /// # Arguments
    /// * `boms_expanded` - Number of BOMs expanded so far
    /// * `message` - Optional message to include
    fn report_progress(&self, boms_expanded: usize, message: Option<&str>);

    /// Reports a recoverable problem (cycle, missing catalog record, ...)
    fn report_warning(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}

impl<T: ProgressReporter + ?Sized> ProgressReporter for &T {
    fn report(&self, message: &str) {
        (**self).report(message)
    }

    fn report_detail(&self, message: &str) {
        (**self).report_detail(message)
    }

    fn report_progress(&self, boms_expanded: usize, message: Option<&str>) {
        (**self).report_progress(boms_expanded, message)
    }

    fn report_warning(&self, message: &str) {
        (**self).report_warning(message)
    }

    fn report_completion(&self, message: &str) {
        (**self).report_completion(message)
    }
}
