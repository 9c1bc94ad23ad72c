use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts the output destination (CSV file, stdout)
/// where the formatted BOM export is presented.
pub trait OutputPresenter {
    /// Presents the formatted content to the output destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - The parent directory does not exist
    /// - The destination is a symbolic link
    fn present(&self, content: &str) -> Result<()>;
}
