use crate::bom_explosion::domain::ComponentRecord;
use crate::shared::Result;

/// BomFormatter port for rendering exploded BOM records
///
/// This port abstracts the tabular output format (CSV today).
pub trait BomFormatter {
    /// Formats the records in emission order
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, records: &[ComponentRecord]) -> Result<String>;
}
