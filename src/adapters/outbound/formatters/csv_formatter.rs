use crate::bom_explosion::domain::ComponentRecord;
use crate::ports::outbound::BomFormatter;
use crate::shared::Result;
use anyhow::Context;

/// CSV header, in column order
pub const CSV_HEADER: [&str; 7] = [
    "level",
    "component_reference",
    "component_name",
    "component_quantity",
    "parent_bom_reference",
    "parent_bom_name",
    "has_child_bom",
];

/// CsvFormatter adapter for the flat BOM export
///
/// One row per record in emission order. Quantities carry exactly two
/// fraction digits; `has_child_bom` is written as `true` / `false`.
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BomFormatter for CsvFormatter {
    fn format(&self, records: &[ComponentRecord]) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record(CSV_HEADER)
            .context("Failed to write CSV header")?;

        for record in records {
            writer
                .write_record([
                    record.level().to_string(),
                    record.component_reference().to_string(),
                    record.component_name().to_string(),
                    record.formatted_quantity(),
                    record.parent_reference().to_string(),
                    record.parent_name().to_string(),
                    record.has_child_bom().to_string(),
                ])
                .with_context(|| {
                    format!(
                        "Failed to write CSV row for '{}'",
                        record.component_reference()
                    )
                })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))?;
        Ok(String::from_utf8(bytes)?)
    }
}
