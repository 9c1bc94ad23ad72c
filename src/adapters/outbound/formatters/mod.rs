/// Formatter adapters for BOM export formats
mod csv_formatter;

pub use csv_formatter::CsvFormatter;
