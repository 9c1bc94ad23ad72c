/// Application layer - Use cases and DTOs
///
/// This layer orchestrates the BOM explosion services and coordinates
/// with the Odoo catalog and output adapters through ports.
pub mod dto;
pub mod factories;
pub mod use_cases;
