//! odoo-bom - recursive Bill of Materials export from Odoo
//!
//! This library explodes a product's BOM into a flat, leveled component list,
//! following hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`bom_explosion`): BOM model, filter/quantity/collapse rules, the walker
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Odoo JSON-RPC, CSV, filesystem and console implementations
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use odoo_bom::prelude::*;
//! use std::time::Duration;
//!
//! # fn main() -> Result<()> {
//! let connection = OdooConnection {
//!     url: "https://erp.example.com".to_string(),
//!     db: "production".to_string(),
//!     username: "bot@example.com".to_string(),
//!     api_key: "secret".to_string(),
//!     lang: "en_GB".to_string(),
//!     timeout: Duration::from_secs(30),
//!     max_retries: 3,
//! };
//!
//! // Create adapters
//! let catalog = CachingCatalog::new(OdooCatalog::new(OdooRpcClient::connect(&connection)?));
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case and execute
//! let use_case = FetchBomUseCase::new(catalog, progress_reporter);
//! let response = use_case.execute(BomRequest::new("ROOT-1", ExplosionRules::default()))?;
//!
//! // Format output
//! let output = CsvFormatter::new().format(&response.records)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod bom_explosion;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::CsvFormatter;
    pub use crate::adapters::outbound::network::{
        CachingCatalog, OdooCatalog, OdooConnection, OdooRpcClient,
    };
    pub use crate::application::dto::{BomRequest, BomResponse};
    pub use crate::application::use_cases::FetchBomUseCase;
    pub use crate::bom_explosion::domain::{
        Bom, BomId, BomLine, ComponentRecord, ParentKey, Product, ProductId, ProductNames,
        TemplateId,
    };
    pub use crate::bom_explosion::policies::{
        ComponentFilter, ExplosionRules, NamingPolicy, QuantityAdjustment, QuantityBracket,
    };
    pub use crate::bom_explosion::services::{BomExplosion, BomWalker, ExplosionStats};
    pub use crate::ports::outbound::{
        BomFormatter, CatalogRepository, OutputPresenter, ProgressReporter,
    };
    pub use crate::shared::Result;
}
