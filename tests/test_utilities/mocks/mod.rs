/// Mock implementations for testing
mod mock_catalog_repository;
mod mock_progress_reporter;

pub use mock_catalog_repository::MockCatalogRepository;
pub use mock_progress_reporter::MockProgressReporter;
