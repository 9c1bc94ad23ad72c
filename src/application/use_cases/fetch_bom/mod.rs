use crate::application::dto::{BomRequest, BomResponse};
use crate::bom_explosion::services::{BomExplosion, BomWalker};
use crate::ports::outbound::{CatalogRepository, ProgressReporter};
use crate::shared::Result;

/// FetchBomUseCase - Core use case for exporting a product's BOM tree
///
/// This use case orchestrates the recursive fetch using generic
/// dependency injection for the catalog and progress reporting.
///
/// # Type Parameters
/// * `CR` - CatalogRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct FetchBomUseCase<CR, PR> {
    catalog: CR,
    progress_reporter: PR,
}

impl<CR, PR> FetchBomUseCase<CR, PR>
where
    CR: CatalogRepository,
    PR: ProgressReporter,
{
    /// Creates a new FetchBomUseCase with injected dependencies
    pub fn new(catalog: CR, progress_reporter: PR) -> Self {
        Self {
            catalog,
            progress_reporter,
        }
    }

    /// Executes the BOM fetch use case
    ///
    /// # Arguments
    /// * `request` - Root reference and explosion rules
    ///
    /// # Returns
    /// BomResponse with the flattened records and traversal counters
    ///
    /// # Errors
    /// Fails when the root product or its BOM cannot be found, or when the
    /// catalog cannot be reached. No partial result is returned in that case.
    pub fn execute(&self, request: BomRequest) -> Result<BomResponse> {
        let walker = BomWalker::new(&self.catalog, &self.progress_reporter, &request.rules);
        let explosion = walker.fetch_bom_recursive(&request.reference)?;

        self.report_summary(&explosion);

        Ok(BomResponse::new(
            request.reference,
            explosion.root_name,
            explosion.records,
            explosion.stats,
        ))
    }

    fn report_summary(&self, explosion: &BomExplosion) {
        let stats = &explosion.stats;
        let components = explosion.records.len().saturating_sub(1);

        if components == 0 {
            self.progress_reporter.report_warning(
                "⚠️  Warning: The BOM has no exportable components after filtering.",
            );
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Exploded {} BOM(s) into {} component record(s)",
            stats.boms_expanded, components
        ));

        if stats.filtered_components > 0 {
            self.progress_reporter.report(&format!(
                "🚫 Filtered out {} packaging/labeling component(s)",
                stats.filtered_components
            ));
        }
        if stats.adjusted_quantities > 0 {
            self.progress_reporter.report(&format!(
                "📉 Adjusted {} quantity(ies)",
                stats.adjusted_quantities
            ));
        }
        if stats.collapsed_chains > 0 {
            self.progress_reporter.report(&format!(
                "🪢 Collapsed {} single-child chain(s)",
                stats.collapsed_chains
            ));
        }
        if stats.skipped_lines > 0 || stats.circular_references > 0 {
            self.progress_reporter.report_warning(&format!(
                "⚠️  Warning: Skipped {} line(s) without catalog record and {} circular reference(s)",
                stats.skipped_lines, stats.circular_references
            ));
        }
    }
}
