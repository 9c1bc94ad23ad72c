use crate::bom_explosion::domain::ComponentRecord;
use crate::bom_explosion::services::ExplosionStats;

/// BomResponse - Internal response DTO from the BOM fetch use case
///
/// Records are in emission order; the first one is always the root product.
#[derive(Debug, Clone)]
pub struct BomResponse {
    pub reference: String,
    pub root_name: String,
    pub records: Vec<ComponentRecord>,
    pub stats: ExplosionStats,
}

impl BomResponse {
    pub fn new(
        reference: String,
        root_name: String,
        records: Vec<ComponentRecord>,
        stats: ExplosionStats,
    ) -> Self {
        Self {
            reference,
            root_name,
            records,
            stats,
        }
    }

    /// Number of component rows below the root
    pub fn component_count(&self) -> usize {
        self.records.len().saturating_sub(1)
    }
}
