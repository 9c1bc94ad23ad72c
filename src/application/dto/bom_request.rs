use crate::bom_explosion::policies::ExplosionRules;

/// BomRequest - Internal request DTO for the BOM fetch use case
#[derive(Debug, Clone)]
pub struct BomRequest {
    /// Internal reference of the root product
    pub reference: String,
    /// Filter, quantity and collapse rules for this fetch
    pub rules: ExplosionRules,
}

impl BomRequest {
    pub fn new(reference: impl Into<String>, rules: ExplosionRules) -> Self {
        Self {
            reference: reference.into(),
            rules,
        }
    }
}
