use super::{ComponentFilter, QuantityAdjustment};

/// The business rules applied while exploding a BOM
///
/// Built from configuration in production; tests substitute their own
/// keyword lists and bracket tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplosionRules {
    filter: ComponentFilter,
    quantity_adjustment: QuantityAdjustment,
    collapse_single_child: bool,
}

impl ExplosionRules {
    pub fn new(
        filter: ComponentFilter,
        quantity_adjustment: QuantityAdjustment,
        collapse_single_child: bool,
    ) -> Self {
        Self {
            filter,
            quantity_adjustment,
            collapse_single_child,
        }
    }

    pub fn filter(&self) -> &ComponentFilter {
        &self.filter
    }

    pub fn quantity_adjustment(&self) -> &QuantityAdjustment {
        &self.quantity_adjustment
    }

    /// Whether single-child sub-assemblies are elided from the output
    pub fn collapse_single_child(&self) -> bool {
        self.collapse_single_child
    }

    pub fn with_collapse(mut self, enabled: bool) -> Self {
        self.collapse_single_child = enabled;
        self
    }
}

impl Default for ExplosionRules {
    fn default() -> Self {
        Self::new(ComponentFilter::default(), QuantityAdjustment::default(), true)
    }
}
