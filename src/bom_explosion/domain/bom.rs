use super::ProductId;
use std::fmt;

/// Catalog identity of a bill of materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BomId(i64);

impl BomId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for BomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An active bill of materials as returned by the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Bom {
    id: BomId,
    code: Option<String>,
}

impl Bom {
    pub fn new(id: BomId, code: Option<String>) -> Self {
        Self { id, code }
    }

    pub fn id(&self) -> BomId {
        self.id
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

/// One line of a BOM: a child product and its quantity per produced unit
#[derive(Debug, Clone, PartialEq)]
pub struct BomLine {
    product_id: Option<ProductId>,
    quantity_per_unit: f64,
}

impl BomLine {
    pub fn new(product_id: Option<ProductId>, quantity_per_unit: f64) -> Self {
        Self {
            product_id,
            quantity_per_unit,
        }
    }

    /// Lines without a linked product are skipped by the walker
    pub fn product_id(&self) -> Option<ProductId> {
        self.product_id
    }

    pub fn quantity_per_unit(&self) -> f64 {
        self.quantity_per_unit
    }
}
