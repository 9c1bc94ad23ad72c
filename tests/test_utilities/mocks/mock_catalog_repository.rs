use odoo_bom::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

struct MockProduct {
    reference: Option<String>,
    name: String,
    template_name: Option<String>,
}

/// In-memory catalog for testing, built product by product
#[derive(Default)]
pub struct MockCatalogRepository {
    products: HashMap<i64, MockProduct>,
    active_boms: HashMap<i64, i64>,
    bom_lines: HashMap<i64, Vec<BomLine>>,
    calls: AtomicUsize,
}

impl MockCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product; an empty reference means "no internal reference"
    pub fn with_product(mut self, id: i64, reference: &str, name: &str) -> Self {
        self.products.insert(
            id,
            MockProduct {
                reference: (!reference.is_empty()).then(|| reference.to_string()),
                name: name.to_string(),
                template_name: None,
            },
        );
        self
    }

    /// Sets the template name of an existing product
    pub fn with_template_name(mut self, id: i64, template_name: &str) -> Self {
        if let Some(product) = self.products.get_mut(&id) {
            product.template_name = Some(template_name.to_string());
        }
        self
    }

    /// Gives `product_id` an active BOM with `(child product id, quantity)` lines
    pub fn with_bom(mut self, product_id: i64, bom_id: i64, lines: &[(i64, f64)]) -> Self {
        self.active_boms.insert(product_id, bom_id);
        self.bom_lines.insert(
            bom_id,
            lines
                .iter()
                .map(|(child, qty)| BomLine::new(Some(ProductId::new(*child)), *qty))
                .collect(),
        );
        self
    }

    /// Total number of catalog calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl CatalogRepository for MockCatalogRepository {
    fn find_product_by_reference(&self, reference: &str) -> Result<Option<Product>> {
        self.find_variant_by_reference(reference)
    }

    fn find_variant_by_reference(&self, reference: &str) -> Result<Option<Product>> {
        self.count();
        Ok(self
            .products
            .iter()
            .find(|(_, p)| p.reference.as_deref() == Some(reference))
            .map(|(id, p)| {
                Product::new(
                    ProductId::new(*id),
                    p.reference.clone(),
                    p.name.clone(),
                    None,
                )
            }))
    }

    fn find_active_bom(&self, product_id: ProductId) -> Result<Option<Bom>> {
        self.count();
        Ok(self
            .active_boms
            .get(&product_id.value())
            .map(|bom_id| Bom::new(BomId::new(*bom_id), None)))
    }

    fn list_bom_lines(&self, bom_id: BomId) -> Result<Vec<BomLine>> {
        self.count();
        Ok(self
            .bom_lines
            .get(&bom_id.value())
            .cloned()
            .unwrap_or_default())
    }

    fn product_names(&self, product_id: ProductId) -> Result<Option<ProductNames>> {
        self.count();
        Ok(self.products.get(&product_id.value()).map(|p| {
            ProductNames::new(p.reference.clone(), p.name.clone(), p.template_name.clone())
        }))
    }
}
