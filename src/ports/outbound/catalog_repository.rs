use crate::bom_explosion::domain::{Bom, BomId, BomLine, Product, ProductId, ProductNames};
use crate::shared::Result;

/// CatalogRepository port for reading products and bills of materials
///
/// This port abstracts the ERP catalog (e.g., Odoo) the walker reads from.
/// All lookups are read-only. `Ok(None)` means "no such record"; `Err` is
/// reserved for transport and protocol failures, which abort the fetch.
pub trait CatalogRepository {
    /// Finds a product by its exact internal reference
    ///
    /// Searches product variants first. When no variant carries the reference,
    /// falls back to product templates and returns the template's first variant.
    fn find_product_by_reference(&self, reference: &str) -> Result<Option<Product>>;

    /// Finds a product variant by its exact internal reference
    ///
    /// Unlike [`find_product_by_reference`](Self::find_product_by_reference)
    /// there is no template fallback.
    fn find_variant_by_reference(&self, reference: &str) -> Result<Option<Product>>;

    /// Finds the active BOM for a product variant
    ///
    /// A BOM linked to the variant itself wins. Otherwise BOMs of the variant's
    /// template apply when their own variant link is unset or equals this variant.
    fn find_active_bom(&self, product_id: ProductId) -> Result<Option<Bom>>;

    /// Lists the lines of a BOM
    fn list_bom_lines(&self, bom_id: BomId) -> Result<Vec<BomLine>>;

    /// Looks up a product's reference, own name and owning template's name
    ///
    /// Returns `Ok(None)` when the product id has no catalog record.
    fn product_names(&self, product_id: ProductId) -> Result<Option<ProductNames>>;
}

impl<T: CatalogRepository + ?Sized> CatalogRepository for &T {
    fn find_product_by_reference(&self, reference: &str) -> Result<Option<Product>> {
        (**self).find_product_by_reference(reference)
    }

    fn find_variant_by_reference(&self, reference: &str) -> Result<Option<Product>> {
        (**self).find_variant_by_reference(reference)
    }

    fn find_active_bom(&self, product_id: ProductId) -> Result<Option<Bom>> {
        (**self).find_active_bom(product_id)
    }

    fn list_bom_lines(&self, bom_id: BomId) -> Result<Vec<BomLine>> {
        (**self).list_bom_lines(bom_id)
    }

    fn product_names(&self, product_id: ProductId) -> Result<Option<ProductNames>> {
        (**self).product_names(product_id)
    }
}
