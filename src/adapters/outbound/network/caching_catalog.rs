use crate::bom_explosion::domain::{Bom, BomId, BomLine, Product, ProductId, ProductNames};
use crate::ports::outbound::CatalogRepository;
use crate::shared::Result;
use dashmap::DashMap;

/// CachingCatalog wraps a CatalogRepository and adds in-memory caching.
///
/// This adapter implements the decorator pattern. The collapse lookahead and
/// the main traversal read the same BOMs and products; with the cache each
/// one costs a single round-trip. Misses ("not found") are cached too.
///
/// The cache lives as long as the decorator, i.e. one CLI run.
pub struct CachingCatalog<C: CatalogRepository> {
    inner: C,
    products_by_reference: DashMap<String, Option<Product>>,
    variants_by_reference: DashMap<String, Option<Product>>,
    active_boms: DashMap<ProductId, Option<Bom>>,
    bom_lines: DashMap<BomId, Vec<BomLine>>,
    product_names: DashMap<ProductId, Option<ProductNames>>,
}

impl<C: CatalogRepository> CachingCatalog<C> {
    /// Creates a new caching catalog wrapping the given inner catalog
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            products_by_reference: DashMap::new(),
            variants_by_reference: DashMap::new(),
            active_boms: DashMap::new(),
            bom_lines: DashMap::new(),
            product_names: DashMap::new(),
        }
    }

    /// Total number of cached entries (for testing/monitoring)
    pub fn cache_size(&self) -> usize {
        self.products_by_reference.len()
            + self.variants_by_reference.len()
            + self.active_boms.len()
            + self.bom_lines.len()
            + self.product_names.len()
    }
}

impl<C: CatalogRepository> CatalogRepository for CachingCatalog<C> {
    fn find_product_by_reference(&self, reference: &str) -> Result<Option<Product>> {
        if let Some(cached) = self.products_by_reference.get(reference) {
            return Ok(cached.clone());
        }

        let product = self.inner.find_product_by_reference(reference)?;
        self.products_by_reference
            .insert(reference.to_string(), product.clone());
        Ok(product)
    }

    fn find_variant_by_reference(&self, reference: &str) -> Result<Option<Product>> {
        if let Some(cached) = self.variants_by_reference.get(reference) {
            return Ok(cached.clone());
        }

        let product = self.inner.find_variant_by_reference(reference)?;
        self.variants_by_reference
            .insert(reference.to_string(), product.clone());
        Ok(product)
    }

    fn find_active_bom(&self, product_id: ProductId) -> Result<Option<Bom>> {
        if let Some(cached) = self.active_boms.get(&product_id) {
            return Ok(cached.clone());
        }

        let bom = self.inner.find_active_bom(product_id)?;
        self.active_boms.insert(product_id, bom.clone());
        Ok(bom)
    }

    fn list_bom_lines(&self, bom_id: BomId) -> Result<Vec<BomLine>> {
        if let Some(cached) = self.bom_lines.get(&bom_id) {
            return Ok(cached.clone());
        }

        let lines = self.inner.list_bom_lines(bom_id)?;
        self.bom_lines.insert(bom_id, lines.clone());
        Ok(lines)
    }

    fn product_names(&self, product_id: ProductId) -> Result<Option<ProductNames>> {
        if let Some(cached) = self.product_names.get(&product_id) {
            return Ok(cached.clone());
        }

        let names = self.inner.product_names(product_id)?;
        self.product_names.insert(product_id, names.clone());
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock catalog for testing that tracks call counts
    struct MockCatalog {
        call_count: AtomicUsize,
    }

    impl MockCatalog {
        fn new() -> Self {
            Self {
                call_count: AtomicUsize::new(0),
            }
        }

        fn get_call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    impl CatalogRepository for MockCatalog {
        fn find_product_by_reference(&self, reference: &str) -> Result<Option<Product>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok((reference == "ROOT-1").then(|| {
                Product::new(ProductId::new(1), Some(reference.to_string()), "Root".to_string(), None)
            }))
        }

        fn find_variant_by_reference(&self, reference: &str) -> Result<Option<Product>> {
            self.find_product_by_reference(reference)
        }

        fn find_active_bom(&self, product_id: ProductId) -> Result<Option<Bom>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(Some(Bom::new(BomId::new(product_id.value() * 100), None)))
        }

        fn list_bom_lines(&self, _bom_id: BomId) -> Result<Vec<BomLine>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(vec![BomLine::new(Some(ProductId::new(2)), 3.0)])
        }

        fn product_names(&self, _product_id: ProductId) -> Result<Option<ProductNames>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    #[test]
    fn test_caching_catalog_returns_cached_value() {
        let catalog = CachingCatalog::new(MockCatalog::new());

        let first = catalog.list_bom_lines(BomId::new(100)).unwrap();
        let second = catalog.list_bom_lines(BomId::new(100)).unwrap();

        assert_eq!(first, second);
        assert_eq!(catalog.inner.get_call_count(), 1);
        assert_eq!(catalog.cache_size(), 1);
    }

    #[test]
    fn test_caching_catalog_caches_misses() {
        let catalog = CachingCatalog::new(MockCatalog::new());

        assert!(catalog.find_product_by_reference("NOPE").unwrap().is_none());
        assert!(catalog.find_product_by_reference("NOPE").unwrap().is_none());
        assert!(catalog.product_names(ProductId::new(9)).unwrap().is_none());
        assert!(catalog.product_names(ProductId::new(9)).unwrap().is_none());

        assert_eq!(catalog.inner.get_call_count(), 2);
    }

    #[test]
    fn test_caching_catalog_variant_lookups_cached_separately() {
        let catalog = CachingCatalog::new(MockCatalog::new());

        catalog.find_product_by_reference("ROOT-1").unwrap();
        let variant = catalog.find_variant_by_reference("ROOT-1").unwrap().unwrap();
        catalog.find_variant_by_reference("ROOT-1").unwrap();

        assert_eq!(variant.id(), ProductId::new(1));
        assert_eq!(catalog.inner.get_call_count(), 2);
        assert_eq!(catalog.cache_size(), 2);
    }

    #[test]
    fn test_caching_catalog_keys_are_separate() {
        let catalog = CachingCatalog::new(MockCatalog::new());

        let bom_1 = catalog.find_active_bom(ProductId::new(1)).unwrap().unwrap();
        let bom_2 = catalog.find_active_bom(ProductId::new(2)).unwrap().unwrap();
        catalog.find_active_bom(ProductId::new(1)).unwrap();

        assert_eq!(bom_1.id(), BomId::new(100));
        assert_eq!(bom_2.id(), BomId::new(200));
        assert_eq!(catalog.inner.get_call_count(), 2);
    }
}
