use crate::bom_explosion::domain::{ParentKey, ProductId};
use crate::bom_explosion::policies::NamingPolicy;
use crate::ports::outbound::CatalogRepository;
use crate::shared::Result;
use std::collections::HashMap;

/// A BOM line's child product, named and referenced for output
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedComponent {
    pub product_id: ProductId,
    /// Internal reference, empty when the product has none
    pub reference: String,
    /// Canonical display name (see [`NamingPolicy`])
    pub name: String,
}

/// NameResolver - resolves component names and caches parent display names
///
/// One resolver belongs to one fetch. The parent name cache is keyed by the
/// parent identity string and is never shared between fetches.
#[derive(Debug, Default)]
pub struct NameResolver {
    parent_names: HashMap<String, String>,
}

impl NameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a product id to its reference and canonical name
    ///
    /// Returns `Ok(None)` when the catalog has no record for the id.
    pub fn resolve_component<C: CatalogRepository + ?Sized>(
        catalog: &C,
        product_id: ProductId,
    ) -> Result<Option<ResolvedComponent>> {
        let Some(names) = catalog.product_names(product_id)? else {
            return Ok(None);
        };

        Ok(Some(ResolvedComponent {
            product_id,
            reference: names.reference_or_empty().to_string(),
            name: NamingPolicy::canonical_name(&names),
        }))
    }

    /// Pre-populates the cache, used for the root product
    pub fn seed(&mut self, parent: &str, name: &str) {
        self.parent_names
            .insert(parent.to_string(), name.to_string());
    }

    /// Resolves the display name of a parent, caching the answer
    ///
    /// On a miss the parent identity is looked up as a variant's internal
    /// reference. When no variant carries it, the identity string itself is
    /// the name; this covers parents keyed by name because they have no
    /// reference.
    pub fn resolve_parent_name<C: CatalogRepository + ?Sized>(
        &mut self,
        catalog: &C,
        parent: &ParentKey,
    ) -> Result<String> {
        if let Some(cached) = self.parent_names.get(parent.as_str()) {
            return Ok(cached.clone());
        }

        let name = match catalog.find_variant_by_reference(parent.as_str())? {
            Some(product) => match catalog.product_names(product.id())? {
                Some(names) => NamingPolicy::canonical_name(&names),
                None => NamingPolicy::strip_copy_suffix(product.name()).to_string(),
            },
            None => parent.as_str().to_string(),
        };

        self.parent_names
            .insert(parent.as_str().to_string(), name.clone());
        Ok(name)
    }

    /// Number of cached parent names
    pub fn cached_len(&self) -> usize {
        self.parent_names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom_explosion::domain::{Bom, BomId, BomLine, Product, ProductNames, TemplateId};
    use std::cell::Cell;

    /// Catalog holding a single variant "MID-1" (id 2) with a template name.
    /// "TMPL-1" is only reachable through the template fallback.
    struct SingleProductCatalog {
        reference_lookups: Cell<usize>,
    }

    impl SingleProductCatalog {
        fn new() -> Self {
            Self {
                reference_lookups: Cell::new(0),
            }
        }
    }

    impl CatalogRepository for SingleProductCatalog {
        fn find_product_by_reference(&self, reference: &str) -> Result<Option<Product>> {
            if reference == "TMPL-1" {
                return Ok(Some(Product::new(
                    ProductId::new(3),
                    None,
                    "Template Only Kit".to_string(),
                    Some(TemplateId::new(30)),
                )));
            }
            self.find_variant_by_reference(reference)
        }

        fn find_variant_by_reference(&self, reference: &str) -> Result<Option<Product>> {
            self.reference_lookups.set(self.reference_lookups.get() + 1);
            Ok((reference == "MID-1").then(|| {
                Product::new(
                    ProductId::new(2),
                    Some("MID-1".to_string()),
                    "Middle Kit (Red)".to_string(),
                    Some(TemplateId::new(20)),
                )
            }))
        }

        fn find_active_bom(&self, _product_id: ProductId) -> Result<Option<Bom>> {
            Ok(None)
        }

        fn list_bom_lines(&self, _bom_id: BomId) -> Result<Vec<BomLine>> {
            Ok(vec![])
        }

        fn product_names(&self, product_id: ProductId) -> Result<Option<ProductNames>> {
            Ok((product_id.value() == 2).then(|| {
                ProductNames::new(
                    Some("MID-1".to_string()),
                    "Middle Kit (Red)".to_string(),
                    Some("Middle Kit (copy)".to_string()),
                )
            }))
        }
    }

    #[test]
    fn test_resolve_component_uses_canonical_name() {
        let catalog = SingleProductCatalog::new();
        let component = NameResolver::resolve_component(&catalog, ProductId::new(2))
            .unwrap()
            .unwrap();
        assert_eq!(component.reference, "MID-1");
        assert_eq!(component.name, "Middle Kit");
    }

    #[test]
    fn test_resolve_component_missing_record() {
        let catalog = SingleProductCatalog::new();
        let component = NameResolver::resolve_component(&catalog, ProductId::new(99)).unwrap();
        assert!(component.is_none());
    }

    #[test]
    fn test_parent_name_resolved_from_catalog() {
        let catalog = SingleProductCatalog::new();
        let mut resolver = NameResolver::new();
        let name = resolver
            .resolve_parent_name(&catalog, &ParentKey::Reference("MID-1".to_string()))
            .unwrap();
        assert_eq!(name, "Middle Kit");
    }

    #[test]
    fn test_parent_name_falls_back_to_identity() {
        let catalog = SingleProductCatalog::new();
        let mut resolver = NameResolver::new();
        let name = resolver
            .resolve_parent_name(&catalog, &ParentKey::Name("Loose Subassembly".to_string()))
            .unwrap();
        assert_eq!(name, "Loose Subassembly");
    }

    #[test]
    fn test_parent_name_ignores_template_references() {
        let catalog = SingleProductCatalog::new();
        let mut resolver = NameResolver::new();
        let name = resolver
            .resolve_parent_name(&catalog, &ParentKey::Reference("TMPL-1".to_string()))
            .unwrap();
        assert_eq!(name, "TMPL-1");
        assert_eq!(catalog.reference_lookups.get(), 1);
    }

    #[test]
    fn test_parent_name_cached() {
        let catalog = SingleProductCatalog::new();
        let mut resolver = NameResolver::new();
        let key = ParentKey::Reference("MID-1".to_string());
        resolver.resolve_parent_name(&catalog, &key).unwrap();
        resolver.resolve_parent_name(&catalog, &key).unwrap();
        assert_eq!(catalog.reference_lookups.get(), 1);
        assert_eq!(resolver.cached_len(), 1);
    }

    #[test]
    fn test_seeded_name_skips_lookup() {
        let catalog = SingleProductCatalog::new();
        let mut resolver = NameResolver::new();
        resolver.seed("ROOT-1", "Root Assembly");
        let name = resolver
            .resolve_parent_name(&catalog, &ParentKey::Reference("ROOT-1".to_string()))
            .unwrap();
        assert_eq!(name, "Root Assembly");
        assert_eq!(catalog.reference_lookups.get(), 0);
    }
}
