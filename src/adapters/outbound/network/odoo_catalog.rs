use super::odoo_rpc_client::{falsy, OdooRpcClient, SearchRead};
use crate::bom_explosion::domain::{
    Bom, BomId, BomLine, Product, ProductId, ProductNames, TemplateId,
};
use crate::ports::outbound::CatalogRepository;
use crate::shared::Result;
use serde::Deserialize;
use serde_json::json;

/// `[id, display_name]` pair Odoo uses for many2one fields
type Many2one = (i64, String);

const PRODUCT_FIELDS: &[&str] = &["id", "name", "default_code", "product_tmpl_id"];
const TEMPLATE_FIELDS: &[&str] = &["id", "name", "default_code", "product_variant_ids"];
const BOM_FIELDS: &[&str] = &["id", "code", "product_id", "product_tmpl_id"];
const BOM_LINE_FIELDS: &[&str] = &["product_id", "product_qty", "product_uom_id"];

#[derive(Debug, Deserialize)]
struct ProductRow {
    id: i64,
    name: String,
    #[serde(default, deserialize_with = "falsy")]
    default_code: Option<String>,
    #[serde(default, deserialize_with = "falsy")]
    product_tmpl_id: Option<Many2one>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product::new(
            ProductId::new(self.id),
            self.default_code,
            self.name,
            self.product_tmpl_id.map(|(id, _)| TemplateId::new(id)),
        )
    }
}

#[derive(Debug, Deserialize)]
struct TemplateRow {
    name: String,
    #[serde(default)]
    product_variant_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct BomRow {
    id: i64,
    #[serde(default, deserialize_with = "falsy")]
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BomLineRow {
    #[serde(default, deserialize_with = "falsy")]
    product_id: Option<Many2one>,
    #[serde(default)]
    product_qty: f64,
}

/// OdooCatalog adapter - product and BOM lookups against Odoo
///
/// Implements the CatalogRepository port over `product.product`,
/// `product.template`, `mrp.bom` and `mrp.bom.line`, including the template
/// fallbacks for references and BOMs defined on the template.
pub struct OdooCatalog<S = OdooRpcClient> {
    rpc: S,
}

impl<S: SearchRead> OdooCatalog<S> {
    pub fn new(rpc: S) -> Self {
        Self { rpc }
    }

    fn product_by_id(&self, product_id: i64) -> Result<Option<ProductRow>> {
        let rows: Vec<ProductRow> = self.rpc.search_read(
            "product.product",
            json!([["id", "=", product_id]]),
            PRODUCT_FIELDS,
        )?;
        Ok(rows.into_iter().next())
    }

    fn template_name(&self, template_id: i64) -> Result<Option<String>> {
        let rows: Vec<TemplateRow> = self.rpc.search_read(
            "product.template",
            json!([["id", "=", template_id]]),
            &["name"],
        )?;
        Ok(rows.into_iter().next().map(|row| row.name))
    }

    /// Active BOM defined on the template, for this variant or all variants
    fn template_bom(&self, product_id: i64) -> Result<Option<BomRow>> {
        let Some((template_id, _)) = self
            .product_by_id(product_id)?
            .and_then(|product| product.product_tmpl_id)
        else {
            return Ok(None);
        };

        let rows: Vec<BomRow> = self.rpc.search_read(
            "mrp.bom",
            json!([
                ["product_tmpl_id", "=", template_id],
                ["active", "=", true],
                "|",
                ["product_id", "=", false],
                ["product_id", "=", product_id]
            ]),
            BOM_FIELDS,
        )?;
        Ok(rows.into_iter().next())
    }
}

impl<S: SearchRead> CatalogRepository for OdooCatalog<S> {
    fn find_product_by_reference(&self, reference: &str) -> Result<Option<Product>> {
        if let Some(product) = self.find_variant_by_reference(reference)? {
            return Ok(Some(product));
        }

        // The reference may only be set on the template
        let templates: Vec<TemplateRow> = self.rpc.search_read(
            "product.template",
            json!([["default_code", "=", reference]]),
            TEMPLATE_FIELDS,
        )?;
        let Some(variant_id) = templates
            .into_iter()
            .next()
            .and_then(|template| template.product_variant_ids.first().copied())
        else {
            return Ok(None);
        };

        Ok(self.product_by_id(variant_id)?.map(ProductRow::into_product))
    }

    fn find_variant_by_reference(&self, reference: &str) -> Result<Option<Product>> {
        let rows: Vec<ProductRow> = self.rpc.search_read(
            "product.product",
            json!([["default_code", "=", reference]]),
            PRODUCT_FIELDS,
        )?;
        Ok(rows.into_iter().next().map(ProductRow::into_product))
    }

    fn find_active_bom(&self, product_id: ProductId) -> Result<Option<Bom>> {
        let rows: Vec<BomRow> = self.rpc.search_read(
            "mrp.bom",
            json!([["product_id", "=", product_id.value()], ["active", "=", true]]),
            BOM_FIELDS,
        )?;

        let row = match rows.into_iter().next() {
            Some(row) => Some(row),
            None => self.template_bom(product_id.value())?,
        };

        Ok(row.map(|row| Bom::new(BomId::new(row.id), row.code)))
    }

    fn list_bom_lines(&self, bom_id: BomId) -> Result<Vec<BomLine>> {
        let rows: Vec<BomLineRow> = self.rpc.search_read(
            "mrp.bom.line",
            json!([["bom_id", "=", bom_id.value()]]),
            BOM_LINE_FIELDS,
        )?;

        Ok(rows
            .into_iter()
            .map(|row| {
                BomLine::new(
                    row.product_id.map(|(id, _)| ProductId::new(id)),
                    row.product_qty,
                )
            })
            .collect())
    }

    fn product_names(&self, product_id: ProductId) -> Result<Option<ProductNames>> {
        let Some(product) = self.product_by_id(product_id.value())? else {
            return Ok(None);
        };

        let template_name = match product.product_tmpl_id {
            Some((template_id, _)) => self.template_name(template_id)?,
            None => None,
        };

        Ok(Some(ProductNames::new(
            product.default_code,
            product.name,
            template_name,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Answers `search_read` from canned rows keyed by model and domain;
    /// anything not registered returns no rows
    #[derive(Default)]
    struct CannedRpc {
        rows: HashMap<(String, String), Value>,
        calls: RefCell<Vec<(String, Value)>>,
    }

    impl CannedRpc {
        fn rows(mut self, model: &str, domain: Value, rows: Value) -> Self {
            self.rows.insert((model.to_string(), domain.to_string()), rows);
            self
        }

        fn models_called(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|(model, _)| model.clone()).collect()
        }
    }

    impl SearchRead for CannedRpc {
        fn search_read_rows(&self, model: &str, domain: Value, _fields: &[&str]) -> Result<Value> {
            let key = (model.to_string(), domain.to_string());
            self.calls.borrow_mut().push((model.to_string(), domain));
            Ok(self.rows.get(&key).cloned().unwrap_or_else(|| json!([])))
        }
    }

    fn frame_variant(id: i64) -> Value {
        json!([{
            "id": id,
            "name": "Frame (Black)",
            "default_code": "FR-1",
            "product_tmpl_id": [7, "Frame"]
        }])
    }

    #[test]
    fn test_find_product_variant_hit() {
        let rpc = CannedRpc::default().rows(
            "product.product",
            json!([["default_code", "=", "FR-1"]]),
            frame_variant(11),
        );

        let product = OdooCatalog::new(&rpc)
            .find_product_by_reference("FR-1")
            .unwrap()
            .unwrap();

        assert_eq!(product.id(), ProductId::new(11));
        assert_eq!(product.template_id(), Some(TemplateId::new(7)));
        assert_eq!(rpc.models_called(), vec!["product.product"]);
    }

    #[test]
    fn test_find_product_falls_back_to_first_template_variant() {
        let rpc = CannedRpc::default()
            .rows(
                "product.template",
                json!([["default_code", "=", "FR-1"]]),
                json!([{ "id": 7, "name": "Frame", "default_code": "FR-1", "product_variant_ids": [11, 12] }]),
            )
            .rows("product.product", json!([["id", "=", 11]]), frame_variant(11));

        let product = OdooCatalog::new(&rpc)
            .find_product_by_reference("FR-1")
            .unwrap()
            .unwrap();

        assert_eq!(product.id(), ProductId::new(11));
        assert_eq!(
            rpc.models_called(),
            vec!["product.product", "product.template", "product.product"]
        );
    }

    #[test]
    fn test_find_product_template_without_variants() {
        let rpc = CannedRpc::default().rows(
            "product.template",
            json!([["default_code", "=", "FR-1"]]),
            json!([{ "id": 7, "name": "Frame", "default_code": "FR-1", "product_variant_ids": [] }]),
        );

        let product = OdooCatalog::new(&rpc).find_product_by_reference("FR-1").unwrap();

        assert!(product.is_none());
    }

    #[test]
    fn test_find_variant_skips_template_fallback() {
        let rpc = CannedRpc::default().rows(
            "product.template",
            json!([["default_code", "=", "FR-1"]]),
            json!([{ "id": 7, "name": "Frame", "product_variant_ids": [11] }]),
        );

        let product = OdooCatalog::new(&rpc).find_variant_by_reference("FR-1").unwrap();

        assert!(product.is_none());
        assert_eq!(rpc.models_called(), vec!["product.product"]);
    }

    #[test]
    fn test_variant_bom_takes_priority() {
        let rpc = CannedRpc::default().rows(
            "mrp.bom",
            json!([["product_id", "=", 11], ["active", "=", true]]),
            json!([{ "id": 100, "code": false, "product_id": [11, "Frame"], "product_tmpl_id": [7, "Frame"] }]),
        );

        let bom = OdooCatalog::new(&rpc)
            .find_active_bom(ProductId::new(11))
            .unwrap()
            .unwrap();

        assert_eq!(bom.id(), BomId::new(100));
        assert_eq!(rpc.models_called(), vec!["mrp.bom"]);
    }

    #[test]
    fn test_template_bom_fallback_domain() {
        let template_domain = json!([
            ["product_tmpl_id", "=", 7],
            ["active", "=", true],
            "|",
            ["product_id", "=", false],
            ["product_id", "=", 11]
        ]);
        let rpc = CannedRpc::default()
            .rows("product.product", json!([["id", "=", 11]]), frame_variant(11))
            .rows(
                "mrp.bom",
                template_domain.clone(),
                json!([{ "id": 300, "code": "FR-T", "product_id": false, "product_tmpl_id": [7, "Frame"] }]),
            );

        let bom = OdooCatalog::new(&rpc)
            .find_active_bom(ProductId::new(11))
            .unwrap()
            .unwrap();

        assert_eq!(bom.id(), BomId::new(300));
        let calls = rpc.calls.borrow();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2], ("mrp.bom".to_string(), template_domain));
    }

    #[test]
    fn test_product_without_template_has_no_template_bom() {
        let rpc = CannedRpc::default().rows(
            "product.product",
            json!([["id", "=", 11]]),
            json!([{ "id": 11, "name": "Loose Part", "default_code": false, "product_tmpl_id": false }]),
        );

        let bom = OdooCatalog::new(&rpc).find_active_bom(ProductId::new(11)).unwrap();

        assert!(bom.is_none());
        assert_eq!(rpc.models_called(), vec!["mrp.bom", "product.product"]);
    }

    #[test]
    fn test_product_row_decoding() {
        let row: ProductRow = serde_json::from_value(json!({
            "id": 42,
            "name": "Motor (copy)",
            "default_code": false,
            "product_tmpl_id": [7, "Motor"]
        }))
        .unwrap();

        let product = row.into_product();
        assert_eq!(product.id(), ProductId::new(42));
        assert_eq!(product.internal_reference(), None);
        assert_eq!(product.template_id(), Some(TemplateId::new(7)));
    }

    #[test]
    fn test_bom_line_row_without_product() {
        let row: BomLineRow = serde_json::from_value(json!({
            "id": 3,
            "product_id": false,
            "product_qty": 2.5,
            "product_uom_id": [1, "Units"]
        }))
        .unwrap();

        assert!(row.product_id.is_none());
        assert_eq!(row.product_qty, 2.5);
    }

    #[test]
    fn test_template_row_variants() {
        let row: TemplateRow = serde_json::from_value(json!({
            "id": 5,
            "name": "Frame",
            "default_code": "FR-1",
            "product_variant_ids": [11, 12]
        }))
        .unwrap();

        assert_eq!(row.product_variant_ids.first(), Some(&11));
    }

    #[test]
    fn test_bom_row_code() {
        let row: BomRow = serde_json::from_value(json!({
            "id": 100,
            "code": false,
            "product_id": [1, "Root"],
            "product_tmpl_id": [2, "Root"]
        }))
        .unwrap();

        assert_eq!(row.id, 100);
        assert!(row.code.is_none());
    }
}
