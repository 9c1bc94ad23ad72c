pub mod bom;
pub mod component_record;
pub mod product;

pub use bom::{Bom, BomId, BomLine};
pub use component_record::{ComponentRecord, ParentKey};
pub use product::{Product, ProductId, ProductNames, TemplateId};
