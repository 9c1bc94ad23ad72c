/// Network adapters for the Odoo JSON-RPC API
mod caching_catalog;
mod odoo_catalog;
mod odoo_rpc_client;

pub use caching_catalog::CachingCatalog;
pub use odoo_catalog::OdooCatalog;
pub use odoo_rpc_client::{OdooConnection, OdooRpcClient, SearchRead};
