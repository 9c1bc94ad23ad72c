/// BOM explosion bounded context
///
/// Pure business rules (filtering, quantity adjustment, naming) and the
/// traversal services that walk a bill of materials through the catalog port.
pub mod domain;
pub mod policies;
pub mod services;
