mod component_filter;
mod explosion_rules;
mod naming;
mod quantity_adjustment;

pub use component_filter::{ComponentFilter, DEFAULT_FILTER_KEYWORDS};
pub use explosion_rules::ExplosionRules;
pub use naming::NamingPolicy;
pub use quantity_adjustment::{QuantityAdjustment, QuantityBracket};
