use crate::bom_explosion::domain::ProductNames;

/// Suffix Odoo appends to duplicated records
const COPY_SUFFIX: &str = " (copy)";

/// NamingPolicy for choosing a component's canonical display name
///
/// Priority order:
/// 1. Template name, when the product belongs to a template whose name differs
///    from the variant's own name (variants carry suffixes, the template is clean)
/// 2. The product's own name
///
/// A single trailing " (copy)" is removed from the result.
pub struct NamingPolicy;

impl NamingPolicy {
    /// Selects the canonical display name for a product
    pub fn canonical_name(names: &ProductNames) -> String {
        let selected = match names.template_name() {
            Some(template) if template != names.name() => template,
            _ => names.name(),
        };
        Self::strip_copy_suffix(selected).to_string()
    }

    /// Removes one trailing " (copy)" if present
    pub fn strip_copy_suffix(name: &str) -> &str {
        name.strip_suffix(COPY_SUFFIX).unwrap_or(name)
    }
}
