use std::fmt;

/// Catalog identity of a product variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog identity of a product template (the group of variants)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(i64);

impl TemplateId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Product value object as seen by the walker
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    internal_reference: Option<String>,
    name: String,
    template_id: Option<TemplateId>,
}

impl Product {
    pub fn new(
        id: ProductId,
        internal_reference: Option<String>,
        name: String,
        template_id: Option<TemplateId>,
    ) -> Self {
        // Empty references and missing ones are the same thing to the catalog
        let internal_reference = internal_reference.filter(|r| !r.is_empty());
        Self {
            id,
            internal_reference,
            name,
            template_id,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn internal_reference(&self) -> Option<&str> {
        self.internal_reference.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template_id(&self) -> Option<TemplateId> {
        self.template_id
    }
}

/// Naming data for one product: its own name, its reference and its template's name
#[derive(Debug, Clone, PartialEq)]
pub struct ProductNames {
    internal_reference: Option<String>,
    name: String,
    template_name: Option<String>,
}

impl ProductNames {
    pub fn new(
        internal_reference: Option<String>,
        name: String,
        template_name: Option<String>,
    ) -> Self {
        Self {
            internal_reference: internal_reference.filter(|r| !r.is_empty()),
            name,
            template_name,
        }
    }

    /// The internal reference, or an empty string when the product has none
    pub fn reference_or_empty(&self) -> &str {
        self.internal_reference.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template_name(&self) -> Option<&str> {
        self.template_name.as_deref()
    }
}
