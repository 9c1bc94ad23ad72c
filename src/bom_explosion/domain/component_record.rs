use std::fmt;

/// Identity under which a component's children are reported as "parent"
///
/// Components with an internal reference are keyed by it; components without
/// one fall back to their display name. Both serialize as the bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParentKey {
    Reference(String),
    Name(String),
}

impl ParentKey {
    /// Picks the reference when present, the name otherwise
    pub fn for_component(reference: &str, name: &str) -> Self {
        if reference.is_empty() {
            ParentKey::Name(name.to_string())
        } else {
            ParentKey::Reference(reference.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ParentKey::Reference(s) | ParentKey::Name(s) => s,
        }
    }
}

impl fmt::Display for ParentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the exploded BOM
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRecord {
    level: u32,
    component_reference: String,
    component_name: String,
    quantity: f64,
    parent_reference: String,
    parent_name: String,
    has_child_bom: bool,
}

impl ComponentRecord {
    pub fn new(
        level: u32,
        component_reference: String,
        component_name: String,
        quantity: f64,
        parent_reference: String,
        parent_name: String,
        has_child_bom: bool,
    ) -> Self {
        Self {
            level,
            component_reference,
            component_name,
            quantity,
            parent_reference,
            parent_name,
            has_child_bom,
        }
    }

    /// The level-0 record for the requested product
    pub fn root(reference: String, name: String) -> Self {
        Self::new(0, reference, name, 1.0, String::new(), String::new(), true)
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn component_reference(&self) -> &str {
        &self.component_reference
    }

    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    /// Post-adjustment quantity
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Quantity as a fixed-point decimal with two fraction digits
    pub fn formatted_quantity(&self) -> String {
        format!("{:.2}", self.quantity)
    }

    pub fn parent_reference(&self) -> &str {
        &self.parent_reference
    }

    pub fn parent_name(&self) -> &str {
        &self.parent_name
    }

    pub fn has_child_bom(&self) -> bool {
        self.has_child_bom
    }
}
