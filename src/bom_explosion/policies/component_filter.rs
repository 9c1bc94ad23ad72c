use crate::shared::Result;

/// Packaging and labeling terms excluded from exported BOMs
pub const DEFAULT_FILTER_KEYWORDS: &[&str] = &[
    "zebra",
    "label",
    "plastic bag",
    "zip bag",
    "adhesive foam",
    "bubble wrap",
    "sleeve",
    "sticker",
    "certificate",
    "user manual",
    "equipment wire",
    "pallet",
    "cardboard",
    "packaging",
    "box",
];

/// Maximum number of filter keywords
const MAX_FILTER_KEYWORDS: usize = 256;

/// ComponentFilter - excludes components whose name contains a keyword
///
/// Matching is a case-insensitive substring test. Filtered components produce
/// no record and their own BOM is never traversed.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentFilter {
    keywords: Vec<String>,
}

impl ComponentFilter {
    /// Creates a filter from raw keywords
    ///
    /// # Errors
    /// - Too many keywords (> MAX_FILTER_KEYWORDS)
    /// - Empty or whitespace-only keyword (it would match every component)
    pub fn new(keywords: Vec<String>) -> Result<Self> {
        if keywords.len() > MAX_FILTER_KEYWORDS {
            anyhow::bail!(
                "Too many filter keywords: {} (maximum: {})",
                keywords.len(),
                MAX_FILTER_KEYWORDS
            );
        }

        let mut normalized = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            if keyword.trim().is_empty() {
                anyhow::bail!("Filter keyword cannot be empty: it would exclude every component");
            }
            let lowered = keyword.to_lowercase();
            if !normalized.contains(&lowered) {
                normalized.push(lowered);
            }
        }

        Ok(Self {
            keywords: normalized,
        })
    }

    /// Adds more keywords on top of the current list
    pub fn extended_with(self, extra: Vec<String>) -> Result<Self> {
        let mut all = self.keywords;
        all.extend(extra);
        Self::new(all)
    }

    /// Returns true when the component name contains any keyword
    pub fn is_excluded(&self, component_name: &str) -> bool {
        self.matching_keyword(component_name).is_some()
    }

    /// Returns the first keyword contained in the component name
    pub fn matching_keyword(&self, component_name: &str) -> Option<&str> {
        let lowered = component_name.to_lowercase();
        self.keywords
            .iter()
            .find(|k| lowered.contains(k.as_str()))
            .map(String::as_str)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for ComponentFilter {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_FILTER_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}
