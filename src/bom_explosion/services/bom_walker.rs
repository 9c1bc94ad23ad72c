use crate::bom_explosion::domain::{BomId, BomLine, ComponentRecord, ParentKey};
use crate::bom_explosion::policies::ExplosionRules;
use crate::bom_explosion::services::name_resolver::{NameResolver, ResolvedComponent};
use crate::ports::outbound::{CatalogRepository, ProgressReporter};
use crate::shared::error::BomError;
use crate::shared::Result;
use std::collections::HashSet;

/// Maximum BOM nesting depth before a branch is truncated
pub const MAX_EXPLOSION_DEPTH: u32 = 256;

/// Counters collected while exploding one BOM
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplosionStats {
    pub boms_expanded: usize,
    pub filtered_components: usize,
    pub adjusted_quantities: usize,
    pub collapsed_chains: usize,
    pub skipped_lines: usize,
    pub circular_references: usize,
}

/// Result of one fetch: the records in emission order plus counters
#[derive(Debug, Clone)]
pub struct BomExplosion {
    pub root_name: String,
    pub records: Vec<ComponentRecord>,
    pub stats: ExplosionStats,
}

/// Per-fetch traversal state
///
/// `processed` holds every BOM expanded so far in this fetch; a BOM met again
/// is reported as a circular reference and not expanded twice. The context is
/// created by `fetch_bom_recursive` and dropped when the fetch returns.
struct TraversalContext {
    processed: HashSet<BomId>,
    names: NameResolver,
    records: Vec<ComponentRecord>,
    stats: ExplosionStats,
}

impl TraversalContext {
    fn new() -> Self {
        Self {
            processed: HashSet::new(),
            names: NameResolver::new(),
            records: Vec::new(),
            stats: ExplosionStats::default(),
        }
    }
}

/// A BOM line's child with its multiplied, pre-adjustment quantity
struct LineComponent {
    resolved: ResolvedComponent,
    quantity: f64,
}

enum LineOutcome {
    NoProduct,
    MissingRecord(i64),
    Component(LineComponent),
}

/// The component a single-child chain reduces to
struct CollapsedComponent {
    resolved: ResolvedComponent,
    quantity: f64,
    level: u32,
    /// Set when the chain bottoms out on a component whose BOM branches
    child_bom: Option<BomId>,
}

enum CollapseOutcome {
    Collapsed(CollapsedComponent),
    NotCollapsible,
    /// The lookahead reached a BOM already in its own chain
    Cyclic,
}

/// BomWalker service - explodes a product's BOM into leveled component records
///
/// The walker is stateless between calls: every `fetch_bom_recursive` builds its
/// own traversal context, so one walker may serve many fetches.
pub struct BomWalker<'a, C: ?Sized, R: ?Sized> {
    catalog: &'a C,
    reporter: &'a R,
    rules: &'a ExplosionRules,
}

impl<'a, C, R> BomWalker<'a, C, R>
where
    C: CatalogRepository + ?Sized,
    R: ProgressReporter + ?Sized,
{
    pub fn new(catalog: &'a C, reporter: &'a R, rules: &'a ExplosionRules) -> Self {
        Self {
            catalog,
            reporter,
            rules,
        }
    }

    /// Fetches the BOM tree rooted at `reference`, flattened in pre-order
    ///
    /// # Errors
    /// - [`BomError::ProductNotFound`] when no product carries the reference
    /// - [`BomError::BomNotFound`] when the product has no active BOM
    /// - Any catalog transport error
    ///
    /// Cycles and dangling product ids do not fail the fetch; they are reported
    /// as warnings and the affected branch or line is skipped.
    pub fn fetch_bom_recursive(&self, reference: &str) -> Result<BomExplosion> {
        self.reporter.report(&format!(
            "🔍 Searching for product with reference: {}",
            reference
        ));

        let product = self
            .catalog
            .find_product_by_reference(reference)?
            .ok_or_else(|| BomError::ProductNotFound {
                reference: reference.to_string(),
            })?;

        self.reporter.report(&format!(
            "✅ Found product: {} (ID: {})",
            product.name(),
            product.id()
        ));

        let bom = self
            .catalog
            .find_active_bom(product.id())?
            .ok_or_else(|| BomError::BomNotFound {
                reference: reference.to_string(),
            })?;

        self.reporter
            .report(&format!("✅ Found BOM (ID: {})", bom.id()));
        self.reporter.report("🌳 Fetching BOM structure recursively...");

        let mut ctx = TraversalContext::new();
        ctx.names.seed(reference, product.name());
        ctx.records.push(ComponentRecord::root(
            reference.to_string(),
            product.name().to_string(),
        ));

        let root_key = ParentKey::Reference(reference.to_string());
        self.expand(&mut ctx, bom.id(), &root_key, 1.0, 1)?;

        Ok(BomExplosion {
            root_name: product.name().to_string(),
            records: ctx.records,
            stats: ctx.stats,
        })
    }

    fn expand(
        &self,
        ctx: &mut TraversalContext,
        bom_id: BomId,
        parent: &ParentKey,
        multiplier: f64,
        level: u32,
    ) -> Result<()> {
        if ctx.processed.contains(&bom_id) {
            ctx.stats.circular_references += 1;
            self.reporter.report_warning(&format!(
                "⚠️  Warning: {}",
                BomError::CircularReference {
                    bom_id: bom_id.value()
                }
            ));
            return Ok(());
        }

        if level > MAX_EXPLOSION_DEPTH {
            self.reporter.report_warning(&format!(
                "⚠️  Warning: Maximum BOM depth ({}) reached below '{}'. Branch truncated.",
                MAX_EXPLOSION_DEPTH, parent
            ));
            return Ok(());
        }

        ctx.processed.insert(bom_id);
        self.expand_lines(ctx, bom_id, parent, multiplier, level)
    }

    fn expand_lines(
        &self,
        ctx: &mut TraversalContext,
        bom_id: BomId,
        parent: &ParentKey,
        multiplier: f64,
        level: u32,
    ) -> Result<()> {
        let lines = self.catalog.list_bom_lines(bom_id)?;
        ctx.stats.boms_expanded += 1;
        self.reporter
            .report_progress(ctx.stats.boms_expanded, Some(parent.as_str()));
        self.reporter.report_detail(&format!(
            "  -> Found {} components in BOM {}",
            lines.len(),
            bom_id
        ));

        for line in &lines {
            let component = match self.describe_line(line, multiplier)? {
                LineOutcome::NoProduct => continue,
                LineOutcome::MissingRecord(product_id) => {
                    ctx.stats.skipped_lines += 1;
                    self.reporter.report_warning(&format!(
                        "⚠️  Warning: {}",
                        BomError::LookupInconsistency {
                            product_id,
                            bom_id: bom_id.value()
                        }
                    ));
                    continue;
                }
                LineOutcome::Component(component) => component,
            };

            self.reporter.report_detail(&format!(
                "    * {}: {} (Qty: {})",
                component.resolved.reference, component.resolved.name, component.quantity
            ));

            if let Some(keyword) = self.rules.filter().matching_keyword(&component.resolved.name) {
                ctx.stats.filtered_components += 1;
                self.reporter.report_detail(&format!(
                    "        [Filtered out: matches '{}']",
                    keyword
                ));
                continue;
            }

            self.emit_component(ctx, bom_id, parent, component, level)?;
        }

        Ok(())
    }

    /// Emits one surviving component, collapsing or descending into its BOM
    fn emit_component(
        &self,
        ctx: &mut TraversalContext,
        bom_id: BomId,
        parent: &ParentKey,
        component: LineComponent,
        level: u32,
    ) -> Result<()> {
        let Some(child_bom) = self.catalog.find_active_bom(component.resolved.product_id)? else {
            return self.push_record(ctx, level, &component.resolved, component.quantity, parent, false);
        };

        if self.rules.collapse_single_child() {
            let mut chain = HashSet::from([bom_id]);
            let outcome = self.collapse(&mut chain, child_bom.id(), component.quantity, level)?;

            if let CollapseOutcome::Collapsed(collapsed) = outcome {
                ctx.stats.collapsed_chains += 1;
                self.reporter.report_detail(&format!(
                    "      -> Collapsed single-child chain of {} into {}",
                    ParentKey::for_component(&component.resolved.reference, &component.resolved.name),
                    ParentKey::for_component(&collapsed.resolved.reference, &collapsed.resolved.name)
                ));
                self.push_record(
                    ctx,
                    collapsed.level,
                    &collapsed.resolved,
                    collapsed.quantity,
                    parent,
                    collapsed.child_bom.is_some(),
                )?;

                if let Some(branching_bom) = collapsed.child_bom {
                    let key = ParentKey::for_component(
                        &collapsed.resolved.reference,
                        &collapsed.resolved.name,
                    );
                    self.expand(ctx, branching_bom, &key, collapsed.quantity, collapsed.level + 1)?;
                }
                return Ok(());
            }
        }

        self.push_record(ctx, level, &component.resolved, component.quantity, parent, true)?;
        self.reporter.report_detail(&format!(
            "      -> Found child BOM for {}, fetching recursively...",
            component.resolved.reference
        ));
        let key = ParentKey::for_component(&component.resolved.reference, &component.resolved.name);
        self.expand(ctx, child_bom.id(), &key, component.quantity, level + 1)
    }

    /// Looks ahead into `bom_id` to see whether it reduces to one component
    ///
    /// The lookahead never touches the processed set; `chain` starts with the
    /// BOM being expanded and guards against single-child cycles.
    fn collapse(
        &self,
        chain: &mut HashSet<BomId>,
        bom_id: BomId,
        multiplier: f64,
        level: u32,
    ) -> Result<CollapseOutcome> {
        if !chain.insert(bom_id) || level > MAX_EXPLOSION_DEPTH {
            return Ok(CollapseOutcome::Cyclic);
        }

        let mut survivor = None;
        for line in &self.catalog.list_bom_lines(bom_id)? {
            let LineOutcome::Component(component) = self.describe_line(line, multiplier)? else {
                continue;
            };
            if self.rules.filter().is_excluded(&component.resolved.name) {
                continue;
            }
            if survivor.is_some() {
                return Ok(CollapseOutcome::NotCollapsible);
            }
            survivor = Some(component);
        }

        let Some(survivor) = survivor else {
            return Ok(CollapseOutcome::NotCollapsible);
        };

        let Some(child_bom) = self.catalog.find_active_bom(survivor.resolved.product_id)? else {
            return Ok(CollapseOutcome::Collapsed(CollapsedComponent {
                resolved: survivor.resolved,
                quantity: survivor.quantity,
                level,
                child_bom: None,
            }));
        };

        match self.collapse(chain, child_bom.id(), survivor.quantity, level + 1)? {
            CollapseOutcome::Collapsed(deeper) => Ok(CollapseOutcome::Collapsed(deeper)),
            CollapseOutcome::NotCollapsible => Ok(CollapseOutcome::Collapsed(CollapsedComponent {
                resolved: survivor.resolved,
                quantity: survivor.quantity,
                level,
                child_bom: Some(child_bom.id()),
            })),
            CollapseOutcome::Cyclic => Ok(CollapseOutcome::Cyclic),
        }
    }

    fn describe_line(&self, line: &BomLine, multiplier: f64) -> Result<LineOutcome> {
        let Some(product_id) = line.product_id() else {
            return Ok(LineOutcome::NoProduct);
        };

        let quantity = line.quantity_per_unit() * multiplier;
        Ok(match NameResolver::resolve_component(self.catalog, product_id)? {
            Some(resolved) => LineOutcome::Component(LineComponent { resolved, quantity }),
            None => LineOutcome::MissingRecord(product_id.value()),
        })
    }

    fn push_record(
        &self,
        ctx: &mut TraversalContext,
        level: u32,
        component: &ResolvedComponent,
        quantity: f64,
        parent: &ParentKey,
        has_child_bom: bool,
    ) -> Result<()> {
        let parent_name = ctx.names.resolve_parent_name(self.catalog, parent)?;

        let adjusted = self.rules.quantity_adjustment().adjust(quantity);
        if adjusted != quantity {
            ctx.stats.adjusted_quantities += 1;
            self.reporter.report_detail(&format!(
                "        [Quantity adjusted from {:.2} to {:.2}]",
                quantity, adjusted
            ));
        }

        ctx.records.push(ComponentRecord::new(
            level,
            component.reference.clone(),
            component.name.clone(),
            adjusted,
            parent.as_str().to_string(),
            parent_name,
            has_child_bom,
        ));
        Ok(())
    }
}
