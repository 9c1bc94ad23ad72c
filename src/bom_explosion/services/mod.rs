mod bom_walker;
mod name_resolver;

pub use bom_walker::{BomExplosion, BomWalker, ExplosionStats, MAX_EXPLOSION_DEPTH};
pub use name_resolver::{NameResolver, ResolvedComponent};
