use std::sync::Arc;

use obfmap_config::ResolverConfig;
use once_cell::sync::OnceCell;

use crate::error::{ResolveError, Result};
use crate::resolver::Resolver;
use crate::source::{MappingSnapshot, MappingSource};
use crate::RESOLVE_TARGET;

impl Resolver {
    /// Builds the resolver described by `config`, loading its mapping snapshot when the host is
    /// obfuscated.
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        if !config.obfuscated {
            return Ok(Resolver::identity());
        }
        let path = config
            .mappings
            .as_deref()
            .ok_or(ResolveError::MissingMappings)?;
        let snapshot = MappingSnapshot::load(path)?;
        Resolver::build(true, &snapshot)
    }
}

/// Holds the process's resolver once it has been built.
///
/// The first successful [`ResolverCell::get_or_create`] publishes a fully built resolver;
/// concurrent callers wait for it instead of building their own. A failed build is logged and
/// leaves the cell empty, so a later call may try again.
#[derive(Debug, Default)]
pub struct ResolverCell {
    cell: OnceCell<Arc<Resolver>>,
}

impl ResolverCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Option<Arc<Resolver>> {
        self.cell.get().cloned()
    }

    pub fn get_or_create(
        &self,
        obfuscated: bool,
        source: &dyn MappingSource,
    ) -> Option<Arc<Resolver>> {
        self.get_or_try_init(|| Resolver::build(obfuscated, source))
    }

    pub fn get_or_create_from_config(&self, config: &ResolverConfig) -> Option<Arc<Resolver>> {
        self.get_or_try_init(|| Resolver::from_config(config))
    }

    fn get_or_try_init(&self, build: impl FnOnce() -> Result<Resolver>) -> Option<Arc<Resolver>> {
        match self.cell.get_or_try_init(|| build().map(Arc::new)) {
            Ok(resolver) => Some(Arc::clone(resolver)),
            Err(err) => {
                tracing::error!(target: RESOLVE_TARGET, error = %err, "failed to create resolver");
                None
            }
        }
    }
}
