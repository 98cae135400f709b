//! Strategies and the ordered pipeline that applies them.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{instrument, trace};

use super::error::{BoxError, Error, Result};
use super::traversal::Traversal;

/// A unit of rewrite or dispatch over a traversal.
///
/// `apply` runs once per traversal, before its first value is pulled. It may
/// rewrite the bytecode through [`Traversal::bytecode_mut`] and may populate
/// results through [`Traversal::set_traversers`]. Later strategies observe
/// what earlier ones did.
#[async_trait]
pub trait Strategy: Send + Sync {
    /// Name used in logs and errors, and by [`TraversalStrategies::remove_strategy`].
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn apply(&self, traversal: &mut Traversal) -> std::result::Result<(), BoxError>;
}

/// Ordered strategy pipeline.
///
/// Insertion order is application order. Cloning shares the strategy
/// instances, so a pipeline can serve as the template for many traversals.
#[derive(Clone, Default)]
pub struct TraversalStrategies {
    strategies: Vec<Arc<dyn Strategy>>,
}

impl TraversalStrategies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy to the end of the pipeline.
    pub fn add_strategy(&mut self, strategy: impl Strategy + 'static) -> &mut Self {
        self.strategies.push(Arc::new(strategy));
        self
    }

    /// Append a strategy instance shared with other pipelines.
    pub fn add_shared(&mut self, strategy: Arc<dyn Strategy>) -> &mut Self {
        self.strategies.push(strategy);
        self
    }

    /// Remove the first strategy with the given name.
    pub fn remove_strategy(&mut self, name: &str) -> Option<Arc<dyn Strategy>> {
        let index = self.strategies.iter().position(|s| s.name() == name)?;
        Some(self.strategies.remove(index))
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Strategy names in application order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.strategies.iter().map(|s| s.name())
    }

    /// Apply every strategy in order.
    ///
    /// Stops at the first failure; the remaining strategies do not run.
    /// Callers must not invoke this twice for the same traversal, which
    /// [`Traversal`] guarantees through its application state.
    #[instrument(name = "strategies::apply", level = "debug", skip_all, fields(count = self.strategies.len()))]
    pub async fn apply_strategies(&self, traversal: &mut Traversal) -> Result<()> {
        for strategy in &self.strategies {
            trace!(strategy = strategy.name(), "applying strategy");
            strategy
                .apply(traversal)
                .await
                .map_err(|source| Error::Strategy {
                    strategy: strategy.name().to_owned(),
                    source,
                })?;
        }
        Ok(())
    }
}

impl fmt::Debug for TraversalStrategies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
