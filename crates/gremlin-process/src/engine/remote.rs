//! Dispatch to a remote execution engine.
//!
//! The transport itself lives outside this crate; it is reached through the
//! [`RemoteConnection`] trait.

use std::sync::Arc;

use async_trait::async_trait;
use gremlin_bytecode::Bytecode;
use tracing::debug;

use super::error::BoxError;
use super::strategy::Strategy;
use super::traversal::Traversal;
use super::traverser::Traverser;

/// A connection able to execute bytecode remotely.
#[async_trait]
pub trait RemoteConnection: Send + Sync {
    /// Execute `bytecode` and return the resulting traversers in order.
    async fn submit(&self, bytecode: &Bytecode) -> Result<Vec<Traverser>, BoxError>;
}

/// Submits the traversal bytecode to a connection and loads the results.
///
/// Does nothing when an earlier strategy already populated the traversers.
#[derive(Clone)]
pub struct RemoteStrategy {
    connection: Arc<dyn RemoteConnection>,
}

impl RemoteStrategy {
    pub fn new(connection: impl RemoteConnection + 'static) -> Self {
        Self::shared(Arc::new(connection))
    }

    pub fn shared(connection: Arc<dyn RemoteConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl Strategy for RemoteStrategy {
    fn name(&self) -> &str {
        "RemoteStrategy"
    }

    async fn apply(&self, traversal: &mut Traversal) -> Result<(), BoxError> {
        if traversal.traversers().is_some() {
            return Ok(());
        }
        let traversers = self.connection.submit(traversal.bytecode()).await?;
        debug!(traversers = traversers.len(), "remote traversal returned");
        traversal.set_traversers(traversers);
        Ok(())
    }
}
