//! Errors that can occur while building or consuming a traversal.

use gremlin_bytecode::BytecodeError;

/// Boxed error returned by strategies and remote connections.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A step argument could not be bound.
    #[error(transparent)]
    Bytecode(#[from] BytecodeError),

    /// A strategy failed; the remaining strategies were not applied.
    #[error("strategy `{strategy}` failed: {source}")]
    Strategy {
        strategy: String,
        #[source]
        source: BoxError,
    },

    /// A strategy consumed the traversal it is being applied to.
    #[error("traversal consumed while its strategies are being applied")]
    Reentrant,

    /// A strategy produced a traverser with a non-positive bulk.
    #[error("traverser has non-positive bulk {bulk}")]
    InvalidBulk { bulk: i64 },
}

/// Result type for traversal operations.
pub type Result<T> = std::result::Result<T, Error>;
