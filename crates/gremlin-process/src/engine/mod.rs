//! Traversal execution engine.
//!
//! A [`Traversal`] applies its [`TraversalStrategies`] once, on first
//! consumption, and then serves values from its [`Traverser`] queue with
//! bulk expansion.

mod error;
mod remote;
mod strategy;
mod stream;
mod traversal;
mod traverser;

#[cfg(test)]
mod traversal_tests;

pub use error::{BoxError, Error, Result};
pub use remote::{RemoteConnection, RemoteStrategy};
pub use strategy::{Strategy, TraversalStrategies};
pub use stream::TraversalStream;
pub use traversal::{BulkPolicy, Traversal};
pub use traverser::Traverser;
