//! Traversal sources.
//!
//! [`traversal`] returns an [`AnonymousTraversalSource`], which fixes the
//! default strategy pipeline and yields a [`GraphTraversalSource`] (`g`).
//! Source configuration is recorded as source instructions on a copy of
//! the source, so `g` itself is never modified.

use gremlin_bytecode::{Arguments, Bytecode, Value, Values};

use crate::engine::{
    BulkPolicy, RemoteConnection, RemoteStrategy, Result, Strategy, Traversal,
    TraversalStrategies,
};

/// Handle for a graph a source is attached to.
///
/// Graph data lives with whatever executes the bytecode; the handle only
/// marks traversals built from it as bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Graph;

impl Graph {
    /// Shorthand for `traversal().with_graph(graph)`.
    pub fn traversal(&self) -> GraphTraversalSource {
        traversal().with_graph(*self)
    }
}

/// Entry point for building a [`GraphTraversalSource`].
pub fn traversal() -> AnonymousTraversalSource {
    AnonymousTraversalSource::default()
}

/// Chooses how traversals from the resulting source are executed.
#[derive(Debug, Default)]
pub struct AnonymousTraversalSource {
    _priv: (),
}

impl AnonymousTraversalSource {
    /// Source over a local graph handle, with an empty strategy pipeline.
    pub fn with_graph(self, graph: Graph) -> GraphTraversalSource {
        GraphTraversalSource::new(graph, TraversalStrategies::new())
    }

    /// Source whose traversals are executed by `connection`.
    pub fn with_remote(self, connection: impl RemoteConnection + 'static) -> GraphTraversalSource {
        let mut strategies = TraversalStrategies::new();
        strategies.add_strategy(RemoteStrategy::new(connection));
        GraphTraversalSource::new(Graph, strategies)
    }

    /// Source with an explicit default pipeline.
    pub fn with_strategies(self, strategies: TraversalStrategies) -> GraphTraversalSource {
        GraphTraversalSource::new(Graph, strategies)
    }
}

/// Spawns bound traversals (`g.v(..)`, `g.add_v(..)`, ...).
///
/// Each spawned traversal gets a copy of the source instructions and a
/// clone of the strategy pipeline.
#[derive(Clone, Debug)]
pub struct GraphTraversalSource {
    graph: Graph,
    strategies: TraversalStrategies,
    bytecode: Bytecode,
    bulk_policy: BulkPolicy,
}

impl GraphTraversalSource {
    pub fn new(graph: Graph, strategies: TraversalStrategies) -> Self {
        Self {
            graph,
            strategies,
            bytecode: Bytecode::new(),
            bulk_policy: BulkPolicy::default(),
        }
    }

    pub fn graph(&self) -> Graph {
        self.graph
    }

    pub fn strategies(&self) -> &TraversalStrategies {
        &self.strategies
    }

    /// Source instructions recorded so far.
    pub fn bytecode(&self) -> &Bytecode {
        &self.bytecode
    }

    fn with_source(&self, name: &str, args: impl Values) -> Self {
        let mut source = self.clone();
        source.bytecode.push_source(name, args);
        source
    }

    pub fn with_bulk(&self, enabled: bool) -> Self {
        self.with_source("withBulk", enabled)
    }

    pub fn with_path(&self) -> Self {
        self.with_source("withPath", ())
    }

    /// Initial sack value, optionally followed by a merge operator.
    pub fn with_sack(&self, args: impl Values) -> Self {
        self.with_source("withSack", args)
    }

    pub fn with_side_effect(&self, key: &str, value: impl Into<Value>) -> Self {
        self.with_source("withSideEffect", (key, value))
    }

    /// Generic source option, e.g. `with_("evaluationTimeout", 500)`.
    pub fn with_(&self, key: &str, value: impl Into<Value>) -> Self {
        self.with_source("with", (key, value))
    }

    /// Add a client-side strategy after the existing ones.
    ///
    /// Not recorded in the bytecode; it runs locally before consumption.
    pub fn with_strategy(&self, strategy: impl Strategy + 'static) -> Self {
        let mut source = self.clone();
        source.strategies.add_strategy(strategy);
        source
    }

    /// How spawned traversals treat traversers with a non-positive bulk.
    pub fn with_bulk_policy(&self, policy: BulkPolicy) -> Self {
        let mut source = self.clone();
        source.bulk_policy = policy;
        source
    }

    fn spawn(&self) -> Traversal {
        Traversal::new(self.strategies.clone(), self.bytecode.source_only())
            .with_bulk_policy(self.bulk_policy)
    }

    pub fn v(&self, ids: impl Values) -> Traversal {
        self.spawn().v(ids)
    }

    pub fn e(&self, ids: impl Values) -> Traversal {
        self.spawn().e(ids)
    }

    pub fn add_v(&self, label: impl Arguments) -> Result<Traversal> {
        self.spawn().add_v(label)
    }

    pub fn add_e(&self, label: impl Arguments) -> Result<Traversal> {
        self.spawn().add_e(label)
    }

    pub fn inject(&self, values: impl Values) -> Traversal {
        self.spawn().inject(values)
    }

    pub fn merge_v(&self, args: impl Arguments) -> Result<Traversal> {
        self.spawn().merge_v(args)
    }

    pub fn merge_e(&self, args: impl Arguments) -> Result<Traversal> {
        self.spawn().merge_e(args)
    }
}
