//! Client-side traversal engine for Gremlin.
//!
//! Traversals are built with the step DSL, turned into [`Bytecode`] and
//! executed through an explicit [`TraversalStrategies`] pipeline. Results are
//! pulled lazily with bulk-aware iteration.
//!
//! # Example
//!
//! ```
//! use gremlin_process::{Graph, __, traversal};
//!
//! let g = traversal().with_graph(Graph);
//! let t = g.v(()).out("created").where_(__::in_("knows")).unwrap();
//!
//! assert_eq!(t.bytecode().step_instructions().len(), 3);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod dsl;
pub mod engine;

pub use gremlin_bytecode::{
    self as bytecode, Bytecode, BytecodeError, EnumToken, Instruction, P, Predicate, TextP, Value,
};
pub use gremlin_bytecode::{
    Barrier, Cardinality, Column, Direction, Merge, Operator, Order, Pick, Pop, Scope, T,
};

pub use dsl::{AnonymousTraversalSource, Graph, GraphTraversalSource, __, anonymous, traversal};
pub use engine::{
    BoxError, BulkPolicy, Error, RemoteConnection, RemoteStrategy, Result, Strategy, Traversal,
    TraversalStrategies, TraversalStream, Traverser,
};
