//! Bytecode representation for Gremlin traversals.
//!
//! This crate contains:
//! - The instruction list (`Bytecode`, `Instruction`) shipped to an executor
//! - Step argument values (`Value`), enum tokens and predicates
//! - Argument binding rules, including nested anonymous traversals

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod bytecode;
pub mod predicate;
pub mod tokens;
pub mod value;

// Re-export commonly used items at crate root
pub use bytecode::{
    Argument, Arguments, Bytecode, BytecodeError, Instruction, IntoArgument, Values,
};
pub use predicate::{P, Predicate, PredicateKind, TextP};
pub use tokens::{
    Barrier, Cardinality, Column, Direction, EnumToken, Merge, Operator, Order, Pick, Pop, Scope,
    T,
};
pub use value::Value;
