//! Fluent step DSL and traversal sources.
//!
//! Traversals spawned from a [`GraphTraversalSource`] are bound: they carry
//! the source's strategies and are meant to be executed. Traversals started
//! from the [`anonymous`] step functions (aliased `__`) are unbound and only
//! serve as arguments of nested steps, where they are embedded as bytecode.
//!
//! A traversal's raw bytecode is not a step argument, so a bound program
//! cannot slip past the anonymity check:
//!
//! ```compile_fail
//! use gremlin_process::{Graph, traversal};
//!
//! let g = traversal().with_graph(Graph);
//! let _ = g.v(()).where_(g.v(()).into_bytecode());
//! ```

mod source;
mod steps;


pub use source::{AnonymousTraversalSource, Graph, GraphTraversalSource, traversal};
pub use steps::anonymous;
pub use steps::anonymous as __;

use gremlin_bytecode::{Argument, Arguments, IntoArgument};

use crate::engine::Traversal;

impl IntoArgument for Traversal {
    fn into_argument(self) -> Argument {
        Argument::Traversal {
            bound: self.is_bound(),
            bytecode: self.into_bytecode(),
        }
    }
}

/// Borrowed form, for reusing one child traversal in several steps.
impl IntoArgument for &Traversal {
    fn into_argument(self) -> Argument {
        Argument::Traversal {
            bound: self.is_bound(),
            bytecode: self.bytecode().clone(),
        }
    }
}

impl Arguments for Traversal {
    fn into_arguments(self) -> Vec<Argument> {
        vec![self.into_argument()]
    }
}

impl Arguments for &Traversal {
    fn into_arguments(self) -> Vec<Argument> {
        vec![self.into_argument()]
    }
}
