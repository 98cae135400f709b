//! The unit flowing through iteration.

use gremlin_bytecode::Value;

/// A value together with its multiplicity.
///
/// A traverser `(v, b)` stands for `b` consecutive occurrences of `v`.
/// Producers must keep `bulk >= 1`; see [`BulkPolicy`](super::BulkPolicy)
/// for how violations are handled.
#[derive(Clone, Debug, PartialEq)]
pub struct Traverser {
    pub value: Value,
    pub bulk: i64,
}

impl Traverser {
    pub fn new(value: impl Into<Value>, bulk: i64) -> Self {
        Self {
            value: value.into(),
            bulk,
        }
    }

    /// A traverser with bulk 1.
    pub fn single(value: impl Into<Value>) -> Self {
        Self::new(value, 1)
    }
}
