//! Predicate arguments (`P` and `TextP`).
//!
//! Predicates are plain data: an operator name plus one or two operands.
//! Compound predicates (`and`, `or`) nest other predicates as operands.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::bytecode::impl_value_arguments;
use crate::value::Value;

/// Which predicate family an operator belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    P,
    TextP,
}

impl PredicateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::P => "P",
            Self::TextP => "TextP",
        }
    }
}

/// A bound predicate, e.g. `gt(30)` or `within([a, b])`.
#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    kind: PredicateKind,
    operator: String,
    value: Box<Value>,
    other: Option<Box<Value>>,
}

impl Predicate {
    pub fn new(kind: PredicateKind, operator: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            kind,
            operator: operator.into(),
            value: Box::new(value.into()),
            other: None,
        }
    }

    fn compound(operator: &str, left: Predicate, right: Predicate) -> Self {
        Self {
            kind: left.kind,
            operator: operator.to_owned(),
            value: Box::new(Value::Predicate(left)),
            other: Some(Box::new(Value::Predicate(right))),
        }
    }

    pub fn kind(&self) -> PredicateKind {
        self.kind
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn other(&self) -> Option<&Value> {
        self.other.as_deref()
    }

    /// Both predicates must hold.
    pub fn and(self, other: Predicate) -> Predicate {
        Self::compound("and", self, other)
    }

    /// Either predicate must hold.
    pub fn or(self, other: Predicate) -> Predicate {
        Self::compound("or", self, other)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.other {
            Some(other) => write!(f, "{}({}, {})", self.operator, self.value, other),
            None => write!(f, "{}({})", self.operator, self.value),
        }
    }
}

impl Serialize for Predicate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if self.other.is_some() { 4 } else { 3 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("predicate", self.kind.as_str())?;
        map.serialize_entry("operator", &self.operator)?;
        map.serialize_entry("value", &self.value)?;
        if let Some(other) = &self.other {
            map.serialize_entry("other", other)?;
        }
        map.end()
    }
}

impl_value_arguments!(Predicate);

fn list<I, V>(values: I) -> Value
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Value::List(values.into_iter().map(Into::into).collect())
}

/// Constructors for general predicates.
pub enum P {}

impl P {
    pub fn eq(value: impl Into<Value>) -> Predicate {
        Predicate::new(PredicateKind::P, "eq", value)
    }

    pub fn neq(value: impl Into<Value>) -> Predicate {
        Predicate::new(PredicateKind::P, "neq", value)
    }

    pub fn lt(value: impl Into<Value>) -> Predicate {
        Predicate::new(PredicateKind::P, "lt", value)
    }

    pub fn lte(value: impl Into<Value>) -> Predicate {
        Predicate::new(PredicateKind::P, "lte", value)
    }

    pub fn gt(value: impl Into<Value>) -> Predicate {
        Predicate::new(PredicateKind::P, "gt", value)
    }

    pub fn gte(value: impl Into<Value>) -> Predicate {
        Predicate::new(PredicateKind::P, "gte", value)
    }

    /// Strictly between `low` and `high`.
    pub fn inside(low: impl Into<Value>, high: impl Into<Value>) -> Predicate {
        Predicate::new(PredicateKind::P, "inside", list([low.into(), high.into()]))
    }

    pub fn outside(low: impl Into<Value>, high: impl Into<Value>) -> Predicate {
        Predicate::new(PredicateKind::P, "outside", list([low.into(), high.into()]))
    }

    /// `low` inclusive, `high` exclusive.
    pub fn between(low: impl Into<Value>, high: impl Into<Value>) -> Predicate {
        Predicate::new(PredicateKind::P, "between", list([low.into(), high.into()]))
    }

    pub fn within<I, V>(values: I) -> Predicate
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Predicate::new(PredicateKind::P, "within", list(values))
    }

    pub fn without<I, V>(values: I) -> Predicate
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Predicate::new(PredicateKind::P, "without", list(values))
    }

    pub fn not(predicate: Predicate) -> Predicate {
        Predicate::new(PredicateKind::P, "not", predicate)
    }
}

/// Constructors for text predicates.
pub enum TextP {}

impl TextP {
    pub fn containing(value: impl Into<String>) -> Predicate {
        Predicate::new(PredicateKind::TextP, "containing", value.into())
    }

    pub fn not_containing(value: impl Into<String>) -> Predicate {
        Predicate::new(PredicateKind::TextP, "notContaining", value.into())
    }

    pub fn starting_with(value: impl Into<String>) -> Predicate {
        Predicate::new(PredicateKind::TextP, "startingWith", value.into())
    }

    pub fn not_starting_with(value: impl Into<String>) -> Predicate {
        Predicate::new(PredicateKind::TextP, "notStartingWith", value.into())
    }

    pub fn ending_with(value: impl Into<String>) -> Predicate {
        Predicate::new(PredicateKind::TextP, "endingWith", value.into())
    }

    pub fn not_ending_with(value: impl Into<String>) -> Predicate {
        Predicate::new(PredicateKind::TextP, "notEndingWith", value.into())
    }

    pub fn regex(pattern: impl Into<String>) -> Predicate {
        Predicate::new(PredicateKind::TextP, "regex", pattern.into())
    }

    pub fn not_regex(pattern: impl Into<String>) -> Predicate {
        Predicate::new(PredicateKind::TextP, "notRegex", pattern.into())
    }
}
