//! Step arguments before binding.
//!
//! Two conversion families exist. [`Values`] covers arguments that are plain
//! data and can never fail to bind. [`Arguments`] additionally admits child
//! traversals, which are checked for anonymity when the instruction is
//! appended. Both are implemented for single arguments and for tuples of up
//! to eight.

use crate::value::Value;

use super::Bytecode;

/// A step argument as supplied by the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum Argument {
    Value(Value),
    /// A child traversal's program. `bound` is true when the traversal was
    /// spawned from a traversal source rather than the anonymous factory.
    Traversal { bytecode: Bytecode, bound: bool },
}

impl Argument {
    pub fn is_bound_traversal(&self) -> bool {
        matches!(self, Self::Traversal { bound: true, .. })
    }

    /// Translate to the stored form. Child traversals become nested bytecode.
    pub(crate) fn into_value(self) -> Value {
        match self {
            Self::Value(value) => value,
            Self::Traversal { bytecode, .. } => Value::Bytecode(bytecode),
        }
    }
}

/// Conversion of a single step argument.
pub trait IntoArgument {
    fn into_argument(self) -> Argument;
}

impl IntoArgument for Argument {
    fn into_argument(self) -> Argument {
        self
    }
}

/// An argument list that may contain child traversals.
pub trait Arguments {
    fn into_arguments(self) -> Vec<Argument>;
}

/// An argument list of plain values.
pub trait Values {
    fn into_values(self) -> Vec<Value>;
}

impl Arguments for () {
    fn into_arguments(self) -> Vec<Argument> {
        Vec::new()
    }
}

impl Values for () {
    fn into_values(self) -> Vec<Value> {
        Vec::new()
    }
}

impl Arguments for Argument {
    fn into_arguments(self) -> Vec<Argument> {
        vec![self]
    }
}

impl Arguments for Vec<Argument> {
    fn into_arguments(self) -> Vec<Argument> {
        self
    }
}

/// Implements the argument traits for types that bind as a single value.
macro_rules! impl_value_arguments {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::bytecode::IntoArgument for $ty {
            fn into_argument(self) -> $crate::bytecode::Argument {
                $crate::bytecode::Argument::Value($crate::value::Value::from(self))
            }
        }

        impl $crate::bytecode::Arguments for $ty {
            fn into_arguments(self) -> Vec<$crate::bytecode::Argument> {
                vec![$crate::bytecode::IntoArgument::into_argument(self)]
            }
        }

        impl $crate::bytecode::Values for $ty {
            fn into_values(self) -> Vec<$crate::value::Value> {
                vec![$crate::value::Value::from(self)]
            }
        }
    )+};
}

pub(crate) use impl_value_arguments;

impl_value_arguments!(bool, i32, i64, f32, f64, &str, String, Vec<Value>, Value);

macro_rules! impl_tuple_arguments {
    ($($name:ident),+) => {
        impl<$($name: IntoArgument),+> Arguments for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_arguments(self) -> Vec<Argument> {
                let ($($name,)+) = self;
                vec![$($name.into_argument()),+]
            }
        }

        impl<$($name: Into<Value>),+> Values for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_values(self) -> Vec<Value> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

impl_tuple_arguments!(A);
impl_tuple_arguments!(A, B);
impl_tuple_arguments!(A, B, C);
impl_tuple_arguments!(A, B, C, D);
impl_tuple_arguments!(A, B, C, D, E);
impl_tuple_arguments!(A, B, C, D, E, F);
impl_tuple_arguments!(A, B, C, D, E, F, G);
impl_tuple_arguments!(A, B, C, D, E, F, G, H);
