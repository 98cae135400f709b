//! Enumerated domain constants.
//!
//! Each enumerable domain is a closed Rust enum that knows its own wire
//! encoding: a `(typeName, elementName)` pair. Binding a constant as a step
//! argument stores that pair as an [`EnumToken`].

use std::fmt;

use serde::Serialize;

use crate::bytecode::impl_value_arguments;
use crate::value::Value;

/// Encoded enum constant, e.g. `{typeName: "Order", elementName: "desc"}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumToken {
    pub type_name: String,
    pub element_name: String,
}

impl EnumToken {
    pub fn new(type_name: impl Into<String>, element_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            element_name: element_name.into(),
        }
    }
}

impl fmt::Display for EnumToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.element_name)
    }
}

impl_value_arguments!(EnumToken);

macro_rules! gremlin_enum {
    (
        $(#[$meta:meta])*
        $name:ident = $type_name:literal {
            $($(#[$vmeta:meta])* $variant:ident => $element:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Type name used in the encoded token.
            pub const TYPE_NAME: &'static str = $type_name;

            /// All constants in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Element name used in the encoded token.
            pub fn element_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $element),+
                }
            }

            pub fn token(self) -> EnumToken {
                EnumToken::new(Self::TYPE_NAME, self.element_name())
            }

            /// Decode from an element name. Names are case-sensitive.
            pub fn from_element_name(name: &str) -> Option<Self> {
                match name {
                    $($element => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.element_name())
            }
        }

        impl From<$name> for EnumToken {
            fn from(v: $name) -> Self {
                v.token()
            }
        }

        impl From<$name> for Value {
            fn from(v: $name) -> Self {
                Value::Enum(v.token())
            }
        }

        impl_value_arguments!($name);
    };
}

gremlin_enum! {
    /// Sort direction for `order().by(..)`.
    Order = "Order" {
        Asc => "asc",
        Desc => "desc",
        Shuffle => "shuffle",
    }
}

gremlin_enum! {
    Scope = "Scope" {
        Global => "global",
        Local => "local",
    }
}

gremlin_enum! {
    /// Element tokens usable wherever a property key is expected.
    T = "T" {
        Id => "id",
        Label => "label",
        Key => "key",
        Value => "value",
    }
}

gremlin_enum! {
    /// Edge direction relative to a vertex.
    Direction = "Direction" {
        Out => "OUT",
        In => "IN",
        Both => "BOTH",
    }
}

gremlin_enum! {
    /// Property cardinality for `property(..)`.
    Cardinality = "Cardinality" {
        Single => "single",
        List => "list",
        Set => "set",
    }
}

gremlin_enum! {
    Column = "Column" {
        Keys => "keys",
        Values => "values",
    }
}

gremlin_enum! {
    /// Which object `select` picks when a label appears more than once.
    Pop = "Pop" {
        First => "first",
        Last => "last",
        All => "all",
        Mixed => "mixed",
    }
}

gremlin_enum! {
    Pick = "Pick" {
        Any => "any",
        None => "none",
    }
}

gremlin_enum! {
    Barrier = "Barrier" {
        NormSack => "normSack",
    }
}

gremlin_enum! {
    /// Reducing operators for sacks and `fold`.
    Operator = "Operator" {
        Sum => "sum",
        Minus => "minus",
        Mult => "mult",
        Div => "div",
        Min => "min",
        Max => "max",
        AddAll => "addAll",
        And => "and",
        Or => "or",
        SumLong => "sumLong",
        Assign => "assign",
    }
}

gremlin_enum! {
    /// Option keys for `mergeV` / `mergeE`.
    Merge = "Merge" {
        OnCreate => "onCreate",
        OnMatch => "onMatch",
        OutV => "outV",
        InV => "inV",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_name_roundtrip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_element_name(op.element_name()), Some(*op));
        }
        for dir in Direction::ALL {
            assert_eq!(Direction::from_element_name(dir.element_name()), Some(*dir));
        }
        assert_eq!(Order::from_element_name("DESC"), None);
    }

    #[test]
    fn token_carries_type_name() {
        let token = Order::Desc.token();
        assert_eq!(token.type_name, "Order");
        assert_eq!(token.element_name, "desc");
        assert_eq!(token.to_string(), "Order.desc");

        assert_eq!(Value::from(T::Label), Value::Enum(EnumToken::new("T", "label")));
        assert_eq!(EnumToken::from(Direction::Both).element_name, "BOTH");
    }
}
