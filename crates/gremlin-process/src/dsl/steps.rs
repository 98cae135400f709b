//! Step methods and their anonymous counterparts.
//!
//! Steps are split by what they accept. Value steps take plain values and
//! cannot fail. Nested steps may take child traversals, which must be
//! anonymous, so they return a `Result`. A step with any form taking a
//! traversal is a nested step.

use gremlin_bytecode::{Arguments, Values};

use crate::engine::{Result, Traversal};

macro_rules! steps {
    (
        values {
            $($(#[$vmeta:meta])* $vmethod:ident => $vstep:literal),* $(,)?
        }
        nested {
            $($(#[$nmeta:meta])* $nmethod:ident => $nstep:literal),* $(,)?
        }
    ) => {
        impl Traversal {
            $(
                $(#[$vmeta])*
                pub fn $vmethod(mut self, args: impl Values) -> Self {
                    self.append_step($vstep, args);
                    self
                }
            )*

            $(
                $(#[$nmeta])*
                pub fn $nmethod(mut self, args: impl Arguments) -> Result<Self> {
                    self.append_nested_step($nstep, args)?;
                    Ok(self)
                }
            )*
        }

        /// Step functions that start a fresh anonymous traversal.
        ///
        /// Use these to build child traversals for nested steps:
        /// `g.v(()).where_(__::out("knows"))`.
        pub mod anonymous {
            use gremlin_bytecode::{Arguments, Values};

            use crate::engine::{Result, Traversal};

            $(
                #[doc = concat!("Start an anonymous traversal with `", $vstep, "`.")]
                pub fn $vmethod(args: impl Values) -> Traversal {
                    Traversal::anonymous().$vmethod(args)
                }
            )*

            $(
                #[doc = concat!("Start an anonymous traversal with `", $nstep, "`.")]
                pub fn $nmethod(args: impl Arguments) -> Result<Traversal> {
                    Traversal::anonymous().$nmethod(args)
                }
            )*
        }
    };
}

steps! {
    values {
        /// Vertices, optionally restricted to the given ids.
        v => "V",
        /// Edges, optionally restricted to the given ids.
        e => "E",
        out => "out",
        in_ => "in",
        both => "both",
        out_e => "outE",
        in_e => "inE",
        both_e => "bothE",
        out_v => "outV",
        in_v => "inV",
        both_v => "bothV",
        other_v => "otherV",
        has_label => "hasLabel",
        has_id => "hasId",
        has_key => "hasKey",
        has_not => "hasNot",
        values => "values",
        value_map => "valueMap",
        element_map => "elementMap",
        properties => "properties",
        id => "id",
        label => "label",
        key => "key",
        value => "value",
        order => "order",
        limit => "limit",
        range => "range",
        skip => "skip",
        tail => "tail",
        count => "count",
        dedup => "dedup",
        fold => "fold",
        unfold => "unfold",
        group => "group",
        group_count => "groupCount",
        path => "path",
        simple_path => "simplePath",
        cyclic_path => "cyclicPath",
        project => "project",
        /// Label the current step for later `select`.
        as_ => "as",
        constant => "constant",
        inject => "inject",
        identity => "identity",
        sum => "sum",
        mean => "mean",
        min => "min",
        max => "max",
        is => "is",
        times => "times",
        cap => "cap",
        aggregate => "aggregate",
        barrier => "barrier",
        math => "math",
        sample => "sample",
        coin => "coin",
        drop => "drop",
        loops => "loops",
        /// Discard all results. Used with `iterate` for side-effect-only traversals.
        none => "none",
        /// Step modulator: `with(key, value)`.
        with_ => "with",
    }
    nested {
        /// Modulate the previous step, e.g. `order().by(("age", Order::Desc))`.
        by => "by",
        to => "to",
        from_ => "from",
        where_ => "where",
        filter => "filter",
        map => "map",
        flat_map => "flatMap",
        union => "union",
        coalesce => "coalesce",
        choose => "choose",
        option => "option",
        repeat => "repeat",
        until => "until",
        emit => "emit",
        local => "local",
        optional => "optional",
        not => "not",
        and => "and",
        or => "or",
        side_effect => "sideEffect",
        match_ => "match",
        branch => "branch",
        property => "property",
        merge_v => "mergeV",
        merge_e => "mergeE",
        /// Add a vertex with a label or a label-producing child traversal.
        add_v => "addV",
        add_e => "addE",
        /// Filter by property: `has(key)`, `has(key, value)`, `has(label, key, value)`
        /// or `has(key, child)`.
        has => "has",
        /// Select by labels, by a column, or by a key-producing child traversal.
        select => "select",
    }
}
