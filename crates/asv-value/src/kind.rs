use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hooks::{
    ValueHooks, BOOLEAN_HOOKS, BYTES_HOOKS, INTEGER_HOOKS, LIST_HOOKS, MAP_HOOKS, NIL_HOOKS,
    PAIR_HOOKS, STRING_HOOKS,
};

/// Discriminant of a [`Value`](crate::Value).
///
/// The set of kinds is closed; each one maps to exactly one operation table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Nil,
    Boolean,
    Integer,
    String,
    Bytes,
    List,
    Map,
    Pair,
}

impl ValueKind {
    /// Every kind, in declaration order.
    pub const ALL: [ValueKind; 8] = [
        ValueKind::Nil,
        ValueKind::Boolean,
        ValueKind::Integer,
        ValueKind::String,
        ValueKind::Bytes,
        ValueKind::List,
        ValueKind::Map,
        ValueKind::Pair,
    ];

    /// The operation table shared by every value of this kind.
    pub fn hooks(self) -> &'static dyn ValueHooks {
        match self {
            ValueKind::Nil => &NIL_HOOKS,
            ValueKind::Boolean => &BOOLEAN_HOOKS,
            ValueKind::Integer => &INTEGER_HOOKS,
            ValueKind::String => &STRING_HOOKS,
            ValueKind::Bytes => &BYTES_HOOKS,
            ValueKind::List => &LIST_HOOKS,
            ValueKind::Map => &MAP_HOOKS,
            ValueKind::Pair => &PAIR_HOOKS,
        }
    }

    /// Lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Nil => "nil",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::String => "string",
            ValueKind::Bytes => "bytes",
            ValueKind::List => "list",
            ValueKind::Map => "map",
            ValueKind::Pair => "pair",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
