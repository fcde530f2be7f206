//! Per-kind operation tables.
//!
//! Every [`ValueKind`] owns exactly one static implementation of
//! [`ValueHooks`]; [`ValueKind::hooks`] hands it out. Values never carry
//! their own table, so dispatch data cannot drift from the kind tag.
//!
//! Each hook is written against its own variant and treats any other
//! variant as a foreign value: `destroy` leaves it alone, `hashcode` yields
//! 0, `to_string` yields `None`.

use bytes::Bytes;

use crate::kind::ValueKind;
use crate::value::{Val, Value};

/// Operations every kind provides.
pub trait ValueHooks: Sync {
    /// The kind this table serves.
    fn kind(&self) -> ValueKind;

    /// Release everything the payload holds.
    ///
    /// Child values are released first; afterwards the payload is empty.
    /// Freeing the value's own storage is not the hook's job.
    fn destroy(&self, value: &mut Value);

    /// Hash of the payload. Absent children hash as 0.
    fn hashcode(&self, value: &Value) -> u32;

    /// Text rendering of the payload. Absent children render as empty text.
    fn to_string(&self, value: &Value) -> Option<String>;
}

/// Rendering of an optional child; absent children contribute nothing.
fn render_child(child: Option<&Val>) -> String {
    child.and_then(|v| v.render()).unwrap_or_default()
}

/// Hash of an optional child; absent children hash as 0.
fn hash_child(child: Option<&Val>) -> u32 {
    child.map_or(0, |v| v.hashcode())
}

pub(crate) struct NilHooks;
pub(crate) struct BooleanHooks;
pub(crate) struct IntegerHooks;
pub(crate) struct StringHooks;
pub(crate) struct BytesHooks;
pub(crate) struct ListHooks;
pub(crate) struct MapHooks;
pub(crate) struct PairHooks;

pub(crate) static NIL_HOOKS: NilHooks = NilHooks;
pub(crate) static BOOLEAN_HOOKS: BooleanHooks = BooleanHooks;
pub(crate) static INTEGER_HOOKS: IntegerHooks = IntegerHooks;
pub(crate) static STRING_HOOKS: StringHooks = StringHooks;
pub(crate) static BYTES_HOOKS: BytesHooks = BytesHooks;
pub(crate) static LIST_HOOKS: ListHooks = ListHooks;
pub(crate) static MAP_HOOKS: MapHooks = MapHooks;
pub(crate) static PAIR_HOOKS: PairHooks = PairHooks;

impl ValueHooks for NilHooks {
    fn kind(&self) -> ValueKind {
        ValueKind::Nil
    }

    fn destroy(&self, _value: &mut Value) {}

    fn hashcode(&self, _value: &Value) -> u32 {
        0
    }

    fn to_string(&self, value: &Value) -> Option<String> {
        value.is_nil().then(|| "NIL".to_string())
    }
}

impl ValueHooks for BooleanHooks {
    fn kind(&self) -> ValueKind {
        ValueKind::Boolean
    }

    fn destroy(&self, _value: &mut Value) {}

    fn hashcode(&self, value: &Value) -> u32 {
        value.as_bool().map_or(0, u32::from)
    }

    fn to_string(&self, value: &Value) -> Option<String> {
        value.as_bool().map(|b| b.to_string())
    }
}

impl ValueHooks for IntegerHooks {
    fn kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn destroy(&self, _value: &mut Value) {}

    fn hashcode(&self, value: &Value) -> u32 {
        value.as_integer().map_or(0, |n| (n ^ (n >> 32)) as u32)
    }

    fn to_string(&self, value: &Value) -> Option<String> {
        value.as_integer().map(|n| n.to_string())
    }
}

impl ValueHooks for StringHooks {
    fn kind(&self) -> ValueKind {
        ValueKind::String
    }

    fn destroy(&self, value: &mut Value) {
        if let Value::String(s) = value {
            *s = String::new();
        }
    }

    fn hashcode(&self, value: &Value) -> u32 {
        value.as_str().map_or(0, |s| crc32fast::hash(s.as_bytes()))
    }

    fn to_string(&self, value: &Value) -> Option<String> {
        value.as_str().map(|s| format!("\"{s}\""))
    }
}

impl ValueHooks for BytesHooks {
    fn kind(&self) -> ValueKind {
        ValueKind::Bytes
    }

    fn destroy(&self, value: &mut Value) {
        if let Value::Bytes(b) = value {
            *b = Bytes::new();
        }
    }

    fn hashcode(&self, value: &Value) -> u32 {
        value.as_bytes().map_or(0, |b| crc32fast::hash(b))
    }

    fn to_string(&self, value: &Value) -> Option<String> {
        value.as_bytes().map(hex::encode_upper)
    }
}

impl ValueHooks for ListHooks {
    fn kind(&self) -> ValueKind {
        ValueKind::List
    }

    fn destroy(&self, value: &mut Value) {
        if let Value::List(list) = value {
            list.release();
        }
    }

    fn hashcode(&self, value: &Value) -> u32 {
        let Some(list) = value.as_list() else {
            return 0;
        };
        list.iter()
            .fold(1u32, |h, slot| h.wrapping_mul(31).wrapping_add(hash_child(slot)))
    }

    fn to_string(&self, value: &Value) -> Option<String> {
        let list = value.as_list()?;
        let items: Vec<String> = list.iter().map(render_child).collect();
        Some(format!("[{}]", items.join(", ")))
    }
}

impl ValueHooks for MapHooks {
    fn kind(&self) -> ValueKind {
        ValueKind::Map
    }

    fn destroy(&self, value: &mut Value) {
        if let Value::Map(map) = value {
            map.release();
        }
    }

    fn hashcode(&self, value: &Value) -> u32 {
        let Some(map) = value.as_map() else {
            return 0;
        };
        // Entry order must not affect the hash.
        map.iter().fold(0u32, |h, (k, v)| {
            h.wrapping_add(k.hashcode() ^ v.hashcode())
        })
    }

    fn to_string(&self, value: &Value) -> Option<String> {
        let map = value.as_map()?;
        let entries: Vec<String> = map
            .iter()
            .map(|(k, v)| format!("{}: {}", render_child(Some(k)), render_child(Some(v))))
            .collect();
        Some(format!("{{{}}}", entries.join(", ")))
    }
}

impl ValueHooks for PairHooks {
    fn kind(&self) -> ValueKind {
        ValueKind::Pair
    }

    fn destroy(&self, value: &mut Value) {
        if let Value::Pair(pair) = value {
            pair.release();
        }
    }

    fn hashcode(&self, value: &Value) -> u32 {
        let Some(pair) = value.as_pair() else {
            return 0;
        };
        hash_child(pair.first())
            .wrapping_mul(31)
            .wrapping_add(hash_child(pair.second()))
    }

    fn to_string(&self, value: &Value) -> Option<String> {
        let pair = value.as_pair()?;
        Some(format!(
            "({}, {})",
            render_child(pair.first()),
            render_child(pair.second())
        ))
    }
}
