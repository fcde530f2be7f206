use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use bytes::Bytes;
use tracing::trace;

use crate::arraylist::ArrayList;
use crate::hooks::ValueHooks;
use crate::kind::ValueKind;
use crate::map::ValueMap;
use crate::pair::Pair;

/// A tagged value.
///
/// A bare `Value` is caller-managed: it lives wherever the caller put it and
/// the library never frees its storage. Wrap it in a [`Val`] to get a
/// heap-owned, reservable handle; containers only ever hold `Val`s.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Nil,
    Boolean(bool),
    Integer(i64),
    String(String),
    Bytes(Bytes),
    List(ArrayList),
    Map(ValueMap),
    Pair(Pair),
}

impl Value {
    /// Initialize caller-provided storage in place.
    ///
    /// Whatever `storage` held before is released first.
    pub fn init(storage: &mut Value, value: Value) -> &mut Value {
        std::mem::replace(storage, value).release();
        storage
    }

    /// The kind tag.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Pair(_) => ValueKind::Pair,
        }
    }

    /// The operation table for this value's kind.
    pub fn hooks(&self) -> &'static dyn ValueHooks {
        self.kind().hooks()
    }

    /// Always `false`: a bare value is never freed by the library.
    pub fn is_owned(&self) -> bool {
        false
    }

    /// Release the payload, children first.
    pub fn release(mut self) {
        let hooks = self.hooks();
        trace!(kind = %hooks.kind(), "releasing value");
        hooks.destroy(&mut self);
    }

    /// Hash of the value, via its kind's table.
    pub fn hashcode(&self) -> u32 {
        self.hooks().hashcode(self)
    }

    /// Text rendering of the value, via its kind's table.
    pub fn render(&self) -> Option<String> {
        self.hooks().to_string(self)
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ArrayList> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ArrayList> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<&Pair> {
        match self {
            Value::Pair(pair) => Some(pair),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render().unwrap_or_default())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<ArrayList> for Value {
    fn from(list: ArrayList) -> Self {
        Value::List(list)
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Value::Map(map)
    }
}

impl From<Pair> for Value {
    fn from(pair: Pair) -> Self {
        Value::Pair(pair)
    }
}

/// Heap-owned, reference-counted handle to a [`Value`].
///
/// [`reserve`](Val::reserve) registers another independent holder without
/// copying the payload; each holder calls [`release`](Val::release) (or
/// simply drops its handle) exactly once. The payload is released, children
/// first, when the last holder lets go.
#[derive(Clone, PartialEq)]
pub struct Val(Arc<Value>);

impl Val {
    /// Allocate a new value on the heap with a single holder.
    pub fn new(value: impl Into<Value>) -> Self {
        Self(Arc::new(value.into()))
    }

    /// Always `true`: the storage behind a `Val` belongs to the library.
    pub fn is_owned(&self) -> bool {
        true
    }

    /// Register an additional holder.
    pub fn reserve(&self) -> Val {
        Self(Arc::clone(&self.0))
    }

    /// Drop this holder's reservation.
    ///
    /// Returns `true` if this was the last holder, in which case the payload
    /// was released and the storage freed.
    pub fn release(self) -> bool {
        match Arc::into_inner(self.0) {
            Some(value) => {
                value.release();
                true
            }
            None => false,
        }
    }

    /// Number of live holders, this one included.
    pub fn holders(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Exclusive access to the payload, available only to a sole holder.
    pub fn get_mut(&mut self) -> Option<&mut Value> {
        Arc::get_mut(&mut self.0)
    }

    /// Returns `true` if both handles refer to the same storage.
    pub fn ptr_eq(a: &Val, b: &Val) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl Deref for Val {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.0
    }
}

impl AsRef<Value> for Val {
    fn as_ref(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Val {
    fn from(value: Value) -> Self {
        Self(Arc::new(value))
    }
}

impl fmt::Debug for Val {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Val {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}
