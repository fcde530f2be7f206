//! Tagged value model for the ASV core.
//!
//! Every piece of data the client library manipulates is a [`Value`]: a
//! closed sum type over the supported kinds. Each [`ValueKind`] has one
//! static operation table ([`ValueHooks`]) providing destroy, hashcode, and
//! string rendering, so polymorphic behavior is looked up by kind rather than
//! stored per instance.
//!
//! # Ownership
//!
//! - A bare [`Value`] is caller-managed; [`Value::release`] tears down its
//!   payload but never frees the value's own storage.
//! - A [`Val`] is heap-owned and reference-counted. [`Val::reserve`] adds an
//!   independent holder; [`Val::release`] drops one, and the last release
//!   tears down the payload, children first.
//!
//! # Containers
//!
//! - [`ArrayList`] -- growable, sparse, block-allocated sequence of `Val`s
//! - [`Pair`] -- two optional members
//! - [`ValueMap`] -- minimal association list for the map kind

pub mod arraylist;
pub mod error;
pub mod hooks;
pub mod kind;
pub mod map;
pub mod pair;
pub mod value;

pub use arraylist::ArrayList;
pub use error::{ArrayListError, Result};
pub use hooks::ValueHooks;
pub use kind::ValueKind;
pub use map::ValueMap;
pub use pair::Pair;
pub use value::{Val, Value};
