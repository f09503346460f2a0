//! Child properties: named, typed values a container keeps per child.
//!
//! Each concrete container type registers its descriptors once in a
//! process-wide pool keyed by the container's type and the property name.
//! The pool is written through a one-time-init barrier and read-mostly
//! thereafter; the engine itself is single-threaded, but independent trees
//! on different threads share the pool safely.

use std::{
    any::TypeId,
    collections::HashMap,
    sync::{OnceLock, RwLock},
};

use crate::{containers::Pack, id::WidgetId};

/// A child-property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i32),
    /// An unsigned integer.
    Uint(u32),
    /// A packing side.
    Pack(Pack),
}

/// The type of a child-property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Boolean flag.
    Bool,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    Uint,
    /// Packing side.
    Pack,
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Uint(_) => ValueKind::Uint,
            Self::Pack(_) => ValueKind::Pack,
        }
    }

    /// Extract a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract a signed integer.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract an unsigned integer.
    pub fn as_uint(&self) -> Option<u32> {
        match self {
            Self::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract a packing side.
    pub fn as_pack(&self) -> Option<Pack> {
        match self {
            Self::Pack(v) => Some(*v),
            _ => None,
        }
    }
}

/// Descriptor for one child property of a container type.
#[derive(Debug, Clone, Copy)]
pub struct ChildPropertySpec {
    /// Property name.
    pub name: &'static str,
    /// Expected value kind.
    pub kind: ValueKind,
}

/// Observer for property-change notifications.
///
/// The engine reports "this (widget, property) pair changed"; fan-out to
/// interested parties is the host's business.
pub trait NotificationSink {
    /// A per-child property on `container` changed for `child`.
    fn child_property_changed(&self, _container: WidgetId, _child: WidgetId, _name: &str) {}

    /// A property on the widget itself changed.
    fn property_changed(&self, _widget: WidgetId, _name: &str) {}
}

/// Registered descriptors, per container type.
#[derive(Default)]
struct Pool {
    /// Kind per (container type, property name).
    kinds: HashMap<TypeId, HashMap<&'static str, ValueKind>>,
}

/// The process-wide descriptor pool.
fn pool() -> &'static RwLock<Pool> {
    static POOL: OnceLock<RwLock<Pool>> = OnceLock::new();
    POOL.get_or_init(|| RwLock::new(Pool::default()))
}

/// Install a container type's descriptors on first access.
pub(crate) fn ensure_registered(type_id: TypeId, specs: &'static [ChildPropertySpec]) {
    {
        let pool = pool().read().expect("property pool poisoned");
        if pool.kinds.contains_key(&type_id) {
            return;
        }
    }
    let mut pool = pool().write().expect("property pool poisoned");
    let entry = pool.kinds.entry(type_id).or_default();
    for spec in specs {
        entry.insert(spec.name, spec.kind);
    }
}

/// Look up the registered kind for a property of a container type.
pub(crate) fn lookup(type_id: TypeId, name: &str) -> Option<ValueKind> {
    let pool = pool().read().expect("property pool poisoned");
    pool.kinds.get(&type_id)?.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn register_and_lookup() {
        const SPECS: &[ChildPropertySpec] = &[
            ChildPropertySpec {
                name: "weight",
                kind: ValueKind::Uint,
            },
            ChildPropertySpec {
                name: "anchored",
                kind: ValueKind::Bool,
            },
        ];
        let tid = TypeId::of::<Marker>();
        ensure_registered(tid, SPECS);
        // Re-registration is a no-op.
        ensure_registered(tid, SPECS);
        assert_eq!(lookup(tid, "weight"), Some(ValueKind::Uint));
        assert_eq!(lookup(tid, "anchored"), Some(ValueKind::Bool));
        assert_eq!(lookup(tid, "nope"), None);
    }

    #[test]
    fn value_kinds() {
        assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(Value::Uint(3).kind(), ValueKind::Uint);
        assert_eq!(Value::Int(-3).as_int(), Some(-3));
        assert_eq!(Value::Int(-3).as_uint(), None);
        assert_eq!(Value::Pack(Pack::End).as_pack(), Some(Pack::End));
    }
}
