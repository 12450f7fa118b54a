//! Object identity for Horizon Weld.
//!
//! Provides stable, process-unique identifiers for the objects that
//! participate in notification channels. An identity is the key used to
//! subscribe to and unsubscribe from another object's change notifications,
//! and the correlation key between abstract model objects and native control
//! state.
//!
//! There is intentionally no central registry and no parent-child ownership
//! here: widget trees, generic dispatch, and object lifetime management
//! belong to the hosting widget framework, not to this binding layer.
//!
//! # Key Types
//!
//! - [`Object`] - Base trait for types with a stable identity
//! - [`ObjectBase`] - Helper struct for implementing [`Object`]
//! - [`ObjectId`] - Unique stable identifier for each object

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identifier for an object.
///
/// `ObjectId`s are allocated from a process-wide counter and are never
/// reused. They are cheap to copy, hash, and compare, which makes them
/// suitable as subscription keys.
///
/// # Related Types
///
/// - [`Object`] - Trait that provides [`object_id()`](Object::object_id)
/// - [`ObjectBase`] - Generates an `ObjectId` on construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Convert the ObjectId to a raw u64 value.
    ///
    /// This is useful for interop with external systems that need a numeric
    /// ID.
    #[inline]
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Counter backing [`ObjectBase::new`]. Starts at 1 so 0 never names a live
/// object.
static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Helper struct for implementing the [`Object`] trait.
///
/// Embed an `ObjectBase` in your type and delegate
/// [`object_id()`](Object::object_id) to [`ObjectBase::id`]:
///
/// ```
/// use horizon_weld_core::{Object, ObjectBase, ObjectId};
///
/// struct MyThing {
///     object_base: ObjectBase,
/// }
///
/// impl Object for MyThing {
///     fn object_id(&self) -> ObjectId {
///         self.object_base.id()
///     }
/// }
/// ```
#[derive(Debug)]
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Allocate a fresh identity for an instance of `T`.
    ///
    /// The type parameter exists purely for trace output; identities are
    /// unique across all types.
    pub fn new<T: 'static>() -> Self {
        let id = ObjectId(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed));
        tracing::trace!(
            target: "horizon_weld_core::object",
            %id,
            type_name = std::any::type_name::<T>(),
            "allocated object identity"
        );
        Self { id }
    }

    /// Get this object's identity.
    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }
}

/// Base trait for types with a stable identity.
///
/// Implementors typically embed an [`ObjectBase`] and delegate to it.
pub trait Object {
    /// Get this object's unique identity.
    fn object_id(&self) -> ObjectId;
}

static_assertions::assert_impl_all!(ObjectId: Send, Sync);
static_assertions::assert_impl_all!(ObjectBase: Send, Sync);
