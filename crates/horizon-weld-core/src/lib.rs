//! Core systems for Horizon Weld.
//!
//! This crate provides the foundational components shared by the Horizon Weld
//! native-control binding layer:
//!
//! - **Object Identity**: stable, process-unique identifiers used as
//!   correlation and subscription keys
//! - **Signal/Slot System**: type-safe notification channels for
//!   application-facing events
//! - **Logging**: `tracing` target constants for filtering by subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_weld_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Object Identity Example
//!
//! ```
//! use horizon_weld_core::{Object, ObjectBase, ObjectId};
//!
//! struct Counter {
//!     object_base: ObjectBase,
//!     value: i32,
//! }
//!
//! impl Counter {
//!     fn new() -> Self {
//!         Self {
//!             object_base: ObjectBase::new::<Self>(),
//!             value: 0,
//!         }
//!     }
//! }
//!
//! impl Object for Counter {
//!     fn object_id(&self) -> ObjectId {
//!         self.object_base.id()
//!     }
//! }
//! ```

pub mod logging;
pub mod object;
pub mod signal;

pub use object::{Object, ObjectBase, ObjectId};
pub use signal::{ConnectionId, Signal};
