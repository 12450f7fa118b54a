//! Horizon Weld - a Rust-native binding from an abstract action model to
//! native toolbar controls.
//!
//! Applications describe commands as [`Action`](widget::Action)s and collect
//! them in an [`ActionList`](widget::ActionList); a
//! [`ToolBar`](widget::ToolBar) renders that list through a host windowing
//! system's built-in toolbar control, keeping the native button array in
//! lockstep with the list and routing native clicks back into action
//! triggers.
//!
//! The native control is consumed through the narrow traits in [`native`];
//! [`native::headless`] provides an in-process implementation so the whole
//! stack runs on any platform.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_weld::native::headless::HeadlessContainer;
//! use horizon_weld::widget::{Action, ToolBar};
//!
//! let parent = HeadlessContainer::new();
//! let tool_bar = ToolBar::new(&parent)?;
//!
//! let save = Arc::new(Action::new("Save"));
//! save.triggered.connect(|_| println!("saving"));
//! tool_bar.actions().add(save.clone())?;
//!
//! save.set_enabled(false)?;
//! # Ok::<(), horizon_weld::WeldError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod image_list;
pub mod native;
pub mod widget;

pub use error::{WeldError, WeldResult};
pub use geometry::{LayoutFlags, Orientation, Size};
pub use image_list::{Bitmap, ImageIndexResolver, ImageList, ImageListError, ImageListHandle};
pub use widget::{Action, ActionId, ActionList, ToolBar};
