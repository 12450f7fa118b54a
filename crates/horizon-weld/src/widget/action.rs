//! The action model: user commands presented by toolbars.
//!
//! This module provides [`Action`], a non-visual object that represents a
//! unit of user intent. An action carries a display text, an optional image,
//! and its interaction flags (enabled, checked, checkable, exclusive). A
//! toolbar renders actions as native buttons and keeps the two in sync.
//!
//! # Change notification
//!
//! Widgets that render an action subscribe to its *change channel*, keyed by
//! their own identity, via [`Action::add_changed_handler`]. Unlike an
//! ordinary signal, a change handler is fallible: pushing a property change
//! into a native control can be rejected, and that rejection propagates back
//! out of the mutating setter. Application code that only wants to observe
//! activations uses the infallible [`triggered`](Action::triggered) and
//! [`toggled`](Action::toggled) signals instead.
//!
//! # Example
//!
//! ```
//! use horizon_weld::widget::Action;
//!
//! let save = Action::new("Save").with_enabled(false);
//!
//! save.triggered.connect(|_| {
//!     println!("Save activated!");
//! });
//!
//! // Disabled actions swallow triggers.
//! save.trigger();
//!
//! // Re-enable; with no toolbar attached the setter cannot fail.
//! save.set_enabled(true).unwrap();
//! save.trigger();
//! ```

use std::sync::{Arc, Weak};

use horizon_weld_core::{Object, ObjectBase, ObjectId, Signal};
use parking_lot::RwLock;

use crate::error::WeldResult;
use crate::image_list::Bitmap;

/// A subscriber to an action's change channel.
///
/// Implementors push the action's current properties into whatever presents
/// it (typically a native button) and report rejection. The subscriber's
/// [`ObjectId`] is the subscription key: one subscriber holds at most one
/// subscription per action.
pub trait ActionChangedHandler: Object + Send + Sync {
    /// Called after any of the action's properties changed.
    fn on_action_changed(&self, action: &Action) -> WeldResult<()>;
}

/// Internal mutable state for an Action.
struct ActionState {
    text: String,
    image: Option<Bitmap>,
    enabled: bool,
    checked: bool,
    checkable: bool,
    exclusive: bool,
}

struct ChangedSubscription {
    subscriber: ObjectId,
    handler: Weak<dyn ActionChangedHandler>,
}

/// A non-visual object representing a user command.
///
/// # Signals
///
/// - [`triggered`](Action::triggered): emitted when the action is activated
///   (by a native click or [`trigger`](Action::trigger)); carries the
///   current checked state
/// - [`toggled`](Action::toggled): emitted when the checked state changes
pub struct Action {
    /// Object system integration.
    object_base: ObjectBase,

    /// Internal mutable state.
    state: RwLock<ActionState>,

    /// Fallible change subscriptions, keyed by subscriber identity.
    changed_handlers: RwLock<Vec<ChangedSubscription>>,

    /// Signal emitted when the action is activated.
    ///
    /// The parameter is the checked state at activation time (always false
    /// for non-checkable actions).
    pub triggered: Signal<bool>,

    /// Signal emitted when a checkable action's state changes.
    pub toggled: Signal<bool>,
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("object_base", &self.object_base)
            .finish_non_exhaustive()
    }
}

impl Action {
    /// Create a new action with the given display text.
    ///
    /// Actions start enabled, unchecked, non-checkable, and non-exclusive,
    /// with no image.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            object_base: ObjectBase::new::<Self>(),
            state: RwLock::new(ActionState {
                text: text.into(),
                image: None,
                enabled: true,
                checked: false,
                checkable: false,
                exclusive: false,
            }),
            changed_handlers: RwLock::new(Vec::new()),
            triggered: Signal::new(),
            toggled: Signal::new(),
        }
    }

    // ========================================================================
    // Text
    // ========================================================================

    /// Get the action's display text.
    pub fn text(&self) -> String {
        self.state.read().text.clone()
    }

    /// Set the action's display text.
    pub fn set_text(&self, text: impl Into<String>) -> WeldResult<()> {
        let text = text.into();
        {
            let mut state = self.state.write();
            if state.text == text {
                return Ok(());
            }
            state.text = text;
        }
        self.notify_changed()
    }

    // ========================================================================
    // Image
    // ========================================================================

    /// Get the action's image.
    pub fn image(&self) -> Option<Bitmap> {
        self.state.read().image.clone()
    }

    /// Set the action's image.
    pub fn set_image(&self, image: Option<Bitmap>) -> WeldResult<()> {
        {
            let mut state = self.state.write();
            state.image = image;
        }
        self.notify_changed()
    }

    /// Builder pattern for setting the image.
    pub fn with_image(self, image: Bitmap) -> Self {
        self.state.write().image = Some(image);
        self
    }

    // ========================================================================
    // Enabled
    // ========================================================================

    /// Check if the action is enabled.
    pub fn is_enabled(&self) -> bool {
        self.state.read().enabled
    }

    /// Set whether the action is enabled.
    ///
    /// Disabled actions render as non-interactive buttons and swallow
    /// [`trigger`](Self::trigger).
    pub fn set_enabled(&self, enabled: bool) -> WeldResult<()> {
        {
            let mut state = self.state.write();
            if state.enabled == enabled {
                return Ok(());
            }
            state.enabled = enabled;
        }
        self.notify_changed()
    }

    /// Builder pattern for setting the enabled state.
    pub fn with_enabled(self, enabled: bool) -> Self {
        self.state.write().enabled = enabled;
        self
    }

    // ========================================================================
    // Checkable State
    // ========================================================================

    /// Check if the action is checkable.
    pub fn is_checkable(&self) -> bool {
        self.state.read().checkable
    }

    /// Set whether the action is checkable.
    ///
    /// Making a checked action non-checkable unchecks it.
    pub fn set_checkable(&self, checkable: bool) -> WeldResult<()> {
        let unchecked;
        {
            let mut state = self.state.write();
            if state.checkable == checkable {
                return Ok(());
            }
            state.checkable = checkable;
            unchecked = !checkable && state.checked;
            if unchecked {
                state.checked = false;
            }
        }
        if unchecked {
            self.toggled.emit(false);
        }
        self.notify_changed()
    }

    /// Builder pattern for setting the checkable state.
    pub fn with_checkable(self, checkable: bool) -> Self {
        self.state.write().checkable = checkable;
        self
    }

    /// Check if the action is currently checked.
    pub fn is_checked(&self) -> bool {
        self.state.read().checked
    }

    /// Set the checked state.
    ///
    /// Only has effect if the action is checkable.
    pub fn set_checked(&self, checked: bool) -> WeldResult<()> {
        {
            let mut state = self.state.write();
            if !state.checkable || state.checked == checked {
                return Ok(());
            }
            state.checked = checked;
        }
        self.toggled.emit(checked);
        self.notify_changed()
    }

    /// Builder pattern for setting the checked state.
    ///
    /// Has effect only together with [`with_checkable`](Self::with_checkable).
    pub fn with_checked(self, checked: bool) -> Self {
        {
            let mut state = self.state.write();
            if state.checkable {
                state.checked = checked;
            }
        }
        self
    }

    // ========================================================================
    // Exclusive
    // ========================================================================

    /// Check if the action is exclusive.
    pub fn is_exclusive(&self) -> bool {
        self.state.read().exclusive
    }

    /// Set whether the action participates in a radio-exclusive group with
    /// adjacent exclusive actions.
    pub fn set_exclusive(&self, exclusive: bool) -> WeldResult<()> {
        {
            let mut state = self.state.write();
            if state.exclusive == exclusive {
                return Ok(());
            }
            state.exclusive = exclusive;
        }
        self.notify_changed()
    }

    /// Builder pattern for setting the exclusive flag.
    pub fn with_exclusive(self, exclusive: bool) -> Self {
        self.state.write().exclusive = exclusive;
        self
    }

    // ========================================================================
    // Activation
    // ========================================================================

    /// Invoke the trigger notification.
    ///
    /// This is what click routing calls when the action's native button is
    /// clicked; applications may also call it to activate the action
    /// programmatically. Disabled actions swallow the trigger.
    pub fn trigger(&self) {
        if !self.is_enabled() {
            return;
        }
        tracing::trace!(
            target: "horizon_weld::action",
            id = %self.object_id(),
            "action triggered"
        );
        self.triggered.emit(self.is_checked());
    }

    // ========================================================================
    // Change Channel
    // ========================================================================

    /// Subscribe a handler to this action's change channel.
    ///
    /// The subscription is keyed by the handler's identity; subscribing the
    /// same handler twice is a no-op.
    pub fn add_changed_handler(&self, handler: &Arc<dyn ActionChangedHandler>) {
        let subscriber = handler.object_id();
        let mut handlers = self.changed_handlers.write();
        if handlers.iter().any(|s| s.subscriber == subscriber) {
            return;
        }
        handlers.push(ChangedSubscription {
            subscriber,
            handler: Arc::downgrade(handler),
        });
    }

    /// Remove the subscription keyed by `subscriber`.
    pub fn remove_changed_handler(&self, subscriber: ObjectId) {
        self.changed_handlers
            .write()
            .retain(|s| s.subscriber != subscriber);
    }

    /// Number of live change subscriptions.
    pub fn changed_handler_count(&self) -> usize {
        self.changed_handlers.read().len()
    }

    /// Invoke all change handlers, stopping at the first failure.
    ///
    /// Handlers run outside the subscription lock so they may re-enter the
    /// action. Dead subscriptions are pruned along the way.
    fn notify_changed(&self) -> WeldResult<()> {
        let handlers: Vec<Arc<dyn ActionChangedHandler>> = {
            let mut subscriptions = self.changed_handlers.write();
            subscriptions.retain(|s| s.handler.strong_count() > 0);
            subscriptions
                .iter()
                .filter_map(|s| s.handler.upgrade())
                .collect()
        };
        for handler in handlers {
            handler.on_action_changed(self)?;
        }
        Ok(())
    }
}

impl Object for Action {
    fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }
}
