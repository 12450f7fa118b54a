//! Ordered, observable collections of actions.
//!
//! An [`ActionList`] is the mutable model behind a toolbar: the owner adds,
//! inserts, and removes actions, and the widget that renders the list
//! observes every mutation through [`ActionListObserver`].
//!
//! # Observer contract
//!
//! Before-hooks (`on_inserting_action`, `on_removing_action`,
//! `on_clearing_actions`) run *before* the list mutates and are fallible: an
//! error vetoes the mutation, the list is left exactly as it was, and the
//! error is returned to the caller. After-hooks run once the list has
//! mutated and are plain notifications.
//!
//! [`clear`](ActionList::clear) removes items one at a time from the highest
//! index down to zero, invoking the remove hooks for each. Native button
//! arrays shift indices on removal, so the descending order guarantees that
//! a pending index is never invalidated. If a removal is vetoed partway
//! through, the surviving prefix is intact on both sides of the observer.

use std::sync::{Arc, Weak};

use horizon_weld_core::Object;
use parking_lot::RwLock;

use crate::error::{WeldError, WeldResult};
use crate::widget::action::Action;

/// Observer for action list mutations.
///
/// All hooks have no-op defaults; implementors override the ones they care
/// about.
pub trait ActionListObserver: Send + Sync {
    /// About to insert `action` at `index`. An error vetoes the insertion.
    fn on_inserting_action(&self, index: usize, action: &Arc<Action>) -> WeldResult<()> {
        let _ = (index, action);
        Ok(())
    }

    /// `action` was inserted at `index`.
    fn on_inserted_action(&self, index: usize, action: &Arc<Action>) {
        let _ = (index, action);
    }

    /// About to remove `action` from `index`. An error vetoes the removal.
    fn on_removing_action(&self, index: usize, action: &Arc<Action>) -> WeldResult<()> {
        let _ = (index, action);
        Ok(())
    }

    /// `action` was removed from `index`.
    fn on_removed_action(&self, index: usize, action: &Arc<Action>) {
        let _ = (index, action);
    }

    /// A clear sweep is starting. An error vetoes it before any removal.
    fn on_clearing_actions(&self) -> WeldResult<()> {
        Ok(())
    }

    /// A clear sweep ran to completion.
    fn on_cleared_actions(&self) {}
}

/// An ordered, mutable collection of actions with lifecycle notifications.
///
/// All methods take `&self`; the list is internally synchronized so the
/// observer (and code it calls back into) can hold references to it.
pub struct ActionList {
    items: RwLock<Vec<Arc<Action>>>,
    observer: RwLock<Option<Weak<dyn ActionListObserver>>>,
}

impl ActionList {
    /// Create an empty list with no observer.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            observer: RwLock::new(None),
        }
    }

    /// Install the observer. At most one observer is supported; installing
    /// replaces any previous one.
    pub fn set_observer(&self, observer: Weak<dyn ActionListObserver>) {
        *self.observer.write() = Some(observer);
    }

    fn observer(&self) -> Option<Arc<dyn ActionListObserver>> {
        self.observer.read().as_ref().and_then(Weak::upgrade)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Append an action to the end of the list.
    pub fn add(&self, action: Arc<Action>) -> WeldResult<()> {
        let index = self.len();
        self.insert(index, action)
    }

    /// Insert an action at `index`.
    ///
    /// Fails with [`WeldError::IndexOutOfRange`] if `index > len()`, or with
    /// the observer's error if the insertion is vetoed, in which case the
    /// list is unchanged.
    pub fn insert(&self, index: usize, action: Arc<Action>) -> WeldResult<()> {
        let len = self.len();
        if index > len {
            return Err(WeldError::IndexOutOfRange { index, len });
        }
        if let Some(observer) = self.observer() {
            observer.on_inserting_action(index, &action)?;
        }
        self.items.write().insert(index, action.clone());
        if let Some(observer) = self.observer() {
            observer.on_inserted_action(index, &action);
        }
        Ok(())
    }

    /// Remove and return the action at `index`.
    ///
    /// Fails with [`WeldError::IndexOutOfRange`] for an invalid index, or
    /// with the observer's error if the removal is vetoed, in which case
    /// the list is unchanged.
    pub fn remove_at(&self, index: usize) -> WeldResult<Arc<Action>> {
        let action = {
            let items = self.items.read();
            items
                .get(index)
                .cloned()
                .ok_or(WeldError::IndexOutOfRange {
                    index,
                    len: items.len(),
                })?
        };
        if let Some(observer) = self.observer() {
            observer.on_removing_action(index, &action)?;
        }
        self.items.write().remove(index);
        if let Some(observer) = self.observer() {
            observer.on_removed_action(index, &action);
        }
        Ok(action)
    }

    /// Remove the given action from the list.
    ///
    /// Fails with [`WeldError::ActionNotFound`] if the action is not a
    /// member.
    pub fn remove(&self, action: &Arc<Action>) -> WeldResult<()> {
        let index = self.index_of(action).ok_or(WeldError::ActionNotFound)?;
        self.remove_at(index)?;
        Ok(())
    }

    /// Remove every action, from the highest index down to zero.
    ///
    /// Stops at the first vetoed removal and returns its error; actions not
    /// yet removed stay in the list.
    pub fn clear(&self) -> WeldResult<()> {
        if let Some(observer) = self.observer() {
            observer.on_clearing_actions()?;
        }
        loop {
            let index = match self.len().checked_sub(1) {
                Some(index) => index,
                None => break,
            };
            self.remove_at(index)?;
        }
        if let Some(observer) = self.observer() {
            observer.on_cleared_actions();
        }
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of actions in the list.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Get the action at `index`, if present.
    pub fn at(&self, index: usize) -> Option<Arc<Action>> {
        self.items.read().get(index).cloned()
    }

    /// Find the index of an action by identity.
    pub fn index_of(&self, action: &Arc<Action>) -> Option<usize> {
        self.items
            .read()
            .iter()
            .position(|a| a.object_id() == action.object_id())
    }

    /// Check if the action is a member of the list.
    pub fn contains(&self, action: &Arc<Action>) -> bool {
        self.index_of(action).is_some()
    }

    /// Get a snapshot of all actions in order.
    pub fn actions(&self) -> Vec<Arc<Action>> {
        self.items.read().clone()
    }
}

impl Default for ActionList {
    fn default() -> Self {
        Self::new()
    }
}
