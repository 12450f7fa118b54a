//! ToolBar widget implementation.
//!
//! This module provides [`ToolBar`], a wrapper that presents an
//! [`ActionList`] as a native toolbar control. The widget itself draws
//! nothing: the native control owns rendering and hit-testing, and the
//! toolbar's job is to keep the control's button array index-isomorphic to
//! the action list across every mutation, and to route native click
//! notifications back into action triggers.
//!
//! # Synchronization
//!
//! A private engine observes the action list and every attached action:
//!
//! - list insert → build a [`ButtonDescriptor`] → struct-size configure,
//!   positional insert, autosize
//! - list remove → positional delete
//! - action property change → rebuild the descriptor → in-place update
//! - list clear → positional deletes from the highest index downward
//!
//! Native commands run *before* the list mutates (the list's before-hooks),
//! so a rejected command leaves the abstract list untouched.
//!
//! # Click routing
//!
//! The control is subclassed at creation: [`ToolBar::window_proc`] sees
//! every message first, decodes click notifications, triggers the matching
//! action, and chains everything to the control's original procedure. Each
//! toolbar holds its own original-procedure reference, so any number of
//! toolbars can coexist.
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
//! let open = Arc::new(Action::new("Open"));
//! open.triggered.connect(|_| println!("open!"));
//!
//! tool_bar.actions().add(open)?;
//! # Ok::<(), horizon_weld::WeldError>(())
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::sync::{Arc, Weak};

use horizon_weld_core::{Object, ObjectBase, ObjectId};
use parking_lot::RwLock;

use crate::error::{WeldError, WeldResult};
use crate::geometry::{LayoutFlags, Orientation, Size};
use crate::image_list::{ImageIndexResolver, ImageList};
use crate::native::{
    ButtonDescriptor, ButtonState, ButtonStyle, Container, ControlStyle, InfoMask,
    SubclassedControl, ToolBarCommand, ToolBarControl, ToolBarNotification, WideText,
    WindowMessage, WindowProc,
};
use crate::widget::action::{Action, ActionChangedHandler};
use crate::widget::action_list::{ActionList, ActionListObserver};

/// Fallback button extent used by [`ToolBar::size_hint`].
// TODO: derive this from TB_GETBUTTONSIZE once the hosting layout engine
// can consume live measurements.
const DEFAULT_BUTTON_EXTENT: i32 = 44;

// ============================================================================
// ActionId
// ============================================================================

/// Identifies one action within one toolbar instance.
///
/// Ids are allocated from a per-toolbar counter at insertion time and become
/// the native button's command identifier, which is what click notifications
/// report back. An id is never reallocated within its toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(u16);

impl ActionId {
    /// The id as a native command identifier.
    pub fn command(self) -> u16 {
        self.0
    }

    /// Reconstruct an id from a native command identifier.
    pub fn from_command(raw: u16) -> Self {
        Self(raw)
    }
}

// ============================================================================
// Button state builder
// ============================================================================

/// Project an action into the native button fields.
///
/// Pure except for image resolution, which may insert into the attached
/// strip. Failure means nothing was written to the native control; the
/// caller aborts its operation.
pub(crate) fn build_button_descriptor(
    action: &Action,
    orientation: Orientation,
    id: ActionId,
    images: &ImageIndexResolver<'_>,
) -> WeldResult<ButtonDescriptor> {
    let mut state = ButtonState::NONE;
    let mut style = ButtonStyle::NONE;

    // Vertical bars wrap the label under the icon; horizontal bars let the
    // control size each button to its content.
    if orientation.is_vertical() {
        state |= ButtonState::WRAP;
    } else {
        style |= ButtonStyle::AUTOSIZE;
    }

    if action.is_checked() {
        state |= ButtonState::CHECKED;
    }
    if action.is_enabled() {
        state |= ButtonState::ENABLED;
    }
    if action.is_checkable() {
        style |= ButtonStyle::CHECK;
    }
    if action.is_exclusive() {
        style |= ButtonStyle::GROUP;
    }

    let image = images.resolve(action.image().as_ref())?;

    Ok(ButtonDescriptor {
        id_command: id.command(),
        state,
        style,
        image,
        text: WideText::new(&action.text()),
    })
}

// ============================================================================
// Synchronization engine
// ============================================================================

/// Keeps one native control's button array in lockstep with an action list.
///
/// The engine is the list's observer and each attached action's change
/// handler; it owns the id registry used to dispatch native clicks back to
/// actions. All of its state is scoped to the owning toolbar instance.
struct ToolBarSyncEngine {
    /// Object system integration; the id doubles as the change-channel
    /// subscription key.
    object_base: ObjectBase,

    /// The native control's command surface.
    control: Arc<dyn ToolBarControl>,

    /// Fixed at construction, drives descriptor building.
    orientation: Orientation,

    /// The strip images are resolved against. Referenced, never owned.
    image_list: RwLock<Option<Arc<ImageList>>>,

    /// Command id to action, for click dispatch.
    registry: RwLock<HashMap<ActionId, Weak<Action>>>,

    /// Action identity to its assigned command id.
    attachments: RwLock<HashMap<ObjectId, ActionId>>,

    /// Next command id to hand out. Ids start at 1 and are never reused.
    next_id: AtomicU16,

    /// Whether the control has ever shown a button. One-way.
    populated: AtomicBool,

    /// Back-reference for subscribing self as a change handler.
    self_weak: Weak<ToolBarSyncEngine>,
}

impl ToolBarSyncEngine {
    fn new(control: Arc<dyn ToolBarControl>, orientation: Orientation) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            object_base: ObjectBase::new::<Self>(),
            control,
            orientation,
            image_list: RwLock::new(None),
            registry: RwLock::new(HashMap::new()),
            attachments: RwLock::new(HashMap::new()),
            next_id: AtomicU16::new(1),
            populated: AtomicBool::new(false),
            self_weak: weak.clone(),
        })
    }

    fn allocate_id(&self) -> ActionId {
        ActionId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn build_button(&self, action: &Action, id: ActionId) -> WeldResult<ButtonDescriptor> {
        let image_list = self.image_list.read();
        let resolver = ImageIndexResolver::new(image_list.as_deref());
        build_button_descriptor(action, self.orientation, id, &resolver)
    }

    fn set_image_list(&self, list: Option<Arc<ImageList>>) {
        self.control
            .set_image_list(list.as_ref().map(|l| l.native_handle()));
        *self.image_list.write() = list;
    }

    fn image_list(&self) -> Option<Arc<ImageList>> {
        self.image_list.read().clone()
    }

    fn set_button_width(&self, min: u16, max: u16) -> WeldResult<()> {
        self.control
            .send_command(ToolBarCommand::SetButtonWidth { min, max })
    }

    /// Drop the action's id registration and change subscription.
    fn detach(&self, action: &Action) {
        if let Some(id) = self.attachments.write().remove(&action.object_id()) {
            self.registry.write().remove(&id);
        }
        action.remove_changed_handler(self.object_id());
    }

    /// Dispatch a native click to the action registered under `id_command`.
    ///
    /// Unknown ids are ignored: the notification may belong to a control
    /// this toolbar does not track.
    fn route_click(&self, id_command: u16) {
        let action = {
            let registry = self.registry.read();
            registry
                .get(&ActionId::from_command(id_command))
                .and_then(Weak::upgrade)
        };
        match action {
            Some(action) => {
                tracing::trace!(
                    target: "horizon_weld::tool_bar",
                    id_command,
                    "routing click to action"
                );
                action.trigger();
            }
            None => {
                tracing::trace!(
                    target: "horizon_weld::tool_bar",
                    id_command,
                    "ignoring click for untracked command id"
                );
            }
        }
    }
}

impl ActionListObserver for ToolBarSyncEngine {
    fn on_inserting_action(&self, index: usize, action: &Arc<Action>) -> WeldResult<()> {
        let id = self.allocate_id();
        let button = self.build_button(action, id)?;

        if !self.populated.load(Ordering::Relaxed) {
            self.control.set_visible(true);
        }
        self.control
            .send_command(ToolBarCommand::SetButtonStructSize)?;
        self.control.send_command(ToolBarCommand::InsertButton {
            index,
            button: &button,
        })?;
        // TB_AUTOSIZE carries no failure signal.
        let _ = self.control.send_command(ToolBarCommand::AutoSize);
        self.populated.store(true, Ordering::Relaxed);

        self.registry.write().insert(id, Arc::downgrade(action));
        self.attachments.write().insert(action.object_id(), id);
        if let Some(engine) = self.self_weak.upgrade() {
            let handler: Arc<dyn ActionChangedHandler> = engine;
            action.add_changed_handler(&handler);
        }

        tracing::trace!(
            target: "horizon_weld::tool_bar",
            index,
            id_command = id.command(),
            "inserted action button"
        );
        Ok(())
    }

    fn on_removing_action(&self, index: usize, action: &Arc<Action>) -> WeldResult<()> {
        self.control
            .send_command(ToolBarCommand::DeleteButton { index })?;
        self.detach(action);
        tracing::trace!(
            target: "horizon_weld::tool_bar",
            index,
            "removed action button"
        );
        Ok(())
    }

    fn on_clearing_actions(&self) -> WeldResult<()> {
        tracing::trace!(
            target: "horizon_weld::tool_bar",
            "clearing action buttons"
        );
        Ok(())
    }
}

impl ActionChangedHandler for ToolBarSyncEngine {
    fn on_action_changed(&self, action: &Action) -> WeldResult<()> {
        let id = match self.attachments.read().get(&action.object_id()).copied() {
            Some(id) => id,
            // A change raced a detach; nothing to update.
            None => return Ok(()),
        };
        let info = self.build_button(action, id)?;
        self.control.send_command(ToolBarCommand::SetButtonInfo {
            id_command: id.command(),
            info: &info,
            mask: InfoMask::ALL,
        })?;
        tracing::trace!(
            target: "horizon_weld::tool_bar",
            id_command = id.command(),
            "updated action button"
        );
        Ok(())
    }
}

impl Object for ToolBarSyncEngine {
    fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }
}

// ============================================================================
// ToolBar
// ============================================================================

/// A native toolbar presenting an action list.
///
/// Construction creates (and subclasses) the native child control inside
/// the given parent. The owner mutates [`actions()`](Self::actions); every
/// mutation is reflected into the control before it returns.
pub struct ToolBar {
    engine: Arc<ToolBarSyncEngine>,
    actions: Arc<ActionList>,
    original_proc: Arc<dyn WindowProc>,
    orientation: Orientation,
    min_button_width: u16,
    max_button_width: u16,
}

impl ToolBar {
    /// Create a horizontal toolbar as a child of `parent`.
    pub fn new(parent: &dyn Container) -> WeldResult<Self> {
        Self::with_style(parent, ControlStyle::NO_DIVIDER | ControlStyle::WRAPABLE)
    }

    /// Create a vertical toolbar as a child of `parent`.
    pub fn vertical(parent: &dyn Container) -> WeldResult<Self> {
        Self::with_style(
            parent,
            ControlStyle::NO_DIVIDER | ControlStyle::VERTICAL | ControlStyle::NO_RESIZE,
        )
    }

    fn with_style(parent: &dyn Container, style: ControlStyle) -> WeldResult<Self> {
        let SubclassedControl {
            control,
            original_proc,
        } = parent.create_tool_bar(style)?;

        let orientation = if style.contains(ControlStyle::VERTICAL) {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };

        let engine = ToolBarSyncEngine::new(control, orientation);
        let actions = Arc::new(ActionList::new());
        let engine_dyn: Arc<dyn ActionListObserver> = engine.clone();
        let observer: Weak<dyn ActionListObserver> = Arc::downgrade(&engine_dyn);
        actions.set_observer(observer);

        Ok(Self {
            engine,
            actions,
            original_proc,
            orientation,
            min_button_width: 0,
            max_button_width: 0,
        })
    }

    // =========================================================================
    // Model access
    // =========================================================================

    /// The action list this toolbar renders. Mutate it to change the bar.
    pub fn actions(&self) -> &Arc<ActionList> {
        &self.actions
    }

    /// The orientation fixed at construction.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    // =========================================================================
    // Image list
    // =========================================================================

    /// The image strip actions resolve their images against.
    pub fn image_list(&self) -> Option<Arc<ImageList>> {
        self.engine.image_list()
    }

    /// Attach an image strip (or detach with `None`).
    ///
    /// The native control receives only the strip's handle; the strip stays
    /// owned by the caller.
    pub fn set_image_list(&mut self, list: Option<Arc<ImageList>>) {
        self.engine.set_image_list(list);
    }

    // =========================================================================
    // Button width limits
    // =========================================================================

    /// The configured minimum and maximum button widths.
    pub fn button_width_limits(&self) -> (u16, u16) {
        (self.min_button_width, self.max_button_width)
    }

    /// Configure minimum and maximum button widths.
    ///
    /// Fails if `min > max` or if the native control rejects the command;
    /// in either case the stored limits are unchanged.
    pub fn set_button_width_limits(&mut self, min: u16, max: u16) -> WeldResult<()> {
        if min > max {
            return Err(WeldError::InvalidWidthLimits { min, max });
        }
        self.engine.set_button_width(min, max)?;
        self.min_button_width = min;
        self.max_button_width = max;
        Ok(())
    }

    // =========================================================================
    // Layout participation
    // =========================================================================

    /// Stretch participation advertised to the hosting layout.
    ///
    /// Horizontal bars advertise none: a growable bar starves its siblings
    /// in box layouts.
    pub fn layout_flags(&self) -> LayoutFlags {
        match self.orientation {
            Orientation::Vertical => {
                LayoutFlags::SHRINKABLE_VERT | LayoutFlags::GROWABLE_VERT | LayoutFlags::GREEDY_VERT
            }
            Orientation::Horizontal => LayoutFlags::NONE,
        }
    }

    /// Preferred size for the hosting layout.
    ///
    /// An empty toolbar reserves no space.
    pub fn size_hint(&self) -> Size {
        if self.actions.is_empty() {
            return Size::ZERO;
        }

        if self.orientation.is_vertical() && self.min_button_width > 0 {
            return Size::new(i32::from(self.min_button_width), DEFAULT_BUTTON_EXTENT);
        }

        Size::new(DEFAULT_BUTTON_EXTENT, DEFAULT_BUTTON_EXTENT)
    }

    // =========================================================================
    // Message procedure
    // =========================================================================

    /// The subclassed message procedure entry point.
    ///
    /// Click notifications are decoded and routed to the registered action;
    /// every message is then chained to this instance's original
    /// procedure, handled or not, because the native control expects its
    /// own procedure to run.
    pub fn window_proc(&self, message: &WindowMessage) -> isize {
        if let WindowMessage::Notify(notification) = message {
            if let Some(ToolBarNotification::Clicked { id_command }) = notification.decode() {
                self.engine.route_click(id_command);
            }
        }
        self.original_proc.handle_message(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_list::Bitmap;
    use crate::native::Notification;
    use crate::native::comctl;
    use crate::native::headless::{CreatedToolBar, HeadlessContainer};
    use image::Rgba;
    use parking_lot::Mutex;

    fn horizontal_fixture() -> (ToolBar, CreatedToolBar) {
        let parent = HeadlessContainer::new();
        let tool_bar = ToolBar::new(&parent).unwrap();
        let created = parent.last_created().unwrap();
        (tool_bar, created)
    }

    fn vertical_fixture() -> (ToolBar, CreatedToolBar) {
        let parent = HeadlessContainer::new();
        let tool_bar = ToolBar::vertical(&parent).unwrap();
        let created = parent.last_created().unwrap();
        (tool_bar, created)
    }

    // -------------------------------------------------------------------------
    // Descriptor building
    // -------------------------------------------------------------------------

    #[test]
    fn test_descriptor_horizontal_autosizes_without_wrap() {
        let action = Action::new("Open");
        let resolver = ImageIndexResolver::new(None);
        let descriptor = build_button_descriptor(
            &action,
            Orientation::Horizontal,
            ActionId::from_command(1),
            &resolver,
        )
        .unwrap();

        assert!(descriptor.style.contains(ButtonStyle::AUTOSIZE));
        assert!(!descriptor.state.contains(ButtonState::WRAP));
        assert_eq!(descriptor.image, -1);
        assert_eq!(descriptor.text.to_string_lossy(), "Open");
    }

    #[test]
    fn test_descriptor_vertical_wraps_without_autosize() {
        let action = Action::new("Open");
        let resolver = ImageIndexResolver::new(None);
        let descriptor = build_button_descriptor(
            &action,
            Orientation::Vertical,
            ActionId::from_command(1),
            &resolver,
        )
        .unwrap();

        assert!(descriptor.state.contains(ButtonState::WRAP));
        assert!(!descriptor.style.contains(ButtonStyle::AUTOSIZE));
    }

    #[test]
    fn test_descriptor_reflects_action_flags() {
        let action = Action::new("Bold")
            .with_checkable(true)
            .with_checked(true)
            .with_exclusive(true)
            .with_enabled(false);
        let resolver = ImageIndexResolver::new(None);
        let descriptor = build_button_descriptor(
            &action,
            Orientation::Horizontal,
            ActionId::from_command(3),
            &resolver,
        )
        .unwrap();

        assert_eq!(descriptor.id_command, 3);
        assert!(descriptor.state.contains(ButtonState::CHECKED));
        assert!(!descriptor.state.contains(ButtonState::ENABLED));
        assert!(descriptor.style.contains(ButtonStyle::CHECK));
        assert!(descriptor.style.contains(ButtonStyle::GROUP));
    }

    // -------------------------------------------------------------------------
    // Insert / remove / clear synchronization
    // -------------------------------------------------------------------------

    #[test]
    fn test_first_insert_shows_control_and_configures() {
        let (tool_bar, created) = horizontal_fixture();
        assert!(!created.control.is_visible());

        tool_bar.actions().add(Arc::new(Action::new("a"))).unwrap();

        assert!(created.control.is_visible());
        assert_eq!(
            created.control.command_names(),
            vec!["TB_BUTTONSTRUCTSIZE", "TB_INSERTBUTTON", "TB_AUTOSIZE"]
        );
        assert!(created.control.struct_size_declared());
    }

    #[test]
    fn test_button_count_tracks_list_length() {
        let (tool_bar, created) = horizontal_fixture();
        let actions = tool_bar.actions();

        actions.add(Arc::new(Action::new("a"))).unwrap();
        assert_eq!(created.control.buttons().len(), actions.len());

        actions.insert(0, Arc::new(Action::new("b"))).unwrap();
        assert_eq!(created.control.buttons().len(), actions.len());

        actions.remove_at(1).unwrap();
        assert_eq!(created.control.buttons().len(), actions.len());

        actions.add(Arc::new(Action::new("c"))).unwrap();
        actions.clear().unwrap();
        assert_eq!(created.control.buttons().len(), 0);
        assert_eq!(actions.len(), 0);
    }

    #[test]
    fn test_insert_position_matches_list_position() {
        let (tool_bar, created) = horizontal_fixture();
        let actions = tool_bar.actions();

        actions.add(Arc::new(Action::new("b"))).unwrap();
        actions.insert(0, Arc::new(Action::new("a"))).unwrap();

        let buttons = created.control.buttons();
        assert_eq!(buttons[0].text, "a");
        assert_eq!(buttons[1].text, "b");
    }

    #[test]
    fn test_rejected_insert_rolls_back() {
        let (tool_bar, created) = horizontal_fixture();
        created.control.reject_next("TB_INSERTBUTTON");

        let action = Arc::new(Action::new("a"));
        let err = tool_bar.actions().add(action.clone()).unwrap_err();
        assert!(matches!(
            err,
            WeldError::CommandRejected("TB_INSERTBUTTON")
        ));

        assert!(tool_bar.actions().is_empty());
        assert!(created.control.buttons().is_empty());
        // The failed insert left no subscription behind: a later change
        // issues no update command.
        action.set_text("b").unwrap();
        assert!(
            !created
                .control
                .command_names()
                .contains(&"TB_SETBUTTONINFO")
        );
    }

    #[test]
    fn test_rejected_remove_keeps_subscription() {
        let (tool_bar, created) = horizontal_fixture();
        let action = Arc::new(Action::new("a"));
        tool_bar.actions().add(action.clone()).unwrap();

        created.control.reject_next("TB_DELETEBUTTON");
        let err = tool_bar.actions().remove_at(0).unwrap_err();
        assert!(matches!(err, WeldError::CommandRejected(_)));

        assert_eq!(tool_bar.actions().len(), 1);
        assert_eq!(created.control.buttons().len(), 1);

        // Still attached: a change flows through.
        action.set_enabled(false).unwrap();
        assert!(!created.control.buttons()[0].state.contains(ButtonState::ENABLED));
    }

    #[test]
    fn test_clear_deletes_descending() {
        let (tool_bar, created) = horizontal_fixture();
        tool_bar.actions().add(Arc::new(Action::new("a"))).unwrap();
        tool_bar.actions().add(Arc::new(Action::new("b"))).unwrap();

        tool_bar.actions().clear().unwrap();

        let deletes: Vec<Option<usize>> = created
            .control
            .commands()
            .iter()
            .filter(|record| record.name == "TB_DELETEBUTTON")
            .map(|record| record.index)
            .collect();
        assert_eq!(deletes, vec![Some(1), Some(0)]);
    }

    #[test]
    fn test_removed_action_no_longer_updates() {
        let (tool_bar, created) = horizontal_fixture();
        let action = Arc::new(Action::new("a"));
        tool_bar.actions().add(action.clone()).unwrap();
        tool_bar.actions().remove_at(0).unwrap();

        action.set_text("b").unwrap();
        assert!(
            !created
                .control
                .command_names()
                .contains(&"TB_SETBUTTONINFO")
        );
    }

    // -------------------------------------------------------------------------
    // Change propagation
    // -------------------------------------------------------------------------

    #[test]
    fn test_enable_toggle_issues_exactly_one_update() {
        let (tool_bar, created) = horizontal_fixture();
        let action = Arc::new(Action::new("a").with_enabled(false));
        tool_bar.actions().add(action.clone()).unwrap();
        assert!(!created.control.buttons()[0].state.contains(ButtonState::ENABLED));

        action.set_enabled(true).unwrap();

        let updates = created
            .control
            .command_names()
            .iter()
            .filter(|&&name| name == "TB_SETBUTTONINFO")
            .count();
        assert_eq!(updates, 1);
        assert!(created.control.buttons()[0].state.contains(ButtonState::ENABLED));
    }

    #[test]
    fn test_text_change_reaches_native_button() {
        let (tool_bar, created) = horizontal_fixture();
        let action = Arc::new(Action::new("Open"));
        tool_bar.actions().add(action.clone()).unwrap();

        action.set_text("Open File").unwrap();
        assert_eq!(created.control.buttons()[0].text, "Open File");
    }

    #[test]
    fn test_rejected_update_surfaces_from_setter() {
        let (tool_bar, created) = horizontal_fixture();
        let action = Arc::new(Action::new("a"));
        tool_bar.actions().add(action.clone()).unwrap();

        created.control.reject_next("TB_SETBUTTONINFO");
        let err = action.set_text("b").unwrap_err();
        assert!(matches!(
            err,
            WeldError::CommandRejected("TB_SETBUTTONINFO")
        ));
    }

    // -------------------------------------------------------------------------
    // Images
    // -------------------------------------------------------------------------

    #[test]
    fn test_images_resolve_without_deduplication() {
        let (mut tool_bar, created) = horizontal_fixture();
        let strip = Arc::new(ImageList::new(16, 16));
        tool_bar.set_image_list(Some(strip.clone()));

        let bitmap = Bitmap::solid(16, 16, Rgba([9, 9, 9, 255]));
        tool_bar
            .actions()
            .add(Arc::new(Action::new("a").with_image(bitmap.clone())))
            .unwrap();
        tool_bar
            .actions()
            .add(Arc::new(Action::new("b").with_image(bitmap)))
            .unwrap();

        let buttons = created.control.buttons();
        assert_eq!(buttons[0].image, 0);
        assert_eq!(buttons[1].image, 1);
        assert_eq!(strip.len(), 2);
    }

    #[test]
    fn test_image_without_strip_aborts_insert() {
        let (tool_bar, created) = horizontal_fixture();
        let bitmap = Bitmap::solid(16, 16, Rgba([9, 9, 9, 255]));

        let err = tool_bar
            .actions()
            .add(Arc::new(Action::new("a").with_image(bitmap)))
            .unwrap_err();
        assert!(matches!(err, WeldError::ImageListMissing));
        assert!(tool_bar.actions().is_empty());
        // Resolution failed before any native command was issued.
        assert!(created.control.commands().is_empty());
    }

    #[test]
    fn test_wrong_cell_size_aborts_insert() {
        let (mut tool_bar, created) = horizontal_fixture();
        tool_bar.set_image_list(Some(Arc::new(ImageList::new(16, 16))));
        let bitmap = Bitmap::solid(8, 8, Rgba([9, 9, 9, 255]));

        let err = tool_bar
            .actions()
            .add(Arc::new(Action::new("a").with_image(bitmap)))
            .unwrap_err();
        assert!(matches!(err, WeldError::ImageList(_)));
        assert!(tool_bar.actions().is_empty());
        assert!(created.control.buttons().is_empty());
    }

    #[test]
    fn test_set_image_list_passes_handle() {
        let (mut tool_bar, created) = horizontal_fixture();
        let strip = Arc::new(ImageList::new(16, 16));

        tool_bar.set_image_list(Some(strip.clone()));
        assert_eq!(created.control.image_list(), Some(strip.native_handle()));
        assert!(created.control.command_names().contains(&"TB_SETIMAGELIST"));

        tool_bar.set_image_list(None);
        assert_eq!(created.control.image_list(), None);
        assert!(tool_bar.image_list().is_none());
    }

    // -------------------------------------------------------------------------
    // Click routing
    // -------------------------------------------------------------------------

    #[test]
    fn test_click_triggers_registered_action() {
        let (tool_bar, created) = horizontal_fixture();
        let action = Arc::new(Action::new("a"));
        let fired = Arc::new(Mutex::new(0));

        let fired_clone = fired.clone();
        action.triggered.connect(move |_| {
            *fired_clone.lock() += 1;
        });
        tool_bar.actions().add(action).unwrap();

        let id_command = created.control.buttons()[0].id_command;
        let message = WindowMessage::Notify(Notification {
            code: comctl::NM_CLICK,
            item: id_command as usize,
        });
        tool_bar.window_proc(&message);

        assert_eq!(*fired.lock(), 1);
        // Handled messages still chain to the original procedure.
        assert_eq!(created.original_proc.received(), vec![message]);
    }

    #[test]
    fn test_unknown_click_is_ignored() {
        let (tool_bar, created) = horizontal_fixture();
        let action = Arc::new(Action::new("a"));
        let fired = Arc::new(Mutex::new(0));

        let fired_clone = fired.clone();
        action.triggered.connect(move |_| {
            *fired_clone.lock() += 1;
        });
        tool_bar.actions().add(action).unwrap();

        let message = WindowMessage::Notify(Notification {
            code: comctl::NM_CLICK,
            item: 9999,
        });
        tool_bar.window_proc(&message);

        assert_eq!(*fired.lock(), 0);
        assert_eq!(created.original_proc.received(), vec![message]);
    }

    #[test]
    fn test_unrecognized_messages_are_forwarded_unmodified() {
        let (tool_bar, created) = horizontal_fixture();

        let other = WindowMessage::Other {
            message: 0x0005, // WM_SIZE
            wparam: 0,
            lparam: 0,
        };
        let unknown_notify = WindowMessage::Notify(Notification { code: 0, item: 0 });
        tool_bar.window_proc(&other);
        tool_bar.window_proc(&unknown_notify);

        assert_eq!(
            created.original_proc.received(),
            vec![other, unknown_notify]
        );
    }

    #[test]
    fn test_two_toolbars_have_independent_chains() {
        let parent = HeadlessContainer::new();
        let first = ToolBar::new(&parent).unwrap();
        let first_created = parent.last_created().unwrap();
        let second = ToolBar::new(&parent).unwrap();
        let second_created = parent.last_created().unwrap();

        let message = WindowMessage::Other {
            message: 0x0005,
            wparam: 0,
            lparam: 0,
        };
        first.window_proc(&message);

        assert_eq!(first_created.original_proc.received().len(), 1);
        assert!(second_created.original_proc.received().is_empty());
        drop(second);
    }

    #[test]
    fn test_trigger_handler_may_mutate_the_list() {
        let (tool_bar, created) = horizontal_fixture();
        let action = Arc::new(Action::new("a"));
        let actions = tool_bar.actions().clone();

        action.triggered.connect(move |_| {
            actions.add(Arc::new(Action::new("spawned"))).unwrap();
        });
        tool_bar.actions().add(action).unwrap();

        let id_command = created.control.buttons()[0].id_command;
        tool_bar.window_proc(&WindowMessage::Notify(Notification {
            code: comctl::NM_CLICK,
            item: id_command as usize,
        }));

        assert_eq!(tool_bar.actions().len(), 2);
        assert_eq!(created.control.buttons().len(), 2);
        assert_eq!(created.control.buttons()[1].text, "spawned");
    }

    // -------------------------------------------------------------------------
    // Width limits and sizing
    // -------------------------------------------------------------------------

    #[test]
    fn test_button_width_limits_stored_on_success() {
        let (mut tool_bar, created) = horizontal_fixture();
        tool_bar.set_button_width_limits(10, 50).unwrap();
        assert_eq!(tool_bar.button_width_limits(), (10, 50));
        assert_eq!(created.control.button_width(), Some((10, 50)));
    }

    #[test]
    fn test_rejected_width_limits_keep_prior_values() {
        let (mut tool_bar, created) = horizontal_fixture();
        tool_bar.set_button_width_limits(10, 50).unwrap();

        created.control.reject_next("TB_SETBUTTONWIDTH");
        let err = tool_bar.set_button_width_limits(20, 60).unwrap_err();
        assert!(matches!(
            err,
            WeldError::CommandRejected("TB_SETBUTTONWIDTH")
        ));
        assert_eq!(tool_bar.button_width_limits(), (10, 50));
    }

    #[test]
    fn test_inverted_width_limits_fail_before_any_command() {
        let (mut tool_bar, created) = horizontal_fixture();
        let err = tool_bar.set_button_width_limits(50, 10).unwrap_err();
        assert!(matches!(
            err,
            WeldError::InvalidWidthLimits { min: 50, max: 10 }
        ));
        assert!(created.control.commands().is_empty());
    }

    #[test]
    fn test_size_hint_is_zero_when_empty() {
        let (tool_bar, _created) = horizontal_fixture();
        assert_eq!(tool_bar.size_hint(), Size::ZERO);

        let (mut vertical, _created) = vertical_fixture();
        vertical.set_button_width_limits(80, 120).unwrap();
        assert_eq!(vertical.size_hint(), Size::ZERO);
    }

    #[test]
    fn test_size_hint_uses_min_width_when_vertical() {
        let (mut tool_bar, _created) = vertical_fixture();
        tool_bar.actions().add(Arc::new(Action::new("a"))).unwrap();

        assert_eq!(tool_bar.size_hint(), Size::new(44, 44));

        tool_bar.set_button_width_limits(80, 120).unwrap();
        assert_eq!(tool_bar.size_hint(), Size::new(80, 44));
    }

    #[test]
    fn test_size_hint_default_square_when_horizontal() {
        let (mut tool_bar, _created) = horizontal_fixture();
        tool_bar.actions().add(Arc::new(Action::new("a"))).unwrap();
        tool_bar.set_button_width_limits(80, 120).unwrap();

        assert_eq!(tool_bar.size_hint(), Size::new(44, 44));
    }

    #[test]
    fn test_layout_flags_by_orientation() {
        let (horizontal, _created) = horizontal_fixture();
        assert_eq!(horizontal.layout_flags(), LayoutFlags::NONE);

        let (vertical, _created) = vertical_fixture();
        let flags = vertical.layout_flags();
        assert!(flags.contains(LayoutFlags::SHRINKABLE_VERT));
        assert!(flags.contains(LayoutFlags::GROWABLE_VERT));
        assert!(flags.contains(LayoutFlags::GREEDY_VERT));
        assert!(!flags.contains(LayoutFlags::GROWABLE_HORZ));
    }

    // -------------------------------------------------------------------------
    // Orientation wiring
    // -------------------------------------------------------------------------

    #[test]
    fn test_creation_styles_select_orientation() {
        let parent = HeadlessContainer::new();
        let horizontal = ToolBar::new(&parent).unwrap();
        assert_eq!(horizontal.orientation(), Orientation::Horizontal);
        assert!(
            parent
                .last_created()
                .unwrap()
                .style
                .contains(ControlStyle::WRAPABLE)
        );

        let vertical = ToolBar::vertical(&parent).unwrap();
        assert_eq!(vertical.orientation(), Orientation::Vertical);
        let style = parent.last_created().unwrap().style;
        assert!(style.contains(ControlStyle::VERTICAL));
        assert!(style.contains(ControlStyle::NO_RESIZE));
    }

    #[test]
    fn test_vertical_buttons_wrap() {
        let (tool_bar, created) = vertical_fixture();
        tool_bar.actions().add(Arc::new(Action::new("a"))).unwrap();

        let button = &created.control.buttons()[0];
        assert!(button.state.contains(ButtonState::WRAP));
        assert!(!button.style.contains(ButtonStyle::AUTOSIZE));
    }
}
