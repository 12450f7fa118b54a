//! Headless reference host for the native command surface.
//!
//! [`HeadlessToolBar`] implements [`ToolBarControl`] over an in-process
//! button array: it applies every accepted command to simulated state and
//! appends a [`CommandRecord`] to a log, so tests can assert both the final
//! state and the exact order of issued commands. Rejections can be injected
//! per command name to exercise failure paths.
//!
//! [`HeadlessContainer`] creates headless controls the same way a real
//! parent window would create native ones, making the full widget layer
//! runnable on platforms without the native control.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{WeldError, WeldResult};
use crate::image_list::ImageListHandle;
use crate::native::{
    ButtonDescriptor, ButtonState, ButtonStyle, Container, ControlStyle, InfoMask,
    SubclassedControl, ToolBarCommand, ToolBarControl, WindowMessage, WindowProc, comctl,
};

/// One entry of the command log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    /// The wire message code that was issued.
    pub message: u32,
    /// The symbolic message name.
    pub name: &'static str,
    /// The button index, for positional commands.
    pub index: Option<usize>,
    /// The command id, for id-addressed commands.
    pub id_command: Option<u16>,
}

/// The simulated state of one button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedButton {
    /// Command id assigned at insertion.
    pub id_command: u16,
    /// Current state bits.
    pub state: ButtonState,
    /// Current style bits.
    pub style: ButtonStyle,
    /// Current image strip index (`-1` for none).
    pub image: i32,
    /// Current display text.
    pub text: String,
}

impl SimulatedButton {
    fn from_descriptor(descriptor: &ButtonDescriptor) -> Self {
        Self {
            id_command: descriptor.id_command,
            state: descriptor.state,
            style: descriptor.style,
            image: descriptor.image,
            text: descriptor.text.to_string_lossy(),
        }
    }
}

/// A queued rejection: fail the matching command after skipping
/// `remaining_skips` matches.
struct Rejection {
    name: &'static str,
    remaining_skips: usize,
}

#[derive(Default)]
struct ControlState {
    buttons: Vec<SimulatedButton>,
    visible: bool,
    image_list: Option<ImageListHandle>,
    button_width: Option<(u16, u16)>,
    struct_size_declared: bool,
    log: Vec<CommandRecord>,
    rejections: Vec<Rejection>,
}

/// An in-process toolbar control with a recorded command log.
#[derive(Default)]
pub struct HeadlessToolBar {
    state: Mutex<ControlState>,
}

impl HeadlessToolBar {
    /// Create a control with no buttons, hidden, with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the next occurrence of the named command.
    pub fn reject_next(&self, name: &'static str) {
        self.reject_nth(name, 0);
    }

    /// Reject the named command after letting `skip` occurrences through.
    pub fn reject_nth(&self, name: &'static str, skip: usize) {
        self.state.lock().rejections.push(Rejection {
            name,
            remaining_skips: skip,
        });
    }

    /// Snapshot of the simulated button array.
    pub fn buttons(&self) -> Vec<SimulatedButton> {
        self.state.lock().buttons.clone()
    }

    /// Snapshot of the full command log.
    pub fn commands(&self) -> Vec<CommandRecord> {
        self.state.lock().log.clone()
    }

    /// The names of all issued commands, in order.
    pub fn command_names(&self) -> Vec<&'static str> {
        self.state.lock().log.iter().map(|r| r.name).collect()
    }

    /// Whether the control is currently shown.
    pub fn is_visible(&self) -> bool {
        self.state.lock().visible
    }

    /// The currently attached image strip handle.
    pub fn image_list(&self) -> Option<ImageListHandle> {
        self.state.lock().image_list
    }

    /// The last accepted button width limits.
    pub fn button_width(&self) -> Option<(u16, u16)> {
        self.state.lock().button_width
    }

    /// Whether the button struct size has been declared.
    pub fn struct_size_declared(&self) -> bool {
        self.state.lock().struct_size_declared
    }

    fn record_of(command: &ToolBarCommand<'_>) -> CommandRecord {
        let (index, id_command) = match command {
            ToolBarCommand::InsertButton { index, .. } => (Some(*index), None),
            ToolBarCommand::DeleteButton { index } => (Some(*index), None),
            ToolBarCommand::SetButtonInfo { id_command, .. } => (None, Some(*id_command)),
            _ => (None, None),
        };
        CommandRecord {
            message: command.message(),
            name: command.name(),
            index,
            id_command,
        }
    }
}

impl ToolBarControl for HeadlessToolBar {
    fn send_command(&self, command: ToolBarCommand<'_>) -> WeldResult<()> {
        let mut state = self.state.lock();
        let name = command.name();
        state.log.push(Self::record_of(&command));

        if let Some(position) = state
            .rejections
            .iter()
            .position(|rejection| rejection.name == name)
        {
            if state.rejections[position].remaining_skips == 0 {
                state.rejections.remove(position);
                return Err(WeldError::CommandRejected(name));
            }
            state.rejections[position].remaining_skips -= 1;
        }

        match command {
            ToolBarCommand::SetButtonStructSize => {
                state.struct_size_declared = true;
            }
            ToolBarCommand::InsertButton { index, button } => {
                if index > state.buttons.len() {
                    return Err(WeldError::CommandRejected(name));
                }
                state
                    .buttons
                    .insert(index, SimulatedButton::from_descriptor(button));
            }
            ToolBarCommand::DeleteButton { index } => {
                if index >= state.buttons.len() {
                    return Err(WeldError::CommandRejected(name));
                }
                state.buttons.remove(index);
            }
            ToolBarCommand::SetButtonInfo {
                id_command,
                info,
                mask,
            } => {
                let Some(button) = state
                    .buttons
                    .iter_mut()
                    .find(|button| button.id_command == id_command)
                else {
                    return Err(WeldError::CommandRejected(name));
                };
                if mask.contains(InfoMask::IMAGE) {
                    button.image = info.image;
                }
                if mask.contains(InfoMask::TEXT) {
                    button.text = info.text.to_string_lossy();
                }
                if mask.contains(InfoMask::STATE) {
                    button.state = info.state;
                }
                if mask.contains(InfoMask::STYLE) {
                    button.style = info.style;
                }
            }
            ToolBarCommand::SetButtonWidth { min, max } => {
                state.button_width = Some((min, max));
            }
            ToolBarCommand::AutoSize => {}
        }

        Ok(())
    }

    fn set_image_list(&self, handle: Option<ImageListHandle>) {
        let mut state = self.state.lock();
        state.log.push(CommandRecord {
            message: comctl::TB_SETIMAGELIST,
            name: "TB_SETIMAGELIST",
            index: None,
            id_command: None,
        });
        state.image_list = handle;
    }

    fn set_visible(&self, visible: bool) {
        self.state.lock().visible = visible;
    }
}

/// The original window procedure of a headless control.
///
/// Returns `0` for every message and records what reached it, so chaining
/// behavior is observable.
#[derive(Default)]
pub struct BaseWindowProc {
    received: Mutex<Vec<WindowMessage>>,
}

impl BaseWindowProc {
    /// Create a procedure with an empty message log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every message forwarded here.
    pub fn received(&self) -> Vec<WindowMessage> {
        self.received.lock().clone()
    }
}

impl WindowProc for BaseWindowProc {
    fn handle_message(&self, message: &WindowMessage) -> isize {
        self.received.lock().push(message.clone());
        0
    }
}

/// A created control together with its original procedure and style.
#[derive(Clone)]
pub struct CreatedToolBar {
    /// The control's command surface.
    pub control: Arc<HeadlessToolBar>,
    /// The procedure in place before subclassing.
    pub original_proc: Arc<BaseWindowProc>,
    /// The style bits the control was created with.
    pub style: ControlStyle,
}

/// A parent that creates headless toolbar controls.
#[derive(Default)]
pub struct HeadlessContainer {
    created: Mutex<Vec<CreatedToolBar>>,
}

impl HeadlessContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently created control, if any.
    pub fn last_created(&self) -> Option<CreatedToolBar> {
        self.created.lock().last().cloned()
    }

    /// Every control created through this container.
    pub fn created(&self) -> Vec<CreatedToolBar> {
        self.created.lock().clone()
    }
}

impl Container for HeadlessContainer {
    fn create_tool_bar(&self, style: ControlStyle) -> WeldResult<SubclassedControl> {
        let control = Arc::new(HeadlessToolBar::new());
        let original_proc = Arc::new(BaseWindowProc::new());
        tracing::trace!(
            target: "horizon_weld::native",
            style = style.bits(),
            "created headless toolbar control"
        );
        self.created.lock().push(CreatedToolBar {
            control: control.clone(),
            original_proc: original_proc.clone(),
            style,
        });
        Ok(SubclassedControl {
            control,
            original_proc,
        })
    }
}
