//! The native control command surface.
//!
//! This module defines the narrow boundary between the platform-neutral
//! widget layer and the host windowing system's toolbar control:
//!
//! - [`ToolBarControl`]: the command surface of one native toolbar instance
//! - [`Container`]: creates and subclasses a native toolbar as a child
//! - [`WindowProc`] / [`WindowMessage`]: the message-procedure chain
//! - [`ButtonDescriptor`] and its [`ButtonState`]/[`ButtonStyle`] bit sets:
//!   the per-button wire projection
//!
//! All flag and message values are bit-compatible with the Win32
//! common-controls toolbar API (see [`comctl`]). The widget layer never
//! touches raw handles or pointers; a platform backend implements these
//! traits over the real control, and [`headless`] provides an in-process
//! implementation used by the test-suite and by builds without a native
//! control.
//!
//! # Notification decoding
//!
//! Native notifications arrive as a code plus a payload. Decoding is
//! tag-first: [`Notification::decode`] reads the code and interprets the
//! payload only for codes it recognizes, returning `None` for anything
//! else instead of misinterpreting it.

pub mod comctl;
pub mod headless;

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::sync::Arc;

use crate::error::WeldResult;
use crate::image_list::ImageListHandle;

// ============================================================================
// Creation styles
// ============================================================================

/// Style bits passed to the windowing system when the control is created.
///
/// # Example
///
/// ```
/// use horizon_weld::native::ControlStyle;
///
/// let style = ControlStyle::NO_DIVIDER | ControlStyle::VERTICAL;
/// assert!(style.contains(ControlStyle::VERTICAL));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlStyle(u32);

impl ControlStyle {
    /// No style bits.
    pub const NONE: ControlStyle = ControlStyle(0);
    /// Buttons wrap to a new row when the bar is too narrow.
    pub const WRAPABLE: ControlStyle = ControlStyle(comctl::TBSTYLE_WRAPABLE);
    /// No divider line above the control.
    pub const NO_DIVIDER: ControlStyle = ControlStyle(comctl::CCS_NODIVIDER);
    /// The control keeps the size it is given.
    pub const NO_RESIZE: ControlStyle = ControlStyle(comctl::CCS_NORESIZE);
    /// Vertical layout.
    pub const VERTICAL: ControlStyle = ControlStyle(comctl::CCS_VERT);

    /// Check if this set contains all bits of `other`.
    pub fn contains(&self, other: ControlStyle) -> bool {
        (self.0 & other.0) == other.0
    }

    /// The raw style bits.
    pub fn bits(&self) -> u32 {
        self.0
    }
}

impl BitOr for ControlStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        ControlStyle(self.0 | rhs.0)
    }
}

impl BitOrAssign for ControlStyle {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ControlStyle {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        ControlStyle(self.0 & rhs.0)
    }
}

// ============================================================================
// Button state and style bits
// ============================================================================

/// Per-button state bits, bit-compatible with `TBSTATE_*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState(u8);

impl ButtonState {
    /// No state bits.
    pub const NONE: ButtonState = ButtonState(0);
    /// The button renders pressed in.
    pub const CHECKED: ButtonState = ButtonState(comctl::TBSTATE_CHECKED);
    /// The button accepts input; without it the button renders disabled.
    pub const ENABLED: ButtonState = ButtonState(comctl::TBSTATE_ENABLED);
    /// The label wraps under the icon.
    pub const WRAP: ButtonState = ButtonState(comctl::TBSTATE_WRAP);

    /// Check if this set contains all bits of `other`.
    pub fn contains(&self, other: ButtonState) -> bool {
        (self.0 & other.0) == other.0
    }

    /// The raw `fsState` byte.
    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl BitOr for ButtonState {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        ButtonState(self.0 | rhs.0)
    }
}

impl BitOrAssign for ButtonState {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Per-button style bits, bit-compatible with `BTNS_*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonStyle(u8);

impl ButtonStyle {
    /// No style bits.
    pub const NONE: ButtonStyle = ButtonStyle(0);
    /// The button behaves as a toggle.
    pub const CHECK: ButtonStyle = ButtonStyle(comctl::BTNS_CHECK);
    /// The button participates in a radio-exclusive group with adjacent
    /// grouped buttons.
    pub const GROUP: ButtonStyle = ButtonStyle(comctl::BTNS_GROUP);
    /// The control sizes the button to its content.
    pub const AUTOSIZE: ButtonStyle = ButtonStyle(comctl::BTNS_AUTOSIZE);

    /// Check if this set contains all bits of `other`.
    pub fn contains(&self, other: ButtonStyle) -> bool {
        (self.0 & other.0) == other.0
    }

    /// The raw `fsStyle` byte.
    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl BitOr for ButtonStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        ButtonStyle(self.0 | rhs.0)
    }
}

impl BitOrAssign for ButtonStyle {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

// ============================================================================
// Update mask
// ============================================================================

/// Field selector for button update commands, bit-compatible with `TBIF_*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoMask(u32);

impl InfoMask {
    /// Update the image index.
    pub const IMAGE: InfoMask = InfoMask(comctl::TBIF_IMAGE);
    /// Update the display text.
    pub const TEXT: InfoMask = InfoMask(comctl::TBIF_TEXT);
    /// Update the state bits.
    pub const STATE: InfoMask = InfoMask(comctl::TBIF_STATE);
    /// Update the style bits.
    pub const STYLE: InfoMask = InfoMask(comctl::TBIF_STYLE);
    /// Update image, text, state, and style together.
    pub const ALL: InfoMask = InfoMask(
        comctl::TBIF_IMAGE | comctl::TBIF_TEXT | comctl::TBIF_STATE | comctl::TBIF_STYLE,
    );

    /// Check if this mask selects all fields of `other`.
    pub fn contains(&self, other: InfoMask) -> bool {
        (self.0 & other.0) == other.0
    }

    /// The raw `dwMask` value.
    pub fn bits(&self) -> u32 {
        self.0
    }
}

impl BitOr for InfoMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        InfoMask(self.0 | rhs.0)
    }
}

// ============================================================================
// Wide text
// ============================================================================

/// A null-terminated UTF-16 text buffer.
///
/// Display text crosses the native boundary as a wide string. The buffer is
/// owned by the [`ButtonDescriptor`] that carries it and stays valid exactly
/// as long as that descriptor, which spans the single native call it was
/// built for.
pub struct WideText(Vec<u16>);

impl WideText {
    /// Encode `text` as UTF-16 with a trailing null.
    pub fn new(text: &str) -> Self {
        let mut units: Vec<u16> = text.encode_utf16().collect();
        units.push(0);
        Self(units)
    }

    /// The encoded units, including the trailing null.
    pub fn as_units(&self) -> &[u16] {
        &self.0
    }

    /// Decode back to a `String`, dropping the trailing null.
    pub fn to_string_lossy(&self) -> String {
        let end = self.0.len().saturating_sub(1);
        String::from_utf16_lossy(&self.0[..end])
    }
}

impl fmt::Debug for WideText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WideText({:?})", self.to_string_lossy())
    }
}

// ============================================================================
// Button descriptor
// ============================================================================

/// The wire projection of one button: everything the native control needs
/// to create or update it.
///
/// Descriptors are ephemeral values, rebuilt from the action model for every
/// synchronization step and dropped once the native call returns.
#[derive(Debug)]
pub struct ButtonDescriptor {
    /// The command identifier reported back in click notifications.
    pub id_command: u16,
    /// State bits (`fsState`).
    pub state: ButtonState,
    /// Style bits (`fsStyle`).
    pub style: ButtonStyle,
    /// Image strip index, or `-1` for no image.
    pub image: i32,
    /// Null-terminated display text.
    pub text: WideText,
}

// ============================================================================
// Commands
// ============================================================================

/// A command issued to the native toolbar control.
///
/// Each variant corresponds to exactly one control message;
/// [`message`](Self::message) and [`name`](Self::name) expose the wire code
/// and its symbolic name for recording and error reporting.
#[derive(Debug)]
pub enum ToolBarCommand<'a> {
    /// Declare the button struct size before adding buttons.
    SetButtonStructSize,
    /// Insert a button at a position.
    InsertButton {
        /// Position in the native button array.
        index: usize,
        /// The button to insert.
        button: &'a ButtonDescriptor,
    },
    /// Delete the button at a position.
    DeleteButton {
        /// Position in the native button array.
        index: usize,
    },
    /// Update the button with the given command id in place.
    SetButtonInfo {
        /// The command id assigned at insertion.
        id_command: u16,
        /// The fields to copy from.
        info: &'a ButtonDescriptor,
        /// Which fields to copy.
        mask: InfoMask,
    },
    /// Set minimum and maximum button widths.
    SetButtonWidth {
        /// Minimum width in pixels.
        min: u16,
        /// Maximum width in pixels.
        max: u16,
    },
    /// Let the control recompute its dimensions.
    AutoSize,
}

impl ToolBarCommand<'_> {
    /// The wire message code for this command.
    pub fn message(&self) -> u32 {
        match self {
            ToolBarCommand::SetButtonStructSize => comctl::TB_BUTTONSTRUCTSIZE,
            ToolBarCommand::InsertButton { .. } => comctl::TB_INSERTBUTTON,
            ToolBarCommand::DeleteButton { .. } => comctl::TB_DELETEBUTTON,
            ToolBarCommand::SetButtonInfo { .. } => comctl::TB_SETBUTTONINFO,
            ToolBarCommand::SetButtonWidth { .. } => comctl::TB_SETBUTTONWIDTH,
            ToolBarCommand::AutoSize => comctl::TB_AUTOSIZE,
        }
    }

    /// The symbolic message name, used in error values and command records.
    pub fn name(&self) -> &'static str {
        match self {
            ToolBarCommand::SetButtonStructSize => "TB_BUTTONSTRUCTSIZE",
            ToolBarCommand::InsertButton { .. } => "TB_INSERTBUTTON",
            ToolBarCommand::DeleteButton { .. } => "TB_DELETEBUTTON",
            ToolBarCommand::SetButtonInfo { .. } => "TB_SETBUTTONINFO",
            ToolBarCommand::SetButtonWidth { .. } => "TB_SETBUTTONWIDTH",
            ToolBarCommand::AutoSize => "TB_AUTOSIZE",
        }
    }
}

// ============================================================================
// Control and container traits
// ============================================================================

/// The command surface of one native toolbar control instance.
///
/// Implementations are synchronous round-trips into the windowing subsystem:
/// a command either completes or is rejected before the call returns.
pub trait ToolBarControl: Send + Sync {
    /// Issue a command, failing with
    /// [`WeldError::CommandRejected`](crate::WeldError::CommandRejected) if
    /// the control refuses it.
    fn send_command(&self, command: ToolBarCommand<'_>) -> WeldResult<()>;

    /// Attach or detach an image strip by handle.
    ///
    /// The underlying message returns the previously attached handle rather
    /// than a failure signal, so this cannot fail.
    fn set_image_list(&self, handle: Option<ImageListHandle>);

    /// Show or hide the control.
    fn set_visible(&self, visible: bool);
}

/// A subclassed native control: its command surface plus the window
/// procedure that was in place before subclassing.
///
/// Every created toolbar carries its *own* original procedure; no
/// subclassing state is shared between instances.
pub struct SubclassedControl {
    /// The command surface of the created control.
    pub control: Arc<dyn ToolBarControl>,
    /// The control's original window procedure, for chaining.
    pub original_proc: Arc<dyn WindowProc>,
}

/// A parent that can create native toolbar child controls.
pub trait Container {
    /// Create a native toolbar with the given style bits, subclass it, and
    /// return its command surface together with the original window
    /// procedure.
    fn create_tool_bar(&self, style: ControlStyle) -> WeldResult<SubclassedControl>;
}

// ============================================================================
// Messages and notifications
// ============================================================================

/// A decoded notification payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolBarNotification {
    /// A button was left-clicked.
    Clicked {
        /// The command id of the clicked button.
        id_command: u16,
    },
}

/// A notify message as delivered by the windowing subsystem: the
/// notification code plus the item it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    /// The notification code (`NMHDR.code`).
    pub code: u32,
    /// The item the notification refers to, when the code defines one.
    pub item: usize,
}

impl Notification {
    /// Decode the payload for recognized codes.
    ///
    /// The code is examined first; the item is only interpreted for codes
    /// whose payload shape is known. Unrecognized codes decode to `None`.
    pub fn decode(&self) -> Option<ToolBarNotification> {
        match self.code {
            comctl::NM_CLICK => Some(ToolBarNotification::Clicked {
                id_command: self.item as u16,
            }),
            _ => None,
        }
    }
}

/// A message arriving at a widget's window procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowMessage {
    /// A notification from a child control.
    Notify(Notification),
    /// Any other message, carried verbatim.
    Other {
        /// The message code.
        message: u32,
        /// The message's first parameter.
        wparam: usize,
        /// The message's second parameter.
        lparam: isize,
    },
}

impl WindowMessage {
    /// The wire message code.
    pub fn message_code(&self) -> u32 {
        match self {
            WindowMessage::Notify(_) => comctl::WM_NOTIFY,
            WindowMessage::Other { message, .. } => *message,
        }
    }
}

/// A window procedure in the subclass chain.
pub trait WindowProc: Send + Sync {
    /// Handle a message and return the message result.
    fn handle_message(&self, message: &WindowMessage) -> isize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_style_bits() {
        let style = ControlStyle::NO_DIVIDER | ControlStyle::VERTICAL | ControlStyle::NO_RESIZE;
        assert!(style.contains(ControlStyle::VERTICAL));
        assert!(!style.contains(ControlStyle::WRAPABLE));
        assert_eq!(
            style.bits(),
            comctl::CCS_NODIVIDER | comctl::CCS_VERT | comctl::CCS_NORESIZE
        );
    }

    #[test]
    fn test_button_state_bits_are_wire_compatible() {
        let state = ButtonState::CHECKED | ButtonState::ENABLED;
        assert_eq!(
            state.bits(),
            comctl::TBSTATE_CHECKED | comctl::TBSTATE_ENABLED
        );
        assert!(state.contains(ButtonState::CHECKED));
        assert!(!state.contains(ButtonState::WRAP));
    }

    #[test]
    fn test_info_mask_all() {
        assert!(InfoMask::ALL.contains(InfoMask::IMAGE));
        assert!(InfoMask::ALL.contains(InfoMask::TEXT));
        assert!(InfoMask::ALL.contains(InfoMask::STATE));
        assert!(InfoMask::ALL.contains(InfoMask::STYLE));
        assert_eq!(InfoMask::ALL.bits(), 0x0F);
    }

    #[test]
    fn test_wide_text_round_trip() {
        let text = WideText::new("Öffnen");
        assert_eq!(text.as_units().last(), Some(&0));
        assert_eq!(text.to_string_lossy(), "Öffnen");
    }

    #[test]
    fn test_wide_text_empty() {
        let text = WideText::new("");
        assert_eq!(text.as_units(), &[0]);
        assert_eq!(text.to_string_lossy(), "");
    }

    #[test]
    fn test_notification_decode_click() {
        let notification = Notification {
            code: comctl::NM_CLICK,
            item: 7,
        };
        assert_eq!(
            notification.decode(),
            Some(ToolBarNotification::Clicked { id_command: 7 })
        );
    }

    #[test]
    fn test_notification_decode_rejects_unknown_codes() {
        let notification = Notification { code: 0, item: 7 };
        assert_eq!(notification.decode(), None);
    }

    #[test]
    fn test_command_message_codes() {
        let button = ButtonDescriptor {
            id_command: 1,
            state: ButtonState::NONE,
            style: ButtonStyle::NONE,
            image: -1,
            text: WideText::new(""),
        };
        assert_eq!(
            ToolBarCommand::InsertButton { index: 0, button: &button }.message(),
            comctl::TB_INSERTBUTTON
        );
        assert_eq!(
            ToolBarCommand::DeleteButton { index: 0 }.message(),
            comctl::TB_DELETEBUTTON
        );
        assert_eq!(ToolBarCommand::AutoSize.name(), "TB_AUTOSIZE");
    }
}
