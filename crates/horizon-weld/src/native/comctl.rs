//! Wire-level constants for the native toolbar control.
//!
//! Values are bit-compatible with the Win32 common-controls toolbar API
//! (`commctrl.h`), so descriptors and commands encoded with them can be
//! replayed against the real control verbatim. Message constants use the
//! Unicode (`W`) variants where the API distinguishes them.

/// Base value for control-defined window messages (`WM_USER`).
pub const WM_USER: u32 = 0x0400;

/// Notification carrier message (`WM_NOTIFY`).
pub const WM_NOTIFY: u32 = 0x004E;

// Toolbar messages.

/// Delete the button at an index (`TB_DELETEBUTTON`).
pub const TB_DELETEBUTTON: u32 = WM_USER + 22;
/// Declare the button struct size before adding buttons
/// (`TB_BUTTONSTRUCTSIZE`).
pub const TB_BUTTONSTRUCTSIZE: u32 = WM_USER + 30;
/// Ask the control to recompute its dimensions (`TB_AUTOSIZE`).
pub const TB_AUTOSIZE: u32 = WM_USER + 33;
/// Attach an image strip by handle (`TB_SETIMAGELIST`).
pub const TB_SETIMAGELIST: u32 = WM_USER + 48;
/// Set minimum and maximum button widths (`TB_SETBUTTONWIDTH`).
pub const TB_SETBUTTONWIDTH: u32 = WM_USER + 59;
/// Update an existing button by command id (`TB_SETBUTTONINFOW`).
pub const TB_SETBUTTONINFO: u32 = WM_USER + 64;
/// Insert a button at an index (`TB_INSERTBUTTONW`).
pub const TB_INSERTBUTTON: u32 = WM_USER + 67;

// Button state bits (`fsState`).

/// The button is pressed in (`TBSTATE_CHECKED`).
pub const TBSTATE_CHECKED: u8 = 0x01;
/// The button accepts input (`TBSTATE_ENABLED`).
pub const TBSTATE_ENABLED: u8 = 0x04;
/// A line break follows the button (`TBSTATE_WRAP`).
pub const TBSTATE_WRAP: u8 = 0x20;

// Button style bits (`fsStyle`).

/// The button toggles between pressed and released (`BTNS_CHECK`).
pub const BTNS_CHECK: u8 = 0x02;
/// The button stays pressed until another group member is pressed
/// (`BTNS_GROUP`).
pub const BTNS_GROUP: u8 = 0x04;
/// The control sizes the button to its text (`BTNS_AUTOSIZE`).
pub const BTNS_AUTOSIZE: u8 = 0x10;

// Control creation style bits.

/// Buttons wrap to the next row when the bar is too narrow
/// (`TBSTYLE_WRAPABLE`).
pub const TBSTYLE_WRAPABLE: u32 = 0x0200;
/// No highlight bar is drawn above the control (`CCS_NODIVIDER`).
pub const CCS_NODIVIDER: u32 = 0x40;
/// The control keeps the size it is given (`CCS_NORESIZE`).
pub const CCS_NORESIZE: u32 = 0x04;
/// The control lays out vertically (`CCS_VERT`).
pub const CCS_VERT: u32 = 0x80;

// Notification codes (`NMHDR.code`).

/// Left click on the control (`NM_CLICK`).
pub const NM_CLICK: u32 = -2i32 as u32;

// Button info mask bits (`TBBUTTONINFO.dwMask`).

/// Update the image index (`TBIF_IMAGE`).
pub const TBIF_IMAGE: u32 = 0x01;
/// Update the display text (`TBIF_TEXT`).
pub const TBIF_TEXT: u32 = 0x02;
/// Update the state bits (`TBIF_STATE`).
pub const TBIF_STATE: u32 = 0x04;
/// Update the style bits (`TBIF_STYLE`).
pub const TBIF_STYLE: u32 = 0x08;
