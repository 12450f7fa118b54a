//! Logging facilities for Horizon Weld.
//!
//! Horizon Weld uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber and never logs error values on its own;
//! failures are returned to the caller. To see trace output, install a
//! subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, for
/// example `RUST_LOG=horizon_weld::tool_bar=trace`.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_weld_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_weld_core::signal";
    /// Object identity target.
    pub const OBJECT: &str = "horizon_weld_core::object";
    /// Toolbar widget and synchronization engine target.
    pub const TOOL_BAR: &str = "horizon_weld::tool_bar";
    /// Action model target.
    pub const ACTION: &str = "horizon_weld::action";
    /// Image strip target.
    pub const IMAGE_LIST: &str = "horizon_weld::image_list";
    /// Native command surface target.
    pub const NATIVE: &str = "horizon_weld::native";
}
