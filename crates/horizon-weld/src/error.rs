//! Error types for the widget crate.

use thiserror::Error;

use crate::image_list::ImageListError;

/// Errors that can occur while driving a native control.
#[derive(Error, Debug)]
pub enum WeldError {
    /// The windowing subsystem returned a failure signal for a command.
    ///
    /// Carries the name of the rejected command message.
    #[error("{0} was rejected by the native control")]
    CommandRejected(&'static str),

    /// The container failed to create the native child control.
    #[error("failed to create the native control: {0}")]
    ControlCreation(String),

    /// Inserting an image into the backing strip failed.
    #[error(transparent)]
    ImageList(#[from] ImageListError),

    /// An action carries an image but the toolbar has no image list to
    /// resolve it against.
    #[error("action has an image but the toolbar has no image list")]
    ImageListMissing,

    /// A positional operation was given an index past the end of the list.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The list length at the time of the call.
        len: usize,
    },

    /// The action is not a member of the list.
    #[error("action is not in the list")]
    ActionNotFound,

    /// Button width limits must satisfy `min <= max`.
    #[error("invalid button width limits: min {min} exceeds max {max}")]
    InvalidWidthLimits {
        /// Requested minimum button width.
        min: u16,
        /// Requested maximum button width.
        max: u16,
    },
}

/// Result type for widget operations.
pub type WeldResult<T> = Result<T, WeldError>;
