//! Sizes, orientation, and layout flags for widget layout negotiation.
//!
//! This module provides the types a hosting layout engine consumes when it
//! asks a widget how it wants to be sized: an integer [`Size`], the
//! [`Orientation`] a control was created with, and the [`LayoutFlags`] bit
//! set describing stretch participation per axis.

use std::ops::{BitAnd, BitOr, BitOrAssign};

/// An integer size in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in layout units.
    pub width: i32,
    /// Height in layout units.
    pub height: i32,
}

impl Size {
    /// The zero-area size.
    pub const ZERO: Size = Size {
        width: 0,
        height: 0,
    };

    /// Create a new size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Check if this size has no area.
    pub fn is_zero(&self) -> bool {
        self.width == 0 && self.height == 0
    }
}

/// Layout orientation of a control, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Buttons flow left to right.
    #[default]
    Horizontal,
    /// Buttons stack top to bottom.
    Vertical,
}

impl Orientation {
    /// Check if this is the vertical orientation.
    pub fn is_vertical(self) -> bool {
        matches!(self, Orientation::Vertical)
    }
}

/// A set of stretch-participation flags represented as bits.
///
/// A widget advertises, per axis, whether a layout may shrink it below its
/// size hint, grow it beyond the hint, and whether it greedily takes any
/// leftover space.
///
/// # Example
///
/// ```
/// use horizon_weld::geometry::LayoutFlags;
///
/// let flags = LayoutFlags::GROWABLE_VERT | LayoutFlags::GREEDY_VERT;
/// assert!(flags.contains(LayoutFlags::GROWABLE_VERT));
/// assert!(!flags.contains(LayoutFlags::GROWABLE_HORZ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutFlags(u8);

impl LayoutFlags {
    /// No stretch participation.
    pub const NONE: LayoutFlags = LayoutFlags(0);
    /// May be made narrower than its hint.
    pub const SHRINKABLE_HORZ: LayoutFlags = LayoutFlags(1 << 0);
    /// May be made wider than its hint.
    pub const GROWABLE_HORZ: LayoutFlags = LayoutFlags(1 << 1);
    /// Takes leftover horizontal space.
    pub const GREEDY_HORZ: LayoutFlags = LayoutFlags(1 << 2);
    /// May be made shorter than its hint.
    pub const SHRINKABLE_VERT: LayoutFlags = LayoutFlags(1 << 3);
    /// May be made taller than its hint.
    pub const GROWABLE_VERT: LayoutFlags = LayoutFlags(1 << 4);
    /// Takes leftover vertical space.
    pub const GREEDY_VERT: LayoutFlags = LayoutFlags(1 << 5);

    /// Check if this set contains all flags of `other`.
    pub fn contains(&self, other: LayoutFlags) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if no flags are set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for LayoutFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        LayoutFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for LayoutFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for LayoutFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        LayoutFlags(self.0 & rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_zero() {
        assert!(Size::ZERO.is_zero());
        assert!(!Size::new(44, 44).is_zero());
    }

    #[test]
    fn test_layout_flags_bitor() {
        let flags =
            LayoutFlags::SHRINKABLE_VERT | LayoutFlags::GROWABLE_VERT | LayoutFlags::GREEDY_VERT;
        assert!(flags.contains(LayoutFlags::SHRINKABLE_VERT));
        assert!(flags.contains(LayoutFlags::GROWABLE_VERT));
        assert!(flags.contains(LayoutFlags::GREEDY_VERT));
        assert!(!flags.contains(LayoutFlags::GROWABLE_HORZ));
    }

    #[test]
    fn test_layout_flags_empty() {
        assert!(LayoutFlags::NONE.is_empty());
        assert!(!LayoutFlags::GREEDY_HORZ.is_empty());
    }

    #[test]
    fn test_orientation() {
        assert!(Orientation::Vertical.is_vertical());
        assert!(!Orientation::Horizontal.is_vertical());
        assert_eq!(Orientation::default(), Orientation::Horizontal);
    }
}
