//! Bitmap image strips shared with native controls.
//!
//! A native toolbar does not receive individual images; it receives a handle
//! to an *image strip*, a list of equally sized cells, and each button
//! refers to a cell by integer index. [`ImageList`] models that strip:
//! bitmaps are inserted with a transparency mask applied
//! ([`add_masked`](ImageList::add_masked)) and the resulting index is stable
//! for the lifetime of the strip.
//!
//! The strip is shared, not owned: widgets hold an `Arc<ImageList>` and hand
//! the native control only the opaque [`ImageListHandle`].

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use image::{Rgba, RgbaImage};
use parking_lot::RwLock;
use thiserror::Error;

use crate::error::{WeldError, WeldResult};

/// The designated transparency color for masked insertion.
///
/// Pixels of exactly this color become fully transparent when a bitmap is
/// added to a strip, mirroring the classic toolbar convention of magenta as
/// the mask color.
pub const MASK_COLOR: Rgba<u8> = Rgba([255, 0, 255, 255]);

/// A shareable RGBA bitmap.
///
/// Cloning is cheap; the pixel data is reference-counted.
#[derive(Clone)]
pub struct Bitmap {
    pixels: Arc<RgbaImage>,
}

impl Bitmap {
    /// Wrap decoded pixel data in a bitmap.
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(image),
        }
    }

    /// Create a bitmap filled with a single color.
    pub fn solid(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self::from_image(RgbaImage::from_pixel(width, height, color))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Access the underlying pixel data.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Errors raised by image strip operations.
#[derive(Error, Debug)]
pub enum ImageListError {
    /// The bitmap's dimensions do not match the strip's cell size.
    #[error(
        "bitmap is {actual_width}x{actual_height} but the strip holds \
         {cell_width}x{cell_height} cells"
    )]
    CellSizeMismatch {
        /// Width of the offered bitmap.
        actual_width: u32,
        /// Height of the offered bitmap.
        actual_height: u32,
        /// Cell width the strip was created with.
        cell_width: u32,
        /// Cell height the strip was created with.
        cell_height: u32,
    },
}

/// Opaque handle identifying a strip to the native control.
///
/// The native control receives only this handle, never ownership of the
/// strip itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageListHandle(u64);

impl ImageListHandle {
    /// The raw handle value.
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// A strip of equally sized, mask-processed bitmaps.
///
/// Indices returned by [`add_masked`](Self::add_masked) are stable: entries
/// are never removed or reordered.
pub struct ImageList {
    cell_width: u32,
    cell_height: u32,
    handle: ImageListHandle,
    entries: RwLock<Vec<RgbaImage>>,
}

impl ImageList {
    /// Create an empty strip whose cells are `cell_width` x `cell_height`
    /// pixels.
    pub fn new(cell_width: u32, cell_height: u32) -> Self {
        Self {
            cell_width,
            cell_height,
            handle: ImageListHandle(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed)),
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Insert a bitmap, applying the [`MASK_COLOR`] transparency mask, and
    /// return its index in the strip.
    ///
    /// Every call appends a new entry; inserting the same bitmap twice
    /// yields two distinct indices. Callers that want sharing must cache the
    /// returned index themselves.
    pub fn add_masked(&self, bitmap: &Bitmap) -> Result<usize, ImageListError> {
        if bitmap.width() != self.cell_width || bitmap.height() != self.cell_height {
            return Err(ImageListError::CellSizeMismatch {
                actual_width: bitmap.width(),
                actual_height: bitmap.height(),
                cell_width: self.cell_width,
                cell_height: self.cell_height,
            });
        }

        let mut masked = bitmap.pixels().clone();
        for pixel in masked.pixels_mut() {
            if *pixel == MASK_COLOR {
                *pixel = Rgba([0, 0, 0, 0]);
            }
        }

        let mut entries = self.entries.write();
        entries.push(masked);
        let index = entries.len() - 1;
        tracing::trace!(
            target: "horizon_weld::image_list",
            handle = self.handle.as_raw(),
            index,
            "added masked image to strip"
        );
        Ok(index)
    }

    /// Number of entries in the strip.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the strip has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// The cell dimensions this strip was created with.
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    /// Get a copy of the entry at `index`, if present.
    pub fn entry(&self, index: usize) -> Option<Bitmap> {
        self.entries
            .read()
            .get(index)
            .cloned()
            .map(Bitmap::from_image)
    }

    /// The handle shared with the native control.
    pub fn native_handle(&self) -> ImageListHandle {
        self.handle
    }
}

impl fmt::Debug for ImageList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageList")
            .field("cell_width", &self.cell_width)
            .field("cell_height", &self.cell_height)
            .field("handle", &self.handle)
            .field("len", &self.len())
            .finish()
    }
}

/// Maps an optional image to a strip index for one button operation.
///
/// Absent images map to `-1` ("no image") with no side effects; present
/// images are inserted into the attached strip. The resolver borrows the
/// strip for the duration of a single build, so one resolver never spans two
/// strips.
pub struct ImageIndexResolver<'a> {
    strip: Option<&'a ImageList>,
}

impl<'a> ImageIndexResolver<'a> {
    /// Create a resolver over the toolbar's current strip, if any.
    pub fn new(strip: Option<&'a ImageList>) -> Self {
        Self { strip }
    }

    /// Resolve an optional image to a strip index.
    ///
    /// Returns `-1` for `None`. A present image is always inserted anew; see
    /// [`ImageList::add_masked`] for the duplicate-insertion behavior. Fails
    /// if an image is supplied but no strip is attached, or if insertion is
    /// rejected. In either case the caller must abort its enclosing
    /// operation before mutating native state.
    pub fn resolve(&self, image: Option<&Bitmap>) -> WeldResult<i32> {
        let Some(bitmap) = image else {
            return Ok(-1);
        };
        let strip = self.strip.ok_or(WeldError::ImageListMissing)?;
        let index = strip.add_masked(bitmap)?;
        Ok(index as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_masked_assigns_sequential_indices() {
        let list = ImageList::new(16, 16);
        let bitmap = Bitmap::solid(16, 16, Rgba([10, 20, 30, 255]));

        assert_eq!(list.add_masked(&bitmap).unwrap(), 0);
        assert_eq!(list.add_masked(&bitmap).unwrap(), 1);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_add_masked_applies_mask_color() {
        let list = ImageList::new(2, 1);
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, MASK_COLOR);
        image.put_pixel(1, 0, Rgba([1, 2, 3, 255]));

        let index = list.add_masked(&Bitmap::from_image(image)).unwrap();
        let entry = list.entry(index).unwrap();
        assert_eq!(*entry.pixels().get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*entry.pixels().get_pixel(1, 0), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_add_masked_rejects_wrong_cell_size() {
        let list = ImageList::new(16, 16);
        let bitmap = Bitmap::solid(8, 8, Rgba([0, 0, 0, 255]));

        let err = list.add_masked(&bitmap).unwrap_err();
        assert!(matches!(err, ImageListError::CellSizeMismatch { .. }));
        assert!(list.is_empty());
    }

    #[test]
    fn test_resolver_absent_image_is_minus_one() {
        let resolver = ImageIndexResolver::new(None);
        assert_eq!(resolver.resolve(None).unwrap(), -1);
    }

    #[test]
    fn test_resolver_requires_a_strip_for_images() {
        let resolver = ImageIndexResolver::new(None);
        let bitmap = Bitmap::solid(16, 16, Rgba([0, 0, 0, 255]));

        let err = resolver.resolve(Some(&bitmap)).unwrap_err();
        assert!(matches!(err, WeldError::ImageListMissing));
    }

    #[test]
    fn test_resolver_does_not_deduplicate() {
        let list = ImageList::new(16, 16);
        let resolver = ImageIndexResolver::new(Some(&list));
        let bitmap = Bitmap::solid(16, 16, Rgba([5, 5, 5, 255]));

        assert_eq!(resolver.resolve(Some(&bitmap)).unwrap(), 0);
        assert_eq!(resolver.resolve(Some(&bitmap)).unwrap(), 1);
    }

    #[test]
    fn test_handles_are_distinct() {
        let a = ImageList::new(16, 16);
        let b = ImageList::new(16, 16);
        assert_ne!(a.native_handle(), b.native_handle());
    }
}
