//! Contextual back-reference distances for pixel data.
//!
//! Image streams can refer to the previous few pixels or to pixels in the
//! row above with a 3-bit index instead of an explicit offset.

use crate::config::PixelLayout;

/// Number of contextual distances.
pub const OFFSET_COUNT: usize = 8;

/// Eight distances derived from the element size and the row stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetTable([usize; OFFSET_COUNT]);

impl OffsetTable {
    /// Build the table for `layout`.
    ///
    /// The first three slots are the previous 1-3 elements. When a row is
    /// wider than five elements the rest point into the rows above,
    /// otherwise they continue with 4-8 elements back.
    pub fn new(layout: PixelLayout) -> Self {
        let base = layout.base_length;
        let stride = layout.stride;

        let upper = if 5 * base < stride {
            [stride - base, stride, stride + base, stride + 2 * base, 2 * stride]
        } else {
            [4 * base, 5 * base, 6 * base, 7 * base, 8 * base]
        };

        Self([base, 2 * base, 3 * base, upper[0], upper[1], upper[2], upper[3], upper[4]])
    }

    /// Distance for a 3-bit index.
    #[inline]
    pub fn get(&self, index: usize) -> usize {
        self.0[index & (OFFSET_COUNT - 1)]
    }

    /// All distances in index order.
    pub fn distances(&self) -> &[usize; OFFSET_COUNT] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_relative_branch() {
        let table = OffsetTable::new(PixelLayout::new(1, 10));
        assert_eq!(table.distances(), &[1, 2, 3, 9, 10, 11, 12, 20]);

        let table = OffsetTable::new(PixelLayout::new(3, 24));
        assert_eq!(table.distances(), &[3, 6, 9, 21, 24, 27, 30, 48]);
    }

    #[test]
    fn test_narrow_rows_branch() {
        let table = OffsetTable::new(PixelLayout::new(3, 12));
        assert_eq!(table.distances(), &[3, 6, 9, 12, 15, 18, 21, 24]);

        // 5 * base == stride stays on the multiples.
        let table = OffsetTable::new(PixelLayout::new(2, 10));
        assert_eq!(table.distances(), &[2, 4, 6, 8, 10, 12, 14, 16]);
    }

    #[test]
    fn test_blob_layout() {
        let table = OffsetTable::new(PixelLayout::BLOB);
        assert_eq!(table.distances(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(table.get(7), 8);
    }
}
