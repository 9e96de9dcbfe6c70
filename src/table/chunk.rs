//! Chunk storage: bounded batches of packed rows and borrowed column views.
//!
//! A packed row is the concatenation of every column's fixed-width byte
//! slice for one logical row, in entry order. A [`Chunk`] owns a contiguous
//! buffer of such rows and is the unit of parallel scan. Scans never copy
//! column bytes; they yield [`ByteView`]s borrowed from the chunk.

/// A borrowed view of one column's bytes within one packed row. Its lifetime
/// is bounded by the owning chunk.
pub type ByteView<'a> = &'a [u8];

/// A bounded, contiguous batch of packed rows.
#[derive(Debug, Default)]
pub(crate) struct Chunk {
    /// Packed rows, back to back; length is a multiple of `row_width`.
    data: Vec<u8>,
    row_width: usize,
}

impl Chunk {
    pub(crate) fn with_capacity(rows: usize, row_width: usize) -> Self {
        Self {
            data: Vec::with_capacity(rows * row_width),
            row_width,
        }
    }

    pub(crate) fn push_row(&mut self, row: &[u8]) {
        debug_assert_eq!(row.len(), self.row_width);
        self.data.extend_from_slice(row);
    }

    pub(crate) fn rows(&self) -> usize {
        if self.row_width == 0 {
            0
        } else {
            self.data.len() / self.row_width
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// A cursor over one column's bytes across all rows of this chunk.
    /// `offset` and `width` come from the table's entry for that column.
    pub(crate) fn column_slices(&self, offset: usize, width: usize) -> ColumnSlices<'_> {
        ColumnSlices {
            chunk: self,
            offset,
            width,
            cursor: 0,
        }
    }
}

/// Iterator yielding successive fixed-width byte views of a single column
/// across a chunk's packed rows.
pub(crate) struct ColumnSlices<'a> {
    chunk: &'a Chunk,
    offset: usize,
    width: usize,
    cursor: usize,
}

impl<'a> Iterator for ColumnSlices<'a> {
    type Item = ByteView<'a>;

    fn next(&mut self) -> Option<ByteView<'a>> {
        if self.cursor >= self.chunk.rows() {
            return None;
        }
        let start = self.cursor * self.chunk.row_width + self.offset;
        self.cursor += 1;
        Some(&self.chunk.data[start..start + self.width])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.chunk.rows() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ColumnSlices<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_from_rows(rows: &[&[u8]]) -> Chunk {
        let mut chunk = Chunk::with_capacity(rows.len(), rows[0].len());
        for row in rows {
            chunk.push_row(row);
        }
        chunk
    }

    #[test]
    fn test_column_slices_middle_column() {
        let chunk = chunk_from_rows(&[
            &[1, 2, 3, 4, 5],
            &[11, 12, 13, 14, 15],
            &[21, 22, 23, 24, 25],
        ]);

        let views: Vec<ByteView<'_>> = chunk.column_slices(2, 2).collect();
        assert_eq!(views, vec![&[3, 4][..], &[13, 14], &[23, 24]]);
    }

    #[test]
    fn test_column_slices_exact_size() {
        let chunk = chunk_from_rows(&[&[9, 8], &[7, 6]]);
        let mut iter = chunk.column_slices(1, 1);
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next(), Some(&[8][..]));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some(&[6][..]));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_empty_chunk_yields_nothing() {
        let chunk = Chunk::with_capacity(0, 3);
        assert!(chunk.is_empty());
        assert_eq!(chunk.column_slices(0, 3).count(), 0);
    }
}
