//! The chunked columnar store.
//!
//! A [`Table`] packs multiple fixed-width columns into contiguous per-row
//! byte buffers, grouped into chunks of at most `EngineConfig::chunk_rows`
//! rows. Construction is write-once: validation happens eagerly, the row
//! count is fixed, and all subsequent operations are read-only queries that
//! are safe to run concurrently.

mod chunk;
mod histogram;

pub use chunk::ByteView;
pub(crate) use chunk::Chunk;

use crate::config::EngineConfig;
use crate::error::KolomError;

//==================================================================================
// 1. Column
//==================================================================================

/// Caller-supplied column input: an id, a declared byte width, and a flat
/// buffer holding `row_count * width` bytes.
///
/// The width is whatever the caller packed the data at; typically the code
/// width of a [`crate::Dictionary`] or a raw integer byte width.
#[derive(Debug, Clone)]
pub struct Column {
    id: u32,
    width: usize,
    data: Vec<u8>,
}

impl Column {
    /// Wraps a flat buffer of fixed-width rows. The buffer length must be a
    /// multiple of `width`, and `width` must be non-zero.
    pub fn new(id: u32, width: usize, data: Vec<u8>) -> Result<Self, KolomError> {
        if width == 0 {
            return Err(KolomError::MalformedColumn(
                id,
                "column width must be at least 1 byte".to_string(),
            ));
        }
        if data.len() % width != 0 {
            return Err(KolomError::MalformedColumn(
                id,
                format!(
                    "data length {} is not a multiple of width {}",
                    data.len(),
                    width
                ),
            ));
        }
        Ok(Self { id, width, data })
    }

    /// Builds a column from per-row byte slices, validating that every row
    /// matches the declared width.
    pub fn from_rows<I, R>(id: u32, width: usize, rows: I) -> Result<Self, KolomError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let mut data = Vec::new();
        for (i, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(KolomError::MalformedColumn(
                    id,
                    format!("row {} has {} byte(s), declared width is {}", i, row.len(), width),
                ));
            }
            data.extend_from_slice(row);
        }
        Self::new(id, width, data)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn row_count(&self) -> usize {
        self.data.len() / self.width
    }

    fn row(&self, idx: usize) -> &[u8] {
        &self.data[idx * self.width..(idx + 1) * self.width]
    }
}

//==================================================================================
// 2. Table
//==================================================================================

/// Column placement within a packed row: id, running byte offset, width.
#[derive(Debug, Clone, Copy)]
struct Entry {
    id: u32,
    offset: usize,
    width: usize,
}

/// An immutable, chunked columnar table. See the module docs.
#[derive(Debug)]
pub struct Table {
    entries: Vec<Entry>,
    chunks: Vec<Chunk>,
    row_count: usize,
    config: EngineConfig,
}

impl Table {
    /// Builds a table with the default engine configuration.
    pub fn new(columns: Vec<Column>) -> Result<Self, KolomError> {
        Self::with_config(columns, EngineConfig::default())
    }

    /// Builds a table with an explicit configuration (chunk size, scan pool
    /// sizing). Validates, then packs rows into chunks; fails without
    /// returning a partial table.
    pub fn with_config(columns: Vec<Column>, config: EngineConfig) -> Result<Self, KolomError> {
        let config = config.sanitized();

        // Lay out entries by concatenating widths in declaration order,
        // checking id uniqueness as we go.
        let mut seen = hashbrown::HashSet::new();
        let mut entries = Vec::with_capacity(columns.len());
        let mut offset = 0;
        for col in &columns {
            if !seen.insert(col.id) {
                return Err(KolomError::DuplicateColumnId(col.id));
            }
            entries.push(Entry {
                id: col.id,
                offset,
                width: col.width,
            });
            offset += col.width;
        }
        let row_width = offset;

        // All columns must agree on the row count.
        let row_count = columns.first().map_or(0, Column::row_count);
        for col in &columns {
            if col.row_count() != row_count {
                return Err(KolomError::RowCountMismatch {
                    column: col.id,
                    got: col.row_count(),
                    expected: row_count,
                });
            }
        }

        // Pack rows and group them into chunks; the last chunk may be
        // partially filled.
        let mut chunks = Vec::new();
        let mut current = Chunk::with_capacity(config.chunk_rows.min(row_count), row_width);
        let mut row_buf = Vec::with_capacity(row_width);
        for i in 0..row_count {
            if i != 0 && i % config.chunk_rows == 0 {
                chunks.push(std::mem::replace(
                    &mut current,
                    Chunk::with_capacity(config.chunk_rows.min(row_count - i), row_width),
                ));
            }
            row_buf.clear();
            for col in &columns {
                row_buf.extend_from_slice(col.row(i));
            }
            current.push_row(&row_buf);
        }
        if !current.is_empty() {
            chunks.push(current);
        }

        log::debug!(
            "table built: {} column(s), {} row(s), {} byte row width, {} chunk(s)",
            entries.len(),
            row_count,
            row_width,
            chunks.len()
        );

        Ok(Self {
            entries,
            chunks,
            row_count,
            config,
        })
    }

    /// Resolves a column id to its `(byte offset, width)` within a packed
    /// row. Linear scan: the entry list is small and fixed.
    pub(crate) fn index(&self, column_id: u32) -> Option<(usize, usize)> {
        self.entries
            .iter()
            .find(|e| e.id == column_id)
            .map(|e| (e.offset, e.width))
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub(crate) fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub(crate) fn config(&self) -> &EngineConfig {
        &self.config
    }
}
