//! Binned frequency histograms over one packed column.
//!
//! The scan never decodes values through a dictionary: bin boundaries are
//! given in the column's packed (big-endian) value domain, so each row costs
//! one fixed-width byte decode plus a bin lookup. Bin lookup uses a
//! probe-and-correct interpolation search seeded by the uniform bucket
//! width; the directional walk keeps it correct for arbitrarily skewed bin
//! spacing, while roughly uniform bins resolve in constant time.
//!
//! Chunks are scanned by a fixed pool of scoped worker threads fed from a
//! bounded queue. Each worker accumulates a private histogram (no shared
//! state in the per-row loop) and merges it into the shared result with one
//! atomic add per bucket once its queue side drains.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use crate::error::KolomError;
use crate::kernels::ordinal::decode_ordinal;
use crate::table::Table;

impl Table {
    /// Computes a binned frequency histogram over the column `column_id`.
    ///
    /// `bins` are non-decreasing bucket boundaries in the column's packed
    /// value domain; `bins.len() - 1` counts are returned. Bucket `j` counts
    /// values in `[bins[j], bins[j+1])`, except the last bucket, which is
    /// closed at the top: `[bins[k-2], bins[k-1]]`. Values below `bins[0]`
    /// or above `bins[k-1]` are excluded, so when every value lies within
    /// the boundary span, the counts sum to the table's row count.
    ///
    /// The call validates eagerly, runs synchronously until every chunk is
    /// scanned, and is deterministic regardless of pool size, chunk size, or
    /// scheduling order. No partial histogram is ever returned on error.
    pub fn histogram(&self, column_id: u32, bins: &[u64]) -> Result<Vec<u64>, KolomError> {
        if bins.len() < 2 {
            return Err(KolomError::InsufficientBins(bins.len()));
        }
        if bins.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(KolomError::BinsNotSorted(bins.to_vec()));
        }
        let (offset, width) = self
            .index(column_id)
            .ok_or(KolomError::ColumnNotFound(column_id))?;
        if width > 8 {
            return Err(KolomError::UnsupportedColumnWidth(width));
        }

        let indexer = BinIndexer::new(bins);
        let workers = self.config().worker_threads;
        let slots = bins.len() + 1;

        // One atomic per interior bucket; slots 0 and k (out of range below
        // and above) are dropped at merge time.
        let shared: Vec<AtomicU64> = (0..bins.len() - 1).map(|_| AtomicU64::new(0)).collect();

        log::debug!(
            "histogram scan: column {}, {} chunk(s), {} worker(s), queue depth {}",
            column_id,
            self.chunk_count(),
            workers,
            self.config().queue_depth
        );

        let (tx, rx) = crossbeam_channel::bounded(self.config().queue_depth);

        let scan = AssertUnwindSafe(|| {
            thread::scope(|s| {
                for _ in 0..workers {
                    let rx = rx.clone();
                    let indexer = &indexer;
                    let shared = &shared;
                    s.spawn(move || {
                        let mut local = vec![0u64; slots];
                        for task in rx {
                            for view in task {
                                local[indexer.slot_of(decode_ordinal(view))] += 1;
                            }
                        }
                        for (bucket, &count) in local[1..slots - 1].iter().enumerate() {
                            if count != 0 {
                                shared[bucket].fetch_add(count, Ordering::Relaxed);
                            }
                        }
                    });
                }
                drop(rx);

                for chunk in self.chunks() {
                    // Blocks when the queue is full; a send error means every
                    // worker has already exited, which only happens on panic.
                    if tx.send(chunk.column_slices(offset, width)).is_err() {
                        break;
                    }
                }
                drop(tx);
            });
        });

        // A worker panic surfaces as one aggregated error for the whole
        // call, never as a partial histogram.
        if let Err(payload) = panic::catch_unwind(scan) {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic payload".to_string());
            return Err(KolomError::WorkerPanic(msg));
        }

        Ok(shared.into_iter().map(AtomicU64::into_inner).collect())
    }
}

//==================================================================================
// Bin Indexer
//==================================================================================

/// Maps a packed column value to a histogram slot: `0` for below-range,
/// `1..=k-1` for interior bucket `slot - 1`, and `k` for above-range, where
/// `k = bins.len()`.
struct BinIndexer<'a> {
    bins: &'a [u64],
    min: u64,
    max: u64,
    /// Uniform bucket width used to seed the interpolation probe; zero when
    /// all boundaries coincide.
    uniform_width: u64,
}

impl<'a> BinIndexer<'a> {
    /// `bins` must be non-decreasing with at least two boundaries; the
    /// caller validates.
    fn new(bins: &'a [u64]) -> Self {
        let min = bins[0];
        let max = bins[bins.len() - 1];
        Self {
            bins,
            min,
            max,
            uniform_width: (max - min) / (bins.len() as u64 - 1),
        }
    }

    fn slot_of(&self, v: u64) -> usize {
        let k = self.bins.len();
        if v < self.min {
            return 0;
        }
        if v > self.max {
            return k;
        }
        if v == self.max {
            // The last bucket is closed at the top.
            return k - 1;
        }

        // Interpolation probe, assuming roughly uniform spacing.
        let mut idx = if self.uniform_width == 0 {
            0
        } else {
            (((v - self.min) / self.uniform_width) as usize).min(k - 2)
        };

        // Directional correction walk; one bin at a time until
        // bins[idx] <= v < bins[idx+1]. Terminates because v is in
        // [min, max) here and the boundaries are non-decreasing.
        while idx > 0 && v < self.bins[idx] {
            idx -= 1;
        }
        while idx < k - 2 && v >= self.bins[idx + 1] {
            idx += 1;
        }
        idx + 1
    }
}
