//! Pixel work distribution for render threads.
//!
//! Workers pull pixels one at a time from a shared cursor that walks the
//! image in row-major order. The cursor is the only mutable state the
//! render threads share.

use std::sync::{Mutex, PoisonError};

/// A pixel coordinate, the unit of work handed to a render thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub row: u32,
    pub col: u32,
}

/// Cursor state guarded by the distributor's lock.
#[derive(Debug, Default)]
struct Cursor {
    row: u32,
    col: u32,
    processed: u64,
    percent: u32,
    next_threshold: u64,
}

impl Cursor {
    /// Hand out the pixel under the cursor and move one column on,
    /// wrapping to the next row.
    ///
    /// Returns the pixel and, when a new whole percent was reached, the
    /// new progress percentage.
    fn advance(&mut self, rows: u32, cols: u32, total: u64) -> Option<(Pixel, Option<u32>)> {
        if self.row >= rows || cols == 0 {
            return None;
        }

        let pixel = Pixel {
            row: self.row,
            col: self.col,
        };
        self.col += 1;
        if self.col == cols {
            self.col = 0;
            self.row += 1;
        }

        self.processed += 1;
        let mut progress = None;
        if self.processed >= self.next_threshold {
            self.percent = (self.processed * 100 / total) as u32;
            self.next_threshold = percent_threshold(total, self.percent + 1);
            progress = Some(self.percent);
        }

        Some((pixel, progress))
    }
}

/// Smallest pixel count at which `percent` percent of `total` is done.
fn percent_threshold(total: u64, percent: u32) -> u64 {
    (total * percent as u64).div_ceil(100)
}

/// Thread-safe row-major cursor over a `rows` x `cols` pixel grid.
pub struct PixelDistributor {
    rows: u32,
    cols: u32,
    total: u64,
    debug_print: bool,
    cursor: Mutex<Cursor>,
}

impl PixelDistributor {
    /// Create a distributor for a `rows` x `cols` grid. With `debug_print`
    /// set, progress is logged each time a new whole percent is reached.
    pub fn new(rows: u32, cols: u32, debug_print: bool) -> Self {
        let total = rows as u64 * cols as u64;
        Self {
            rows,
            cols,
            total,
            debug_print,
            cursor: Mutex::new(Cursor {
                next_threshold: percent_threshold(total, 1),
                ..Cursor::default()
            }),
        }
    }

    /// Total number of pixels in the grid.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Take the next pixel, or `None` once every pixel has been handed out.
    pub fn next_pixel(&self) -> Option<Pixel> {
        let (pixel, progress) = {
            let mut cursor = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
            cursor.advance(self.rows, self.cols, self.total)?
        };

        if self.debug_print {
            if let Some(percent) = progress {
                log::info!("render progress: {percent:02}%");
            }
        }
        Some(pixel)
    }

    /// Pixels handed out so far.
    pub fn processed(&self) -> u64 {
        self.cursor.lock().unwrap_or_else(PoisonError::into_inner).processed
    }

    /// Last whole percent of the grid handed out.
    pub fn percent(&self) -> u32 {
        self.cursor.lock().unwrap_or_else(PoisonError::into_inner).percent
    }
}
