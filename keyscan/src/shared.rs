//! Key state shared across tasks.
//!
//! The matrix itself is owned by the scanning task. When other tasks need the key state, the
//! scanning task publishes the committed snapshot after each commit, and readers take a copy. The
//! snapshot is swapped as a whole inside a critical section, so readers never see a matrix that is
//! half old and half new.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;

use crate::RawMutex;
use crate::error::OutOfRange;
use crate::row::RowBits;
use crate::snapshot::MatrixSnapshot;

pub struct SharedMatrixState<R: RowBits, const ROW: usize, const COL: usize> {
    state: Mutex<RawMutex, Cell<MatrixSnapshot<R, ROW, COL>>>,
}

impl<R: RowBits, const ROW: usize, const COL: usize> Default for SharedMatrixState<R, ROW, COL> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RowBits, const ROW: usize, const COL: usize> SharedMatrixState<R, ROW, COL> {
    /// Create a shared state with every key released, usable in a `static`.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(MatrixSnapshot::new())),
        }
    }

    /// Replace the whole shared state.
    pub fn publish(&self, snapshot: &MatrixSnapshot<R, ROW, COL>) {
        self.state.lock(|state| state.set(*snapshot));
    }

    /// Copy of the latest published state
    pub fn snapshot(&self) -> MatrixSnapshot<R, ROW, COL> {
        self.state.lock(|state| state.get())
    }

    /// Whether the key at (`row`, `col`) is pressed in the latest published state.
    pub fn is_pressed(&self, row: usize, col: usize) -> Result<bool, OutOfRange> {
        self.snapshot().is_pressed(row, col)
    }
}
