use super::{DebounceState, DebouncerTrait, sanitize_threshold};
use crate::DEBOUNCE_THRESHOLD;

/// Per-row debouncer.
///
/// Same countdown as [`DefaultDebouncer`](super::DefaultDebouncer), but every row owns its
/// counter: a chattering key only delays its own row. Costs one byte per row.
pub struct PerRowDebouncer<const ROW: usize> {
    threshold: u8,
    counters: [u8; ROW],
}

impl<const ROW: usize> Default for PerRowDebouncer<ROW> {
    fn default() -> Self {
        Self::new(DEBOUNCE_THRESHOLD)
    }
}

impl<const ROW: usize> PerRowDebouncer<ROW> {
    /// Create a per-row debouncer
    pub fn new(threshold: u8) -> Self {
        let threshold = sanitize_threshold(threshold);
        PerRowDebouncer {
            threshold,
            counters: [threshold; ROW],
        }
    }

    /// Configured threshold
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Remaining scan passes until `row` is committed, 0 if nothing is pending
    pub fn remaining(&self, row: usize) -> Option<u8> {
        self.counters.get(row).copied()
    }
}

impl<const ROW: usize> DebouncerTrait<ROW> for PerRowDebouncer<ROW> {
    fn bounce(&mut self, row: usize) {
        let Some(counter) = self.counters.get_mut(row) else {
            return;
        };
        if *counter != 0 {
            debug!("bounce!: row {}, counter {}", row, *counter);
        }
        *counter = self.threshold;
    }

    fn tick(&mut self, settled: &mut [bool; ROW]) -> DebounceState {
        let mut in_progress = false;
        let mut debounced = false;
        for (counter, settled) in self.counters.iter_mut().zip(settled.iter_mut()) {
            if *counter == 0 {
                continue;
            }
            *counter -= 1;
            if *counter == 0 {
                *settled = true;
                debounced = true;
            } else {
                in_progress = true;
            }
        }

        // Rows may settle while others are still counting, the matrix commits them either way
        if in_progress {
            DebounceState::InProgress
        } else if debounced {
            DebounceState::Debounced
        } else {
            DebounceState::Idle
        }
    }
}
