//! Debounce policies.
//!
//! The matrix keeps a candidate snapshot that follows the raw reads. A debouncer decides, once
//! per scan pass, which candidate rows have been stable long enough to be committed.

pub mod default_debouncer;
pub mod per_row_debouncer;

pub use default_debouncer::DefaultDebouncer;
pub use per_row_debouncer::PerRowDebouncer;

pub trait DebouncerTrait<const ROW: usize> {
    /// The candidate value of `row` has just changed.
    fn bounce(&mut self, row: usize);

    /// Close a scan pass.
    ///
    /// Rows that may be copied from the candidate into the committed snapshot are flagged in
    /// `settled`. The returned state tells the matrix whether a countdown is still running.
    fn tick(&mut self, settled: &mut [bool; ROW]) -> DebounceState;
}

/// Debounce state
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// Nothing to debounce, no countdown is running
    Idle,
    /// A countdown is still running
    InProgress,
    /// The last running countdown reached zero in this pass
    Debounced,
}

/// Threshold of zero never commits anything, use the smallest working one instead.
pub(crate) fn sanitize_threshold(threshold: u8) -> u8 {
    if threshold == 0 {
        warn!("Debounce threshold 0 is not supported, using 1");
        1
    } else {
        threshold
    }
}
