use super::{DebounceState, DebouncerTrait, sanitize_threshold};
use crate::DEBOUNCE_THRESHOLD;

/// Default matrix-wide debouncer.
///
/// A single counter is shared by all rows. Any row change re-arms it to the threshold, and every
/// scan pass decrements it. When it reaches zero, the whole candidate snapshot is committed.
///
/// One chattering key therefore delays the commit of every other row too. In exchange, the whole
/// debounce state is one byte.
pub struct DefaultDebouncer {
    threshold: u8,
    counter: u8,
}

impl Default for DefaultDebouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_THRESHOLD)
    }
}

impl DefaultDebouncer {
    /// Create a debouncer committing after `threshold` scan passes without a change.
    pub fn new(threshold: u8) -> Self {
        let threshold = sanitize_threshold(threshold);
        DefaultDebouncer {
            threshold,
            counter: threshold,
        }
    }

    /// Configured threshold
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Remaining scan passes until the next commit, 0 if nothing is pending
    pub fn remaining(&self) -> u8 {
        self.counter
    }
}

impl<const ROW: usize> DebouncerTrait<ROW> for DefaultDebouncer {
    fn bounce(&mut self, row: usize) {
        if self.counter != 0 {
            debug!("bounce!: row {}, counter {}", row, self.counter);
        }
        self.counter = self.threshold;
    }

    fn tick(&mut self, settled: &mut [bool; ROW]) -> DebounceState {
        if self.counter == 0 {
            return DebounceState::Idle;
        }
        self.counter -= 1;
        if self.counter != 0 {
            DebounceState::InProgress
        } else {
            settled.fill(true);
            DebounceState::Debounced
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tick(debouncer: &mut DefaultDebouncer) -> (DebounceState, [bool; 3]) {
        let mut settled = [false; 3];
        let state = DebouncerTrait::<3>::tick(debouncer, &mut settled);
        (state, settled)
    }

    #[test]
    fn test_initial_countdown() {
        let mut debouncer = DefaultDebouncer::new(3);
        assert_eq!(debouncer.remaining(), 3);
        assert_eq!(tick(&mut debouncer), (DebounceState::InProgress, [false; 3]));
        assert_eq!(tick(&mut debouncer), (DebounceState::InProgress, [false; 3]));
        assert_eq!(tick(&mut debouncer), (DebounceState::Debounced, [true; 3]));
        assert_eq!(tick(&mut debouncer), (DebounceState::Idle, [false; 3]));
    }

    #[test]
    fn test_bounce_rearms_global_counter() {
        let mut debouncer = DefaultDebouncer::new(3);
        tick(&mut debouncer);
        tick(&mut debouncer);
        assert_eq!(debouncer.remaining(), 1);
        // A bounce on any row restarts the countdown of the whole matrix
        DebouncerTrait::<3>::bounce(&mut debouncer, 2);
        assert_eq!(debouncer.remaining(), 3);
        assert_eq!(tick(&mut debouncer).0, DebounceState::InProgress);
        DebouncerTrait::<3>::bounce(&mut debouncer, 0);
        assert_eq!(tick(&mut debouncer).0, DebounceState::InProgress);
        assert_eq!(tick(&mut debouncer).0, DebounceState::InProgress);
        assert_eq!(tick(&mut debouncer), (DebounceState::Debounced, [true; 3]));
    }

    #[test]
    fn test_zero_threshold() {
        let mut debouncer = DefaultDebouncer::new(0);
        assert_eq!(debouncer.threshold(), 1);
        assert_eq!(tick(&mut debouncer), (DebounceState::Debounced, [true; 3]));
    }

    #[test]
    fn test_default_threshold() {
        assert_eq!(DefaultDebouncer::default().threshold(), DEBOUNCE_THRESHOLD.max(1));
    }
}
