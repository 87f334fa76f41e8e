//! Runtime configuration of the matrix scanner.
//!
//! Defaults come from the build-time constants, which `build.rs` reads from the TOML file named by
//! `KEYSCAN_CONFIG_PATH`:
//!
//! ```toml
//! [matrix]
//! debounce = 5
//! select_delay_us = 30
//! debounce_tick_us = 1000
//! ```

use embassy_time::Duration;

use crate::{DEBOUNCE_TICK_US, SELECT_DELAY_US};

/// Timing of a scan pass.
///
/// The debounce threshold is not part of it: it belongs to the debouncer, see
/// [`DefaultDebouncer::new`](crate::debounce::DefaultDebouncer::new).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixConfig {
    /// Settle time between selecting a row and reading its columns.
    ///
    /// Reads are unstable without it, the required value depends on the board.
    pub select_delay: Duration,
    /// Pause after a scan pass whose debounce countdown is still running.
    ///
    /// The debounce threshold counts scan passes, so this is the unit of the debounce time.
    pub debounce_tick: Duration,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            select_delay: Duration::from_micros(SELECT_DELAY_US as u64),
            debounce_tick: Duration::from_micros(DEBOUNCE_TICK_US as u64),
        }
    }
}

impl MatrixConfig {
    /// Config without any delay, useful for simulated matrices.
    pub const fn no_delay() -> Self {
        Self {
            select_delay: Duration::from_micros(0),
            debounce_tick: Duration::from_micros(0),
        }
    }

    pub(crate) fn select_delay_us(&self) -> u32 {
        as_delay_us(self.select_delay)
    }

    pub(crate) fn debounce_tick_us(&self) -> u32 {
        as_delay_us(self.debounce_tick)
    }
}

fn as_delay_us(duration: Duration) -> u32 {
    u32::try_from(duration.as_micros()).unwrap_or(u32::MAX)
}
