//! Keyboard matrix scanning and debouncing.
//!
//! [`Matrix`] samples a row/column switch grid through a [`MatrixIo`] adapter, debounces the raw
//! reads and exposes the committed key state to the upper layers.
//!
//! ```rust,ignore
//! let io = PinMatrixIo::new(row_pins, col_pins, ActiveLevel::Low);
//! let mut matrix: Matrix<_, _, u16, _, 5, 14> =
//!     Matrix::new(io, DefaultDebouncer::default(), embassy_time::Delay, MatrixConfig::default());
//! loop {
//!     matrix.scan_pass()?;
//!     if matrix.is_pressed(0, 0)? {
//!         // ...
//!     }
//! }
//! ```
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod config;
pub mod debounce;
pub mod error;
pub mod event;
pub mod input_device;
pub mod io;
pub mod matrix;
pub mod row;
pub mod shared;
pub mod snapshot;

pub use config::MatrixConfig;
pub use debounce::{DebounceState, DebouncerTrait, DefaultDebouncer, PerRowDebouncer};
pub use error::{OutOfRange, PinError, ScanError};
pub use event::{KeyPos, KeyboardEvent};
pub use input_device::InputDevice;
pub use io::{ActiveLevel, MatrixIo, PinMatrixIo};
pub use matrix::{Matrix, ScanStatus};
pub use row::RowBits;
pub use shared::SharedMatrixState;
pub use snapshot::{MAX_ROWS, MatrixDump, MatrixSnapshot};

pub type RawMutex = embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

include!(concat!(env!("OUT_DIR"), "/constants.rs"));
