//! Errors of the matrix scanner and the matrix state queries.

use core::fmt;

/// Error raised while scanning the matrix.
///
/// Contact bounce is not an error: it only delays the commit. The only failure a scan pass can
/// report is the electrical adapter refusing to select a row or to sense the columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanError<E> {
    /// The matrix adapter failed
    Io(E),
}

impl<E> From<E> for ScanError<E> {
    fn from(e: E) -> Self {
        ScanError::Io(e)
    }
}

impl<E: fmt::Debug> fmt::Display for ScanError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Io(e) => write!(f, "matrix adapter error: {e:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for ScanError<E> {}

/// A matrix query addressed a key outside of the matrix geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutOfRange {
    /// Row index is not smaller than the row count
    Row(usize),
    /// Column index is not smaller than the column count
    Col(usize),
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutOfRange::Row(row) => write!(f, "row {row} is out of range"),
            OutOfRange::Col(col) => write!(f, "column {col} is out of range"),
        }
    }
}

impl core::error::Error for OutOfRange {}

/// Errors of [`PinMatrixIo`](crate::io::PinMatrixIo).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Driving a row pin failed
    Output,
    /// Sensing a column pin failed
    Input,
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinError::Output => write!(f, "failed to drive row pin"),
            PinError::Input => write!(f, "failed to read column pin"),
        }
    }
}

impl core::error::Error for PinError {}
