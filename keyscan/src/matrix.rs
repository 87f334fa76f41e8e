use embedded_hal::delay::DelayNs;
use embedded_hal_async::delay::DelayNs as AsyncDelayNs;
use heapless::String;

use crate::config::MatrixConfig;
use crate::debounce::{DebounceState, DebouncerTrait};
use crate::error::{OutOfRange, ScanError};
use crate::event::KeyboardEvent;
use crate::input_device::InputDevice;
use crate::io::MatrixIo;
use crate::row::RowBits;
use crate::snapshot::{DUMP_LINE_SIZE, MatrixDump, MatrixSnapshot, write_header, write_row};

/// Outcome of a scan pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanStatus {
    /// The matrix is settled, nothing is pending
    Idle,
    /// A debounce countdown is running, the committed state may lag behind the keys
    Debouncing,
    /// The candidate state was copied into the committed state in this pass
    Committed,
}

/// Matrix is the scanned and debounced key matrix of the keyboard.
///
/// Every scan pass reads all rows through the [`MatrixIo`] adapter into the candidate snapshot.
/// The [`DebouncerTrait`] implementation then decides which candidate rows are copied into the
/// committed snapshot, which is the state exposed to the upper layers.
///
/// The committed snapshot is only written at the end of a pass, after every row has been
/// sampled. A reader between two passes sees either the old or the new matrix, never a mix.
pub struct Matrix<IO, D, R, DL, const ROW: usize, const COL: usize>
where
    IO: MatrixIo<R>,
    D: DebouncerTrait<ROW>,
    R: RowBits,
{
    /// Electrical adapter
    io: IO,
    /// Debouncer
    debouncer: D,
    /// Busy-wait or timer backed delay
    delay: DL,
    /// Scan timing
    config: MatrixConfig,
    /// Last raw value of every row
    candidate: MatrixSnapshot<R, ROW, COL>,
    /// Debounced key state
    committed: MatrixSnapshot<R, ROW, COL>,
    /// Key state already emitted by `read_event`
    reported: MatrixSnapshot<R, ROW, COL>,
    /// Row lines have been released once
    lines_released: bool,
}

impl<IO, D, R, DL, const ROW: usize, const COL: usize> Matrix<IO, D, R, DL, ROW, COL>
where
    IO: MatrixIo<R>,
    D: DebouncerTrait<ROW>,
    R: RowBits,
{
    /// Create a matrix with every key released.
    pub fn new(io: IO, debouncer: D, delay: DL, config: MatrixConfig) -> Self {
        Matrix {
            io,
            debouncer,
            delay,
            config,
            candidate: MatrixSnapshot::new(),
            committed: MatrixSnapshot::new(),
            reported: MatrixSnapshot::new(),
            lines_released: false,
        }
    }

    /// Number of rows
    pub const fn row_count(&self) -> usize {
        ROW
    }

    /// Number of columns
    pub const fn col_count(&self) -> usize {
        COL
    }

    /// Whether the key at (`row`, `col`) is pressed in the committed state.
    pub fn is_pressed(&self, row: usize, col: usize) -> Result<bool, OutOfRange> {
        self.committed.is_pressed(row, col)
    }

    /// Committed bit-field of `row`.
    pub fn get_row(&self, row: usize) -> Result<R, OutOfRange> {
        self.committed.get_row(row)
    }

    /// The committed, debounced key state.
    pub fn state(&self) -> &MatrixSnapshot<R, ROW, COL> {
        &self.committed
    }

    /// The latest raw key state, not debounced.
    pub fn candidate(&self) -> &MatrixSnapshot<R, ROW, COL> {
        &self.candidate
    }

    /// Debouncer of this matrix
    pub fn debouncer(&self) -> &D {
        &self.debouncer
    }

    /// Human readable rendering of the committed state
    pub fn dump(&self) -> MatrixDump<'_, R, ROW, COL> {
        self.committed.dump()
    }

    /// Print the committed state, one log line per row.
    pub fn log_matrix(&self) {
        let mut line: String<DUMP_LINE_SIZE> = String::new();
        if write_header(&mut line, COL).is_err() {
            warn!("Matrix dump header truncated");
        }
        info!("{}", line.as_str());

        for (row, bits) in self.committed.rows().iter().enumerate() {
            line.clear();
            if write_row(&mut line, row, *bits, COL).is_err() {
                warn!("Matrix dump of row {} truncated", row);
            }
            info!("{}", line.as_str());
        }
    }

    /// Give the adapter and the delay back.
    pub fn release(self) -> (IO, DL) {
        (self.io, self.delay)
    }

    fn release_lines_once(&mut self) -> Result<(), ScanError<IO::Error>> {
        if !self.lines_released {
            self.io.unselect_rows()?;
            self.lines_released = true;
        }
        Ok(())
    }

    fn select(&mut self, row: usize) -> Result<(), ScanError<IO::Error>> {
        if let Err(e) = self.io.select_row(row) {
            error!("Failed to select row {}", row);
            let _ = self.io.unselect_rows();
            return Err(ScanError::Io(e));
        }
        Ok(())
    }

    /// Read the selected row into the candidate snapshot, then release the row.
    fn latch(&mut self, row: usize) -> Result<(), ScanError<IO::Error>> {
        let read = self.io.read_columns();
        let unselect = self.io.unselect_rows();
        let raw = match read {
            Ok(raw) => raw & R::mask(COL),
            Err(e) => {
                error!("Failed to read columns of row {}", row);
                return Err(ScanError::Io(e));
            }
        };
        unselect?;

        if self.candidate.rows()[row] != raw {
            self.candidate.set_row(row, raw);
            self.debouncer.bounce(row);
        }
        Ok(())
    }

    /// Close the pass: let the debouncer count, then commit the settled rows.
    fn settle(&mut self) -> ScanStatus {
        let mut settled = [false; ROW];
        let state = self.debouncer.tick(&mut settled);

        for (row, _) in settled.iter().enumerate().filter(|(_, settled)| **settled) {
            self.committed.set_row(row, self.candidate.rows()[row]);
        }

        match state {
            DebounceState::Idle => ScanStatus::Idle,
            DebounceState::InProgress => ScanStatus::Debouncing,
            DebounceState::Debounced => {
                debug!("Matrix committed, {} keys pressed", self.committed.pressed_count());
                ScanStatus::Committed
            }
        }
    }
}

impl<IO, D, R, DL, const ROW: usize, const COL: usize> Matrix<IO, D, R, DL, ROW, COL>
where
    IO: MatrixIo<R>,
    D: DebouncerTrait<ROW>,
    R: RowBits,
    DL: DelayNs,
{
    /// Run one scan pass, busy-waiting on the delays.
    ///
    /// Rows are sampled in order, one at a time. If the debounce countdown is still running at
    /// the end of the pass, the pass pauses for one debounce tick before returning.
    pub fn scan_pass(&mut self) -> Result<ScanStatus, ScanError<IO::Error>> {
        self.release_lines_once()?;
        for row in 0..ROW {
            self.select(row)?;
            DelayNs::delay_us(&mut self.delay, self.config.select_delay_us());
            self.latch(row)?;
        }

        let status = self.settle();
        if status == ScanStatus::Debouncing {
            DelayNs::delay_us(&mut self.delay, self.config.debounce_tick_us());
        }
        Ok(status)
    }
}

impl<IO, D, R, DL, const ROW: usize, const COL: usize> Matrix<IO, D, R, DL, ROW, COL>
where
    IO: MatrixIo<R>,
    D: DebouncerTrait<ROW>,
    R: RowBits,
    DL: AsyncDelayNs,
{
    /// Run one scan pass, awaiting the delays.
    ///
    /// Same algorithm as [`Matrix::scan_pass`].
    pub async fn scan_pass_async(&mut self) -> Result<ScanStatus, ScanError<IO::Error>> {
        self.release_lines_once()?;
        for row in 0..ROW {
            self.select(row)?;
            AsyncDelayNs::delay_us(&mut self.delay, self.config.select_delay_us()).await;
            self.latch(row)?;
        }

        let status = self.settle();
        if status == ScanStatus::Debouncing {
            AsyncDelayNs::delay_us(&mut self.delay, self.config.debounce_tick_us()).await;
        }
        Ok(status)
    }
}

impl<IO, D, R, DL, const ROW: usize, const COL: usize> InputDevice for Matrix<IO, D, R, DL, ROW, COL>
where
    IO: MatrixIo<R>,
    D: DebouncerTrait<ROW>,
    R: RowBits,
    DL: AsyncDelayNs,
{
    type Error = ScanError<IO::Error>;

    async fn read_event(&mut self) -> Result<KeyboardEvent, Self::Error> {
        loop {
            let next = self.committed.changes(&self.reported).next();
            if let Some(event) = next {
                self.reported
                    .set_key(event.pos.row as usize, event.pos.col as usize, event.pressed);
                return Ok(event);
            }
            self.scan_pass_async().await?;
        }
    }
}
