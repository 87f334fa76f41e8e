#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embassy_time::Duration;
use keyscan::{DebouncerTrait, Matrix, MatrixConfig, MatrixIo, RowBits};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub const SELECT_DELAY_US: u32 = 30;
pub const DEBOUNCE_TICK_US: u32 = 1000;

pub fn test_config() -> MatrixConfig {
    MatrixConfig {
        select_delay: Duration::from_micros(SELECT_DELAY_US as u64),
        debounce_tick: Duration::from_micros(DEBOUNCE_TICK_US as u64),
    }
}

/// Everything the matrix asks from the hardware, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Select(usize),
    Unselect,
    Read(usize),
    Delay(u32),
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockIoError;

/// Raw value of a row in a scan pass, passes are numbered from 1
pub type RawFn<R> = Box<dyn Fn(usize, usize) -> R>;

/// Matrix adapter replaying a scripted raw key state.
///
/// A pass starts when row 0 is selected. Selecting a row while another one is still selected, or
/// reading without a selected row, panics.
pub struct ScriptedIo<R> {
    raw: RawFn<R>,
    pass: usize,
    selected: Option<usize>,
    fail_select: Option<(usize, usize)>,
    fail_read: Option<(usize, usize)>,
    log: CallLog,
}

impl<R: RowBits> ScriptedIo<R> {
    pub fn new(log: CallLog, raw: impl Fn(usize, usize) -> R + 'static) -> Self {
        Self {
            raw: Box::new(raw),
            pass: 0,
            selected: None,
            fail_select: None,
            fail_read: None,
            log,
        }
    }

    /// Fail selecting `row` in scan pass `pass`, the row is left unselected
    pub fn fail_select_at(mut self, pass: usize, row: usize) -> Self {
        self.fail_select = Some((pass, row));
        self
    }

    /// Fail reading `row` in scan pass `pass`
    pub fn fail_read_at(mut self, pass: usize, row: usize) -> Self {
        self.fail_read = Some((pass, row));
        self
    }
}

impl<R: RowBits> MatrixIo<R> for ScriptedIo<R> {
    type Error = MockIoError;

    fn select_row(&mut self, row: usize) -> Result<(), Self::Error> {
        assert_eq!(self.selected, None, "row {row} selected while another row is driven");
        if row == 0 {
            self.pass += 1;
        }
        self.log.borrow_mut().push(Call::Select(row));
        if self.fail_select == Some((self.pass, row)) {
            return Err(MockIoError);
        }
        self.selected = Some(row);
        Ok(())
    }

    fn unselect_rows(&mut self) -> Result<(), Self::Error> {
        self.selected = None;
        self.log.borrow_mut().push(Call::Unselect);
        Ok(())
    }

    fn read_columns(&mut self) -> Result<R, Self::Error> {
        let row = self.selected.expect("columns read without a selected row");
        self.log.borrow_mut().push(Call::Read(row));
        if self.fail_read == Some((self.pass, row)) {
            return Err(MockIoError);
        }
        Ok((self.raw)(self.pass, row))
    }
}

/// Delay which returns immediately and records the requested time
pub struct RecordingDelay {
    log: CallLog,
}

impl RecordingDelay {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl embedded_hal::delay::DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Call::Delay(ns / 1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Call::Delay(us));
    }
}

impl embedded_hal_async::delay::DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Call::Delay(ns / 1000));
    }

    async fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Call::Delay(us));
    }
}

pub type TestMatrix<D, R, const ROW: usize, const COL: usize> = Matrix<ScriptedIo<R>, D, R, RecordingDelay, ROW, COL>;

/// Build a matrix over a scripted adapter, returning the shared call log as well
pub fn scripted_matrix<D, R, const ROW: usize, const COL: usize>(
    debouncer: D,
    raw: impl Fn(usize, usize) -> R + 'static,
) -> (TestMatrix<D, R, ROW, COL>, CallLog)
where
    D: DebouncerTrait<ROW>,
    R: RowBits,
{
    let log = CallLog::default();
    let io = ScriptedIo::new(log.clone(), raw);
    let matrix = Matrix::new(io, debouncer, RecordingDelay::new(log.clone()), test_config());
    (matrix, log)
}

/// Committed rows as an array, for compact assertions
pub fn committed<D, R, const ROW: usize, const COL: usize>(matrix: &TestMatrix<D, R, ROW, COL>) -> [R; ROW]
where
    D: DebouncerTrait<ROW>,
    R: RowBits,
{
    *matrix.state().rows()
}
