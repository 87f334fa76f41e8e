//! Electrical side of the matrix.
//!
//! The scanner never touches pins directly: it selects one row at a time through [`MatrixIo`]
//! and reads the columns of that row as a bit-field where a set bit means "pressed".

use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::PinError;
use crate::row::RowBits;

/// Access to the rows and columns of a key matrix.
///
/// Implementations own the board specific pin mapping and must normalize the electrical level:
/// [`MatrixIo::read_columns`] always returns 1 for a pressed key.
pub trait MatrixIo<R: RowBits> {
    type Error;

    /// Drive `row` active. Only one row is selected at a time.
    fn select_row(&mut self, row: usize) -> Result<(), Self::Error>;

    /// Return every row line to its inactive state.
    fn unselect_rows(&mut self) -> Result<(), Self::Error>;

    /// Sense the columns of the currently selected row.
    fn read_columns(&mut self) -> Result<R, Self::Error>;
}

/// Electrical level of a selected row and of a pressed key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Selected row is driven low, columns are pulled up and read low when pressed
    #[default]
    Low,
    /// Selected row is driven high, columns are pulled down and read high when pressed
    High,
}

/// [`MatrixIo`] over plain GPIOs: rows are output pins, columns are input pins.
pub struct PinMatrixIo<Out: OutputPin, In: InputPin, const ROW: usize, const COL: usize> {
    /// Output pins of the pcb matrix, one per row
    row_pins: [Out; ROW],
    /// Input pins of the pcb matrix, one per column
    col_pins: [In; COL],
    /// Pin active level
    active: ActiveLevel,
}

impl<Out: OutputPin, In: InputPin, const ROW: usize, const COL: usize> PinMatrixIo<Out, In, ROW, COL> {
    /// Create the adapter from row and column pins.
    ///
    /// Pins are expected to be configured already, including the pull resistors of the columns.
    pub fn new(row_pins: [Out; ROW], col_pins: [In; COL], active: ActiveLevel) -> Self {
        PinMatrixIo {
            row_pins,
            col_pins,
            active,
        }
    }

    /// Release the pins.
    pub fn release(self) -> ([Out; ROW], [In; COL]) {
        (self.row_pins, self.col_pins)
    }

    fn drive(pin: &mut Out, active: bool, level: ActiveLevel) -> Result<(), PinError> {
        let high = match level {
            ActiveLevel::Low => !active,
            ActiveLevel::High => active,
        };
        let result = if high { pin.set_high() } else { pin.set_low() };
        result.map_err(|_| PinError::Output)
    }
}

impl<R: RowBits, Out: OutputPin, In: InputPin, const ROW: usize, const COL: usize> MatrixIo<R>
    for PinMatrixIo<Out, In, ROW, COL>
{
    type Error = PinError;

    fn select_row(&mut self, row: usize) -> Result<(), Self::Error> {
        let level = self.active;
        if let Some(pin) = self.row_pins.get_mut(row) {
            Self::drive(pin, true, level)?;
        }
        Ok(())
    }

    fn unselect_rows(&mut self) -> Result<(), Self::Error> {
        let level = self.active;
        for pin in self.row_pins.iter_mut() {
            Self::drive(pin, false, level)?;
        }
        Ok(())
    }

    fn read_columns(&mut self) -> Result<R, Self::Error> {
        let mut bits = R::EMPTY;
        for (col, pin) in self.col_pins.iter_mut().enumerate() {
            let pressed = match self.active {
                ActiveLevel::Low => pin.is_low(),
                ActiveLevel::High => pin.is_high(),
            }
            .map_err(|_| PinError::Input)?;
            bits = bits.with_bit(col, pressed);
        }
        Ok(bits)
    }
}
