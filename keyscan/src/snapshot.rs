//! Matrix state store.
//!
//! A [`MatrixSnapshot`] is `ROW` bit-packed rows of `COL` columns. The matrix keeps two of them:
//! the candidate snapshot, which follows the raw reads, and the committed snapshot, which is the
//! debounced state handed to the upper layers.

use core::fmt;

use crate::error::OutOfRange;
use crate::event::KeyboardEvent;
use crate::row::RowBits;

/// Largest row count a [`KeyPos`](crate::event::KeyPos) can address
pub const MAX_ROWS: usize = u8::MAX as usize + 1;

/// Longest dump line: a `u128` row behind its two digit index, or the header of 128 columns
pub(crate) const DUMP_LINE_SIZE: usize = 4 + 128;

/// A full `ROW` x `COL` key matrix, one [`RowBits`] value per row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatrixSnapshot<R: RowBits, const ROW: usize, const COL: usize> {
    rows: [R; ROW],
}

impl<R: RowBits, const ROW: usize, const COL: usize> Default for MatrixSnapshot<R, ROW, COL> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RowBits, const ROW: usize, const COL: usize> MatrixSnapshot<R, ROW, COL> {
    const FITS: () = {
        assert!(COL <= R::BITS, "the row type is too narrow for the column count");
        assert!(ROW <= MAX_ROWS, "key positions address at most 256 rows");
    };

    /// Create a snapshot with every key released.
    pub const fn new() -> Self {
        let () = Self::FITS;
        Self { rows: [R::EMPTY; ROW] }
    }

    /// Create a snapshot from raw rows. Bits past `COL` are cleared.
    pub fn from_rows(rows: [R; ROW]) -> Self {
        let mut snapshot = Self::new();
        for (dst, src) in snapshot.rows.iter_mut().zip(rows) {
            *dst = src & R::mask(COL);
        }
        snapshot
    }

    /// Number of rows
    pub const fn row_count(&self) -> usize {
        ROW
    }

    /// Number of columns
    pub const fn col_count(&self) -> usize {
        COL
    }

    /// All rows, in row order
    pub fn rows(&self) -> &[R; ROW] {
        &self.rows
    }

    /// Whether the key at (`row`, `col`) is pressed.
    pub fn is_pressed(&self, row: usize, col: usize) -> Result<bool, OutOfRange> {
        if col >= COL {
            return Err(OutOfRange::Col(col));
        }
        Ok(self.get_row(row)?.bit(col))
    }

    /// The whole bit-field of `row`.
    pub fn get_row(&self, row: usize) -> Result<R, OutOfRange> {
        self.rows.get(row).copied().ok_or(OutOfRange::Row(row))
    }

    /// Number of pressed keys in the whole matrix
    pub fn pressed_count(&self) -> u32 {
        self.rows.iter().map(|r| r.count_pressed()).sum()
    }

    /// True if no key is pressed
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| *r == R::EMPTY)
    }

    /// Iterate over the keys whose state differs between `previous` and `self`.
    ///
    /// Keys are visited in row-major order, each yielding its state in `self`.
    pub fn changes<'a>(&'a self, previous: &'a Self) -> impl Iterator<Item = KeyboardEvent> + 'a {
        self.rows
            .iter()
            .zip(previous.rows.iter())
            .enumerate()
            .filter(|(_, (now, before))| now != before)
            .flat_map(|(row, (now, before))| {
                let diff = *now ^ *before;
                (0..COL)
                    .filter(move |col| diff.bit(*col))
                    .map(move |col| KeyboardEvent::key(row as u8, col as u8, now.bit(col)))
            })
    }

    /// Human readable rendering of the matrix, see the [`fmt::Display`] impl.
    pub fn dump(&self) -> MatrixDump<'_, R, ROW, COL> {
        MatrixDump(self)
    }

    pub(crate) fn set_row(&mut self, row: usize, value: R) {
        self.rows[row] = value;
    }

    pub(crate) fn set_key(&mut self, row: usize, col: usize, pressed: bool) {
        self.rows[row] = self.rows[row].with_bit(col, pressed);
    }
}

/// Renders a [`MatrixSnapshot`] as a header line of column indices followed by one line per row:
///
/// ```text
/// r/c 0123456789ABCDEF
/// 00: 0000000000000000
/// 01: 0100000000000000
/// ```
pub struct MatrixDump<'a, R: RowBits, const ROW: usize, const COL: usize>(&'a MatrixSnapshot<R, ROW, COL>);

impl<R: RowBits, const ROW: usize, const COL: usize> fmt::Display for MatrixDump<'_, R, ROW, COL> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, COL)?;
        for (row, bits) in self.0.rows.iter().enumerate() {
            f.write_str("\n")?;
            write_row(f, row, *bits, COL)?;
        }
        Ok(())
    }
}

impl<R: RowBits, const ROW: usize, const COL: usize> fmt::Display for MatrixSnapshot<R, ROW, COL> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.dump(), f)
    }
}

/// Write the dump header: the column indices modulo 16, in hex.
pub(crate) fn write_header<W: fmt::Write>(w: &mut W, cols: usize) -> fmt::Result {
    w.write_str("r/c ")?;
    for col in 0..cols {
        write!(w, "{:X}", col % 16)?;
    }
    Ok(())
}

/// Write one dump line: the row index in hex, then the column bits starting from column 0.
pub(crate) fn write_row<W: fmt::Write, R: RowBits>(w: &mut W, row: usize, bits: R, cols: usize) -> fmt::Result {
    write!(w, "{row:02X}: ")?;
    for col in 0..cols {
        w.write_char(if bits.bit(col) { '1' } else { '0' })?;
    }
    Ok(())
}
