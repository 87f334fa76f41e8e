//! Bit-packed row of the key matrix.

use core::fmt::Debug;
use core::ops::{BitAnd, BitOr, BitXor, Not};

/// A fixed-width unsigned bit-field holding one matrix row, one bit per column.
///
/// Bit `n` is set when the key in column `n` is pressed. Pick the narrowest type that holds all
/// columns of the board: `u8` for up to 8 columns, `u16` for up to 16 and so on.
pub trait RowBits:
    Copy
    + Eq
    + Default
    + Debug
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
{
    /// Number of columns this row type can hold
    const BITS: usize;
    /// Row with no key pressed
    const EMPTY: Self;

    /// Row with the lowest `cols` bits set
    fn mask(cols: usize) -> Self;

    /// Whether the key in column `col` is pressed
    fn bit(self, col: usize) -> bool;

    /// Copy of this row with column `col` set to `pressed`
    fn with_bit(self, col: usize, pressed: bool) -> Self;

    /// Number of pressed keys in this row
    fn count_pressed(self) -> u32;
}

macro_rules! impl_row_bits {
    ($($t:ty),* $(,)?) => {
        $(
            impl RowBits for $t {
                const BITS: usize = <$t>::BITS as usize;
                const EMPTY: Self = 0;

                #[inline]
                fn mask(cols: usize) -> Self {
                    if cols >= <Self as RowBits>::BITS {
                        <$t>::MAX
                    } else {
                        ((1 as $t) << cols) - 1
                    }
                }

                #[inline]
                fn bit(self, col: usize) -> bool {
                    col < <Self as RowBits>::BITS && self & ((1 as $t) << col) != 0
                }

                #[inline]
                fn with_bit(self, col: usize, pressed: bool) -> Self {
                    if col >= <Self as RowBits>::BITS {
                        self
                    } else if pressed {
                        self | ((1 as $t) << col)
                    } else {
                        self & !((1 as $t) << col)
                    }
                }

                #[inline]
                fn count_pressed(self) -> u32 {
                    self.count_ones()
                }
            }
        )*
    };
}

impl_row_bits!(u8, u16, u32, u64, u128);
