use postcard::experimental::max_size::MaxSize;
use serde::{Deserialize, Serialize};

/// Maximum encoded size of a [`KeyboardEvent`]
pub const KEYBOARD_EVENT_MAX_SIZE: usize = KeyboardEvent::POSTCARD_MAX_SIZE;

/// `KeyboardEvent` reports a key whose committed state changed.
///
/// Events are derived from two committed snapshots, so they are already debounced. They are
/// serializable so that a split half can forward them over its link.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, MaxSize, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardEvent {
    pub pressed: bool,
    pub pos: KeyPos,
}

impl KeyboardEvent {
    pub fn key(row: u8, col: u8, pressed: bool) -> Self {
        Self {
            pressed,
            pos: KeyPos { row, col },
        }
    }

    /// Encode the event into `buf`, returning the used part of the buffer.
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], postcard::Error> {
        postcard::to_slice(self, buf)
    }

    /// Decode an event previously written by [`KeyboardEvent::encode`].
    pub fn decode(buf: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(buf)
    }
}

/// Position of a key in the matrix.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, MaxSize, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPos {
    pub row: u8,
    pub col: u8,
}
