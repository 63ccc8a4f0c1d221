//! Little-endian primitives for the persisted state format.

use crate::state::Error;

/// Reads primitives from a byte slice, front to back.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    /// Start reading at the front of `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// The bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], Error> {
        if self.bytes.len() < count {
            return Err(Error::Truncated);
        }
        let (head, tail) = self.bytes.split_at(count);
        self.bytes = tail;
        Ok(head)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read a little-endian `f32`.
    ///
    /// # Errors
    ///
    /// `Truncated` if fewer than 4 bytes remain.
    pub fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    /// Read a little-endian `i32`.
    ///
    /// # Errors
    ///
    /// `Truncated` if fewer than 4 bytes remain.
    pub fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    /// Read a string stored as an `i32` length, then that many bytes.
    ///
    /// The length counts a trailing NUL. A length of zero is the empty string.
    ///
    /// # Errors
    ///
    ///  - `Truncated` if the stream ends early.
    ///  - `InvalidText` for a negative length, a missing NUL, or bytes that
    ///    are not UTF-8.
    pub fn read_str8(&mut self) -> Result<String, Error> {
        let len = usize::try_from(self.read_i32()?).map_err(|_| Error::InvalidText)?;
        if len == 0 {
            return Ok(String::new());
        }
        let bytes = self.take(len)?;
        let (nul, text) = bytes.split_last().ok_or(Error::InvalidText)?;
        if *nul != 0 {
            return Err(Error::InvalidText);
        }
        std::str::from_utf8(text)
            .map(ToString::to_string)
            .map_err(|_| Error::InvalidText)
    }
}

/// Append a little-endian `f32`.
pub fn write_f32(out: &mut Vec<u8>, value: f32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Append a little-endian `i32`.
pub fn write_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

// The length prefix also counts the trailing NUL.
const MAX_STR8_BYTES: usize = i32::MAX as usize - 1;

/// The longest prefix of `text` within `max_bytes` that ends on a character boundary.
fn clip(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let end = (0..=max_bytes)
        .rev()
        .find(|i| text.is_char_boundary(*i))
        .unwrap_or(0);
    &text[..end]
}

fn write_str8_clipped(out: &mut Vec<u8>, text: &str, max_bytes: usize) {
    let text = clip(text, max_bytes);
    write_i32(out, i32::try_from(text.len() + 1).unwrap_or(i32::MAX));
    out.extend_from_slice(text.as_bytes());
    out.push(0);
}

/// Write a string readable by [`Reader::read_str8`].
///
/// Text over `i32::MAX - 1` bytes is cut at the last character that fits.
pub fn write_str8(out: &mut Vec<u8>, text: &str) {
    write_str8_clipped(out, text, MAX_STR8_BYTES);
}
