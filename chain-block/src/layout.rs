//! Binary block layout
//!
//! ```text
//! version(1) | timestamp(8) | reference(S) | len(4) | consensus data
//!            | len(4) | transaction data | generator(K) | signature(S)
//! ```
//!
//! All integers are big-endian. Length prefixes are signed 32-bit values.

use crate::{BlockField, CoreError, CoreResult, ParseError};
use bytes::{Buf, BufMut, BytesMut};

/// Size in bytes of a payload length prefix
pub const LENGTH_PREFIX: usize = 4;

/// Appends fields to a block buffer in wire order.
#[derive(Debug, Default)]
pub struct Encoder {
    buf: BytesMut,
}

impl Encoder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Append a fixed-size field as is
    pub fn field(mut self, field: &impl BlockField) -> Self {
        self.buf.put_slice(&field.bytes());
        self
    }

    /// Append an opaque payload behind its length prefix
    pub fn prefixed(mut self, field: &impl BlockField) -> CoreResult<Self> {
        let bytes = field.bytes();
        let len = i32::try_from(bytes.len()).map_err(|_| CoreError::PayloadTooLarge {
            field: field.name().to_string(),
            len: bytes.len(),
        })?;
        self.buf.put_i32(len);
        self.buf.put_slice(&bytes);
        Ok(self)
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}

/// Positional reader over an encoded block. Every read checks the remaining
/// length first, so malformed input yields a [`ParseError`] instead of a
/// panic.
#[derive(Debug)]
pub struct Decoder<'a> {
    buf: &'a [u8],
}

impl<'a> Decoder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Take exactly `len` bytes
    pub fn fixed(&mut self, field: &'static str, len: usize) -> Result<&'a [u8], ParseError> {
        if self.buf.remaining() < len {
            return Err(ParseError::Truncated {
                field,
                needed: len,
                remaining: self.buf.remaining(),
            });
        }
        let buf = self.buf;
        let (head, tail) = buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    /// Read a length prefix and take that many bytes
    pub fn prefixed(&mut self, field: &'static str) -> Result<&'a [u8], ParseError> {
        if self.buf.remaining() < LENGTH_PREFIX {
            return Err(ParseError::Truncated {
                field,
                needed: LENGTH_PREFIX,
                remaining: self.buf.remaining(),
            });
        }
        let length = self.buf.get_i32();
        let length = usize::try_from(length)
            .map_err(|_| ParseError::NegativeLength { field, length })?;

        if self.buf.remaining() < length {
            return Err(ParseError::LengthOverrun {
                field,
                length,
                remaining: self.buf.remaining(),
            });
        }
        let buf = self.buf;
        let (head, tail) = buf.split_at(length);
        self.buf = tail;
        Ok(head)
    }

    /// Fail if anything is left over
    pub fn finish(self) -> Result<(), ParseError> {
        match self.buf.remaining() {
            0 => Ok(()),
            count => Err(ParseError::TrailingBytes { count }),
        }
    }
}
