// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bounds-checked text output over a caller buffer.

use super::{SerError, SerResult};
use std::fmt::{self, Write as _};

/// Writer over a caller-provided byte buffer.
///
/// Never grows and never writes past the end: an overlong fragment returns
/// [`SerError::BufferTooSmall`] and leaves the earlier output intact.
pub struct TextWriter<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> TextWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.offset == 0
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn written(&self) -> &[u8] {
        &self.buffer[..self.offset]
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> SerResult<usize> {
        if data.len() > self.remaining() {
            return Err(SerError::BufferTooSmall {
                offset: self.offset,
                needed: data.len() - self.remaining(),
            });
        }
        self.buffer[self.offset..self.offset + data.len()].copy_from_slice(data);
        self.offset += data.len();
        Ok(data.len())
    }

    pub fn write_str(&mut self, text: &str) -> SerResult<usize> {
        self.write_bytes(text.as_bytes())
    }

    pub fn write_byte(&mut self, byte: u8) -> SerResult<usize> {
        self.write_bytes(&[byte])
    }

    /// Format `args` in place.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> SerResult<usize> {
        let start = self.offset;
        let mut sink = Sink {
            buffer: &mut self.buffer[start..],
            len: 0,
            overflow: 0,
        };
        if sink.write_fmt(args).is_err() {
            return Err(SerError::BufferTooSmall {
                offset: start,
                needed: sink.overflow,
            });
        }
        self.offset += sink.len;
        Ok(sink.len)
    }

    /// Append a NUL after the output without counting it.
    pub fn terminate(&mut self) -> SerResult<()> {
        if self.remaining() == 0 {
            return Err(SerError::BufferTooSmall {
                offset: self.offset,
                needed: 1,
            });
        }
        self.buffer[self.offset] = 0;
        Ok(())
    }
}

struct Sink<'b> {
    buffer: &'b mut [u8],
    len: usize,
    overflow: usize,
}

impl fmt::Write for Sink<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let free = self.buffer.len() - self.len;
        if s.len() > free {
            self.overflow = s.len() - free;
            return Err(fmt::Error);
        }
        self.buffer[self.len..self.len + s.len()].copy_from_slice(s.as_bytes());
        self.len += s.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_overflow() {
        let mut buf = [0u8; 8];
        let mut w = TextWriter::new(&mut buf);
        assert_eq!(w.write_str("abc").unwrap(), 3);
        assert_eq!(w.write_fmt(format_args!("{}", 42)).unwrap(), 2);
        assert_eq!(w.written(), b"abc42");
        assert!(matches!(
            w.write_str("toolong"),
            Err(SerError::BufferTooSmall { offset: 5, .. })
        ));
        assert_eq!(w.len(), 5);
        w.terminate().unwrap();
        assert_eq!(buf[5], 0);
    }

    #[test]
    fn test_fmt_overflow_keeps_offset() {
        let mut buf = [0u8; 4];
        let mut w = TextWriter::new(&mut buf);
        assert!(w.write_fmt(format_args!("{}", 123456)).is_err());
        assert!(w.is_empty());
    }
}
