//! Bounds-checked byte cursor over the input buffer.

use crate::error::DecodeError;

/// Architectural upper bound on the length of one instruction.
pub const MAX_INSTRUCTION_LENGTH: usize = 15;

/// Sequential reader over a caller-owned buffer.
///
/// Tracks the offset of the instruction being decoded so that every read can
/// be checked against both the buffer end and the 15 byte instruction limit.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    start: usize,
    address: u64,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor positioned at `position`, whose first byte lives at `address`.
    pub fn new(data: &'a [u8], position: usize, address: u64) -> Self {
        let position = position.min(data.len());
        Self {
            data,
            pos: position,
            start: position,
            address,
        }
    }

    /// Address of the first byte of the current instruction.
    pub fn address(&self) -> u64 {
        self.address
    }

    /// Number of bytes consumed by the current instruction so far.
    pub fn consumed(&self) -> usize {
        self.pos - self.start
    }

    /// Number of unread bytes left in the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Bytes consumed by the current instruction.
    pub fn instruction_bytes(&self) -> &'a [u8] {
        &self.data[self.start..self.pos]
    }

    fn check(&self, count: usize) -> Result<(), DecodeError> {
        let consumed = self.consumed();
        if consumed + count > MAX_INSTRUCTION_LENGTH {
            return Err(DecodeError::invalid(self.address));
        }
        if count > self.remaining() {
            return Err(DecodeError::no_more_bytes(
                self.address,
                consumed + count,
                self.data.len() - self.start,
            ));
        }
        Ok(())
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> Option<u8> {
        if self.consumed() >= MAX_INSTRUCTION_LENGTH {
            return None;
        }
        self.data.get(self.pos).copied()
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.check(1)?;
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Reads a little-endian u16.
    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian u32.
    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian u64.
    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        self.check(N)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_little_endian() {
        let data = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        let mut cursor = ByteCursor::new(&data, 0, 0x1000);
        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(cursor.consumed(), 6);
        assert_eq!(cursor.instruction_bytes(), &data);
    }

    #[test]
    fn test_buffer_end_is_reported() {
        let data = [0x90, 0x01];
        let mut cursor = ByteCursor::new(&data, 1, 0x2000);
        assert_eq!(cursor.read_u8().unwrap(), 0x01);
        assert_eq!(
            cursor.read_u16(),
            Err(DecodeError::no_more_bytes(0x2000, 3, 1))
        );
        assert_eq!(cursor.consumed(), 1);
    }

    #[test]
    fn test_fifteen_byte_limit() {
        let data = [0x66u8; 32];
        let mut cursor = ByteCursor::new(&data, 0, 0);
        for _ in 0..MAX_INSTRUCTION_LENGTH {
            cursor.read_u8().unwrap();
        }
        assert_eq!(cursor.peek_u8(), None);
        assert_eq!(cursor.read_u8(), Err(DecodeError::invalid(0)));
    }

    #[test]
    fn test_position_past_end_is_clamped() {
        let data = [0x90];
        let cursor = ByteCursor::new(&data, 10, 0);
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(cursor.peek_u8(), None);
    }
}
