use crate::error::EncodingError;

/// Append-only big-endian encoder.
///
/// Layouts produced here:
/// ```text
/// i32         4 bytes, big-endian, two's complement
/// bool        1 byte, 0x00 or 0x01
/// vlong       1..=9 bytes, zero-compressed (see `write_vlong`)
/// byte array  vlong length + raw bytes
/// writable    i32 length + raw bytes
/// ```
#[derive(Debug, Default)]
pub struct DataOutput {
    buf: Vec<u8>,
}

impl DataOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Write a length or count as an `i32`.
    ///
    /// The format cannot represent more than `i32::MAX`; larger values are
    /// a caller bug, asserted in debug builds and clamped otherwise so the
    /// reader fails on a short buffer instead of misparsing.
    pub fn write_len(&mut self, len: usize) {
        debug_assert!(
            len <= i32::MAX as usize,
            "length {len} exceeds the i32 range of the format"
        );
        self.write_i32(i32::try_from(len).unwrap_or(i32::MAX));
    }

    /// Zero-compressed variable-length integer.
    ///
    /// Values in `-112..=127` take a single byte. Otherwise the first byte
    /// encodes sign and byte count (`-113..=-120` positive, `-121..=-128`
    /// negative, where negatives are stored one's-complemented), followed by
    /// the magnitude big-endian with leading zero bytes dropped.
    pub fn write_vlong(&mut self, value: i64) {
        if (-112..=127).contains(&value) {
            self.buf.push(value as i8 as u8);
            return;
        }

        let mut len: i64 = -112;
        let mut magnitude = value;
        if magnitude < 0 {
            magnitude ^= -1;
            len = -120;
        }

        let mut tmp = magnitude;
        while tmp != 0 {
            tmp >>= 8;
            len -= 1;
        }
        self.buf.push(len as i8 as u8);

        let byte_count = if len < -120 { -(len + 120) } else { -(len + 112) };
        for idx in (0..byte_count).rev() {
            self.buf.push((magnitude >> (idx * 8)) as u8);
        }
    }

    /// Byte array with a variable-length size prefix.
    pub fn write_byte_array(&mut self, data: &[u8]) {
        self.write_vlong(data.len() as i64);
        self.buf.extend_from_slice(data);
    }

    /// Byte array with a fixed 4-byte size prefix.
    pub fn write_writable_bytes(&mut self, data: &[u8]) {
        self.write_len(data.len());
        self.buf.extend_from_slice(data);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor-based decoder over a borrowed buffer, the inverse of [`DataOutput`].
#[derive(Debug)]
pub struct DataInput<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> DataInput<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], EncodingError> {
        if self.remaining() < n {
            return Err(EncodingError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, EncodingError> {
        Ok(self.take(1)?[0])
    }

    /// Any non-zero byte reads as `true`.
    pub fn read_bool(&mut self) -> Result<bool, EncodingError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_i32(&mut self) -> Result<i32, EncodingError> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(self.take(4)?);
        Ok(i32::from_be_bytes(raw))
    }

    /// Read a non-negative `i32` length or count.
    pub fn read_len(&mut self) -> Result<usize, EncodingError> {
        let len = self.read_i32()?;
        usize::try_from(len).map_err(|_| EncodingError::InvalidLength(len as i64))
    }

    pub fn read_vlong(&mut self) -> Result<i64, EncodingError> {
        let first = self.read_u8()? as i8;
        let size = decode_vint_size(first);
        if size == 1 {
            return Ok(first as i64);
        }

        let mut value: i64 = 0;
        for &b in self.take(size - 1)? {
            value = (value << 8) | b as i64;
        }
        if is_negative_vint(first) {
            Ok(value ^ -1)
        } else {
            Ok(value)
        }
    }

    pub fn read_byte_array(&mut self) -> Result<Vec<u8>, EncodingError> {
        let len = self.read_vlong()?;
        let len = usize::try_from(len).map_err(|_| EncodingError::InvalidLength(len))?;
        Ok(self.take(len)?.to_vec())
    }

    pub fn read_writable_bytes(&mut self) -> Result<Vec<u8>, EncodingError> {
        let len = self.read_len()?;
        Ok(self.take(len)?.to_vec())
    }
}

fn decode_vint_size(first: i8) -> usize {
    if first >= -112 {
        1
    } else if first < -120 {
        (-119 - first as i32) as usize
    } else {
        (-111 - first as i32) as usize
    }
}

fn is_negative_vint(first: i8) -> bool {
    first < -120 || (-112..0).contains(&first)
}
