/// Bitstream reader. Reads bits out of a byte slice, most significant bit first.
#[derive(Debug)]
pub struct Bitstream<'data> {
    data: &'data [u8],
    byte_cursor: usize,
    bit_cursor: u8,
}

impl<'data> Bitstream<'data> {
    /// Creates a new bitstream.
    pub fn new(data: &'data [u8]) -> Self {
        Self {
            data,
            byte_cursor: 0,
            bit_cursor: 0,
        }
    }

    /// Number of bits left before the end of the data.
    pub fn remaining_bits(&self) -> usize {
        (self.data.len() - self.byte_cursor) * 8 - self.bit_cursor as usize
    }

    /// Reads a single bit, returning `None` once the data is exhausted.
    pub fn read_bit(&mut self) -> Option<u8> {
        let current_byte = *self.data.get(self.byte_cursor)?;
        let current_bit = 1u8 & (current_byte >> (7 - self.bit_cursor));

        self.bit_cursor += 1;
        if self.bit_cursor == 8 {
            self.byte_cursor += 1;
            self.bit_cursor = 0;
        }
        Some(current_bit)
    }
}

impl Iterator for Bitstream<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining_bits();
        (remaining, Some(remaining))
    }
}

/// Packs bits into bytes, most significant bit first.
#[derive(Debug, Default)]
pub struct BitWriter {
    data: Vec<u8>,
    bit_cursor: u8,
}

impl BitWriter {
    /// Creates a writer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity(bits.div_ceil(8)),
            bit_cursor: 0,
        }
    }

    /// Appends one bit. Any non-zero value is written as 1.
    pub fn write_bit(&mut self, bit: u8) {
        if self.bit_cursor == 0 {
            self.data.push(0);
        }
        if bit != 0 {
            if let Some(last) = self.data.last_mut() {
                *last |= 1 << (7 - self.bit_cursor);
            }
        }
        self.bit_cursor = (self.bit_cursor + 1) % 8;
    }

    /// Returns the packed bytes. A trailing partial byte is padded with zero bits.
    pub fn finish(self) -> Vec<u8> {
        self.data
    }
}

#[test]
fn reads_msb_first() {
    let data = [0b1010_0000, 0xFF];
    let mut stream = Bitstream::new(&data);
    assert_eq!(stream.read_bit(), Some(1));
    assert_eq!(stream.read_bit(), Some(0));
    assert_eq!(stream.read_bit(), Some(1));
    assert_eq!(stream.remaining_bits(), 13);
    assert_eq!(stream.by_ref().filter(|&bit| bit == 1).count(), 8);
    assert_eq!(stream.read_bit(), None);
    assert_eq!(stream.remaining_bits(), 0);
}

#[test]
fn writer_pads_partial_byte() {
    let mut writer = BitWriter::with_capacity(10);
    for bit in [1, 1, 1, 1, 0, 0, 0, 0, 1, 1] {
        writer.write_bit(bit);
    }
    assert_eq!(writer.finish(), vec![0xF0, 0xC0]);
}

#[test]
fn empty_writer_is_empty() {
    assert!(BitWriter::default().finish().is_empty());
}
