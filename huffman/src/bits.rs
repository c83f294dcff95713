use std::slice;

use crate::code::Code;

/// Bit-packed codes.
///
/// Bits are stored most significant bit first. The lowest `padding_bits`
/// bits of the last byte are filler, there are at most 7 of them and none
/// when `bytes` is empty.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct CompressedPayload {
    pub bytes: Vec<u8>,
    pub padding_bits: u8,
}

impl CompressedPayload {
    /// Number of meaningful bits.
    pub fn bit_len(&self) -> u64 {
        (self.bytes.len() as u64 * 8).saturating_sub(self.padding_bits as u64)
    }
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    current: u8,
    num_current: u8,
}

impl BitWriter {
    pub fn new() -> BitWriter {
        BitWriter::default()
    }
    pub fn with_capacity(num_bits: usize) -> BitWriter {
        BitWriter {
            bytes: Vec::with_capacity((num_bits + 7) / 8),
            current: 0,
            num_current: 0,
        }
    }
    pub fn push(&mut self, bit: bool) {
        self.current |= (bit as u8) << (7 - self.num_current);
        self.num_current += 1;
        if self.num_current == 8 {
            self.bytes.push(self.current);
            self.current = 0;
            self.num_current = 0;
        }
    }
    pub fn push_code(&mut self, code: &Code) {
        for &bit in code.bits() {
            self.push(bit);
        }
    }
    pub fn bit_len(&self) -> u64 {
        self.bytes.len() as u64 * 8 + self.num_current as u64
    }
    /// Fills the last byte up with zero bits.
    pub fn finish(mut self) -> CompressedPayload {
        let padding_bits = (8 - self.num_current) % 8;
        if self.num_current != 0 {
            self.bytes.push(self.current);
        }
        CompressedPayload {
            bytes: self.bytes,
            padding_bits: padding_bits,
        }
    }
}

struct Bits {
    byte: u8,
    remaining_bits: u8,
}

impl Bits {
    fn new(byte: u8) -> Bits {
        Bits {
            byte: byte,
            remaining_bits: 8,
        }
    }
    fn empty() -> Bits {
        Bits {
            byte: 0,
            remaining_bits: 0,
        }
    }
}

impl Iterator for Bits {
    type Item = bool;
    fn next(&mut self) -> Option<bool> {
        if self.remaining_bits == 0 {
            return None;
        }
        self.remaining_bits -= 1;
        let result = self.byte & 0x80 != 0;
        self.byte <<= 1;
        Some(result)
    }
}

/// Iterator over the meaningful bits of a payload, see [`unpack`].
pub struct Unpacked<'a> {
    bytes: slice::Iter<'a, u8>,
    current: Bits,
    remaining: u64,
}

impl<'a> Iterator for Unpacked<'a> {
    type Item = bool;
    fn next(&mut self) -> Option<bool> {
        if self.remaining == 0 {
            return None;
        }
        let bit = match self.current.next() {
            Some(bit) => bit,
            None => {
                self.current = Bits::new(*self.bytes.next()?);
                self.current.next()?
            }
        };
        self.remaining -= 1;
        Some(bit)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining as usize;
        (len, Some(len))
    }
}

impl<'a> ExactSizeIterator for Unpacked<'a> {}

/// Expands `bytes` into bits, most significant bit first, dropping the last
/// `padding_bits` bits.
pub fn unpack(bytes: &[u8], padding_bits: u8) -> Unpacked {
    Unpacked {
        bytes: bytes.iter(),
        current: Bits::empty(),
        remaining: (bytes.len() as u64 * 8).saturating_sub(padding_bits as u64),
    }
}

/// Whether the filler bits of the last byte are all zero.
pub fn padding_is_zero(bytes: &[u8], padding_bits: u8) -> bool {
    match bytes.last() {
        Some(&last) if padding_bits != 0 && padding_bits < 8 => {
            last & ((1u8 << padding_bits) - 1) == 0
        }
        _ => true,
    }
}
