use bitvec::prelude::*;

/// A read-only, bit-addressed view over a byte buffer.
///
/// Bit `i` lives in byte `i / 8` at offset `i % 8` counted from the least
/// significant bit, i.e. `(bytes[i / 8] >> (i % 8)) & 1`. The trie uses this
/// view over a key hash to pick the left (0) or right (1) branch at depth `i`.
#[derive(Clone, Copy, Debug)]
pub struct KeyBits<'a> {
    bits: &'a BitSlice<u8, Lsb0>,
}

impl<'a> KeyBits<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bits: bytes.view_bits::<Lsb0>(),
        }
    }

    /// Number of addressable bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bit at `index`; `true` means the right branch.
    ///
    /// # Panics
    ///
    /// If `index >= self.len()`. Callers bound the index by the proof depth,
    /// which is checked against the digest width beforehand.
    pub fn bit(&self, index: usize) -> bool {
        self.bits[index]
    }
}

/// Shorthand for `KeyBits::new(bytes).bit(index)`.
pub fn bit_at(bytes: &[u8], index: usize) -> bool {
    KeyBits::new(bytes).bit(index)
}
