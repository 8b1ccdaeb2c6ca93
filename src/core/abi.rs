//! Solidity ABI Word Writer
//!
//! Produces the static-tuple layout of `abi.encode(...)`: every value
//! occupies one 32-byte word, integers right-aligned big-endian, addresses
//! left-padded to 32 bytes, `bytes32` verbatim. Fixed-length arrays of static
//! types are inlined element by element, so a `uint8[9]` is nine words.
//!
//! Dynamic types (`bytes`, `string`, `T[]`) are deliberately unsupported:
//! everything this engine hashes is a static tuple.

use super::hash::{keccak256, Hash32};

/// Width of one ABI word.
pub const WORD: usize = 32;

/// Builder for static `abi.encode` payloads.
#[derive(Clone, Debug, Default)]
pub struct AbiWriter {
    buf: Vec<u8>,
}

impl AbiWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `words` words.
    pub fn with_words(words: usize) -> Self {
        Self {
            buf: Vec::with_capacity(words * WORD),
        }
    }

    /// Append an unsigned integer of any width up to 64 bits.
    pub fn uint(&mut self, value: u64) -> &mut Self {
        let mut word = [0u8; WORD];
        word[WORD - 8..].copy_from_slice(&value.to_be_bytes());
        self.buf.extend_from_slice(&word);
        self
    }

    /// Append a `uint256` given as 32 big-endian bytes.
    pub fn uint256(&mut self, value: &[u8; 32]) -> &mut Self {
        self.buf.extend_from_slice(value);
        self
    }

    /// Append a `bool` (0 or 1).
    pub fn boolean(&mut self, value: bool) -> &mut Self {
        self.uint(value as u64)
    }

    /// Append an `address` (20 bytes, left-padded).
    pub fn address(&mut self, value: &[u8; 20]) -> &mut Self {
        let mut word = [0u8; WORD];
        word[WORD - 20..].copy_from_slice(value);
        self.buf.extend_from_slice(&word);
        self
    }

    /// Append a `bytes32` verbatim.
    pub fn bytes32(&mut self, value: &[u8; 32]) -> &mut Self {
        self.buf.extend_from_slice(value);
        self
    }

    /// Append a short ASCII tag as a left-aligned `bytes32`, like Solidity's
    /// `bytes32("TAG")` literal. Tags longer than 32 bytes are truncated.
    pub fn tag(&mut self, tag: &str) -> &mut Self {
        let mut word = [0u8; WORD];
        let bytes = tag.as_bytes();
        let len = bytes.len().min(WORD);
        word[..len].copy_from_slice(&bytes[..len]);
        self.buf.extend_from_slice(&word);
        self
    }

    /// Number of words written so far.
    pub fn word_count(&self) -> usize {
        self.buf.len() / WORD
    }

    /// Borrow the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the writer and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// `keccak256` of the encoded bytes.
    pub fn keccak(&self) -> Hash32 {
        keccak256(&self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint_is_right_aligned() {
        let mut w = AbiWriter::new();
        w.uint(0x0102);
        let bytes = w.as_bytes();
        assert_eq!(bytes.len(), WORD);
        assert!(bytes[..30].iter().all(|b| *b == 0));
        assert_eq!(&bytes[30..], &[0x01, 0x02]);
    }

    #[test]
    fn test_address_is_left_padded() {
        let mut w = AbiWriter::new();
        w.address(&[0xab; 20]);
        let bytes = w.as_bytes();
        assert!(bytes[..12].iter().all(|b| *b == 0));
        assert!(bytes[12..].iter().all(|b| *b == 0xab));
    }

    #[test]
    fn test_tag_is_left_aligned() {
        let mut w = AbiWriter::new();
        w.tag("SWAP");
        let bytes = w.as_bytes();
        assert_eq!(&bytes[..4], b"SWAP");
        assert!(bytes[4..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_word_count_and_chaining() {
        let mut w = AbiWriter::with_words(3);
        w.uint(1).boolean(true).bytes32(&[7; 32]);
        assert_eq!(w.word_count(), 3);
        assert_eq!(w.as_bytes()[63], 1);
        assert_eq!(w.as_bytes()[64], 7);
    }

    #[test]
    fn test_keccak_of_single_zero_word() {
        // keccak256(abi.encode(uint256(0)))
        let mut w = AbiWriter::new();
        w.uint(0);
        assert_eq!(
            hex::encode(w.keccak()),
            "290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563"
        );
    }
}
