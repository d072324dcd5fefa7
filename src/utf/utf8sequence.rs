use std::io::{self, BufReader, Bytes, Read};

use crate::utf::*;

pub(crate) struct Utf8Sequence {
    full_length: u8,
    current_length: u8,
    bytes: [u8; 4],
}

impl Utf for Utf8Sequence {
    type Point = u8;

    fn get_codepoint(&self) -> u32 {
        let mut codepoint = match self.full_length {
            1 => return self.bytes[0] as u32,
            2 => self.bytes[0] ^ 0b1100_0000,
            3 => self.bytes[0] ^ 0b1110_0000,
            _ => self.bytes[0] ^ 0b1111_0000,
        } as u32;
        for i in 1..self.current_len() {
            codepoint = (codepoint << 6) | ((self.bytes[i] ^ 0b10_000000) as u32);
        }
        codepoint
    }

    fn add_point(&mut self, point: Self::Point) -> bool {
        if self.is_complete() {
            return false;
        }
        if !(0x80..=0xBF).contains(&point) {
            return false;
        }
        self.bytes[self.current_len()] = point;
        self.current_length += 1;
        true
    }

    fn is_complete(&self) -> bool {
        self.current_length == self.full_length
    }

    fn is_valid(&self) -> bool {
        let codepoint = self.get_codepoint();
        if !self.is_complete() || !is_valid_codepoint(codepoint) {
            return false;
        }
        match self.full_length {
            1 => (..=0x7F).contains(&codepoint),
            2 => (0x80..=0x7FF).contains(&codepoint),
            3 => (0x800..=0xFFFF).contains(&codepoint),
            _ => (0x10000..=0x10FFFF).contains(&codepoint),
        }
    }
}

impl Utf8Sequence {
    /// Starts a sequence from its lead byte, `None` for bytes that can never
    /// begin one.
    pub const fn build(byte: u8) -> Option<Self> {
        let full_length = match byte.leading_ones() {
            0 => 1,
            n @ 2..=4 => n,
            _ => return None,
        } as u8;
        if Self::is_invalid(byte) {
            return None;
        }
        let mut bytes: [u8; 4] = [0; 4];
        bytes[0] = byte;
        Some(Self {
            full_length,
            current_length: 1,
            bytes,
        })
    }

    const fn is_invalid(byte: u8) -> bool {
        matches!(byte, 0xC0 | 0xC1 | 0xF5..)
    }

    pub const fn current_len(&self) -> usize {
        self.current_length as usize
    }

    pub fn to_char(&self) -> Option<char> {
        if self.is_valid() {
            char::from_u32(self.get_codepoint())
        } else {
            None
        }
    }
}

/// Reads a UTF-8 byte source one scalar value at a time.
///
/// Ill-formed input does not fail a read. Every broken sequence comes back as
/// a single U+FFFD, and the byte that interrupted it is decoded again as the
/// start of the next sequence.
pub struct Utf8Reader<R> {
    bytes: Bytes<BufReader<R>>,
    pending: Option<u8>,
}

impl<R: Read> Utf8Reader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            bytes: BufReader::new(inner).bytes(),
            pending: None,
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pending.take() {
            return Ok(Some(byte));
        }
        self.bytes.next().transpose()
    }

    /// `Ok(None)` once the source is exhausted.
    pub fn read_char(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.next_byte()? else {
            return Ok(None);
        };
        let Some(mut sequence) = Utf8Sequence::build(lead) else {
            return Ok(Some(char::REPLACEMENT_CHARACTER));
        };
        while !sequence.is_complete() {
            match self.next_byte()? {
                Some(byte) if sequence.add_point(byte) => {}
                Some(byte) => {
                    self.pending = Some(byte);
                    return Ok(Some(char::REPLACEMENT_CHARACTER));
                }
                None => return Ok(Some(char::REPLACEMENT_CHARACTER)),
            }
        }
        Ok(Some(
            sequence.to_char().unwrap_or(char::REPLACEMENT_CHARACTER),
        ))
    }
}

impl<R: Read> Iterator for Utf8Reader<R> {
    type Item = io::Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_char().transpose()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    fn decode(bytes: &[u8]) -> String {
        Utf8Reader::new(bytes)
            .collect::<io::Result<String>>()
            .unwrap()
    }

    #[test]
    fn empty_source_has_no_chars() {
        assert_eq!(Utf8Reader::new(io::empty()).read_char().unwrap(), None);
    }

    #[test]
    fn reads_every_width() {
        assert_eq!(decode("Aé€😀".as_bytes()), "Aé€😀");
    }

    #[test]
    fn bom_is_an_ordinary_char() {
        assert_eq!(decode(&[0xEF, 0xBB, 0xBF, b'A']), "\u{FEFF}A");
    }

    #[test]
    fn stray_continuation_is_replaced() {
        assert_eq!(decode(&[0x80, b'A']), "\u{FFFD}A");
    }

    #[test]
    fn interrupted_sequence_rereads_breaking_byte() {
        assert_eq!(decode(&[0xE2, 0x82, b'A']), "\u{FFFD}A");
        assert_eq!(decode(&[0xE2, 0xE2, 0x82, 0xAC]), "\u{FFFD}€");
    }

    #[test]
    fn truncated_sequence_at_end() {
        assert_eq!(decode(&[b'A', 0xF0, 0x9F]), "A\u{FFFD}");
    }

    #[test]
    fn overlong_and_surrogate_forms_are_replaced() {
        assert_eq!(decode(&[0xE0, 0x80, 0xAF]), "\u{FFFD}");
        assert_eq!(decode(&[0xED, 0xA0, 0x80]), "\u{FFFD}");
        assert_eq!(decode(&[0xC0, 0xAF]), "\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn beyond_unicode_is_replaced() {
        assert_eq!(decode(&[0xF4, 0x90, 0x80, 0x80]), "\u{FFFD}");
    }

    quickcheck! {
        fn well_formed_text_decodes_unchanged(text: String) -> bool {
            decode(text.as_bytes()) == text
        }
    }
}
