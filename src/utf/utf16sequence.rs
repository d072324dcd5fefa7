use crate::utf::Endianness;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Utf16Type {
    Bmp(u16),
    Surrogate([u16; 2]),
}

/// The UTF-16 code units of a single scalar value, held in machine order.
///
/// Byte placement only happens in [`Utf16Sequence::write_to`], so the order
/// of the host never leaks into the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Utf16Sequence(Utf16Type);

impl From<char> for Utf16Sequence {
    #[inline]
    fn from(value: char) -> Self {
        let codepoint = value as u32;
        if codepoint <= 0xFFFF {
            return Self(Utf16Type::Bmp(codepoint as u16));
        }
        let offset = codepoint - 0x10000;
        let high = 0xD800 + (offset >> 10) as u16;
        let low = 0xDC00 + (offset & 0x3FF) as u16;
        Self(Utf16Type::Surrogate([high, low]))
    }
}

impl Utf16Sequence {
    #[inline]
    pub fn units(&self) -> &[u16] {
        match &self.0 {
            Utf16Type::Bmp(unit) => std::slice::from_ref(unit),
            Utf16Type::Surrogate(units) => units,
        }
    }

    #[allow(clippy::len_without_is_empty)]
    #[inline]
    pub const fn len(&self) -> usize {
        match self.0 {
            Utf16Type::Bmp(_) => 1,
            Utf16Type::Surrogate(_) => 2,
        }
    }

    #[inline]
    pub const fn is_surrogate(&self) -> bool {
        matches!(self.0, Utf16Type::Surrogate(_))
    }

    pub const fn get_codepoint(&self) -> u32 {
        match self.0 {
            Utf16Type::Bmp(unit) => unit as u32,
            Utf16Type::Surrogate([high, low]) => {
                ((high as u32 - 0xD800) * 0x400) + (low as u32 - 0xDC00) + 0x10000
            }
        }
    }

    /// Serializes every code unit into `buffer` and returns the filled part:
    /// two bytes for the BMP, four for a surrogate pair.
    #[inline]
    pub fn write_to(self, endianness: Endianness, buffer: &mut [u8; 4]) -> &[u8] {
        for (chunk, unit) in buffer.chunks_exact_mut(2).zip(self.units()) {
            chunk.copy_from_slice(&endianness.put_u16(*unit));
        }
        &buffer[..self.len() * 2]
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    #[test]
    fn bmp_is_one_unit() {
        let sequence = Utf16Sequence::from('€');
        assert!(!sequence.is_surrogate());
        assert_eq!(sequence.units(), &[0x20AC]);
        let mut buffer = [0; 4];
        assert_eq!(
            sequence.write_to(Endianness::LittleEndian, &mut buffer),
            &[0xAC, 0x20]
        );
        assert_eq!(
            sequence.write_to(Endianness::BigEndian, &mut buffer),
            &[0x20, 0xAC]
        );
    }

    #[test]
    fn supplementary_plane_keeps_both_units() {
        let sequence = Utf16Sequence::from('\u{1F600}');
        assert!(sequence.is_surrogate());
        assert_eq!(sequence.units(), &[0xD83D, 0xDE00]);
        let mut buffer = [0; 4];
        assert_eq!(
            sequence.write_to(Endianness::LittleEndian, &mut buffer),
            &[0x3D, 0xD8, 0x00, 0xDE]
        );
        assert_eq!(
            sequence.write_to(Endianness::BigEndian, &mut buffer),
            &[0xD8, 0x3D, 0xDE, 0x00]
        );
    }

    #[test]
    fn plane_edges() {
        assert_eq!(Utf16Sequence::from('\u{FFFF}').units(), &[0xFFFF]);
        assert_eq!(Utf16Sequence::from('\u{10000}').units(), &[0xD800, 0xDC00]);
        assert_eq!(Utf16Sequence::from('\u{10FFFF}').units(), &[0xDBFF, 0xDFFF]);
    }

    quickcheck! {
        fn matches_std_encoder(c: char) -> bool {
            let mut expected = [0u16; 2];
            let sequence = Utf16Sequence::from(c);
            sequence.units() == c.encode_utf16(&mut expected)
                && sequence.get_codepoint() == c as u32
        }
    }
}
