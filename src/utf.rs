pub mod utf16sequence;
pub mod utf8sequence;

pub(crate) trait Utf {
    type Point;
    fn get_codepoint(&self) -> u32;
    fn add_point(&mut self, point: Self::Point) -> bool;
    fn is_complete(&self) -> bool;
    fn is_valid(&self) -> bool {
        is_valid_codepoint(self.get_codepoint())
    }
}

pub const fn is_valid_codepoint(codepoint: u32) -> bool {
    char::from_u32(codepoint).is_some()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Endianness {
    BigEndian,
    LittleEndian,
}

impl Endianness {
    /// Byte order of the host, decided at compile time for the target.
    #[inline]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Endianness::BigEndian
        } else {
            Endianness::LittleEndian
        }
    }

    /// Lays out one UTF-16 code unit in this byte order.
    #[inline]
    pub const fn put_u16(self, unit: u16) -> [u8; 2] {
        let high = (unit >> 8) as u8;
        let low = (unit & 0xFF) as u8;
        match self {
            Endianness::BigEndian => [high, low],
            Endianness::LittleEndian => [low, high],
        }
    }

    #[inline]
    pub const fn get_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Endianness::BigEndian => ((bytes[0] as u16) << 8) | bytes[1] as u16,
            Endianness::LittleEndian => ((bytes[1] as u16) << 8) | bytes[0] as u16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_u16_orders_bytes() {
        assert_eq!(Endianness::LittleEndian.put_u16(0x20AC), [0xAC, 0x20]);
        assert_eq!(Endianness::BigEndian.put_u16(0x20AC), [0x20, 0xAC]);
    }

    #[test]
    fn get_u16_reverses_put_u16() {
        for endianness in [Endianness::BigEndian, Endianness::LittleEndian] {
            assert_eq!(endianness.get_u16(endianness.put_u16(0xD83D)), 0xD83D);
        }
    }

    #[test]
    fn native_matches_target() {
        let expected = if 1u16.to_ne_bytes() == [0, 1] {
            Endianness::BigEndian
        } else {
            Endianness::LittleEndian
        };
        assert_eq!(Endianness::native(), expected);
    }

    #[test]
    fn surrogates_are_not_codepoints() {
        assert!(is_valid_codepoint(0x41));
        assert!(is_valid_codepoint(0x10FFFF));
        assert!(!is_valid_codepoint(0xD800));
        assert!(!is_valid_codepoint(0x110000));
    }
}
