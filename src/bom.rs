use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::utf::Endianness;

pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// What [`UTF8_BOM`] decodes to.
pub const UTF8_BOM_CHAR: char = '\u{FEFF}';

/// Byte order announced by the first two bytes of a UTF-16 stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ByteOrderMark {
    LittleEndian,
    BigEndian,
    None,
}

impl ByteOrderMark {
    #[inline]
    pub const fn classify(bytes: [u8; 2]) -> Self {
        match bytes {
            [0xFF, 0xFE] => ByteOrderMark::LittleEndian,
            [0xFE, 0xFF] => ByteOrderMark::BigEndian,
            _ => ByteOrderMark::None,
        }
    }

    pub const fn endianness(self) -> Option<Endianness> {
        match self {
            ByteOrderMark::LittleEndian => Some(Endianness::LittleEndian),
            ByteOrderMark::BigEndian => Some(Endianness::BigEndian),
            ByteOrderMark::None => None,
        }
    }

    pub const fn utf16_bytes(self) -> Option<[u8; 2]> {
        match self {
            ByteOrderMark::LittleEndian => Some(UTF16_LE_BOM),
            ByteOrderMark::BigEndian => Some(UTF16_BE_BOM),
            ByteOrderMark::None => None,
        }
    }
}

impl From<Endianness> for ByteOrderMark {
    fn from(value: Endianness) -> Self {
        match value {
            Endianness::LittleEndian => ByteOrderMark::LittleEndian,
            Endianness::BigEndian => ByteOrderMark::BigEndian,
        }
    }
}

/// Consumes exactly two bytes from `src` and classifies them.
///
/// Nothing is pushed back when no mark is found; the two bytes are handed to
/// the caller instead so they can be reprocessed.
pub fn read_utf16_bom<R: Read + ?Sized>(src: &mut R) -> Result<([u8; 2], ByteOrderMark)> {
    let mut buffer = [0u8; 2];
    src.read_exact(&mut buffer).map_err(Error::Read)?;
    Ok((buffer, ByteOrderMark::classify(buffer)))
}

pub fn write_utf16_bom<W: Write + ?Sized>(mark: ByteOrderMark, dst: &mut W) -> Result<()> {
    let bytes = mark.utf16_bytes().ok_or(Error::NoBom)?;
    dst.write_all(&bytes).map_err(Error::Write)
}

pub fn write_utf8_bom<W: Write + ?Sized>(dst: &mut W) -> Result<()> {
    dst.write_all(&UTF8_BOM).map_err(Error::Write)
}
