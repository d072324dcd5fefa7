use std::io::{BufWriter, Read, Write};

use log::debug;

use crate::bom::{write_utf16_bom, UTF8_BOM_CHAR};
use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::utf::{utf16sequence::Utf16Sequence, utf8sequence::Utf8Reader, Endianness};

/// How a UTF-8 stream is turned into UTF-16.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TranscodeOptions {
    /// Output byte order. `None` resolves to [`Endianness::native`] when the
    /// transcode starts.
    pub byte_order: Option<Endianness>,
    /// Prefix the output with the UTF-16 BOM of the resolved byte order.
    pub utf16_bom: bool,
}

impl TranscodeOptions {
    pub const fn with_byte_order(mut self, endianness: Endianness) -> Self {
        self.byte_order = Some(endianness);
        self
    }

    pub const fn with_utf16_bom(mut self, utf16_bom: bool) -> Self {
        self.utf16_bom = utf16_bom;
        self
    }

    pub fn resolved_byte_order(&self) -> Endianness {
        self.byte_order.unwrap_or_else(Endianness::native)
    }
}

/// Converts UTF-8 read from `src` into UTF-16 written to `dst` in the host
/// byte order.
pub fn utf8_to_utf16<R: Read, W: Write>(
    src: R,
    dst: W,
    output_utf16_bom: bool,
    cancel: &CancelToken,
) -> Result<()> {
    let options = TranscodeOptions::default().with_utf16_bom(output_utf16_bom);
    transcode(src, dst, &options, cancel)
}

/// Streams `src` into `dst` one code point at a time.
///
/// A leading U+FEFF in the input is dropped. `cancel` is polled before every
/// code point after the first; a cancelled run returns [`Error::Cancelled`]
/// once everything already converted has been flushed. An input without a
/// single code point fails with an end-of-input [`Error::Read`] and leaves
/// `dst` untouched.
pub fn transcode<R: Read, W: Write>(
    src: R,
    dst: W,
    options: &TranscodeOptions,
    cancel: &CancelToken,
) -> Result<()> {
    let endianness = options.resolved_byte_order();
    debug!(
        "transcoding UTF-8 to UTF-16 ({endianness:?}, bom: {})",
        options.utf16_bom
    );
    let mut reader = Utf8Reader::new(src);
    let Some(first) = reader.read_char().map_err(Error::Read)? else {
        return Err(Error::eof());
    };

    let mut writer = BufWriter::new(dst);
    let mut transcoder = Transcoder {
        writer: &mut writer,
        endianness,
        written: 0,
    };
    let result = transcoder.run(first, &mut reader, options.utf16_bom, cancel);
    debug!("{} code points written: {result:?}", transcoder.written);

    let flushed = match result {
        Err(Error::Write(_)) => Ok(()),
        _ => writer.flush().map_err(Error::Write),
    };
    // Anything still buffered after a failed write is abandoned, not retried.
    let _ = writer.into_parts();
    result.and(flushed)
}

struct Transcoder<'a, W: Write> {
    writer: &'a mut W,
    endianness: Endianness,
    written: usize,
}

impl<W: Write> Transcoder<'_, W> {
    fn run<R: Read>(
        &mut self,
        first: char,
        reader: &mut Utf8Reader<R>,
        utf16_bom: bool,
        cancel: &CancelToken,
    ) -> Result<()> {
        if utf16_bom {
            write_utf16_bom(self.endianness.into(), &mut *self.writer)?;
        }
        if first == UTF8_BOM_CHAR {
            debug!("dropping leading UTF-8 BOM");
        } else {
            self.write_char(first)?;
        }
        loop {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            match reader.read_char().map_err(Error::Read)? {
                Some(c) => self.write_char(c)?,
                None => return Ok(()),
            }
        }
    }

    #[inline]
    fn write_char(&mut self, c: char) -> Result<()> {
        let mut buffer = [0u8; 4];
        let bytes = Utf16Sequence::from(c).write_to(self.endianness, &mut buffer);
        self.writer.write_all(bytes).map_err(Error::Write)?;
        self.written += 1;
        Ok(())
    }
}
