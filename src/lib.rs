//! UTF-16 byte order marks and a streaming UTF-8 to UTF-16 transcoder.

pub mod bom;
pub mod cancel;
pub mod error;
pub mod transcode;
pub mod utf;

use std::{
    ffi::OsString,
    fs::File,
    io,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use log::{info, warn};

pub use bom::{read_utf16_bom, write_utf16_bom, write_utf8_bom, ByteOrderMark};
pub use cancel::CancelToken;
pub use error::{Error, Result};
pub use transcode::{transcode, utf8_to_utf16, TranscodeOptions};
pub use utf::{utf16sequence::Utf16Sequence, utf8sequence::Utf8Reader, Endianness};

pub const USAGE: &str = "Usage: utf16 [--bom] [--le | --be] [--verbose] <input> <output> ...";

/// Command line of the `utf16` binary.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub options: TranscodeOptions,
    pub verbose: bool,
    pub pairs: Vec<(PathBuf, PathBuf)>,
}

impl Args {
    pub fn parse<I>(argv: I) -> Result<Self, io::Error>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut args = Args::default();
        let mut paths = Vec::new();
        let mut flags_done = false;
        for argument in argv {
            if flags_done || !argument.to_string_lossy().starts_with('-') {
                paths.push(PathBuf::from(argument));
                continue;
            }
            let byte_order = match argument.to_str() {
                Some("--") => {
                    flags_done = true;
                    continue;
                }
                Some("--bom") => {
                    args.options.utf16_bom = true;
                    continue;
                }
                Some("-v" | "--verbose") => {
                    args.verbose = true;
                    continue;
                }
                Some("--le") => Endianness::LittleEndian,
                Some("--be") => Endianness::BigEndian,
                _ => return Err(invalid_input(format!("unknown flag {argument:?}"))),
            };
            if args.options.byte_order.is_some_and(|order| order != byte_order) {
                return Err(invalid_input("--le and --be are exclusive".to_string()));
            }
            args.options.byte_order = Some(byte_order);
        }
        if paths.is_empty() || paths.len() % 2 != 0 {
            return Err(invalid_input(
                "expected <input> <output> path pairs".to_string(),
            ));
        }
        args.pairs = paths.into_iter().tuples().collect();
        Ok(args)
    }
}

fn invalid_input(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

pub fn utf16<I>(argv: I) -> Result<(), Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = OsString>,
{
    let args = Args::parse(argv)?;
    run(&args, &CancelToken::new())
}

/// Converts every pair in order. A failed pair is reported and skipped; the
/// run as a whole fails if any pair did.
pub fn run(args: &Args, cancel: &CancelToken) -> Result<(), Box<dyn std::error::Error>> {
    let mut failed = 0usize;
    for (input, output) in args.pairs.iter() {
        print!("{}: ", input.display());
        match convert_file(input, output, &args.options, cancel) {
            Ok(()) => {
                info!("{} -> {}", input.display(), output.display());
                println!("{}", output.display());
            }
            Err(error) => {
                warn!("{}: {error}", input.display());
                println!("{error}");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        return Err(format!("{failed} of {} conversions failed", args.pairs.len()).into());
    }
    Ok(())
}

pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &TranscodeOptions,
    cancel: &CancelToken,
) -> Result<()> {
    let src = File::open(input).map_err(Error::Read)?;
    let dst = File::create(output).map_err(Error::Write)?;
    transcode(src, dst, options, cancel)
}

pub fn setup_logging(verbose: bool) -> Result<(), fern::InitError> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()?;
    Ok(())
}
