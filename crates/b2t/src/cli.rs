//! Shared plumbing for the `to-bin` and `from-bin` binaries.

use std::io::{self, Read, Write};

use tracing_subscriber::EnvFilter;

use crate::dispatch::{decode_text, encode_text, DecodeOptions, Format};
use crate::error::Result;

/// Installs a stderr subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be set when called from tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// JSON text to bytes in the named format.
pub fn pack(json: &str, format: &str) -> Result<Vec<u8>> {
    encode_text(json, format.parse::<Format>()?)
}

/// Bytes in the named format to JSON text.
pub fn unpack(bytes: &[u8], format: &str, indent: Option<usize>) -> Result<String> {
    decode_text(bytes, format.parse::<Format>()?, DecodeOptions { indent })
}

pub fn read_stdin() -> io::Result<Vec<u8>> {
    let mut input = Vec::new();
    io::stdin().lock().read_to_end(&mut input)?;
    Ok(input)
}

pub fn write_stdout(bytes: &[u8]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(bytes)?;
    out.flush()
}
