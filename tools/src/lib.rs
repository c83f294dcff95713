#[macro_use]
extern crate log;

use std::fs;
use std::io;
use std::path::Path;
use std::string::FromUtf8Error;
use texthuff_huffman::CompressionResult;
use texthuff_huffman::DecompressionError;
use texthuff_huffman::ParseError;
use thiserror::Error;

pub mod inspect;
pub mod warn_log;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
    #[error("malformed container: {0}")]
    Parse(#[from] ParseError),
    #[error("corrupt payload: {0}")]
    Decompression(#[from] DecompressionError),
}

pub fn read_text(path: &Path) -> Result<String, Error> {
    Ok(String::from_utf8(fs::read(path)?)?)
}

/// One-line description of the size change, e.g. `1024 -> 600 bytes
/// (41.41% smaller)`.
pub fn size_summary(result: &CompressionResult) -> String {
    let ratio = result.compression_ratio();
    let change = if ratio < 0.0 {
        format!("{:.2}% larger", -ratio)
    } else {
        format!("{:.2}% smaller", ratio)
    };
    format!("{} -> {} bytes ({})", result.original_size, result.compressed_size, change)
}

pub fn log_summary(path: &Path, result: &CompressionResult) {
    if result.is_expansion() {
        warn!("{}: output expanded, {}", path.display(), size_summary(result));
    } else {
        info!("{}: {}", path.display(), size_summary(result));
    }
}
