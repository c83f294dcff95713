use std::ptr;
use thiserror::Error;
use warn::Ignore;
use warn::Warn;

use crate::bits;
use crate::bits::BitWriter;
use crate::bits::CompressedPayload;
use crate::code::CodeTable;
use crate::frequency::FrequencyTable;
use crate::tree::Tree;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Warning {
    /// The filler bits at the end of the payload are not all zero.
    NonZeroPadding,
    /// A stored code table disagrees with the codes derived from the stored
    /// frequencies. Decoding always uses the derived codes.
    CodeMismatch,
}

#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
pub enum DecompressionError {
    #[error("{0} padding bits, at most 7 are possible")]
    PaddingOutOfRange(u8),
    #[error("bit stream ends in the middle of a code")]
    IncompleteCode,
    #[error("bit stream selects a branch that is missing from the tree")]
    MissingBranch,
    #[error("decoded {actual} symbols, the frequency table counts {expected}")]
    SymbolCount { expected: u64, actual: u64 },
}

/// Everything produced while compressing one text.
#[derive(Clone, Debug, Default)]
pub struct CompressionResult {
    pub payload: CompressedPayload,
    pub codes: CodeTable,
    pub frequencies: FrequencyTable,
    pub tree: Option<Tree>,
    /// UTF-8 length of the input in bytes.
    pub original_size: usize,
    /// Length of the packed payload in bytes.
    pub compressed_size: usize,
}

impl CompressionResult {
    /// Space saved in percent of the original size. Negative if the payload
    /// is larger than the input, zero for empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        let original = self.original_size as f64;
        (original - self.compressed_size as f64) / original * 100.0
    }
    pub fn is_expansion(&self) -> bool {
        self.compressed_size > self.original_size
    }
}

pub fn compress(text: &str) -> CompressionResult {
    if text.is_empty() {
        return CompressionResult::default();
    }
    let frequencies = FrequencyTable::count(text);
    let tree = Tree::from_frequencies(&frequencies);
    let codes = CodeTable::generate(tree.as_ref());

    let mut writer = BitWriter::with_capacity(codes.encoded_bit_len(&frequencies) as usize);
    for symbol in text.chars() {
        // The table was generated from the counts of `text` itself.
        let code = codes.get(symbol).expect("every input symbol has a code");
        writer.push_code(code);
    }
    let payload = writer.finish();
    debug!(
        "compressed {} bytes ({} symbols, {} distinct) into {} bits + {} padding",
        text.len(),
        frequencies.total(),
        frequencies.len(),
        payload.bit_len(),
        payload.padding_bits
    );
    CompressionResult {
        original_size: text.len(),
        compressed_size: payload.len(),
        payload: payload,
        codes: codes,
        frequencies: frequencies,
        tree: tree,
    }
}

/// Decodes `payload` with `tree`, see [`decompress_warn`].
pub fn decompress(
    payload: &[u8],
    tree: Option<&Tree>,
    padding_bits: u8,
) -> Result<String, DecompressionError> {
    decompress_warn(&mut Ignore, payload, tree, padding_bits)
}

/// Decodes `payload` with `tree`, dropping the last `padding_bits` bits.
///
/// No tree or no payload decodes to the empty string.
pub fn decompress_warn<W: Warn<Warning>>(
    warn: &mut W,
    payload: &[u8],
    tree: Option<&Tree>,
    padding_bits: u8,
) -> Result<String, DecompressionError> {
    let tree = match tree {
        Some(tree) if !payload.is_empty() => tree,
        _ => return Ok(String::new()),
    };
    if padding_bits > 7 {
        return Err(DecompressionError::PaddingOutOfRange(padding_bits));
    }
    if !bits::padding_is_zero(payload, padding_bits) {
        warn.warn(Warning::NonZeroPadding);
    }

    let root = tree.root();
    let mut result = String::new();
    let mut node = root;
    for bit in bits::unpack(payload, padding_bits) {
        if let Some(symbol) = node.wrapped_symbol() {
            // A single-symbol tree has nothing to choose between, every bit
            // is one occurrence of the symbol.
            result.push(symbol);
            continue;
        }
        let child = if bit { node.right() } else { node.left() };
        node = child.ok_or(DecompressionError::MissingBranch)?;
        if let Some(symbol) = node.symbol() {
            result.push(symbol);
            node = root;
        }
    }
    if !ptr::eq(node, root) {
        return Err(DecompressionError::IncompleteCode);
    }
    debug!("decompressed {} bytes into {} bytes of text", payload.len(), result.len());
    Ok(result)
}
