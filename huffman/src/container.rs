//! Self-describing buffer bundling the payload with its decoding metadata.
//!
//! Layout, little-endian:
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 4 | length of the metadata in bytes |
//! | 4 | metadata length | JSON object with `codeMap`, `paddingBits` and `frequencyMap` |
//! | 4 + metadata length | rest | payload |
//!
//! The tree is not stored, it is rebuilt from `frequencyMap`.

use indexmap::IndexMap;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use thiserror::Error;
use warn::Warn;

use crate::code::CodeTable;
use crate::codec;
use crate::codec::CompressionResult;
use crate::codec::DecompressionError;
use crate::codec::Warning;
use crate::frequency::FrequencyTable;
use crate::tree::Tree;

pub const HEADER_LEN: usize = 4;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("buffer of {0} bytes is too short for the header")]
    TruncatedHeader(usize),
    #[error("metadata length {declared} exceeds the {available} remaining bytes")]
    MetadataLength { declared: usize, available: usize },
    #[error("invalid metadata: {0}")]
    Metadata(#[from] serde_json::Error),
    #[error("{0} padding bits, at most 7 are possible")]
    PaddingOutOfRange(u8),
    #[error("symbol {0:?} has a frequency of zero")]
    ZeroFrequency(char),
    #[error("code map and frequency map have different symbols")]
    SymbolMismatch,
    #[error("payload holds {actual} bits, the frequency map needs {expected}")]
    PayloadLength { expected: u64, actual: u64 },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MetadataRef<'a> {
    code_map: &'a CodeTable,
    padding_bits: u8,
    frequency_map: &'a FrequencyTable,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    code_map: CodeTable,
    padding_bits: u8,
    frequency_map: IndexMap<char, u64>,
}

/// A parsed container buffer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Container {
    pub payload: Vec<u8>,
    pub codes: CodeTable,
    pub padding_bits: u8,
    pub frequencies: FrequencyTable,
}

impl Container {
    /// Rebuilds the tree the payload was encoded with.
    pub fn tree(&self) -> Option<Tree> {
        Tree::from_frequencies(&self.frequencies)
    }
    /// Warns with [`Warning::CodeMismatch`] if the stored codes differ from
    /// the ones derived from `tree`.
    pub fn check_codes<W: Warn<Warning>>(&self, tree: Option<&Tree>, warn: &mut W) {
        if CodeTable::generate(tree) != self.codes {
            warn.warn(Warning::CodeMismatch);
        }
    }
    /// Rebuilds the tree and decodes the payload.
    ///
    /// Fails unless exactly as many symbols come out as the frequency table
    /// counts.
    pub fn decompress<W: Warn<Warning>>(&self, warn: &mut W) -> Result<String, DecompressionError> {
        let tree = self.tree();
        self.check_codes(tree.as_ref(), warn);
        let text = codec::decompress_warn(warn, &self.payload, tree.as_ref(), self.padding_bits)?;
        let expected = self.frequencies.total();
        let actual = text.chars().count() as u64;
        if actual != expected {
            return Err(DecompressionError::SymbolCount { expected: expected, actual: actual });
        }
        Ok(text)
    }
}

/// Serializes a compression result.
///
/// # Panics
///
/// Panics if the metadata does not fit the 32-bit length field.
pub fn create_container_buffer(result: &CompressionResult) -> Vec<u8> {
    let metadata = MetadataRef {
        code_map: &result.codes,
        padding_bits: result.payload.padding_bits,
        frequency_map: &result.frequencies,
    };
    // Maps with `char` keys and string or integer values always serialize.
    let metadata = serde_json::to_vec(&metadata).expect("metadata serialization");
    let metadata_len = u32::try_from(metadata.len()).expect("metadata length overflow");

    let mut buffer = Vec::with_capacity(HEADER_LEN + metadata.len() + result.payload.len());
    buffer.extend_from_slice(&metadata_len.to_le_bytes());
    buffer.extend_from_slice(&metadata);
    buffer.extend_from_slice(&result.payload.bytes);
    buffer
}

pub fn parse_container_buffer(bytes: &[u8]) -> Result<Container, ParseError> {
    if bytes.len() < HEADER_LEN {
        return Err(ParseError::TruncatedHeader(bytes.len()));
    }
    let (header, rest) = bytes.split_at(HEADER_LEN);
    let declared = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    // Compare in `u64` so that the check holds on 16-bit targets, too.
    if declared as u64 > rest.len() as u64 {
        return Err(ParseError::MetadataLength {
            declared: declared as usize,
            available: rest.len(),
        });
    }
    let (metadata, payload) = rest.split_at(declared as usize);
    let metadata: Metadata = serde_json::from_slice(metadata)?;

    if metadata.padding_bits > 7 {
        return Err(ParseError::PaddingOutOfRange(metadata.padding_bits));
    }
    let frequencies = FrequencyTable::try_from_counts(metadata.frequency_map)
        .map_err(|err| ParseError::ZeroFrequency(err.0))?;
    if !metadata.code_map.covers(&frequencies) {
        return Err(ParseError::SymbolMismatch);
    }
    let tree = Tree::from_frequencies(&frequencies);
    let expected = CodeTable::generate(tree.as_ref()).encoded_bit_len(&frequencies);
    let actual = (payload.len() as u64 * 8).saturating_sub(metadata.padding_bits as u64);
    if payload.len() as u64 * 8 != expected.saturating_add(metadata.padding_bits as u64) {
        return Err(ParseError::PayloadLength { expected: expected, actual: actual });
    }
    debug!(
        "parsed container: {} bytes of metadata, {} bytes of payload, {} symbols",
        declared,
        payload.len(),
        frequencies.len()
    );
    Ok(Container {
        payload: payload.to_vec(),
        codes: metadata.code_map,
        padding_bits: metadata.padding_bits,
        frequencies: frequencies,
    })
}

#[cfg(test)]
mod test {
    use super::create_container_buffer;
    use super::parse_container_buffer;
    use super::ParseError;
    use super::HEADER_LEN;
    use crate::codec::compress;
    use crate::codec::DecompressionError;
    use crate::codec::Warning;

    fn with_metadata(metadata: &str, payload: &[u8]) -> Vec<u8> {
        let mut buffer = (metadata.len() as u32).to_le_bytes().to_vec();
        buffer.extend_from_slice(metadata.as_bytes());
        buffer.extend_from_slice(payload);
        buffer
    }

    #[test]
    fn layout() {
        let buffer = create_container_buffer(&compress("aab"));
        let metadata = r#"{"codeMap":{"b":"0","a":"1"},"paddingBits":5,"frequencyMap":{"a":2,"b":1}}"#;
        assert_eq!(buffer, with_metadata(metadata, &[0xc0]));
    }

    #[test]
    fn roundtrip() {
        let result = compress("abracadabra");
        let container = parse_container_buffer(&create_container_buffer(&result)).unwrap();
        assert_eq!(container.frequencies, result.frequencies);
        assert_eq!(container.codes, result.codes);
        assert_eq!(container.padding_bits, result.payload.padding_bits);
        assert_eq!(container.payload, result.payload.bytes);
        assert_eq!(container.tree(), result.tree);
        let mut warnings: Vec<Warning> = vec![];
        assert_eq!(container.decompress(&mut warnings).unwrap(), "abracadabra");
        assert!(warnings.is_empty());
    }

    #[test]
    fn empty() {
        let buffer = create_container_buffer(&compress(""));
        let container = parse_container_buffer(&buffer).unwrap();
        assert!(container.payload.is_empty());
        assert!(container.frequencies.is_empty());
        assert_eq!(container.tree(), None);
        assert_eq!(container.decompress(&mut warn::Ignore).unwrap(), "");
    }

    #[test]
    fn truncated_header() {
        let buffer = create_container_buffer(&compress("aab"));
        for len in 0..HEADER_LEN {
            match parse_container_buffer(&buffer[..len]) {
                Err(ParseError::TruncatedHeader(l)) => assert_eq!(l, len),
                other => panic!("{:?}", other),
            }
        }
    }

    #[test]
    fn truncated_metadata() {
        let buffer = create_container_buffer(&compress("aab"));
        // Everything but the one payload byte.
        let metadata_end = buffer.len() - 1;
        for len in HEADER_LEN..metadata_end {
            match parse_container_buffer(&buffer[..len]) {
                Err(ParseError::MetadataLength { declared, available }) => {
                    assert_eq!(declared, metadata_end - HEADER_LEN);
                    assert_eq!(available, len - HEADER_LEN);
                }
                other => panic!("{:?}", other),
            }
        }
        match parse_container_buffer(&buffer[..metadata_end]) {
            Err(ParseError::PayloadLength { expected: 3, actual: 0 }) => {}
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn truncated_payload() {
        for &text in &["aab", "hello world", "abracadabra", "mississippi river"] {
            let buffer = create_container_buffer(&compress(text));
            match parse_container_buffer(&buffer[..buffer.len() - 1]) {
                Err(ParseError::PayloadLength { .. }) => {}
                other => panic!("{:?}: {:?}", text, other),
            }
        }
    }

    #[test]
    fn extra_payload() {
        let mut buffer = create_container_buffer(&compress("hello world"));
        buffer.push(0x00);
        assert!(matches!(parse_container_buffer(&buffer), Err(ParseError::PayloadLength { .. })));

        let metadata = r#"{"codeMap":{"a":"0"},"paddingBits":0,"frequencyMap":{"a":4}}"#;
        match parse_container_buffer(&with_metadata(metadata, &[0xff])) {
            Err(ParseError::PayloadLength { expected: 4, actual: 8 }) => {}
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn padding_without_payload() {
        let metadata = r#"{"codeMap":{},"paddingBits":3,"frequencyMap":{}}"#;
        match parse_container_buffer(&with_metadata(metadata, &[])) {
            Err(ParseError::PayloadLength { expected: 0, actual: 0 }) => {}
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn symbol_count() {
        // a: 1, b: 00, c: 01. `bbbb` takes as many bits as `aaaabc`.
        let metadata = r#"{"codeMap":{"a":"1","b":"00","c":"01"},"paddingBits":0,"frequencyMap":{"a":4,"b":1,"c":1}}"#;
        let container = parse_container_buffer(&with_metadata(metadata, &[0xf1])).unwrap();
        assert_eq!(container.decompress(&mut warn::Panic).unwrap(), "aaaabc");

        let container = parse_container_buffer(&with_metadata(metadata, &[0x00])).unwrap();
        assert_eq!(
            container.decompress(&mut warn::Ignore),
            Err(DecompressionError::SymbolCount { expected: 6, actual: 4 }),
        );
    }

    #[test]
    fn invalid_json() {
        let buffer = with_metadata("{\"codeMap\":", &[]);
        assert!(matches!(parse_container_buffer(&buffer), Err(ParseError::Metadata(_))));
    }

    #[test]
    fn invalid_utf8() {
        let mut buffer = with_metadata("{\"codeMap\":{\"a\":\"0\"}}", &[]);
        buffer[HEADER_LEN + 13] = 0xff;
        assert!(matches!(parse_container_buffer(&buffer), Err(ParseError::Metadata(_))));
    }

    #[test]
    fn missing_field() {
        let buffer = with_metadata(r#"{"codeMap":{},"frequencyMap":{}}"#, &[]);
        assert!(matches!(parse_container_buffer(&buffer), Err(ParseError::Metadata(_))));
    }

    #[test]
    fn invalid_code() {
        let metadata = r#"{"codeMap":{"a":"0x"},"paddingBits":0,"frequencyMap":{"a":1}}"#;
        let buffer = with_metadata(metadata, &[]);
        assert!(matches!(parse_container_buffer(&buffer), Err(ParseError::Metadata(_))));
    }

    #[test]
    fn padding_out_of_range() {
        let metadata = r#"{"codeMap":{"a":"0"},"paddingBits":8,"frequencyMap":{"a":1}}"#;
        let buffer = with_metadata(metadata, &[0x00]);
        assert!(matches!(parse_container_buffer(&buffer), Err(ParseError::PaddingOutOfRange(8))));
    }

    #[test]
    fn zero_frequency() {
        let metadata = r#"{"codeMap":{"a":"0"},"paddingBits":7,"frequencyMap":{"a":0}}"#;
        let buffer = with_metadata(metadata, &[0x00]);
        assert!(matches!(parse_container_buffer(&buffer), Err(ParseError::ZeroFrequency('a'))));
    }

    #[test]
    fn symbol_mismatch() {
        let metadata = r#"{"codeMap":{"a":"0"},"paddingBits":5,"frequencyMap":{"a":2,"b":1}}"#;
        let buffer = with_metadata(metadata, &[0xc0]);
        assert!(matches!(parse_container_buffer(&buffer), Err(ParseError::SymbolMismatch)));
    }

    #[test]
    fn code_mismatch() {
        let metadata = r#"{"codeMap":{"a":"0","b":"1"},"paddingBits":5,"frequencyMap":{"a":2,"b":1}}"#;
        let container = parse_container_buffer(&with_metadata(metadata, &[0xc0])).unwrap();
        let mut warnings = vec![];
        assert_eq!(container.decompress(&mut warnings).unwrap(), "aab");
        assert_eq!(warnings, [Warning::CodeMismatch]);

        let mut warnings = vec![];
        container.check_codes(container.tree().as_ref(), &mut warnings);
        assert_eq!(warnings, [Warning::CodeMismatch]);
        let container = parse_container_buffer(&create_container_buffer(&compress("aab"))).unwrap();
        container.check_codes(container.tree().as_ref(), &mut warn::Panic);
    }

    quickcheck! {
        fn parse_never_panics(data: Vec<u8>) -> bool {
            let _ = parse_container_buffer(&data);
            true
        }

        fn roundtrip_any(s: String) -> bool {
            let result = compress(&s);
            let container = match parse_container_buffer(&create_container_buffer(&result)) {
                Ok(c) => c,
                Err(_) => return false,
            };
            container.frequencies == result.frequencies
                && container.decompress(&mut warn::Panic).ok().as_deref() == Some(&*s)
        }
    }
}
