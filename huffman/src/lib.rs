//! Huffman coding of text.
//!
//! [`compress`] counts symbol frequencies, builds a [`Tree`], derives a
//! prefix-free [`CodeTable`] and packs the codes into bytes.
//! [`create_container_buffer`] bundles the result with everything needed to
//! decode it again, [`parse_container_buffer`] reverses that.

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

#[macro_use]
extern crate log;

pub use self::bits::CompressedPayload;
pub use self::code::Code;
pub use self::code::CodeTable;
pub use self::code::InvalidCode;
pub use self::codec::compress;
pub use self::codec::decompress;
pub use self::codec::decompress_warn;
pub use self::codec::CompressionResult;
pub use self::codec::DecompressionError;
pub use self::codec::Warning;
pub use self::container::create_container_buffer;
pub use self::container::parse_container_buffer;
pub use self::container::Container;
pub use self::container::ParseError;
pub use self::container::HEADER_LEN;
pub use self::frequency::FrequencyTable;
pub use self::frequency::ZeroFrequency;
pub use self::tree::build_tree;
pub use self::tree::Node;
pub use self::tree::NodeId;
pub use self::tree::Tree;

pub mod bits;
pub mod heap;
pub mod tree;

mod code;
mod codec;
mod container;
mod frequency;
