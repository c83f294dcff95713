#[cfg(test)]
#[macro_use]
extern crate quickcheck;

pub use glyph::Glyph;

pub mod glyph;
