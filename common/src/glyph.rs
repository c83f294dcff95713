use std::fmt;
use std::fmt::Write;

/// Printable stand-in for a single symbol.
///
/// Whitespace and control characters are replaced by visible glyphs so that
/// frequency and code tables stay readable; every other character is shown
/// as itself. Any `char` is accepted.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Glyph(pub char);

// Start of the Unicode "Control Pictures" block, U+2400 pictures U+0000.
const CONTROL_PICTURES: u32 = 0x2400;

fn control_picture(c: char) -> Option<char> {
    match c {
        '\0'..='\x1f' => char::from_u32(CONTROL_PICTURES + c as u32),
        '\x7f' => Some('\u{2421}'),
        _ => None,
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Glyph(c) = *self;
        match c {
            ' ' => f.write_char('\u{2423}'),
            '\n' => f.write_char('\u{21b5}'),
            '\t' => f.write_char('\u{2192}'),
            '\r' => f.write_char('\u{240d}'),
            c if c.is_control() => match control_picture(c) {
                Some(p) => f.write_char(p),
                None => write!(f, "\\u{{{:x}}}", c as u32),
            },
            c => f.write_char(c),
        }
    }
}
