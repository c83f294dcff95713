use indexmap::IndexMap;
use itertools::Itertools;
use serde::de;
use serde::Deserializer;
use serde::Serializer;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::frequency::FrequencyTable;
use crate::tree::Node;
use crate::tree::Tree;

/// The bit string assigned to one symbol, first bit first.
///
/// Never empty. Written as a string of `'0'` and `'1'`.
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Code {
    bits: Vec<bool>,
}

#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
pub enum InvalidCode {
    #[error("empty code")]
    Empty,
    #[error("invalid bit {0:?} in code")]
    Digit(char),
}

impl Code {
    pub fn len(&self) -> usize {
        self.bits.len()
    }
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl FromStr for Code {
    type Err = InvalidCode;
    fn from_str(s: &str) -> Result<Code, InvalidCode> {
        let bits: Vec<bool> = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                c => Err(InvalidCode::Digit(c)),
            })
            .collect::<Result<_, _>>()?;
        if bits.is_empty() {
            return Err(InvalidCode::Empty);
        }
        Ok(Code { bits: bits })
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl serde::Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Code {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Code, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Symbol to code mapping, one entry per leaf of the tree it was generated
/// from.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CodeTable {
    codes: IndexMap<char, Code>,
}

fn assign(node: &Node, path: &mut Vec<bool>, codes: &mut IndexMap<char, Code>) {
    match node {
        Node::Leaf { symbol, .. } => {
            // A root leaf has no path, give it a one-bit code anyway.
            let bits = if path.is_empty() { vec![false] } else { path.clone() };
            codes.insert(*symbol, Code { bits: bits });
        }
        Node::Internal { left, right, .. } => {
            path.push(false);
            assign(left, path, codes);
            path.pop();
            if let Some(right) = right {
                path.push(true);
                assign(right, path, codes);
                path.pop();
            }
        }
    }
}

impl CodeTable {
    /// Assigns `0` for every left and `1` for every right edge on the path
    /// from the root. Empty for `None`.
    pub fn generate(tree: Option<&Tree>) -> CodeTable {
        let mut codes = IndexMap::new();
        if let Some(tree) = tree {
            assign(tree.root(), &mut vec![], &mut codes);
        }
        CodeTable { codes: codes }
    }
    pub fn get(&self, symbol: char) -> Option<&Code> {
        self.codes.get(&symbol)
    }
    pub fn len(&self) -> usize {
        self.codes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (char, &Code)> + '_ {
        self.codes.iter().map(|(&c, code)| (c, code))
    }
    /// Whether no code is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        // After sorting, a code that prefixes any other code also prefixes
        // its direct successor.
        let mut sorted = self.codes.values().collect_vec();
        sorted.sort();
        sorted.windows(2).all(|w| !w[0].is_prefix_of(w[1]))
    }
    /// Whether both tables cover exactly the same symbols.
    pub fn covers(&self, frequencies: &FrequencyTable) -> bool {
        self.len() == frequencies.len() && frequencies.symbols().all(|s| self.codes.contains_key(&s))
    }
    /// Length of the encoding of the text the frequencies were counted from,
    /// padding excluded.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(s, n)| self.get(s).map(|c| n.saturating_mul(c.len() as u64)))
            .fold(0, u64::saturating_add)
    }
}
