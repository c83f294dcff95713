use indexmap::IndexMap;
use serde::de;
use serde::Deserializer;
use serde_derive::Serialize;
use thiserror::Error;

/// Symbol occurrence counts of one input.
///
/// Keys are kept in the order in which the symbols first occur. Leaves are
/// queued in that order during tree construction, so the order is part of
/// what makes a tree reproducible from a stored table.
///
/// Never holds a zero count.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: IndexMap<char, u64>,
}

#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
#[error("symbol {0:?} has a frequency of zero")]
pub struct ZeroFrequency(pub char);

impl FrequencyTable {
    pub fn count(text: &str) -> FrequencyTable {
        let mut counts = IndexMap::new();
        for c in text.chars() {
            *counts.entry(c).or_insert(0) += 1;
        }
        FrequencyTable { counts: counts }
    }
    /// Builds a table from explicit counts. Zero counts are dropped, a
    /// repeated symbol keeps its first position and its last count.
    pub fn from_counts<I>(counts: I) -> FrequencyTable
    where
        I: IntoIterator<Item = (char, u64)>,
    {
        FrequencyTable {
            counts: counts.into_iter().filter(|&(_, n)| n != 0).collect(),
        }
    }
    /// Like [`from_counts`](FrequencyTable::from_counts), but a zero count
    /// is an error instead of being dropped.
    pub fn try_from_counts<I>(counts: I) -> Result<FrequencyTable, ZeroFrequency>
    where
        I: IntoIterator<Item = (char, u64)>,
    {
        let counts: IndexMap<char, u64> = counts
            .into_iter()
            .map(|(c, n)| if n == 0 { Err(ZeroFrequency(c)) } else { Ok((c, n)) })
            .collect::<Result<_, _>>()?;
        Ok(FrequencyTable { counts: counts })
    }
    pub fn get(&self, symbol: char) -> Option<u64> {
        self.counts.get(&symbol).cloned()
    }
    pub fn contains(&self, symbol: char) -> bool {
        self.counts.contains_key(&symbol)
    }
    pub fn len(&self) -> usize {
        self.counts.len()
    }
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
    /// Number of symbols the table was counted from.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0u64, |s, &n| s.saturating_add(n))
    }
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&c, &n)| (c, n))
    }
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.counts.keys().cloned()
    }
}

impl<'de> serde::Deserialize<'de> for FrequencyTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<FrequencyTable, D::Error> {
        let counts = <IndexMap<char, u64> as serde::Deserialize>::deserialize(deserializer)?;
        FrequencyTable::try_from_counts(counts).map_err(de::Error::custom)
    }
}
