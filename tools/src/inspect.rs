use itertools::Itertools;
use std::io;
use std::io::Write;
use texthuff_common::Glyph;
use texthuff_huffman::CodeTable;
use texthuff_huffman::FrequencyTable;
use texthuff_huffman::Node;
use texthuff_huffman::Tree;

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// Most frequent symbols first, equal counts in order of first occurrence.
pub fn write_frequencies<W: Write>(out: &mut W, frequencies: &FrequencyTable) -> io::Result<()> {
    let total = frequencies.total();
    let mut rows = frequencies.iter().collect_vec();
    rows.sort_by(|&(_, a), &(_, b)| b.cmp(&a));
    for (symbol, count) in rows {
        writeln!(out, "{}\t{}\t{:.2}%", Glyph(symbol), count, percent(count, total))?;
    }
    Ok(())
}

pub fn write_codes<W: Write>(
    out: &mut W,
    codes: &CodeTable,
    frequencies: &FrequencyTable,
) -> io::Result<()> {
    let mut rows = codes.iter().collect_vec();
    rows.sort_by_key(|&(_, code)| code.len());
    for (symbol, code) in rows {
        let count = frequencies.get(symbol).unwrap_or(0);
        writeln!(out, "{}\t{}\t{}", Glyph(symbol), code, count * code.len() as u64)?;
    }
    writeln!(out, "total\t\t{}", codes.encoded_bit_len(frequencies))?;
    Ok(())
}

fn label(node: &Node) -> String {
    match node.symbol() {
        Some(symbol) => format!("#{} {} ({})", node.id(), Glyph(symbol), node.weight()),
        None => format!("#{} ({})", node.id(), node.weight()),
    }
}

/// One node per line, indented by depth, with the id of its parent.
pub fn write_tree<W: Write>(out: &mut W, tree: &Tree) -> io::Result<()> {
    let parents = tree.parents();
    for (depth, node) in tree.preorder() {
        write!(out, "{:indent$}{}", "", label(node), indent = depth * 2)?;
        match parents.get(&node.id()) {
            Some(parent) => writeln!(out, " <- #{}", parent)?,
            None => writeln!(out)?,
        }
    }
    Ok(())
}
