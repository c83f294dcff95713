#![cfg(not(test))]

#[macro_use]
extern crate log;

use clap::App;
use clap::Arg;
use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;
use std::process;
use texthuff_huffman::compress;
use texthuff_huffman::parse_container_buffer;
use texthuff_huffman::CodeTable;
use texthuff_huffman::FrequencyTable;
use texthuff_huffman::Tree;
use texthuff_tools::inspect;
use texthuff_tools::read_text;
use texthuff_tools::size_summary;
use texthuff_tools::warn_log;
use texthuff_tools::Error;

struct Options {
    container: bool,
    tree: bool,
    codes: bool,
}

fn run(input: &Path, options: &Options) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let (frequencies, codes, tree): (FrequencyTable, CodeTable, Option<Tree>) = if options.container {
        let container = parse_container_buffer(&fs::read(input)?)?;
        writeln!(out, "payload: {} bytes, {} padding bits", container.payload.len(), container.padding_bits)?;
        let tree = container.tree();
        let context = input.display().to_string();
        container.check_codes(tree.as_ref(), &mut warn_log::Log::new(&context));
        (container.frequencies, container.codes, tree)
    } else {
        let result = compress(&read_text(input)?);
        writeln!(out, "{}", size_summary(&result))?;
        (result.frequencies, result.codes, result.tree)
    };

    writeln!(out, "\nfrequencies ({} symbols):", frequencies.len())?;
    inspect::write_frequencies(&mut out, &frequencies)?;
    if options.codes {
        writeln!(out, "\ncodes:")?;
        inspect::write_codes(&mut out, &codes, &frequencies)?;
    }
    if options.tree {
        writeln!(out, "\ntree:")?;
        match tree {
            Some(ref tree) => inspect::write_tree(&mut out, tree)?,
            None => writeln!(out, "(empty)")?,
        }
    }
    Ok(())
}

fn main() {
    texthuff_logger::init();

    let matches = App::new("huff_inspect")
        .about("Shows the frequency table, codes and tree of a text or container")
        .arg(Arg::with_name("INPUT")
            .required(true)
            .index(1)
            .help("Text file, or container file with --container")
        )
        .arg(Arg::with_name("container")
            .short("c")
            .long("container")
            .help("Read INPUT as a container instead of text")
        )
        .arg(Arg::with_name("tree")
            .short("t")
            .long("tree")
            .help("Print the tree")
        )
        .arg(Arg::with_name("codes")
            .long("codes")
            .help("Print the code table")
        )
        .get_matches();

    // Required arguments are always present.
    let input = Path::new(matches.value_of_os("INPUT").unwrap());
    let options = Options {
        container: matches.is_present("container"),
        tree: matches.is_present("tree"),
        codes: matches.is_present("codes"),
    };
    if let Err(err) = run(input, &options) {
        error!("{}: {}", input.display(), err);
        process::exit(1);
    }
}
