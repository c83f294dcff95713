#![cfg(not(test))]

#[macro_use]
extern crate log;

use clap::App;
use clap::Arg;
use std::fs;
use std::path::Path;
use std::process;
use texthuff_huffman::compress;
use texthuff_huffman::create_container_buffer;
use texthuff_tools::log_summary;
use texthuff_tools::read_text;
use texthuff_tools::Error;

fn run(input: &Path, output: &Path) -> Result<(), Error> {
    let text = read_text(input)?;
    let result = compress(&text);
    fs::write(output, create_container_buffer(&result))?;
    log_summary(input, &result);
    Ok(())
}

fn main() {
    texthuff_logger::init();

    let matches = App::new("huff_compress")
        .about("Compresses a UTF-8 text file into a Huffman container")
        .arg(Arg::with_name("INPUT")
            .required(true)
            .index(1)
            .help("Text file to compress")
        )
        .arg(Arg::with_name("OUTPUT")
            .required(true)
            .index(2)
            .help("Container file to write")
        )
        .get_matches();

    // Required arguments are always present.
    let input = Path::new(matches.value_of_os("INPUT").unwrap());
    let output = Path::new(matches.value_of_os("OUTPUT").unwrap());
    if let Err(err) = run(input, output) {
        error!("{}: {}", input.display(), err);
        process::exit(1);
    }
}
