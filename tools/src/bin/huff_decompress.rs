#![cfg(not(test))]

#[macro_use]
extern crate log;

use clap::App;
use clap::Arg;
use std::fs;
use std::path::Path;
use std::process;
use texthuff_huffman::parse_container_buffer;
use texthuff_tools::warn_log;
use texthuff_tools::Error;

fn run(input: &Path, output: &Path) -> Result<(), Error> {
    let container = parse_container_buffer(&fs::read(input)?)?;
    let context = input.display().to_string();
    let text = container.decompress(&mut warn_log::Log::new(&context))?;
    fs::write(output, &text)?;
    info!("{}: {} -> {} bytes", input.display(), container.payload.len(), text.len());
    Ok(())
}

fn main() {
    texthuff_logger::init();

    let matches = App::new("huff_decompress")
        .about("Restores the text stored in a Huffman container")
        .arg(Arg::with_name("INPUT")
            .required(true)
            .index(1)
            .help("Container file to read")
        )
        .arg(Arg::with_name("OUTPUT")
            .required(true)
            .index(2)
            .help("Text file to write")
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
