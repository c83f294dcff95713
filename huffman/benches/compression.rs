#[macro_use]
extern crate bencher;

use bencher::black_box;
use bencher::Bencher;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use texthuff_huffman::build_tree;
use texthuff_huffman::compress;
use texthuff_huffman::create_container_buffer;
use texthuff_huffman::decompress;
use texthuff_huffman::parse_container_buffer;
use texthuff_huffman::FrequencyTable;

fn texts() -> Vec<String> {
    BufReader::new(File::open("data/test_cases").unwrap())
        .lines()
        .map(|ml| ml.unwrap())
        .map(|l| {
            let hex = l.split('#').next().unwrap();
            let bytes = hex.split(' ').map(|h| u8::from_str_radix(h, 16).unwrap()).collect();
            String::from_utf8(bytes).unwrap()
        })
        .collect()
}

fn corpus() -> String {
    texts().join("").repeat(64)
}

fn frequencies(b: &mut Bencher) {
    let text = corpus();
    b.iter(|| black_box(FrequencyTable::count(&text)));
    b.bytes = text.len() as u64;
}

fn tree(b: &mut Bencher) {
    let table = FrequencyTable::count(&corpus());
    b.iter(|| black_box(build_tree(&table)));
}

fn compress_corpus(b: &mut Bencher) {
    let text = corpus();
    b.iter(|| black_box(compress(&text)));
    b.bytes = text.len() as u64;
}

fn decompress_corpus(b: &mut Bencher) {
    let result = compress(&corpus());
    let tree = result.tree.as_ref();
    b.iter(|| black_box(decompress(&result.payload.bytes, tree, result.payload.padding_bits)));
    b.bytes = result.payload.len() as u64;
}

fn container(b: &mut Bencher) {
    let buffer = create_container_buffer(&compress(&corpus()));
    b.iter(|| black_box(parse_container_buffer(&buffer).is_ok()));
    b.bytes = buffer.len() as u64;
}

benchmark_group!(benches, frequencies, tree, compress_corpus, decompress_corpus, container);
benchmark_main!(benches);
